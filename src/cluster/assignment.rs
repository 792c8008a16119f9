use crate::{Labels, NOISE};

/// Outcome of a DBSCAN run: one label per sample plus the core-sample mask.
///
/// Cluster ids are contiguous from 0 in the order clusters were formed, so
/// the number of clusters is one past the largest label.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterAssignment {
    labels: Labels,
    core_sample_mask: Vec<bool>,
}

impl ClusterAssignment {
    pub(crate) fn new(labels: Labels, core_sample_mask: Vec<bool>) -> Self {
        debug_assert_eq!(labels.len(), core_sample_mask.len());
        Self {
            labels,
            core_sample_mask,
        }
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn core_sample_mask(&self) -> &[bool] {
        &self.core_sample_mask
    }

    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn is_core(&self, sample: usize) -> bool {
        self.core_sample_mask.get(sample).copied().unwrap_or(false)
    }

    pub fn core_sample_indices(&self) -> Vec<usize> {
        self.core_sample_mask
            .iter()
            .enumerate()
            .filter(|&(_, &core)| core)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn n_clusters(&self) -> usize {
        self.labels
            .iter()
            .copied()
            .max()
            .map_or(0, |max| (max + 1).max(0) as usize)
    }

    pub fn n_noise(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE).count()
    }

    pub fn n_core(&self) -> usize {
        self.core_sample_mask.iter().filter(|&&c| c).count()
    }

    /// Number of samples in each cluster, indexed by cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters()];
        for &label in self.labels.iter().filter(|&&l| l >= 0) {
            sizes[label as usize] += 1;
        }
        sizes
    }

    /// Indices of the samples carrying `label`, ascending. Pass [`NOISE`]
    /// for the unclustered samples.
    pub fn members(&self, label: i32) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect()
    }

    /// Samples that belong to a cluster without being core samples.
    pub fn border_indices(&self) -> Vec<usize> {
        self.labels
            .iter()
            .zip(&self.core_sample_mask)
            .enumerate()
            .filter(|&(_, (&l, &core))| l != NOISE && !core)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> ClusterAssignment {
        ClusterAssignment::new(
            array![0, 0, 1, NOISE, 1, 0],
            vec![true, false, true, false, true, true],
        )
    }

    #[test]
    fn test_counts() {
        let a = sample();
        assert_eq!(a.n_samples(), 6);
        assert_eq!(a.n_clusters(), 2);
        assert_eq!(a.n_noise(), 1);
        assert_eq!(a.n_core(), 4);
        assert_eq!(a.cluster_sizes(), vec![3, 2]);
    }

    #[test]
    fn test_members_and_border() {
        let a = sample();
        assert_eq!(a.members(0), vec![0, 1, 5]);
        assert_eq!(a.members(NOISE), vec![3]);
        assert_eq!(a.core_sample_indices(), vec![0, 2, 4, 5]);
        assert_eq!(a.border_indices(), vec![1]);
        assert!(!a.is_core(99));
    }

    #[test]
    fn test_all_noise_has_no_clusters() {
        let a = ClusterAssignment::new(array![NOISE, NOISE], vec![false, false]);
        assert_eq!(a.n_clusters(), 0);
        assert!(a.cluster_sizes().is_empty());
    }
}

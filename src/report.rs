use crate::cluster::{Algorithm, ClusterAssignment, Metric};
use crate::error::Result;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Debug, Serialize)]
pub struct ClusterSummary {
    pub id: i32,
    pub size: usize,
    pub core: usize,
}

/// Everything a run produced, in a shape that serializes cleanly.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    pub n_samples: usize,
    pub n_features: usize,
    pub eps: f64,
    pub min_samples: usize,
    pub metric: Metric,
    pub algorithm: Algorithm,
    pub standardized: bool,
    pub n_clusters: usize,
    pub n_noise: usize,
    pub n_core: usize,
    /// Clustered samples that are not core samples.
    pub n_border: usize,
    pub clusters: Vec<ClusterSummary>,
    pub silhouette: Option<f64>,
    pub plot: Option<PathBuf>,
    pub labels: Vec<i32>,
    pub core_samples: Vec<usize>,
}

impl RunReport {
    pub fn summarize_clusters(assignment: &ClusterAssignment) -> Vec<ClusterSummary> {
        let mut clusters: Vec<ClusterSummary> = assignment
            .cluster_sizes()
            .into_iter()
            .enumerate()
            .map(|(id, size)| ClusterSummary {
                id: id as i32,
                size,
                core: 0,
            })
            .collect();

        for i in assignment.core_sample_indices() {
            let label = assignment.labels()[i];
            if label >= 0 {
                clusters[label as usize].core += 1;
            }
        }
        clusters
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Input: {}", self.input.display())?;
        writeln!(
            f,
            "Dataset: {} samples, {} features{}",
            self.n_samples,
            self.n_features,
            if self.standardized { " (standardized)" } else { "" }
        )?;
        writeln!(
            f,
            "DBSCAN(eps={}, min_samples={}, metric={:?}, algorithm={:?})",
            self.eps, self.min_samples, self.metric, self.algorithm
        )?;
        writeln!(f, "Estimated number of clusters: {}", self.n_clusters)?;
        writeln!(f, "Estimated number of noise points: {}", self.n_noise)?;
        writeln!(f, "Core samples: {}", self.n_core)?;
        writeln!(f, "Border samples: {}", self.n_border)?;
        match self.silhouette {
            Some(score) => writeln!(f, "Silhouette Coefficient: {:.3}", score)?,
            None => writeln!(f, "Silhouette Coefficient: undefined")?,
        }
        for cluster in &self.clusters {
            writeln!(
                f,
                "  Cluster {}: {} points ({} core)",
                cluster.id, cluster.size, cluster.core
            )?;
        }
        if self.n_noise > 0 {
            writeln!(f, "  Noise: {} points", self.n_noise)?;
        }
        if let Some(plot) = &self.plot {
            writeln!(f, "Plot: {}", plot.display())?;
        }
        Ok(())
    }
}

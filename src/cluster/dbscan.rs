use super::assignment::ClusterAssignment;
use super::neighbors::{build_index, Algorithm, Metric, RegionQuery};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::{Labels, Matrix, NOISE};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Unvisited,
    Noise,
    Cluster(i32),
}

#[derive(Clone, Debug)]
pub struct DBSCAN {
    assignment: Option<ClusterAssignment>,
    eps: f64,
    min_samples: usize,
    metric: Metric,
    algorithm: Algorithm,
}

impl DBSCAN {
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self {
            assignment: None,
            eps,
            min_samples,
            metric: Metric::Euclidean,
            algorithm: Algorithm::Auto,
        }
    }

    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        self.validate()?;
        if x.nrows() == 0 {
            return Err(Error::EmptyInput("at least one sample is required".to_string()));
        }
        if x.ncols() == 0 {
            return Err(Error::EmptyInput("at least one feature is required".to_string()));
        }

        let algorithm = self.algorithm.resolve(x.nrows(), x.ncols());
        log::debug!(
            "DBSCAN over {} samples x {} features using {:?} ({:?} metric)",
            x.nrows(),
            x.ncols(),
            algorithm,
            self.metric
        );

        let index = build_index(x.view(), self.metric, algorithm);
        let assignment = expand_clusters(index.as_ref(), self.eps, self.min_samples);

        log::info!(
            "DBSCAN(eps={}, min_samples={}): {} clusters, {} noise points, {} core samples",
            self.eps,
            self.min_samples,
            assignment.n_clusters(),
            assignment.n_noise(),
            assignment.n_core()
        );

        self.assignment = Some(assignment);
        Ok(())
    }

    pub fn fit_predict(&mut self, x: &Matrix) -> Result<Labels> {
        self.fit(x)?;
        self.labels()
            .cloned()
            .ok_or_else(|| Error::EmptyInput("no samples were clustered".to_string()))
    }

    pub fn assignment(&self) -> Option<&ClusterAssignment> {
        self.assignment.as_ref()
    }

    pub fn into_assignment(self) -> Option<ClusterAssignment> {
        self.assignment
    }

    pub fn labels(&self) -> Option<&Labels> {
        self.assignment.as_ref().map(ClusterAssignment::labels)
    }

    pub fn core_sample_indices(&self) -> Option<Vec<usize>> {
        self.assignment.as_ref().map(ClusterAssignment::core_sample_indices)
    }

    pub fn get_n_clusters(&self) -> Option<usize> {
        self.assignment.as_ref().map(ClusterAssignment::n_clusters)
    }

    pub fn get_n_noise_points(&self) -> Option<usize> {
        self.assignment.as_ref().map(ClusterAssignment::n_noise)
    }

    pub fn is_core_sample(&self, sample_idx: usize) -> Option<bool> {
        self.assignment.as_ref().map(|a| a.is_core(sample_idx))
    }

    fn validate(&self) -> Result<()> {
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(Error::invalid(
                "eps",
                format!("must be a finite value > 0, got {}", self.eps),
            ));
        }
        if self.min_samples == 0 {
            return Err(Error::invalid("min_samples", "must be >= 1, got 0"));
        }
        Ok(())
    }
}

/// Cluster `points` with DBSCAN using Euclidean distance.
pub fn dbscan(points: &Dataset, eps: f64, min_samples: usize) -> Result<ClusterAssignment> {
    let mut model = DBSCAN::new(eps, min_samples);
    model.fit(points.features())?;
    model
        .into_assignment()
        .ok_or_else(|| Error::EmptyInput("no samples were clustered".to_string()))
}

/// Grow clusters outwards from core samples, seeding in index order.
///
/// A sample marked noise can still be claimed as a border sample by a
/// cluster formed later. A sample already in a cluster is never moved.
pub(crate) fn expand_clusters<Q>(index: &Q, eps: f64, min_samples: usize) -> ClusterAssignment
where
    Q: RegionQuery + ?Sized,
{
    let n_samples = index.n_points();
    let mut state = vec![State::Unvisited; n_samples];
    let mut core = vec![false; n_samples];
    let mut next_cluster = 0;
    let mut queue = VecDeque::new();

    for seed in 0..n_samples {
        if state[seed] != State::Unvisited {
            continue;
        }

        let neighbours = index.neighbours(seed, eps);
        if neighbours.len() < min_samples {
            state[seed] = State::Noise;
            continue;
        }

        let cluster = next_cluster;
        next_cluster += 1;
        core[seed] = true;
        state[seed] = State::Cluster(cluster);
        queue.extend(neighbours);

        let mut size = 1;
        while let Some(q) = queue.pop_front() {
            match state[q] {
                State::Noise => {
                    state[q] = State::Cluster(cluster);
                    size += 1;
                }
                State::Unvisited => {
                    state[q] = State::Cluster(cluster);
                    size += 1;

                    let q_neighbours = index.neighbours(q, eps);
                    if q_neighbours.len() >= min_samples {
                        core[q] = true;
                        queue.extend(
                            q_neighbours
                                .into_iter()
                                .filter(|&nn| !matches!(state[nn], State::Cluster(_))),
                        );
                    }
                }
                State::Cluster(_) => {}
            }
        }

        log::debug!("cluster {} seeded at sample {} with {} samples", cluster, seed, size);
    }

    let labels = state
        .iter()
        .map(|s| match s {
            State::Cluster(c) => *c,
            _ => NOISE,
        })
        .collect::<Labels>();

    ClusterAssignment::new(labels, core)
}

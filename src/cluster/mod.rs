//! Density-based clustering.
//!
//! `DBSCAN` groups samples that are packed closely together and marks the
//! samples in sparse regions as noise. Neighbourhood lookups go through the
//! [`RegionQuery`] trait, implemented by a brute-force scan and a k-d tree.
//!
//! # Examples
//!
//! ```rust
//! use entroscan::{Algorithm, DBSCAN, Metric};
//! use ndarray::array;
//!
//! let x = array![
//!     [1.0, 1.0],
//!     [1.2, 1.1],
//!     [1.1, 1.2],
//!     [8.0, 8.0],
//!     [8.1, 8.1],
//!     [8.2, 7.9],
//!     [15.0, 1.0] // Outlier
//! ];
//!
//! let mut dbscan = DBSCAN::new(1.0, 2)
//!     .metric(Metric::Euclidean)
//!     .algorithm(Algorithm::KdTree);
//! dbscan.fit(&x).unwrap();
//!
//! let assignment = dbscan.assignment().unwrap();
//! assert_eq!(assignment.n_clusters(), 2);
//! assert_eq!(assignment.n_noise(), 1);
//! assert_eq!(assignment.core_sample_indices(), vec![0, 1, 2, 3, 4, 5]);
//! ```

mod assignment;
mod dbscan;
mod neighbors;

pub use assignment::ClusterAssignment;
pub use dbscan::{dbscan, DBSCAN};
pub use neighbors::{build_index, Algorithm, BruteScan, KdTree, Metric, RegionQuery};

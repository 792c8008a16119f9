//! Density-based clustering of per-packet entropy and size measurements.
//!
//! The crate loads a headerless feature table, standardizes it, groups the
//! rows with DBSCAN and reports the result as a summary, a JSON document
//! and an optional scatter plot.
//!
//! ```rust
//! use entroscan::{DBSCAN, NOISE};
//! use ndarray::array;
//!
//! let x = array![
//!     [1.0, 1.0],
//!     [1.2, 1.1],
//!     [1.1, 1.2],
//!     [8.0, 8.0],
//!     [8.1, 8.1],
//!     [8.2, 7.9],
//!     [15.0, 1.0]
//! ];
//!
//! let mut dbscan = DBSCAN::new(1.0, 2);
//! let labels = dbscan.fit_predict(&x).unwrap();
//! assert_eq!(labels[6], NOISE);
//! assert_eq!(dbscan.get_n_clusters(), Some(2));
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod cluster;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod metrics;
pub mod pipeline;
pub mod plot;
pub mod preprocessing;
pub mod report;

pub use cluster::{Algorithm, BruteScan, ClusterAssignment, KdTree, Metric, RegionQuery, DBSCAN};
pub use config::Config;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use preprocessing::StandardScaler;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

/// Per-sample cluster ids; [`NOISE`] marks unclustered samples.
pub type Labels = Array1<i32>;

/// Label given to samples not density-reachable from any core sample.
pub const NOISE: i32 = -1;

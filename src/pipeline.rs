//! One clustering run: load, standardize, cluster, score, plot.

use crate::cluster::{ClusterAssignment, DBSCAN};
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::metrics::silhouette_score;
use crate::plot::save_scatter;
use crate::preprocessing::StandardScaler;
use crate::report::RunReport;
use crate::Matrix;

/// Result of [`run`]: the clustered coordinates, the assignment and the
/// report built from them.
#[derive(Clone, Debug)]
pub struct RunOutput {
    pub features: Matrix,
    pub assignment: ClusterAssignment,
    pub report: RunReport,
}

pub fn run(config: &Config) -> Result<RunOutput> {
    config.validate()?;
    let dataset = Dataset::load_csv(&config.input, config.delimiter)?;
    cluster_dataset(config, dataset)
}

/// Run everything after loading on an already materialized dataset.
pub fn cluster_dataset(config: &Config, dataset: Dataset) -> Result<RunOutput> {
    config.validate()?;
    let (n_samples, n_features) = (dataset.n_samples(), dataset.n_features());

    let features = if config.no_scale {
        dataset.into_features()
    } else {
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(dataset.features())?;
        log::info!("Standardized {} features", n_features);
        if let (Some(mean), Some(scale)) = (scaler.mean(), scaler.scale()) {
            log::debug!("Feature means {}, scales {}", mean, scale);
        }
        scaled
    };

    let mut dbscan = DBSCAN::new(config.eps, config.min_samples)
        .metric(config.metric)
        .algorithm(config.algorithm);
    dbscan.fit(&features)?;
    let assignment = dbscan
        .into_assignment()
        .ok_or_else(|| Error::EmptyInput("no samples were clustered".to_string()))?;

    let silhouette = match silhouette_score(&features, assignment.labels(), config.metric) {
        Ok(score) => Some(score),
        Err(e) => {
            log::warn!("Silhouette coefficient not computed: {}", e);
            None
        }
    };

    if let Some(path) = &config.plot {
        save_scatter(path, &features, &assignment, &config.plot_options())?;
    }

    let report = RunReport {
        input: config.input.clone(),
        n_samples,
        n_features,
        eps: config.eps,
        min_samples: config.min_samples,
        metric: config.metric,
        algorithm: config.algorithm.resolve(n_samples, n_features),
        standardized: !config.no_scale,
        n_clusters: assignment.n_clusters(),
        n_noise: assignment.n_noise(),
        n_core: assignment.n_core(),
        n_border: assignment.border_indices().len(),
        clusters: RunReport::summarize_clusters(&assignment),
        silhouette,
        plot: config.plot.clone(),
        labels: assignment.labels().to_vec(),
        core_samples: assignment.core_sample_indices(),
    };

    Ok(RunOutput {
        features,
        assignment,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::make_blobs;
    use ndarray::array;

    #[test]
    fn test_cluster_dataset_blobs() {
        let centers = array![[0.0, 0.0], [20.0, 20.0]];
        let (x, _) = make_blobs(&centers, 30, 0.5, 1).unwrap();
        let mut config = Config::new("blobs");
        config.eps = 0.3;
        config.min_samples = 5;

        let output = cluster_dataset(&config, Dataset::new(x).unwrap()).unwrap();

        assert_eq!(output.report.n_clusters, 2);
        assert_eq!(output.report.n_samples, 60);
        assert!(output.report.standardized);
        assert!(output.report.silhouette.unwrap() > 0.5);
        assert_eq!(output.report.labels.len(), 60);
    }

    #[test]
    fn test_cluster_dataset_without_scaling() {
        let x = array![[0.0], [0.1], [0.2], [9.0]];
        let mut config = Config::new("raw");
        config.eps = 0.15;
        config.min_samples = 2;
        config.no_scale = true;

        let output = cluster_dataset(&config, Dataset::new(x.clone()).unwrap()).unwrap();
        assert_eq!(output.features, x);
        assert_eq!(output.report.labels, vec![0, 0, 0, -1]);
    }

    #[test]
    fn test_all_noise_leaves_silhouette_undefined() {
        let x = array![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]];
        let config = Config::new("sparse");

        let output = cluster_dataset(&config, Dataset::new(x).unwrap()).unwrap();
        assert_eq!(output.report.n_clusters, 0);
        assert_eq!(output.report.n_noise, 3);
        assert!(output.report.silhouette.is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::new("any");
        config.min_samples = 0;
        let dataset = Dataset::new(array![[1.0]]).unwrap();
        assert!(matches!(
            cluster_dataset(&config, dataset),
            Err(Error::InvalidParameter { .. })
        ));
    }
}

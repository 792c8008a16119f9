use crate::cluster::{Algorithm, Metric};
use crate::error::{Error, Result};
use crate::plot::PlotOptions;
use clap::Parser;
use std::path::PathBuf;

/// Cluster per-packet entropy/size features with DBSCAN
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Headerless feature table, one row per packet
    #[arg(short, long, value_parser)]
    pub input: PathBuf,

    /// Neighbourhood radius
    #[arg(short, long, default_value_t = 0.1, value_parser)]
    pub eps: f64,

    /// Minimum neighbourhood size, counting the sample itself
    #[arg(short, long, default_value_t = 10, value_parser)]
    pub min_samples: usize,

    /// Field delimiter of the input table
    #[arg(short, long, default_value_t = ',', value_parser)]
    pub delimiter: char,

    /// Distance between samples
    #[arg(long, value_enum, default_value_t = Metric::Euclidean)]
    pub metric: Metric,

    /// Neighbourhood query strategy
    #[arg(long, value_enum, default_value_t = Algorithm::Auto)]
    pub algorithm: Algorithm,

    /// Cluster the raw features instead of standardized ones
    #[arg(long)]
    pub no_scale: bool,

    /// Write a scatter plot of the clustering to this PNG file
    #[arg(short = 'o', long, value_parser)]
    pub plot: Option<PathBuf>,

    /// Feature column on the plot's horizontal axis
    #[arg(long, default_value_t = 0, value_parser)]
    pub plot_x: usize,

    /// Feature column on the plot's vertical axis
    #[arg(long, default_value_t = 1, value_parser)]
    pub plot_y: usize,

    /// Print the run report as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Print one label per input row
    #[arg(long)]
    pub labels: bool,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            eps: 0.1,
            min_samples: 10,
            delimiter: ',',
            metric: Metric::default(),
            algorithm: Algorithm::default(),
            no_scale: false,
            plot: None,
            plot_x: 0,
            plot_y: 1,
            json: false,
            labels: false,
        }
    }

    /// Reject parameters that would fail deep inside the run.
    pub fn validate(&self) -> Result<()> {
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

    pub fn plot_options(&self) -> PlotOptions {
        PlotOptions {
            x_feature: self.plot_x,
            y_feature: self.plot_y,
            ..PlotOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Config::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["entroscan", "--input", "capture.txt"]).unwrap();
        assert_eq!(config.input, PathBuf::from("capture.txt"));
        assert_eq!(config.eps, 0.1);
        assert_eq!(config.min_samples, 10);
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.metric, Metric::Euclidean);
        assert_eq!(config.algorithm, Algorithm::Auto);
        assert!(config.plot.is_none());
        assert!(!config.no_scale);
    }

    #[test]
    fn test_parse_options() {
        let config = Config::try_parse_from([
            "entroscan",
            "-i",
            "capture.txt",
            "-e",
            "0.3",
            "-m",
            "4",
            "--metric",
            "manhattan",
            "--algorithm",
            "kd-tree",
            "-o",
            "clusters.png",
            "--json",
        ])
        .unwrap();

        assert_eq!(config.eps, 0.3);
        assert_eq!(config.min_samples, 4);
        assert_eq!(config.metric, Metric::Manhattan);
        assert_eq!(config.algorithm, Algorithm::KdTree);
        assert_eq!(config.plot, Some(PathBuf::from("clusters.png")));
        assert!(config.json);
    }

    #[test]
    fn test_input_required() {
        assert!(Config::try_parse_from(["entroscan"]).is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = Config::new("capture.txt");
        assert!(config.validate().is_ok());

        config.eps = 0.0;
        assert!(config.validate().is_err());

        config.eps = 0.5;
        config.min_samples = 0;
        assert!(config.validate().is_err());
    }
}

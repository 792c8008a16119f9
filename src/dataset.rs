use crate::error::{Error, Result};
use crate::Matrix;
use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

/// A fixed table of samples, one row per point.
#[derive(Clone, Debug)]
pub struct Dataset {
    features: Matrix,
}

impl Dataset {
    pub fn new(features: Matrix) -> Result<Self> {
        if features.nrows() == 0 {
            return Err(Error::EmptyInput("dataset has no samples".to_string()));
        }
        if features.ncols() == 0 {
            return Err(Error::EmptyInput("dataset has no features".to_string()));
        }

        Ok(Self { features })
    }

    /// Build a dataset from rows, requiring every row to match the first
    /// row's length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n_features = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| Error::EmptyInput("dataset has no samples".to_string()))?;

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != n_features)
        {
            return Err(Error::InconsistentDimension {
                row,
                expected: n_features,
                found,
            });
        }

        let flat = rows.iter().flatten().copied().collect::<Vec<_>>();
        let features = Array2::from_shape_vec((rows.len(), n_features), flat).map_err(|e| {
            Error::invalid("rows", format!("cannot shape rows into a matrix: {}", e))
        })?;

        Self::new(features)
    }

    /// Parse a headerless delimited table. Blank lines are skipped; any
    /// other malformed row fails the whole load so row indices stay aligned
    /// with the input.
    pub fn parse(text: &str, delimiter: char) -> Result<Self> {
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for (line_idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let row = line
                .split(delimiter)
                .enumerate()
                .map(|(col, field)| {
                    let field = field.trim();
                    field
                        .parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .ok_or_else(|| Error::Parse {
                            line: line_idx + 1,
                            column: col + 1,
                            value: field.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    return Err(Error::RaggedRow {
                        line: line_idx + 1,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        Self::from_rows(&rows)
    }

    pub fn load_csv<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::parse(&text, delimiter)?;
        log::info!(
            "Loaded {} samples with {} features from {}",
            dataset.n_samples(),
            dataset.n_features(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn features(&self) -> &Matrix {
        &self.features
    }

    pub fn into_features(self) -> Matrix {
        self.features
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}

/// Generate isotropic Gaussian blobs, `n_per_center` samples around each
/// row of `centers`. Returns the samples and the index of the blob each
/// one was drawn from. The same `seed` always yields the same data.
pub fn make_blobs(
    centers: &Matrix,
    n_per_center: usize,
    cluster_std: f64,
    seed: u64,
) -> Result<(Matrix, Array1<usize>)> {
    if centers.nrows() == 0 || centers.ncols() == 0 {
        return Err(Error::EmptyInput(
            "at least one center with one feature is required".to_string(),
        ));
    }
    if n_per_center == 0 {
        return Err(Error::invalid("n_per_center", "must be >= 1, got 0"));
    }
    let normal = Normal::new(0.0, cluster_std).map_err(|e| {
        Error::invalid("cluster_std", format!("{} (got {})", e, cluster_std))
    })?;

    let mut rng = StdRng::seed_from_u64(seed);
    let n_samples = centers.nrows() * n_per_center;
    let mut x = Array2::random_using((n_samples, centers.ncols()), normal, &mut rng);
    let mut blob = Array1::zeros(n_samples);

    for (i, mut row) in x.rows_mut().into_iter().enumerate() {
        let center = i / n_per_center;
        row += &centers.row(center);
        blob[i] = center;
    }

    Ok((x, blob))
}

use crate::error::{Error, Result};
use crate::{Matrix, Vector};
use ndarray::Axis;

/// Standardize features to zero mean and unit variance.
///
/// Uses the population standard deviation. Features with zero variance are
/// only centered.
#[derive(Clone, Debug, Default)]
pub struct StandardScaler {
    mean: Option<Vector>,
    scale: Option<Vector>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            mean: None,
            scale: None,
        }
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<()> {
        let mean = data
            .mean_axis(Axis(0))
            .ok_or_else(|| Error::EmptyInput("cannot standardize an empty matrix".to_string()))?;
        let std = data.std_axis(Axis(0), 0.0);

        let constant = std.iter().filter(|&&s| s == 0.0).count();
        if constant > 0 {
            log::warn!("{} feature(s) have zero variance and will only be centered", constant);
        }

        self.mean = Some(mean);
        self.scale = Some(std.mapv(|s| if s == 0.0 { 1.0 } else { s }));
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        let (mean, scale) = self.fitted()?;
        self.check_width(data, mean)?;

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(Axis(0)) {
            row -= mean;
            row /= scale;
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix> {
        self.fit(data)?;
        self.transform(data)
    }

    pub fn inverse_transform(&self, data: &Matrix) -> Result<Matrix> {
        let (mean, scale) = self.fitted()?;
        self.check_width(data, mean)?;

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(Axis(0)) {
            row *= scale;
            row += mean;
        }

        Ok(result)
    }

    pub fn mean(&self) -> Option<&Vector> {
        self.mean.as_ref()
    }

    pub fn scale(&self) -> Option<&Vector> {
        self.scale.as_ref()
    }

    fn fitted(&self) -> Result<(&Vector, &Vector)> {
        match (&self.mean, &self.scale) {
            (Some(mean), Some(scale)) => Ok((mean, scale)),
            _ => Err(Error::invalid("scaler", "not fitted, call fit() first")),
        }
    }

    fn check_width(&self, data: &Matrix, mean: &Vector) -> Result<()> {
        if data.ncols() != mean.len() {
            return Err(Error::InconsistentDimension {
                row: 0,
                expected: mean.len(),
                found: data.ncols(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_scaler() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert_eq!(scaled.shape(), data.shape());

        let mean = scaled.mean_axis(Axis(0)).unwrap();
        let std = scaled.std_axis(Axis(0), 0.0);
        for j in 0..2 {
            assert!(mean[j].abs() < 1e-12);
            assert!((std[j] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_fitted_mean_and_scale() {
        let data = array![[1.0, 7.0], [3.0, 7.0], [5.0, 7.0]];
        let mut scaler = StandardScaler::new();
        assert!(scaler.mean().is_none());

        scaler.fit(&data).unwrap();
        let mean = scaler.mean().unwrap();
        let scale = scaler.scale().unwrap();
        assert!((mean[0] - 3.0).abs() < 1e-12);
        assert!((mean[1] - 7.0).abs() < 1e-12);
        assert!((scale[0] - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
        // zero variance is left unscaled
        assert_eq!(scale[1], 1.0);
    }

    #[test]
    fn test_constant_feature_is_centered() {
        let data = array![[1.0, 7.0], [2.0, 7.0], [3.0, 7.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert!(scaled.column(1).iter().all(|&v| v == 0.0));
        assert!(scaled.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_inverse_transform() {
        let data = array![[60.0, 4.1], [1514.0, 7.9], [98.0, 5.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        let restored = scaler.inverse_transform(&scaled).unwrap();
        for (a, b) in restored.iter().zip(data.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_transform_without_fit() {
        let scaler = StandardScaler::new();
        assert!(scaler.transform(&array![[1.0]]).is_err());
    }

    #[test]
    fn test_transform_width_mismatch() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&array![[1.0, 2.0], [3.0, 4.0]]).unwrap();

        let err = scaler.transform(&array![[1.0, 2.0, 3.0]]).unwrap_err();
        assert!(matches!(err, Error::InconsistentDimension { expected: 2, found: 3, .. }));
    }
}

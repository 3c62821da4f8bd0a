use ndarray::{Array1, Array2};
use ndarray_stats::{Quantile1dExt, errors::QuantileError, interpolate::Linear};
use noisy_float::types::n64;

use crate::error::{Result, ShadowError};

/// Percentile of the intensity distribution taken as the background level.
pub const BACKGROUND_PERCENTILE: f64 = 90.0;

/// Returns the 90th percentile of every value in `intensity`, linearly
/// interpolated between the two nearest ranks.
pub fn estimate_background(intensity: &Array2<i32>) -> Result<f64> {
    percentile(intensity, BACKGROUND_PERCENTILE)
}

pub(crate) fn percentile(intensity: &Array2<i32>, p: f64) -> Result<f64> {
    if intensity.is_empty() {
        return Err(ShadowError::EmptyImage);
    }

    let mut values = intensity
        .iter()
        .map(|&v| n64(v as f64))
        .collect::<Array1<_>>();

    let value = values
        .quantile_mut(n64(p / 100.0), &Linear)
        .map_err(|e| match e {
            QuantileError::EmptyInput => ShadowError::EmptyImage,
            QuantileError::InvalidQuantile(q) => {
                ShadowError::InvalidParameter(format!("quantile {} outside [0, 1]", q))
            }
        })?;

    Ok(value.raw())
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn test_constant_grid() {
        let grid = Array2::from_elem((4, 5), 137);
        assert_eq!(estimate_background(&grid).unwrap(), 137.0);
    }

    #[test]
    fn test_single_pixel() {
        let grid = array![[42]];
        assert_eq!(estimate_background(&grid).unwrap(), 42.0);
    }

    #[test]
    fn test_linear_interpolation() {
        // rank 0.9 * 9 = 8.1 between 80 and 90
        let grid = array![[0, 10, 20, 30, 40], [50, 60, 70, 80, 90]];
        let background = estimate_background(&grid).unwrap();
        assert!((background - 81.0).abs() < 1e-9);
    }

    #[test]
    fn test_order_independent() {
        let a = array![[90, 0, 50], [20, 70, 10]];
        let b = array![[0, 10, 20], [50, 70, 90]];
        assert_eq!(
            estimate_background(&a).unwrap(),
            estimate_background(&b).unwrap()
        );
    }

    #[test]
    fn test_within_range() {
        let grid = array![[3, 250, 17], [99, 0, 128], [64, 200, 5]];
        let background = estimate_background(&grid).unwrap();
        assert!(background >= 0.0 && background <= 250.0);
    }

    #[test]
    fn test_empty_grid() {
        let grid = Array2::<i32>::zeros((0, 3));
        assert!(matches!(
            estimate_background(&grid),
            Err(ShadowError::EmptyImage)
        ));
    }

    #[test]
    fn test_invalid_percentile() {
        let grid = array![[1, 2]];
        assert!(matches!(
            percentile(&grid, 150.0),
            Err(ShadowError::InvalidParameter(_))
        ));
    }
}

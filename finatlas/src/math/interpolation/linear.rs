use std::cmp::Ordering;

use super::traits::Interpolate;
use crate::utils::errors::{AtlasError, Result};

/// # Linear Interpolator
/// Basic linear interpolator.
#[derive(Clone)]
pub struct LinearInterpolator {}

impl LinearInterpolator {
    /// `points` evenly spaced values running from `start` to `end` inclusive.
    ///
    /// ## Example
    /// ```
    /// use finatlas::prelude::*;
    /// let path = LinearInterpolator::path(0.10, 0.04, 5).unwrap();
    /// assert_eq!(path.len(), 5);
    /// assert_eq!(path[0], 0.10);
    /// assert!((path[4] - 0.04).abs() < 1e-15);
    /// ```
    pub fn path(start: f64, end: f64, points: usize) -> Result<Vec<f64>> {
        if points < 2 {
            return Err(AtlasError::InvalidValueErr(format!(
                "A path needs at least two points, got {}",
                points
            )));
        }
        let x_ = [0.0, (points - 1) as f64];
        let y_ = [start, end];
        (0..points)
            .map(|i| LinearInterpolator::interpolate(i as f64, &x_, &y_, false))
            .collect()
    }
}

impl Interpolate for LinearInterpolator {
    fn interpolate(x: f64, x_: &[f64], y_: &[f64], enable_extrapolation: bool) -> Result<f64> {
        if x_.len() < 2 || x_.len() != y_.len() {
            return Err(AtlasError::InvalidValueErr(
                "Interpolation needs at least two matching nodes".to_string(),
            ));
        }
        let index =
            match x_.binary_search_by(|&probe| probe.partial_cmp(&x).unwrap_or(Ordering::Equal)) {
                Ok(index) => index,
                Err(index) => index,
            };

        if !enable_extrapolation && (x < x_[0] || x > x_[x_.len() - 1]) {
            return Err(AtlasError::InvalidValueErr(format!(
                "Extrapolation is not enabled, and {} is outside the range",
                x
            )));
        }

        let value = match index {
            0 => y_[0] + (x - x_[0]) * (y_[1] - y_[0]) / (x_[1] - x_[0]),
            index if index == x_.len() => {
                y_[index - 1]
                    + (x - x_[index - 1]) * (y_[index - 1] - y_[index - 2])
                        / (x_[index - 1] - x_[index - 2])
            }
            _ => {
                y_[index - 1]
                    + (x - x_[index - 1]) * (y_[index] - y_[index - 1])
                        / (x_[index] - x_[index - 1])
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_interpolation() {
        let x_ = vec![0.0, 1.0];
        let y_ = vec![0.0, 1.0];
        let y = LinearInterpolator::interpolate(0.5, &x_, &y_, true).unwrap();
        assert_eq!(y, 0.5);
    }

    #[test]
    fn test_extrapolation_disabled() {
        let x_ = vec![0.0, 1.0];
        let y_ = vec![0.0, 1.0];
        assert!(LinearInterpolator::interpolate(1.5, &x_, &y_, false).is_err());
        let y = LinearInterpolator::interpolate(2.0, &x_, &y_, true).unwrap();
        assert_eq!(y, 2.0);
    }

    #[test]
    fn test_growth_path_matches_closed_form() {
        let (start, end) = (0.113, 0.042);
        let path = LinearInterpolator::path(start, end, 5).unwrap();
        for (i, g) in path.iter().enumerate() {
            assert_eq!(*g, start + (i as f64 * (end - start)) / 4.0);
        }
    }

    #[test]
    fn test_path_needs_two_points() {
        assert!(LinearInterpolator::path(0.1, 0.2, 1).is_err());
    }
}

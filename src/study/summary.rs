//! Log-log summary of a convergence study
//!
//! Each point maps to $(-\log_{10} h, -\log_{10} e_{max})$. On these axes a
//! method of order $p$ lies on a line of slope $p$, so [`LogLogSeries::slope`]
//! reads off the observed order of convergence.
//!
//! $\log_{10}$ is undefined for a zero error. What to do about it is an
//! explicit [`ZeroErrorPolicy`] rather than an implicit crash.

use crate::error::{Result, StudyError};
use crate::study::ConvergencePoint;

/// What to do with a max error for which log10 is undefined (≤ 0 or NaN)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ZeroErrorPolicy {
    /// Fail with [`StudyError::Domain`] naming the step
    #[default]
    Error,

    /// Leave the point out of the series
    Skip,

    /// Substitute the given floor (must be positive) for the error
    Clamp(f64),
}

impl ZeroErrorPolicy {
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            ZeroErrorPolicy::Clamp(floor) if !(floor.is_finite() && *floor > 0.0) => {
                Err(format!("Clamp floor must be positive and finite (got {floor})"))
            }
            _ => Ok(()),
        }
    }
}

/// Plot-ready log-log relationship between step size and max error
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogLogSeries {
    /// (-log10(step), -log10(max error)) in study order
    pub points: Vec<(f64, f64)>,

    /// Steps whose points were dropped under [`ZeroErrorPolicy::Skip`]
    pub skipped: Vec<f64>,

    /// Steps whose error was replaced under [`ZeroErrorPolicy::Clamp`]
    pub clamped: Vec<f64>,
}

impl LogLogSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Least-squares slope of the series (observed convergence order)
    ///
    /// `None` if fewer than two distinct x values are present.
    pub fn slope(&self) -> Option<f64> {
        let n = self.points.len() as f64;
        if self.points.len() < 2 {
            return None;
        }

        let mean_x = self.points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = self.points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxy, sxx) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
                let dx = x - mean_x;
                (sxy + dx * (y - mean_y), sxx + dx * dx)
            });

        if sxx <= f64::EPSILON {
            return None;
        }
        Some(sxy / sxx)
    }
}

/// Transform convergence points into the log-log series
///
/// # Errors
///
/// - [`StudyError::InvalidStepSize`] for a step ≤ 0 (cannot happen for points
///   produced by a study)
/// - [`StudyError::Domain`] for an error ≤ 0 under [`ZeroErrorPolicy::Error`]
///
/// # Example
///
/// ```rust
/// use spring_study::study::{summarize, ConvergencePoint, ZeroErrorPolicy};
///
/// let points = [ConvergencePoint::new(0.1, 1e-3), ConvergencePoint::new(0.01, 1e-5)];
/// let series = summarize(&points, ZeroErrorPolicy::Error).unwrap();
/// assert!((series.points[0].0 - 1.0).abs() < 1e-12);
/// assert!((series.points[0].1 - 3.0).abs() < 1e-12);
/// assert!((series.slope().unwrap() - 2.0).abs() < 1e-9);
/// ```
pub fn summarize(points: &[ConvergencePoint], policy: ZeroErrorPolicy) -> Result<LogLogSeries> {
    policy.validate().map_err(StudyError::InvalidConfig)?;

    let mut series = LogLogSeries::default();

    for point in points {
        if !(point.step_size.is_finite() && point.step_size > 0.0) {
            return Err(StudyError::InvalidStepSize(point.step_size));
        }

        let error = if point.max_abs_error > 0.0 {
            point.max_abs_error
        } else {
            match policy {
                ZeroErrorPolicy::Error => {
                    return Err(StudyError::Domain {
                        step: point.step_size,
                        error: point.max_abs_error,
                    });
                }
                ZeroErrorPolicy::Skip => {
                    log::warn!(
                        "skipping step {}: max error {} has no logarithm",
                        point.step_size,
                        point.max_abs_error
                    );
                    series.skipped.push(point.step_size);
                    continue;
                }
                ZeroErrorPolicy::Clamp(floor) => {
                    log::warn!(
                        "clamping max error {} at step {} to {}",
                        point.max_abs_error,
                        point.step_size,
                        floor
                    );
                    series.clamped.push(point.step_size);
                    floor
                }
            }
        };

        series
            .points
            .push((-point.step_size.log10(), -error.log10()));
    }

    Ok(series)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn with_zero() -> Vec<ConvergencePoint> {
        vec![
            ConvergencePoint::new(0.1, 1e-2),
            ConvergencePoint::new(0.01, 0.0),
            ConvergencePoint::new(0.001, 1e-6),
        ]
    }

    #[test]
    fn test_negated_log10_pairs() {
        let points = [ConvergencePoint::new(0.1, 0.0001)];
        let series = summarize(&points, ZeroErrorPolicy::Error).unwrap();
        assert_relative_eq!(series.points[0].0, 1.0, epsilon = 1e-12);
        assert_relative_eq!(series.points[0].1, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_preserves_order() {
        let points = [
            ConvergencePoint::new(0.01, 1e-3),
            ConvergencePoint::new(0.1, 1e-1),
        ];
        let series = summarize(&points, ZeroErrorPolicy::Error).unwrap();
        assert_relative_eq!(series.points[0].0, 2.0, epsilon = 1e-12);
        assert_relative_eq!(series.points[1].0, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_error_fails_by_default() {
        let err = summarize(&with_zero(), ZeroErrorPolicy::default()).unwrap_err();
        match err {
            StudyError::Domain { step, error } => {
                assert_eq!(step, 0.01);
                assert_eq!(error, 0.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_zero_error_skipped() {
        let series = summarize(&with_zero(), ZeroErrorPolicy::Skip).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.skipped, vec![0.01]);
        assert!(series.clamped.is_empty());
    }

    #[test]
    fn test_zero_error_clamped() {
        let series = summarize(&with_zero(), ZeroErrorPolicy::Clamp(1e-12)).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.clamped, vec![0.01]);
        assert_relative_eq!(series.points[1].1, 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_error_treated_like_zero() {
        let points = [ConvergencePoint::new(0.1, -1.0)];
        assert!(matches!(
            summarize(&points, ZeroErrorPolicy::Error),
            Err(StudyError::Domain { .. })
        ));
    }

    #[test]
    fn test_invalid_clamp_floor() {
        assert!(matches!(
            summarize(&with_zero(), ZeroErrorPolicy::Clamp(0.0)),
            Err(StudyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_slope_of_second_order_errors() {
        let points: Vec<_> = (1..=5)
            .map(|i| {
                let h = 0.1f64.powi(i);
                ConvergencePoint::new(h, 3.0 * h * h)
            })
            .collect();
        let series = summarize(&points, ZeroErrorPolicy::Error).unwrap();
        assert_relative_eq!(series.slope().unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_slope_needs_two_points() {
        let series = summarize(&[ConvergencePoint::new(0.1, 0.1)], ZeroErrorPolicy::Error).unwrap();
        assert_eq!(series.slope(), None);

        let same_step = [ConvergencePoint::new(0.1, 0.1), ConvergencePoint::new(0.1, 0.2)];
        let series = summarize(&same_step, ZeroErrorPolicy::Error).unwrap();
        assert_eq!(series.slope(), None);
    }
}

//! Per-step run data

use nalgebra::DVector;

use crate::error::{Result, StudyError};
use crate::physics::SpringConstants;
use crate::solver::Sample;

/// Samples produced for one step size, with the derived columns
///
/// All columns have the same length, one entry per sample:
///
/// - `analytic[i] = A·sin(ω·time[i])`
/// - `error[i] = |integrator[i] - reference[i]|`
///
/// The error column deliberately compares the integrator against the
/// solver's own reference column, not against the analytic curve. The
/// analytic curve is kept for visual comparison only.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub step_size: f64,
    pub time: DVector<f64>,
    pub integrator: DVector<f64>,
    pub reference: DVector<f64>,
    pub analytic: DVector<f64>,
    pub error: DVector<f64>,
}

impl Run {
    /// Build a run from parsed samples
    ///
    /// # Errors
    ///
    /// [`StudyError::EmptyOutput`] when `samples` is empty (no maximum exists).
    pub fn from_samples(
        step_size: f64,
        samples: &[Sample],
        spring: &SpringConstants,
    ) -> Result<Self> {
        if samples.is_empty() {
            return Err(StudyError::EmptyOutput(step_size));
        }

        let time = DVector::from_iterator(samples.len(), samples.iter().map(|s| s.time));
        let integrator =
            DVector::from_iterator(samples.len(), samples.iter().map(|s| s.integrator));
        let reference =
            DVector::from_iterator(samples.len(), samples.iter().map(|s| s.reference));

        let analytic = spring.analytic_curve(&time);
        let error = (&integrator - &reference).abs();

        Ok(Self {
            step_size,
            time,
            integrator,
            reference,
            analytic,
            error,
        })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Largest elementwise error, the run's scalar summary
    pub fn max_abs_error(&self) -> f64 {
        self.error.max()
    }

    /// Convergence point summarising this run
    pub fn point(&self) -> ConvergencePoint {
        ConvergencePoint {
            step_size: self.step_size,
            max_abs_error: self.max_abs_error(),
        }
    }

    /// Rows back as samples, in time order
    pub fn samples(&self) -> Vec<Sample> {
        (0..self.len())
            .map(|i| Sample::new(self.time[i], self.integrator[i], self.reference[i]))
            .collect()
    }
}

/// (step size, max absolute error) for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergencePoint {
    pub step_size: f64,
    pub max_abs_error: f64,
}

impl ConvergencePoint {
    pub fn new(step_size: f64, max_abs_error: f64) -> Self {
        Self {
            step_size,
            max_abs_error,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

//! In-process velocity-Verlet spring solver
//!
//! Produces exactly the table the spring-system executable writes: one
//! period of motion starting at the equilibrium position, each row holding
//! the time, the Verlet position and the closed-form position.
//!
//! # Algorithm
//!
//! ```text
//! x(t+h) = x(t) + v(t)·h + ½·a(t)·h²
//! a(t+h) = -(k/m)·x(t+h)
//! v(t+h) = v(t) + ½·(a(t) + a(t+h))·h
//! ```
//!
//! Second-order accurate: halving the step divides the error by about 4.

use std::path::Path;

use crate::error::{Result, StudyError};
use crate::physics::SpringConstants;
use crate::solver::output_file::write_samples;
use crate::solver::{Sample, Solver};

/// Largest number of steps per period accepted by [`VerletSolver`]
pub const MAX_STEPS: usize = 50_000_000;

/// Velocity-Verlet integrator of the spring system
///
/// # Example
///
/// ```rust
/// use spring_study::solver::{Solver, VerletSolver};
///
/// let samples = VerletSolver::default().integrate(0.1).unwrap();
/// assert_eq!(samples.len(), 63); // floor(2π / 0.1) + 1
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VerletSolver {
    spring: SpringConstants,
}

impl VerletSolver {
    pub fn new(spring: SpringConstants) -> Self {
        Self { spring }
    }

    pub fn spring(&self) -> &SpringConstants {
        &self.spring
    }

    /// Number of steps covering one period: ⌊2π / (ω·h)⌋
    ///
    /// Fails with [`StudyError::InvalidStepSize`] when the step is not
    /// positive or needs more than [`MAX_STEPS`] steps.
    pub fn steps_per_period(&self, step_size: f64) -> Result<usize> {
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(StudyError::InvalidStepSize(step_size));
        }
        let steps = (self.spring.period() / step_size).floor();
        if !(steps <= MAX_STEPS as f64) {
            return Err(StudyError::InvalidStepSize(step_size));
        }
        Ok(steps as usize)
    }

    /// Integrate one period and write the table in the solver output format
    pub fn write_output(&self, step_size: f64, path: impl AsRef<Path>) -> Result<usize> {
        let samples = self.integrate(step_size)?;
        write_samples(path, &samples)?;
        Ok(samples.len())
    }
}

impl Solver for VerletSolver {
    fn integrate(&self, step_size: f64) -> Result<Vec<Sample>> {
        self.spring.validate().map_err(StudyError::InvalidConfig)?;

        let n = self.steps_per_period(step_size)?;
        let mut samples = Vec::with_capacity(n + 1);

        let mut position = 0.0;
        let mut velocity = self.spring.initial_velocity;
        let mut acceleration = self.spring.acceleration(position);

        for i in 0..=n {
            let time = i as f64 * step_size;
            samples.push(Sample::new(time, position, self.spring.displacement(time)));

            position += velocity * step_size + 0.5 * acceleration * step_size * step_size;
            let previous = acceleration;
            acceleration = self.spring.acceleration(position);
            velocity += 0.5 * (previous + acceleration) * step_size;
        }

        Ok(samples)
    }

    fn name(&self) -> &str {
        "Velocity Verlet"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::output_file::read_samples;
    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;

    fn max_error(samples: &[Sample]) -> f64 {
        samples.iter().map(Sample::abs_error).fold(0.0, f64::max)
    }

    #[test]
    fn test_row_count_covers_one_period() {
        let solver = VerletSolver::default();
        assert_eq!(solver.steps_per_period(0.1).unwrap(), 62);
        assert_eq!(solver.integrate(0.1).unwrap().len(), 63);
        assert_eq!(solver.integrate(0.01).unwrap().len(), 629);
    }

    #[test]
    fn test_first_row_is_initial_condition() {
        let samples = VerletSolver::default().integrate(0.05).unwrap();
        assert_eq!(samples[0], Sample::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_times_are_evenly_spaced() {
        let samples = VerletSolver::default().integrate(0.25).unwrap();
        for (i, sample) in samples.iter().enumerate() {
            assert_relative_eq!(sample.time, i as f64 * 0.25);
        }
    }

    #[test]
    fn test_reference_column_is_closed_form() {
        let spring = SpringConstants::new(4.0, 1.0, 2.0);
        let samples = VerletSolver::new(spring).integrate(0.01).unwrap();
        for sample in &samples {
            assert_eq!(sample.reference, spring.displacement(sample.time));
        }
    }

    #[test]
    fn test_error_is_second_order() {
        let solver = VerletSolver::default();
        let coarse = max_error(&solver.integrate(0.02).unwrap());
        let fine = max_error(&solver.integrate(0.01).unwrap());
        let ratio = coarse / fine;
        assert!(ratio > 3.5 && ratio < 4.5, "ratio {ratio} not second order");
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let solver = VerletSolver::default();
        assert!(matches!(solver.integrate(0.0), Err(StudyError::InvalidStepSize(_))));
        assert!(matches!(solver.integrate(-0.1), Err(StudyError::InvalidStepSize(_))));
        assert!(matches!(solver.integrate(f64::NAN), Err(StudyError::InvalidStepSize(_))));
    }

    #[test]
    fn test_rejects_step_too_small_for_one_period() {
        let solver = VerletSolver::default();
        for step in [1e-300, 1e-10, f64::MIN_POSITIVE] {
            assert!(matches!(
                solver.integrate(step),
                Err(StudyError::InvalidStepSize(s)) if s == step
            ));
        }
        assert!(solver.steps_per_period(1e-300).is_err());
        assert!(solver.steps_per_period(0.0001).is_ok());
    }

    #[test]
    fn test_write_output_reads_back() {
        let tmp = NamedTempFile::new().unwrap();
        let solver = VerletSolver::default();
        let rows = solver.write_output(0.1, tmp.path()).unwrap();

        let samples = read_samples(tmp.path()).unwrap();
        assert_eq!(samples.len(), rows);
        // Written with 9 decimals
        let direct = solver.integrate(0.1).unwrap();
        assert_relative_eq!(samples[10].integrator, direct[10].integrator, epsilon = 1e-9);
    }
}

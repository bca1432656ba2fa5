//! Solver capability and sample type
//!
//! # Design Philosophy
//!
//! The convergence study never cares *how* a table of samples was produced.
//! Anything that can turn a step size into `(time, integrator, reference)`
//! rows implements [`Solver`]:
//!
//! - [`ExternalSolver`](crate::solver::ExternalSolver) launches an executable
//!   and reads the file it writes
//! - [`VerletSolver`](crate::solver::VerletSolver) integrates the spring
//!   in-process
//! - test code provides stubs returning canned rows
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: one method plus a name, will not grow required methods
//! - `Sample`: plain data, fields won't be removed

use crate::error::Result;

/// One row of solver output
///
/// Rows are ordered by ascending time; times are expected to be evenly spaced
/// but this is not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Sample time (s)
    pub time: f64,

    /// Displacement produced by the solver's integration method
    pub integrator: f64,

    /// Displacement the solver reports as ground truth
    pub reference: f64,
}

impl Sample {
    pub fn new(time: f64, integrator: f64, reference: f64) -> Self {
        Self {
            time,
            integrator,
            reference,
        }
    }

    /// |integrator - reference|
    pub fn abs_error(&self) -> f64 {
        (self.integrator - self.reference).abs()
    }
}

impl From<(f64, f64, f64)> for Sample {
    fn from((time, integrator, reference): (f64, f64, f64)) -> Self {
        Self::new(time, integrator, reference)
    }
}

/// Produces a sample table for a given step size
///
/// # Implementing this trait
///
/// ```rust
/// use spring_study::solver::{Sample, Solver};
///
/// struct Constant;
///
/// impl Solver for Constant {
///     fn integrate(&self, step_size: f64) -> spring_study::Result<Vec<Sample>> {
///         Ok(vec![Sample::new(0.0, 0.0, 0.0), Sample::new(step_size, 1.0, 1.0)])
///     }
///
///     fn name(&self) -> &str { "Constant" }
/// }
/// ```
pub trait Solver {
    /// Run the solver with the given step and return its samples
    ///
    /// # Errors
    ///
    /// Implementations report launch and exit failures as
    /// [`StudyError::ExternalProcess`](crate::StudyError::ExternalProcess) and
    /// malformed output as [`StudyError::Parse`](crate::StudyError::Parse).
    fn integrate(&self, step_size: f64) -> Result<Vec<Sample>>;

    /// Human-readable solver name (used in logs and CSV metadata)
    fn name(&self) -> &str;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn integrate(&self, step_size: f64) -> Result<Vec<Sample>> {
        (**self).integrate(step_size)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

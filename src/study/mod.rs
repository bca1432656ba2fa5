//! Error-vs-step-size convergence study
//!
//! For each step size the study asks a [`Solver`] for its sample table,
//! builds a [`Run`] (analytic curve + elementwise error) and keeps the run's
//! maximum absolute error. The collected [`ConvergencePoint`]s are then
//! turned into a log-log [`LogLogSeries`] whose slope is the observed order
//! of the solver's integration method.
//!
//! # Workflow
//!
//! ```text
//! step size ─► Solver::integrate ─► samples ─► Run ─► max |integrator - reference|
//!                                                              │
//!          [ConvergencePoint, ...] ◄───────────────────────────┘
//!                    │
//!                    ▼
//!        summarize ─► (-log10 h, -log10 e) ─► plot
//! ```
//!
//! Runs are strictly sequential: an external solver writes every table to
//! the same file, so two runs in flight would race on it.
//!
//! # Example
//!
//! ```rust
//! use spring_study::solver::VerletSolver;
//! use spring_study::study::{ConvergenceStudy, ZeroErrorPolicy};
//!
//! let study = ConvergenceStudy::new(Box::new(VerletSolver::default()));
//! let points = study.run_study(&[0.1, 0.05]).unwrap();
//! let series = study.summarize(&points, ZeroErrorPolicy::Error).unwrap();
//! assert_eq!(series.len(), 2);
//! ```

mod config;
mod run;
mod summary;

pub use config::{
    default_step_sizes, StudyConfig, CONVERGENCE_CSV, DISPLACEMENT_PLOT, ERROR_VS_STEP_PLOT,
    RUN_CSV, RUN_ERROR_PLOT,
};
pub use run::{ConvergencePoint, Run};
pub use summary::{summarize, LogLogSeries, ZeroErrorPolicy};

use std::path::Path;

use crate::error::{Result, StudyError};
use crate::physics::SpringConstants;
use crate::solver::output_file::read_samples;
use crate::solver::Solver;

/// Outcome of a complete study
#[derive(Debug, Clone)]
pub struct StudyReport {
    /// One point per step, in study order
    pub points: Vec<ConvergencePoint>,

    /// Log-log summary of `points`
    pub series: LogLogSeries,

    /// Detailed run at the configured figure step
    pub figure_run: Option<Run>,
}

impl StudyReport {
    /// Maximum absolute error of the figure run, if one was made
    pub fn figure_max_error(&self) -> Option<f64> {
        self.figure_run.as_ref().map(Run::max_abs_error)
    }
}

/// Convergence study over one solver with fixed spring constants
pub struct ConvergenceStudy {
    solver: Box<dyn Solver>,
    spring: SpringConstants,
}

impl ConvergenceStudy {
    /// Study with the default constants k = m = v₀ = 1
    pub fn new(solver: Box<dyn Solver>) -> Self {
        Self::with_spring(solver, SpringConstants::default())
    }

    pub fn with_spring(solver: Box<dyn Solver>, spring: SpringConstants) -> Self {
        Self { solver, spring }
    }

    pub fn spring(&self) -> &SpringConstants {
        &self.spring
    }

    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// Run the solver once and build the run for `step_size`
    ///
    /// # Errors
    ///
    /// - [`StudyError::InvalidStepSize`] if `step_size` is not positive
    /// - [`StudyError::ExternalProcess`] if the solver fails to run
    /// - [`StudyError::AtStep`] wrapping a parse or I/O failure
    /// - [`StudyError::EmptyOutput`] if the solver produced no rows
    pub fn run_one(&self, step_size: f64) -> Result<Run> {
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(StudyError::InvalidStepSize(step_size));
        }

        let samples = self
            .solver
            .integrate(step_size)
            .map_err(|e| e.at_step(step_size))?;

        let run = Run::from_samples(step_size, &samples, &self.spring)?;
        log::debug!(
            "{}: step {} gave {} samples, max error {:e}",
            self.solver.name(),
            step_size,
            run.len(),
            run.max_abs_error()
        );
        Ok(run)
    }

    /// Build the run for `step_size` from an existing output file
    ///
    /// The solver is not invoked; parsing the same file twice yields the same run.
    pub fn run_from_file(&self, step_size: f64, path: impl AsRef<Path>) -> Result<Run> {
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(StudyError::InvalidStepSize(step_size));
        }
        let samples = read_samples(path).map_err(|e| e.at_step(step_size))?;
        Run::from_samples(step_size, &samples, &self.spring)
    }

    /// Run every step in order and collect one point per step
    ///
    /// Stops at the first failing step.
    pub fn run_study(&self, step_sizes: &[f64]) -> Result<Vec<ConvergencePoint>> {
        let mut points = Vec::with_capacity(step_sizes.len());

        for &step_size in step_sizes {
            let point = self.run_one(step_size)?.point();
            log::info!(
                "log(Step): {:.3}, log(Max error): {:.3}",
                point.step_size.log10(),
                point.max_abs_error.log10()
            );
            points.push(point);
        }

        Ok(points)
    }

    /// Log-log summary of `points`
    pub fn summarize(
        &self,
        points: &[ConvergencePoint],
        policy: ZeroErrorPolicy,
    ) -> Result<LogLogSeries> {
        summarize(points, policy)
    }

    /// Run the full pipeline described by `config`
    ///
    /// The study's own spring constants are used; `config.spring` must match.
    pub fn execute(&self, config: &StudyConfig) -> Result<StudyReport> {
        config.validate().map_err(StudyError::InvalidConfig)?;
        if config.spring != self.spring {
            return Err(StudyError::InvalidConfig(
                "configuration spring constants differ from the study's".to_string(),
            ));
        }

        let points = self.run_study(&config.step_sizes)?;
        let series = self.summarize(&points, config.zero_error)?;
        if let Some(order) = series.slope() {
            log::info!("observed order of convergence: {order:.3}");
        }

        let figure_run = config
            .figure_step
            .map(|step| self.run_one(step))
            .transpose()?;

        Ok(StudyReport {
            points,
            series,
            figure_run,
        })
    }
}

impl std::fmt::Debug for ConvergenceStudy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvergenceStudy")
            .field("solver", &self.solver_name())
            .field("spring", &self.spring)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

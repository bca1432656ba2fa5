//! spring-study: convergence study of spring-system integrators
//!
//! Measures how the error of a numerical integrator scales with its step
//! size. A solver (an external executable or the in-process velocity Verlet
//! integrator) is run once per step size; each run's maximum deviation from
//! the reference column becomes one point of a log-log error-vs-step series,
//! whose slope is the observed order of the method.
//!
//! # Architecture
//!
//! 1. **Separation of physics, solvers and study**
//!    - [`physics`]: the spring constants and the closed-form solution
//!    - [`solver`]: anything producing `(time, integrator, reference)` rows
//!    - [`study`]: the step loop, per-run errors and the log-log summary
//!
//! 2. **Outputs on the side**
//!    - [`output`]: PNG/SVG plots and CSV tables
//!    - [`trace`]: companion tool for `x,y` movement traces
//!
//! # Quick Start
//!
//! ```rust
//! use spring_study::prelude::*;
//!
//! # fn main() -> spring_study::Result<()> {
//! let study = ConvergenceStudy::new(Box::new(VerletSolver::default()));
//!
//! let points = study.run_study(&[0.1, 0.05, 0.025])?;
//! let series = study.summarize(&points, ZeroErrorPolicy::Error)?;
//!
//! let order = series.slope().unwrap();
//! assert!((order - 2.0).abs() < 0.2);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`error`]: [`StudyError`] and the crate [`Result`]
//! - [`physics`]: Spring model
//! - [`solver`]: Solvers and the output file format
//! - [`study`]: Convergence study
//! - [`output`]: Plots and CSV export
//! - [`trace`]: Trace loading and pen animation

pub mod error;
pub mod physics;
pub mod solver;
pub mod study;

pub mod output;
pub mod trace;

pub use error::{Result, StudyError};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use spring_study::prelude::*;
    //! ```
    pub use crate::error::{Result, StudyError};
    pub use crate::physics::SpringConstants;
    pub use crate::solver::{ExternalSolver, Sample, Solver, VerletSolver};
    pub use crate::study::{
        ConvergencePoint, ConvergenceStudy, LogLogSeries, Run, StudyConfig, StudyReport,
        ZeroErrorPolicy,
    };
    pub use crate::trace::{load_trace, AnimationConfig, StopToken, Trace, TraceAnimator};
}

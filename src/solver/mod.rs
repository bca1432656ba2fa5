//! Solvers producing sample tables
//!
//! A solver turns a step size into an ordered table of
//! `(time, integrator, reference)` rows. The study never cares how: the
//! [`Solver`] trait is the only thing it depends on.
//!
//! # Module Organization
//!
//! - **`traits`**: [`Solver`] trait and the [`Sample`] row
//! - **`output_file`**: Text format shared with external solvers
//!   (`parse_samples`, `read_samples`, `write_samples`)
//! - **Solver implementations**:
//!   - [`ExternalSolver`]: launches an executable and reads its output file
//!   - [`VerletSolver`]: velocity Verlet in process
//!
//! # Quick Start Example
//!
//! ```rust
//! use spring_study::solver::{Solver, VerletSolver};
//!
//! let solver = VerletSolver::default();
//! let samples = solver.integrate(0.1).unwrap();
//!
//! assert_eq!(samples.len(), 63);
//! assert_eq!(samples[0].time, 0.0);
//! ```
//!
//! With the external executable:
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use spring_study::solver::{ExternalSolver, Solver};
//!
//! let solver = ExternalSolver::new("./spring_system").timeout(Duration::from_secs(60));
//! let samples = solver.integrate(0.01).unwrap();
//! ```

pub mod output_file;

mod external;
mod traits;
mod verlet;

pub use external::{ExternalSolver, DEFAULT_OUTPUT_PATH, DEFAULT_PROGRAM};
pub use output_file::{parse_samples, read_samples, write_samples};
pub use traits::{Sample, Solver};
pub use verlet::{VerletSolver, MAX_STEPS};

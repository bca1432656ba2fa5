//! Common utilities for integration tests

// Each test binary uses its own subset
#![allow(dead_code, unused_imports)]

pub mod stub_solvers;
pub mod test_helpers;

// Re-export commonly used items
pub use stub_solvers::{FailingSolver, FixedTableSolver, QuadraticErrorSolver, ZeroErrorSolver};
pub use test_helpers::{assert_decreasing, write_trace_csv};
#[cfg(unix)]
pub use test_helpers::shell_solver;

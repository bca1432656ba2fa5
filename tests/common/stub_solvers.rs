//! Deterministic solvers standing in for the external executable

use std::collections::HashMap;

use spring_study::solver::{Sample, Solver};
use spring_study::{Result, StudyError};

/// Returns a fixed table per step size (keyed by the step's bit pattern)
///
/// Steps without a table get a single zero row.
pub struct FixedTableSolver {
    tables: HashMap<u64, Vec<Sample>>,
}

impl FixedTableSolver {
    pub fn new() -> Self {
        Self { tables: HashMap::new() }
    }

    pub fn with_table(mut self, step_size: f64, rows: &[(f64, f64, f64)]) -> Self {
        self.tables
            .insert(step_size.to_bits(), rows.iter().copied().map(Sample::from).collect());
        self
    }
}

impl Solver for FixedTableSolver {
    fn integrate(&self, step_size: f64) -> Result<Vec<Sample>> {
        Ok(self
            .tables
            .get(&step_size.to_bits())
            .cloned()
            .unwrap_or_else(|| vec![Sample::new(0.0, 0.0, 0.0)]))
    }

    fn name(&self) -> &str {
        "FixedTable"
    }
}

/// Error grows as `c·h²` at every sample: an ideal second-order method
pub struct QuadraticErrorSolver {
    pub coefficient: f64,
}

impl Solver for QuadraticErrorSolver {
    fn integrate(&self, step_size: f64) -> Result<Vec<Sample>> {
        let n = (1.0 / step_size).round() as usize;
        Ok((0..=n)
            .map(|i| {
                let t = i as f64 * step_size;
                let reference = t.sin();
                let error = self.coefficient * step_size * step_size * t;
                Sample::new(t, reference + error, reference)
            })
            .collect())
    }

    fn name(&self) -> &str {
        "QuadraticError"
    }
}

/// Integrator always equals reference
pub struct ZeroErrorSolver;

impl Solver for ZeroErrorSolver {
    fn integrate(&self, step_size: f64) -> Result<Vec<Sample>> {
        Ok(vec![
            Sample::new(0.0, 0.0, 0.0),
            Sample::new(step_size, 0.5, 0.5),
        ])
    }

    fn name(&self) -> &str {
        "ZeroError"
    }
}

/// Fails like a crashed executable for one chosen step
pub struct FailingSolver {
    pub failing_step: f64,
}

impl Solver for FailingSolver {
    fn integrate(&self, step_size: f64) -> Result<Vec<Sample>> {
        if step_size == self.failing_step {
            return Err(StudyError::ExternalProcess {
                program: "failing".to_string(),
                step: step_size,
                reason: "exited with exit status: 1".to_string(),
            });
        }
        ZeroErrorSolver.integrate(step_size)
    }

    fn name(&self) -> &str {
        "Failing"
    }
}

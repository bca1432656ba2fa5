//! Study configuration
//!
//! Everything the convergence pipeline needs besides the solver itself:
//! which steps to run, the spring constants, how to treat a zero error and
//! where the artifacts go.

use std::path::PathBuf;

use crate::physics::SpringConstants;
use crate::study::ZeroErrorPolicy;

/// File name of the log-log error plot
pub const ERROR_VS_STEP_PLOT: &str = "spring_system_error_vs_step.png";

/// File name of the displacement comparison plot
pub const DISPLACEMENT_PLOT: &str = "spring_system_calc.png";

/// File name of the error-over-time plot
pub const RUN_ERROR_PLOT: &str = "spring_system_error.png";

/// File name of the convergence table
pub const CONVERGENCE_CSV: &str = "spring_system_convergence.csv";

/// File name of the detailed run table
pub const RUN_CSV: &str = "spring_system_run.csv";

/// Step sizes 0.1, 0.01, ..., 0.00001 (i.e. 0.1^i for i = 1..=5)
pub fn default_step_sizes() -> Vec<f64> {
    (1..=5).map(|i| 0.1f64.powi(i)).collect()
}

/// Configuration of one convergence study
///
/// # Example
///
/// ```rust
/// use spring_study::study::{StudyConfig, ZeroErrorPolicy};
///
/// let config = StudyConfig::default()
///     .steps(vec![0.1, 0.05, 0.025])
///     .zero_error(ZeroErrorPolicy::Skip)
///     .output_dir("target/study");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct StudyConfig {
    /// Step sizes, run in this order (default: 0.1^i, i = 1..=5)
    pub step_sizes: Vec<f64>,

    /// Spring constants shared by every run (default: k = m = v₀ = 1)
    pub spring: SpringConstants,

    /// Treatment of zero max errors in the log-log summary (default: Error)
    pub zero_error: ZeroErrorPolicy,

    /// Step of the detailed displacement/error figure (default: 0.01)
    pub figure_step: Option<f64>,

    /// Directory receiving plots and tables (default: ".")
    pub output_dir: PathBuf,

    /// Also write CSV tables next to the plots (default: false)
    pub export_csv: bool,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            step_sizes: default_step_sizes(),
            spring: SpringConstants::default(),
            zero_error: ZeroErrorPolicy::default(),
            figure_step: Some(0.01),
            output_dir: PathBuf::from("."),
            export_csv: false,
        }
    }
}

impl StudyConfig {
    /// Builder pattern: set step sizes
    pub fn steps(mut self, step_sizes: Vec<f64>) -> Self {
        self.step_sizes = step_sizes;
        self
    }

    /// Builder pattern: set spring constants
    pub fn spring(mut self, spring: SpringConstants) -> Self {
        self.spring = spring;
        self
    }

    /// Builder pattern: set zero-error policy
    pub fn zero_error(mut self, policy: ZeroErrorPolicy) -> Self {
        self.zero_error = policy;
        self
    }

    /// Builder pattern: set (or disable) the detailed figure step
    pub fn figure_step(mut self, step: Option<f64>) -> Self {
        self.figure_step = step;
        self
    }

    /// Builder pattern: set artifact directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder pattern: enable CSV tables
    pub fn with_csv(mut self) -> Self {
        self.export_csv = true;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.step_sizes.is_empty() {
            return Err("At least one step size is required".to_string());
        }
        for &step in &self.step_sizes {
            if !(step.is_finite() && step > 0.0) {
                return Err(format!("Step size must be positive (got {step})"));
            }
        }
        if let Some(step) = self.figure_step
            && !(step.is_finite() && step > 0.0)
        {
            return Err(format!("Figure step must be positive (got {step})"));
        }
        self.spring.validate()?;
        self.zero_error.validate()
    }

    pub fn artifact(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    pub fn error_vs_step_plot(&self) -> PathBuf {
        self.artifact(ERROR_VS_STEP_PLOT)
    }

    pub fn displacement_plot(&self) -> PathBuf {
        self.artifact(DISPLACEMENT_PLOT)
    }

    pub fn run_error_plot(&self) -> PathBuf {
        self.artifact(RUN_ERROR_PLOT)
    }

    pub fn convergence_csv(&self) -> PathBuf {
        self.artifact(CONVERGENCE_CSV)
    }

    pub fn run_csv(&self) -> PathBuf {
        self.artifact(RUN_CSV)
    }
}

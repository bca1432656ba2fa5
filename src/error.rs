//! Error taxonomy for the convergence study and the trace companion
//!
//! Every failure the library can report is a [`StudyError`]. Variants that
//! originate while processing a particular step size either carry that step
//! directly (`ExternalProcess`, `Domain`, ...) or are wrapped in
//! [`StudyError::AtStep`] by the study, so a caller can always tell which step
//! triggered the failure via [`StudyError::step`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the study pipeline
#[derive(Debug, Error)]
pub enum StudyError {
    /// The solver executable could not be launched, exited non-zero or timed out
    #[error("solver `{program}` failed for step {step}: {reason}")]
    ExternalProcess {
        program: String,
        step: f64,
        reason: String,
    },

    /// A row of solver output (or a trace cell) is malformed
    #[error("malformed row at line {line}: {reason} (`{content}`)")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },

    /// `log10` is undefined for the max error of this step
    #[error("cannot take log10 of max error {error} at step {step}")]
    Domain { step: f64, error: f64 },

    /// Not positive and finite, or too small to integrate in memory
    #[error("invalid step size {0}: must be positive, finite and not too small")]
    InvalidStepSize(f64),

    #[error("solver produced no samples for step {0}")]
    EmptyOutput(f64),

    /// Wraps an error that carries no step size of its own
    #[error("step {step}: {source}")]
    AtStep {
        step: f64,
        #[source]
        source: Box<StudyError>,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("trace file has no `{0}` column")]
    MissingColumn(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, StudyError>;

impl StudyError {
    /// Attach a step size, unless the error already names one
    pub fn at_step(self, step: f64) -> Self {
        match self {
            StudyError::ExternalProcess { .. }
            | StudyError::Domain { .. }
            | StudyError::InvalidStepSize(_)
            | StudyError::EmptyOutput(_)
            | StudyError::AtStep { .. } => self,
            other => StudyError::AtStep {
                step,
                source: Box::new(other),
            },
        }
    }

    /// Step size that triggered this error, if any
    pub fn step(&self) -> Option<f64> {
        match self {
            StudyError::ExternalProcess { step, .. }
            | StudyError::Domain { step, .. }
            | StudyError::AtStep { step, .. } => Some(*step),
            StudyError::InvalidStepSize(step) | StudyError::EmptyOutput(step) => Some(*step),
            _ => None,
        }
    }

    /// Innermost error, looking through `AtStep` wrappers
    pub fn root_cause(&self) -> &StudyError {
        match self {
            StudyError::AtStep { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StudyError::Io {
            path: path.into(),
            source,
        }
    }
}

//! External solver process
//!
//! Launches a solver executable once per step size and reads the table it
//! leaves behind. The executable receives the step as its last argument,
//! formatted with `f64`'s `Display` (`0.1`, `0.0010000000000000002`, ...),
//! and must write the output file before exiting with status 0. Any file left
//! by a previous run is removed before the launch.
//!
//! The output file is shared by every invocation, so calls must never overlap;
//! [`ConvergenceStudy`](crate::study::ConvergenceStudy) runs them sequentially.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Result, StudyError};
use crate::solver::output_file::read_samples;
use crate::solver::{Sample, Solver};

/// Default executable name (the `spring_system` binary of this crate)
pub const DEFAULT_PROGRAM: &str = "spring_system";

/// Default path of the table written by the solver
pub const DEFAULT_OUTPUT_PATH: &str = "output.txt";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Solver backed by an external executable
///
/// # Example
///
/// ```rust,ignore
/// use spring_study::solver::{ExternalSolver, Solver};
/// use std::time::Duration;
///
/// let solver = ExternalSolver::new("./SpringSystem")
///     .output_path("output.txt")
///     .timeout(Duration::from_secs(60));
///
/// let samples = solver.integrate(0.01)?;
/// ```
#[derive(Debug, Clone)]
pub struct ExternalSolver {
    program: String,
    leading_args: Vec<String>,
    output_path: PathBuf,
    timeout: Option<Duration>,
}

impl Default for ExternalSolver {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ExternalSolver {
    /// Solver that runs `program <step>` and reads `output.txt`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            timeout: None,
        }
    }

    /// Builder pattern: add an argument placed before the step
    ///
    /// Useful when the solver is a script, e.g. `python solver.py <step>`.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    /// Builder pattern: add several arguments placed before the step
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Builder pattern: set the file the solver writes
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Builder pattern: kill the solver if it runs longer than `timeout`
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_output_path(&self) -> &Path {
        &self.output_path
    }

    /// Delete the output file left by a previous run, if any
    fn clear_output(&self) -> Result<()> {
        match std::fs::remove_file(&self.output_path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(StudyError::io(&self.output_path, e)),
            _ => Ok(()),
        }
    }

    /// Launch the solver for `step_size` and wait for it to exit successfully
    ///
    /// The output file is not touched here.
    pub fn launch(&self, step_size: f64) -> Result<()> {
        let step_arg = step_size.to_string();
        log::debug!(
            "launching {} {:?} {} (output: {})",
            self.program,
            self.leading_args,
            step_arg,
            self.output_path.display()
        );

        let mut child = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(&step_arg)
            .spawn()
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::NotFound => "executable not found".to_string(),
                    _ => format!("could not be launched: {e}"),
                };
                self.failure(step_size, reason)
            })?;

        let status = match self.timeout {
            Some(timeout) => self.wait_with_timeout(&mut child, timeout, step_size)?,
            None => child
                .wait()
                .map_err(|e| self.failure(step_size, format!("wait failed: {e}")))?,
        };

        if !status.success() {
            return Err(self.failure(step_size, format!("exited with {status}")));
        }

        Ok(())
    }

    fn wait_with_timeout(
        &self,
        child: &mut Child,
        timeout: Duration,
        step_size: f64,
    ) -> Result<ExitStatus> {
        let started = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if started.elapsed() >= timeout => {
                    // The child may exit between try_wait and kill; both results are fine
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.failure(step_size, format!("timed out after {timeout:?}")));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(self.failure(step_size, format!("wait failed: {e}"))),
            }
        }
    }

    fn failure(&self, step: f64, reason: String) -> StudyError {
        StudyError::ExternalProcess {
            program: self.program.clone(),
            step,
            reason,
        }
    }
}

impl Solver for ExternalSolver {
    fn integrate(&self, step_size: f64) -> Result<Vec<Sample>> {
        self.clear_output()?;
        self.launch(step_size)?;
        read_samples(&self.output_path)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

// =================================================================================================
// Tests
// =================================================================================================

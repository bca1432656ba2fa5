//! Error-vs-step-size study of a spring-system solver
//!
//! ```text
//! convergence [--solver PROGRAM] [--arg ARG]... [--output FILE]
//!             [--steps H1,H2,...] [--figure-step H|none] [--out-dir DIR]
//!             [--timeout SECONDS] [--zero-error error|skip|clamp=FLOOR]
//!             [--in-process] [--csv]
//! ```
//!
//! Without `--in-process`, every step launches `PROGRAM [ARG...] <step>` and
//! reads the table it writes to `--output` (default `output.txt`).

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use spring_study::output::write_artifacts;
use spring_study::solver::{ExternalSolver, Solver, VerletSolver, DEFAULT_PROGRAM};
use spring_study::study::{ConvergenceStudy, StudyConfig, ZeroErrorPolicy};
use spring_study::StudyError;

const USAGE: &str = "usage: convergence [--solver PROGRAM] [--arg ARG]... [--output FILE] \
[--steps H1,H2,...] [--figure-step H|none] [--out-dir DIR] [--timeout SECONDS] \
[--zero-error error|skip|clamp=FLOOR] [--in-process] [--csv]";

struct Options {
    program: String,
    leading_args: Vec<String>,
    output: Option<PathBuf>,
    timeout: Option<Duration>,
    in_process: bool,
    config: StudyConfig,
}

fn parse_f64(flag: &str, value: &str) -> Result<f64, Box<dyn Error>> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("{flag}: invalid number `{value}`: {e}").into())
}

fn parse_zero_error(value: &str) -> Result<ZeroErrorPolicy, Box<dyn Error>> {
    match value {
        "error" => Ok(ZeroErrorPolicy::Error),
        "skip" => Ok(ZeroErrorPolicy::Skip),
        _ => match value.strip_prefix("clamp=") {
            Some(floor) => Ok(ZeroErrorPolicy::Clamp(parse_f64("--zero-error", floor)?)),
            None => Err(format!("--zero-error: expected error, skip or clamp=FLOOR, got `{value}`").into()),
        },
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, Box<dyn Error>> {
    let mut options = Options {
        program: DEFAULT_PROGRAM.to_string(),
        leading_args: Vec::new(),
        output: None,
        timeout: None,
        in_process: false,
        config: StudyConfig::default(),
    };

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("{flag} expects a value\n{USAGE}"))
        };

        match flag.as_str() {
            "--solver" => options.program = value()?,
            "--arg" => options.leading_args.push(value()?),
            "--output" => options.output = Some(PathBuf::from(value()?)),
            "--steps" => {
                let steps = value()?
                    .split(',')
                    .map(|s| parse_f64("--steps", s))
                    .collect::<Result<Vec<_>, _>>()?;
                options.config = options.config.steps(steps);
            }
            "--figure-step" => {
                let raw = value()?;
                let step = match raw.as_str() {
                    "none" => None,
                    _ => Some(parse_f64("--figure-step", &raw)?),
                };
                options.config = options.config.figure_step(step);
            }
            "--out-dir" => options.config = options.config.output_dir(value()?),
            "--timeout" => {
                let seconds = parse_f64("--timeout", &value()?)?;
                options.timeout = Some(Duration::try_from_secs_f64(seconds)?);
            }
            "--zero-error" => options.config = options.config.zero_error(parse_zero_error(&value()?)?),
            "--in-process" => options.in_process = true,
            "--csv" => options.config = options.config.with_csv(),
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument `{other}`\n{USAGE}").into()),
        }
    }

    Ok(options)
}

fn build_solver(options: &Options) -> Box<dyn Solver> {
    if options.in_process {
        return Box::new(VerletSolver::new(options.config.spring));
    }

    let mut solver = ExternalSolver::new(options.program.clone()).args(options.leading_args.clone());
    if let Some(output) = &options.output {
        solver = solver.output_path(output.clone());
    }
    if let Some(timeout) = options.timeout {
        solver = solver.timeout(timeout);
    }
    Box::new(solver)
}

fn run() -> Result<(), Box<dyn Error>> {
    let options = parse_args(std::env::args().skip(1))?;
    let solver = build_solver(&options);
    let study = ConvergenceStudy::with_spring(solver, options.config.spring);

    log::info!(
        "running {} over {} step sizes",
        study.solver_name(),
        options.config.step_sizes.len()
    );

    let report = study.execute(&options.config)?;
    write_artifacts(&report, &options.config, study.solver_name())?;

    if let Some(max_error) = report.figure_max_error() {
        log::info!("Max error: {max_error:.6}");
    }

    match report.series.slope() {
        Some(order) => println!("Observed order of convergence: {order:.3}"),
        None => println!("Observed order of convergence: undefined (fewer than two points)"),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = run() {
        match error.downcast_ref::<StudyError>().and_then(StudyError::step) {
            Some(step) => log::error!("study failed at step {step}: {error}"),
            None => log::error!("study failed: {error}"),
        }
        return Err(error);
    }
    Ok(())
}

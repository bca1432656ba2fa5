//! Spring-system solver executable
//!
//! ```text
//! spring_system [STEP]
//! ```
//!
//! Integrates one period of the unit spring (k = m = v₀ = 1) with velocity
//! Verlet and writes `time integrator reference` rows to `output.txt`.
//! STEP defaults to 0.0001.

use std::error::Error;
use std::time::Instant;

use spring_study::solver::{VerletSolver, DEFAULT_OUTPUT_PATH};

const DEFAULT_STEP: f64 = 0.0001;

fn run() -> Result<(), Box<dyn Error>> {
    let step = match std::env::args().nth(1) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid step `{raw}`: {e}"))?,
        None => DEFAULT_STEP,
    };

    let solver = VerletSolver::default();
    let spring = solver.spring();
    log::info!(
        "spring constant k = {}, mass m = {}, initial velocity v0 = {}",
        spring.stiffness,
        spring.mass,
        spring.initial_velocity
    );
    log::info!("vibration equation: {}", spring.equation());
    log::info!("step size: {step}");

    let started = Instant::now();
    let rows = solver.write_output(step, DEFAULT_OUTPUT_PATH)?;
    log::info!(
        "wrote {rows} rows to {DEFAULT_OUTPUT_PATH} in {} ms",
        started.elapsed().as_millis()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run().inspect_err(|error| log::error!("spring_system failed: {error}"))
}

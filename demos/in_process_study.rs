//! Example: In-process convergence study of velocity Verlet
//!
//! Runs the study without any external executable, compares two spring
//! stiffnesses and writes plots and tables to the system temp directory.
//!
//! ```bash
//! cargo run --example in_process_study
//! ```

use spring_study::output::{plot_displacement, write_artifacts, PlotConfig};
use spring_study::physics::SpringConstants;
use spring_study::solver::VerletSolver;
use spring_study::study::{ConvergenceStudy, StudyConfig};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("═══════════════════════════════════════════════════════");
    println!("  Spring System - Velocity Verlet Convergence");
    println!("═══════════════════════════════════════════════════════\n");

    let out_dir = std::env::temp_dir().join("spring_study_demo");

    for stiffness in [1.0, 4.0] {
        let spring = SpringConstants::new(stiffness, 1.0, 1.0);
        println!("k = {}  (ω = {:.3}, period = {:.3} s)", stiffness, spring.omega(), spring.period());

        let config = StudyConfig::default()
            .spring(spring)
            .steps(vec![0.1, 0.05, 0.01, 0.005, 0.001])
            .output_dir(out_dir.join(format!("k{}", stiffness)))
            .with_csv();

        let study = ConvergenceStudy::with_spring(Box::new(VerletSolver::new(spring)), spring);

        let start = Instant::now();
        let report = study.execute(&config)?;
        let elapsed = start.elapsed();

        println!("  {:>10}  {:>14}", "step", "max error");
        for point in &report.points {
            println!("  {:>10}  {:>14.6e}", point.step_size, point.max_abs_error);
        }
        if let Some(order) = report.series.slope() {
            println!("  Observed order : {:.3}", order);
        }
        println!("  Study time     : {:.2?}", elapsed);

        for path in write_artifacts(&report, &config, study.solver_name())? {
            println!("  Wrote {}", path.display());
        }

        if let Some(run) = &report.figure_run {
            let svg = config.artifact("spring_system_calc.svg");
            let plot = PlotConfig::displacement(format!("Velocity Verlet, k = {}", stiffness));
            plot_displacement(run, &svg, Some(&plot))?;
            println!("  Wrote {}", svg.display());
        }
        println!();
    }

    Ok(())
}

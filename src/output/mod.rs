//! Output module for study results
//!
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV tables for external analysis
//!
//! ```text
//! output/
//! ├── mod.rs              ← write_artifacts
//! ├── visualization/      ← Plots
//! │   ├── config.rs
//! │   ├── convergence.rs
//! │   ├── run.rs
//! │   └── trace.rs
//! └── export/             ← Tables
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use spring_study::output::write_artifacts;
//!
//! let report = study.execute(&config)?;
//! for path in write_artifacts(&report, &config, study.solver_name())? {
//!     println!("wrote {}", path.display());
//! }
//! ```

pub mod export;
pub mod visualization;

pub use export::{export_convergence_csv, export_run_csv, CsvConfig, CsvMetadata};
pub use visualization::{
    plot_displacement, plot_error_vs_step, plot_run_error, plot_trace, PlotConfig,
};

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use crate::study::{StudyConfig, StudyReport};

/// Write every artifact of a finished study into `config.output_dir`
///
/// Always writes the error-vs-step plot. When the report carries a figure
/// run, also writes its displacement and error plots. With
/// `config.export_csv`, the convergence table (and the run table, if any)
/// are written too.
///
/// Returns the written paths in the order above.
pub fn write_artifacts(
    report: &StudyReport,
    config: &StudyConfig,
    solver_name: &str,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    fs::create_dir_all(&config.output_dir)?;
    let mut written = Vec::new();

    let path = config.error_vs_step_plot();
    plot_error_vs_step(&report.series, &path, None)?;
    written.push(path);

    if let Some(run) = &report.figure_run {
        let path = config.displacement_plot();
        plot_displacement(run, &path, None)?;
        written.push(path);

        let path = config.run_error_plot();
        plot_run_error(run, &path, None)?;
        written.push(path);
    }

    if config.export_csv {
        let metadata = CsvMetadata::from_study(solver_name, &config.spring);

        let csv_config = CsvConfig::default().with_metadata(metadata.clone());
        let path = config.convergence_csv();
        export_convergence_csv(&report.points, &path, Some(&csv_config))?;
        written.push(path);

        if let Some(run) = &report.figure_run {
            let csv_config = CsvConfig::default().with_metadata(metadata.step_size(run.step_size));
            let path = config.run_csv();
            export_run_csv(run, &path, Some(&csv_config))?;
            written.push(path);
        }
    }

    for path in &written {
        log::info!("wrote {}", path.display());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::VerletSolver;
    use crate::study::ConvergenceStudy;

    #[test]
    fn test_write_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = StudyConfig::default()
            .steps(vec![0.1, 0.05])
            .figure_step(Some(0.1))
            .output_dir(dir.path().join("artifacts"))
            .with_csv();

        let study = ConvergenceStudy::new(Box::new(VerletSolver::default()));
        let report = study.execute(&config).unwrap();
        let written = write_artifacts(&report, &config, study.solver_name()).unwrap();

        assert_eq!(
            written,
            vec![
                config.error_vs_step_plot(),
                config.displacement_plot(),
                config.run_error_plot(),
                config.convergence_csv(),
                config.run_csv(),
            ]
        );
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_write_artifacts_without_figure_or_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = StudyConfig::default()
            .steps(vec![0.1, 0.05])
            .figure_step(None)
            .output_dir(dir.path());

        let study = ConvergenceStudy::new(Box::new(VerletSolver::default()));
        let report = study.execute(&config).unwrap();
        let written = write_artifacts(&report, &config, study.solver_name()).unwrap();

        assert_eq!(written, vec![config.error_vs_step_plot()]);
    }
}

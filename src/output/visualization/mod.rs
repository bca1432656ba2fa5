//! Visualization module for study results
//!
//! This module renders results with the `plotters` library. The output
//! format follows the file extension: `.svg` selects the SVG backend,
//! anything else the bitmap backend.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **convergence**: Log-log error against step size
//! - **run**: Displacement and error of one run against time
//! - **trace**: Static x/y movement trace
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use spring_study::output::visualization::{plot_error_vs_step, plot_displacement};
//!
//! let report = study.execute(&config)?;
//! plot_error_vs_step(&report.series, "spring_system_error_vs_step.png", None)?;
//! plot_displacement(report.figure_run.as_ref().unwrap(), "spring_system_calc.png", None)?;
//! ```
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Error scaling with step | `convergence` | `plot_error_vs_step` |
//! | Analytic / reference / integrator curves | `run` | `plot_displacement` |
//! | Error over time | `run` | `plot_run_error` |
//! | Movement trace from CSV | `trace` | `plot_trace` |

pub mod config;
pub mod convergence;
pub mod run;
pub mod trace;

pub use config::{PlotConfig, NO_TITLE};

pub use convergence::plot_error_vs_step;
pub use run::{plot_displacement, plot_run_error};
pub use trace::plot_trace;

use std::ops::Range;
use std::path::Path;

/// True when `path` has an `.svg` extension
pub(crate) fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("svg")
}

/// Axis range covering `values` with 5% padding on each side
///
/// A degenerate (constant) range is widened to ±1 around the value so that
/// plotters always gets a non-empty interval.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < 1e-12 {
        return (min - 1.0)..(max + 1.0);
    }

    let pad = 0.05 * (max - min);
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_svg() {
        assert!(is_svg(Path::new("plot.svg")));
        assert!(!is_svg(Path::new("plot.png")));
        assert!(!is_svg(Path::new("plot")));
    }

    #[test]
    fn test_padded_range() {
        let range = padded_range([0.0, 10.0, 5.0]);
        assert!((range.start + 0.5).abs() < 1e-12);
        assert!((range.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_padded_range_constant_and_empty() {
        assert_eq!(padded_range([2.0, 2.0]), 1.0..3.0);
        assert_eq!(padded_range(Vec::<f64>::new()), 0.0..1.0);
        assert_eq!(padded_range([f64::NAN]), 0.0..1.0);
    }
}

//! Plots of a single run against time
//!
//! - [`plot_displacement`]: analytic curve (dashed), reference and
//!   integrator columns on one chart
//! - [`plot_run_error`]: elementwise `|integrator - reference|`

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::config::{PlotConfig, NO_TITLE};
use super::{is_svg, padded_range};
use crate::study::Run;

/// Plot analytic, reference and integrator displacement of one run
///
/// Series colors come from `config.series_colors` in the order
/// analytic, reference, integrator.
///
/// # Example
///
/// ```rust,ignore
/// let run = study.run_one(0.01)?;
/// plot_displacement(&run, "spring_system_calc.png", None)?;
/// ```
pub fn plot_displacement(
    run: &Run,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if run.is_empty() {
        return Err("Run has no samples to plot".into());
    }

    let default_config = PlotConfig::displacement(NO_TITLE);
    let config = config.unwrap_or(&default_config);
    let path = output_path.as_ref();

    if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        plot_displacement_impl(backend, run, config)
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        plot_displacement_impl(backend, run, config)
    }
}

fn plot_displacement_impl<DB: DrawingBackend>(
    backend: DB,
    run: &Run,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let x_range = padded_range(run.time.iter().copied());
    let y_range = padded_range(
        run.analytic
            .iter()
            .chain(run.reference.iter())
            .chain(run.integrator.iter())
            .copied(),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel).y_desc(&config.ylabel);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let column = |values: &nalgebra::DVector<f64>| -> Vec<(f64, f64)> {
        run.time.iter().copied().zip(values.iter().copied()).collect()
    };

    let analytic_color = config.get_series_color(0);
    chart
        .draw_series(DashedLineSeries::new(
            column(&run.analytic),
            10,
            6,
            ShapeStyle::from(&analytic_color).stroke_width(config.line_width),
        ))?
        .label("Analytic")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], analytic_color));

    let solid = [
        ("Reference", &run.reference, config.get_series_color(1)),
        ("Integrator", &run.integrator, config.get_series_color(2)),
    ];
    for (label, values, color) in solid {
        chart
            .draw_series(LineSeries::new(
                column(values),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Plot `|integrator - reference|` of one run against time
pub fn plot_run_error(
    run: &Run,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if run.is_empty() {
        return Err("Run has no samples to plot".into());
    }

    let default_config = PlotConfig::run_error(NO_TITLE);
    let config = config.unwrap_or(&default_config);
    let path = output_path.as_ref();

    if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        plot_run_error_impl(backend, run, config)
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        plot_run_error_impl(backend, run, config)
    }
}

fn plot_run_error_impl<DB: DrawingBackend>(
    backend: DB,
    run: &Run,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let x_range = padded_range(run.time.iter().copied());
    // Errors are non-negative; anchor the axis at zero
    let y_max = run.max_abs_error();
    let y_range = if y_max > 0.0 { 0.0..y_max * 1.1 } else { 0.0..1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;

    let y_fmt = |y: &f64| format!("{:.1e}", y);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .y_label_formatter(&y_fmt);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let color = config.line_color;
    chart
        .draw_series(LineSeries::new(
            run.time.iter().copied().zip(run.error.iter().copied()),
            ShapeStyle::from(&color).stroke_width(config.line_width),
        ))?
        .label("Error")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::SpringConstants;
    use crate::solver::{Solver, VerletSolver};

    fn verlet_run() -> Run {
        let samples = VerletSolver::default().integrate(0.05).unwrap();
        Run::from_samples(0.05, &samples, &SpringConstants::default()).unwrap()
    }

    #[test]
    fn test_plot_displacement_png() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        plot_displacement(&verlet_run(), &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_displacement_svg_has_legend() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("svg");
        plot_displacement(&verlet_run(), &path, None).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Analytic"));
        assert!(svg.contains("Integrator"));
    }

    #[test]
    fn test_plot_run_error_png() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        plot_run_error(&verlet_run(), &path, Some(&PlotConfig::run_error("Verlet"))).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_run_error_zero_error() {
        use crate::solver::Sample;
        let samples = vec![Sample::new(0.0, 0.0, 0.0), Sample::new(0.1, 0.1, 0.1)];
        let run = Run::from_samples(0.1, &samples, &SpringConstants::default()).unwrap();

        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        plot_run_error(&run, &path, None).unwrap();
        assert!(path.exists());
    }
}

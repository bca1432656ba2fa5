//! Error-vs-step-size plot
//!
//! Draws the log-log series of a study: $-\log_{10} h$ on the x axis,
//! $-\log_{10} e_{max}$ on the y axis. Both grow to the right/top as the
//! step shrinks, and a method of order $p$ appears as a line of slope $p$.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::config::{PlotConfig, NO_TITLE};
use super::{is_svg, padded_range};
use crate::study::LogLogSeries;

/// Plot the log-log error series
///
/// # Arguments
///
/// * `series` - Output of [`summarize`](crate::study::summarize)
/// * `output_path` - Output file path (`.png` → bitmap, `.svg` → vector)
/// * `config` - Optional plot configuration; `None` uses
///   [`PlotConfig::convergence`]
///
/// # Errors
///
/// Returns `Err` if the series is empty or the backend cannot write to
/// `output_path`.
///
/// # Example
///
/// ```rust,ignore
/// let series = summarize(&points, ZeroErrorPolicy::Error)?;
/// plot_error_vs_step(&series, "spring_system_error_vs_step.png", None)?;
/// ```
pub fn plot_error_vs_step(
    series: &LogLogSeries,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if series.is_empty() {
        return Err("No convergence points to plot".into());
    }

    let default_config = PlotConfig::convergence(NO_TITLE);
    let config = config.unwrap_or(&default_config);
    let path = output_path.as_ref();

    if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        plot_error_vs_step_impl(backend, series, config)
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        plot_error_vs_step_impl(backend, series, config)
    }
}

fn plot_error_vs_step_impl<DB: DrawingBackend>(
    backend: DB,
    series: &LogLogSeries,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let x_range = padded_range(series.points.iter().map(|(x, _)| *x));
    let y_range = padded_range(series.points.iter().map(|(_, y)| *y));

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    let label_fmt = |v: &f64| format!("{:.1}", v);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&label_fmt)
        .y_label_formatter(&label_fmt);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let color = config.line_color;
    let label = match series.slope() {
        Some(order) => format!("Error (slope {:.2})", order),
        None => "Error".to_string(),
    };

    chart
        .draw_series(LineSeries::new(
            series.points.iter().copied(),
            ShapeStyle::from(&color).stroke_width(config.line_width),
        ))?
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

    chart.draw_series(
        series
            .points
            .iter()
            .map(|&point| Circle::new(point, 4, color.filled())),
    )?;

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

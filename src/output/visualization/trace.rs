//! Static plot of a movement trace

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::config::{PlotConfig, NO_TITLE};
use super::{is_svg, padded_range};
use crate::trace::Trace;

/// Plot the trace as a single red line through its (x, y) points
///
/// # Example
///
/// ```rust,ignore
/// let trace = load_trace("./result1.csv")?;
/// plot_trace(&trace, "movement.png", None)?;
/// ```
pub fn plot_trace(
    trace: &Trace,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if trace.is_empty() {
        return Err("Trace has no points to plot".into());
    }

    let default_config = PlotConfig::trace(NO_TITLE);
    let config = config.unwrap_or(&default_config);
    let path = output_path.as_ref();

    if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        plot_trace_impl(backend, trace, config)
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        plot_trace_impl(backend, trace, config)
    }
}

fn plot_trace_impl<DB: DrawingBackend>(
    backend: DB,
    trace: &Trace,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let x_range = padded_range(trace.points.iter().map(|(x, _)| *x));
    let y_range = padded_range(trace.points.iter().map(|(_, y)| *y));

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

    let color = config.line_color;
    chart
        .draw_series(LineSeries::new(
            trace.points.iter().copied(),
            ShapeStyle::from(&color).stroke_width(config.line_width),
        ))?
        .label("Movement")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spiral() -> Trace {
        Trace::new(
            (0..50)
                .map(|i| {
                    let t = f64::from(i) * 0.2;
                    (t * t.cos() * 1e-3, t * t.sin() * 1e-3)
                })
                .collect(),
        )
    }

    #[test]
    fn test_plot_trace_png() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        plot_trace(&spiral(), &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_trace_svg_label() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("svg");
        plot_trace(&spiral(), &path, None).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Movement"));
    }

    #[test]
    fn test_empty_trace_is_an_error() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        assert!(plot_trace(&Trace::default(), &path, None).is_err());
    }
}

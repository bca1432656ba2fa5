//! Animated GIF rendering of a trace
//!
//! [`GifSurface`] is a [`PenSurface`] backed by plotters' GIF bitmap backend.
//! Drawing happens on the bitmap buffer; a frame is emitted each time the
//! animator pauses, one frame per `frame_delay` of pause (at least one).

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use super::animation::{AnimationConfig, AnimationSummary, Pacing, PenSurface, StopToken, TraceAnimator};
use super::Trace;

/// Canvas size used by [`render_trace_gif`]
pub const GIF_SIZE: (u32, u32) = (1000, 800);

/// Shortest frame delay a GIF can express reliably
const MIN_FRAME_DELAY: Duration = Duration::from_millis(10);

type GifError = DrawingAreaErrorKind<<BitMapBackend<'static> as DrawingBackend>::ErrorType>;

/// Pen surface that records into an animated GIF
///
/// Surface coordinates are centred on the canvas with y pointing up.
pub struct GifSurface {
    area: DrawingArea<BitMapBackend<'static>, Shift>,
    size: (u32, u32),
    frame_delay: Duration,
    pen_is_down: bool,
    position: (f64, f64),
    color: RGBColor,
    stroke_width: u32,
    frames: usize,
}

impl GifSurface {
    /// Create the GIF file; frames are appended as the surface pauses
    pub fn new(
        path: impl AsRef<Path>,
        size: (u32, u32),
        frame_delay: Duration,
    ) -> Result<Self, Box<dyn Error>> {
        let frame_delay = frame_delay.max(MIN_FRAME_DELAY);
        let delay_ms = u32::try_from(frame_delay.as_millis())?;
        let backend = BitMapBackend::gif(path.as_ref(), size, delay_ms)?;

        let area = backend.into_drawing_area();
        area.fill(&WHITE)?;

        Ok(Self {
            area,
            size,
            frame_delay,
            pen_is_down: false,
            position: (0.0, 0.0),
            color: BLACK,
            stroke_width: 2,
            frames: 0,
        })
    }

    /// Builder pattern: set pen color
    pub fn color(mut self, color: RGBColor) -> Self {
        self.color = color;
        self
    }

    /// Frames written so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn to_pixel(&self, (x, y): (f64, f64)) -> (i32, i32) {
        let cx = f64::from(self.size.0) / 2.0;
        let cy = f64::from(self.size.1) / 2.0;
        ((cx + x).round() as i32, (cy - y).round() as i32)
    }
}

impl PenSurface for GifSurface {
    type Error = GifError;

    fn pen_up(&mut self) -> Result<(), GifError> {
        self.pen_is_down = false;
        Ok(())
    }

    fn pen_down(&mut self) -> Result<(), GifError> {
        self.pen_is_down = true;
        Ok(())
    }

    fn goto(&mut self, x: f64, y: f64) -> Result<(), GifError> {
        if self.pen_is_down {
            let from = self.to_pixel(self.position);
            let to = self.to_pixel((x, y));
            self.area.draw(&PathElement::new(
                vec![from, to],
                ShapeStyle::from(&self.color).stroke_width(self.stroke_width),
            ))?;
        }
        self.position = (x, y);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), GifError> {
        self.area.fill(&WHITE)
    }

    fn pause(&mut self, duration: Duration) -> Result<(), GifError> {
        let frames = (duration.as_secs_f64() / self.frame_delay.as_secs_f64()).round() as usize;
        for _ in 0..frames.max(1) {
            self.area.present()?;
            self.frames += 1;
        }
        Ok(())
    }
}

/// Render `loops` loops of the trace animation into an animated GIF
///
/// The configured point delay becomes the frame delay; pacing is forced to
/// [`Pacing::Surface`] so rendering does not sleep.
///
/// # Example
///
/// ```rust,ignore
/// let trace = load_trace("./result1.csv")?;
/// render_trace_gif(&trace, &AnimationConfig::default(), "movement.gif", 2)?;
/// ```
pub fn render_trace_gif(
    trace: &Trace,
    config: &AnimationConfig,
    output_path: impl AsRef<Path>,
    loops: usize,
) -> Result<AnimationSummary, Box<dyn Error>> {
    let config = config
        .clone()
        .loops(loops.max(1))
        .pacing(Pacing::Surface);
    config.validate()?;

    if trace.is_empty() {
        return Err("Trace has no points to animate".into());
    }

    let mut surface = GifSurface::new(output_path, GIF_SIZE, config.point_delay)?;
    let summary = TraceAnimator::new(config).run(trace, &mut surface, &StopToken::new())?;

    log::info!(
        "rendered {} loop(s) into {} GIF frame(s)",
        summary.loops_completed,
        surface.frames()
    );
    Ok(summary)
}

// =================================================================================================
// Tests
// =================================================================================================

//! Pen-plotter replay of a trace
//!
//! [`TraceAnimator`] walks a [`Trace`] and issues pen commands to any
//! [`PenSurface`]. Each loop:
//!
//! 1. pen up, go to the origin
//! 2. for each point: pen down, go to the mapped point, wait `point_delay`
//! 3. clear the surface
//! 4. wait `loop_pause` (skipped after the last of a bounded number of loops)
//!
//! Every wait checks a [`StopToken`], so another thread can end a run that
//! would otherwise loop forever.

use std::convert::Infallible;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use super::Trace;

/// How waits between pen moves are carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Block on the stop token for the delay
    #[default]
    RealTime,

    /// Hand the delay to [`PenSurface::pause`] (offline rendering)
    Surface,
}

/// Animation parameters
///
/// A trace point `(x, y)` is drawn at
/// `(x * scale + origin.0, y * scale + origin.1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Multiplier from trace units to surface units (default: 10000)
    pub scale: f64,

    /// Surface position of the trace origin (default: (-400, 0))
    pub origin: (f64, f64),

    /// Wait after each point (default: 100 ms)
    pub point_delay: Duration,

    /// Wait after clearing, between loops (default: 1 s)
    pub loop_pause: Duration,

    /// Number of loops, `None` for "until stopped" (default: None)
    pub max_loops: Option<usize>,

    pub pacing: Pacing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            scale: 10_000.0,
            origin: (-400.0, 0.0),
            point_delay: Duration::from_millis(100),
            loop_pause: Duration::from_secs(1),
            max_loops: None,
            pacing: Pacing::RealTime,
        }
    }
}

impl AnimationConfig {
    /// Builder pattern: set scale
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: set origin
    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    /// Builder pattern: set both delays
    pub fn delays(mut self, point_delay: Duration, loop_pause: Duration) -> Self {
        self.point_delay = point_delay;
        self.loop_pause = loop_pause;
        self
    }

    /// Builder pattern: bound the number of loops
    pub fn loops(mut self, loops: usize) -> Self {
        self.max_loops = Some(loops);
        self
    }

    /// Builder pattern: set pacing
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(format!("Scale must be finite and non-zero (got {})", self.scale));
        }
        if !(self.origin.0.is_finite() && self.origin.1.is_finite()) {
            return Err("Origin must be finite".to_string());
        }
        if self.max_loops == Some(0) {
            return Err("max_loops must be at least 1 when set".to_string());
        }
        Ok(())
    }

    /// Surface position of a trace point
    pub fn map_point(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x * self.scale + self.origin.0, y * self.scale + self.origin.1)
    }
}

// =================================================================================================
// Stop token
// =================================================================================================

/// Cloneable stop flag shared between an animation and its controller
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop and wake every waiter
    pub fn stop(&self) {
        let (flag, condvar) = &*self.inner;
        *flag.lock().unwrap_or_else(|e| e.into_inner()) = true;
        condvar.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        let (flag, _) = &*self.inner;
        *flag.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sleep for `duration` unless stopped first
    ///
    /// Returns `true` if the token is stopped (on entry or during the wait).
    pub fn wait(&self, duration: Duration) -> bool {
        let (flag, condvar) = &*self.inner;
        let guard = flag.lock().unwrap_or_else(|e| e.into_inner());
        let (guard, _) = condvar
            .wait_timeout_while(guard, duration, |stopped| !*stopped)
            .unwrap_or_else(|e| e.into_inner());
        *guard
    }
}

// =================================================================================================
// Pen surface
// =================================================================================================

/// Something a pen can draw on
///
/// Coordinates are surface units with y pointing up.
pub trait PenSurface {
    type Error: std::error::Error + 'static;

    fn pen_up(&mut self) -> Result<(), Self::Error>;

    fn pen_down(&mut self) -> Result<(), Self::Error>;

    /// Move the pen, drawing a segment if it is down
    fn goto(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    /// Erase everything drawn so far; the pen keeps its position
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Let `duration` elapse on the surface (only called with [`Pacing::Surface`])
    fn pause(&mut self, duration: Duration) -> Result<(), Self::Error>;
}

/// One command received by a [`RecordingSurface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenCommand {
    PenUp,
    PenDown,
    Goto(f64, f64),
    Clear,
    Pause(Duration),
}

/// Surface that only records the commands it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<PenCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PenSurface for RecordingSurface {
    type Error = Infallible;

    fn pen_up(&mut self) -> Result<(), Infallible> {
        self.commands.push(PenCommand::PenUp);
        Ok(())
    }

    fn pen_down(&mut self) -> Result<(), Infallible> {
        self.commands.push(PenCommand::PenDown);
        Ok(())
    }

    fn goto(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.commands.push(PenCommand::Goto(x, y));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        self.commands.push(PenCommand::Clear);
        Ok(())
    }

    fn pause(&mut self, duration: Duration) -> Result<(), Infallible> {
        self.commands.push(PenCommand::Pause(duration));
        Ok(())
    }
}

// =================================================================================================
// Animator
// =================================================================================================

/// What an animation run did before it returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationSummary {
    /// Loops that reached the clear step
    pub loops_completed: usize,

    /// Points drawn across all loops
    pub points_drawn: usize,

    /// Whether the run ended because the stop token fired
    pub stopped: bool,
}

/// Replays traces on a [`PenSurface`]
#[derive(Debug, Clone, Default)]
pub struct TraceAnimator {
    config: AnimationConfig,
}

impl TraceAnimator {
    pub fn new(config: AnimationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Animate `trace` until `max_loops` is reached or `stop` fires
    ///
    /// An empty trace returns at once with an empty summary.
    ///
    /// # Errors
    ///
    /// Propagates the first surface error.
    pub fn run<S: PenSurface>(
        &self,
        trace: &Trace,
        surface: &mut S,
        stop: &StopToken,
    ) -> Result<AnimationSummary, S::Error> {
        let mut summary = AnimationSummary::default();
        if trace.is_empty() {
            log::warn!("trace is empty, nothing to animate");
            return Ok(summary);
        }

        let (origin_x, origin_y) = self.config.origin;
        loop {
            if stop.is_stopped() {
                summary.stopped = true;
                break;
            }

            surface.pen_up()?;
            surface.goto(origin_x, origin_y)?;

            for &point in &trace.points {
                surface.pen_down()?;
                let (x, y) = self.config.map_point(point);
                surface.goto(x, y)?;
                summary.points_drawn += 1;

                if self.wait(surface, stop, self.config.point_delay)? {
                    summary.stopped = true;
                    return Ok(self.finish(summary));
                }
            }

            surface.clear()?;
            summary.loops_completed += 1;
            log::debug!("animation loop {} complete", summary.loops_completed);

            if self.config.max_loops == Some(summary.loops_completed) {
                break;
            }
            if self.wait(surface, stop, self.config.loop_pause)? {
                summary.stopped = true;
                break;
            }
        }

        Ok(self.finish(summary))
    }

    /// Returns `true` if the token is stopped after the wait
    fn wait<S: PenSurface>(
        &self,
        surface: &mut S,
        stop: &StopToken,
        duration: Duration,
    ) -> Result<bool, S::Error> {
        match self.config.pacing {
            Pacing::RealTime => Ok(stop.wait(duration)),
            Pacing::Surface => {
                surface.pause(duration)?;
                Ok(stop.is_stopped())
            }
        }
    }

    fn finish(&self, summary: AnimationSummary) -> AnimationSummary {
        if summary.stopped {
            log::info!(
                "animation stopped after {} loop(s), {} point(s)",
                summary.loops_completed,
                summary.points_drawn
            );
        }
        summary
    }
}

// =================================================================================================
// Tests
// =================================================================================================

//! Plot configuration shared across visualization modules
//!
//! This module defines the configuration used by the convergence, run and
//! trace plotting functions.

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `line_color`: Line color for single-series plots
/// - `series_colors`: Optional colors for multi-series plots (one per series)
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust,ignore
/// use spring_study::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::convergence("Verlet, k = 4");
/// config.line_color = RED;
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: auto-set by plot type)
    pub ylabel: String,

    /// Line color for single-series plots (default: RED)
    pub line_color: RGBColor,

    /// Optional colors for multi-series plots
    ///
    /// If None, uses the default palette of the plot type
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

/// Purple used for error curves
pub const ERROR_PURPLE: RGBColor = RGBColor(128, 0, 128);

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// # Example
///
/// ```rust,ignore
/// let config = PlotConfig::convergence(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    fn preset(
        title: impl IntoOptionalTitle,
        default_title: &str,
        xlabel: &str,
        ylabel: &str,
    ) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| default_title.to_string()),
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
            ..Self::default()
        }
    }

    /// Log-log error against step size
    ///
    /// Title defaults to "Error vs Step Size", line is purple.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::convergence("Verlet convergence");
    /// let config = PlotConfig::convergence(NO_TITLE);
    /// ```
    pub fn convergence(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::preset(
            title,
            "Error vs Step Size",
            "-log(Step) size",
            "-log(Max Error)",
        );
        config.line_color = ERROR_PURPLE;
        config
    }

    /// Displacement curves against time
    ///
    /// Series colors default to blue (analytic), red (reference) and green
    /// (integrator).
    pub fn displacement(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::preset(
            title,
            "Spring System Simulation",
            "Time (s)",
            "Displacement (m)",
        );
        config.series_colors = Some(vec![BLUE, RED, GREEN]);
        config
    }

    /// Integrator error against time
    pub fn run_error(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::preset(
            title,
            "Error between reference and integrator",
            "Time (s)",
            "Error (m)",
        );
        config.line_color = ERROR_PURPLE;
        config
    }

    /// Square x/y trace
    pub fn trace(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::preset(title, "Movement Graph", "x", "y");
        config.width = 1000;
        config.height = 1000;
        config
    }

    /// Get color for series at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_series_color(&self, series_index: usize) -> RGBColor {
        if let Some(ref colors) = self.series_colors
            && series_index < colors.len()
        {
            return colors[series_index];
        }

        let default_colors = [RED, BLUE, GREEN, MAGENTA, CYAN, BLACK, ERROR_PURPLE];
        default_colors[series_index % default_colors.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================

//! Trace companion: `x,y` movement traces
//!
//! A trace is a CSV table whose header names an `x` and a `y` column, in any
//! position and possibly among other columns. It can be drawn as a static
//! line plot ([`plot_trace`](crate::output::visualization::plot_trace)) or
//! replayed as a pen-plotter animation ([`TraceAnimator`]).
//!
//! # Example
//!
//! ```rust
//! use spring_study::trace::parse_trace;
//!
//! let trace = parse_trace("t,x,y\n0,0.0,0.0\n1,0.01,0.02\n").unwrap();
//! assert_eq!(trace.len(), 2);
//! assert_eq!(trace.points[1], (0.01, 0.02));
//! ```

pub mod animation;
pub mod gif;

pub use animation::{
    AnimationConfig, AnimationSummary, Pacing, PenCommand, PenSurface, RecordingSurface,
    StopToken, TraceAnimator,
};
pub use gif::{render_trace_gif, GifSurface};

use std::fs;
use std::path::Path;

use crate::error::{Result, StudyError};

/// Default trace file read by the `trace` binary
pub const DEFAULT_TRACE_PATH: &str = "./result1.csv";

/// Ordered (x, y) points of a movement trace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub points: Vec<(f64, f64)>,
}

impl Trace {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Read a trace from a CSV file
///
/// # Errors
///
/// - [`StudyError::Io`] if the file cannot be read
/// - see [`parse_trace`] for content errors
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| StudyError::io(path, e))?;
    let trace = parse_trace(&text)?;
    log::debug!("loaded {} trace points from {}", trace.len(), path.display());
    Ok(trace)
}

/// Parse a trace from CSV text
///
/// The first non-blank line is the header. Blank lines are skipped.
///
/// # Errors
///
/// - [`StudyError::MissingColumn`] if the header lacks `x` or `y`
/// - [`StudyError::Parse`] for a short row or a non-numeric cell, with the
///   1-based line number
pub fn parse_trace(text: &str) -> Result<Trace> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(StudyError::MissingColumn("x".to_string()));
    };

    let columns: Vec<&str> = header.split(',').map(unquote).collect();
    let column = |name: &str| {
        columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| StudyError::MissingColumn(name.to_string()))
    };
    let x_index = column("x")?;
    let y_index = column("y")?;

    let mut points = Vec::new();
    for (index, line) in lines {
        let cells: Vec<&str> = line.split(',').map(unquote).collect();
        let cell = |i: usize, name: &str| -> Result<f64> {
            let raw = cells.get(i).ok_or_else(|| StudyError::Parse {
                line: index + 1,
                content: line.to_string(),
                reason: format!("missing `{name}` cell"),
            })?;
            raw.parse::<f64>().map_err(|e| StudyError::Parse {
                line: index + 1,
                content: line.to_string(),
                reason: format!("`{name}` cell `{raw}`: {e}"),
            })
        };
        points.push((cell(x_index, "x")?, cell(y_index, "y")?));
    }

    Ok(Trace { points })
}

fn unquote(cell: &str) -> &str {
    cell.trim().trim_matches('"').trim()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_columns_in_any_position() {
        let trace = parse_trace("y,label,x\n2.0,a,1.0\n4.0,b,3.0\n").unwrap();
        assert_eq!(trace.points, vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_quoted_header_and_blank_lines() {
        let trace = parse_trace("\"x\",\"y\"\n\n0.5,0.25\n\n").unwrap();
        assert_eq!(trace.points, vec![(0.5, 0.25)]);
    }

    #[test]
    fn test_missing_column() {
        let err = parse_trace("x,z\n1,2\n").unwrap_err();
        assert!(matches!(err, StudyError::MissingColumn(ref name) if name == "y"));

        let err = parse_trace("").unwrap_err();
        assert!(matches!(err, StudyError::MissingColumn(_)));
    }

    #[test]
    fn test_bad_cell_reports_line() {
        let err = parse_trace("x,y\n1,2\n3,oops\n").unwrap_err();
        match err {
            StudyError::Parse { line, content, .. } => {
                assert_eq!(line, 3);
                assert_eq!(content, "3,oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row() {
        let err = parse_trace("x,y\n1\n").unwrap_err();
        assert!(matches!(err, StudyError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_header_only_is_empty_trace() {
        let trace = parse_trace("x,y\n").unwrap();
        assert!(trace.is_empty());
    }

    #[test]
    fn test_load_trace_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x,y").unwrap();
        writeln!(file, "0.001,0.002").unwrap();
        let trace = load_trace(file.path()).unwrap();
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_load_trace_missing_file() {
        let err = load_trace("/nonexistent/result1.csv").unwrap_err();
        assert!(matches!(err, StudyError::Io { .. }));
    }
}

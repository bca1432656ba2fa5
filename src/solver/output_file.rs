//! Solver output file format
//!
//! One sample per line, three whitespace-separated floating-point fields:
//!
//! ```text
//! 0.00000 0.000000000 0.000000000
//! 0.10000 0.099833417 0.099833417
//! ```
//!
//! Lines containing only whitespace are ignored. Any other line must parse to
//! exactly three numbers.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, StudyError};
use crate::solver::Sample;

/// Decimal places used by the spring-system solver for the time column
pub const TIME_PRECISION: usize = 5;

/// Decimal places used by the spring-system solver for displacement columns
pub const VALUE_PRECISION: usize = 9;

/// Parse solver output text into samples
///
/// # Errors
///
/// [`StudyError::Parse`] with the 1-based line number when a line does not
/// contain exactly three numeric fields.
///
/// # Example
///
/// ```rust
/// use spring_study::solver::parse_samples;
///
/// let samples = parse_samples("0.0 0.0 0.0\n0.1 0.0998 0.0999\n").unwrap();
/// assert_eq!(samples.len(), 2);
/// assert!(parse_samples("1.0 2.0").is_err());
/// ```
pub fn parse_samples(text: &str) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let malformed = |reason: String| StudyError::Parse {
            line: index + 1,
            content: line.to_string(),
            reason,
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(malformed(format!("expected 3 fields, found {}", fields.len())));
        }

        let mut values = [0.0; 3];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field
                .parse::<f64>()
                .map_err(|e| malformed(format!("`{field}` is not a number: {e}")))?;
        }

        samples.push(Sample::new(values[0], values[1], values[2]));
    }

    Ok(samples)
}

/// Read and parse a solver output file
pub fn read_samples(path: impl AsRef<Path>) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| StudyError::io(path, e))?;
    parse_samples(&text)
}

/// Write samples in the solver output format
///
/// Times are written with [`TIME_PRECISION`] decimals and both displacement
/// columns with [`VALUE_PRECISION`] decimals.
pub fn write_samples(path: impl AsRef<Path>, samples: &[Sample]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| StudyError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for sample in samples {
        writeln!(
            writer,
            "{:.tp$} {:.vp$} {:.vp$}",
            sample.time,
            sample.integrator,
            sample.reference,
            tp = TIME_PRECISION,
            vp = VALUE_PRECISION,
        )
        .map_err(|e| StudyError::io(path, e))?;
    }

    writer.flush().map_err(|e| StudyError::io(path, e))
}

// =================================================================================================
// Tests
// =================================================================================================

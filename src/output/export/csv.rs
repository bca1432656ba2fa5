//! CSV export of study results
//!
//! Tables are plain CSV, readable by pandas, spreadsheets or gnuplot.
//!
//! # Quick Examples
//!
//! ## Detailed run
//!
//! ```rust,ignore
//! use spring_study::output::export::export_run_csv;
//!
//! let run = study.run_one(0.01)?;
//! export_run_csv(&run, "spring_system_run.csv", None)?;
//! ```
//!
//! **Output** (`spring_system_run.csv`):
//! ```csv
//! time,integrator,reference,analytic,error
//! 0.000000000,0.000000000,0.000000000,0.000000000,0.000000000
//! 0.010000000,0.010000000,0.009999833,0.009999833,0.000000167
//! ...
//! ```
//!
//! ## Convergence table with metadata
//!
//! ```rust,ignore
//! use spring_study::output::export::{export_convergence_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::from_study("Velocity Verlet", study.spring());
//! let config = CsvConfig::default().with_metadata(metadata);
//! export_convergence_csv(&report.points, "spring_system_convergence.csv", Some(&config))?;
//! ```
//!
//! **Output**:
//! ```csv
//! # Spring System Convergence Study
//! # Generated: 2026-10-17T09:30:00+00:00
//! # Solver: Velocity Verlet
//! # Stiffness: 1
//! # Mass: 1
//! # Initial Velocity: 1
//! #
//! step_size,max_abs_error,neg_log10_step,neg_log10_error
//! 0.100000000,0.001664172,1.000000000,2.778795413
//! ...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::physics::SpringConstants;
use crate::study::{ConvergencePoint, Run};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 12,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 9)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 9,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon-delimited with comma decimals
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 15 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 15,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.delimiter == self.decimal_separator {
            return Err(format!(
                "Delimiter and decimal separator must differ (both '{}')",
                self.delimiter
            ));
        }
        Ok(())
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub solver_name: Option<String>,

    /// Step size of a detailed run
    pub step_size: Option<f64>,

    pub stiffness: Option<f64>,

    pub mass: Option<f64>,

    pub initial_velocity: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata naming the solver and the spring constants
    pub fn from_study(solver: &str, spring: &SpringConstants) -> Self {
        Self {
            solver_name: Some(solver.to_string()),
            stiffness: Some(spring.stiffness),
            mass: Some(spring.mass),
            initial_velocity: Some(spring.initial_velocity),
            ..Default::default()
        }
    }

    /// Builder pattern: set step size
    pub fn step_size(mut self, step_size: f64) -> Self {
        self.step_size = Some(step_size);
        self
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header(
    writer: &mut impl Write,
    metadata: &CsvMetadata,
) -> Result<(), Box<dyn Error>> {
    writeln!(writer, "# Spring System Convergence Study")?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(solver) = &metadata.solver_name {
        writeln!(writer, "# Solver: {}", solver)?;
    }
    if let Some(step) = metadata.step_size {
        writeln!(writer, "# Step Size: {} s", step)?;
    }
    if let Some(k) = metadata.stiffness {
        writeln!(writer, "# Stiffness: {}", k)?;
    }
    if let Some(m) = metadata.mass {
        writeln!(writer, "# Mass: {}", m)?;
    }
    if let Some(v0) = metadata.initial_velocity {
        writeln!(writer, "# Initial Velocity: {}", v0)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(writer, "# {}: {}", key, value)?;
    }

    writeln!(writer, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn write_row(
    writer: &mut impl Write,
    values: &[f64],
    config: &CsvConfig,
) -> Result<(), Box<dyn Error>> {
    let cells: Vec<String> = values.iter().map(|v| format_number(*v, config)).collect();
    writeln!(writer, "{}", cells.join(&config.delimiter.to_string()))?;
    Ok(())
}

/// Create the file and write the optional metadata and the column header
fn open_table(
    output_path: &Path,
    columns: &[&str],
    config: &CsvConfig,
) -> Result<BufWriter<File>, Box<dyn Error>> {
    config.validate()?;

    let mut writer = BufWriter::new(File::create(output_path)?);
    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        write_metadata_header(&mut writer, metadata)?;
    }
    writeln!(writer, "{}", columns.join(&config.delimiter.to_string()))?;
    Ok(writer)
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export one run as `time, integrator, reference, analytic, error`
///
/// # Errors
///
/// - Empty run
/// - NaN or Inf in any column
/// - Invalid configuration or file creation errors
pub fn export_run_csv(
    run: &Run,
    output_path: impl AsRef<Path>,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    // ============================= Validation =============================

    if run.is_empty() {
        return Err("Empty data: run has no samples".into());
    }

    let columns = [
        ("time", &run.time),
        ("integrator", &run.integrator),
        ("reference", &run.reference),
        ("analytic", &run.analytic),
        ("error", &run.error),
    ];
    for (name, values) in &columns {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(format!("Invalid data: NaN or Inf detected in {} column", name).into());
        }
    }

    // ============================= Write ==================================

    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let mut writer = open_table(output_path.as_ref(), &names, config)?;

    for i in 0..run.len() {
        let row: Vec<f64> = columns.iter().map(|(_, values)| values[i]).collect();
        write_row(&mut writer, &row, config)?;
    }

    writer.flush()?;
    Ok(())
}

/// Export convergence points as `step_size, max_abs_error, neg_log10_step, neg_log10_error`
///
/// A zero max error has no logarithm; its `neg_log10_error` cell is left
/// empty.
///
/// # Errors
///
/// - No points
/// - Non-positive or non-finite step size, negative or non-finite error
/// - Invalid configuration or file creation errors
pub fn export_convergence_csv(
    points: &[ConvergencePoint],
    output_path: impl AsRef<Path>,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    // ============================= Validation =============================

    if points.is_empty() {
        return Err("Empty data: no convergence points".into());
    }

    for point in points {
        if !(point.step_size.is_finite() && point.step_size > 0.0) {
            return Err(format!("Invalid data: step size {}", point.step_size).into());
        }
        if !(point.max_abs_error.is_finite() && point.max_abs_error >= 0.0) {
            return Err(format!(
                "Invalid data: max error {} at step {}",
                point.max_abs_error, point.step_size
            )
            .into());
        }
    }

    // ============================= Write ==================================

    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    let mut writer = open_table(
        output_path.as_ref(),
        &["step_size", "max_abs_error", "neg_log10_step", "neg_log10_error"],
        config,
    )?;

    let delimiter = config.delimiter;
    for point in points {
        let neg_log_error = if point.max_abs_error > 0.0 {
            format_number(-point.max_abs_error.log10(), config)
        } else {
            String::new()
        };

        writeln!(
            writer,
            "{}{d}{}{d}{}{d}{}",
            format_number(point.step_size, config),
            format_number(point.max_abs_error, config),
            format_number(-point.step_size.log10(), config),
            neg_log_error,
            d = delimiter,
        )?;
    }

    writer.flush()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Sample;
    use std::fs;
    use tempfile::NamedTempFile;

    fn sample_run() -> Run {
        let samples = vec![
            Sample::new(0.0, 0.0, 0.0),
            Sample::new(0.1, 0.0998, 0.0999),
        ];
        Run::from_samples(0.1, &samples, &SpringConstants::default()).unwrap()
    }

    fn data_lines(text: &str) -> Vec<&str> {
        text.lines().filter(|l| !l.starts_with('#')).collect()
    }

    #[test]
    fn test_export_run_csv() {
        let file = NamedTempFile::new().unwrap();
        export_run_csv(&sample_run(), file.path(), None).unwrap();

        let text = fs::read_to_string(file.path()).unwrap();
        let lines = data_lines(&text);
        assert_eq!(lines[0], "time,integrator,reference,analytic,error");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("0.100000000,0.099800000,0.099900000,"));
        assert!(lines[2].ends_with(",0.000100000"));
    }

    #[test]
    fn test_export_run_csv_european() {
        let file = NamedTempFile::new().unwrap();
        let config = CsvConfig::european().precision(3);
        export_run_csv(&sample_run(), file.path(), Some(&config)).unwrap();

        let text = fs::read_to_string(file.path()).unwrap();
        let lines = data_lines(&text);
        assert_eq!(lines[0], "time;integrator;reference;analytic;error");
        assert!(lines[2].starts_with("0,100;0,100;0,100;"));
    }

    #[test]
    fn test_export_convergence_csv() {
        let file = NamedTempFile::new().unwrap();
        let points = [ConvergencePoint::new(0.1, 0.01), ConvergencePoint::new(0.01, 0.0001)];
        export_convergence_csv(&points, file.path(), None).unwrap();

        let text = fs::read_to_string(file.path()).unwrap();
        let lines = data_lines(&text);
        assert_eq!(lines[0], "step_size,max_abs_error,neg_log10_step,neg_log10_error");
        assert_eq!(lines[1], "0.100000000,0.010000000,1.000000000,2.000000000");
        assert_eq!(lines[2], "0.010000000,0.000100000,2.000000000,4.000000000");
    }

    #[test]
    fn test_zero_error_leaves_log_cell_empty() {
        let file = NamedTempFile::new().unwrap();
        export_convergence_csv(&[ConvergencePoint::new(0.1, 0.0)], file.path(), None).unwrap();

        let text = fs::read_to_string(file.path()).unwrap();
        assert!(data_lines(&text)[1].ends_with("1.000000000,"));
    }

    #[test]
    fn test_metadata_header() {
        let file = NamedTempFile::new().unwrap();
        let mut metadata =
            CsvMetadata::from_study("Velocity Verlet", &SpringConstants::default()).step_size(0.1);
        metadata.add_custom("Note", "unit test");
        let config = CsvConfig::default().with_metadata(metadata);

        export_run_csv(&sample_run(), file.path(), Some(&config)).unwrap();

        let text = fs::read_to_string(file.path()).unwrap();
        assert!(text.starts_with("# Spring System Convergence Study\n# Generated: "));
        assert!(text.contains("# Solver: Velocity Verlet"));
        assert!(text.contains("# Step Size: 0.1 s"));
        assert!(text.contains("# Note: unit test"));
        assert_eq!(data_lines(&text)[0], "time,integrator,reference,analytic,error");
    }

    #[test]
    fn test_rejects_bad_data() {
        let file = NamedTempFile::new().unwrap();
        assert!(export_convergence_csv(&[], file.path(), None).is_err());
        assert!(export_convergence_csv(&[ConvergencePoint::new(0.1, f64::NAN)], file.path(), None).is_err());
        assert!(export_convergence_csv(&[ConvergencePoint::new(-0.1, 0.1)], file.path(), None).is_err());

        let mut run = sample_run();
        run.error[1] = f64::INFINITY;
        assert!(export_run_csv(&run, file.path(), None).is_err());
    }

    #[test]
    fn test_rejects_conflicting_separators() {
        let file = NamedTempFile::new().unwrap();
        let config = CsvConfig::european().delimiter(',');
        assert!(export_run_csv(&sample_run(), file.path(), Some(&config)).is_err());
    }
}

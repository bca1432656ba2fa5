//! Helper functions for integration tests

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use spring_study::solver::ExternalSolver;

/// Assert that a sequence is strictly decreasing
pub fn assert_decreasing(values: &[f64], message: &str) {
    for (i, pair) in values.windows(2).enumerate() {
        assert!(
            pair[0] > pair[1],
            "{}: element {} ({}) is not greater than element {} ({})",
            message, i, pair[0], i + 1, pair[1]
        );
    }
}

/// External solver running a shell script inside `dir`
///
/// The script sees the step as `$1` and writes `dir/output.txt`.
#[cfg(unix)]
pub fn shell_solver(dir: &Path, script: &str) -> ExternalSolver {
    let output = dir.join("output.txt");
    let script = format!("cd '{}' && {}", dir.display(), script);
    ExternalSolver::new("sh")
        .args(["-c", script.as_str(), "solver"])
        .output_path(output)
}

/// Write an `x,y` trace with extra columns and return its path
pub fn write_trace_csv(dir: &Path, points: &[(f64, f64)]) -> PathBuf {
    let path = dir.join("result1.csv");
    let mut text = String::from("index,x,y,speed\n");
    for (i, (x, y)) in points.iter().enumerate() {
        text.push_str(&format!("{},{},{},0.0\n", i, x, y));
    }
    fs::write(&path, text).unwrap();
    path
}

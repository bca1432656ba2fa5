//! Export module for study results
//!
//! Tabular data for external analysis. CSV is the only format; each table
//! has its own function taking the study type it serializes.
//!
//! | Table | Function |
//! |-------|----------|
//! | Detailed run (time, integrator, reference, analytic, error) | [`export_run_csv`] |
//! | Convergence points with log columns | [`export_convergence_csv`] |

pub mod csv;

pub use csv::{export_convergence_csv, export_run_csv, CsvConfig, CsvMetadata};

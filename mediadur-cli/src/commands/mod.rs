//! Command implementations for the CLI.

/// Module containing the implementation of the frame tally.
/// Discovers, probes and totals media files, then prints the report.
pub mod tally;

pub use tally::run_tally;

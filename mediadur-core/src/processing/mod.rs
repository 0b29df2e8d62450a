//! Core aggregation logic and orchestration.
//!
//! This module is the central hub of the mediadur-core library: it turns a
//! stream of discovered paths into an [`AggregateResult`], either sequentially
//! or on a rayon thread pool.

/// Per-file probing and frame totals
pub mod aggregate;

/// Cooperative cancellation
pub mod cancel;

pub use aggregate::{
    AggregateOptions, AggregateResult, FileSummary, aggregate, aggregate_files,
    aggregate_parallel, process_media_files,
};
pub use cancel::CancellationToken;

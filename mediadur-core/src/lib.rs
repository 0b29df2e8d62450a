//! Core library for counting frames and durations of media files using ffprobe.
//!
//! This crate provides media file discovery, per-file probing and validation,
//! SMPTE timecode rendering, and aggregation of frame counts into per-framerate
//! totals with text and JSON reports.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mediadur_core::{CancellationToken, CoreConfig, FfprobeSource, process_media_files};
//! use mediadur_core::events::EventDispatcher;
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(vec![PathBuf::from("/path/to/footage")]);
//! config.recurse = true;
//!
//! let result = process_media_files(
//!     &config,
//!     &FfprobeSource::new(),
//!     &EventDispatcher::silent(),
//!     CancellationToken::new(),
//! )
//! .unwrap();
//!
//! println!("{}", mediadur_core::format_summary(&result).unwrap());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod external;
pub mod media;
pub mod processing;
pub mod reporting;
pub mod timecode;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, MEDIA_FILE_EXTENSIONS};
pub use discovery::{
    InputPaths, MediaFiles, MediaFilter, discover_media_files, has_media_file_extension,
};
pub use error::{CoreError, CoreResult};
pub use external::{FfprobeSource, ProbeSource, check_dependency, parse_ffprobe_output};
pub use media::{MediaFileRecord, ProbeResult, ValidationError};
pub use processing::{
    AggregateOptions, AggregateResult, CancellationToken, FileSummary, aggregate,
    aggregate_files, aggregate_parallel, process_media_files,
};
pub use reporting::{JsonCountReport, JsonReport, format_count, format_summary};
pub use timecode::{DISPLAY_FRAME_ADJUSTMENT, display_timecode, render};
pub use utils::format_thousands;

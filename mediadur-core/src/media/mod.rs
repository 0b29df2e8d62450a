//! Media information module
//!
//! This module provides the probe data model and the validated per-file
//! record built from it.

pub mod probe;
pub mod record;

// Re-export commonly used types
pub use probe::{ProbeResult, ProbeStream};
pub use record::{MediaFileRecord, ValidationError, fps_from_frame_rate_fraction};

// ============================================================================
// mediadur-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for mediadur-core
//
// This module defines the error types used throughout the mediadur-core
// library. Per-file failures (probe errors, record validation errors) are
// caught at the file boundary by the aggregation engine and turned into skip
// counts; only configuration errors and renderer misuse reach the caller.
//
// AI-ASSISTANT-INFO: Error types and result alias for mediadur-core

// ---- Internal crate imports ----
use crate::media::record::ValidationError;

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors produced by the mediadur-core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read directory '{}': {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Probe failed: {0}")]
    Probe(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Command '{0}' failed with status {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid media file: {0}")]
    RecordValidation(#[from] ValidationError),

    #[error("Invalid frame rate: {0} (must be a positive, finite number)")]
    InvalidFrameRate(f64),

    #[error("Drop-frame timecode is not supported at {0} fps")]
    DropFrameUnsupported(f64),

    #[error("Frame number {0} is too large to render as a timecode")]
    TimecodeOverflow(u64),

    #[error("Adding {0} frames would overflow the frame total")]
    FrameTotalOverflow(u64),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for mediadur-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a command that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] for a command that exited unsuccessfully.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}

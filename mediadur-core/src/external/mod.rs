// ============================================================================
// mediadur-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffprobe CLI Tool
//
// This module encapsulates interactions with ffprobe. The aggregation engine
// only sees the ProbeSource trait, so tests and alternative probers can be
// injected in place of the real binary.
//
// KEY COMPONENTS:
// - ProbeSource trait for probing a single file
// - FfprobeSource implementation running the ffprobe binary
// - parse_ffprobe_output for the binary's JSON output
// - Dependency checking function
//
// AI-ASSISTANT-INFO: External tool interactions and abstractions for ffprobe

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains the probe trait and its ffprobe implementation
pub mod ffprobe_executor;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffprobe_executor::{FfprobeSource, ProbeSource, parse_ffprobe_output};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// This function attempts to run the specified command with a `-version` argument
/// to verify that it exists and is executable.
///
/// # Arguments
///
/// * `cmd_name` - The name of the command to check (e.g., "ffprobe")
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
///
/// # Examples
///
/// ```rust,no_run
/// use mediadur_core::external::check_dependency;
///
/// match check_dependency("ffprobe") {
///     Ok(()) => println!("ffprobe is available"),
///     Err(e) => eprintln!("ffprobe check failed: {}", e),
/// }
/// ```
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency directly: {}", cmd_name);
            Ok(())
        }
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                log::warn!("Dependency '{}' not found.", cmd_name);
                Err(CoreError::DependencyNotFound(cmd_name.to_string()))
            } else {
                log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
                Err(CoreError::CommandStart(cmd_name.to_string(), e))
            }
        }
    }
}

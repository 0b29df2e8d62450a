// ============================================================================
// mediadur-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration structure and constants used by the
// discovery and aggregation stages of mediadur-core.
//
// KEY COMPONENTS:
// - CoreConfig: Main configuration structure for the library
// - MEDIA_FILE_EXTENSIONS: Extensions recognised as media files
// - Default constants: Predefined values for common settings
//
// USAGE:
// Instances of CoreConfig are created by consumers of the library (like
// mediadur-cli) and validated before discovery starts.
//
// AI-ASSISTANT-INFO: Configuration structures and constants for mediadur-core

// ---- Internal crate imports ----
use crate::discovery::InputPaths;
use crate::error::{CoreError, CoreResult};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Extensions (lowercase, without the dot) of containers and elementary
/// streams that ffprobe can usually read.
pub const MEDIA_FILE_EXTENSIONS: &[&str] = &[
    "264", "265", "266", "3g2", "3gp", "amv", "asf", "avi", "f4a", "f4b", "f4p", "f4v", "flv",
    "gifv", "m4p", "m4v", "mkv", "mng", "mod", "mov", "mp2", "mp4", "mpe", "mpeg", "mpg", "mpv",
    "mxf", "nsv", "ogg", "ogv", "qt", "rm", "roq", "rrc", "svi", "vob", "webm", "wmv", "yuv",
];

/// Default number of files probed concurrently. One keeps processing strictly
/// sequential.
pub const DEFAULT_JOBS: usize = 1;

/// Upper bound for `jobs`.
pub const MAX_JOBS: usize = 256;

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for the mediadur-core library.
///
/// # Examples
///
/// ```rust
/// use mediadur_core::CoreConfig;
///
/// let mut config = CoreConfig::new(vec!["/path/to/footage".into()]);
/// config.recurse = true;
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Discovery ----

    /// Files and folders to inventory
    pub inputs: Vec<std::path::PathBuf>,

    /// Skip the extension check and pass every file to the prober
    pub allow_all: bool,

    /// Descend into sub-folders with no depth limit (default: immediate children only)
    pub recurse: bool,

    /// Extensions recognised as media files (lowercase, no leading dot)
    pub extensions: Vec<String>,

    // ---- Aggregation ----

    /// Keep the raw probe payload in every per-file summary
    pub include_full_probe: bool,

    /// Number of files probed concurrently
    pub jobs: usize,
}

impl CoreConfig {
    /// Creates a configuration with defaults for everything except the inputs.
    pub fn new(inputs: Vec<std::path::PathBuf>) -> Self {
        Self {
            inputs,
            allow_all: false,
            recurse: false,
            extensions: MEDIA_FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_full_probe: false,
            jobs: DEFAULT_JOBS,
        }
    }

    /// Checks the configuration for errors that would make a run meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if self.inputs.is_empty() {
            return Err(CoreError::Config("no input paths given".to_string()));
        }

        if self.jobs == 0 || self.jobs > MAX_JOBS {
            return Err(CoreError::Config(format!(
                "jobs must be between 1 and {MAX_JOBS}, got {}",
                self.jobs
            )));
        }

        if !self.allow_all && self.extensions.is_empty() {
            return Err(CoreError::Config(
                "extension list is empty; no file could ever match".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the configured inputs as the discovery input type.
    pub fn input_paths(&self) -> InputPaths {
        InputPaths::List(self.inputs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_list_is_lowercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for ext in MEDIA_FILE_EXTENSIONS {
            assert_eq!(*ext, ext.to_lowercase());
            assert!(!ext.starts_with('.'));
            assert!(seen.insert(*ext), "duplicate extension {ext}");
        }
        assert_eq!(MEDIA_FILE_EXTENSIONS.len(), 39);
    }

    #[test]
    fn test_validate_requires_inputs() {
        let config = CoreConfig::new(Vec::new());
        match config.validate() {
            Err(CoreError::Config(msg)) => assert!(msg.contains("no input paths")),
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_jobs_range() {
        let mut config = CoreConfig::new(vec!["a.mov".into()]);
        assert!(config.validate().is_ok());

        config.jobs = 0;
        assert!(config.validate().is_err());

        config.jobs = MAX_JOBS + 1;
        assert!(config.validate().is_err());

        config.jobs = 8;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_extensions() {
        let mut config = CoreConfig::new(vec!["a.mov".into()]);
        config.extensions.clear();
        assert!(config.validate().is_err());

        config.allow_all = true;
        assert!(config.validate().is_ok());
    }
}

// mediadur-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use mediadur_core::CoreConfig;
use mediadur_core::config::DEFAULT_JOBS;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "mediadur",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Outputs the frame count, framerate (FPS) and time duration of a given media file or folder or files, and a summary of totals."
)]
pub struct Cli {
    /// File or folder path(s) pointing to media files. Folders are only read one level deep unless --deep is given
    #[arg(value_name = "ITEMS")]
    pub items: Vec<PathBuf>,

    /// Assess files of all extensions
    #[arg(long)]
    pub allow_all: bool,

    /// Output only the frame count
    #[arg(long)]
    pub count: bool,

    /// Output debug lines
    #[arg(long)]
    pub debug: bool,

    /// Recurse into folders deeply with no limit
    #[arg(long)]
    pub deep: bool,

    /// Include all probe data, including streams info, from ffprobe when using --json
    #[arg(long)]
    pub full_probe: bool,

    /// Output result in JSON
    #[arg(long)]
    pub json: bool,

    /// Print the list of extensions that are recognised as media files
    #[arg(long)]
    pub print_extensions: bool,

    /// Output the summary only and exclude the line of details per file
    #[arg(long)]
    pub summary: bool,

    /// Number of files probed concurrently. Per-file lines keep input order;
    /// with --debug the "Probing" lines follow the order workers pick files up
    #[arg(short, long, value_name = "N", env = "MEDIADUR_JOBS", default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,
}

impl Cli {
    /// Whether per-file lines and skip messages are suppressed.
    pub fn is_quiet(&self) -> bool {
        (self.summary || self.count || self.json) && !self.debug
    }

    pub fn to_core_config(&self) -> CoreConfig {
        let mut config = CoreConfig::new(self.items.clone());
        config.allow_all = self.allow_all;
        config.recurse = self.deep;
        config.include_full_probe = self.full_probe;
        config.jobs = self.jobs;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::parse_from([
            "mediadur",
            "--deep",
            "--allow-all",
            "--full-probe",
            "--jobs",
            "4",
            "a.mov",
            "footage",
        ]);
        let config = cli.to_core_config();
        assert_eq!(
            config.inputs,
            vec![PathBuf::from("a.mov"), PathBuf::from("footage")]
        );
        assert!(config.recurse);
        assert!(config.allow_all);
        assert!(config.include_full_probe);
        assert_eq!(config.jobs, 4);
    }

    #[test]
    fn test_quiet_modes() {
        assert!(!Cli::parse_from(["mediadur", "x"]).is_quiet());
        assert!(Cli::parse_from(["mediadur", "--summary", "x"]).is_quiet());
        assert!(Cli::parse_from(["mediadur", "--count", "x"]).is_quiet());
        assert!(Cli::parse_from(["mediadur", "--json", "x"]).is_quiet());
        assert!(!Cli::parse_from(["mediadur", "--json", "--debug", "x"]).is_quiet());
    }
}

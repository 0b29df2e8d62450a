// ============================================================================
// mediadur-cli/src/output.rs
// ============================================================================
//
// TERMINAL OUTPUT: Event Handlers and Final Reports
//
// Per-file counted lines go to stdout and skip messages to stderr, through a
// ConsoleEventHandler registered with a level filter that depends on the
// output mode. Quiet modes on an interactive terminal get a progress bar on
// stderr instead.
//
// AI-ASSISTANT-INFO: Console output, progress bar and report printing

// ---- Internal crate imports ----
use crate::cli::Cli;
use crate::error::{CliErrorContext, CliResult};

// ---- External crate imports ----
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use mediadur_core::events::{Event, EventHandler};
use mediadur_core::{
    AggregateResult, JsonCountReport, JsonReport, MEDIA_FILE_EXTENSIONS, format_count,
    format_summary, format_thousands,
};

// ---- Standard library imports ----
use std::io::{self, Write};
use std::time::Duration;

pub const NO_MEDIA_FILES_MESSAGE: &str = "No media files found. Check the path(s) or use --deep to recurse deeply into folders to find media files.";

// ============================================================================
// EVENT HANDLERS
// ============================================================================

/// Writes per-file events to the terminal.
pub struct ConsoleEventHandler;

impl EventHandler for ConsoleEventHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::ProbeStarted { filepath } => {
                eprintln!("{} {}", style("Probing").dim(), filepath.display());
            }
            Event::FileCounted {
                filepath,
                fps,
                frame_count,
                duration_timecode,
            } => {
                println!(
                    "{}\n    Frames: {} | Duration: {} | FPS: {} ",
                    filepath.display(),
                    format_thousands(*frame_count),
                    duration_timecode,
                    fps
                );
            }
            Event::FileSkipped { filepath, reason } => {
                eprintln!("{}\n    Skipped. {}", filepath.display(), reason);
            }
            Event::FileProbed { .. } => {}
            Event::Cancelled { attempted } => {
                eprintln!(
                    "{} after {} file(s); totals are partial",
                    style("Cancelled").yellow().bold(),
                    attempted
                );
            }
        }
    }
}

/// Level of events the console handler receives for this invocation.
pub fn console_level(args: &Cli) -> LevelFilter {
    if args.debug {
        LevelFilter::Debug
    } else if args.is_quiet() {
        LevelFilter::Off
    } else {
        LevelFilter::Info
    }
}

/// Advances a progress bar once per probed file, as workers finish.
pub struct ProgressEventHandler {
    bar: ProgressBar,
}

impl ProgressEventHandler {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl EventHandler for ProgressEventHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::FileProbed { .. } => self.bar.inc(1),
            Event::ProbeStarted { filepath } => {
                let name = filepath
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.bar.set_message(name);
            }
            Event::Cancelled { .. } => self.bar.abandon(),
            Event::FileCounted { .. } | Event::FileSkipped { .. } => {}
        }
    }
}

/// A progress bar on stderr, only when quiet output goes to an interactive terminal.
pub fn create_progress_bar(args: &Cli, total: u64) -> Option<ProgressBar> {
    if !args.is_quiet() || !Term::stderr().is_term() {
        return None;
    }

    let bar = ProgressBar::new(total);
    if let Ok(bar_style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {wide_msg}")
    {
        bar.set_style(bar_style.progress_chars("█▓▒░ "));
    }
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

// ============================================================================
// REPORTS
// ============================================================================

fn write_stdout(text: &str) -> CliResult<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{text}").cli_context("Failed to write output")?;
    handle.flush().cli_context("Failed to write output")
}

/// Recognised extensions as a comma list, or a JSON array.
pub fn print_extensions(json: bool) -> CliResult<()> {
    let text = if json {
        serde_json::to_string(MEDIA_FILE_EXTENSIONS)?
    } else {
        MEDIA_FILE_EXTENSIONS.join(", ")
    };
    write_stdout(&text)
}

pub fn print_no_media_files(args: &Cli) -> CliResult<()> {
    if args.json {
        if args.debug {
            eprintln!("{NO_MEDIA_FILES_MESSAGE}");
        }
        write_stdout(&JsonReport::no_media_files_found().to_json_string()?)
    } else {
        write_stdout(NO_MEDIA_FILES_MESSAGE)
    }
}

/// Prints the final report in the mode selected by the flags.
pub fn print_result(result: &AggregateResult, args: &Cli) -> CliResult<()> {
    let text = match (args.json, args.count) {
        (true, true) => JsonCountReport::new(result).to_json_string()?,
        (true, false) => JsonReport::ok(result).to_json_string()?,
        (false, true) => format_count(result),
        (false, false) => format_summary(result)?,
    };
    write_stdout(&text)
}

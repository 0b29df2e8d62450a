// ============================================================================
// mediadur-cli/src/commands/tally.rs
// ============================================================================
//
// TALLY COMMAND: Count Frames and Durations of Media Files
//
// Discovers media files from the given items, probes each with ffprobe and
// prints per-file lines followed by the totals, a bare count, or JSON.
//
// AI-ASSISTANT-INFO: Main command of the mediadur binary

// ---- Internal crate imports ----
use crate::cli::Cli;
use crate::error::{CliErrorContext, CliResult};
use crate::output::{
    self, ConsoleEventHandler, ProgressEventHandler, console_level, create_progress_bar,
};

// ---- External crate imports ----
use log::{debug, info};
use mediadur_core::discovery::discover_media_files_with;
use mediadur_core::events::EventDispatcher;
use mediadur_core::{AggregateOptions, FfprobeSource, aggregate_files, check_dependency};

// ---- Standard library imports ----
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Runs one invocation of the binary.
pub fn run_tally(args: &Cli) -> CliResult<()> {
    if args.print_extensions {
        return output::print_extensions(args.json);
    }

    let config = args.to_core_config();
    config.validate()?;
    debug!("Input items: {:?}", config.inputs);

    let files: Vec<PathBuf> = discover_media_files_with(
        config.input_paths(),
        config.extensions.clone(),
        config.allow_all,
        config.recurse,
    )
    .collect();

    if files.is_empty() {
        return output::print_no_media_files(args);
    }
    debug!("Discovered {} media file(s)", files.len());

    let source = FfprobeSource::new();
    check_dependency(source.program())
        .cli_with_context(|| format!("{} is required to read media files", source.program()))?;

    let mut events = EventDispatcher::new();
    events.add_filtered_handler(console_level(args), Arc::new(ConsoleEventHandler));
    let progress = create_progress_bar(args, files.len() as u64);
    if let Some(bar) = &progress {
        events.add_handler(Arc::new(ProgressEventHandler::new(bar.clone())));
    }

    let start = Instant::now();
    let options = AggregateOptions::from(&config);
    let result = aggregate_files(&files, &source, &options, &events)
        .cli_with_context(|| format!("Failed to probe {} file(s)", files.len()))?;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }
    info!(
        "Probed {} file(s) in {:.2?} ({} counted, {} skipped)",
        result.attempted(),
        start.elapsed(),
        result.count_files,
        result.count_files_skipped
    );

    output::print_result(&result, args)
}

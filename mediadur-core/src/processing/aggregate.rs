// ============================================================================
// mediadur-core/src/processing/aggregate.rs
// ============================================================================
//
// AGGREGATION: Per-file Probing and Frame Totals
//
// This module drives the main loop: every discovered path is probed, turned
// into a validated MediaFileRecord, rendered as a timecode and folded into an
// AggregateResult. A file that fails at any step is counted as skipped and
// never aborts the run.
//
// KEY COMPONENTS:
// - AggregateResult: totals, per-framerate buckets and per-file summaries
// - aggregate: sequential run over a lazy path iterator
// - aggregate_parallel: rayon-backed run over a collected path list
//
// AI-ASSISTANT-INFO: Aggregation engine for frame counts and durations

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher};
use crate::external::ProbeSource;
use crate::media::record::MediaFileRecord;
use crate::processing::cancel::CancellationToken;
use crate::config::{CoreConfig, DEFAULT_JOBS};

// ---- External crate imports ----
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use serde_json::Value;

// ---- Standard library imports ----
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ============================================================================
// RESULT TYPES
// ============================================================================

/// One counted file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub duration_timecode: String,
    #[serde(serialize_with = "serialize_path")]
    pub filepath: PathBuf,
    pub fps: u64,
    pub frame_count: u64,
    /// Full probe payload, present only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<Value>,
}

/// Totals over every attempted file.
///
/// Field order is alphabetical so the JSON report keeps a stable key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResult {
    pub count_files: u64,
    pub count_files_skipped: u64,
    /// Number of counted files per integer fps
    pub count_framerates: BTreeMap<u64, u64>,
    pub count_frames: u64,
    /// Summed frame counts per integer fps
    pub count_frames_by_framerate: BTreeMap<u64, u64>,
    /// Counted files in discovery order
    pub files: Vec<FileSummary>,
    /// Set when a cancellation stopped the run before every path was attempted
    #[serde(skip)]
    pub cancelled: bool,
}

impl AggregateResult {
    /// Adds a counted file, updating every counter together.
    ///
    /// Fails without changing anything when the file's frames would overflow
    /// a total.
    pub fn add_file(&mut self, summary: FileSummary) -> CoreResult<()> {
        let frames = summary.frame_count;
        let overflow = || CoreError::FrameTotalOverflow(frames);

        let count_frames = self.count_frames.checked_add(frames).ok_or_else(overflow)?;
        let bucket = self
            .count_frames_by_framerate
            .get(&summary.fps)
            .copied()
            .unwrap_or(0)
            .checked_add(frames)
            .ok_or_else(overflow)?;

        self.count_files += 1;
        self.count_frames = count_frames;
        *self.count_framerates.entry(summary.fps).or_insert(0) += 1;
        self.count_frames_by_framerate.insert(summary.fps, bucket);
        self.files.push(summary);
        Ok(())
    }

    pub fn add_skipped(&mut self) {
        self.count_files_skipped += 1;
    }

    /// Number of paths that were counted or skipped.
    #[must_use]
    pub fn attempted(&self) -> u64 {
        self.count_files.saturating_add(self.count_files_skipped)
    }

    /// Combines two partial results. `self` is treated as coming first in
    /// discovery order.
    ///
    /// The files of `other` are added one by one, so a file that would
    /// overflow the combined totals is counted as skipped, exactly as a single
    /// run over both inputs would have done.
    #[must_use]
    pub fn merge(mut self, other: AggregateResult) -> AggregateResult {
        for summary in other.files {
            let filepath = summary.filepath.clone();
            if let Err(e) = self.add_file(summary) {
                log::warn!("Skipping {}: {}", filepath.display(), e);
                self.add_skipped();
            }
        }
        self.count_files_skipped += other.count_files_skipped;
        self.cancelled |= other.cancelled;
        self
    }

    /// Whether the counters agree with each other and with `files`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let files_by_rate = checked_sum(self.count_framerates.values().copied());
        let frames_by_rate = checked_sum(self.count_frames_by_framerate.values().copied());
        let listed_frames = checked_sum(self.files.iter().map(|f| f.frame_count));

        files_by_rate == Some(self.count_files)
            && frames_by_rate == Some(self.count_frames)
            && self.files.len() as u64 == self.count_files
            && listed_frames == Some(self.count_frames)
            && self
                .count_framerates
                .keys()
                .eq(self.count_frames_by_framerate.keys())
    }
}

fn checked_sum(values: impl IntoIterator<Item = u64>) -> Option<u64> {
    values.into_iter().try_fold(0u64, u64::checked_add)
}

fn serialize_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Attach the raw probe payload to each FileSummary
    pub include_full_probe: bool,
    /// Worker threads used by `aggregate_parallel`
    pub jobs: usize,
    pub cancel: CancellationToken,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            include_full_probe: false,
            jobs: DEFAULT_JOBS,
            cancel: CancellationToken::new(),
        }
    }
}

impl From<&CoreConfig> for AggregateOptions {
    fn from(config: &CoreConfig) -> Self {
        Self {
            include_full_probe: config.include_full_probe,
            jobs: config.jobs,
            cancel: CancellationToken::new(),
        }
    }
}

// ============================================================================
// PER-FILE PROCESSING
// ============================================================================

enum FileOutcome {
    Counted(FileSummary),
    Skipped(String),
}

/// Probes and validates one file. Emits only start and finish events, so it
/// can run on any worker.
fn process_file(
    filepath: &Path,
    source: &dyn ProbeSource,
    include_full_probe: bool,
    events: &EventDispatcher,
) -> FileOutcome {
    events.emit(Event::ProbeStarted {
        filepath: filepath.to_path_buf(),
    });
    let outcome = summarize_file(filepath, source, include_full_probe);
    events.emit(Event::FileProbed {
        filepath: filepath.to_path_buf(),
    });

    match outcome {
        Ok(summary) => FileOutcome::Counted(summary),
        Err(CoreError::RecordValidation(e)) => FileOutcome::Skipped(format!(
            "Exception while getting metadata about this file - {e}"
        )),
        Err(e) => FileOutcome::Skipped(format!("Exception - {e}")),
    }
}

fn summarize_file(
    filepath: &Path,
    source: &dyn ProbeSource,
    include_full_probe: bool,
) -> CoreResult<FileSummary> {
    let probe = source.probe(filepath)?;
    let record = MediaFileRecord::build(filepath, &probe)?;
    let duration_timecode = record.duration_timecode()?;

    log::debug!(
        "Validated {}: {} frames at {} fps",
        filepath.display(),
        record.frame_count,
        record.fps
    );
    Ok(FileSummary {
        duration_timecode,
        filepath: record.filepath,
        fps: record.fps,
        frame_count: record.frame_count,
        probe: include_full_probe.then_some(probe.raw),
    })
}

/// Folds one outcome into `result` and reports it. Called in input order.
fn record_outcome(
    result: &mut AggregateResult,
    filepath: &Path,
    outcome: FileOutcome,
    events: &EventDispatcher,
) {
    let reason = match outcome {
        FileOutcome::Counted(summary) => {
            let counted = Event::FileCounted {
                filepath: summary.filepath.clone(),
                fps: summary.fps,
                frame_count: summary.frame_count,
                duration_timecode: summary.duration_timecode.clone(),
            };
            match result.add_file(summary) {
                Ok(()) => {
                    events.emit(counted);
                    return;
                }
                Err(e) => format!("Exception - {e}"),
            }
        }
        FileOutcome::Skipped(reason) => reason,
    };

    log::warn!("Skipping {}: {}", filepath.display(), reason);
    result.add_skipped();
    events.emit(Event::FileSkipped {
        filepath: filepath.to_path_buf(),
        reason,
    });
}

fn finish(result: AggregateResult, events: &EventDispatcher) -> AggregateResult {
    if result.cancelled {
        log::info!("Cancelled after {} file(s)", result.attempted());
        events.emit(Event::Cancelled {
            attempted: result.attempted(),
        });
    }
    result
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Probes every path in order and folds the results.
///
/// Paths are pulled lazily, so a cancelled run stops discovery as well as
/// probing. Per-file failures become skips; this function itself never fails.
pub fn aggregate<I>(
    paths: I,
    source: &dyn ProbeSource,
    options: &AggregateOptions,
    events: &EventDispatcher,
) -> AggregateResult
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut paths = paths.into_iter();
    let mut result = AggregateResult::default();

    loop {
        if options.cancel.is_cancelled() {
            result.cancelled = true;
            break;
        }
        let Some(path) = paths.next() else {
            break;
        };
        let outcome = process_file(&path, source, options.include_full_probe, events);
        record_outcome(&mut result, &path, outcome, events);
    }

    finish(result, events)
}

/// Probes `paths` on a pool of `options.jobs` threads.
///
/// Workers only probe; outcomes are folded afterwards in the order of
/// `paths`, so the result and the counted/skipped events match what
/// [`aggregate`] produces for the same input. Fails only when the thread pool
/// cannot be built.
pub fn aggregate_parallel(
    paths: &[PathBuf],
    source: &(dyn ProbeSource + Sync),
    options: &AggregateOptions,
    events: &EventDispatcher,
) -> CoreResult<AggregateResult> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.max(1))
        .thread_name(|i| format!("mediadur-probe-{i}"))
        .build()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to build thread pool: {e}")))?;

    log::debug!(
        "Probing {} file(s) on {} thread(s)",
        paths.len(),
        pool.current_num_threads()
    );

    // None marks a path left unprobed after cancellation
    let outcomes: Vec<Option<FileOutcome>> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                if options.cancel.is_cancelled() {
                    return None;
                }
                Some(process_file(path, source, options.include_full_probe, events))
            })
            .collect()
    });

    let mut result = AggregateResult::default();
    for (path, outcome) in paths.iter().zip(outcomes) {
        match outcome {
            Some(outcome) => record_outcome(&mut result, path, outcome, events),
            None => result.cancelled = true,
        }
    }

    Ok(finish(result, events))
}

/// Sequential when `options.jobs` is 1, parallel otherwise.
pub fn aggregate_files(
    paths: &[PathBuf],
    source: &(dyn ProbeSource + Sync),
    options: &AggregateOptions,
    events: &EventDispatcher,
) -> CoreResult<AggregateResult> {
    if options.jobs <= 1 {
        Ok(aggregate(paths.iter().cloned(), source, options, events))
    } else {
        aggregate_parallel(paths, source, options, events)
    }
}

/// Validates `config`, discovers its inputs and aggregates them.
///
/// With one job, discovery stays lazy and is interleaved with probing.
pub fn process_media_files(
    config: &CoreConfig,
    source: &(dyn ProbeSource + Sync),
    events: &EventDispatcher,
    cancel: CancellationToken,
) -> CoreResult<AggregateResult> {
    config.validate()?;

    let options = AggregateOptions {
        cancel,
        ..AggregateOptions::from(config)
    };
    let files = crate::discovery::discover_media_files_with(
        config.input_paths(),
        config.extensions.clone(),
        config.allow_all,
        config.recurse,
    );

    if options.jobs <= 1 {
        Ok(aggregate(files, source, &options, events))
    } else {
        let files: Vec<PathBuf> = files.collect();
        aggregate_parallel(&files, source, &options, events)
    }
}

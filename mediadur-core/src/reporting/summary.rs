//! Summary reporting module
//!
//! Renders the human-readable totals block printed after a run, and the bare
//! frame count used by count mode.

use crate::error::CoreResult;
use crate::processing::AggregateResult;
use crate::timecode::display_timecode;
use crate::utils::{format_thousands, join_values};

/// Indent of the value column, so continuation lines line up under it.
const VALUE_COLUMN: usize = 25;

fn push_line(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("\n    {:<21}{value}", format!("{label}:")));
}

/// Formats the totals block.
///
/// The block starts with a newline. Optional lines are left out when they
/// would be empty, and the duration lines list one framerate bucket each in
/// ascending fps order.
///
/// ```
/// use mediadur_core::processing::AggregateResult;
/// use mediadur_core::reporting::format_summary;
///
/// let summary = format_summary(&AggregateResult::default()).unwrap();
/// assert_eq!(summary, "\n    Files counted:       0");
/// ```
pub fn format_summary(result: &AggregateResult) -> CoreResult<String> {
    let mut out = String::from("\n");
    out.push_str(&format!("    {:<21}{}", "Files counted:", result.count_files));

    if result.count_files_skipped > 0 {
        push_line(
            &mut out,
            "Files skipped",
            &result.count_files_skipped.to_string(),
        );
    }

    if !result.count_framerates.is_empty() {
        let found = format!(
            "{} ({})",
            result.count_framerates.len(),
            join_values(result.count_framerates.keys())
        );
        push_line(&mut out, "Framerates found", &found);
    }

    if result.count_frames > 0 {
        push_line(
            &mut out,
            "Total framecount",
            &format_thousands(result.count_frames),
        );
    }

    if !result.count_frames_by_framerate.is_empty() {
        let mut lines = Vec::with_capacity(result.count_frames_by_framerate.len());
        for (&fps, &frames) in &result.count_frames_by_framerate {
            let timecode = display_timecode(fps as f64, frames, None)?;
            lines.push(format!("{timecode} @ {fps} FPS"));
        }
        let separator = format!("\n{}", " ".repeat(VALUE_COLUMN));
        push_line(&mut out, "Total duration", &lines.join(&separator));
    }

    Ok(out)
}

/// The total frame count on its own.
#[must_use]
pub fn format_count(result: &AggregateResult) -> String {
    result.count_frames.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::FileSummary;
    use std::path::PathBuf;

    fn file(fps: u64, frame_count: u64) -> FileSummary {
        FileSummary {
            duration_timecode: String::new(),
            filepath: PathBuf::from(format!("{fps}-{frame_count}.mov")),
            fps,
            frame_count,
            probe: None,
        }
    }

    #[test]
    fn test_summary_single_rate() {
        let mut result = AggregateResult::default();
        result.add_file(file(25, 750)).unwrap();
        result.add_file(file(25, 3000)).unwrap();

        assert_eq!(
            format_summary(&result).unwrap(),
            "\n    Files counted:       2\
             \n    Framerates found:    1 (25)\
             \n    Total framecount:    3,750\
             \n    Total duration:      00:02:30:00 @ 25 FPS"
        );
    }

    #[test]
    fn test_summary_multiple_rates_and_skips() {
        let mut result = AggregateResult::default();
        result.add_file(file(30, 300)).unwrap();
        result.add_file(file(24, 240)).unwrap();
        result.add_skipped();

        let expected = [
            "",
            "    Files counted:       2",
            "    Files skipped:       1",
            "    Framerates found:    2 (24, 30)",
            "    Total framecount:    540",
            "    Total duration:      00:00:10:00 @ 24 FPS",
            "                         00:00:10:00 @ 30 FPS",
        ]
        .join("\n");
        assert_eq!(format_summary(&result).unwrap(), expected);
    }

    #[test]
    fn test_summary_only_skips() {
        let mut result = AggregateResult::default();
        result.add_skipped();
        assert_eq!(
            format_summary(&result).unwrap(),
            "\n    Files counted:       0\n    Files skipped:       1"
        );
    }

    #[test]
    fn test_format_count() {
        let mut result = AggregateResult::default();
        assert_eq!(format_count(&result), "0");
        result.add_file(file(25, 3750)).unwrap();
        assert_eq!(format_count(&result), "3750");
    }
}

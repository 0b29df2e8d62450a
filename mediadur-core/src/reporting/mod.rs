//! Reports rendered from an [`AggregateResult`].
//!
//! Text output lives in [`summary`]; this module defines the JSON documents
//! printed in JSON mode.

pub mod summary;

pub use summary::{format_count, format_summary};

use crate::error::CoreResult;
use crate::processing::{AggregateResult, FileSummary};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    NoMediaFilesFound,
}

/// Full JSON report.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum JsonReport<'a> {
    Ok {
        #[serde(flatten)]
        result: &'a AggregateResult,
        status: ReportStatus,
    },
    NoMediaFilesFound {
        count_frames: u64,
        count_frames_by_framerate: BTreeMap<u64, u64>,
        files: Vec<FileSummary>,
        status: ReportStatus,
    },
}

impl<'a> JsonReport<'a> {
    pub fn ok(result: &'a AggregateResult) -> Self {
        JsonReport::Ok {
            result,
            status: ReportStatus::Ok,
        }
    }

    pub fn no_media_files_found() -> Self {
        JsonReport::NoMediaFilesFound {
            count_frames: 0,
            count_frames_by_framerate: BTreeMap::new(),
            files: Vec::new(),
            status: ReportStatus::NoMediaFilesFound,
        }
    }

    pub fn to_json_string(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Frame totals only, for count mode.
#[derive(Debug, Serialize)]
pub struct JsonCountReport<'a> {
    pub count_frames: u64,
    pub count_frames_by_framerate: &'a BTreeMap<u64, u64>,
    pub status: ReportStatus,
}

impl<'a> JsonCountReport<'a> {
    pub fn new(result: &'a AggregateResult) -> Self {
        Self {
            count_frames: result.count_frames,
            count_frames_by_framerate: &result.count_frames_by_framerate,
            status: ReportStatus::Ok,
        }
    }

    pub fn to_json_string(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::path::PathBuf;

    fn sample() -> AggregateResult {
        let mut result = AggregateResult::default();
        result.add_file(FileSummary {
            duration_timecode: "00:00:30:00".to_string(),
            filepath: PathBuf::from("a.mov"),
            fps: 25,
            frame_count: 750,
            probe: None,
        })
        .unwrap();
        result.add_skipped();
        result
    }

    #[test]
    fn test_ok_report() {
        let result = sample();
        let json: Value =
            serde_json::from_str(&JsonReport::ok(&result).to_json_string().unwrap()).unwrap();
        assert_eq!(
            json,
            json!({
                "count_files": 1,
                "count_files_skipped": 1,
                "count_framerates": { "25": 1 },
                "count_frames": 750,
                "count_frames_by_framerate": { "25": 750 },
                "files": [
                    { "duration_timecode": "00:00:30:00", "filepath": "a.mov", "fps": 25, "frame_count": 750 }
                ],
                "status": "ok"
            })
        );
    }

    #[test]
    fn test_ok_report_keys_sorted() {
        let result = sample();
        let text = JsonReport::ok(&result).to_json_string().unwrap();
        assert!(text.starts_with(r#"{"count_files":1,"count_files_skipped":1,"#));
        assert!(text.ends_with(r#""status":"ok"}"#));
    }

    #[test]
    fn test_no_media_report() {
        assert_eq!(
            JsonReport::no_media_files_found().to_json_string().unwrap(),
            r#"{"count_frames":0,"count_frames_by_framerate":{},"files":[],"status":"no_media_files_found"}"#
        );
    }

    #[test]
    fn test_count_report() {
        let result = sample();
        assert_eq!(
            JsonCountReport::new(&result).to_json_string().unwrap(),
            r#"{"count_frames":750,"count_frames_by_framerate":{"25":750},"status":"ok"}"#
        );
    }
}

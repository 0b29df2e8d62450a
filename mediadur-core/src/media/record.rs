//! Validated per-file media records.
//!
//! A [`MediaFileRecord`] only exists for a probe that carries everything the
//! aggregation needs: a positive frame count, frame rate and stream duration
//! for the first video stream, plus a parseable container duration. Anything
//! else is reported as a [`ValidationError`] and the file is skipped.

use crate::media::probe::{ProbeResult, ProbeStream};
use crate::timecode;
use crate::CoreResult;

use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a probe result could not become a [`MediaFileRecord`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("No video stream for this file")]
    NoVideoStream,

    #[error("Container duration is missing")]
    MissingContainerDuration,

    #[error("Video stream has no {0}")]
    MissingField(&'static str),

    #[error("Could not parse {field} from '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Frame rate '{0}' is not a numerator/denominator fraction")]
    InvalidFrameRateFraction(String),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}

/// Frame count, frame rate and duration of one media file.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFileRecord {
    pub filepath: PathBuf,
    /// Integer frame rate of the first video stream
    pub fps: u64,
    /// Declared frame count of the first video stream
    pub frame_count: u64,
    /// Duration of the first video stream in seconds
    pub duration_seconds: f64,
    /// Duration of the container in seconds
    pub container_duration_seconds: f64,
}

impl MediaFileRecord {
    /// Validates `probe` and builds the record for `filepath`.
    ///
    /// Container/stream duration agreement with `frame_count / fps` is not
    /// checked.
    pub fn build(filepath: &Path, probe: &ProbeResult) -> Result<Self, ValidationError> {
        let container_duration_seconds = probe
            .format_duration
            .as_ref()
            .ok_or(ValidationError::MissingContainerDuration)
            .and_then(|value| parse_f64("container duration", value))?;

        let video_stream = probe
            .first_video_stream()
            .ok_or(ValidationError::NoVideoStream)?;

        let frame_count = frame_count_from_stream(video_stream)?;

        let fps = video_stream
            .r_frame_rate
            .as_deref()
            .ok_or(ValidationError::MissingField("r_frame_rate"))
            .and_then(fps_from_frame_rate_fraction)?;

        let duration_seconds = video_stream
            .duration
            .as_ref()
            .ok_or(ValidationError::MissingField("duration"))
            .and_then(|value| parse_f64("duration", value))?;
        if duration_seconds <= 0.0 {
            return Err(ValidationError::NotPositive("duration"));
        }

        Ok(Self {
            filepath: filepath.to_path_buf(),
            fps,
            frame_count,
            duration_seconds,
            container_duration_seconds,
        })
    }

    /// Whether the record satisfies the aggregation requirements. Always true
    /// for records produced by [`MediaFileRecord::build`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fps > 0 && self.frame_count > 0 && self.duration_seconds > 0.0
    }

    /// The frame count rendered as a duration timecode at the record's fps.
    pub fn duration_timecode(&self) -> CoreResult<String> {
        timecode::display_timecode(self.fps as f64, self.frame_count, None)
    }
}

/// Computes the integer fps of an ffprobe `r_frame_rate` value.
///
/// The value is computed as `round(numerator * denominator)`. This matches
/// the tool's historical output for fractions reduced to `N/1`, but differs
/// from `numerator / denominator` for NTSC rates such as `30000/1001`.
pub fn fps_from_frame_rate_fraction(fraction: &str) -> Result<u64, ValidationError> {
    let invalid = || ValidationError::InvalidFrameRateFraction(fraction.to_string());

    let (numerator, denominator) = fraction.split_once('/').ok_or_else(invalid)?;
    if denominator.contains('/') {
        return Err(invalid());
    }
    let numerator: f64 = numerator.trim().parse().map_err(|_| invalid())?;
    let denominator: f64 = denominator.trim().parse().map_err(|_| invalid())?;

    let fps = (numerator * denominator).round();
    if !fps.is_finite() {
        return Err(invalid());
    }
    if fps < 1.0 {
        return Err(ValidationError::NotPositive("fps"));
    }
    Ok(fps as u64)
}

fn frame_count_from_stream(stream: &ProbeStream) -> Result<u64, ValidationError> {
    let value = stream
        .nb_frames
        .as_ref()
        .ok_or(ValidationError::MissingField("nb_frames"))?;

    let frame_count = match value {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
    .ok_or_else(|| ValidationError::InvalidNumber {
        field: "nb_frames",
        value: display_value(value),
    })?;

    if frame_count == 0 {
        return Err(ValidationError::NotPositive("nb_frames"));
    }
    Ok(frame_count)
}

fn parse_f64(field: &'static str, value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            field,
            value: display_value(value),
        })
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

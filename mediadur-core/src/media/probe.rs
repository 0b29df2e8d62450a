//! Probe result model.
//!
//! A [`ProbeResult`] is the part of an ffprobe `-show_format -show_streams`
//! payload that record validation reads, plus the untouched payload itself for
//! callers that want to pass it through.

use crate::error::{CoreError, CoreResult};

use serde_json::Value;

/// One stream entry of a probe payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeStream {
    /// Stream kind as reported by the prober ("video", "audio", ...)
    pub codec_type: Option<String>,
    /// Declared frame count; ffprobe reports it as a string, other sources as a number
    pub nb_frames: Option<Value>,
    /// Rational frame rate string, e.g. "25/1"
    pub r_frame_rate: Option<String>,
    /// Stream duration in seconds, as a string or number
    pub duration: Option<Value>,
}

impl ProbeStream {
    /// True when `codec_type` is "video".
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.codec_type.as_deref() == Some("video")
    }
}

/// Container and stream information for one probed file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// Container-level duration in seconds
    pub format_duration: Option<Value>,
    /// Streams in the order the prober listed them
    pub streams: Vec<ProbeStream>,
    /// The complete payload as received
    pub raw: Value,
}

impl ProbeResult {
    /// Builds a probe result from ffprobe-shaped JSON.
    ///
    /// Missing fields become `None`; only a payload that is not a JSON object
    /// is rejected.
    pub fn from_json(json: Value) -> CoreResult<Self> {
        if !json.is_object() {
            return Err(CoreError::Probe(format!(
                "expected a JSON object from the prober, got: {json}"
            )));
        }

        let format_duration = non_null(&json["format"]["duration"]);

        let streams = json["streams"]
            .as_array()
            .map(|streams| streams.iter().map(stream_from_json).collect())
            .unwrap_or_default();

        Ok(Self {
            format_duration,
            streams,
            raw: json,
        })
    }

    /// Parses a raw ffprobe JSON document.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| CoreError::JsonParse(format!("probe output: {e}")))?;
        Self::from_json(value)
    }

    /// The first stream whose codec type is "video".
    #[must_use]
    pub fn first_video_stream(&self) -> Option<&ProbeStream> {
        self.streams.iter().find(|s| s.is_video())
    }
}

fn stream_from_json(stream: &Value) -> ProbeStream {
    ProbeStream {
        codec_type: stream["codec_type"].as_str().map(ToString::to_string),
        nb_frames: non_null(&stream["nb_frames"]),
        r_frame_rate: stream["r_frame_rate"].as_str().map(ToString::to_string),
        duration: non_null(&stream["duration"]),
    }
}

fn non_null(value: &Value) -> Option<Value> {
    (!value.is_null()).then(|| value.clone())
}

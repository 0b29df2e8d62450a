// Shared fixtures for mediadur-core integration tests.
#![allow(dead_code)]

use mediadur_core::error::{CoreError, CoreResult};
use mediadur_core::external::ProbeSource;
use mediadur_core::media::ProbeResult;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Probe source that answers from canned ffprobe payloads keyed by path.
#[derive(Default)]
pub struct FakeProbeSource {
    payloads: HashMap<PathBuf, Value>,
    probed: Mutex<Vec<PathBuf>>,
}

impl FakeProbeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, payload: Value) -> Self {
        self.payloads.insert(path.into(), payload);
        self
    }

    /// Paths probed so far, in call order.
    pub fn probed(&self) -> Vec<PathBuf> {
        self.probed.lock().unwrap().clone()
    }
}

impl ProbeSource for FakeProbeSource {
    fn probe(&self, path: &Path) -> CoreResult<ProbeResult> {
        self.probed.lock().unwrap().push(path.to_path_buf());
        match self.payloads.get(path) {
            Some(payload) => ProbeResult::from_json(payload.clone()),
            None => Err(CoreError::Probe(format!(
                "{}: Invalid data found when processing input",
                path.display()
            ))),
        }
    }
}

/// ffprobe-shaped payload with one video and one audio stream.
pub fn video_payload(frames: u64, rate: &str, seconds: f64) -> Value {
    json!({
        "format": { "duration": format!("{seconds:.6}"), "format_name": "mov,mp4,m4a,3gp,3g2,mj2" },
        "streams": [
            {
                "index": 0,
                "codec_type": "video",
                "codec_name": "prores",
                "nb_frames": frames.to_string(),
                "r_frame_rate": rate,
                "duration": format!("{seconds:.6}")
            },
            { "index": 1, "codec_type": "audio", "codec_name": "pcm_s24le", "duration": format!("{seconds:.6}") }
        ]
    })
}

pub fn audio_payload(seconds: f64) -> Value {
    json!({
        "format": { "duration": format!("{seconds:.6}") },
        "streams": [ { "index": 0, "codec_type": "audio", "duration": format!("{seconds:.6}") } ]
    })
}

//! FFprobe integration for media probing
//!
//! This module defines the [`ProbeSource`] seam used by the aggregation engine
//! and its production implementation, which runs the `ffprobe` binary and keeps
//! its JSON output exactly as printed.
use crate::error::{CoreResult, command_failed_error, command_start_error};
use crate::media::probe::ProbeResult;
use std::path::Path;
use std::process::Command;

/// Something that can describe a media file's container and streams.
///
/// Implementations must be deterministic for a given file; failures are not
/// retried.
pub trait ProbeSource {
    /// Probes `path`. Errors cover tool start failures, non-zero exits and
    /// malformed output.
    fn probe(&self, path: &Path) -> CoreResult<ProbeResult>;
}

impl<T: ProbeSource + ?Sized> ProbeSource for &T {
    fn probe(&self, path: &Path) -> CoreResult<ProbeResult> {
        (**self).probe(path)
    }
}

/// [`ProbeSource`] that runs the `ffprobe` binary found on `PATH`.
#[derive(Debug, Clone)]
pub struct FfprobeSource {
    program: String,
}

impl Default for FfprobeSource {
    fn default() -> Self {
        Self::with_program("ffprobe")
    }
}

impl FfprobeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `program` instead of `ffprobe`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ProbeSource for FfprobeSource {
    fn probe(&self, path: &Path) -> CoreResult<ProbeResult> {
        log::debug!("Running {} on: {}", self.program, path.display());

        let output = Command::new(&self.program)
            .args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path)
            .output()
            .map_err(|e| command_start_error(self.program.as_str(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::debug!("{} failed on {}: {}", self.program, path.display(), stderr);
            return Err(command_failed_error(self.program.as_str(), output.status, stderr));
        }

        parse_ffprobe_output(&output.stdout)
    }
}

/// Parses the stdout of `ffprobe -print_format json` into a [`ProbeResult`].
///
/// The document is kept as printed in [`ProbeResult::raw`], tags and all.
/// Output that is not JSON is a [`CoreError::JsonParse`](crate::CoreError::JsonParse).
pub fn parse_ffprobe_output(stdout: &[u8]) -> CoreResult<ProbeResult> {
    ProbeResult::from_json_str(&String::from_utf8_lossy(stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use serde_json::json;

    // Trimmed ffprobe output for a QuickTime file, in the order ffprobe prints keys.
    const QUICKTIME_OUTPUT: &str = r#"{"streams":[{"index":0,"codec_name":"prores","codec_type":"video","r_frame_rate":"24000/1001","duration":"10.010000","nb_frames":"240","tags":{"language":"und","handler_name":"Core Media Video","vendor_id":"appl","timecode":"01:00:00:00"}},{"index":1,"codec_type":"data","tags":{"timecode":"01:00:00:00"}}],"format":{"filename":"a.mov","nb_streams":2,"format_name":"mov,mp4,m4a,3gp,3g2,mj2","duration":"10.010000","tags":{"major_brand":"qt  ","com.apple.quicktime.make":"Apple"}}}"#;

    #[test]
    fn test_parse_keeps_payload_as_printed() {
        let probe = parse_ffprobe_output(QUICKTIME_OUTPUT.as_bytes()).unwrap();

        assert_eq!(serde_json::to_string(&probe.raw).unwrap(), QUICKTIME_OUTPUT);
        assert_eq!(probe.raw["streams"][0]["tags"]["vendor_id"], "appl");
        assert_eq!(probe.raw["format"]["tags"]["com.apple.quicktime.make"], "Apple");
        assert_eq!(probe.streams.len(), 2);
        assert_eq!(probe.format_duration, Some(json!("10.010000")));
    }

    #[test]
    fn test_parse_string_frame_count() {
        let probe = parse_ffprobe_output(QUICKTIME_OUTPUT.as_bytes()).unwrap();
        let video = probe.first_video_stream().unwrap();

        assert_eq!(video.nb_frames, Some(json!("240")));
        assert_eq!(video.r_frame_rate.as_deref(), Some("24000/1001"));
        assert_eq!(video.duration, Some(json!("10.010000")));
    }

    #[test]
    fn test_parse_stream_with_missing_fields() {
        let stdout = br#"{"streams":[{"index":0,"codec_type":"video"}],"format":{}}"#;
        let probe = parse_ffprobe_output(stdout).unwrap();
        let video = probe.first_video_stream().unwrap();

        assert_eq!(video.nb_frames, None);
        assert_eq!(video.r_frame_rate, None);
        assert_eq!(video.duration, None);
        assert_eq!(probe.format_duration, None);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let stdout = b"a.mov: Invalid data found when processing input\n";
        assert!(matches!(
            parse_ffprobe_output(stdout),
            Err(CoreError::JsonParse(_))
        ));
        assert!(matches!(parse_ffprobe_output(b""), Err(CoreError::JsonParse(_))));
    }

    #[test]
    fn test_missing_program_fails_to_start() {
        let source = FfprobeSource::with_program("mediadur-no-such-ffprobe");
        let err = source.probe(Path::new("a.mov")).unwrap_err();
        assert!(matches!(err, CoreError::CommandStart(ref cmd, _) if cmd == "mediadur-no-such-ffprobe"));
    }
}

//! Frame count to SMPTE timecode rendering.
//!
//! Timecodes are rendered as `HH:MM:SS:FF`, or `HH:MM:SS;FF` when drop-frame
//! numbering is used. Drop-frame numbering is applied automatically for the
//! NTSC-derived rates 29.97 and 59.94: two (or four) frame numbers are skipped
//! at the start of every minute except each tenth minute, keeping the displayed
//! clock aligned with wall-clock time.
//!
//! Hours are not wrapped at 24 because rendered values are durations, not
//! times of day.

use crate::error::{CoreError, CoreResult};

use std::fmt;

/// Frames added to an inclusive frame count before it is rendered for display.
///
/// [`render`] treats its input as a 1-based count and so reports one frame
/// short for an inclusive count of frames. Only display paths apply this;
/// aggregated totals never include it.
pub const DISPLAY_FRAME_ADJUSTMENT: u64 = 1;

/// Nominal rates that use drop-frame numbering unless forced otherwise.
const NTSC_DROP_FRAME_RATES: [f64; 2] = [29.97, 59.94];

/// How close a rate must be to an NTSC rate to be treated as one.
/// Covers both `29.97` and `30000/1001`.
const NTSC_RATE_TOLERANCE: f64 = 0.005;

/// A validated, positive frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate {
    fps: f64,
}

impl FrameRate {
    /// Validates `fps`; zero, negative, NaN and infinite rates are rejected.
    pub fn new(fps: f64) -> CoreResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(CoreError::InvalidFrameRate(fps));
        }
        Ok(Self { fps })
    }

    /// The rate as given.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Integer frames-per-second used for counting, e.g. 30 for 29.97.
    #[must_use]
    pub fn timebase(&self) -> u64 {
        (self.fps.round() as u64).max(1)
    }

    /// Whether this rate uses drop-frame numbering by default.
    #[must_use]
    pub fn is_drop_frame_rate(&self) -> bool {
        NTSC_DROP_FRAME_RATES
            .iter()
            .any(|rate| (self.fps - rate).abs() < NTSC_RATE_TOLERANCE)
    }

    /// Frame numbers skipped per minute in drop-frame mode: 2 per 30 of timebase.
    fn dropped_frames_per_minute(&self) -> Option<u64> {
        let timebase = self.timebase();
        (timebase % 30 == 0).then(|| timebase / 15)
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fps)
    }
}

/// A rendered timecode position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timecode {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub frames: u64,
    pub drop_frame: bool,
}

impl Timecode {
    /// Converts a 0-based frame number into a timecode at `rate`.
    pub fn from_frame_number(
        frame_number: u64,
        rate: FrameRate,
        drop_frame: bool,
    ) -> CoreResult<Self> {
        let timebase = rate.timebase();
        let overflow = || CoreError::TimecodeOverflow(frame_number);
        let mut frame_number = frame_number;

        if drop_frame {
            let drop = rate
                .dropped_frames_per_minute()
                .ok_or(CoreError::DropFrameUnsupported(rate.fps()))?;
            // drop < timebase, so the subtractions cannot underflow
            let frames_per_minute = timebase.checked_mul(60).ok_or_else(overflow)? - drop;
            let frames_per_10_minutes = timebase.checked_mul(600).ok_or_else(overflow)? - drop * 9;

            let ten_minute_blocks = frame_number / frames_per_10_minutes;
            let remainder = frame_number % frames_per_10_minutes;

            let mut skipped = (drop * 9).checked_mul(ten_minute_blocks);
            if remainder > drop {
                let in_block = drop * ((remainder - drop) / frames_per_minute);
                skipped = skipped.and_then(|s| s.checked_add(in_block));
            }
            frame_number = skipped
                .and_then(|s| frame_number.checked_add(s))
                .ok_or_else(overflow)?;
        }

        let total_seconds = frame_number / timebase;
        Ok(Self {
            hours: total_seconds / 3600,
            minutes: (total_seconds / 60) % 60,
            seconds: total_seconds % 60,
            frames: frame_number % timebase,
            drop_frame,
        })
    }

    /// `;` for drop-frame, `:` otherwise.
    #[must_use]
    pub fn separator(&self) -> char {
        if self.drop_frame { ';' } else { ':' }
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours,
            self.minutes,
            self.seconds,
            self.separator(),
            self.frames
        )
    }
}

/// Renders `frames`, a 1-based frame count, as a timecode at `fps`.
///
/// `drop_frame_override` forces drop-frame (`Some(true)`) or non-drop-frame
/// (`Some(false)`) numbering; `None` picks drop-frame for 29.97 and 59.94.
/// A count of zero renders `00:00:00:00`.
pub fn render(fps: f64, frames: u64, drop_frame_override: Option<bool>) -> CoreResult<String> {
    let rate = FrameRate::new(fps)?;
    let drop_frame = drop_frame_override.unwrap_or_else(|| rate.is_drop_frame_rate());
    let timecode = Timecode::from_frame_number(frames.saturating_sub(1), rate, drop_frame)?;
    Ok(timecode.to_string())
}

/// Renders an inclusive frame count as a duration timecode, applying
/// [`DISPLAY_FRAME_ADJUSTMENT`]. Use for display only.
///
/// ```rust
/// use mediadur_core::timecode::display_timecode;
///
/// assert_eq!(display_timecode(25.0, 750, None).unwrap(), "00:00:30:00");
/// assert_eq!(display_timecode(29.97, 10000, None).unwrap(), "00:05:33;20");
/// ```
pub fn display_timecode(
    fps: f64,
    frame_count: u64,
    drop_frame_override: Option<bool>,
) -> CoreResult<String> {
    render(
        fps,
        frame_count.saturating_add(DISPLAY_FRAME_ADJUSTMENT),
        drop_frame_override,
    )
}

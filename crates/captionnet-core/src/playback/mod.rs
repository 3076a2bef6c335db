//! Playback Module
//!
//! The transport state machine, the seam to the video playback surface,
//! and the periodic playhead sample that feeds the timeline and overlay.

mod cycler;

pub use cycler::{spawn_caption_cycler, CyclerHandle, CAPTION_CYCLE_INTERVAL};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    segments::SegmentTrack,
    timeline::{self, format_timecode, OverlayUpdate, TimelineScale},
    Px, TimeSec,
};

/// Polling interval for playhead and caption sync
pub const PLAYHEAD_TICK: Duration = Duration::from_millis(50);

// =============================================================================
// Transport
// =============================================================================

/// Playback/edit transport state. Two states only; the session ends with
/// the process, there is no terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Transport {
    Playing,
    #[default]
    Paused,
}

impl Transport {
    pub fn is_playing(&self) -> bool {
        matches!(self, Transport::Playing)
    }

    /// Flips between playing and paused
    pub fn toggled(&self) -> Transport {
        match self {
            Transport::Playing => Transport::Paused,
            Transport::Paused => Transport::Playing,
        }
    }
}

// =============================================================================
// Playback Surface
// =============================================================================

/// The external video player collaborator.
///
/// The engine reads the clock and duration from here and writes seek
/// targets back; the surface is the sole mutator of the playback clock.
/// `play`/`pause` carry no result, the surface may reject them
/// asynchronously.
pub trait PlaybackSurface {
    fn current_time(&self) -> TimeSec;
    fn set_current_time(&mut self, time_sec: TimeSec);
    fn duration(&self) -> TimeSec;
    fn paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
}

/// Headless stand-in for a real video element.
///
/// The clock only moves forward while playing, and lands exactly on the
/// last seek target, so tick-level reads are monotonically non-decreasing
/// between seeks.
#[derive(Clone, Debug)]
pub struct SimulatedPlayer {
    current_time: TimeSec,
    duration: TimeSec,
    playing: bool,
}

impl SimulatedPlayer {
    pub fn new(duration: TimeSec) -> Self {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        Self {
            current_time: 0.0,
            duration,
            playing: false,
        }
    }

    /// Advances the clock by `dt` seconds of wall time while playing,
    /// pausing at the end of the video.
    pub fn advance(&mut self, dt: TimeSec) {
        if !self.playing || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.current_time = (self.current_time + dt).min(self.duration);
        if self.current_time >= self.duration {
            self.playing = false;
        }
    }
}

impl PlaybackSurface for SimulatedPlayer {
    fn current_time(&self) -> TimeSec {
        self.current_time
    }

    fn set_current_time(&mut self, time_sec: TimeSec) {
        self.current_time = timeline::clamp_seek(time_sec, self.duration);
    }

    fn duration(&self) -> TimeSec {
        self.duration
    }

    fn paused(&self) -> bool {
        !self.playing
    }

    fn play(&mut self) {
        if self.current_time < self.duration {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}

// =============================================================================
// Playhead Frame
// =============================================================================

/// One playhead sample, computed every [`PLAYHEAD_TICK`].
///
/// Pure with respect to its inputs; rendering the result is the caller's
/// concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayheadFrame {
    pub time_sec: TimeSec,
    /// Playhead position on the track
    pub position_px: Px,
    /// Transport display string, `MM:SS.d`
    pub timecode: String,
    /// Overlay state derived from the caption track
    pub caption: OverlayUpdate,
}

impl PlayheadFrame {
    pub fn sample(
        surface: &impl PlaybackSurface,
        track: &SegmentTrack,
        scale: &TimelineScale,
    ) -> Self {
        let time_sec = surface.current_time();
        Self {
            time_sec,
            position_px: scale.time_to_pixel(time_sec),
            timecode: format_timecode(time_sec),
            caption: timeline::overlay_update(time_sec, &track.segments),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Timeline Scale
//!
//! Linear seconds-to-pixels mapping shared by every timeline consumer.
//! The scale is a session-wide constant; there is no dynamic zoom, so
//! cached pixel positions never need re-derivation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Px, TimeSec};

/// Default timeline density: 100 px of track per second of video
pub const DEFAULT_PX_PER_SEC: f64 = 100.0;

/// Fixed pixel-per-second projection of the timeline
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineScale {
    px_per_sec: f64,
}

impl TimelineScale {
    /// Creates a scale, falling back to the default for a non-positive or
    /// non-finite density.
    pub fn new(px_per_sec: f64) -> Self {
        if px_per_sec.is_finite() && px_per_sec > 0.0 {
            Self { px_per_sec }
        } else {
            warn!(px_per_sec, "Invalid timeline scale, using default");
            Self {
                px_per_sec: DEFAULT_PX_PER_SEC,
            }
        }
    }

    pub fn px_per_sec(&self) -> f64 {
        self.px_per_sec
    }

    /// Projects a time onto the track. Negative or non-finite input clamps
    /// to the origin.
    pub fn time_to_pixel(&self, time_sec: TimeSec) -> Px {
        sanitize(time_sec) * self.px_per_sec
    }

    /// Inverse of [`time_to_pixel`](Self::time_to_pixel), with the same
    /// clamping.
    pub fn pixel_to_time(&self, px: Px) -> TimeSec {
        sanitize(px) / self.px_per_sec
    }
}

impl Default for TimelineScale {
    fn default() -> Self {
        Self {
            px_per_sec: DEFAULT_PX_PER_SEC,
        }
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Formats seconds as the transport display string, `MM:SS.d`
pub fn format_timecode(seconds: TimeSec) -> String {
    let seconds = sanitize(seconds);
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let tenths = ((seconds % 1.0) * 10.0).floor() as u64;
    format!("{:02}:{:02}.{}", mins, secs, tenths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_pixel_round_trip() {
        let scale = TimelineScale::default();
        for t in [0.0, 0.5, 1.0, 2.75, 123.4] {
            let round_tripped = scale.pixel_to_time(scale.time_to_pixel(t));
            assert!((round_tripped - t).abs() < 1e-9);
        }
    }

    #[test]
    fn test_projection_is_linear() {
        let scale = TimelineScale::new(100.0);
        assert_eq!(scale.time_to_pixel(2.5), 250.0);
        assert_eq!(scale.pixel_to_time(250.0), 2.5);
    }

    #[test]
    fn test_invalid_input_clamps_to_origin() {
        let scale = TimelineScale::default();
        assert_eq!(scale.time_to_pixel(-3.0), 0.0);
        assert_eq!(scale.time_to_pixel(f64::NAN), 0.0);
        assert_eq!(scale.pixel_to_time(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_invalid_scale_falls_back_to_default() {
        assert_eq!(TimelineScale::new(0.0).px_per_sec(), DEFAULT_PX_PER_SEC);
        assert_eq!(TimelineScale::new(-5.0).px_per_sec(), DEFAULT_PX_PER_SEC);
        assert_eq!(
            TimelineScale::new(f64::NAN).px_per_sec(),
            DEFAULT_PX_PER_SEC
        );
    }

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(0.0), "00:00.0");
        assert_eq!(format_timecode(65.43), "01:05.4");
        assert_eq!(format_timecode(600.96), "10:00.9");
        assert_eq!(format_timecode(f64::NAN), "00:00.0");
    }
}

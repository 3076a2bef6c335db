//! Playback/Caption Synchronization
//!
//! The read side (`active_text_at`, `overlay_update`) runs on every
//! animation tick, so it is a plain scan with no per-call allocation.
//! The write side (`drag_segment`, `clamp_seek`) turns pointer gestures
//! into clamped timeline positions.

use serde::{Deserialize, Serialize};

use crate::{
    segments::CaptionSegment,
    timeline::TimelineScale,
    Px, TimeSec,
};

// =============================================================================
// Active Caption Lookup
// =============================================================================

/// Returns the overlay text for the given playback time.
///
/// Scans all segments and keeps the last one (in insertion order) whose
/// closed interval contains `time_sec`. When segments overlap, the most
/// recently inserted wins. `None` means the overlay should be hidden.
pub fn active_text_at(time_sec: TimeSec, segments: &[CaptionSegment]) -> Option<&str> {
    let mut active = None;
    for segment in segments {
        if segment.is_active_at(time_sec) {
            active = Some(segment.text.as_str());
        }
    }
    active
}

/// Update message for the video overlay render surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayUpdate {
    pub text: String,
    pub visible: bool,
}

impl OverlayUpdate {
    /// Hidden, empty overlay
    pub fn hidden() -> Self {
        Self {
            text: String::new(),
            visible: false,
        }
    }
}

/// Computes the overlay update for the given playback time
pub fn overlay_update(time_sec: TimeSec, segments: &[CaptionSegment]) -> OverlayUpdate {
    match active_text_at(time_sec, segments) {
        Some(text) => OverlayUpdate {
            text: text.to_string(),
            visible: true,
        },
        None => OverlayUpdate::hidden(),
    }
}

// =============================================================================
// Drag
// =============================================================================

/// Computes a dragged segment's new start time.
///
/// `origin_start_sec` is the segment start when the gesture began and
/// `delta_px` the signed cumulative pointer delta since then, so calling
/// this on every pointer-move is idempotent for the same delta. The left
/// edge clamps at the timeline origin; there is no right-edge clamp, a
/// segment may extend past the end of the video.
pub fn drag_segment(scale: &TimelineScale, origin_start_sec: TimeSec, delta_px: Px) -> TimeSec {
    let origin_px = scale.time_to_pixel(origin_start_sec);
    let delta_px = if delta_px.is_finite() { delta_px } else { 0.0 };
    let new_left_px = (origin_px + delta_px).max(0.0);
    scale.pixel_to_time(new_left_px)
}

// =============================================================================
// Seek
// =============================================================================

/// Clamps a click-to-seek target into `[0, total_duration]`.
///
/// Only computes the target; writing it into the playback surface is the
/// caller's job, the surface being the sole mutator of the playback clock.
pub fn clamp_seek(time_sec: TimeSec, total_duration: TimeSec) -> TimeSec {
    let total = if total_duration.is_finite() && total_duration > 0.0 {
        total_duration
    } else {
        0.0
    };
    if !time_sec.is_finite() {
        return 0.0;
    }
    time_sec.clamp(0.0, total)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::DEFAULT_PX_PER_SEC;

    fn seg(text: &str, start: f64, duration: f64) -> CaptionSegment {
        CaptionSegment::new(text, start, duration)
    }

    #[test]
    fn test_active_text_within_interval() {
        let segments = vec![seg("A", 0.0, 2.0)];
        assert_eq!(active_text_at(1.0, &segments), Some("A"));
        assert_eq!(active_text_at(2.0, &segments), Some("A"));
        assert_eq!(active_text_at(2.5, &segments), None);
    }

    #[test]
    fn test_active_text_last_match_wins() {
        let segments = vec![seg("A", 0.0, 3.0), seg("B", 1.0, 3.0)];
        // Both cover 1.5; the later insertion wins.
        assert_eq!(active_text_at(1.5, &segments), Some("B"));
        // Only A covers 0.5.
        assert_eq!(active_text_at(0.5, &segments), Some("A"));
    }

    #[test]
    fn test_active_text_result_contains_time() {
        let segments = vec![seg("A", 0.0, 1.0), seg("B", 2.0, 1.0), seg("C", 4.0, 1.0)];
        for t in [0.0, 0.5, 1.5, 2.2, 3.7, 4.9, 6.0] {
            if let Some(text) = active_text_at(t, &segments) {
                let winner = segments.iter().find(|s| s.text == text).unwrap();
                assert!(winner.is_active_at(t));
            }
        }
    }

    #[test]
    fn test_overlay_update_visibility() {
        let segments = vec![seg("A", 0.0, 2.0)];

        let shown = overlay_update(1.0, &segments);
        assert_eq!(shown.text, "A");
        assert!(shown.visible);

        let hidden = overlay_update(5.0, &segments);
        assert!(hidden.text.is_empty());
        assert!(!hidden.visible);
    }

    #[test]
    fn test_drag_clamps_at_origin() {
        let scale = TimelineScale::default();
        // pxPerSec = 100: 0.5s is 50px, a -1000px delta pins it at 0.
        let moved = drag_segment(&scale, 0.5, -1000.0);
        assert_eq!(moved, 0.0);
    }

    #[test]
    fn test_drag_moves_by_delta() {
        let scale = TimelineScale::new(DEFAULT_PX_PER_SEC);
        let moved = drag_segment(&scale, 1.0, 250.0);
        assert!((moved - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_drag_is_idempotent_for_same_delta() {
        let scale = TimelineScale::default();
        let first = drag_segment(&scale, 2.0, 130.0);
        let second = drag_segment(&scale, 2.0, 130.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_drag_has_no_upper_clamp() {
        let scale = TimelineScale::default();
        let moved = drag_segment(&scale, 1.0, 1_000_000.0);
        assert!(moved > 1000.0);
    }

    #[test]
    fn test_drag_ignores_nan_delta() {
        let scale = TimelineScale::default();
        assert_eq!(drag_segment(&scale, 2.0, f64::NAN), 2.0);
    }

    #[test]
    fn test_seek_clamps_both_ends() {
        assert_eq!(clamp_seek(-5.0, 60.0), 0.0);
        assert_eq!(clamp_seek(65.0, 60.0), 60.0);
        assert_eq!(clamp_seek(30.0, 60.0), 30.0);
    }

    #[test]
    fn test_seek_is_idempotent() {
        assert_eq!(clamp_seek(42.0, 60.0), clamp_seek(42.0, 60.0));
        let clamped = clamp_seek(999.0, 60.0);
        assert_eq!(clamp_seek(clamped, 60.0), clamped);
    }

    #[test]
    fn test_seek_handles_invalid_input() {
        assert_eq!(clamp_seek(f64::NAN, 60.0), 0.0);
        assert_eq!(clamp_seek(10.0, f64::NAN), 0.0);
        assert_eq!(clamp_seek(10.0, -1.0), 0.0);
    }
}

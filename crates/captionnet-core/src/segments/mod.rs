//! Caption Segment Module
//!
//! Data model for caption segments placed on the editor timeline:
//! - `CaptionSegment` and the append-only `SegmentTrack`
//! - Per-segment styling and the four style presets
//! - Demo seed content (English and Sinhala caption sets)
//!
//! Segment order inside a track is insertion order. The synchronizer relies
//! on that for overlap resolution, so the track never re-sorts by start time.

mod models;
mod style;

pub use models::{
    demo_captions, seed_demo_track, CaptionSegment, ColorTag, SegmentTrack, SplitMarker,
    DEFAULT_OVERLAY_DURATION_SEC, MIN_SEGMENT_DURATION_SEC,
};
pub use style::{CaptionStyle, Color, FontWeight, StylePreset};

//! Caption Segment and Track Models

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    segments::CaptionStyle, CoreError, CoreResult, Language, MarkerId, SegmentId, TimeSec, TrackId,
};

/// Default duration for a newly added text overlay, in seconds
pub const DEFAULT_OVERLAY_DURATION_SEC: TimeSec = 1.2;

/// Smallest duration a segment may have
pub const MIN_SEGMENT_DURATION_SEC: TimeSec = 0.1;

// =============================================================================
// Color Tag
// =============================================================================

/// Display color of a segment block on the timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ColorTag {
    #[default]
    Indigo,
    Blue,
    Purple,
    Pink,
    /// Used for user-added text overlays
    Green,
}

/// Cycle used when seeding the demo track
const SEED_COLOR_CYCLE: [ColorTag; 4] =
    [ColorTag::Indigo, ColorTag::Blue, ColorTag::Purple, ColorTag::Pink];

// =============================================================================
// Caption Segment
// =============================================================================

/// A caption unit placed on the timeline.
///
/// Segments are independently positioned; overlaps are permitted and
/// resolved by the synchronizer (last inserted wins).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionSegment {
    pub id: SegmentId,
    /// Display string shown on the video overlay while active
    pub text: String,
    /// Seconds from the timeline origin, never negative
    pub start_sec: TimeSec,
    /// Seconds, always positive
    pub duration_sec: TimeSec,
    pub style: CaptionStyle,
    pub color_tag: ColorTag,
}

impl CaptionSegment {
    /// Creates a new segment, clamping invalid timing instead of failing.
    pub fn new(text: &str, start_sec: TimeSec, duration_sec: TimeSec) -> Self {
        let start_sec = sanitize_start(start_sec);
        let duration_sec = sanitize_duration(duration_sec);
        Self {
            id: ulid::Ulid::new().to_string(),
            text: text.to_string(),
            start_sec,
            duration_sec,
            style: CaptionStyle::default(),
            color_tag: ColorTag::default(),
        }
    }

    pub fn with_style(mut self, style: CaptionStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_color_tag(mut self, color_tag: ColorTag) -> Self {
        self.color_tag = color_tag;
        self
    }

    /// Derived end time
    pub fn end_sec(&self) -> TimeSec {
        self.start_sec + self.duration_sec
    }

    /// Returns true if the segment covers the given time (closed interval)
    pub fn is_active_at(&self, time_sec: TimeSec) -> bool {
        time_sec >= self.start_sec && time_sec <= self.end_sec()
    }

    /// Returns true if this segment overlaps another in time
    pub fn overlaps(&self, other: &CaptionSegment) -> bool {
        self.start_sec < other.end_sec() && self.end_sec() > other.start_sec
    }

    /// Moves the segment, keeping the start non-negative. Duration is untouched.
    pub fn set_start_sec(&mut self, start_sec: TimeSec) {
        self.start_sec = sanitize_start(start_sec);
    }
}

fn sanitize_start(start_sec: TimeSec) -> TimeSec {
    if start_sec.is_finite() && start_sec >= 0.0 {
        start_sec
    } else {
        warn!(start_sec, "Invalid segment start, clamping to 0");
        0.0
    }
}

fn sanitize_duration(duration_sec: TimeSec) -> TimeSec {
    if duration_sec.is_finite() && duration_sec >= MIN_SEGMENT_DURATION_SEC {
        duration_sec
    } else {
        warn!(
            duration_sec,
            "Invalid segment duration, clamping to minimum"
        );
        MIN_SEGMENT_DURATION_SEC
    }
}

// =============================================================================
// Split Marker
// =============================================================================

/// Visual split marker dropped at the playhead.
///
/// Markers are presentation-only; they never cut segments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitMarker {
    pub id: MarkerId,
    pub time_sec: TimeSec,
}

impl SplitMarker {
    pub fn new(time_sec: TimeSec) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            time_sec: sanitize_start(time_sec),
        }
    }
}

// =============================================================================
// Segment Track
// =============================================================================

/// The caption track of the editor session.
///
/// Append-only: segments keep their insertion order (the synchronizer's
/// overlap resolution depends on it) and are never removed in the demo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentTrack {
    pub id: TrackId,
    pub name: String,
    pub segments: Vec<CaptionSegment>,
    pub markers: Vec<SplitMarker>,
    pub created_at: String,
}

impl SegmentTrack {
    /// Creates a new empty track
    pub fn new(name: &str) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            name: name.to_string(),
            segments: vec![],
            markers: vec![],
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Appends a segment and returns its ID
    pub fn add_segment(&mut self, segment: CaptionSegment) -> SegmentId {
        let id = segment.id.clone();
        self.segments.push(segment);
        id
    }

    /// Gets a segment by ID
    pub fn get_segment(&self, segment_id: &str) -> Option<&CaptionSegment> {
        self.segments.iter().find(|s| s.id == segment_id)
    }

    /// Gets a mutable segment by ID
    pub fn get_segment_mut(&mut self, segment_id: &str) -> Option<&mut CaptionSegment> {
        self.segments.iter_mut().find(|s| s.id == segment_id)
    }

    /// Segment deletion is not implemented in the demo.
    pub fn remove_segment(&mut self, _segment_id: &str) -> CoreResult<CaptionSegment> {
        Err(CoreError::NotSupported(
            "segment deletion".to_string(),
        ))
    }

    /// Drops a split marker at the given time and returns its ID
    pub fn add_split_marker(&mut self, time_sec: TimeSec) -> MarkerId {
        let marker = SplitMarker::new(time_sec);
        let id = marker.id.clone();
        self.markers.push(marker);
        id
    }

    /// Latest segment end time, 0 for an empty track
    pub fn duration(&self) -> TimeSec {
        self.segments.iter().map(|s| s.end_sec()).fold(0.0, f64::max)
    }

    /// Returns the number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the track has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

// =============================================================================
// Demo Seed
// =============================================================================

const DEMO_CAPTIONS_ENGLISH: [&str; 7] = [
    "Welcome to Caption Net!",
    "This is an AI-generated caption.",
    "Look how perfectly synced it is.",
    "You can change the style instantly.",
    "Make your videos go viral!",
    "Try the Neon style on the right.",
    "It's fast, free, and professional.",
];

const DEMO_CAPTIONS_SINHALA: [&str; 7] = [
    "ආයුබෝවන් Caption Net වෙත සාදරයෙන් පිළිගනිමු!",
    "මේ AI තාක්ෂණයෙන් ස්වයංක්‍රීයව හැදුනු උපසිරැසි.",
    "බලන්න කොච්චර ලස්සනට සින්ක් වෙනවාද කියලා.",
    "ඔයාට කැමති විදිහට ෆොන්ට් ඩිසයින් වෙනස් කරන්න පුළුවන්.",
    "දැන් ඔයාගේ Videos ලේසියෙන්ම Viral කරන්න පුළුවන්.",
    "දකුණු පැත්තේ තියෙන Neon ස්ටයිල් එක ට්‍රයි කරලා බලන්න.",
    "මේක සම්පූර්ණයෙන්ම නොමිලේ ලැබෙන සේවාවක්.",
];

/// Demo caption lines for the given language
pub fn demo_captions(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => &DEMO_CAPTIONS_ENGLISH,
        Language::Sinhala => &DEMO_CAPTIONS_SINHALA,
    }
}

/// Builds the seeded caption track shown when the editor opens.
///
/// One segment per demo line, spaced 1.8 s apart with a small jitter and
/// randomized 0.6-1.6 s durations, cycling through the block colors.
pub fn seed_demo_track(language: Language, rng: &mut impl Rng) -> SegmentTrack {
    let mut track = SegmentTrack::new("Captions");
    let style = CaptionStyle::for_language(language);

    for (i, line) in demo_captions(language).iter().enumerate() {
        let start_sec = i as f64 * 1.8 + rng.gen::<f64>() * 0.2;
        let duration_sec = 0.6 + rng.gen::<f64>() * 1.0;
        let segment = CaptionSegment::new(line, start_sec, duration_sec)
            .with_style(style.clone())
            .with_color_tag(SEED_COLOR_CYCLE[i % SEED_COLOR_CYCLE.len()]);
        track.add_segment(segment);
    }

    track
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_segment_creation() {
        let segment = CaptionSegment::new("Hello", 1.5, 2.0);
        assert!(!segment.id.is_empty());
        assert_eq!(segment.text, "Hello");
        assert_eq!(segment.start_sec, 1.5);
        assert_eq!(segment.end_sec(), 3.5);
    }

    #[test]
    fn test_segment_clamps_invalid_timing() {
        let segment = CaptionSegment::new("Bad", -4.0, 0.0);
        assert_eq!(segment.start_sec, 0.0);
        assert_eq!(segment.duration_sec, MIN_SEGMENT_DURATION_SEC);

        let segment = CaptionSegment::new("Worse", f64::NAN, f64::INFINITY);
        assert_eq!(segment.start_sec, 0.0);
        assert_eq!(segment.duration_sec, MIN_SEGMENT_DURATION_SEC);
    }

    #[test]
    fn test_segment_active_interval_is_closed() {
        let segment = CaptionSegment::new("A", 0.0, 2.0);
        assert!(segment.is_active_at(0.0));
        assert!(segment.is_active_at(1.0));
        assert!(segment.is_active_at(2.0));
        assert!(!segment.is_active_at(2.5));
    }

    #[test]
    fn test_segment_overlap() {
        let a = CaptionSegment::new("A", 0.0, 3.0);
        let b = CaptionSegment::new("B", 1.0, 3.0);
        let c = CaptionSegment::new("C", 3.0, 1.0);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // Touching but not overlapping
    }

    #[test]
    fn test_set_start_clamps_negative() {
        let mut segment = CaptionSegment::new("A", 5.0, 1.0);
        segment.set_start_sec(-10.0);
        assert_eq!(segment.start_sec, 0.0);
        assert_eq!(segment.duration_sec, 1.0);
    }

    #[test]
    fn test_track_preserves_insertion_order() {
        let mut track = SegmentTrack::new("Captions");
        track.add_segment(CaptionSegment::new("Later", 5.0, 1.0));
        track.add_segment(CaptionSegment::new("Earlier", 0.0, 1.0));

        // No sorting by start time: insertion order is the overlap tiebreak.
        assert_eq!(track.segments[0].text, "Later");
        assert_eq!(track.segments[1].text, "Earlier");
    }

    #[test]
    fn test_track_get_segment() {
        let mut track = SegmentTrack::new("Captions");
        let id = track.add_segment(CaptionSegment::new("A", 0.0, 1.0));

        assert!(track.get_segment(&id).is_some());
        assert!(track.get_segment("missing").is_none());

        track.get_segment_mut(&id).unwrap().text = "B".to_string();
        assert_eq!(track.get_segment(&id).unwrap().text, "B");
    }

    #[test]
    fn test_track_removal_is_stubbed() {
        let mut track = SegmentTrack::new("Captions");
        let id = track.add_segment(CaptionSegment::new("A", 0.0, 1.0));

        let err = track.remove_segment(&id).unwrap_err();
        assert!(matches!(err, CoreError::NotSupported(_)));
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn test_track_duration() {
        let mut track = SegmentTrack::new("Captions");
        assert_eq!(track.duration(), 0.0);

        track.add_segment(CaptionSegment::new("A", 0.0, 3.0));
        track.add_segment(CaptionSegment::new("B", 5.0, 2.0));
        assert_eq!(track.duration(), 7.0);
    }

    #[test]
    fn test_split_marker() {
        let mut track = SegmentTrack::new("Captions");
        let id = track.add_split_marker(4.2);

        assert_eq!(track.markers.len(), 1);
        assert_eq!(track.markers[0].id, id);
        assert_eq!(track.markers[0].time_sec, 4.2);
    }

    #[test]
    fn test_seed_demo_track_layout() {
        let mut rng = StdRng::seed_from_u64(7);
        let track = seed_demo_track(Language::English, &mut rng);

        assert_eq!(track.len(), demo_captions(Language::English).len());
        for (i, segment) in track.segments.iter().enumerate() {
            let base = i as f64 * 1.8;
            assert!(segment.start_sec >= base && segment.start_sec <= base + 0.2);
            assert!(segment.duration_sec >= 0.6 && segment.duration_sec <= 1.6);
        }
    }

    #[test]
    fn test_seed_demo_track_sinhala_font() {
        let mut rng = StdRng::seed_from_u64(7);
        let track = seed_demo_track(Language::Sinhala, &mut rng);
        assert!(track
            .segments
            .iter()
            .all(|s| s.style.font_family == "Noto Sans Sinhala"));
    }

    #[test]
    fn test_track_serialization() {
        let mut track = SegmentTrack::new("Captions");
        track.add_segment(CaptionSegment::new("Hello", 0.0, 2.0));

        let json = serde_json::to_string(&track).unwrap();
        let parsed: SegmentTrack = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, track.id);
        assert_eq!(parsed.segments.len(), 1);
        assert_eq!(parsed.segments[0].text, "Hello");
    }
}

//! Caption Net Core Type Definitions
//!
//! Defines fundamental types used throughout the engine.

use serde::{Deserialize, Serialize};
use tracing::warn;

// =============================================================================
// ID Types
// =============================================================================

/// Caption segment unique identifier (ULID)
pub type SegmentId = String;

/// Caption track unique identifier (ULID)
pub type TrackId = String;

/// Split marker unique identifier (ULID)
pub type MarkerId = String;

/// Processing job unique identifier (ULID)
pub type JobId = String;

/// Media source unique identifier (ULID)
pub type MediaId = String;

// =============================================================================
// Time and Pixel Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Horizontal timeline position in pixels
pub type Px = f64;

// =============================================================================
// Language
// =============================================================================

/// Caption language selected for the transcription run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Language {
    #[default]
    English,
    Sinhala,
}

impl Language {
    /// Human-readable name shown in progress messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Sinhala => "Sinhala",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "sinhala" | "si" => Ok(Language::Sinhala),
            other => Err(format!("Unknown language: {}", other)),
        }
    }
}

// =============================================================================
// Time Range
// =============================================================================

/// Time range on the timeline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_sec: TimeSec,
    pub end_sec: TimeSec,
}

impl TimeRange {
    pub fn new(start_sec: TimeSec, end_sec: TimeSec) -> Self {
        if start_sec > end_sec {
            warn!(
                "TimeRange created with start > end ({} > {}), swapping",
                start_sec, end_sec
            );
            return Self {
                start_sec: end_sec,
                end_sec: start_sec,
            };
        }
        Self { start_sec, end_sec }
    }

    /// Returns duration in seconds
    pub fn duration(&self) -> TimeSec {
        self.end_sec - self.start_sec
    }

    /// Checks if a given time is within range (closed interval)
    pub fn contains(&self, time: TimeSec) -> bool {
        time >= self.start_sec && time <= self.end_sec
    }

    /// Checks if two ranges overlap
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start_sec < other.end_sec && self.end_sec > other.start_sec
    }
}

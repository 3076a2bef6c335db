//! Caption Net Error Definitions
//!
//! Defines error types used throughout the engine.
//!
//! The synchronizer core itself never fails: invalid numeric input is
//! clamped and "no active caption" is an empty result. These errors cover
//! the surrounding session glue (upload validation, auth gating, stubbed
//! operations).

use thiserror::Error;

use super::{SegmentId, TimeSec, TrackId};

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Timeline Errors
    // =========================================================================
    #[error("Segment not found: {0}")]
    SegmentNotFound(SegmentId),

    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    #[error("Invalid time range: {0}~{1} seconds")]
    InvalidTimeRange(TimeSec, TimeSec),

    // =========================================================================
    // Media Errors
    // =========================================================================
    #[error("Unsupported media format: {0}")]
    UnsupportedMediaFormat(String),

    // =========================================================================
    // Session Errors
    // =========================================================================
    #[error("Sign in required")]
    SignInRequired,

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;

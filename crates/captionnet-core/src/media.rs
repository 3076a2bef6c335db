//! Media Source Module
//!
//! Validates and describes the uploaded video. The demo never decodes the
//! file; only the name, declared content type, and duration matter.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{CoreError, CoreResult, MediaId, TimeSec};

/// Uploaded video description
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSource {
    pub id: MediaId,
    /// Original file name
    pub name: String,
    /// Declared MIME type (e.g. "video/mp4")
    pub content_type: String,
    /// Duration in seconds
    pub duration_sec: TimeSec,
    pub created_at: String,
}

impl MediaSource {
    /// Validates an upload and builds its media description.
    ///
    /// Only `video/*` content types are accepted; anything else is rejected
    /// before the session leaves the upload phase. A non-finite or negative
    /// duration is clamped to zero.
    pub fn from_upload(name: &str, content_type: &str, duration_sec: TimeSec) -> CoreResult<Self> {
        if !content_type.starts_with("video/") {
            return Err(CoreError::UnsupportedMediaFormat(content_type.to_string()));
        }

        let duration_sec = if duration_sec.is_finite() && duration_sec >= 0.0 {
            duration_sec
        } else {
            warn!(
                name,
                duration_sec, "Upload reported an invalid duration, clamping to 0"
            );
            0.0
        };

        Ok(Self {
            id: ulid::Ulid::new().to_string(),
            name: name.to_string(),
            content_type: content_type.to_string(),
            duration_sec,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

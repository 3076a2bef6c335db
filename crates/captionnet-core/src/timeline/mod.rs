//! Timeline-Caption Synchronizer
//!
//! Maps continuous playback time onto the discrete set of positioned
//! caption segments and keeps that mapping consistent under drag edits and
//! playback advance:
//!
//! - `TimelineScale` — the fixed seconds/pixels mapping
//! - `active_text_at` — which caption drives the video overlay right now
//! - `drag_segment` — reposition a segment from a pointer delta
//! - `clamp_seek` — clamp a click-to-seek target into the video range
//!
//! Every entry point clamps invalid numeric input instead of failing; none
//! of these operations can error.

mod scale;
mod sync;

pub use scale::{format_timecode, TimelineScale, DEFAULT_PX_PER_SEC};
pub use sync::{active_text_at, clamp_seek, drag_segment, overlay_update, OverlayUpdate};

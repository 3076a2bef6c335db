//! Editor Session Module
//!
//! `EditorSession` is the single owner of all shared mutable editor state:
//! the caption track, the selection, the in-flight drag gesture, and the
//! live timers (processing run, caption cycler). Everything runs on the
//! caller's event loop; the session itself holds no locks.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    auth::{AuthMode, AuthState},
    media::MediaSource,
    playback::{
        spawn_caption_cycler, CyclerHandle, PlaybackSurface, PlayheadFrame, Transport,
    },
    processing::{spawn_processing, JobStatus, ProcessingHandle, PROCESSING_TICK},
    segments::{
        demo_captions, seed_demo_track, CaptionSegment, CaptionStyle, Color, ColorTag,
        SegmentTrack, StylePreset, DEFAULT_OVERLAY_DURATION_SEC,
    },
    timeline::{self, TimelineScale},
    CoreError, CoreResult, JobId, Language, MarkerId, Px, SegmentId, TimeSec,
};

// =============================================================================
// Session Phase
// =============================================================================

/// The three screens of the editor flow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    #[default]
    Upload,
    Processing,
    Editor,
}

// =============================================================================
// Selection
// =============================================================================

/// The currently selected overlay segment.
///
/// An explicit value owned by the session and passed to mutation
/// operations as an argument, so handlers never reach into ambient state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    selected: Option<SegmentId>,
}

impl SelectionState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(segment_id: &str) -> Self {
        Self {
            selected: Some(segment_id.to_string()),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, segment_id: &str) {
        self.selected = Some(segment_id.to_string());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

// =============================================================================
// Drag Gesture
// =============================================================================

/// Per-gesture anchor for an in-flight segment drag.
///
/// Only one gesture may be live at a time; a second pointer-down while one
/// is in flight is ignored.
#[derive(Clone, Debug)]
struct DragGesture {
    segment_id: SegmentId,
    pointer_origin_px: Px,
    origin_start_sec: TimeSec,
}

// =============================================================================
// Aspect Ratio
// =============================================================================

/// Output frame shape of the preview surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AspectRatio {
    #[default]
    Wide16x9,
    Tall9x16,
    Square1x1,
    Portrait4x5,
}

impl AspectRatio {
    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Wide16x9 => "16:9",
            AspectRatio::Tall9x16 => "9:16",
            AspectRatio::Square1x1 => "1:1",
            AspectRatio::Portrait4x5 => "4:5",
        }
    }
}

// =============================================================================
// Editor Session
// =============================================================================

struct ProcessingRun {
    handle: ProcessingHandle,
    status_rx: watch::Receiver<JobStatus>,
}

/// One in-memory editing session. Nothing survives the process.
pub struct EditorSession<P: PlaybackSurface> {
    pub auth: AuthState,
    pub language: Language,
    pub phase: SessionPhase,
    pub media: Option<MediaSource>,
    pub player: P,
    pub track: SegmentTrack,
    pub selection: SelectionState,
    pub scale: TimelineScale,
    pub aspect_ratio: AspectRatio,
    drag: Option<DragGesture>,
    processing: Option<ProcessingRun>,
    cycler: Option<CyclerHandle>,
    preview_rx: Option<watch::Receiver<String>>,
    playing_tx: watch::Sender<bool>,
}

impl<P: PlaybackSurface> EditorSession<P> {
    /// Creates a session in the upload phase
    pub fn new(player: P) -> Self {
        let (playing_tx, _) = watch::channel(false);
        Self {
            auth: AuthState::default(),
            language: Language::default(),
            phase: SessionPhase::Upload,
            media: None,
            player,
            track: SegmentTrack::new("Captions"),
            selection: SelectionState::none(),
            scale: TimelineScale::default(),
            aspect_ratio: AspectRatio::default(),
            drag: None,
            processing: None,
            cycler: None,
            preview_rx: None,
            playing_tx,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    // =========================================================================
    // Auth
    // =========================================================================

    pub fn begin_sign_in(&mut self, mode: AuthMode) {
        self.auth.begin(mode);
    }

    pub fn complete_sign_in(&mut self, display_name: &str) {
        self.auth.complete(display_name);
    }

    pub fn sign_out(&mut self) {
        self.auth.sign_out();
    }

    // =========================================================================
    // Upload and Processing
    // =========================================================================

    /// Accepts an upload and starts the simulated transcription run.
    ///
    /// Any prior run is cancelled first so two progress animations never
    /// overlap. Must be called from within a tokio runtime.
    pub fn import_video(&mut self, name: &str, content_type: &str) -> CoreResult<JobId> {
        if !self.auth.is_signed_in() {
            return Err(CoreError::SignInRequired);
        }

        let media = MediaSource::from_upload(name, content_type, self.player.duration())?;
        info!(name = %media.name, duration_sec = media.duration_sec, "Video accepted");
        self.media = Some(media);

        if let Some(run) = self.processing.take() {
            debug!(job_id = %run.handle.id, "Cancelling superseded processing run");
            run.handle.cancel();
        }

        let (handle, status_rx) = spawn_processing(self.language, PROCESSING_TICK);
        let job_id = handle.id.clone();
        self.processing = Some(ProcessingRun { handle, status_rx });
        self.phase = SessionPhase::Processing;
        Ok(job_id)
    }

    /// Latest status of the in-flight processing run
    pub fn processing_status(&self) -> Option<JobStatus> {
        self.processing
            .as_ref()
            .map(|run| run.status_rx.borrow().clone())
    }

    /// Waits for the in-flight processing run to finish
    pub async fn await_processing(&mut self) -> CoreResult<JobStatus> {
        let run = self
            .processing
            .as_mut()
            .ok_or_else(|| CoreError::ValidationError("No processing run in flight".to_string()))?;

        let status = run
            .status_rx
            .wait_for(|status| status.is_done())
            .await
            .map_err(|_| CoreError::Internal("Processing run dropped its channel".to_string()))?
            .clone();
        Ok(status)
    }

    /// Opens the editor once processing completes: seeds the demo caption
    /// track, starts playback, and starts the caption preview cycler.
    pub fn finish_processing(&mut self, rng: &mut impl Rng) -> CoreResult<()> {
        if self.phase != SessionPhase::Processing {
            return Err(CoreError::ValidationError(
                "No processing run to finish".to_string(),
            ));
        }

        self.processing = None;
        self.track = seed_demo_track(self.language, rng);
        if let Some(first) = self.track.segments.first() {
            self.selection = SelectionState::of(&first.id);
        }

        self.phase = SessionPhase::Editor;
        self.player.play();
        self.playing_tx.send_replace(!self.player.paused());

        let lines = demo_captions(self.language)
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (cycler, preview_rx) = spawn_caption_cycler(lines, self.playing_tx.subscribe());
        self.cycler = Some(cycler);
        self.preview_rx = Some(preview_rx);

        info!(segments = self.track.len(), "Editor opened");
        Ok(())
    }

    // =========================================================================
    // Transport
    // =========================================================================

    pub fn transport(&self) -> Transport {
        if self.player.paused() {
            Transport::Paused
        } else {
            Transport::Playing
        }
    }

    pub fn toggle_playback(&mut self) -> Transport {
        if self.player.paused() {
            self.player.play();
        } else {
            self.player.pause();
        }
        self.playing_tx.send_replace(!self.player.paused());
        self.transport()
    }

    /// Clamps and applies a click-to-seek target. Returns the clamped time.
    pub fn seek(&mut self, time_sec: TimeSec) -> TimeSec {
        let clamped = timeline::clamp_seek(time_sec, self.player.duration());
        self.player.set_current_time(clamped);
        debug!(requested = time_sec, applied = clamped, "Seek");
        clamped
    }

    /// Samples the playhead for the current tick
    pub fn playhead_frame(&self) -> PlayheadFrame {
        // Keep the cycler's view of the transport fresh; the clock may
        // have paused itself at the end of the video since the last call.
        self.playing_tx.send_replace(!self.player.paused());
        PlayheadFrame::sample(&self.player, &self.track, &self.scale)
    }

    /// Latest caption preview line from the cycler
    pub fn preview_caption(&self) -> Option<String> {
        self.preview_rx.as_ref().map(|rx| rx.borrow().clone())
    }

    // =========================================================================
    // Segment Editing
    // =========================================================================

    /// Adds a text overlay segment at the playhead and selects it
    pub fn add_text_overlay(&mut self) -> CoreResult<SegmentId> {
        self.require_editor()?;

        let segment = CaptionSegment::new(
            "New Text",
            self.player.current_time(),
            DEFAULT_OVERLAY_DURATION_SEC,
        )
        .with_style(CaptionStyle::for_language(self.language))
        .with_color_tag(ColorTag::Green);

        let id = self.track.add_segment(segment);
        self.selection.select(&id);
        debug!(segment_id = %id, "Text overlay added at playhead");
        Ok(id)
    }

    /// Selects a segment by ID
    pub fn select_segment(&mut self, segment_id: &str) -> CoreResult<()> {
        if self.track.get_segment(segment_id).is_none() {
            return Err(CoreError::SegmentNotFound(segment_id.to_string()));
        }
        self.selection.select(segment_id);
        Ok(())
    }

    /// Starts a drag gesture on a segment.
    ///
    /// A pointer-down while another gesture is in flight is ignored.
    pub fn begin_drag(&mut self, segment_id: &str, pointer_px: Px) -> CoreResult<()> {
        if self.drag.is_some() {
            debug!(segment_id, "Ignoring pointer-down during active drag");
            return Ok(());
        }

        let segment = self
            .track
            .get_segment(segment_id)
            .ok_or_else(|| CoreError::SegmentNotFound(segment_id.to_string()))?;

        self.drag = Some(DragGesture {
            segment_id: segment.id.clone(),
            pointer_origin_px: if pointer_px.is_finite() {
                pointer_px
            } else {
                0.0
            },
            origin_start_sec: segment.start_sec,
        });
        self.selection.select(segment_id);
        Ok(())
    }

    /// Applies a pointer-move to the in-flight gesture.
    ///
    /// The new start derives from the cumulative delta against the gesture
    /// anchor, so repeated calls with the same pointer position are
    /// idempotent. Returns the new start time, or `None` when no gesture
    /// is in flight.
    pub fn drag_to(&mut self, pointer_px: Px) -> Option<TimeSec> {
        let gesture = self.drag.as_ref()?;
        let delta_px = pointer_px - gesture.pointer_origin_px;
        let new_start = timeline::drag_segment(&self.scale, gesture.origin_start_sec, delta_px);

        match self.track.get_segment_mut(&gesture.segment_id) {
            Some(segment) => {
                segment.set_start_sec(new_start);
                Some(new_start)
            }
            None => {
                warn!(segment_id = %gesture.segment_id, "Dragged segment vanished");
                None
            }
        }
    }

    /// Ends the in-flight gesture, returning the dragged segment's ID
    pub fn end_drag(&mut self) -> Option<SegmentId> {
        self.drag.take().map(|gesture| gesture.segment_id)
    }

    /// Enters text-edit mode: pauses playback, cancels the caption
    /// cycler so it cannot race the edit, and returns the selected
    /// segment's current text for the editor field.
    pub fn enter_text_edit(&mut self) -> Option<String> {
        self.player.pause();
        self.playing_tx.send_replace(false);
        if let Some(cycler) = self.cycler.take() {
            cycler.cancel();
        }

        self.selection
            .selected()
            .and_then(|id| self.track.get_segment(id))
            .map(|segment| segment.text.clone())
    }

    /// Replaces the selected segment's text
    pub fn edit_segment_text(&mut self, selection: &SelectionState, text: &str) -> CoreResult<()> {
        // Edits never happen against a moving playhead.
        self.player.pause();
        self.playing_tx.send_replace(false);

        let Some(segment_id) = selection.selected() else {
            debug!("Text edit with nothing selected");
            return Ok(());
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::ValidationError(
                "Caption text cannot be empty".to_string(),
            ));
        }

        let segment = self
            .track
            .get_segment_mut(segment_id)
            .ok_or_else(|| CoreError::SegmentNotFound(segment_id.to_string()))?;
        segment.text = text.to_string();
        debug!(segment_id, "Caption text updated");
        Ok(())
    }

    /// Deletion stays a stub in the demo
    pub fn delete_selection(&mut self, selection: &SelectionState) -> CoreResult<()> {
        match selection.selected() {
            Some(segment_id) => {
                let id = segment_id.to_string();
                self.track.remove_segment(&id).map(|_| ())
            }
            None => Ok(()),
        }
    }

    // =========================================================================
    // Styling
    // =========================================================================

    /// Applies a style preset to the selected segment
    pub fn apply_preset(
        &mut self,
        selection: &SelectionState,
        preset: StylePreset,
    ) -> CoreResult<()> {
        self.with_selected_style(selection, |style| *style = preset.style())
    }

    pub fn set_font_size(&mut self, selection: &SelectionState, font_size: u32) -> CoreResult<()> {
        self.with_selected_style(selection, |style| style.font_size = font_size)
    }

    pub fn set_font(&mut self, selection: &SelectionState, font_family: &str) -> CoreResult<()> {
        self.with_selected_style(selection, |style| {
            style.font_family = font_family.to_string()
        })
    }

    /// Sets the text color and a matching glow
    pub fn set_color(&mut self, selection: &SelectionState, color: Color) -> CoreResult<()> {
        self.with_selected_style(selection, |style| {
            style.color = color.clone();
            style.glow_color = Some(color.clone());
        })
    }

    fn with_selected_style(
        &mut self,
        selection: &SelectionState,
        apply: impl FnOnce(&mut CaptionStyle),
    ) -> CoreResult<()> {
        let Some(segment_id) = selection.selected() else {
            debug!("Style change with nothing selected");
            return Ok(());
        };

        let segment = self
            .track
            .get_segment_mut(segment_id)
            .ok_or_else(|| CoreError::SegmentNotFound(segment_id.to_string()))?;
        apply(&mut segment.style);
        Ok(())
    }

    // =========================================================================
    // Tools
    // =========================================================================

    /// Drops a split marker at the playhead
    pub fn split_at_playhead(&mut self) -> CoreResult<MarkerId> {
        self.require_editor()?;
        let time_sec = self.player.current_time();
        let id = self.track.add_split_marker(time_sec);
        info!(time_sec, "Split marker dropped");
        Ok(id)
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        debug!(ratio = aspect_ratio.label(), "Aspect ratio changed");
        self.aspect_ratio = aspect_ratio;
    }

    /// Export is simulated; returns the message shown to the user.
    pub fn export_video(&self) -> CoreResult<String> {
        self.require_editor()?;
        let name = self
            .media
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or("video");
        Ok(format!(
            "Export of \"{}\" requested. Captions would be rendered onto the video server-side; the demo stops here.",
            name
        ))
    }

    fn require_editor(&self) -> CoreResult<()> {
        if self.phase != SessionPhase::Editor {
            return Err(CoreError::ValidationError(
                "Editor is not open yet".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

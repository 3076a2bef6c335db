//! Simulated Transcription Module
//!
//! The "AI processing" run between upload and editor is a timer-driven
//! progress animation. It is modeled as a small job state machine
//! (Queued -> Running -> Completed) whose tick step is pure with respect
//! to the supplied increment; only the driver touches timers and channels.

use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::{oneshot, watch};
use tracing::{debug, info};

use crate::{JobId, Language};

/// Progress tick interval
pub const PROCESSING_TICK: Duration = Duration::from_millis(150);

/// Upper bound for a single random progress increment
pub const MAX_PROGRESS_STEP: f32 = 5.0;

// =============================================================================
// Job Status
// =============================================================================

/// Simulated processing status
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JobStatus {
    /// Not yet ticked
    #[default]
    Queued,
    /// Progress animation in flight
    Running { progress: f32, message: String },
    /// Progress reached 100
    Completed,
    /// Superseded or cancelled by the session
    Cancelled,
}

impl JobStatus {
    /// Returns true once the run can no longer advance
    pub fn is_done(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }
}

/// Stage message for a progress value, mirroring the processing screen
pub fn stage_message(progress: f32, language: Language) -> String {
    if progress < 30.0 {
        "Uploading video...".to_string()
    } else if progress < 60.0 {
        "Extracting audio...".to_string()
    } else if progress < 90.0 {
        format!(
            "AI detecting {} speech patterns...",
            language.display_name()
        )
    } else {
        "Finalizing design...".to_string()
    }
}

// =============================================================================
// Processing Job
// =============================================================================

/// One simulated transcription run
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingJob {
    pub id: JobId,
    pub language: Language,
    pub status: JobStatus,
    progress: f32,
    pub created_at: String,
    pub completed_at: Option<String>,
}

impl ProcessingJob {
    pub fn new(language: Language) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            language,
            status: JobStatus::Queued,
            progress: 0.0,
            created_at: chrono::Utc::now().to_rfc3339(),
            completed_at: None,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Applies one tick worth of progress.
    ///
    /// Pure with respect to `increment`: the same sequence of increments
    /// always yields the same statuses. Progress caps at 100, at which
    /// point the job completes. Ticking a finished job is a no-op.
    pub fn advance(&mut self, increment: f32) -> JobStatus {
        if self.status.is_done() {
            return self.status.clone();
        }

        let increment = if increment.is_finite() && increment > 0.0 {
            increment
        } else {
            0.0
        };
        self.progress = (self.progress + increment).min(100.0);

        self.status = if self.progress >= 100.0 {
            self.completed_at = Some(chrono::Utc::now().to_rfc3339());
            JobStatus::Completed
        } else {
            JobStatus::Running {
                progress: self.progress,
                message: stage_message(self.progress, self.language),
            }
        };
        self.status.clone()
    }

    /// Marks the run cancelled
    pub fn cancel(&mut self) {
        if !self.status.is_done() {
            self.status = JobStatus::Cancelled;
            self.completed_at = Some(chrono::Utc::now().to_rfc3339());
        }
    }
}

// =============================================================================
// Processing Handle and Driver
// =============================================================================

/// Handle to a spawned processing run, for cancellation
#[derive(Debug)]
pub struct ProcessingHandle {
    pub id: JobId,
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl ProcessingHandle {
    /// Cancels the run. Returns false if it already finished.
    pub fn cancel(mut self) -> bool {
        if let Some(tx) = self.cancel_tx.take() {
            tx.send(()).is_ok()
        } else {
            false
        }
    }
}

/// Spawns the progress timer for one simulated run.
///
/// Each tick draws a random increment (up to [`MAX_PROGRESS_STEP`]) and
/// publishes the resulting status on the returned channel. The timer stops
/// itself on completion; the handle stops it early. The caller is
/// responsible for cancelling any previous run first so two progress
/// animations never overlap.
///
/// Must be called from within a tokio runtime.
pub fn spawn_processing(
    language: Language,
    tick: Duration,
) -> (ProcessingHandle, watch::Receiver<JobStatus>) {
    let mut job = ProcessingJob::new(language);
    let job_id = job.id.clone();
    let (status_tx, status_rx) = watch::channel(JobStatus::Queued);
    let (cancel_tx, mut cancel_rx) = oneshot::channel();

    info!(job_id = %job_id, ?language, "Starting simulated transcription");

    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut ticker = tokio::time::interval(tick);
        // The immediate first tick; real progress starts one interval in.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut cancel_rx => {
                    job.cancel();
                    debug!(job_id = %job.id, "Processing run cancelled");
                    let _ = status_tx.send(JobStatus::Cancelled);
                    break;
                }
                _ = ticker.tick() => {
                    let status = job.advance(rng.gen_range(0.0..MAX_PROGRESS_STEP));
                    let done = status.is_done();
                    if status_tx.send(status).is_err() {
                        break;
                    }
                    if done {
                        info!(job_id = %job.id, "Simulated transcription complete");
                        break;
                    }
                }
            }
        }
    });

    (
        ProcessingHandle {
            id: job_id,
            cancel_tx: Some(cancel_tx),
        },
        status_rx,
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_messages_by_threshold() {
        assert_eq!(stage_message(0.0, Language::English), "Uploading video...");
        assert_eq!(
            stage_message(45.0, Language::English),
            "Extracting audio..."
        );
        assert_eq!(
            stage_message(75.0, Language::Sinhala),
            "AI detecting Sinhala speech patterns..."
        );
        assert_eq!(
            stage_message(95.0, Language::English),
            "Finalizing design..."
        );
    }

    #[test]
    fn test_job_runs_to_completion() {
        let mut job = ProcessingJob::new(Language::English);
        assert_eq!(job.status, JobStatus::Queued);

        let status = job.advance(4.0);
        assert!(matches!(status, JobStatus::Running { .. }));

        let mut ticks = 1;
        while !job.status.is_done() {
            job.advance(4.0);
            ticks += 1;
            assert!(ticks < 100, "job never completed");
        }

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress(), 100.0);
        assert!(job.completed_at.is_some());
    }

    #[test]
    fn test_progress_caps_at_100() {
        let mut job = ProcessingJob::new(Language::English);
        job.advance(250.0);
        assert_eq!(job.progress(), 100.0);
        assert_eq!(job.status, JobStatus::Completed);
    }

    #[test]
    fn test_advance_after_done_is_noop() {
        let mut job = ProcessingJob::new(Language::English);
        job.advance(150.0);
        let status = job.advance(10.0);
        assert_eq!(status, JobStatus::Completed);
        assert_eq!(job.progress(), 100.0);
    }

    #[test]
    fn test_invalid_increment_is_ignored() {
        let mut job = ProcessingJob::new(Language::English);
        job.advance(f32::NAN);
        job.advance(-5.0);
        assert_eq!(job.progress(), 0.0);
    }

    #[test]
    fn test_cancel_marks_job() {
        let mut job = ProcessingJob::new(Language::English);
        job.advance(10.0);
        job.cancel();
        assert_eq!(job.status, JobStatus::Cancelled);

        // Cancelled jobs stop advancing.
        let status = job.advance(50.0);
        assert_eq!(status, JobStatus::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_run_completes() {
        let (_handle, mut status_rx) = spawn_processing(Language::English, PROCESSING_TICK);

        // Random steps are below 5 per 150ms tick: 100 progress needs at
        // least 20 ticks. Give it plenty of virtual time.
        for _ in 0..10_000 {
            tokio::time::sleep(PROCESSING_TICK).await;
            if status_rx.borrow_and_update().is_done() {
                break;
            }
        }

        assert_eq!(*status_rx.borrow(), JobStatus::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_run_cancel() {
        let (handle, mut status_rx) = spawn_processing(Language::English, PROCESSING_TICK);

        tokio::time::sleep(PROCESSING_TICK * 3).await;
        assert!(handle.cancel());

        tokio::time::sleep(PROCESSING_TICK).await;
        status_rx
            .wait_for(|status| *status == JobStatus::Cancelled)
            .await
            .unwrap();
    }
}

//! Demo Caption Cycler
//!
//! Rotates the caption preview through the demo lines on a fixed interval
//! while playback is running. The cycler is cancelled when text-edit mode
//! begins so it cannot race a user edit, and a session never runs more
//! than one.

use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tracing::debug;

/// Preview rotation interval
pub const CAPTION_CYCLE_INTERVAL: Duration = Duration::from_millis(3000);

/// Handle to a running caption cycler
#[derive(Debug)]
pub struct CyclerHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl CyclerHandle {
    /// Cancels the cycler. Returns false if it already stopped.
    pub fn cancel(mut self) -> bool {
        if let Some(tx) = self.cancel_tx.take() {
            tx.send(()).is_ok()
        } else {
            false
        }
    }
}

/// Spawns the cycling timer.
///
/// Every tick, if `playing_rx` currently reads true, the next line is
/// published on the returned channel. The first line appears one interval
/// after start, matching the editor's reveal pacing.
///
/// Must be called from within a tokio runtime.
pub fn spawn_caption_cycler(
    lines: Vec<String>,
    playing_rx: watch::Receiver<bool>,
) -> (CyclerHandle, watch::Receiver<String>) {
    let (preview_tx, preview_rx) = watch::channel(String::new());
    let (cancel_tx, mut cancel_rx) = oneshot::channel();

    tokio::spawn(async move {
        if lines.is_empty() {
            return;
        }

        let mut index = 0usize;
        let mut ticker = tokio::time::interval(CAPTION_CYCLE_INTERVAL);
        // Consume the immediate first tick so the cadence starts one
        // interval from now.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut cancel_rx => {
                    debug!("Caption cycler cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    if *playing_rx.borrow() {
                        let line = lines[index % lines.len()].clone();
                        index += 1;
                        if preview_tx.send(line).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    (
        CyclerHandle {
            cancel_tx: Some(cancel_tx),
        },
        preview_rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_cycler_rotates_while_playing() {
        let (_playing_tx, playing_rx) = watch::channel(true);
        let lines = vec!["one".to_string(), "two".to_string()];
        let (_handle, mut preview_rx) = spawn_caption_cycler(lines, playing_rx);

        tokio::time::sleep(CAPTION_CYCLE_INTERVAL + Duration::from_millis(10)).await;
        preview_rx.changed().await.unwrap();
        assert_eq!(*preview_rx.borrow(), "one");

        tokio::time::sleep(CAPTION_CYCLE_INTERVAL).await;
        preview_rx.changed().await.unwrap();
        assert_eq!(*preview_rx.borrow(), "two");

        // Wraps around.
        tokio::time::sleep(CAPTION_CYCLE_INTERVAL).await;
        preview_rx.changed().await.unwrap();
        assert_eq!(*preview_rx.borrow(), "one");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycler_holds_while_paused() {
        let (_playing_tx, playing_rx) = watch::channel(false);
        let lines = vec!["one".to_string()];
        let (_handle, preview_rx) = spawn_caption_cycler(lines, playing_rx);

        tokio::time::sleep(CAPTION_CYCLE_INTERVAL * 3).await;
        assert!(preview_rx.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycler_cancel() {
        let (_playing_tx, playing_rx) = watch::channel(true);
        let lines = vec!["one".to_string()];
        let (handle, preview_rx) = spawn_caption_cycler(lines, playing_rx);

        assert!(handle.cancel());

        tokio::time::sleep(CAPTION_CYCLE_INTERVAL * 2).await;
        assert!(preview_rx.borrow().is_empty());
    }
}

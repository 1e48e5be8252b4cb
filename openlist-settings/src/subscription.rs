use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::model::SettingsSnapshot;

/// Receiver side of the snapshot channel handed to UI observers.
#[derive(Debug, Clone)]
pub struct SnapshotWatcher {
    receiver: watch::Receiver<SettingsSnapshot>,
}

impl SnapshotWatcher {
    pub(crate) fn new(receiver: watch::Receiver<SettingsSnapshot>) -> Self {
        Self { receiver }
    }

    /// Latest published snapshot, marking it as seen.
    pub fn current(&mut self) -> SettingsSnapshot {
        self.receiver.borrow_and_update().clone()
    }

    /// Whether a snapshot was published since the last `current`/`changed`.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next published snapshot.
    ///
    /// Returns `None` once the controller has been dropped.
    pub async fn changed(&mut self) -> Option<SettingsSnapshot> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

/// Join point for work the controller started in the background.
///
/// Dropping the handle detaches the task; it still runs to completion.
#[derive(Debug)]
pub struct PendingTask {
    label: &'static str,
    handle: JoinHandle<()>,
}

impl PendingTask {
    pub(crate) fn new(label: &'static str, handle: JoinHandle<()>) -> Self {
        Self { label, handle }
    }

    /// Whether the task already finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait until the task finished.
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            log::warn!("settings {} task failed: {err}", self.label);
        }
    }
}

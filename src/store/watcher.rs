//! State file watcher.
//!
//! Operators clear a manual failure by editing the state file. The watcher
//! notices the edit and reloads the store so the next health check sees it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};

use crate::store::shared::StateStore;

/// Watches the directory holding the state file.
///
/// The directory is watched rather than the file itself because every
/// write replaces the file through a rename.
pub struct StateWatcher {
    store: Arc<StateStore>,
}

impl StateWatcher {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    /// Start watching and spawn the reload task.
    ///
    /// The returned watcher must be kept alive; dropping it stops the
    /// notifications. The reload task exits on `shutdown`.
    pub fn spawn(
        self,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<RecommendedWatcher, notify::Error> {
        let (change_tx, mut change_rx) = mpsc::unbounded_channel::<()>();
        let file_name = self.store.path().file_name().map(OsString::from);
        let dir = watch_dir(self.store.path());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let relevant = event.kind.is_modify()
                        || event.kind.is_create()
                        || event.kind.is_remove();
                    let ours = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(OsString::from) == file_name);
                    if relevant && ours {
                        let _ = change_tx.send(());
                    }
                }
                Err(e) => tracing::error!("State watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %self.store.path().display(), "State file watcher started");

        let store = self.store;
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = change_rx.recv() => {
                        if changed.is_none() {
                            break;
                        }
                        // Collapse bursts (write + rename) into one reload.
                        while change_rx.try_recv().is_ok() {}
                        let _ = store.reload().await;
                    }
                    _ = shutdown.recv() => {
                        tracing::debug!("State watcher received shutdown signal");
                        break;
                    }
                }
            }
        });

        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

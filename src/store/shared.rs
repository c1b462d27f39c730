//! Shared, lock-guarded state store.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::store::error::{StoreError, StoreResult};
use crate::store::file;
use crate::store::state::{lookup, HealthState};

/// Authoritative health state for the whole process.
///
/// The in-memory copy is the source of truth for reads. Every mutation
/// holds the lock across read, modify and persist, so concurrent triggers
/// are serialized instead of overwriting each other.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    /// Last known state, or the fault from the last failed reload.
    current: Mutex<StoreResult<HealthState>>,
}

impl StateStore {
    /// Open the store at `path`, applying the startup reset.
    ///
    /// Fails if the file or its `manual_config` entry is missing.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let state = file::reset(&path, true).await?;

        tracing::info!(
            path = %path.display(),
            healthy = state.healthy,
            manual_config = %state.manual_config,
            "State store reset"
        );

        Ok(Self {
            path,
            current: Mutex::new(Ok(state)),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current flags, or the fault that made the store unreadable.
    pub async fn snapshot(&self) -> StoreResult<HealthState> {
        self.current.lock().await.clone()
    }

    /// Value of a single key as it would appear in the file.
    pub async fn read(&self, key: &str) -> StoreResult<String> {
        let rendered = self.snapshot().await?.render();
        lookup(&rendered, key)
            .map(str::to_string)
            .ok_or_else(|| StoreError::MissingKey(key.to_string()))
    }

    /// Apply `mutate` and persist the result.
    ///
    /// Nothing changes in memory if the write fails.
    pub async fn update<F>(&self, mutate: F) -> StoreResult<HealthState>
    where
        F: FnOnce(&mut HealthState),
    {
        let mut current = self.current.lock().await;
        let mut next = current.clone()?;
        mutate(&mut next);
        file::persist(&self.path, &next).await?;
        *current = Ok(next.clone());
        Ok(next)
    }

    /// Re-apply the startup reset against the file on disk.
    pub async fn reset(&self, default_healthy: bool) -> StoreResult<HealthState> {
        let mut current = self.current.lock().await;
        let state = file::reset(&self.path, default_healthy).await?;
        *current = Ok(state.clone());
        Ok(state)
    }

    /// Replace the in-memory copy with whatever the file holds now.
    ///
    /// A missing file or key is remembered and returned by every later
    /// read or mutation until a reload succeeds.
    pub async fn reload(&self) -> StoreResult<HealthState> {
        let mut current = self.current.lock().await;
        let loaded = file::load(&self.path).await;

        match (&*current, &loaded) {
            (Ok(before), Ok(after)) if before != after => {
                tracing::info!(
                    healthy = after.healthy,
                    manual_config = %after.manual_config,
                    "State file changed externally"
                );
            }
            (Err(_), Ok(after)) => {
                tracing::info!(
                    healthy = after.healthy,
                    manual_config = %after.manual_config,
                    "State file readable again"
                );
            }
            (_, Err(e)) => {
                tracing::error!(error = %e, path = %self.path.display(), "State file unreadable");
            }
            _ => {}
        }

        *current = loaded.clone();
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::state::ManualConfig;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn open_store(dir: &TempDir, contents: &str) -> StateStore {
        let path = dir.path().join("important_file");
        std::fs::write(&path, contents).unwrap();
        StateStore::open(path).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_forces_healthy() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, "healthy=false\nmanual_config=invalid").await;

        let state = store.snapshot().await.unwrap();
        assert!(state.healthy);
        assert_eq!(state.manual_config, ManualConfig::Invalid);
        assert_eq!(store.read("healthy").await.unwrap(), "true");
        assert_eq!(store.read("manual_config").await.unwrap(), "invalid");
    }

    #[tokio::test]
    async fn test_update_writes_through() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, "healthy=true\nmanual_config=valid").await;

        store.update(|s| s.healthy = false).await.unwrap();
        let on_disk = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(on_disk, "healthy=false\nmanual_config=valid");
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(open_store(&dir, "healthy=true\nmanual_config=valid").await);

        let mut tasks = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    store.update(|s| s.healthy = false).await
                } else {
                    store.update(|s| s.manual_config = ManualConfig::Invalid).await
                }
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let expected = HealthState {
            healthy: false,
            manual_config: ManualConfig::Invalid,
        };
        assert_eq!(store.snapshot().await.unwrap(), expected);
        assert_eq!(file::load(store.path()).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_reload_picks_up_operator_edit() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, "healthy=true\nmanual_config=invalid").await;
        assert!(!store.snapshot().await.unwrap().is_serving());

        std::fs::write(store.path(), "healthy=true\nmanual_config=valid").unwrap();
        store.reload().await.unwrap();
        assert!(store.snapshot().await.unwrap().is_serving());
    }

    #[tokio::test]
    async fn test_failed_reload_poisons_until_recovered() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, "healthy=true\nmanual_config=valid").await;

        std::fs::remove_file(store.path()).unwrap();
        assert!(matches!(store.reload().await, Err(StoreError::MissingFile(_))));
        assert!(matches!(store.snapshot().await, Err(StoreError::MissingFile(_))));
        assert!(store.update(|s| s.healthy = false).await.is_err());
        assert!(!store.path().exists());

        std::fs::write(store.path(), "healthy=false\nmanual_config=valid").unwrap();
        let state = store.reload().await.unwrap();
        assert!(!state.healthy);
    }

    #[tokio::test]
    async fn test_reset_restores_healthy() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, "healthy=true\nmanual_config=invalid").await;

        store.update(|s| s.healthy = false).await.unwrap();
        let state = store.reset(true).await.unwrap();
        assert!(state.healthy);
        assert_eq!(state.manual_config, ManualConfig::Invalid);
    }
}

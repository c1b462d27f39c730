//! State file access.
//!
//! The file is always rewritten whole. Writes go to a sibling temporary
//! file that is then renamed over the target, so readers never observe a
//! half-written body.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::store::error::{StoreError, StoreResult};
use crate::store::state::{require, HealthState, ManualConfig, MANUAL_CONFIG_KEY};

/// Read the raw file contents.
pub async fn read_contents(path: &Path) -> StoreResult<String> {
    match fs::read_to_string(path).await {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(StoreError::MissingFile(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Read the value of `key` straight from the file.
pub async fn read_value(path: &Path, key: &str) -> StoreResult<String> {
    let contents = read_contents(path).await?;
    require(&contents, key).map(str::to_string)
}

/// Read and parse both flags.
pub async fn load(path: &Path) -> StoreResult<HealthState> {
    let contents = read_contents(path).await?;
    HealthState::parse(&contents)
}

/// Replace the file with the canonical rendering of `state`.
pub async fn persist(path: &Path, state: &HealthState) -> StoreResult<()> {
    let tmp = temp_path(path);
    fs::write(&tmp, state.render()).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

/// Force `healthy` to `default_healthy` while keeping `manual_config`.
///
/// The current `manual_config` must already be present; a missing file or
/// key is returned as an error and the file is left untouched.
pub async fn reset(path: &Path, default_healthy: bool) -> StoreResult<HealthState> {
    let manual_config = ManualConfig::from(read_value(path, MANUAL_CONFIG_KEY).await?.as_str());
    let state = HealthState {
        healthy: default_healthy,
        manual_config,
    };
    persist(path, &state).await?;
    Ok(state)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

//! Health state model and its `key=value` text form.

use std::fmt;

use crate::store::error::{StoreError, StoreResult};

/// Key of the automatically recoverable flag.
pub const HEALTHY_KEY: &str = "healthy";

/// Key of the flag that only an operator can clear.
pub const MANUAL_CONFIG_KEY: &str = "manual_config";

/// Manual configuration flag.
///
/// Anything other than `valid` fails the health check. Values the harness
/// never writes itself are kept verbatim so a reset carries them forward.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ManualConfig {
    Valid,
    Invalid,
    Other(String),
}

impl ManualConfig {
    pub fn as_str(&self) -> &str {
        match self {
            ManualConfig::Valid => "valid",
            ManualConfig::Invalid => "invalid",
            ManualConfig::Other(value) => value.as_str(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ManualConfig::Valid)
    }
}

impl fmt::Display for ManualConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ManualConfig {
    fn from(value: &str) -> Self {
        match value {
            "valid" => ManualConfig::Valid,
            "invalid" => ManualConfig::Invalid,
            other => ManualConfig::Other(other.to_string()),
        }
    }
}

/// The two persisted flags.
///
/// Both flags are independent; every combination is a legal state.
/// `healthy` is true only for the literal value `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthState {
    pub healthy: bool,
    pub manual_config: ManualConfig,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            healthy: true,
            manual_config: ManualConfig::Valid,
        }
    }
}

impl HealthState {
    /// True when the health check should answer with success.
    pub fn is_serving(&self) -> bool {
        self.healthy && self.manual_config.is_valid()
    }

    /// Parse both flags out of the file contents.
    ///
    /// Only a missing key is an error; unrecognised values count as failed.
    pub fn parse(contents: &str) -> StoreResult<Self> {
        let healthy = require(contents, HEALTHY_KEY)? == "true";
        let manual_config = ManualConfig::from(require(contents, MANUAL_CONFIG_KEY)?);
        Ok(Self {
            healthy,
            manual_config,
        })
    }

    /// Render the canonical two-line file body (no trailing newline).
    pub fn render(&self) -> String {
        format!(
            "{}={}\n{}={}",
            HEALTHY_KEY, self.healthy, MANUAL_CONFIG_KEY, self.manual_config
        )
    }
}

/// Find the value of the first line whose key equals `key`.
///
/// Lines are split on the first `=`; lines without one are skipped.
/// A trailing `\r` is dropped, even on a final line with no newline.
pub fn lookup<'a>(contents: &'a str, key: &str) -> Option<&'a str> {
    contents
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter_map(|line| line.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, value)| value)
}

/// Like [`lookup`], but a missing key is a store fault.
pub fn require<'a>(contents: &'a str, key: &str) -> StoreResult<&'a str> {
    lookup(contents, key).ok_or_else(|| StoreError::MissingKey(key.to_string()))
}

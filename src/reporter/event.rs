//! Report payload.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body sent to the log collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub from: String,
    pub timestamp: String,
}

impl ReportEvent {
    /// Build an event stamped with the current UTC time (RFC 3339).
    pub fn now(event_type: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            from: from.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

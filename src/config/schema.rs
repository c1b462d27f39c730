//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the harness.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the harness.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HarnessConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// State file location.
    pub store: StoreConfig,

    /// Chaos job settings.
    pub chaos: ChaosConfig,

    /// Downstream collector settings.
    pub reporter: ReporterConfig,

    /// Address baked into the greeting page buttons.
    pub page: PageConfig,

    /// Remote container control.
    pub containers: ContainerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4444").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4444".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// State store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the `key=value` state file. Must exist at startup.
    pub path: String,

    /// Reload the store when the file is edited externally.
    pub watch: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "important_file".to_string(),
            watch: true,
        }
    }
}

/// Chaos job configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChaosConfig {
    /// Seconds between automatic triggers while the job is scheduled.
    pub interval_secs: u64,
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

/// Downstream reporter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Send reports at all.
    pub enabled: bool,

    /// Full collector URL (e.g., "http://localhost:3000/log").
    pub collector_url: String,

    /// Value of the `type` field.
    pub event_type: String,

    /// Value of the `from` field.
    pub origin: String,

    /// Upper bound for one delivery attempt, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            collector_url: "http://localhost:3000/log".to_string(),
            event_type: "test".to_string(),
            origin: "127.0.0.1".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Greeting page configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PageConfig {
    /// Host the page buttons call back to.
    pub public_address: String,

    /// Port the page buttons call back to.
    pub public_port: u16,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            public_address: "localhost".to_string(),
            public_port: 4444,
        }
    }
}

/// Remote container control configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Mount `POST /docker-state`.
    pub enabled: bool,

    /// Container names that may be controlled.
    pub allowed: Vec<String>,

    /// Private key passed to `ssh -i`. Omitted when unset.
    pub ssh_key_path: Option<String>,

    /// SSH destination (e.g., "ec2-user@10.0.0.5").
    pub ssh_target: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed: vec![
                "worker1".to_string(),
                "worker2".to_string(),
                "worker3".to_string(),
            ],
            ssh_key_path: None,
            ssh_target: "ec2-user@localhost".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals and timeouts > 0, addresses parse)
//! - Check the collector URL and the container allow-list
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HarnessConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::HarnessConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("listener.request_timeout_secs must be greater than zero")]
    RequestTimeout,

    #[error("store.path must not be empty")]
    StorePath,

    #[error("chaos.interval_secs must be greater than zero")]
    ChaosInterval,

    #[error("reporter.collector_url '{0}' must be an absolute http(s) URL")]
    CollectorUrl(String),

    #[error("reporter.timeout_ms must be greater than zero")]
    ReporterTimeout,

    #[error("containers.allowed must list at least one container")]
    EmptyAllowList,

    #[error("containers.ssh_target must not be empty")]
    SshTarget,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check every semantic rule and collect all failures.
pub fn validate_config(config: &HarnessConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }
    if config.store.path.trim().is_empty() {
        errors.push(ValidationError::StorePath);
    }
    if config.chaos.interval_secs == 0 {
        errors.push(ValidationError::ChaosInterval);
    }

    if config.reporter.enabled {
        let url_ok = Url::parse(&config.reporter.collector_url)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .unwrap_or(false);
        if !url_ok {
            errors.push(ValidationError::CollectorUrl(config.reporter.collector_url.clone()));
        }
        if config.reporter.timeout_ms == 0 {
            errors.push(ValidationError::ReporterTimeout);
        }
    }

    if config.containers.enabled {
        if config.containers.allowed.is_empty() {
            errors.push(ValidationError::EmptyAllowList);
        }
        if config.containers.ssh_target.trim().is_empty() {
            errors.push(ValidationError::SshTarget);
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::HarnessConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid value '{value}' for environment variable {name}")]
    Env { name: &'static str, value: String },
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration, apply environment overrides, validate.
///
/// Without a path the built-in defaults are the starting point.
pub fn load_config(path: Option<&Path>) -> Result<HarnessConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => HarnessConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Deserialize a TOML document. Missing sections fall back to defaults.
pub fn parse_config(content: &str) -> Result<HarnessConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply the supported environment variables on top of `config`.
///
/// - `HOST_ADDRESS`, `HOST_PORT`: greeting page callback address
/// - `SSH_KEY`: private key for container control
/// - `HARNESS_STATE_FILE`, `HARNESS_BIND_ADDRESS`, `HARNESS_COLLECTOR_URL`
pub fn apply_env_overrides<F>(config: &mut HarnessConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(address) = lookup("HOST_ADDRESS") {
        config.page.public_address = address;
    }
    if let Some(port) = lookup("HOST_PORT") {
        config.page.public_port = port.parse().map_err(|_| ConfigError::Env {
            name: "HOST_PORT",
            value: port.clone(),
        })?;
    }
    if let Some(key) = lookup("SSH_KEY") {
        config.containers.ssh_key_path = Some(key);
    }
    if let Some(path) = lookup("HARNESS_STATE_FILE") {
        config.store.path = path;
    }
    if let Some(addr) = lookup("HARNESS_BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }
    if let Some(url) = lookup("HARNESS_COLLECTOR_URL") {
        config.reporter.collector_url = url;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [chaos]
            interval_secs = 5

            [containers]
            allowed = ["api"]
            "#,
        )
        .unwrap();

        assert_eq!(config.chaos.interval_secs, 5);
        assert_eq!(config.containers.allowed, vec!["api".to_string()]);
        assert_eq!(config.store.path, "important_file");
        assert_eq!(config.reporter.event_type, "test");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HOST_ADDRESS", "harness.internal"),
            ("HOST_PORT", "8080"),
            ("SSH_KEY", "/keys/id_ed25519"),
            ("HARNESS_STATE_FILE", "/tmp/state"),
        ]
        .into_iter()
        .collect();

        let mut config = HarnessConfig::default();
        apply_env_overrides(&mut config, |name| env.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(config.page.public_address, "harness.internal");
        assert_eq!(config.page.public_port, 8080);
        assert_eq!(config.containers.ssh_key_path.as_deref(), Some("/keys/id_ed25519"));
        assert_eq!(config.store.path, "/tmp/state");
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let mut config = HarnessConfig::default();
        let err = apply_env_overrides(&mut config, |name| {
            (name == "HOST_PORT").then(|| "eighty".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Env { name: "HOST_PORT", .. }));
    }

    #[test]
    fn test_unknown_field_type_is_parse_error() {
        let err = parse_config("[chaos]\ninterval_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

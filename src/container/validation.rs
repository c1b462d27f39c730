//! Allow-list validation for container requests.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Lifecycle action accepted by the remote docker daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerAction {
    Start,
    Stop,
    Restart,
}

impl ContainerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerAction::Start => "start",
            ContainerAction::Stop => "stop",
            ContainerAction::Restart => "restart",
        }
    }
}

impl fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerAction {
    type Err = ContainerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "start" => Ok(ContainerAction::Start),
            "stop" => Ok(ContainerAction::Stop),
            "restart" => Ok(ContainerAction::Restart),
            other => Err(ContainerError::UnknownState(other.to_string())),
        }
    }
}

/// A validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerCommand {
    pub container: String,
    pub action: ContainerAction,
}

/// Container control failures. The display text is sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("container with {0} name not found")]
    UnknownContainer(String),

    #[error("state only support [ start | stop | restart ]")]
    UnknownState(String),

    #[error("remote command failed: {0}")]
    Remote(String),
}

/// Check `container` against the allow-list, then parse `state`.
pub fn validate(allowed: &[String], container: &str, state: &str) -> Result<ContainerCommand, ContainerError> {
    if !allowed.iter().any(|name| name == container) {
        return Err(ContainerError::UnknownContainer(container.to_string()));
    }
    Ok(ContainerCommand {
        container: container.to_string(),
        action: state.parse()?,
    })
}

//! Remote container control.
//!
//! # Data Flow
//! ```text
//! POST /docker-state {container, state}
//!     → validation.rs (allow-list, then action)
//!     → executor.rs (one `ssh <target> docker <action> <container>`)
//!     → {success, message}
//! ```
//!
//! # Design Decisions
//! - Shares nothing with the health state machine
//! - Unknown container is checked before unknown action
//! - The remote side is behind a trait so it can be faked

pub mod executor;
pub mod validation;

use std::sync::Arc;

pub use executor::{BoxFuture, RemoteExecutor, SshExecutor};
pub use validation::{ContainerAction, ContainerCommand, ContainerError};

use crate::observability::metrics;

/// Validates requests and hands accepted ones to the executor.
pub struct ContainerControl {
    allowed: Vec<String>,
    executor: Arc<dyn RemoteExecutor>,
}

impl ContainerControl {
    pub fn new(allowed: Vec<String>, executor: Arc<dyn RemoteExecutor>) -> Self {
        Self { allowed, executor }
    }

    /// Validate and run one container command.
    pub async fn apply(&self, container: &str, state: &str) -> Result<ContainerCommand, ContainerError> {
        let command = match validation::validate(&self.allowed, container, state) {
            Ok(command) => command,
            Err(e) => {
                tracing::info!(container, state, error = %e, "Container request rejected");
                metrics::record_container_command("rejected");
                return Err(e);
            }
        };

        match self.executor.execute(&command).await {
            Ok(()) => {
                tracing::info!(
                    container = %command.container,
                    action = %command.action,
                    "Container command succeeded"
                );
                metrics::record_container_command("success");
                Ok(command)
            }
            Err(e) => {
                tracing::error!(
                    container = %command.container,
                    action = %command.action,
                    error = %e,
                    "Container command failed"
                );
                metrics::record_container_command("failed");
                Err(e)
            }
        }
    }
}

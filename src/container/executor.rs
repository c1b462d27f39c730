//! Remote command execution.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tokio::process::Command;

use crate::config::ContainerConfig;
use crate::container::validation::{ContainerCommand, ContainerError};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Runs a validated command on the container host.
pub trait RemoteExecutor: Send + Sync {
    fn execute<'a>(&'a self, command: &'a ContainerCommand) -> BoxFuture<'a, Result<(), ContainerError>>;
}

/// Executes `docker <action> <container>` over `ssh`.
#[derive(Debug, Clone)]
pub struct SshExecutor {
    key_path: Option<PathBuf>,
    target: String,
}

impl SshExecutor {
    pub fn new(key_path: Option<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            key_path,
            target: target.into(),
        }
    }

    pub fn from_config(config: &ContainerConfig) -> Self {
        Self::new(config.ssh_key_path.as_ref().map(PathBuf::from), config.ssh_target.clone())
    }

    fn command(&self, command: &ContainerCommand) -> Command {
        let mut ssh = Command::new("ssh");
        if let Some(key) = &self.key_path {
            ssh.arg("-i").arg(key);
        }
        ssh.arg(&self.target)
            .arg("docker")
            .arg(command.action.as_str())
            .arg(&command.container)
            .kill_on_drop(true);
        ssh
    }
}

impl RemoteExecutor for SshExecutor {
    fn execute<'a>(&'a self, command: &'a ContainerCommand) -> BoxFuture<'a, Result<(), ContainerError>> {
        Box::pin(async move {
            let output = self
                .command(command)
                .output()
                .await
                .map_err(|e| ContainerError::Remote(format!("failed to spawn ssh: {}", e)))?;

            // Any stderr output counts as failure, even with a zero exit code.
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !output.status.success() || !stderr.trim().is_empty() {
                return Err(ContainerError::Remote(format!(
                    "{} ({})",
                    stderr.trim(),
                    output.status
                )));
            }
            Ok(())
        })
    }
}

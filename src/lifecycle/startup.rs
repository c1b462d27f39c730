//! Startup orchestration.
//!
//! # Order
//! 1. Reset the state store (fatal if the file or `manual_config` is missing)
//! 2. Start the state file watcher
//! 3. Build handlers, reporter, scheduler, container control
//! 4. Bind the listener (traffic only when everything else is ready)

use std::net::SocketAddr;
use std::sync::Arc;

use notify::RecommendedWatcher;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::HarnessConfig;
use crate::container::{RemoteExecutor, SshExecutor};
use crate::http::{AppState, HttpServer};
use crate::lifecycle::Shutdown;
use crate::reporter::ReporterError;
use crate::store::{StateStore, StateWatcher, StoreError};

/// Any failure here aborts the process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("state store unavailable: {0}")]
    Store(#[from] StoreError),

    #[error("reporter setup failed: {0}")]
    Reporter(#[from] ReporterError),

    #[error("state watcher failed: {0}")]
    Watch(#[from] notify::Error),

    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// A fully initialized harness, bound but not yet serving.
pub struct Harness {
    server: HttpServer,
    listener: TcpListener,
    _watcher: Option<RecommendedWatcher>,
}

impl Harness {
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn state(&self) -> &AppState {
        self.server.state()
    }

    /// Serve until `shutdown` fires.
    pub async fn run(self, shutdown: &Shutdown) -> std::io::Result<()> {
        let Harness {
            server,
            listener,
            _watcher,
        } = self;
        server.run(listener, shutdown.subscribe()).await
    }
}

/// Prepare a harness that executes container commands over SSH.
pub async fn prepare(config: HarnessConfig, shutdown: &Shutdown) -> Result<Harness, StartupError> {
    let executor = Arc::new(SshExecutor::from_config(&config.containers));
    prepare_with_executor(config, shutdown, executor).await
}

/// Prepare a harness with a caller-supplied container executor.
pub async fn prepare_with_executor(
    config: HarnessConfig,
    shutdown: &Shutdown,
    executor: Arc<dyn RemoteExecutor>,
) -> Result<Harness, StartupError> {
    let store = Arc::new(StateStore::open(&config.store.path).await?);

    let watcher = if config.store.watch {
        Some(StateWatcher::new(store.clone()).spawn(shutdown.subscribe())?)
    } else {
        None
    };

    let state = AppState::new(&config, store, executor)?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        chaos_interval_secs = config.chaos.interval_secs,
        collector = %state.reporter.endpoint(),
        "Harness ready"
    );

    Ok(Harness {
        server: HttpServer::new(config, state),
        listener,
        _watcher: watcher,
    })
}

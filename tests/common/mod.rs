//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chaos_harness::config::HarnessConfig;
use chaos_harness::container::{BoxFuture, ContainerCommand, ContainerError, RemoteExecutor};
use chaos_harness::http::AppState;
use chaos_harness::lifecycle::{self, Shutdown};
use chaos_harness::reporter::ReportEvent;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Mock log collector recording every report it receives.
pub struct Collector {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<ReportEvent>>>,
}

impl Collector {
    pub async fn start() -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/log", post(record))
            .with_state(received.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, received }
    }

    pub fn url(&self) -> String {
        format!("http://{}/log", self.addr)
    }

    pub fn reports(&self) -> Vec<ReportEvent> {
        self.received.lock().unwrap().clone()
    }
}

async fn record(
    State(received): State<Arc<Mutex<Vec<ReportEvent>>>>,
    Json(event): Json<ReportEvent>,
) -> StatusCode {
    received.lock().unwrap().push(event);
    StatusCode::OK
}

/// Records commands instead of running them; fails when told to.
#[derive(Default)]
#[allow(dead_code)]
pub struct FakeExecutor {
    pub fail: bool,
    pub executed: Mutex<Vec<ContainerCommand>>,
}

impl RemoteExecutor for FakeExecutor {
    fn execute<'a>(&'a self, command: &'a ContainerCommand) -> BoxFuture<'a, Result<(), ContainerError>> {
        Box::pin(async move {
            self.executed.lock().unwrap().push(command.clone());
            if self.fail {
                Err(ContainerError::Remote("permission denied".into()))
            } else {
                Ok(())
            }
        })
    }
}

/// A harness serving on an ephemeral port.
pub struct TestHarness {
    pub addr: SocketAddr,
    pub state: AppState,
    pub state_path: PathBuf,
    pub shutdown: Shutdown,
    _dir: TempDir,
}

#[allow(dead_code)]
impl TestHarness {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn state_file(&self) -> String {
        std::fs::read_to_string(&self.state_path).unwrap()
    }

    /// Wait for in-flight reports to reach the collector.
    pub async fn flush_reports(&self) {
        self.state.reporter.drain(Duration::from_secs(5)).await;
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Defaults suited to tests: loopback, ephemeral port, no watcher.
pub fn test_config(collector_url: &str) -> HarnessConfig {
    let mut config = HarnessConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.store.watch = false;
    config.reporter.collector_url = collector_url.into();
    config.reporter.timeout_ms = 1_000;
    config
}

/// Write `initial_state` to a fresh state file and start a harness on it.
pub async fn spawn_harness(
    mut config: HarnessConfig,
    initial_state: &str,
    executor: Arc<dyn RemoteExecutor>,
) -> TestHarness {
    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("important_file");
    std::fs::write(&state_path, initial_state).unwrap();
    config.store.path = state_path.to_string_lossy().into_owned();

    let shutdown = Shutdown::new();
    let harness = lifecycle::prepare_with_executor(config, &shutdown, executor)
        .await
        .expect("harness failed to start");
    let addr = harness.local_addr().unwrap();
    let state = harness.state().clone();

    let run_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let _ = harness.run(&run_shutdown).await;
    });

    TestHarness {
        addr,
        state,
        state_path,
        shutdown,
        _dir: dir,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

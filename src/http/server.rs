//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - On shutdown: stop the chaos job and drain pending reports

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::chaos::{ChaosScheduler, TriggerController};
use crate::config::HarnessConfig;
use crate::container::{ContainerControl, RemoteExecutor};
use crate::http::{docker, handlers, page};
use crate::reporter::{DownstreamReporter, ReporterError};
use crate::store::StateStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StateStore>,
    pub triggers: TriggerController,
    pub scheduler: Arc<ChaosScheduler>,
    pub reporter: Arc<DownstreamReporter>,
    pub containers: Arc<ContainerControl>,
    pub page: Arc<str>,
}

impl AppState {
    /// Build every request-facing subsystem around an opened store.
    pub fn new(
        config: &HarnessConfig,
        store: Arc<StateStore>,
        executor: Arc<dyn RemoteExecutor>,
    ) -> Result<Self, ReporterError> {
        let triggers = TriggerController::new(store.clone());
        let scheduler = Arc::new(ChaosScheduler::new(
            triggers.clone(),
            Duration::from_secs(config.chaos.interval_secs),
        ));
        let reporter = Arc::new(DownstreamReporter::new(&config.reporter)?);
        let containers = Arc::new(ContainerControl::new(
            config.containers.allowed.clone(),
            executor,
        ));

        Ok(Self {
            store,
            triggers,
            scheduler,
            reporter,
            containers,
            page: page::render_greeting(&config.page).into(),
        })
    }
}

/// HTTP server for the harness.
pub struct HttpServer {
    router: Router,
    state: AppState,
    config: HarnessConfig,
}

impl HttpServer {
    pub fn new(config: HarnessConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            state,
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &HarnessConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(handlers::health_check))
            .route("/break", get(handlers::auto_break))
            .route("/breakManual", get(handlers::manual_break))
            .route("/addcron", get(handlers::add_cron))
            .route("/removecron", get(handlers::remove_cron));

        if config.containers.enabled {
            router = router.route("/docker-state", post(docker::set_container_state));
        }

        router.with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.listener.request_timeout_secs,
                ))),
        )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        self.state.scheduler.stop();
        let drain_deadline = Duration::from_millis(self.config.reporter.timeout_ms);
        let outcomes = self.state.reporter.drain(drain_deadline).await;
        tracing::info!(reports_flushed = outcomes.len(), "HTTP server stopped");
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }
}

//! Health check and trigger endpoints.
//!
//! None of these take input or check credentials.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};

use crate::chaos::TriggerSource;
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /`
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.store.snapshot().await {
        Ok(health) if health.is_serving() => {
            metrics::record_health_check("healthy");
            Html(state.page.to_string()).into_response()
        }
        Ok(health) => {
            tracing::warn!(
                healthy = health.healthy,
                manual_config = %health.manual_config,
                "Health check observed failure state"
            );
            metrics::record_health_check("unhealthy");
            state.reporter.report_failure();
            response::unhealthy()
        }
        Err(e) => {
            tracing::error!(error = %e, "Health check could not read state");
            metrics::record_health_check("store_fault");
            response::internal_error()
        }
    }
}

/// `GET /break`
pub async fn auto_break(State(state): State<AppState>) -> Response {
    match state.triggers.auto_trigger(TriggerSource::Http).await {
        Ok(_) => response::acknowledged(),
        Err(_) => response::internal_error(),
    }
}

/// `GET /breakManual`
pub async fn manual_break(State(state): State<AppState>) -> Response {
    match state.triggers.manual_trigger(TriggerSource::Http).await {
        Ok(_) => response::acknowledged(),
        Err(_) => response::internal_error(),
    }
}

/// `GET /addcron`
pub async fn add_cron(State(state): State<AppState>) -> Response {
    state.scheduler.start();
    response::acknowledged()
}

/// `GET /removecron`
pub async fn remove_cron(State(state): State<AppState>) -> Response {
    state.scheduler.stop();
    response::acknowledged()
}

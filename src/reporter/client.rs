//! Fire-and-forget collector client.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time;
use url::Url;

use crate::config::ReporterConfig;
use crate::observability::metrics;
use crate::reporter::event::ReportEvent;

/// Errors building the reporter. Delivery errors never surface.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("invalid collector URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// How a single report ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The collector answered with this status code.
    Delivered(u16),
    /// Connection or protocol error.
    Failed,
    /// No answer within the configured timeout.
    TimedOut,
}

impl ReportOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ReportOutcome::Delivered(_) => "delivered",
            ReportOutcome::Failed => "failed",
            ReportOutcome::TimedOut => "timed_out",
        }
    }
}

/// Sends failure reports to the downstream log collector.
pub struct DownstreamReporter {
    client: Client,
    endpoint: Url,
    event_type: String,
    origin: String,
    timeout: Duration,
    enabled: bool,
    in_flight: Mutex<JoinSet<ReportOutcome>>,
}

impl DownstreamReporter {
    pub fn new(config: &ReporterConfig) -> Result<Self, ReporterError> {
        let endpoint = Url::parse(&config.collector_url).map_err(|source| {
            ReporterError::InvalidUrl {
                url: config.collector_url.clone(),
                source,
            }
        })?;
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            endpoint,
            event_type: config.event_type.clone(),
            origin: config.origin.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            enabled: config.enabled,
            in_flight: Mutex::new(JoinSet::new()),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Report an observed failure state with the configured type and origin.
    pub fn report_failure(&self) {
        if !self.enabled {
            tracing::debug!("Reporter disabled, failure not reported");
            return;
        }
        self.report(ReportEvent::now(self.event_type.as_str(), self.origin.as_str()));
    }

    /// Spawn delivery of `event` and return immediately.
    pub fn report(&self, event: ReportEvent) {
        let request = self.client.post(self.endpoint.clone()).json(&event);
        let timeout = self.timeout;
        let endpoint = self.endpoint.clone();

        let mut tasks = self.lock_tasks();
        // Reap finished deliveries so the set does not grow unbounded.
        while tasks.try_join_next().is_some() {}
        tasks.spawn(async move {
            let outcome = match time::timeout(timeout, request.send()).await {
                Ok(Ok(response)) => {
                    let status = response.status();
                    tracing::info!(collector = %endpoint, status = %status, "Failure reported");
                    ReportOutcome::Delivered(status.as_u16())
                }
                Ok(Err(e)) => {
                    tracing::warn!(collector = %endpoint, error = %e, "Failure report not delivered");
                    ReportOutcome::Failed
                }
                Err(_) => {
                    tracing::warn!(
                        collector = %endpoint,
                        timeout_ms = timeout.as_millis() as u64,
                        "Failure report timed out"
                    );
                    ReportOutcome::TimedOut
                }
            };
            metrics::record_report(outcome.label());
            outcome
        });
    }

    /// Number of reports spawned and not yet reaped.
    pub fn in_flight(&self) -> usize {
        self.lock_tasks().len()
    }

    /// Wait up to `deadline` for outstanding reports, then abort the rest.
    ///
    /// Returns the outcomes of the reports that finished.
    pub async fn drain(&self, deadline: Duration) -> Vec<ReportOutcome> {
        let mut tasks = std::mem::take(&mut *self.lock_tasks());
        let mut outcomes = Vec::with_capacity(tasks.len());

        let finished = time::timeout(deadline, async {
            while let Some(joined) = tasks.join_next().await {
                if let Ok(outcome) = joined {
                    outcomes.push(outcome);
                }
            }
        })
        .await;

        if finished.is_err() {
            tracing::warn!(pending = tasks.len(), "Aborting undelivered failure reports");
            tasks.abort_all();
        }
        outcomes
    }

    fn lock_tasks(&self) -> MutexGuard<'_, JoinSet<ReportOutcome>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Store, triggers, chaos job, reporter, handlers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of formatted messages where possible
//! - Request ID flows through the HTTP trace span
//! - Metrics are cheap (no recorder means no-op)

pub mod logging;
pub mod metrics;

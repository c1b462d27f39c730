//! Downstream failure reporting.
//!
//! # Data Flow
//! ```text
//! health check observes a bad flag
//!     → client.rs report_failure()
//!     → spawned task: POST {type, from, timestamp} to the collector
//!     → outcome logged + counted, never returned to the HTTP caller
//! ```
//!
//! # Design Decisions
//! - Best effort: one attempt, bounded by a timeout, no retry
//! - Tasks are tracked so shutdown and tests can wait for them
//! - Only the collector's status code is read, never its body

pub mod client;
pub mod event;

pub use client::{DownstreamReporter, ReportOutcome, ReporterError};
pub use event::ReportEvent;

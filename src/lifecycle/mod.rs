//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Reset state store → Start watcher → Build subsystems → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Stop chaos job → Drain reports → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when ready)
//! - Report draining is bounded by the reporter timeout

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{prepare, prepare_with_executor, Harness, StartupError};

//! Failure injection.
//!
//! # Data Flow
//! ```text
//! GET /break        → trigger.rs auto_trigger()   → healthy=false
//! GET /breakManual  → trigger.rs manual_trigger() → manual_config=invalid
//! GET /addcron      → scheduler.rs start()  → every interval: auto_trigger()
//! GET /removecron   → scheduler.rs stop()
//! ```
//!
//! # Design Decisions
//! - No trigger clears a failure; `healthy` recovers on restart only,
//!   `manual_config` only through an operator edit of the state file
//! - The scheduler is an owned service object, never a global
//! - Starting an already scheduled job is a no-op (no second timer, the
//!   running job keeps its phase)

pub mod scheduler;
pub mod trigger;

pub use scheduler::{ChaosScheduler, SchedulerState};
pub use trigger::{TriggerController, TriggerSource};

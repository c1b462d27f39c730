//! Persisted health state.
//!
//! # Data Flow
//! ```text
//! state file (key=value lines)
//!     → file.rs (parse, reset, atomic rewrite)
//!     → shared.rs (StateStore, authoritative in-memory copy)
//!     → trigger controller / chaos job (mutate)
//!     → HTTP health check (snapshot)
//!
//! External edit of the state file:
//!     watcher.rs detects change
//!     → StateStore::reload()
//!     → next health check observes the edit
//! ```
//!
//! # Design Decisions
//! - Exactly two flags exist; anything else in the file is dropped on rewrite
//! - Startup reset keeps `manual_config` and forces `healthy=true`
//! - Every mutation is read-modify-persist under one lock (no lost updates)
//! - A failed reload poisons the store until the file is readable again

pub mod error;
pub mod file;
pub mod shared;
pub mod state;
pub mod watcher;

pub use error::StoreError;
pub use shared::StateStore;
pub use state::{HealthState, ManualConfig, HEALTHY_KEY, MANUAL_CONFIG_KEY};
pub use watcher::StateWatcher;

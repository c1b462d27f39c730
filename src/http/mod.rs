//! HTTP facade.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → handlers.rs  GET /            → store snapshot → reporter on failure
//!                    GET /break       → auto trigger
//!                    GET /breakManual → manual trigger
//!                    GET /addcron     → scheduler start
//!                    GET /removecron  → scheduler stop
//!     → docker.rs    POST /docker-state → container control
//!     → response.rs (fixed bodies)
//! ```

pub mod docker;
pub mod handlers;
pub mod page;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};

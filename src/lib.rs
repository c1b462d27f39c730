//! Controllable fault-injection harness.
//!
//! An HTTP service that can be broken on demand or on a timer so that
//! monitoring and alerting pipelines can be exercised end to end.

pub mod chaos;
pub mod config;
pub mod container;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod reporter;
pub mod store;

pub use config::HarnessConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

//! Fixed response bodies.
//!
//! Store faults are deliberately opaque: every cause maps to the same
//! generic 500, so clients cannot tell a bad flag from a broken file.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Body of every acknowledged trigger.
pub const SUCCESS: &str = "success";

/// Body when a health check observes a failure flag.
pub const UNHEALTHY: &str = "Internal server error. I am not healthy :(";

/// Body for faults with no further detail.
pub const INTERNAL_ERROR: &str = "Internal Server Error";

pub fn acknowledged() -> Response {
    (StatusCode::OK, SUCCESS).into_response()
}

pub fn unhealthy() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, UNHEALTHY).into_response()
}

pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response()
}

//! # REST API Interface Layer
//!
//! HTTP endpoints for guide and package availability.
//! This layer handles:
//! - JSON request/response serialization
//! - Parsing owners and dates out of paths and bodies
//! - Translating domain errors into HTTP status codes
//!
//! It is a pure translation layer; every rule lives in the domain.

pub mod availability_apis;
pub mod calendar_apis;
pub mod mappers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::backend::domain::models::availability::{AvailabilityError, AvailabilityOwner};

/// Build an owner from the `:owner_kind/:owner_id` path segments
pub fn parse_owner(owner_kind: &str, owner_id: &str) -> Result<AvailabilityOwner, AvailabilityError> {
    AvailabilityOwner::new(owner_kind.parse()?, owner_id)
}

/// Map a domain error to a status code and JSON error body
pub fn error_response(err: AvailabilityError) -> Response {
    let status = if err.is_client_error() {
        warn!("Rejected request: {}", err);
        StatusCode::BAD_REQUEST
    } else {
        error!("Request failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(ErrorResponse { error: err.to_string() })).into_response()
}

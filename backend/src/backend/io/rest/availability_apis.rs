use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use shared::{
    AvailabilityResponse, BookingResponse, DateStatusQuery, DiscardChangesResponse,
    RecordBookingRequest, SaveAvailabilityResponse, ToggleDateRequest,
};
use tracing::info;

use super::calendar_apis;
use super::mappers::availability_mapper::AvailabilityMapper;
use super::{error_response, parse_owner};
use crate::backend::domain::commands::availability::{
    RecordBookingCommand, ReleaseBookingCommand, ToggleDateCommand,
};
use crate::backend::domain::models::availability::{parse_calendar_day, AvailabilityOwner};
use crate::backend::AppState;

/// Create a router for availability related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:owner_kind/:owner_id", get(get_availability))
        .route("/:owner_kind/:owner_id/status", get(get_date_status))
        .route("/:owner_kind/:owner_id/toggle", post(toggle_date))
        .route("/:owner_kind/:owner_id/bookings", post(record_booking))
        .route("/:owner_kind/:owner_id/bookings/:date", delete(release_booking))
        .route("/:owner_kind/:owner_id/buckets", get(get_buckets))
        .route("/:owner_kind/:owner_id/month", get(calendar_apis::get_availability_month))
        .route("/:owner_kind/:owner_id/save", post(save_availability))
        .route("/:owner_kind/:owner_id/discard", post(discard_changes))
}

/// Get the current working set
async fn get_availability(
    State(state): State<AppState>,
    Path((owner_kind, owner_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/availability/{}/{}", owner_kind, owner_id);

    let owner = match parse_owner(&owner_kind, &owner_id) {
        Ok(owner) => owner,
        Err(e) => return error_response(e),
    };

    match state.availability_service.get_availability(&owner).await {
        Ok(records) => {
            let response = AvailabilityResponse {
                owner_kind: AvailabilityMapper::owner_kind_to_dto(owner.kind),
                owner_id: owner.id,
                records: AvailabilityMapper::to_dto_list(records),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Resolve the status of a single date
async fn get_date_status(
    State(state): State<AppState>,
    Path((owner_kind, owner_id)): Path<(String, String)>,
    Query(query): Query<DateStatusQuery>,
) -> impl IntoResponse {
    info!("GET /api/availability/{}/{}/status - query: {:?}", owner_kind, owner_id, query);

    let parsed = parse_owner(&owner_kind, &owner_id)
        .and_then(|owner| Ok((owner, parse_calendar_day(&query.date)?)));
    let (owner, date) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => return error_response(e),
    };

    match state.availability_service.get_date_status(&owner, date).await {
        Ok(result) => {
            (StatusCode::OK, Json(AvailabilityMapper::to_date_status_response(result))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Flip the availability of a date
async fn toggle_date(
    State(state): State<AppState>,
    Path((owner_kind, owner_id)): Path<(String, String)>,
    Json(request): Json<ToggleDateRequest>,
) -> impl IntoResponse {
    info!("POST /api/availability/{}/{}/toggle - request: {:?}", owner_kind, owner_id, request);

    let command = match parse_owner(&owner_kind, &owner_id)
        .and_then(|owner| Ok(ToggleDateCommand { owner, date: parse_calendar_day(&request.date)? }))
    {
        Ok(command) => command,
        Err(e) => return error_response(e),
    };

    match state.availability_service.toggle_date(command).await {
        Ok(result) => (StatusCode::OK, Json(AvailabilityMapper::to_toggle_response(result))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Attach a confirmed booking to a date
async fn record_booking(
    State(state): State<AppState>,
    Path((owner_kind, owner_id)): Path<(String, String)>,
    Json(request): Json<RecordBookingRequest>,
) -> impl IntoResponse {
    info!("POST /api/availability/{}/{}/bookings - request: {:?}", owner_kind, owner_id, request);

    let command = match parse_owner(&owner_kind, &owner_id).and_then(|owner| {
        Ok(RecordBookingCommand {
            owner,
            date: parse_calendar_day(&request.date)?,
            booking_id: request.booking_id,
            label: request.label,
        })
    }) {
        Ok(command) => command,
        Err(e) => return error_response(e),
    };

    let date = command.date;
    match state.availability_service.record_booking(command).await {
        Ok(record) => {
            let response = BookingResponse {
                success_message: format!(
                    "Booking {} recorded on {}",
                    record.booking_id.as_deref().unwrap_or_default(),
                    date
                ),
                record: AvailabilityMapper::to_dto(record),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Remove a cancelled booking from a date
async fn release_booking(
    State(state): State<AppState>,
    Path((owner_kind, owner_id, date)): Path<(String, String, String)>,
) -> impl IntoResponse {
    info!("DELETE /api/availability/{}/{}/bookings/{}", owner_kind, owner_id, date);

    let command = match parse_owner(&owner_kind, &owner_id)
        .and_then(|owner| Ok(ReleaseBookingCommand { owner, date: parse_calendar_day(&date)? }))
    {
        Ok(command) => command,
        Err(e) => return error_response(e),
    };

    let date = command.date;
    match state.availability_service.release_booking(command).await {
        Ok(record) => {
            let response = BookingResponse {
                record: AvailabilityMapper::to_dto(record),
                success_message: format!("Booking released on {}", date),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Get the three calendar buckets
async fn get_buckets(
    State(state): State<AppState>,
    Path((owner_kind, owner_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/availability/{}/{}/buckets", owner_kind, owner_id);

    let owner = match parse_owner(&owner_kind, &owner_id) {
        Ok(owner) => owner,
        Err(e) => return error_response(e),
    };

    match state.availability_service.get_buckets(&owner).await {
        Ok(buckets) => (StatusCode::OK, Json(AvailabilityMapper::buckets_to_dto(buckets))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Persist the full working set
async fn save_availability(
    State(state): State<AppState>,
    Path((owner_kind, owner_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("POST /api/availability/{}/{}/save", owner_kind, owner_id);

    let owner = match parse_owner(&owner_kind, &owner_id) {
        Ok(owner) => owner,
        Err(e) => return error_response(e),
    };

    match state.availability_service.save(&owner).await {
        Ok(result) => {
            let response = SaveAvailabilityResponse {
                saved_count: result.saved_count,
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Drop unsaved changes
async fn discard_changes(
    State(state): State<AppState>,
    Path((owner_kind, owner_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("POST /api/availability/{}/{}/discard", owner_kind, owner_id);

    let owner: AvailabilityOwner = match parse_owner(&owner_kind, &owner_id) {
        Ok(owner) => owner,
        Err(e) => return error_response(e),
    };

    let discarded = state.availability_service.discard_changes(&owner).await;
    let response = DiscardChangesResponse {
        discarded,
        success_message: if discarded {
            format!("Discarded unsaved changes for {} {}", owner.kind, owner.id)
        } else {
            format!("No unsaved changes for {} {}", owner.kind, owner.id)
        },
    };
    (StatusCode::OK, Json(response)).into_response()
}

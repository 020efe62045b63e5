use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::CalendarMonthQuery;
use tracing::info;

use super::{error_response, parse_owner};
use crate::backend::domain::commands::availability::CalendarMonthQuery as MonthQuery;
use crate::backend::AppState;

/// Get one month of availability laid out for a calendar grid
pub async fn get_availability_month(
    State(state): State<AppState>,
    Path((owner_kind, owner_id)): Path<(String, String)>,
    Query(query): Query<CalendarMonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/availability/{}/{}/month - query: {:?}", owner_kind, owner_id, query);

    let owner = match parse_owner(&owner_kind, &owner_id) {
        Ok(owner) => owner,
        Err(e) => return error_response(e),
    };

    let month_query = MonthQuery {
        owner,
        month: query.month,
        year: query.year,
    };

    match state.availability_service.get_calendar_month(month_query).await {
        Ok(calendar_month) => {
            info!(
                "Calendar generated for {} {} with {} cells",
                calendar_month.month_name,
                calendar_month.year,
                calendar_month.days.len()
            );
            (StatusCode::OK, Json(calendar_month)).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::storage::csv::test_utils::TestEnvironment;
    use crate::backend::{create_router, AppState};
    use axum::body::Body;
    use axum::http::{HeaderValue, Method, Request, StatusCode};
    use shared::{AvailabilityCalendarMonth, CalendarDayType, DateStatus, ErrorResponse};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_get_availability_month() -> Result<(), Box<dyn std::error::Error>> {
        let env = TestEnvironment::new().await?;
        let app = create_router(AppState::new(env.connection.clone()), HeaderValue::from_static("http://localhost:8080"));

        let toggle = Request::builder()
            .uri("/api/availability/guides/g-1/toggle")
            .method(Method::POST)
            .header("content-type", "application/json")
            .body(Body::from(r#"{"date":"2025-06-13"}"#))?;
        let response = app.clone().oneshot(toggle).await?;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/availability/guides/g-1/month?month=6&year=2025")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let calendar: AvailabilityCalendarMonth = serde_json::from_slice(&body)?;

        assert_eq!(calendar.month_name, "June");
        // June 1st 2025 was a Sunday
        assert_eq!(calendar.first_day_of_week, 0);
        assert_eq!(calendar.days.len(), 30);

        let day_13 = calendar
            .days
            .iter()
            .find(|d| d.day == 13 && d.day_type == CalendarDayType::MonthDay)
            .ok_or("day 13 missing")?;
        assert_eq!(day_13.status, DateStatus::Available);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_month_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
        let env = TestEnvironment::new().await?;
        let app = create_router(AppState::new(env.connection.clone()), HeaderValue::from_static("http://localhost:8080"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/availability/packages/p-1/month?month=13&year=2025")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_range_year_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
        let env = TestEnvironment::new().await?;
        let app = create_router(AppState::new(env.connection.clone()), HeaderValue::from_static("http://localhost:8080"));

        for uri in [
            "/api/availability/guides/g-1/month?month=1&year=0",
            "/api/availability/guides/g-1/month?month=12&year=4294967295",
            "/api/availability/guides/g-1/month?month=6&year=1000000",
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).method(Method::GET).body(Body::empty())?)
                .await?;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
            let error: ErrorResponse = serde_json::from_slice(&body)?;
            assert!(error.error.contains("Invalid year"), "{}", error.error);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_month_at_year_edge_has_no_next_link() -> Result<(), Box<dyn std::error::Error>> {
        let env = TestEnvironment::new().await?;
        let app = create_router(AppState::new(env.connection.clone()), HeaderValue::from_static("http://localhost:8080"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/availability/guides/g-1/month?month=12&year=9999")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let calendar: AvailabilityCalendarMonth = serde_json::from_slice(&body)?;
        assert_eq!(calendar.next, None);
        assert!(calendar.previous.is_some());
        Ok(())
    }
}

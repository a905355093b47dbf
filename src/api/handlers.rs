//! HTTP request handlers for the booking engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler reads a business snapshot from the repository, runs the
//! scheduling core against it and maps [`EngineError`]s onto JSON errors.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Booking, BookingStatus, Business, total_duration};
use crate::scheduling::{
    AffectedBooking, EmployeeSelector, MinuteRange, TimeContext, explain_assignment,
    find_available_employee_for_slot, get_available_slots, minutes_to_time, time_to_minutes,
};

use super::request::{AssignmentRequest, AvailabilityRequest, BookingRequest, HoursUpdateRequest};
use super::response::{
    ApiError, ApiErrorResponse, AssignmentResponse, AvailabilityResponse, HoursUpdateResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/availability", post(availability_handler))
        .route("/assignment", post(assignment_handler))
        .route("/bookings", post(booking_handler))
        .route("/businesses/:id", get(business_handler))
        .route("/businesses/:id/hours", put(business_hours_handler))
        .route(
            "/businesses/:id/employees/:employee_id/hours",
            put(employee_hours_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure onto a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /availability.
async fn availability_handler(
    State(state): State<AppState>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing availability request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    match compute_availability(&state, &request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                business_id = %request.business_id,
                date = %request.date,
                employee = %request.employee,
                slot_count = result.slots.len(),
                duration_us = started.elapsed().as_micros(),
                "Availability computed"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn compute_availability(
    state: &AppState,
    request: &AvailabilityRequest,
) -> EngineResult<AvailabilityResponse> {
    let business = state.repository().business(&request.business_id)?;
    let services = business.services_by_ids(&request.service_ids)?;
    if let EmployeeSelector::Specific(id) = &request.employee {
        business.employee(id)?;
    }

    let options = state.settings().slot_options(state.clock().now());
    let slots = get_available_slots(request.date, &services, &business, &request.employee, &options);

    Ok(AvailabilityResponse {
        business_id: business.id,
        date: request.date,
        slots,
        total_duration: total_duration(&services),
    })
}

/// Handler for POST /assignment.
async fn assignment_handler(
    State(state): State<AppState>,
    payload: Result<Json<AssignmentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing assignment request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match resolve_assignment(&state, &request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                business_id = %request.business_id,
                date = %request.date,
                start = %request.start,
                employee_id = result.employee_id.as_deref().unwrap_or("none"),
                "Assignment resolved"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn resolve_assignment(
    state: &AppState,
    request: &AssignmentRequest,
) -> EngineResult<AssignmentResponse> {
    let business = state.repository().business(&request.business_id)?;
    let services = business.services_by_ids(&request.service_ids)?;
    time_to_minutes(&request.start, TimeContext::Open)?;

    let total = total_duration(&services);
    let chosen = find_available_employee_for_slot(request.date, &request.start, total, &services, &business);
    let candidates = explain_assignment(request.date, &request.start, total, &services, &business);

    Ok(AssignmentResponse {
        employee_id: chosen.map(|e| e.id.clone()),
        employee_name: chosen.map(|e| e.name.clone()),
        candidates,
    })
}

/// Handler for POST /bookings.
async fn booking_handler(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing booking request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match create_booking(&state, request) {
        Ok(booking) => {
            info!(
                correlation_id = %correlation_id,
                booking_id = %booking.id,
                employee_id = %booking.employee_id,
                "Booking accepted"
            );
            json_response(StatusCode::CREATED, booking)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Re-checks the slot against a fresh snapshot, resolves the employee and
/// stores the booking.
fn create_booking(state: &AppState, request: BookingRequest) -> EngineResult<Booking> {
    let business = state.repository().business(&request.business_id)?;
    let services = business.services_by_ids(&request.service_ids)?;
    if services.is_empty() {
        return Err(EngineError::InvalidBooking {
            message: "at least one service is required".to_string(),
        });
    }
    if let EmployeeSelector::Specific(id) = &request.employee {
        business.employee(id)?;
    }

    let start_minutes = time_to_minutes(&request.start, TimeContext::Open)?;
    let start = minutes_to_time(start_minutes);
    let total = total_duration(&services);
    let date = request.date.format("%Y-%m-%d").to_string();

    let unavailable = || EngineError::NoAvailableEmployee {
        date: date.clone(),
        start: start.clone(),
    };

    let options = state.settings().slot_options(state.clock().now());
    let slots = get_available_slots(request.date, &services, &business, &request.employee, &options);
    if !slots.contains(&start) {
        return Err(unavailable());
    }

    let employee_id = match &request.employee {
        EmployeeSelector::Specific(id) => id.clone(),
        EmployeeSelector::Any => {
            find_available_employee_for_slot(request.date, &start, total, &services, &business)
                .map(|e| e.id.clone())
                .ok_or_else(unavailable)?
        }
    };

    let booking = Booking {
        id: format!("bk_{}", Uuid::new_v4().simple()),
        date: date.clone(),
        end: minutes_to_time(MinuteRange::starting_at(start_minutes, total).end),
        start: start.clone(),
        employee_id,
        services: request.service_ids,
        status: BookingStatus::Pending,
        client_name: request.client_name,
    };

    state.repository().create_booking(&business.id, booking)
}

/// Handler for GET /businesses/:id.
async fn business_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, business_id = %id, "Fetching business");

    match state.repository().business(&id) {
        Ok(business) => json_response::<Business>(StatusCode::OK, business),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /businesses/:id/hours.
async fn business_hours_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<HoursUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, business_id = %id, "Processing business hours update");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = state.repository().update_business_hours(
        &id,
        request.hours,
        state.clock().today(),
        request.confirm,
    );
    hours_update_response(correlation_id, result)
}

/// Handler for PUT /businesses/:id/employees/:employee_id/hours.
async fn employee_hours_handler(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(String, String)>,
    payload: Result<Json<HoursUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        business_id = %id,
        employee_id = %employee_id,
        "Processing employee hours update"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = state.repository().update_employee_hours(
        &id,
        &employee_id,
        request.hours,
        state.clock().today(),
        request.confirm,
    );
    hours_update_response(correlation_id, result)
}

fn hours_update_response(
    correlation_id: Uuid,
    result: EngineResult<Vec<AffectedBooking>>,
) -> Response {
    match result {
        Ok(affected_bookings) => {
            info!(
                correlation_id = %correlation_id,
                affected_count = affected_bookings.len(),
                "Hours updated"
            );
            json_response(
                StatusCode::OK,
                HoursUpdateResponse {
                    updated: true,
                    affected_bookings,
                },
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::EngineSettings;
    use crate::repository::InMemoryRepository;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use tower::ServiceExt;

    // Sunday 2026-01-11 08:00, the day before the Monday under test
    fn create_test_state() -> AppState {
        let business: Business = serde_json::from_str(
            r#"{
                "id": "biz_001",
                "hours": {
                    "monday": {"enabled": true, "intervals": [{"open": "09:00", "close": "11:00"}]},
                    "sunday": {"enabled": false}
                },
                "employees": [{"id": "e1", "name": "Alex"}, {"id": "e2", "name": "Sam"}],
                "services": [
                    {"id": "svc_cut", "duration": 30},
                    {"id": "svc_beard", "duration": 20, "employee_ids": ["e2"]}
                ],
                "bookings": []
            }"#,
        )
        .unwrap();
        let now = NaiveDate::from_ymd_opt(2026, 1, 11)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        AppState::new(EngineSettings::default(), InMemoryRepository::new(vec![business]), FixedClock(now))
    }

    async fn send(router: Router, method: &str, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_availability_returns_slots() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/availability",
            r#"{"business_id": "biz_001", "date": "2026-01-12", "service_ids": ["svc_cut"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result: AvailabilityResponse = serde_json::from_value(body).unwrap();
        assert_eq!(result.total_duration, 30);
        assert_eq!(
            result.slots,
            vec!["09:00", "09:15", "09:30", "09:45", "10:00", "10:15", "10:30"]
        );
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, "POST", "/availability", "{invalid json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/availability",
            r#"{"business_id": "biz_001", "date": "2026-01-12"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("service_ids"));
    }

    #[tokio::test]
    async fn test_unknown_business_returns_404() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/availability",
            r#"{"business_id": "nope", "date": "2026-01-12", "service_ids": ["svc_cut"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "BUSINESS_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_assignment_picks_qualified_employee() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/assignment",
            r#"{"business_id": "biz_001", "date": "2026-01-12", "start": "09:00",
                "service_ids": ["svc_cut", "svc_beard"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result: AssignmentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(result.employee_id.as_deref(), Some("e2"));
        assert_eq!(result.employee_name.as_deref(), Some("Sam"));
        assert_eq!(result.candidates.len(), 2);
    }

    #[tokio::test]
    async fn test_assignment_invalid_start_returns_400() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/assignment",
            r#"{"business_id": "biz_001", "date": "2026-01-12", "start": "9am",
                "service_ids": ["svc_cut"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_TIME");
    }

    #[tokio::test]
    async fn test_booking_created_then_slot_taken() {
        let state = create_test_state();
        let request = r#"{"business_id": "biz_001", "date": "2026-01-12", "start": "10:30",
                          "service_ids": ["svc_cut"], "employee": "e1", "client_name": "Jo"}"#;

        let (status, body) = send(create_router(state.clone()), "POST", "/bookings", request).await;
        assert_eq!(status, StatusCode::CREATED);
        let booking: Booking = serde_json::from_value(body).unwrap();
        assert_eq!(booking.employee_id, "e1");
        assert_eq!(booking.end, "11:00");
        assert_eq!(booking.status, BookingStatus::Pending);

        let (status, body) = send(create_router(state), "POST", "/bookings", request).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "SLOT_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_business_hours_update_invalid_returns_400() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "PUT",
            "/businesses/biz_001/hours",
            r#"{"hours": {"monday": {"enabled": true, "intervals": []}}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_HOURS");
    }

    #[tokio::test]
    async fn test_business_fetch() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/businesses/biz_001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let business: Business = serde_json::from_slice(&body).unwrap();
        assert_eq!(business.employees.len(), 2);
    }
}

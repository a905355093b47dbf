//! Response types for the booking engine API.
//!
//! This module defines the success bodies, the error response structure and
//! the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::scheduling::{AffectedBooking, CandidateOutcome};

/// Response body for `POST /availability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The business searched.
    pub business_id: String,
    /// The requested date.
    pub date: NaiveDate,
    /// Bookable start times, "HH:MM", in chronological order.
    pub slots: Vec<String>,
    /// Length of the booked window in minutes, buffers included.
    pub total_duration: u32,
}

/// Response body for `POST /assignment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResponse {
    /// The chosen employee, or `null` when nobody can take the slot.
    pub employee_id: Option<String>,
    /// Display name of the chosen employee.
    pub employee_name: Option<String>,
    /// The decision for every employee, in assignment order.
    pub candidates: Vec<CandidateOutcome>,
}

/// Response body for the hours update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursUpdateResponse {
    /// Always true on success.
    pub updated: bool,
    /// Bookings left outside the new hours that the caller confirmed.
    #[serde(default)]
    pub affected_bookings: Vec<AffectedBooking>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Bookings blocking an hours change.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_bookings: Vec<AffectedBooking>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            affected_bookings: Vec::new(),
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                )
            }
            EngineError::BusinessNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("BUSINESS_NOT_FOUND", message),
            ),
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::ServiceNotFound { id } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "SERVICE_NOT_FOUND",
                    message,
                    format!("The service '{}' is not offered by this business", id),
                ),
            ),
            EngineError::InvalidTime { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_TIME", message),
            ),
            EngineError::InvalidHours { day, .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_HOURS",
                    message,
                    format!("Fix the intervals for {} and resubmit", day),
                ),
            ),
            EngineError::HoursConflict { affected } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError {
                    affected_bookings: affected,
                    ..ApiError::with_details(
                        "HOURS_CONFLICT",
                        message,
                        "Resubmit with \"confirm\": true to apply the change anyway",
                    )
                },
            ),
            EngineError::BookingConflict { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::new("BOOKING_CONFLICT", message),
            ),
            EngineError::NoAvailableEmployee { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "SLOT_UNAVAILABLE",
                    message,
                    "Request availability again and pick one of the returned slots",
                ),
            ),
            EngineError::InvalidBooking { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_BOOKING", message),
            ),
        }
    }
}

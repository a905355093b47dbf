//! Request types for the booking engine API.
//!
//! This module defines the JSON request bodies for every endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Hours;
use crate::scheduling::EmployeeSelector;

fn any_employee() -> EmployeeSelector {
    EmployeeSelector::Any
}

/// Request body for `POST /availability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    /// The business to search.
    pub business_id: String,
    /// The requested date.
    pub date: NaiveDate,
    /// The services to book back to back.
    pub service_ids: Vec<String>,
    /// `"any"` or a specific employee id. Defaults to `"any"`.
    #[serde(default = "any_employee")]
    pub employee: EmployeeSelector,
}

/// Request body for `POST /assignment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRequest {
    /// The business to search.
    pub business_id: String,
    /// The requested date.
    pub date: NaiveDate,
    /// The chosen start time, "HH:MM".
    pub start: String,
    /// The services to book back to back.
    pub service_ids: Vec<String>,
}

/// Request body for `POST /bookings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    /// The business to book with.
    pub business_id: String,
    /// The requested date.
    pub date: NaiveDate,
    /// The chosen start time, "HH:MM".
    pub start: String,
    /// The services to book back to back.
    pub service_ids: Vec<String>,
    /// `"any"` or a specific employee id. Defaults to `"any"`.
    #[serde(default = "any_employee")]
    pub employee: EmployeeSelector,
    /// Name of the client.
    #[serde(default)]
    pub client_name: Option<String>,
}

/// Request body for the hours update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursUpdateRequest {
    /// The new weekly hours.
    pub hours: Hours,
    /// Apply the change even when upcoming bookings fall outside it.
    #[serde(default)]
    pub confirm: bool,
}

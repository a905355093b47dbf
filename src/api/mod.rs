//! HTTP API module for the booking engine.
//!
//! This module provides the REST endpoints for availability search,
//! employee assignment, booking creation and hours changes.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AssignmentRequest, AvailabilityRequest, BookingRequest, HoursUpdateRequest};
pub use response::{
    ApiError, ApiErrorResponse, AssignmentResponse, AvailabilityResponse, HoursUpdateResponse,
};
pub use state::AppState;

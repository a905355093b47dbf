//! Error types for the booking engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine surfaces at its editing and persistence
//! boundaries. Slot generation and employee assignment never error; an
//! empty result is their "nothing available" signal.

use thiserror::Error;

use crate::models::DayOfWeek;
use crate::scheduling::AffectedBooking;

/// The main error type for the booking engine.
///
/// # Example
///
/// ```
/// use booking_engine::error::EngineError;
///
/// let error = EngineError::BusinessNotFound {
///     id: "biz_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Business not found: biz_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No business with the given id exists.
    #[error("Business not found: {id}")]
    BusinessNotFound {
        /// The business id that was not found.
        id: String,
    },

    /// No employee with the given id exists in the business.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: String,
    },

    /// No service with the given id exists in the business.
    #[error("Service not found: {id}")]
    ServiceNotFound {
        /// The service id that was not found.
        id: String,
    },

    /// A time-of-day string was not in "HH:MM" form.
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime {
        /// The offending value.
        value: String,
    },

    /// The hours for a day failed validation.
    #[error("Invalid hours for {day}: {message}")]
    InvalidHours {
        /// The day whose intervals are invalid.
        day: DayOfWeek,
        /// A description of what made the hours invalid.
        message: String,
    },

    /// An hours change would leave existing bookings outside working time.
    #[error("Hours change affects {} booking(s): {}", .affected.len(), describe_affected(.affected))]
    HoursConflict {
        /// The bookings that no longer fit.
        affected: Vec<AffectedBooking>,
    },

    /// A booking overlaps an existing booking of the same employee.
    #[error(
        "Booking conflict for employee '{employee_id}' on {date} {start}-{end} (existing booking '{existing_id}')"
    )]
    BookingConflict {
        /// The employee who is already booked.
        employee_id: String,
        /// The requested date.
        date: String,
        /// The requested start time.
        start: String,
        /// The requested end time.
        end: String,
        /// The booking already occupying the window.
        existing_id: String,
    },

    /// No employee can take the requested slot.
    #[error("No employee available on {date} at {start}")]
    NoAvailableEmployee {
        /// The requested date.
        date: String,
        /// The requested start time.
        start: String,
    },

    /// A booking request was invalid or contained inconsistent data.
    #[error("Invalid booking: {message}")]
    InvalidBooking {
        /// A description of what made the booking invalid.
        message: String,
    },
}

fn describe_affected(affected: &[AffectedBooking]) -> String {
    affected
        .iter()
        .map(|a| format!("{} on {} {}-{}", a.booking_id, a.date, a.start, a.end))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Booking model.
//!
//! Bookings arrive from persistence with their date and times as raw
//! strings. They are parsed lazily so that a malformed record can be
//! treated as occupying time instead of being silently skipped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Requested but not yet confirmed.
    Pending,
    /// Confirmed by the business.
    Confirmed,
    /// The appointment took place.
    Completed,
    /// The client did not show up.
    NoShow,
    /// Cancelled; does not occupy time.
    Cancelled,
    /// Any status this engine does not recognise.
    #[serde(other)]
    Unknown,
}

/// An existing appointment occupying an employee's time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking.
    pub id: String,
    /// Date of the booking, "YYYY-MM-DD".
    pub date: String,
    /// Start time, "HH:MM".
    pub start: String,
    /// End time, "HH:MM".
    pub end: String,
    /// The employee performing the booking.
    pub employee_id: String,
    /// Ids of the booked services.
    #[serde(default)]
    pub services: Vec<String>,
    /// Current status.
    pub status: BookingStatus,
    /// Name of the client, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
}

impl Booking {
    /// Returns true unless the booking was cancelled.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_engine::models::{Booking, BookingStatus};
    ///
    /// let booking = Booking {
    ///     id: "bk_001".to_string(),
    ///     date: "2026-01-12".to_string(),
    ///     start: "10:00".to_string(),
    ///     end: "11:00".to_string(),
    ///     employee_id: "e1".to_string(),
    ///     services: vec![],
    ///     status: BookingStatus::Cancelled,
    ///     client_name: None,
    /// };
    /// assert!(!booking.occupies_time());
    /// ```
    pub fn occupies_time(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// Parses the booking date, returning `None` when it is malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_booking() {
        let json = r#"{
            "id": "bk_001",
            "date": "2026-01-12",
            "start": "10:00",
            "end": "11:00",
            "employee_id": "e1",
            "services": ["svc_cut"],
            "status": "confirmed"
        }"#;

        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert!(booking.occupies_time());
        assert_eq!(
            booking.parsed_date(),
            NaiveDate::from_ymd_opt(2026, 1, 12)
        );
        assert!(booking.client_name.is_none());
    }

    #[test]
    fn test_unknown_status_still_occupies_time() {
        let json = r#"{
            "id": "bk_002",
            "date": "2026-01-12",
            "start": "10:00",
            "end": "11:00",
            "employee_id": "e1",
            "status": "rescheduled"
        }"#;

        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.status, BookingStatus::Unknown);
        assert!(booking.occupies_time());
    }

    #[test]
    fn test_malformed_date_does_not_parse() {
        let booking = Booking {
            id: "bk_003".to_string(),
            date: "12/01/2026".to_string(),
            start: "10:00".to_string(),
            end: "11:00".to_string(),
            employee_id: "e1".to_string(),
            services: vec![],
            status: BookingStatus::Pending,
            client_name: None,
        };
        assert!(booking.parsed_date().is_none());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::NoShow).unwrap(),
            "\"no_show\""
        );
        assert_eq!(
            serde_json::to_string(&BookingStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}

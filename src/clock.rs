//! Wall-clock access.
//!
//! The scheduling core never reads the clock itself. Callers obtain "now"
//! from a [`Clock`] and pass it down, which keeps lead-time filtering and
//! the affected-bookings check deterministic under test.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// A source of the current local date and time.
pub trait Clock: Send + Sync {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system clock in the server's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
///
/// # Example
///
/// ```
/// use booking_engine::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// let clock = FixedClock(now);
/// assert_eq!(clock.today(), now.date());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

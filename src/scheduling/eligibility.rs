//! Per-employee eligibility checks shared by slot generation and assignment.
//!
//! An employee can take a window when they are qualified for every selected
//! service, the window fits inside one interval of their own effective
//! hours, and none of their time-occupying bookings overlaps it. The hours
//! that cover a date include the after-midnight tail of the previous day's
//! overnight intervals.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Booking, Business, DayHours, DayOfWeek, Employee, Hours, Service};

use super::time_arithmetic::{MINUTES_PER_DAY, MinuteRange, interval_to_range, time_range};

/// Which employee a request is for.
///
/// Serialized as the string `"any"` or the employee id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmployeeSelector {
    /// Any qualified employee.
    Any,
    /// One specific employee, by id.
    Specific(String),
}

impl From<String> for EmployeeSelector {
    fn from(value: String) -> Self {
        if value == "any" {
            EmployeeSelector::Any
        } else {
            EmployeeSelector::Specific(value)
        }
    }
}

impl From<&str> for EmployeeSelector {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<EmployeeSelector> for String {
    fn from(selector: EmployeeSelector) -> Self {
        match selector {
            EmployeeSelector::Any => "any".to_string(),
            EmployeeSelector::Specific(id) => id,
        }
    }
}

impl fmt::Display for EmployeeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeSelector::Any => f.write_str("any"),
            EmployeeSelector::Specific(id) => f.write_str(id),
        }
    }
}

/// Returns true when the employee may perform every selected service.
pub fn is_qualified(employee: &Employee, services: &[Service]) -> bool {
    services.iter().all(|s| s.allows(&employee.id))
}

/// Returns the qualified employees matching the selector, in business order.
///
/// # Examples
///
/// ```
/// use booking_engine::models::{Business, Employee, Service};
/// use booking_engine::scheduling::{qualified_employees, EmployeeSelector};
///
/// let business: Business = serde_json::from_str(r#"{
///     "id": "biz",
///     "employees": [{"id": "e1", "name": "A"}, {"id": "e2", "name": "B"}],
///     "services": [{"id": "s", "duration": 30, "employee_ids": ["e2"]}]
/// }"#).unwrap();
///
/// let qualified = qualified_employees(&business, &business.services, &EmployeeSelector::Any);
/// assert_eq!(qualified.len(), 1);
/// assert_eq!(qualified[0].id, "e2");
/// ```
pub fn qualified_employees<'a>(
    business: &'a Business,
    services: &[Service],
    selector: &EmployeeSelector,
) -> Vec<&'a Employee> {
    business
        .employees
        .iter()
        .filter(|e| match selector {
            EmployeeSelector::Any => true,
            EmployeeSelector::Specific(id) => &e.id == id,
        })
        .filter(|e| is_qualified(e, services))
        .collect()
}

/// Returns true when the window lies entirely inside one interval of the day.
///
/// Windows never span the gap between two intervals. Unparseable intervals
/// are skipped.
pub fn fits_day(day: &DayHours, window: &MinuteRange) -> bool {
    day_ranges(day).iter().any(|range| range.contains(window))
}

/// Returns the hours governing `day` for someone with optional personal
/// hours: the personal day when defined, otherwise the business day.
///
/// A business day that is closed or undefined yields `None` whatever the
/// personal hours say.
pub fn governing_day<'a>(
    business_hours: &'a Hours,
    personal: Option<&'a Hours>,
    day: DayOfWeek,
) -> Option<&'a DayHours> {
    if !business_hours.is_open(day) {
        return None;
    }
    personal
        .and_then(|hours| hours.day(day))
        .or_else(|| business_hours.day(day))
}

/// Returns the working ranges covering `date`, relative to its start.
///
/// These are the ranges of the date's own governing day plus the tail of
/// any interval of the previous governing day that runs past midnight,
/// shifted back by one day so it starts below zero.
///
/// # Examples
///
/// ```
/// use booking_engine::models::{DayHours, DayOfWeek, Hours, Interval};
/// use booking_engine::scheduling::{working_ranges, MinuteRange};
/// use chrono::NaiveDate;
///
/// let hours = Hours::new()
///     .with_day(DayOfWeek::Saturday, DayHours::open(vec![Interval::new("22:00", "02:00")]));
///
/// // 2026-01-18 is a Sunday
/// let sunday = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
/// assert_eq!(working_ranges(&hours, None, sunday), vec![MinuteRange { start: -120, end: 120 }]);
/// ```
pub fn working_ranges(
    business_hours: &Hours,
    personal: Option<&Hours>,
    date: NaiveDate,
) -> Vec<MinuteRange> {
    let own = governing_day(business_hours, personal, DayOfWeek::of(date))
        .map(day_ranges)
        .unwrap_or_default();

    let spill = date
        .pred_opt()
        .and_then(|previous| governing_day(business_hours, personal, DayOfWeek::of(previous)))
        .map(day_ranges)
        .unwrap_or_default()
        .into_iter()
        .filter(|range| range.end > MINUTES_PER_DAY)
        .map(|range| range.shifted_days(-1));

    own.into_iter().chain(spill).collect()
}

/// Working ranges of one employee covering `date`.
pub fn employee_working_ranges(
    employee: &Employee,
    business: &Business,
    date: NaiveDate,
) -> Vec<MinuteRange> {
    working_ranges(&business.hours, employee.hours.as_ref(), date)
}

fn day_ranges(day: &DayHours) -> Vec<MinuteRange> {
    day.active_intervals()
        .iter()
        .filter_map(|interval| match interval_to_range(interval) {
            Ok(range) => Some(range),
            Err(err) => {
                warn!(open = %interval.open, close = %interval.close, error = %err, "Skipping unparseable interval");
                None
            }
        })
        .collect()
}

/// Where a booking falls relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BookingPlacement {
    /// On a date too far away to interact with the reference day.
    Unrelated,
    /// Occupies this range, relative to the start of the reference day.
    At(MinuteRange),
    /// The date or times could not be parsed.
    Malformed,
}

/// Resolves a booking into a minute range relative to `date`.
///
/// Bookings on the previous or next day are shifted by a whole day so that
/// overnight windows can be compared.
pub(crate) fn place_booking(booking: &Booking, date: NaiveDate) -> BookingPlacement {
    let Some(booking_date) = booking.parsed_date() else {
        return BookingPlacement::Malformed;
    };
    let offset = (booking_date - date).num_days();
    if !(-1..=1).contains(&offset) {
        return BookingPlacement::Unrelated;
    }

    match time_range(&booking.start, &booking.end) {
        Ok(range) => BookingPlacement::At(range.shifted_days(offset as i32)),
        Err(_) => BookingPlacement::Malformed,
    }
}

/// Finds a time-occupying booking of the employee that blocks the window.
///
/// Malformed bookings of the employee count as blocking so that a bad
/// record can never lead to a double booking.
pub fn find_conflict<'a>(
    business: &'a Business,
    employee_id: &str,
    date: NaiveDate,
    window: &MinuteRange,
) -> Option<&'a Booking> {
    business
        .active_bookings_for(employee_id)
        .find(|booking| match place_booking(booking, date) {
            BookingPlacement::At(range) => range.overlaps(window),
            BookingPlacement::Unrelated => false,
            BookingPlacement::Malformed => {
                warn!(
                    booking_id = %booking.id,
                    employee_id = %employee_id,
                    "Malformed booking treated as conflicting"
                );
                true
            }
        })
}

//! Employee assignment for slots booked with "any employee".
//!
//! The resolver walks the business's employee list in order and picks the
//! first employee who is qualified, on schedule for the whole window
//! according to their own hours, and free of conflicting bookings. The list
//! order is the tie-break; there is no load balancing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Business, Employee, Service};

use super::eligibility::{employee_working_ranges, find_conflict, is_qualified};
use super::time_arithmetic::{MinuteRange, TimeContext, time_to_minutes};

/// Why an employee was or was not chosen for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum CandidateDecision {
    /// Qualified, on schedule and free.
    Available,
    /// Not allowed to perform at least one of the services.
    NotQualified,
    /// The window does not fit inside one of the employee's intervals.
    OffSchedule,
    /// An existing booking overlaps the window.
    Booked {
        /// The conflicting booking.
        booking_id: String,
    },
}

/// The outcome of evaluating one employee for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateOutcome {
    /// The evaluated employee.
    pub employee_id: String,
    /// The decision for this employee.
    #[serde(flatten)]
    pub decision: CandidateDecision,
}

/// Returns the first qualified employee, in business order, who can take
/// the slot.
///
/// Each employee is judged against their own effective hours: a gap in one
/// employee's schedule never blocks another employee who works during it.
/// A start shortly after midnight can be taken inside the previous day's
/// overnight interval. Returns `None` when nobody can take the slot, when
/// no hours cover it, or when `slot_start` is not a valid "HH:MM" open time.
///
/// # Examples
///
/// ```
/// use booking_engine::models::Business;
/// use booking_engine::scheduling::find_available_employee_for_slot;
/// use chrono::NaiveDate;
///
/// let business: Business = serde_json::from_str(r#"{
///     "id": "biz",
///     "hours": {"monday": {"enabled": true, "intervals": [{"open": "09:00", "close": "18:00"}]}},
///     "employees": [
///         {"id": "a", "name": "A"},
///         {"id": "b", "name": "B", "hours": {
///             "monday": {"enabled": true, "intervals": [{"open": "19:00", "close": "21:00"}]}
///         }}
///     ],
///     "services": [{"id": "s", "duration": 30}]
/// }"#).unwrap();
///
/// // 2026-01-12 is a Monday
/// let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let employee = find_available_employee_for_slot(date, "19:00", 30, &business.services, &business);
/// assert_eq!(employee.map(|e| e.id.as_str()), Some("b"));
/// ```
pub fn find_available_employee_for_slot<'a>(
    date: NaiveDate,
    slot_start: &str,
    total_duration: u32,
    services: &[Service],
    business: &'a Business,
) -> Option<&'a Employee> {
    let window = slot_window(slot_start, total_duration)?;

    let chosen = business.employees.iter().find(|employee| {
        evaluate(employee, date, &window, services, business) == CandidateDecision::Available
    });

    debug!(
        business_id = %business.id,
        %date,
        slot_start,
        total_duration,
        employee_id = chosen.map(|e| e.id.as_str()).unwrap_or("none"),
        "Resolved employee for slot"
    );

    chosen
}

/// Returns the decision for every employee, in business order.
///
/// The first [`CandidateDecision::Available`] entry is exactly the employee
/// [`find_available_employee_for_slot`] returns. An invalid `slot_start`
/// yields an empty list.
pub fn explain_assignment(
    date: NaiveDate,
    slot_start: &str,
    total_duration: u32,
    services: &[Service],
    business: &Business,
) -> Vec<CandidateOutcome> {
    let Some(window) = slot_window(slot_start, total_duration) else {
        return Vec::new();
    };

    business
        .employees
        .iter()
        .map(|employee| CandidateOutcome {
            employee_id: employee.id.clone(),
            decision: evaluate(employee, date, &window, services, business),
        })
        .collect()
}

fn slot_window(slot_start: &str, total_duration: u32) -> Option<MinuteRange> {
    match time_to_minutes(slot_start, TimeContext::Open) {
        Ok(start) => Some(MinuteRange::starting_at(start, total_duration)),
        Err(err) => {
            warn!(slot_start, error = %err, "Invalid slot start");
            None
        }
    }
}

fn evaluate(
    employee: &Employee,
    date: NaiveDate,
    window: &MinuteRange,
    services: &[Service],
    business: &Business,
) -> CandidateDecision {
    if !is_qualified(employee, services) {
        return CandidateDecision::NotQualified;
    }

    let on_schedule = employee_working_ranges(employee, business, date)
        .iter()
        .any(|range| range.contains(window));
    if !on_schedule {
        return CandidateDecision::OffSchedule;
    }

    match find_conflict(business, &employee.id, date, window) {
        Some(booking) => CandidateDecision::Booked {
            booking_id: booking.id.clone(),
        },
        None => CandidateDecision::Available,
    }
}

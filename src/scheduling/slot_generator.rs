//! Available slot generation.
//!
//! This module computes the bookable start times for a date, a set of
//! services and an employee selector. Every qualified employee is evaluated
//! against their own effective hours and bookings; for `any` requests the
//! result is the union across employees. The after-midnight part of an
//! overnight interval is offered on the following date.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::models::{Business, Employee, Service, total_duration};

use super::eligibility::{EmployeeSelector, employee_working_ranges, find_conflict, qualified_employees};
use super::time_arithmetic::{MINUTES_PER_DAY, MinuteRange, interval_to_range, minutes_to_time};

/// Default spacing between candidate start times, in minutes.
pub const DEFAULT_SLOT_STEP_MINUTES: u32 = 15;

/// Tunables for slot generation.
///
/// `now` is the caller's clock reading. It is never read internally, so
/// identical inputs always produce identical slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOptions {
    /// Spacing between candidate starts, measured from each interval's open.
    pub step_minutes: u32,
    /// Minimum notice between `now` and a bookable start.
    pub min_lead_minutes: u32,
    /// Current local time. Starts before `now + min_lead_minutes` are dropped.
    pub now: Option<NaiveDateTime>,
}

impl Default for SlotOptions {
    fn default() -> Self {
        Self {
            step_minutes: DEFAULT_SLOT_STEP_MINUTES,
            min_lead_minutes: 0,
            now: None,
        }
    }
}

impl SlotOptions {
    /// Returns these options with `now` set.
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }
}

/// Returns the ordered, deduplicated start times bookable on `date`.
///
/// The window length is the sum of every service's duration plus its own
/// buffer. A start survives when, for at least one qualified employee
/// matching `selector`, the whole window fits inside a single interval of
/// that employee's effective hours and overlaps none of their bookings.
///
/// The business's open flag for a weekday gates that day's intervals: a
/// closed business day contributes nothing even if an employee's personal
/// hours are enabled. Personal hours otherwise replace the business
/// intervals for that employee.
///
/// Starts are listed in chronological order and always fall on `date`. A
/// window may run past midnight inside an interval that does, and the part
/// of the previous day's overnight interval after midnight is scanned too.
///
/// Never fails: no services, no qualified employee, a closed day or a
/// window longer than a day all yield an empty list.
///
/// # Examples
///
/// ```
/// use booking_engine::models::Business;
/// use booking_engine::scheduling::{get_available_slots, EmployeeSelector, SlotOptions};
/// use chrono::NaiveDate;
///
/// let business: Business = serde_json::from_str(r#"{
///     "id": "biz",
///     "hours": {"monday": {"enabled": true, "intervals": [{"open": "09:00", "close": "10:00"}]}},
///     "employees": [{"id": "e1", "name": "A"}],
///     "services": [{"id": "s", "duration": 30}]
/// }"#).unwrap();
///
/// // 2026-01-12 is a Monday
/// let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let slots = get_available_slots(
///     date,
///     &business.services,
///     &business,
///     &EmployeeSelector::Any,
///     &SlotOptions::default(),
/// );
/// assert_eq!(slots, vec!["09:00", "09:15", "09:30"]);
/// ```
pub fn get_available_slots(
    date: NaiveDate,
    services: &[Service],
    business: &Business,
    selector: &EmployeeSelector,
    options: &SlotOptions,
) -> Vec<String> {
    let duration = total_duration(services);
    if services.is_empty() || duration == 0 {
        return Vec::new();
    }
    if i64::from(duration) > i64::from(MINUTES_PER_DAY) {
        debug!(business_id = %business.id, duration, "Window longer than a day, no slots");
        return Vec::new();
    }

    let employees = qualified_employees(business, services, selector);
    if employees.is_empty() {
        debug!(business_id = %business.id, %selector, "No qualified employees");
        return Vec::new();
    }

    let step = i32::try_from(options.step_minutes.max(1))
        .unwrap_or(MINUTES_PER_DAY)
        .min(MINUTES_PER_DAY);
    let earliest = earliest_start(date, options);

    let mut starts = BTreeSet::new();
    for employee in employees {
        collect_employee_starts(employee, business, date, duration, step, &mut starts);
    }

    let slots: Vec<String> = starts
        .into_iter()
        .filter(|start| earliest.is_none_or(|min| *start >= min))
        .map(minutes_to_time)
        .collect();

    debug!(
        business_id = %business.id,
        %date,
        %selector,
        duration,
        slot_count = slots.len(),
        "Computed available slots"
    );

    slots
}

fn collect_employee_starts(
    employee: &Employee,
    business: &Business,
    date: NaiveDate,
    duration: u32,
    step: i32,
    starts: &mut BTreeSet<i32>,
) {
    for range in employee_working_ranges(employee, business, date) {
        let mut start = range.start;
        while start < MINUTES_PER_DAY {
            let window = MinuteRange::starting_at(start, duration);
            if !range.contains(&window) {
                break;
            }
            // Carried-over ranges begin on the previous day
            if start >= 0
                && !starts.contains(&start)
                && find_conflict(business, &employee.id, date, &window).is_none()
            {
                starts.insert(start);
            }
            start += step;
        }
    }
}

/// Earliest allowed start, in minutes relative to the start of `date`.
fn earliest_start(date: NaiveDate, options: &SlotOptions) -> Option<i32> {
    let now = options.now?;
    let cutoff = now + Duration::minutes(i64::from(options.min_lead_minutes));
    let minutes = (cutoff - date.and_time(chrono::NaiveTime::MIN)).num_minutes();
    Some(minutes.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

//! Affected-bookings check for hours changes.
//!
//! Before a business or employee hours change is persisted, every upcoming
//! booking on a changed weekday, or on the day after one, is re-checked
//! against the new hours. The bookings that would no longer fit are
//! reported so the change can be rejected or explicitly confirmed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Booking, Business, DayOfWeek, Hours};

use super::eligibility::{governing_day, working_ranges};
use super::time_arithmetic::time_range;

/// Whose hours are being changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoursTarget {
    /// The business's default hours.
    Business,
    /// One employee's personal hours, by id.
    Employee(String),
}

/// Why a booking is affected by an hours change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffectedReason {
    /// The booking's day is no longer open.
    DayDisabled,
    /// The booking no longer fits inside any interval.
    OutsideHours,
    /// The booking's date or times could not be parsed.
    Malformed,
}

/// A booking that would be left outside working hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedBooking {
    /// The booking id.
    pub booking_id: String,
    /// The employee holding the booking.
    pub employee_id: String,
    /// The booking date as stored.
    pub date: String,
    /// The booking start as stored.
    pub start: String,
    /// The booking end as stored.
    pub end: String,
    /// Why the booking is affected.
    pub reason: AffectedReason,
}

impl AffectedBooking {
    fn new(booking: &Booking, reason: AffectedReason) -> Self {
        Self {
            booking_id: booking.id.clone(),
            employee_id: booking.employee_id.clone(),
            date: booking.date.clone(),
            start: booking.start.clone(),
            end: booking.end.clone(),
            reason,
        }
    }
}

/// Returns the weekdays whose hours differ between `old` and `new`.
///
/// A day defined on one side only counts as changed.
///
/// # Examples
///
/// ```
/// use booking_engine::models::{DayHours, DayOfWeek, Hours, Interval};
/// use booking_engine::scheduling::changed_days;
///
/// let old = Hours::new().with_day(DayOfWeek::Monday, DayHours::open(vec![Interval::new("09:00", "17:00")]));
/// let new = Hours::new()
///     .with_day(DayOfWeek::Monday, DayHours::open(vec![Interval::new("09:00", "17:00")]))
///     .with_day(DayOfWeek::Tuesday, DayHours::closed());
/// assert_eq!(changed_days(Some(&old), &new), vec![DayOfWeek::Tuesday]);
/// ```
pub fn changed_days(old: Option<&Hours>, new: &Hours) -> Vec<DayOfWeek> {
    DayOfWeek::ALL
        .into_iter()
        .filter(|day| old.and_then(|h| h.day(*day)) != new.day(*day))
        .collect()
}

/// Finds upcoming bookings that would no longer fit after an hours change.
///
/// Only non-cancelled bookings dated `today` or later are checked, and only
/// when their weekday or the weekday before changed, since an overnight
/// interval reaches into the next date. Each booking is judged against its
/// employee's working ranges under the new hours: for an employee change
/// the new personal hours over the current business hours, for a business
/// change the employee's current personal hours over the new business
/// hours. Closing a business day therefore affects every booking on it,
/// while interval changes spare employees whose personal override covers
/// the booking. Malformed bookings are always reported.
pub fn find_affected_bookings(
    business: &Business,
    target: &HoursTarget,
    new_hours: &Hours,
    today: NaiveDate,
) -> Vec<AffectedBooking> {
    let old_hours = match target {
        HoursTarget::Business => Some(&business.hours),
        HoursTarget::Employee(id) => business
            .employees
            .iter()
            .find(|e| &e.id == id)
            .and_then(|e| e.hours.as_ref()),
    };
    let changed = changed_days(old_hours, new_hours);

    let affected: Vec<AffectedBooking> = business
        .bookings
        .iter()
        .filter(|b| b.occupies_time())
        .filter(|b| match target {
            HoursTarget::Business => true,
            HoursTarget::Employee(id) => &b.employee_id == id,
        })
        .filter_map(|booking| {
            check_booking(booking, business, target, new_hours, &changed, today)
                .map(|reason| AffectedBooking::new(booking, reason))
        })
        .collect();

    if !affected.is_empty() {
        info!(
            business_id = %business.id,
            affected_count = affected.len(),
            changed_days = ?changed,
            "Hours change affects existing bookings"
        );
    }

    affected
}

/// Turns a non-empty affected list into [`EngineError::HoursConflict`].
pub fn ensure_no_affected_bookings(affected: Vec<AffectedBooking>) -> EngineResult<()> {
    if affected.is_empty() {
        Ok(())
    } else {
        Err(EngineError::HoursConflict { affected })
    }
}

fn check_booking(
    booking: &Booking,
    business: &Business,
    target: &HoursTarget,
    new_hours: &Hours,
    changed: &[DayOfWeek],
    today: NaiveDate,
) -> Option<AffectedReason> {
    let Some(date) = booking.parsed_date() else {
        warn!(booking_id = %booking.id, date = %booking.date, "Malformed booking date");
        return Some(AffectedReason::Malformed);
    };
    if date < today {
        return None;
    }

    let day = DayOfWeek::of(date);
    let previous_changed = date
        .pred_opt()
        .is_some_and(|previous| changed.contains(&DayOfWeek::of(previous)));
    if !changed.contains(&day) && !previous_changed {
        return None;
    }

    let range = match time_range(&booking.start, &booking.end) {
        Ok(range) => range,
        Err(err) => {
            warn!(booking_id = %booking.id, error = %err, "Malformed booking time");
            return Some(AffectedReason::Malformed);
        }
    };

    let current_personal = business
        .employees
        .iter()
        .find(|e| e.id == booking.employee_id)
        .and_then(|e| e.hours.as_ref());
    let (business_hours, personal) = match target {
        HoursTarget::Business => (new_hours, current_personal),
        HoursTarget::Employee(_) => (&business.hours, Some(new_hours)),
    };

    if working_ranges(business_hours, personal, date)
        .iter()
        .any(|working| working.contains(&range))
    {
        return None;
    }

    let day_open = governing_day(business_hours, personal, day).is_some_and(|d| d.enabled);
    Some(if day_open {
        AffectedReason::OutsideHours
    } else {
        AffectedReason::DayDisabled
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, DayHours, Employee, Interval};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking(id: &str, employee_id: &str, date: &str, start: &str, end: &str) -> Booking {
        Booking {
            id: id.to_string(),
            date: date.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            employee_id: employee_id.to_string(),
            services: vec![],
            status: BookingStatus::Confirmed,
            client_name: None,
        }
    }

    fn day(open: &str, close: &str) -> DayHours {
        DayHours::open(vec![Interval::new(open, close)])
    }

    fn business(employees: Vec<Employee>, bookings: Vec<Booking>) -> Business {
        Business {
            id: "biz".to_string(),
            name: "Test".to_string(),
            hours: Hours::new()
                .with_day(DayOfWeek::Monday, day("09:00", "18:00"))
                .with_day(DayOfWeek::Tuesday, day("09:00", "18:00")),
            employees,
            services: vec![],
            bookings,
        }
    }

    fn employee(id: &str, hours: Option<Hours>) -> Employee {
        Employee {
            id: id.to_string(),
            name: id.to_uppercase(),
            hours,
        }
    }

    // 2026-01-12 is a Monday; today is Monday 2026-01-12
    const TODAY: &str = "2026-01-12";

    #[test]
    fn test_changed_days_detects_added_removed_and_edited() {
        let old = Hours::new()
            .with_day(DayOfWeek::Monday, day("09:00", "17:00"))
            .with_day(DayOfWeek::Friday, day("09:00", "17:00"));
        let new = Hours::new()
            .with_day(DayOfWeek::Monday, day("10:00", "17:00"))
            .with_day(DayOfWeek::Sunday, DayHours::closed());

        assert_eq!(
            changed_days(Some(&old), &new),
            vec![DayOfWeek::Monday, DayOfWeek::Friday, DayOfWeek::Sunday]
        );
    }

    #[test]
    fn test_shortened_business_hours_flag_late_booking() {
        let biz = business(
            vec![employee("e1", None)],
            vec![
                booking("bk_early", "e1", "2026-01-19", "10:00", "11:00"),
                booking("bk_late", "e1", "2026-01-19", "17:00", "18:00"),
            ],
        );
        let new_hours = biz.hours.clone().with_day(DayOfWeek::Monday, day("09:00", "17:00"));

        let affected = find_affected_bookings(&biz, &HoursTarget::Business, &new_hours, date(TODAY));
        assert_eq!(affected.len(), 1);
        assert_eq!(affected[0].booking_id, "bk_late");
        assert_eq!(affected[0].reason, AffectedReason::OutsideHours);
    }

    #[test]
    fn test_disabling_day_flags_every_booking() {
        let biz = business(
            vec![
                employee("e1", None),
                employee("e2", Some(Hours::new().with_day(DayOfWeek::Monday, day("12:00", "20:00")))),
            ],
            vec![
                booking("bk_1", "e1", "2026-01-19", "10:00", "11:00"),
                booking("bk_2", "e2", "2026-01-19", "19:00", "20:00"),
            ],
        );
        let new_hours = biz.hours.clone().with_day(DayOfWeek::Monday, DayHours::closed());

        let affected = find_affected_bookings(&biz, &HoursTarget::Business, &new_hours, date(TODAY));
        assert_eq!(affected.len(), 2);
        assert!(affected.iter().all(|a| a.reason == AffectedReason::DayDisabled));
    }

    #[test]
    fn test_business_interval_change_skips_overridden_employee() {
        let biz = business(
            vec![employee("e2", Some(Hours::new().with_day(DayOfWeek::Monday, day("12:00", "20:00"))))],
            vec![booking("bk_2", "e2", "2026-01-19", "19:00", "20:00")],
        );
        let new_hours = biz.hours.clone().with_day(DayOfWeek::Monday, day("09:00", "12:00"));

        let affected = find_affected_bookings(&biz, &HoursTarget::Business, &new_hours, date(TODAY));
        assert!(affected.is_empty());
    }

    #[test]
    fn test_past_and_cancelled_bookings_ignored() {
        let mut cancelled = booking("bk_cancelled", "e1", "2026-01-19", "17:00", "18:00");
        cancelled.status = BookingStatus::Cancelled;
        let biz = business(
            vec![employee("e1", None)],
            vec![booking("bk_past", "e1", "2026-01-05", "17:00", "18:00"), cancelled],
        );
        let new_hours = biz.hours.clone().with_day(DayOfWeek::Monday, day("09:00", "12:00"));

        let affected = find_affected_bookings(&biz, &HoursTarget::Business, &new_hours, date(TODAY));
        assert!(affected.is_empty());
    }

    #[test]
    fn test_todays_booking_is_checked() {
        let biz = business(
            vec![employee("e1", None)],
            vec![booking("bk_today", "e1", TODAY, "17:00", "18:00")],
        );
        let new_hours = biz.hours.clone().with_day(DayOfWeek::Monday, day("09:00", "12:00"));

        let affected = find_affected_bookings(&biz, &HoursTarget::Business, &new_hours, date(TODAY));
        assert_eq!(affected.len(), 1);
    }

    #[test]
    fn test_unchanged_day_not_checked() {
        let biz = business(
            vec![employee("e1", None)],
            vec![booking("bk_tue", "e1", "2026-01-13", "17:00", "18:00")],
        );
        let new_hours = biz.hours.clone().with_day(DayOfWeek::Monday, day("09:00", "12:00"));

        let affected = find_affected_bookings(&biz, &HoursTarget::Business, &new_hours, date(TODAY));
        assert!(affected.is_empty());
    }

    #[test]
    fn test_employee_change_only_checks_their_bookings() {
        let biz = business(
            vec![employee("e1", None), employee("e2", None)],
            vec![
                booking("bk_1", "e1", "2026-01-19", "17:00", "18:00"),
                booking("bk_2", "e2", "2026-01-19", "17:00", "18:00"),
            ],
        );
        let new_hours = Hours::new().with_day(DayOfWeek::Monday, day("09:00", "13:00"));

        let affected = find_affected_bookings(
            &biz,
            &HoursTarget::Employee("e1".to_string()),
            &new_hours,
            date(TODAY),
        );
        assert_eq!(affected.len(), 1);
        assert_eq!(affected[0].booking_id, "bk_1");
    }

    #[test]
    fn test_employee_removing_override_falls_back_to_business() {
        let biz = business(
            vec![employee("e1", Some(Hours::new().with_day(DayOfWeek::Monday, day("12:00", "21:00"))))],
            vec![
                booking("bk_ok", "e1", "2026-01-19", "12:00", "13:00"),
                booking("bk_late", "e1", "2026-01-19", "19:00", "20:00"),
            ],
        );

        let affected = find_affected_bookings(
            &biz,
            &HoursTarget::Employee("e1".to_string()),
            &Hours::new(),
            date(TODAY),
        );
        assert_eq!(affected.len(), 1);
        assert_eq!(affected[0].booking_id, "bk_late");
        assert_eq!(affected[0].reason, AffectedReason::OutsideHours);
    }

    #[test]
    fn test_malformed_bookings_are_reported() {
        let biz = business(
            vec![employee("e1", None)],
            vec![
                booking("bk_bad_date", "e1", "19/01/2026", "10:00", "11:00"),
                booking("bk_bad_time", "e1", "2026-01-19", "late", "11:00"),
            ],
        );
        let new_hours = biz.hours.clone().with_day(DayOfWeek::Monday, day("09:00", "12:00"));

        let affected = find_affected_bookings(&biz, &HoursTarget::Business, &new_hours, date(TODAY));
        assert_eq!(affected.len(), 2);
        assert!(affected.iter().all(|a| a.reason == AffectedReason::Malformed));
    }

    #[test]
    fn test_ensure_no_affected_bookings() {
        assert!(ensure_no_affected_bookings(vec![]).is_ok());

        let biz = business(
            vec![employee("e1", None)],
            vec![booking("bk_late", "e1", "2026-01-19", "17:00", "18:00")],
        );
        let new_hours = biz.hours.clone().with_day(DayOfWeek::Monday, day("09:00", "12:00"));
        let affected = find_affected_bookings(&biz, &HoursTarget::Business, &new_hours, date(TODAY));

        match ensure_no_affected_bookings(affected) {
            Err(EngineError::HoursConflict { affected }) => {
                assert_eq!(affected[0].booking_id, "bk_late");
                assert_eq!(affected[0].date, "2026-01-19");
                assert_eq!(affected[0].start, "17:00");
            }
            other => panic!("Expected HoursConflict, got {:?}", other),
        }
    }

    #[test]
    fn test_overnight_change_reaches_next_date() {
        let mut biz = business(
            vec![employee("e1", None)],
            vec![
                booking("bk_sun", "e1", "2026-01-18", "00:30", "01:30"),
                booking("bk_sat", "e1", "2026-01-17", "22:30", "23:30"),
            ],
        );
        biz.hours.set_day(DayOfWeek::Saturday, day("22:00", "02:00"));
        let new_hours = biz.hours.clone().with_day(DayOfWeek::Saturday, day("22:00", "01:00"));

        let affected = find_affected_bookings(&biz, &HoursTarget::Business, &new_hours, date(TODAY));
        assert_eq!(affected.len(), 1);
        assert_eq!(affected[0].booking_id, "bk_sun");
        // Sunday itself is not defined, so nothing else covers it
        assert_eq!(affected[0].reason, AffectedReason::DayDisabled);
    }

    #[test]
    fn test_after_midnight_booking_kept_when_tail_unchanged() {
        let mut biz = business(
            vec![employee("e1", None)],
            vec![booking("bk_sun", "e1", "2026-01-18", "00:30", "01:30")],
        );
        biz.hours.set_day(DayOfWeek::Saturday, day("22:00", "02:00"));
        let new_hours = biz.hours.clone().with_day(DayOfWeek::Saturday, day("21:00", "02:00"));

        let affected = find_affected_bookings(&biz, &HoursTarget::Business, &new_hours, date(TODAY));
        assert!(affected.is_empty());
    }
}

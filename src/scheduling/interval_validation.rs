//! Validation of opening-hours intervals.
//!
//! [`validate_intervals`] is the plain overlap check. [`validate_hours`] is
//! the editing-boundary guard run before hours are persisted: it adds the
//! positive-duration and strict chronological-order rules and reports the
//! offending day.

use crate::error::{EngineError, EngineResult};
use crate::models::{DayHours, DayOfWeek, Hours, Interval};

use super::time_arithmetic::{MinuteRange, interval_to_range};

/// Returns true when no two intervals of one day overlap.
///
/// Touching endpoints are legal (back-to-back intervals). A range that runs
/// past midnight is also compared against the other ranges shifted by one
/// day, so wrap-around overlaps are caught. Any unparseable interval makes
/// the list invalid.
///
/// # Examples
///
/// ```
/// use booking_engine::models::Interval;
/// use booking_engine::scheduling::validate_intervals;
///
/// let back_to_back = vec![Interval::new("09:00", "12:00"), Interval::new("12:00", "15:00")];
/// assert!(validate_intervals(&back_to_back));
///
/// let overlapping = vec![Interval::new("09:00", "12:00"), Interval::new("11:00", "13:00")];
/// assert!(!validate_intervals(&overlapping));
/// ```
pub fn validate_intervals(intervals: &[Interval]) -> bool {
    let Some(ranges) = parse_ranges(intervals) else {
        return false;
    };

    for (i, a) in ranges.iter().enumerate() {
        for b in &ranges[i + 1..] {
            if ranges_collide(a, b) {
                return false;
            }
        }
    }

    true
}

/// Returns true when each interval starts strictly after the previous one ends.
///
/// This is stricter than [`validate_intervals`]: back-to-back intervals and
/// out-of-order lists are both rejected.
pub fn is_chronological(intervals: &[Interval]) -> bool {
    let Some(ranges) = parse_ranges(intervals) else {
        return false;
    };

    ranges.windows(2).all(|pair| pair[1].start > pair[0].end)
}

/// Validates the intervals of one day.
///
/// Disabled days are always valid. An enabled day needs at least one
/// interval, every interval must have a positive duration after midnight
/// normalization, intervals must not overlap, and multiple intervals must
/// be strictly chronological.
///
/// # Errors
///
/// Returns [`EngineError::InvalidHours`] naming `day`.
pub fn validate_day(day: DayOfWeek, hours: &DayHours) -> EngineResult<()> {
    if !hours.enabled {
        return Ok(());
    }

    let invalid = |message: String| EngineError::InvalidHours { day, message };

    if hours.intervals.is_empty() {
        return Err(invalid("an open day needs at least one interval".to_string()));
    }

    for interval in &hours.intervals {
        let range = interval_to_range(interval).map_err(|e| invalid(e.to_string()))?;
        if range.is_empty() {
            return Err(invalid(format!(
                "interval {}-{} must end after it starts",
                interval.open, interval.close
            )));
        }
    }

    if !validate_intervals(&hours.intervals) {
        return Err(invalid("intervals overlap".to_string()));
    }

    if hours.intervals.len() > 1 && !is_chronological(&hours.intervals) {
        return Err(invalid(
            "intervals must be in chronological order, each starting after the previous one ends"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validates every day of a weekly schedule, stopping at the first invalid day.
///
/// # Examples
///
/// ```
/// use booking_engine::error::EngineError;
/// use booking_engine::models::{DayHours, DayOfWeek, Hours, Interval};
/// use booking_engine::scheduling::validate_hours;
///
/// let hours = Hours::new().with_day(
///     DayOfWeek::Tuesday,
///     DayHours::open(vec![Interval::new("10:00", "10:00")]),
/// );
/// match validate_hours(&hours) {
///     Err(EngineError::InvalidHours { day, .. }) => assert_eq!(day, DayOfWeek::Tuesday),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn validate_hours(hours: &Hours) -> EngineResult<()> {
    hours.iter().try_for_each(|(day, day_hours)| validate_day(day, day_hours))
}

fn parse_ranges(intervals: &[Interval]) -> Option<Vec<MinuteRange>> {
    intervals.iter().map(|i| interval_to_range(i).ok()).collect()
}

fn ranges_collide(a: &MinuteRange, b: &MinuteRange) -> bool {
    a.overlaps(b) || a.overlaps(&b.shifted_days(1)) || a.shifted_days(1).overlaps(b)
}

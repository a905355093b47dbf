//! Opening hours model.
//!
//! This module defines the weekday tags, time intervals and per-day hours
//! used for both a business's default schedule and an employee's personal
//! override.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A day of the week as used for keying opening hours.
///
/// # Example
///
/// ```
/// use booking_engine::models::DayOfWeek;
/// use chrono::NaiveDate;
///
/// // 2026-01-12 is a Monday
/// let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// assert_eq!(DayOfWeek::of(date), DayOfWeek::Monday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayOfWeek {
    /// All days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Returns the day of the week a calendar date falls on.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Returns the lowercase tag used in serialized hours.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single open interval within a day.
///
/// Both endpoints are "HH:MM" strings. A `close` earlier than `open`
/// means the interval runs past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Opening time, "HH:MM".
    pub open: String,
    /// Closing time, "HH:MM".
    pub close: String,
}

impl Interval {
    /// Creates an interval from two "HH:MM" strings.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// The hours for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    /// Whether the day is open at all. Intervals are ignored when false.
    pub enabled: bool,
    /// The open intervals for the day.
    #[serde(default)]
    pub intervals: Vec<Interval>,
}

impl DayHours {
    /// An enabled day with the given intervals.
    pub fn open(intervals: Vec<Interval>) -> Self {
        Self {
            enabled: true,
            intervals,
        }
    }

    /// A disabled day.
    pub fn closed() -> Self {
        Self {
            enabled: false,
            intervals: Vec::new(),
        }
    }

    /// Returns the intervals that apply, which are none when the day is disabled.
    pub fn active_intervals(&self) -> &[Interval] {
        if self.enabled { self.intervals.as_slice() } else { &[] }
    }
}

/// Weekly hours keyed by day of the week.
///
/// Serialized as a plain map, e.g. `{"monday": {"enabled": true, "intervals": [...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(BTreeMap<DayOfWeek, DayHours>);

impl Hours {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the hours for a day, if that day is defined.
    pub fn day(&self, day: DayOfWeek) -> Option<&DayHours> {
        self.0.get(&day)
    }

    /// Sets the hours for a day, returning the schedule for chaining.
    pub fn with_day(mut self, day: DayOfWeek, hours: DayHours) -> Self {
        self.0.insert(day, hours);
        self
    }

    /// Sets the hours for a day.
    pub fn set_day(&mut self, day: DayOfWeek, hours: DayHours) {
        self.0.insert(day, hours);
    }

    /// Iterates the defined days in weekday order.
    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &DayHours)> {
        self.0.iter().map(|(day, hours)| (*day, hours))
    }

    /// Returns true when the day is defined and enabled.
    pub fn is_open(&self, day: DayOfWeek) -> bool {
        self.day(day).is_some_and(|h| h.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_table_is_exhaustive() {
        // 2026-01-12 is a Monday
        let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        for (offset, expected) in DayOfWeek::ALL.iter().enumerate() {
            let date = monday + chrono::Duration::days(offset as i64);
            assert_eq!(DayOfWeek::of(date), *expected);
        }
    }

    #[test]
    fn test_day_of_week_display() {
        assert_eq!(DayOfWeek::Saturday.to_string(), "saturday");
        assert_eq!(
            serde_json::to_string(&DayOfWeek::Sunday).unwrap(),
            "\"sunday\""
        );
    }

    #[test]
    fn test_deserialize_hours_map() {
        let json = r#"{
            "monday": {"enabled": true, "intervals": [{"open": "09:00", "close": "17:00"}]},
            "sunday": {"enabled": false}
        }"#;

        let hours: Hours = serde_json::from_str(json).unwrap();
        assert!(hours.is_open(DayOfWeek::Monday));
        assert!(!hours.is_open(DayOfWeek::Sunday));
        assert!(!hours.is_open(DayOfWeek::Tuesday));
        assert!(hours.day(DayOfWeek::Sunday).unwrap().intervals.is_empty());
        assert_eq!(
            hours.day(DayOfWeek::Monday).unwrap().intervals[0],
            Interval::new("09:00", "17:00")
        );
    }

    #[test]
    fn test_disabled_day_has_no_active_intervals() {
        let day = DayHours {
            enabled: false,
            intervals: vec![Interval::new("09:00", "17:00")],
        };
        assert!(day.active_intervals().is_empty());
    }

    #[test]
    fn test_iter_follows_weekday_order() {
        let hours = Hours::new()
            .with_day(DayOfWeek::Friday, DayHours::closed())
            .with_day(DayOfWeek::Monday, DayHours::closed());
        let days: Vec<DayOfWeek> = hours.iter().map(|(d, _)| d).collect();
        assert_eq!(days, vec![DayOfWeek::Monday, DayOfWeek::Friday]);
    }
}

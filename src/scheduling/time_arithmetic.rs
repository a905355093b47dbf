//! Time-of-day arithmetic.
//!
//! This module converts "HH:MM" strings into minute offsets from the start
//! of a day and provides the half-open [`MinuteRange`] used for every
//! containment and overlap test in the engine. Intervals that stay open
//! past midnight are resolved pairwise: a close time earlier than its own
//! open time is moved into the next day.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Interval;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// The role a time string plays within an interval.
///
/// A close time is only meaningful next to its sibling open time, so the
/// `Close` variant carries the already-resolved open offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeContext {
    /// The time opens an interval.
    Open,
    /// The time closes an interval that opened at `open` minutes.
    Close {
        /// Minute offset of the paired open time.
        open: i32,
    },
}

/// Converts an "HH:MM" string to minutes since 00:00.
///
/// With [`TimeContext::Close`], a value strictly earlier than the paired
/// open time is interpreted as next-day and gains 24 hours; a close equal
/// to its open stays put and yields an empty range. "24:00" is accepted as
/// the end of the day, but only as a close time.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`] when the string is not a valid
/// "HH:MM" time.
///
/// # Examples
///
/// ```
/// use booking_engine::scheduling::{time_to_minutes, TimeContext};
///
/// let open = time_to_minutes("22:00", TimeContext::Open).unwrap();
/// assert_eq!(open, 1320);
///
/// // "02:00" closing a 22:00 interval is four hours later, next day
/// let close = time_to_minutes("02:00", TimeContext::Close { open }).unwrap();
/// assert_eq!(close, open + 240);
///
/// // The same string as an open time is early morning
/// assert_eq!(time_to_minutes("02:00", TimeContext::Open).unwrap(), 120);
/// ```
pub fn time_to_minutes(time: &str, context: TimeContext) -> EngineResult<i32> {
    let minutes = parse_hhmm(time, context).ok_or_else(|| EngineError::InvalidTime {
        value: time.to_string(),
    })?;

    Ok(match context {
        TimeContext::Open => minutes,
        TimeContext::Close { open } if minutes < open => minutes + MINUTES_PER_DAY,
        TimeContext::Close { .. } => minutes,
    })
}

fn parse_hhmm(time: &str, context: TimeContext) -> Option<i32> {
    let time = time.trim();
    // chrono accepts a single minute digit; "HH:MM" requires two
    if !time.split_once(':').is_some_and(|(_, minutes)| minutes.len() == 2) {
        return None;
    }
    if time == "24:00" {
        return matches!(context, TimeContext::Close { .. }).then_some(MINUTES_PER_DAY);
    }

    let parsed = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    i32::try_from(parsed.hour() * 60 + parsed.minute()).ok()
}

/// Formats a minute offset as "HH:MM", wrapping offsets past midnight.
///
/// # Examples
///
/// ```
/// use booking_engine::scheduling::minutes_to_time;
///
/// assert_eq!(minutes_to_time(570), "09:30");
/// assert_eq!(minutes_to_time(1500), "01:00");
/// ```
pub fn minutes_to_time(minutes: i32) -> String {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY).unsigned_abs();
    NaiveTime::from_hms_opt(wrapped / 60, wrapped % 60, 0)
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// A half-open range of minutes, `[start, end)`.
///
/// Offsets are relative to the start of a reference day and may fall
/// outside `0..1440` when a range belongs to a neighbouring day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteRange {
    /// First minute of the range.
    pub start: i32,
    /// First minute after the range.
    pub end: i32,
}

impl MinuteRange {
    /// Creates a range from `start` lasting `duration` minutes.
    ///
    /// The end saturates at `i32::MAX`, so an oversized duration produces a
    /// range that no interval can contain.
    pub fn starting_at(start: i32, duration: u32) -> Self {
        let end = i64::from(start) + i64::from(duration);
        Self {
            start,
            end: i32::try_from(end).unwrap_or(i32::MAX),
        }
    }

    /// Length of the range in minutes; zero or negative for empty ranges.
    pub fn len(&self) -> i32 {
        self.end - self.start
    }

    /// Returns true when the range covers no time.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns true when the two ranges share any minute.
    ///
    /// Touching endpoints do not overlap: `[540, 600)` and `[600, 660)`
    /// are back-to-back.
    pub fn overlaps(&self, other: &MinuteRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true when `other` lies entirely within this range.
    pub fn contains(&self, other: &MinuteRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns the range moved by `days` whole days.
    pub fn shifted_days(&self, days: i32) -> Self {
        Self {
            start: self.start + days * MINUTES_PER_DAY,
            end: self.end + days * MINUTES_PER_DAY,
        }
    }
}

/// Resolves an interval into a minute range, handling midnight crossing.
///
/// An interval whose open equals its close resolves to an empty range.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`] when either endpoint is malformed.
pub fn interval_to_range(interval: &Interval) -> EngineResult<MinuteRange> {
    time_range(&interval.open, &interval.close)
}

/// Resolves a start/end pair of "HH:MM" strings into a minute range.
pub fn time_range(start: &str, end: &str) -> EngineResult<MinuteRange> {
    let open = time_to_minutes(start, TimeContext::Open)?;
    let close = time_to_minutes(end, TimeContext::Close { open })?;
    Ok(MinuteRange { start: open, end: close })
}

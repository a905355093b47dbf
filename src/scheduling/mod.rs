//! Scheduling core.
//!
//! Pure functions over a [`Business`](crate::models::Business) snapshot:
//!
//! - **Time arithmetic**: "HH:MM" parsing with open/close context
//! - **Interval validation**: overlap and chronological-order checks on hours
//! - **Slot generation**: bookable start times for a date and service set
//! - **Employee assignment**: who takes a chosen slot when "any" was picked
//! - **Hours changes**: bookings left outside new working hours
//!
//! Nothing in this module reads the wall clock or mutates state. The current
//! time is passed in through [`SlotOptions`] and persistence lives in
//! [`crate::repository`].

mod eligibility;
mod employee_assignment;
mod hours_change;
mod interval_validation;
mod slot_generator;
mod time_arithmetic;

pub use eligibility::{
    EmployeeSelector, employee_working_ranges, find_conflict, fits_day, governing_day, is_qualified,
    qualified_employees, working_ranges,
};
pub use employee_assignment::{
    CandidateDecision, CandidateOutcome, explain_assignment, find_available_employee_for_slot,
};
pub use hours_change::{
    AffectedBooking, AffectedReason, HoursTarget, changed_days, ensure_no_affected_bookings,
    find_affected_bookings,
};
pub use interval_validation::{is_chronological, validate_day, validate_hours, validate_intervals};
pub use slot_generator::{DEFAULT_SLOT_STEP_MINUTES, SlotOptions, get_available_slots};
pub use time_arithmetic::{
    MINUTES_PER_DAY, MinuteRange, TimeContext, interval_to_range, minutes_to_time, time_range,
    time_to_minutes,
};

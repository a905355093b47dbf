//! Business persistence.
//!
//! The [`BusinessRepository`] trait is the only place business snapshots
//! are read from or written to. The scheduling core receives snapshots by
//! reference and never touches the repository, so every computation is
//! repeatable against the same snapshot.
//!
//! Availability is computed on a snapshot and the booking is written later,
//! so two concurrent requests can both see a slot as free. The overlap
//! check in [`BusinessRepository::create_booking`] runs under the write
//! lock and is the only guard against that race.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Booking, Business, Hours};
use crate::scheduling::{
    AffectedBooking, HoursTarget, MinuteRange, ensure_no_affected_bookings, find_affected_bookings,
    find_conflict, time_range, validate_hours,
};

/// Storage for business snapshots.
pub trait BusinessRepository: Send + Sync {
    /// Returns a snapshot of the business.
    fn business(&self, id: &str) -> EngineResult<Business>;

    /// Stores a new booking.
    ///
    /// Fails with [`EngineError::BookingConflict`] when the employee already
    /// holds a time-occupying booking overlapping the new one.
    fn create_booking(&self, business_id: &str, booking: Booking) -> EngineResult<Booking>;

    /// Replaces the business's default hours.
    ///
    /// The hours are validated first. Upcoming bookings that would fall
    /// outside the new hours reject the change with
    /// [`EngineError::HoursConflict`] unless `confirm` is set. Returns the
    /// affected bookings that were accepted.
    fn update_business_hours(
        &self,
        id: &str,
        hours: Hours,
        today: NaiveDate,
        confirm: bool,
    ) -> EngineResult<Vec<AffectedBooking>>;

    /// Replaces one employee's personal hours, with the same checks as
    /// [`BusinessRepository::update_business_hours`].
    fn update_employee_hours(
        &self,
        id: &str,
        employee_id: &str,
        hours: Hours,
        today: NaiveDate,
        confirm: bool,
    ) -> EngineResult<Vec<AffectedBooking>>;
}

/// A [`BusinessRepository`] held in process memory.
///
/// # Example
///
/// ```
/// use booking_engine::models::Business;
/// use booking_engine::repository::{BusinessRepository, InMemoryRepository};
///
/// let business: Business = serde_json::from_str(r#"{"id": "biz_001"}"#).unwrap();
/// let repo = InMemoryRepository::new(vec![business]);
/// assert_eq!(repo.business("biz_001").unwrap().id, "biz_001");
/// assert!(repo.business("biz_404").is_err());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    businesses: RwLock<HashMap<String, Business>>,
}

impl InMemoryRepository {
    /// Creates a repository seeded with the given businesses.
    pub fn new(businesses: impl IntoIterator<Item = Business>) -> Self {
        let businesses = businesses.into_iter().map(|b| (b.id.clone(), b)).collect();
        Self {
            businesses: RwLock::new(businesses),
        }
    }

    /// Returns the stored business ids, sorted.
    pub fn business_ids(&self) -> Vec<String> {
        let guard = self.businesses.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<String> = guard.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn with_business_mut<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Business) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let mut guard = self.businesses.write().unwrap_or_else(PoisonError::into_inner);
        let business = guard
            .get_mut(id)
            .ok_or_else(|| EngineError::BusinessNotFound { id: id.to_string() })?;
        f(business)
    }
}

impl BusinessRepository for InMemoryRepository {
    fn business(&self, id: &str) -> EngineResult<Business> {
        let guard = self.businesses.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::BusinessNotFound { id: id.to_string() })
    }

    fn create_booking(&self, business_id: &str, booking: Booking) -> EngineResult<Booking> {
        self.with_business_mut(business_id, |business| {
            business.employee(&booking.employee_id)?;
            let (date, window) = booking_window(&booking)?;

            let existing = if booking.occupies_time() {
                find_conflict(business, &booking.employee_id, date, &window)
            } else {
                None
            };
            if let Some(existing) = existing {
                return Err(EngineError::BookingConflict {
                    employee_id: booking.employee_id.clone(),
                    date: booking.date.clone(),
                    start: booking.start.clone(),
                    end: booking.end.clone(),
                    existing_id: existing.id.clone(),
                });
            }

            info!(
                business_id = %business.id,
                booking_id = %booking.id,
                employee_id = %booking.employee_id,
                date = %booking.date,
                start = %booking.start,
                "Booking created"
            );
            business.bookings.push(booking.clone());
            Ok(booking)
        })
    }

    fn update_business_hours(
        &self,
        id: &str,
        hours: Hours,
        today: NaiveDate,
        confirm: bool,
    ) -> EngineResult<Vec<AffectedBooking>> {
        validate_hours(&hours)?;
        self.with_business_mut(id, |business| {
            let affected = find_affected_bookings(business, &HoursTarget::Business, &hours, today);
            if !confirm {
                ensure_no_affected_bookings(affected.clone())?;
            }

            info!(business_id = %business.id, confirmed = confirm, "Business hours updated");
            business.hours = hours;
            Ok(affected)
        })
    }

    fn update_employee_hours(
        &self,
        id: &str,
        employee_id: &str,
        hours: Hours,
        today: NaiveDate,
        confirm: bool,
    ) -> EngineResult<Vec<AffectedBooking>> {
        validate_hours(&hours)?;
        self.with_business_mut(id, |business| {
            business.employee(employee_id)?;
            let target = HoursTarget::Employee(employee_id.to_string());
            let affected = find_affected_bookings(business, &target, &hours, today);
            if !confirm {
                ensure_no_affected_bookings(affected.clone())?;
            }

            if let Some(employee) = business.employees.iter_mut().find(|e| e.id == employee_id) {
                employee.hours = Some(hours);
            }
            info!(
                business_id = %business.id,
                employee_id = %employee_id,
                confirmed = confirm,
                "Employee hours updated"
            );
            Ok(affected)
        })
    }
}

/// Parses a new booking's date and window, rejecting malformed or empty ones.
fn booking_window(booking: &Booking) -> EngineResult<(NaiveDate, MinuteRange)> {
    let date = booking.parsed_date().ok_or_else(|| EngineError::InvalidBooking {
        message: format!("invalid date '{}': expected YYYY-MM-DD", booking.date),
    })?;
    let window = time_range(&booking.start, &booking.end)?;
    if window.is_empty() {
        return Err(EngineError::InvalidBooking {
            message: format!("booking {}-{} has no duration", booking.start, booking.end),
        });
    }
    Ok((date, window))
}

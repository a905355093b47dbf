//! Business snapshot model.
//!
//! A [`Business`] aggregates everything the scheduling core reads for one
//! tenant. It is supplied by the caller for each computation and never
//! mutated by the core.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::booking::Booking;
use super::employee::Employee;
use super::hours::Hours;
use super::service::Service;

/// A tenant's hours, staff, services and bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    /// Unique identifier for the business.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Default opening hours.
    #[serde(default)]
    pub hours: Hours,
    /// Employees in display order. The order is the assignment tie-break.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Services offered.
    #[serde(default)]
    pub services: Vec<Service>,
    /// Existing bookings.
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl Business {
    /// Finds an employee by id.
    pub fn employee(&self, id: &str) -> EngineResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Resolves service ids to services, preserving the requested order.
    pub fn services_by_ids(&self, ids: &[String]) -> EngineResult<Vec<Service>> {
        ids.iter()
            .map(|id| {
                self.services
                    .iter()
                    .find(|s| &s.id == id)
                    .cloned()
                    .ok_or_else(|| EngineError::ServiceNotFound { id: id.clone() })
            })
            .collect()
    }

    /// Iterates the time-occupying bookings of one employee.
    pub fn active_bookings_for<'a>(
        &'a self,
        employee_id: &str,
    ) -> impl Iterator<Item = &'a Booking> {
        self.bookings
            .iter()
            .filter(move |b| b.occupies_time() && b.employee_id == employee_id)
    }
}

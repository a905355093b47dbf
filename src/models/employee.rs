//! Employee model.
//!
//! This module defines the Employee struct for representing staff who can
//! be assigned to bookings.

use serde::{Deserialize, Serialize};

use super::hours::Hours;

/// Represents an employee who can perform services.
///
/// Personal hours replace the business hours only on the days they define;
/// see [`crate::scheduling::governing_day`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name of the employee.
    pub name: String,
    /// Personal hours overriding the business hours on the days they define.
    #[serde(default)]
    pub hours: Option<Hours>,
}

//! Service model.

use serde::{Deserialize, Serialize};

/// A bookable service offered by a business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier for the service.
    pub id: String,
    /// Display name of the service.
    #[serde(default)]
    pub name: String,
    /// Duration of the service in minutes.
    pub duration: u32,
    /// Cleanup or preparation time after the service, in minutes.
    #[serde(default)]
    pub buffer: u32,
    /// Employees allowed to perform the service. Empty means anyone.
    #[serde(default)]
    pub employee_ids: Vec<String>,
}

impl Service {
    /// Minutes a booking of this service occupies: duration plus buffer.
    ///
    /// Saturates at `u32::MAX` instead of wrapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking_engine::models::Service;
    ///
    /// let service = Service {
    ///     id: "svc_cut".to_string(),
    ///     name: "Haircut".to_string(),
    ///     duration: 30,
    ///     buffer: 10,
    ///     employee_ids: vec![],
    /// };
    /// assert_eq!(service.occupied_minutes(), 40);
    /// ```
    pub fn occupied_minutes(&self) -> u32 {
        self.duration.saturating_add(self.buffer)
    }

    /// Returns true when the employee may perform this service.
    pub fn allows(&self, employee_id: &str) -> bool {
        self.employee_ids.is_empty() || self.employee_ids.iter().any(|id| id == employee_id)
    }
}

/// Total minutes consumed by a set of services.
///
/// Buffers stack: every service pays its own buffer. The total saturates
/// at `u32::MAX`, which no opening interval can hold.
pub fn total_duration(services: &[Service]) -> u32 {
    services
        .iter()
        .map(Service::occupied_minutes)
        .fold(0, u32::saturating_add)
}

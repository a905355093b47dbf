//! Configuration types for the booking engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `engine.yaml`.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::scheduling::{DEFAULT_SLOT_STEP_MINUTES, SlotOptions};

/// Slot generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchedulingSettings {
    /// Spacing between candidate start times, in minutes. Must be positive.
    #[serde(default = "default_slot_step")]
    pub slot_step_minutes: u32,
    /// Minimum notice required before a bookable start, in minutes.
    #[serde(default)]
    pub min_lead_minutes: u32,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            slot_step_minutes: DEFAULT_SLOT_STEP_MINUTES,
            min_lead_minutes: 0,
        }
    }
}

fn default_slot_step() -> u32 {
    DEFAULT_SLOT_STEP_MINUTES
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Socket address the server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// The contents of `engine.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineSettings {
    /// Slot generation settings.
    #[serde(default)]
    pub scheduling: SchedulingSettings,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
}

impl EngineSettings {
    /// Builds slot options for a computation happening at `now`.
    ///
    /// # Example
    ///
    /// ```
    /// use booking_engine::config::EngineSettings;
    /// use chrono::NaiveDate;
    ///
    /// let now = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap().and_hms_opt(8, 0, 0).unwrap();
    /// let options = EngineSettings::default().slot_options(now);
    /// assert_eq!(options.step_minutes, 15);
    /// assert_eq!(options.now, Some(now));
    /// ```
    pub fn slot_options(&self, now: NaiveDateTime) -> SlotOptions {
        SlotOptions {
            step_minutes: self.scheduling.slot_step_minutes,
            min_lead_minutes: self.scheduling.min_lead_minutes,
            now: Some(now),
        }
    }
}

//! Application state for the booking engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigLoader, EngineSettings};
use crate::repository::{BusinessRepository, InMemoryRepository};

/// Shared application state.
///
/// Holds the engine settings, the business repository and the clock every
/// handler reads "now" from.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<EngineSettings>,
    repository: Arc<dyn BusinessRepository>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        settings: EngineSettings,
        repository: impl BusinessRepository + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            repository: Arc::new(repository),
            clock: Arc::new(clock),
        }
    }

    /// Builds the state for a server: an in-memory repository seeded with
    /// the configured businesses and the system clock.
    pub fn from_config(config: ConfigLoader) -> Self {
        let (settings, businesses) = config.into_parts();
        Self::new(settings, InMemoryRepository::new(businesses), SystemClock)
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the business repository.
    pub fn repository(&self) -> &dyn BusinessRepository {
        self.repository.as_ref()
    }

    /// Returns the clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

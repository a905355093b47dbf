//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and seed businesses from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::Business;
use crate::scheduling::{MINUTES_PER_DAY, validate_hours};

use super::types::EngineSettings;

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml          # Scheduling and server settings
/// └── businesses/
///     └── salon.yaml       # One business snapshot per file
/// ```
///
/// # Example
///
/// ```no_run
/// use booking_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Slot step: {} min", loader.settings().scheduling.slot_step_minutes);
/// for business in loader.businesses() {
///     println!("Business: {}", business.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    businesses: Vec<Business>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - `engine.yaml` or the `businesses` directory is missing
    /// - Any file contains invalid YAML
    /// - The slot step is zero
    /// - Any business carries invalid hours
    ///
    /// # Example
    ///
    /// ```no_run
    /// use booking_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), booking_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&engine_path)?;
        if settings.scheduling.slot_step_minutes == 0 {
            return Err(EngineError::ConfigParseError {
                path: engine_path.display().to_string(),
                message: "scheduling.slot_step_minutes must be greater than zero".to_string(),
            });
        }

        let businesses = Self::load_businesses(&path.join("businesses"))?;
        info!(
            path = %path.display(),
            business_count = businesses.len(),
            "Configuration loaded"
        );

        Ok(Self {
            settings,
            businesses,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every business file, sorted by file name.
    fn load_businesses(dir: &Path) -> EngineResult<Vec<Business>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .iter()
            .map(|path| {
                let business = Self::load_yaml::<Business>(path)?;
                Self::check_hours(path, &business)?;
                Self::check_services(path, &business)?;
                Ok(business)
            })
            .collect()
    }

    /// Rejects seed data whose hours would fail an update.
    fn check_hours(path: &Path, business: &Business) -> EngineResult<()> {
        let personal = business.employees.iter().filter_map(|e| e.hours.as_ref());
        std::iter::once(&business.hours)
            .chain(personal)
            .try_for_each(validate_hours)
            .map_err(|e| EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }

    /// Rejects services that occupy more than a day, which no interval holds.
    fn check_services(path: &Path, business: &Business) -> EngineResult<()> {
        match business
            .services
            .iter()
            .find(|s| i64::from(s.occupied_minutes()) > i64::from(MINUTES_PER_DAY))
        {
            Some(service) => Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!(
                    "service '{}' occupies {} minutes, more than a day",
                    service.id,
                    service.occupied_minutes()
                ),
            }),
            None => Ok(()),
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the seed businesses, in file name order.
    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    /// Consumes the loader, returning settings and businesses.
    pub fn into_parts(self) -> (EngineSettings, Vec<Business>) {
        (self.settings, self.businesses)
    }
}

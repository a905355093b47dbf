//! Configuration loading for the booking engine.
//!
//! Engine settings and seed businesses are read from YAML files. The seed
//! businesses populate the in-memory repository at startup.
//!
//! # Example
//!
//! ```no_run
//! use booking_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} businesses", config.businesses().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineSettings, SchedulingSettings, ServerSettings};

//! Configuration loading and management for the attendance engine.
//!
//! This module loads engine settings and shift policies from YAML files,
//! or supplies the stock configuration via [`ConfigLoader::builtin`].
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Overtime bonus rule: {:?}", config.bonus_rule());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineSettings, ShiftsConfig};

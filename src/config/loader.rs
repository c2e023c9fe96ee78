//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and shift policies from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveTime;

use crate::calculation::OvertimeBonusRule;
use crate::error::{EngineError, EngineResult};
use crate::models::{DaySchedule, OvertimeMode, ShiftPolicy};

use super::types::{EngineConfig, EngineSettings, ShiftsConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml   # default policy and overtime-bonus rule
/// └── shifts.yaml   # shift policies
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let policy = loader.default_policy();
/// println!("Default shift: {}", policy.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    default_index: usize,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Two policies share an id, or the default policy id is unknown
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&engine_path)?;

        let shifts_path = path.join("shifts.yaml");
        let shifts = Self::load_yaml::<ShiftsConfig>(&shifts_path)?;

        Self::from_parts(settings, shifts.shifts).map_err(|message| {
            EngineError::ConfigParseError {
                path: shifts_path.display().to_string(),
                message,
            }
        })
    }

    /// The stock configuration: two shifts, flat-hour bonus, shift 1 by default.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::builtin();
    /// assert_eq!(loader.default_policy().name, "Shift 1 (Jam 8)");
    /// assert_eq!(loader.policies().count(), 2);
    /// ```
    pub fn builtin() -> Self {
        let shifts = vec![
            ShiftPolicy {
                id: 1,
                name: "Shift 1 (Jam 8)".to_string(),
                weekday: schedule((8, 0), (16, 0), (18, 0), (23, 0), (17, 0)),
                saturday: schedule((8, 0), (12, 0), (13, 0), (17, 0), (13, 0)),
                late_tolerance: 15,
                overtime_mode: OvertimeMode::PerJam,
            },
            ShiftPolicy {
                id: 2,
                name: "Shift 2 (Jam 9)".to_string(),
                weekday: schedule((9, 0), (17, 0), (19, 0), (23, 0), (18, 0)),
                saturday: schedule((9, 0), (13, 0), (14, 0), (18, 0), (14, 0)),
                late_tolerance: 15,
                overtime_mode: OvertimeMode::PerJam,
            },
        ];
        Self {
            config: EngineConfig::new(EngineSettings::default(), shifts),
            default_index: 0,
        }
    }

    fn from_parts(settings: EngineSettings, shifts: Vec<ShiftPolicy>) -> Result<Self, String> {
        let mut seen = HashSet::new();
        if let Some(dup) = shifts.iter().find(|s| !seen.insert(s.id)) {
            return Err(format!("duplicate shift policy id {}", dup.id));
        }

        let default_index = shifts
            .iter()
            .position(|s| s.id == settings.default_policy_id)
            .ok_or_else(|| {
                format!(
                    "default_policy_id {} does not match any shift policy",
                    settings.default_policy_id
                )
            })?;

        Ok(Self {
            config: EngineConfig::new(settings, shifts),
            default_index,
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

    /// Returns a copy of this configuration using another overtime-bonus rule.
    pub fn with_bonus_rule(mut self, rule: OvertimeBonusRule) -> Self {
        let settings = EngineSettings {
            overtime_bonus_rule: rule,
            ..self.config.settings().clone()
        };
        self.config = EngineConfig::new(settings, self.config.shifts().to_vec());
        self
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// The configured overtime-bonus rule.
    pub fn bonus_rule(&self) -> OvertimeBonusRule {
        self.config.settings().overtime_bonus_rule
    }

    /// All configured policies in file order.
    pub fn policies(&self) -> impl Iterator<Item = &ShiftPolicy> {
        self.config.shifts().iter()
    }

    /// Gets a policy by id.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::builtin();
    /// assert_eq!(loader.get_policy(2)?.name, "Shift 2 (Jam 9)");
    /// assert!(loader.get_policy(9).is_err());
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn get_policy(&self, policy_id: u32) -> EngineResult<&ShiftPolicy> {
        self.policies()
            .find(|p| p.id == policy_id)
            .ok_or(EngineError::PolicyNotFound { policy_id })
    }

    /// The policy named by `default_policy_id`.
    pub fn default_policy(&self) -> &ShiftPolicy {
        &self.config.shifts()[self.default_index]
    }
}

fn schedule(
    work_start: (u32, u32),
    work_end: (u32, u32),
    overtime_start: (u32, u32),
    overtime_end: (u32, u32),
    overtime_limit: (u32, u32),
) -> DaySchedule {
    let at = |(h, m): (u32, u32)| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
    DaySchedule {
        work_start: at(work_start),
        work_end: at(work_end),
        overtime_start: at(overtime_start),
        overtime_end: at(overtime_end),
        overtime_limit: at(overtime_limit),
    }
}

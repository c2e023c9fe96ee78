//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::calculation::OvertimeBonusRule;
use crate::models::ShiftPolicy;

fn default_policy_id() -> u32 {
    1
}

/// Engine-wide settings (`engine.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Policy used for new employees and when a record's policy is missing.
    #[serde(default = "default_policy_id")]
    pub default_policy_id: u32,
    /// Which overtime-bonus rule the engine applies.
    #[serde(default)]
    pub overtime_bonus_rule: OvertimeBonusRule,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_policy_id: default_policy_id(),
            overtime_bonus_rule: OvertimeBonusRule::default(),
        }
    }
}

/// Shift policy file structure (`shifts.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftsConfig {
    /// The configured policies.
    pub shifts: Vec<ShiftPolicy>,
}

/// Complete engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    shifts: Vec<ShiftPolicy>,
}

impl EngineConfig {
    /// Creates a new configuration from its parts.
    pub fn new(settings: EngineSettings, shifts: Vec<ShiftPolicy>) -> Self {
        Self { settings, shifts }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the configured shift policies.
    pub fn shifts(&self) -> &[ShiftPolicy] {
        &self.shifts
    }
}

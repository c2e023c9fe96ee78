//! Wall-clock time helpers shared by the models.
//!
//! Punches are persisted as the strings the time clock produced; policy
//! boundaries are `HH:MM` and violation times are `HH:MM:SS`. This module
//! converts between those textual forms and [`NaiveTime`].

use chrono::{NaiveTime, Timelike};

/// Cell contents that vendor exports use to mean "no value".
const EMPTY_PLACEHOLDERS: [&str; 4] = ["nan", "none", "null", "-"];

/// Returns true when a raw cell or punch string carries no value.
pub fn is_blank(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || EMPTY_PLACEHOLDERS
            .iter()
            .any(|placeholder| trimmed.eq_ignore_ascii_case(placeholder))
}

/// Parses a wall-clock time written as `HH:MM`, `HH:MM:SS`, or with `.`
/// separators (`08.15`).
///
/// Returns `None` for blank placeholders and anything that is not a valid
/// time of day. Seconds are kept.
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    if is_blank(raw) {
        return None;
    }
    let normalized = raw.trim().replace('.', ":");
    NaiveTime::parse_from_str(&normalized, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&normalized, "%H:%M"))
        .ok()
}

/// Parses a punch and truncates it to the whole minute.
///
/// Attendance metrics are computed at minute precision.
///
/// # Example
///
/// ```
/// use attendance_engine::models::parse_punch;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_punch("08:15:42"), NaiveTime::from_hms_opt(8, 15, 0));
/// assert_eq!(parse_punch("17.05"), NaiveTime::from_hms_opt(17, 5, 0));
/// assert_eq!(parse_punch("nan"), None);
/// ```
pub fn parse_punch(raw: &str) -> Option<NaiveTime> {
    parse_clock(raw).and_then(|time| time.with_second(0))
}

/// Serde adapter for `HH:MM` policy boundaries.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes a time as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    /// Deserializes a time from `HH:MM` (seconds tolerated).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time of day '{}'", raw)))
    }
}

/// Serde adapter for `HH:MM:SS` violation timestamps.
pub mod hhmmss {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes a time as `HH:MM:SS`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M:%S").to_string())
    }

    /// Deserializes a time from `HH:MM:SS` (`HH:MM` tolerated).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time of day '{}'", raw)))
    }
}

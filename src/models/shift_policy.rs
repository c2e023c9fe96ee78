//! Shift policy model.
//!
//! A shift policy is the named bundle of wall-clock boundaries applied to one
//! attendance record. Weekdays and Saturdays each carry their own schedule;
//! Sunday has no configurable fields and only ever counts raw duration.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::clock::hhmm;
use crate::calculation::DayCategory;

/// How the legacy overtime rule rounds minutes past the overtime limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeMode {
    /// Round down to whole hours.
    #[default]
    PerJam,
    /// Exact minutes expressed as fractional hours.
    PerMenit,
}

/// Time-of-day boundaries for one day category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Scheduled start of the shift.
    #[serde(with = "hhmm")]
    pub work_start: NaiveTime,
    /// Scheduled end of the shift.
    #[serde(with = "hhmm")]
    pub work_end: NaiveTime,
    /// Start of the separately punched overtime (lembur) window.
    #[serde(with = "hhmm")]
    pub overtime_start: NaiveTime,
    /// End of the lembur window.
    #[serde(with = "hhmm")]
    pub overtime_end: NaiveTime,
    /// Threshold after which presence counts as overtime under the legacy rule.
    #[serde(with = "hhmm")]
    pub overtime_limit: NaiveTime,
}

impl DaySchedule {
    /// Builds a schedule from `HH:MM` strings, returning `None` if any is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::DaySchedule;
    ///
    /// let schedule = DaySchedule::from_strs("08:00", "16:00", "18:00", "23:00", "17:00").unwrap();
    /// assert_eq!(schedule.scheduled_minutes(), 480);
    /// ```
    pub fn from_strs(
        work_start: &str,
        work_end: &str,
        overtime_start: &str,
        overtime_end: &str,
        overtime_limit: &str,
    ) -> Option<Self> {
        use super::clock::parse_clock;
        Some(Self {
            work_start: parse_clock(work_start)?,
            work_end: parse_clock(work_end)?,
            overtime_start: parse_clock(overtime_start)?,
            overtime_end: parse_clock(overtime_end)?,
            overtime_limit: parse_clock(overtime_limit)?,
        })
    }

    /// Length of the scheduled window in minutes (zero if inverted).
    pub fn scheduled_minutes(&self) -> i64 {
        (self.work_end - self.work_start).num_minutes().max(0)
    }
}

fn default_late_tolerance() -> u32 {
    15
}

/// A named shift policy.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::DayCategory;
/// use attendance_engine::models::ShiftPolicy;
///
/// let policy: ShiftPolicy = serde_json::from_str(r#"{
///     "id": 1,
///     "name": "Shift 1 (Jam 8)",
///     "weekday": {"work_start": "08:00", "work_end": "16:00",
///                 "overtime_start": "18:00", "overtime_end": "23:00", "overtime_limit": "17:00"},
///     "saturday": {"work_start": "08:00", "work_end": "12:00",
///                  "overtime_start": "13:00", "overtime_end": "17:00", "overtime_limit": "13:00"}
/// }"#).unwrap();
///
/// assert_eq!(policy.late_tolerance, 15);
/// assert!(policy.schedule_for(DayCategory::Sunday).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPolicy {
    /// Identifier referenced by attendance rows.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Monday to Friday schedule.
    pub weekday: DaySchedule,
    /// Saturday schedule.
    pub saturday: DaySchedule,
    /// Grace period in minutes before lateness counts.
    #[serde(default = "default_late_tolerance")]
    pub late_tolerance: u32,
    /// Rounding used by the legacy overtime rule.
    #[serde(default)]
    pub overtime_mode: OvertimeMode,
}

impl ShiftPolicy {
    /// Returns the schedule for a day category; Sunday has none.
    pub fn schedule_for(&self, day: DayCategory) -> Option<&DaySchedule> {
        match day {
            DayCategory::Weekday => Some(&self.weekday),
            DayCategory::Saturday => Some(&self.saturday),
            DayCategory::Sunday => None,
        }
    }
}

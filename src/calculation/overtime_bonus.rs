//! Overtime credit for presence past the scheduled end.
//!
//! Two rules exist. [`OvertimeBonusRule::FlatHour`] is the current one: a
//! flat one hour once the employee stays 60 minutes past `work_end`. The
//! [`OvertimeBonusRule::LegacyThreshold`] rule measures from the policy's
//! `overtime_limit`, stops at the lembur clock-in, and rounds according to
//! the policy's [`OvertimeMode`]; it reproduces older reports.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, OvertimeMode, PunchField, ShiftPolicy, is_blank, parse_punch};

use super::clock_math::{hours_from_minutes, minutes_after_work_end, minutes_between};
use super::day_detection::DayCategory;
use super::loyalty::OVERTIME_THRESHOLD_MINUTES;

/// Hours credited by the flat rule, regardless of how long past the threshold.
pub const FLAT_OVERTIME_BONUS_HOURS: Decimal = Decimal::ONE;

/// Selects how the overtime bonus is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeBonusRule {
    /// One hour once `clock_out - work_end >= 60` minutes.
    #[default]
    FlatHour,
    /// Minutes past `overtime_limit`, rounded per [`OvertimeMode`].
    LegacyThreshold,
}

impl OvertimeBonusRule {
    /// Applies the rule to one record.
    pub fn apply(
        &self,
        record: &AttendanceRecord,
        policy: &ShiftPolicy,
        day: DayCategory,
    ) -> Decimal {
        match self {
            OvertimeBonusRule::FlatHour => calculate_overtime_bonus(record, policy, day),
            OvertimeBonusRule::LegacyThreshold => calculate_legacy_overtime(record, policy, day),
        }
    }
}

/// Calculates the flat overtime bonus in hours.
///
/// Returns `1.0` once `clock_out` is at least 60 minutes past `work_end`,
/// otherwise zero. Sunday is always zero. Complements
/// [`calculate_loyalty`](super::calculate_loyalty): the two are never both
/// non-zero for the same record.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{calculate_overtime_bonus, DayCategory};
/// use attendance_engine::models::{AttendanceRecord, DaySchedule, OvertimeMode, ShiftPolicy};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let schedule = DaySchedule::from_strs("08:00", "16:00", "18:00", "23:00", "17:00").unwrap();
/// let policy = ShiftPolicy {
///     id: 1,
///     name: "Shift 1".to_string(),
///     weekday: schedule.clone(),
///     saturday: schedule,
///     late_tolerance: 15,
///     overtime_mode: OvertimeMode::PerJam,
/// };
/// let mut record = AttendanceRecord::new(1, 1, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(), 1);
/// record.clock_out = Some("18:00".to_string());
///
/// // Two hours late out still credits a flat one hour.
/// assert_eq!(calculate_overtime_bonus(&record, &policy, DayCategory::Weekday), Decimal::ONE);
/// ```
pub fn calculate_overtime_bonus(
    record: &AttendanceRecord,
    policy: &ShiftPolicy,
    day: DayCategory,
) -> Decimal {
    let Some(schedule) = policy.schedule_for(day) else {
        return Decimal::ZERO;
    };

    if minutes_after_work_end(record, schedule) >= OVERTIME_THRESHOLD_MINUTES {
        FLAT_OVERTIME_BONUS_HOURS
    } else {
        Decimal::ZERO
    }
}

/// Calculates overtime under the legacy threshold rule, in hours.
///
/// Overtime runs from `overtime_limit` to `clock_out`, or to the lembur
/// clock-in if that comes first. `per_jam` floors to whole hours and
/// `per_menit` keeps exact minutes. A lembur clock-in that is present but
/// unreadable yields zero. Sunday is always zero.
pub fn calculate_legacy_overtime(
    record: &AttendanceRecord,
    policy: &ShiftPolicy,
    day: DayCategory,
) -> Decimal {
    let Some(schedule) = policy.schedule_for(day) else {
        return Decimal::ZERO;
    };
    let Some(clock_out) = record.time(PunchField::ClockOut) else {
        return Decimal::ZERO;
    };

    let limit = schedule.overtime_limit;
    if clock_out <= limit {
        return Decimal::ZERO;
    }

    let end = match record.punch(PunchField::OvertimeClockIn).filter(|raw| !is_blank(raw)) {
        Some(raw) => match parse_punch(raw) {
            Some(lembur_start) => clock_out.min(lembur_start),
            None => return Decimal::ZERO,
        },
        None => clock_out,
    };
    if end <= limit {
        return Decimal::ZERO;
    }

    let minutes = minutes_between(limit, end);
    match policy.overtime_mode {
        OvertimeMode::PerJam => Decimal::new(minutes / 60, 0),
        OvertimeMode::PerMenit => hours_from_minutes(minutes),
    }
}

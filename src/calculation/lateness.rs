//! Lateness against the scheduled start.

use chrono::Duration;
use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, PunchField, ShiftPolicy};

use super::clock_math::minutes_between;
use super::day_detection::DayCategory;

/// Calculates lateness in minutes.
///
/// The tolerance is a gate, not an allowance: once `clock_in` is past
/// `work_start + late_tolerance`, lateness is measured from `work_start`.
/// Sunday, a missing `clock_in`, and arrivals within the grace window are
/// zero.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{calculate_lateness, DayCategory};
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
///
/// record.clock_in = Some("08:15".to_string());
/// assert_eq!(calculate_lateness(&record, &policy, DayCategory::Weekday), Decimal::ZERO);
///
/// record.clock_in = Some("08:16".to_string());
/// assert_eq!(calculate_lateness(&record, &policy, DayCategory::Weekday), Decimal::new(16, 0));
/// ```
pub fn calculate_lateness(
    record: &AttendanceRecord,
    policy: &ShiftPolicy,
    day: DayCategory,
) -> Decimal {
    let Some(schedule) = policy.schedule_for(day) else {
        return Decimal::ZERO;
    };
    let Some(clock_in) = record.time(PunchField::ClockIn) else {
        return Decimal::ZERO;
    };

    let tolerance = Duration::minutes(i64::from(policy.late_tolerance));
    let (grace_end, wrapped_seconds) = schedule.work_start.overflowing_add_signed(tolerance);
    // A grace window running past midnight can never be exceeded within the day.
    if wrapped_seconds != 0 || clock_in <= grace_end {
        return Decimal::ZERO;
    }

    Decimal::new(minutes_between(schedule.work_start, clock_in), 0)
}

//! Regular work hours.
//!
//! On weekdays and Saturdays only the overlap between the scheduled window
//! and the actual punches counts; early arrival and late departure are
//! captured by loyalty and overtime instead. Sunday counts raw duration.

use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, PunchField, ShiftPolicy};

use super::clock_math::{hours_from_minutes, minutes_between};
use super::day_detection::DayCategory;

/// Calculates work hours for one record.
///
/// Returns zero when either main punch is missing or malformed, or when
/// `clock_out` is not after `clock_in` (overnight shifts are not supported).
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{calculate_work_hours, DayCategory};
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
/// record.clock_in = Some("07:30".to_string());
/// record.clock_out = Some("16:30".to_string());
///
/// assert_eq!(calculate_work_hours(&record, &policy, DayCategory::Weekday), Decimal::new(8, 0));
/// assert_eq!(calculate_work_hours(&record, &policy, DayCategory::Sunday), Decimal::new(9, 0));
/// ```
pub fn calculate_work_hours(
    record: &AttendanceRecord,
    policy: &ShiftPolicy,
    day: DayCategory,
) -> Decimal {
    let (Some(clock_in), Some(clock_out)) = (
        record.time(PunchField::ClockIn),
        record.time(PunchField::ClockOut),
    ) else {
        return Decimal::ZERO;
    };

    if clock_out <= clock_in {
        return Decimal::ZERO;
    }

    let Some(schedule) = policy.schedule_for(day) else {
        return hours_from_minutes(minutes_between(clock_in, clock_out));
    };

    let start = schedule.work_start.max(clock_in);
    let end = schedule.work_end.min(clock_out);
    if end <= start {
        return Decimal::ZERO;
    }

    let minutes = minutes_between(start, end).min(schedule.scheduled_minutes());
    hours_from_minutes(minutes)
}

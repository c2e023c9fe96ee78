//! Loyalty band: rewarding modest lingering past the scheduled end.

use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, ShiftPolicy};

use super::clock_math::minutes_after_work_end;
use super::day_detection::DayCategory;

/// Minimum minutes past `work_end` that earn loyalty.
pub const LOYALTY_MIN_MINUTES: i64 = 30;

/// Minutes past `work_end` at which presence graduates into overtime.
///
/// Exactly this many minutes is overtime, not loyalty.
pub const OVERTIME_THRESHOLD_MINUTES: i64 = 60;

/// Calculates loyalty minutes for one record.
///
/// `30 <= extra < 60` returns `extra`; anything shorter or longer returns
/// zero. Sunday is always zero.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{calculate_loyalty, DayCategory};
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
/// record.clock_in = Some("08:00".to_string());
/// record.clock_out = Some("16:45".to_string());
///
/// assert_eq!(calculate_loyalty(&record, &policy, DayCategory::Weekday), Decimal::new(45, 0));
/// ```
pub fn calculate_loyalty(
    record: &AttendanceRecord,
    policy: &ShiftPolicy,
    day: DayCategory,
) -> Decimal {
    let Some(schedule) = policy.schedule_for(day) else {
        return Decimal::ZERO;
    };

    let extra = minutes_after_work_end(record, schedule);
    if (LOYALTY_MIN_MINUTES..OVERTIME_THRESHOLD_MINUTES).contains(&extra) {
        Decimal::new(extra, 0)
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{policy, record};

    fn loyalty_for(clock_out: &str) -> Decimal {
        calculate_loyalty(&record("08:00", clock_out), &policy(), DayCategory::Weekday)
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(loyalty_for("16:29"), Decimal::ZERO);
        assert_eq!(loyalty_for("16:30"), Decimal::new(30, 0));
        assert_eq!(loyalty_for("16:59"), Decimal::new(59, 0));
        assert_eq!(loyalty_for("17:00"), Decimal::ZERO);
        assert_eq!(loyalty_for("18:00"), Decimal::ZERO);
    }

    #[test]
    fn test_leaving_early_is_zero() {
        assert_eq!(loyalty_for("15:00"), Decimal::ZERO);
    }

    #[test]
    fn test_saturday_uses_saturday_end() {
        let r = record("08:00", "12:40");
        assert_eq!(calculate_loyalty(&r, &policy(), DayCategory::Saturday), Decimal::new(40, 0));
    }

    #[test]
    fn test_sunday_is_zero() {
        let r = record("08:00", "16:45");
        assert_eq!(calculate_loyalty(&r, &policy(), DayCategory::Sunday), Decimal::ZERO);
    }

    #[test]
    fn test_missing_clock_out_is_zero() {
        assert_eq!(loyalty_for(""), Decimal::ZERO);
    }
}

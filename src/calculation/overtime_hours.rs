//! Lembur hours from the separately punched overtime pair.

use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, PunchField, ShiftPolicy};

use super::clock_math::{hours_from_minutes, minutes_between};
use super::day_detection::DayCategory;

/// Calculates the hours of the separately punched lembur shift.
///
/// Sunday is always zero. Otherwise the raw elapsed time between
/// `overtime_clock_in` and `overtime_clock_out`, or zero when either is
/// missing or the pair is inverted. The policy's lembur window is
/// informational and does not clamp the result.
pub fn calculate_overtime_hours(
    record: &AttendanceRecord,
    _policy: &ShiftPolicy,
    day: DayCategory,
) -> Decimal {
    if day == DayCategory::Sunday {
        return Decimal::ZERO;
    }

    let (Some(start), Some(end)) = (
        record.time(PunchField::OvertimeClockIn),
        record.time(PunchField::OvertimeClockOut),
    ) else {
        return Decimal::ZERO;
    };

    if end <= start {
        return Decimal::ZERO;
    }
    hours_from_minutes(minutes_between(start, end))
}

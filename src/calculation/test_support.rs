//! Fixtures shared by the calculation unit tests.

use chrono::NaiveDate;

use crate::models::{AttendanceRecord, DaySchedule, OvertimeMode, ShiftPolicy};

/// Weekday 08:00-16:00, lembur 18:00-23:00, overtime limit 17:00.
pub(crate) fn weekday_schedule() -> DaySchedule {
    DaySchedule::from_strs("08:00", "16:00", "18:00", "23:00", "17:00").unwrap()
}

/// Saturday 08:00-12:00, lembur 13:00-17:00, overtime limit 13:00.
pub(crate) fn saturday_schedule() -> DaySchedule {
    DaySchedule::from_strs("08:00", "12:00", "13:00", "17:00", "13:00").unwrap()
}

pub(crate) fn policy() -> ShiftPolicy {
    ShiftPolicy {
        id: 1,
        name: "Shift 1 (Jam 8)".to_string(),
        weekday: weekday_schedule(),
        saturday: saturday_schedule(),
        late_tolerance: 15,
        overtime_mode: OvertimeMode::PerJam,
    }
}

fn punch(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// A Monday record with the main punches set; empty strings mean "no punch".
pub(crate) fn record(clock_in: &str, clock_out: &str) -> AttendanceRecord {
    let mut record = AttendanceRecord::new(1, 1, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(), 1);
    record.clock_in = punch(clock_in);
    record.clock_out = punch(clock_out);
    record
}

/// A Monday record with main and lembur punches.
pub(crate) fn record_with_lembur(
    clock_in: &str,
    clock_out: &str,
    overtime_in: &str,
    overtime_out: &str,
) -> AttendanceRecord {
    let mut record = record(clock_in, clock_out);
    record.overtime_clock_in = punch(overtime_in);
    record.overtime_clock_out = punch(overtime_out);
    record
}

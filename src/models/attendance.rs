//! Attendance records.
//!
//! [`RawPunchRecord`] is what the parser recovers from a time-clock export;
//! [`AttendanceRecord`] is the stored per-(employee, date) row the engine
//! consumes. Punches stay in their textual form so that a malformed manual
//! edit degrades to "no punch" instead of failing a whole report.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::clock::{is_blank, parse_punch};

/// One employee block recovered from an imported log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPunchRecord {
    /// Employee name as printed by the time clock.
    pub name: String,
    /// First punch of the day.
    pub clock_in: Option<String>,
    /// Second punch.
    pub clock_out: Option<String>,
    /// Third punch (lembur start).
    pub overtime_clock_in: Option<String>,
    /// Fourth punch (lembur end).
    pub overtime_clock_out: Option<String>,
    /// Every punch after the fourth, in order.
    #[serde(default)]
    pub anomalous_punches: Vec<String>,
}

impl RawPunchRecord {
    /// Builds a record by assigning punches positionally.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::RawPunchRecord;
    ///
    /// let punches = ["07:58", "16:02", "18:00", "21:00", "21:05"].map(String::from);
    /// let record = RawPunchRecord::from_punches("Budi", punches.to_vec());
    /// assert_eq!(record.overtime_clock_out.as_deref(), Some("21:00"));
    /// assert_eq!(record.anomalous_punches, vec!["21:05".to_string()]);
    /// ```
    pub fn from_punches(name: impl Into<String>, punches: Vec<String>) -> Self {
        let mut punches = punches.into_iter();
        Self {
            name: name.into(),
            clock_in: punches.next(),
            clock_out: punches.next(),
            overtime_clock_in: punches.next(),
            overtime_clock_out: punches.next(),
            anomalous_punches: punches.collect(),
        }
    }

    /// Returns the punch stored for a field.
    pub fn punch(&self, field: PunchField) -> Option<&str> {
        match field {
            PunchField::ClockIn => self.clock_in.as_deref(),
            PunchField::ClockOut => self.clock_out.as_deref(),
            PunchField::OvertimeClockIn => self.overtime_clock_in.as_deref(),
            PunchField::OvertimeClockOut => self.overtime_clock_out.as_deref(),
        }
    }
}

/// The four positional punch slots of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchField {
    /// Start of the main shift.
    ClockIn,
    /// End of the main shift.
    ClockOut,
    /// Start of the lembur shift.
    OvertimeClockIn,
    /// End of the lembur shift.
    OvertimeClockOut,
}

impl PunchField {
    /// All slots in positional order.
    pub const ALL: [PunchField; 4] = [
        PunchField::ClockIn,
        PunchField::ClockOut,
        PunchField::OvertimeClockIn,
        PunchField::OvertimeClockOut,
    ];

    /// Field name used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchField::ClockIn => "clock_in",
            PunchField::ClockOut => "clock_out",
            PunchField::OvertimeClockIn => "overtime_clock_in",
            PunchField::OvertimeClockOut => "overtime_clock_out",
        }
    }
}

impl std::fmt::Display for PunchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored attendance row for one employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Store-assigned identifier (violations hang off it).
    pub id: u64,
    /// Owning employee.
    pub employee_id: u64,
    /// Nominal day of the punches.
    pub date: NaiveDate,
    /// First punch as stored.
    pub clock_in: Option<String>,
    /// Second punch as stored.
    pub clock_out: Option<String>,
    /// Lembur start as stored.
    pub overtime_clock_in: Option<String>,
    /// Lembur end as stored.
    pub overtime_clock_out: Option<String>,
    /// Punches beyond the fourth; informational only.
    #[serde(default)]
    pub anomalous_punches: Vec<String>,
    /// Policy that applies to this specific date.
    pub shift_policy_id: u32,
}

impl AttendanceRecord {
    /// Creates an empty record for a day.
    pub fn new(id: u64, employee_id: u64, date: NaiveDate, shift_policy_id: u32) -> Self {
        Self {
            id,
            employee_id,
            date,
            clock_in: None,
            clock_out: None,
            overtime_clock_in: None,
            overtime_clock_out: None,
            anomalous_punches: Vec::new(),
            shift_policy_id,
        }
    }

    /// Returns the raw string stored for a field.
    pub fn punch(&self, field: PunchField) -> Option<&str> {
        match field {
            PunchField::ClockIn => self.clock_in.as_deref(),
            PunchField::ClockOut => self.clock_out.as_deref(),
            PunchField::OvertimeClockIn => self.overtime_clock_in.as_deref(),
            PunchField::OvertimeClockOut => self.overtime_clock_out.as_deref(),
        }
    }

    /// Replaces the raw value of a field; blank placeholders clear it.
    pub fn set_punch(&mut self, field: PunchField, value: Option<String>) {
        let value = value.filter(|v| !is_blank(v)).map(|v| v.trim().to_string());
        match field {
            PunchField::ClockIn => self.clock_in = value,
            PunchField::ClockOut => self.clock_out = value,
            PunchField::OvertimeClockIn => self.overtime_clock_in = value,
            PunchField::OvertimeClockOut => self.overtime_clock_out = value,
        }
    }

    /// Copies the punches of an imported record into this row.
    pub fn apply_punches(&mut self, raw: &RawPunchRecord) {
        for field in PunchField::ALL {
            self.set_punch(field, raw.punch(field).map(str::to_string));
        }
        self.anomalous_punches = raw.anomalous_punches.clone();
    }

    /// Parses a field to a minute-precision wall-clock time.
    ///
    /// Missing and malformed values both yield `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceRecord, PunchField};
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let mut record = AttendanceRecord::new(1, 1, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(), 1);
    /// record.clock_in = Some("08.07".to_string());
    /// record.clock_out = Some("garbage".to_string());
    /// assert_eq!(record.time(PunchField::ClockIn), NaiveTime::from_hms_opt(8, 7, 0));
    /// assert_eq!(record.time(PunchField::ClockOut), None);
    /// ```
    pub fn time(&self, field: PunchField) -> Option<NaiveTime> {
        self.punch(field).and_then(parse_punch)
    }

    /// The employee counts as present when a first punch exists.
    pub fn is_present(&self) -> bool {
        self.clock_in.as_deref().is_some_and(|v| !is_blank(v))
    }

    /// True when both lembur punches are present.
    pub fn has_overtime_punches(&self) -> bool {
        self.time(PunchField::OvertimeClockIn).is_some()
            && self.time(PunchField::OvertimeClockOut).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_from_punches_fewer_than_four() {
        let record = RawPunchRecord::from_punches("Ani", vec!["08:00".to_string()]);
        assert_eq!(record.clock_in.as_deref(), Some("08:00"));
        assert_eq!(record.clock_out, None);
        assert!(record.anomalous_punches.is_empty());
    }

    #[test]
    fn test_apply_punches_overwrites_all_slots() {
        let mut record = AttendanceRecord::new(1, 1, make_date("2025-03-03"), 1);
        record.overtime_clock_in = Some("18:00".to_string());

        let raw = RawPunchRecord::from_punches(
            "Ani",
            vec!["07:55".to_string(), "16:10".to_string()],
        );
        record.apply_punches(&raw);

        assert_eq!(record.clock_in.as_deref(), Some("07:55"));
        assert_eq!(record.clock_out.as_deref(), Some("16:10"));
        assert_eq!(record.overtime_clock_in, None);
    }

    #[test]
    fn test_set_punch_blank_clears() {
        let mut record = AttendanceRecord::new(1, 1, make_date("2025-03-03"), 1);
        record.set_punch(PunchField::ClockIn, Some("08:00".to_string()));
        assert!(record.is_present());
        record.set_punch(PunchField::ClockIn, Some("nan".to_string()));
        assert!(!record.is_present());
    }

    #[test]
    fn test_has_overtime_punches_requires_both() {
        let mut record = AttendanceRecord::new(1, 1, make_date("2025-03-03"), 1);
        record.overtime_clock_in = Some("18:00".to_string());
        assert!(!record.has_overtime_punches());
        record.overtime_clock_out = Some("21:00".to_string());
        assert!(record.has_overtime_punches());
    }

    #[test]
    fn test_punch_field_display() {
        assert_eq!(PunchField::OvertimeClockOut.to_string(), "overtime_clock_out");
    }
}

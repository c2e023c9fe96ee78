//! Request types for the attendance engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/import` endpoints and the query string of `/report`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::OvertimeBonusRule;
use crate::models::{AttendanceRecord, PunchField, ShiftPolicy};
use crate::store::ImportMode;

/// Request body for the `/calculate` endpoint.
///
/// A stateless calculation: the caller supplies the policy and the punches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The policy to apply, inline or by configured id.
    pub policy: PolicyRequest,
    /// Overtime-bonus rule; the configured rule when omitted.
    #[serde(default)]
    pub rule: Option<OvertimeBonusRule>,
    /// The days to calculate.
    pub records: Vec<RecordRequest>,
}

/// A shift policy given inline or by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyRequest {
    /// Id of a configured policy.
    Id(u32),
    /// A complete policy.
    Inline(ShiftPolicy),
}

/// One day of punches in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRequest {
    /// The nominal day of the punches.
    pub date: NaiveDate,
    /// First punch.
    #[serde(default)]
    pub clock_in: Option<String>,
    /// Second punch.
    #[serde(default)]
    pub clock_out: Option<String>,
    /// Lembur start.
    #[serde(default)]
    pub overtime_clock_in: Option<String>,
    /// Lembur end.
    #[serde(default)]
    pub overtime_clock_out: Option<String>,
}

impl RecordRequest {
    /// Converts into a transient attendance record under `policy_id`.
    pub fn into_record(self, id: u64, policy_id: u32) -> AttendanceRecord {
        let mut record = AttendanceRecord::new(id, 0, self.date, policy_id);
        record.set_punch(PunchField::ClockIn, self.clock_in);
        record.set_punch(PunchField::ClockOut, self.clock_out);
        record.set_punch(PunchField::OvertimeClockIn, self.overtime_clock_in);
        record.set_punch(PunchField::OvertimeClockOut, self.overtime_clock_out);
        record
    }
}

/// Request body for the `/import` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Path of the time-clock export on the server.
    pub path: String,
    /// The day the export covers.
    pub date: NaiveDate,
    /// How existing rows of that day are treated.
    #[serde(default)]
    pub mode: ImportMode,
}

/// Query string of the `/report/:employee_id` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    /// First day of the period (inclusive).
    pub start: NaiveDate,
    /// Last day of the period (inclusive).
    pub end: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_calculation_request_with_policy_id() {
        let json = r#"{
            "policy": 2,
            "records": [
                {"date": "2025-03-03", "clock_in": "08:55", "clock_out": "17:05"}
            ]
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(request.policy, PolicyRequest::Id(2)));
        assert!(request.rule.is_none());
        assert_eq!(request.records.len(), 1);
        assert_eq!(request.records[0].overtime_clock_in, None);
    }

    #[test]
    fn test_deserialize_calculation_request_with_inline_policy() {
        let json = r#"{
            "policy": {
                "id": 9,
                "name": "Pagi",
                "late_tolerance": 5,
                "weekday": {"work_start": "07:00", "work_end": "15:00", "overtime_start": "17:00",
                            "overtime_end": "22:00", "overtime_limit": "16:00"},
                "saturday": {"work_start": "07:00", "work_end": "11:00", "overtime_start": "12:00",
                             "overtime_end": "16:00", "overtime_limit": "12:00"}
            },
            "rule": "legacy_threshold",
            "records": []
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        match request.policy {
            PolicyRequest::Inline(policy) => assert_eq!(policy.late_tolerance, 5),
            other => panic!("Expected inline policy, got {:?}", other),
        }
        assert_eq!(request.rule, Some(OvertimeBonusRule::LegacyThreshold));
    }

    #[test]
    fn test_record_conversion_clears_placeholders() {
        let req = RecordRequest {
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            clock_in: Some(" 08:00 ".to_string()),
            clock_out: Some("-".to_string()),
            overtime_clock_in: None,
            overtime_clock_out: None,
        };

        let record = req.into_record(1, 2);
        assert_eq!(record.clock_in.as_deref(), Some("08:00"));
        assert_eq!(record.clock_out, None);
        assert_eq!(record.shift_policy_id, 2);
    }

    #[test]
    fn test_import_mode_defaults_to_replace() {
        let request: ImportRequest =
            serde_json::from_str(r#"{"path": "/tmp/log.xls", "date": "2025-03-03"}"#).unwrap();
        assert_eq!(request.mode, ImportMode::Replace);

        let request: ImportRequest = serde_json::from_str(
            r#"{"path": "/tmp/log.xls", "date": "2025-03-03", "mode": "insert_only"}"#,
        )
        .unwrap();
        assert_eq!(request.mode, ImportMode::InsertOnly);
    }
}

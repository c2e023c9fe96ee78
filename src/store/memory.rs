//! In-memory attendance store.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Employee, Leave, PunchField, RawPunchRecord, ShiftPolicy, Violation,
    is_blank, parse_clock,
};

use super::{AttendanceStore, DateSummary, ImportMode, ImportSummary};

/// A process-local store keyed the way the attendance database is:
/// employees by name, attendance rows by (employee, date).
///
/// # Example
///
/// ```
/// use attendance_engine::config::ConfigLoader;
/// use attendance_engine::models::RawPunchRecord;
/// use attendance_engine::store::{AttendanceStore, ImportMode, InMemoryStore};
/// use chrono::NaiveDate;
///
/// let mut store = InMemoryStore::from_config(&ConfigLoader::builtin());
/// let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let raw = RawPunchRecord::from_punches("Budi", vec!["07:58".into(), "16:02".into()]);
///
/// let summary = store.save_import(date, &[raw], ImportMode::Replace);
/// assert_eq!(summary.inserted, 1);
///
/// let budi = store.employees().next().unwrap().id;
/// assert_eq!(store.get_attendance(budi, date, date).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    default_policy_id: u32,
    policies: BTreeMap<u32, ShiftPolicy>,
    employees: BTreeMap<u64, Employee>,
    attendance: BTreeMap<u64, AttendanceRecord>,
    violations: BTreeMap<u64, Violation>,
    leaves: BTreeMap<u64, Leave>,
    next_id: u64,
}

impl InMemoryStore {
    /// Creates an empty store with the given policies.
    ///
    /// New employees default to `default_policy_id`.
    pub fn new(policies: impl IntoIterator<Item = ShiftPolicy>, default_policy_id: u32) -> Self {
        Self {
            default_policy_id,
            policies: policies.into_iter().map(|p| (p.id, p)).collect(),
            employees: BTreeMap::new(),
            attendance: BTreeMap::new(),
            violations: BTreeMap::new(),
            leaves: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Creates an empty store seeded with the configured policies.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(
            config.policies().cloned(),
            config.settings().default_policy_id,
        )
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// All employees, ordered by id.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// All shift policies, ordered by id.
    pub fn policies(&self) -> impl Iterator<Item = &ShiftPolicy> {
        self.policies.values()
    }

    /// Returns the id of the employee called `name`, creating them if needed.
    pub fn add_or_get_employee(&mut self, name: &str) -> u64 {
        if let Some(employee) = self.employees.values().find(|e| e.matches_name(name)) {
            return employee.id;
        }

        let id = self.allocate_id();
        self.employees.insert(
            id,
            Employee {
                id,
                name: name.trim().to_string(),
                default_shift_id: self.default_policy_id,
            },
        );
        debug!(employee_id = id, name = name.trim(), "Employee created");
        id
    }

    fn find_row(&self, employee_id: u64, date: NaiveDate) -> Option<u64> {
        self.attendance
            .values()
            .find(|r| r.employee_id == employee_id && r.date == date)
            .map(|r| r.id)
    }

    fn remove_row(&mut self, attendance_id: u64) {
        self.attendance.remove(&attendance_id);
        self.violations.retain(|_, v| v.attendance_id != attendance_id);
    }

    /// Stores parsed records for `date`.
    ///
    /// New rows take the employee's default shift. Overwritten rows keep
    /// their id, per-day shift assignment and violations.
    pub fn save_import(
        &mut self,
        date: NaiveDate,
        records: &[RawPunchRecord],
        mode: ImportMode,
    ) -> ImportSummary {
        let mut summary = ImportSummary::default();

        if mode == ImportMode::Replace {
            let stale: Vec<u64> = self
                .attendance
                .values()
                .filter(|r| r.date == date)
                .map(|r| r.id)
                .collect();
            summary.removed = stale.len();
            for id in stale {
                self.remove_row(id);
            }
        }

        for raw in records {
            let employee_id = self.add_or_get_employee(&raw.name);

            match self.find_row(employee_id, date) {
                Some(_) if mode == ImportMode::InsertOnly => summary.skipped += 1,
                Some(id) => {
                    if let Some(row) = self.attendance.get_mut(&id) {
                        row.apply_punches(raw);
                    }
                    summary.updated += 1;
                }
                None => {
                    let policy_id = self
                        .employees
                        .get(&employee_id)
                        .map_or(self.default_policy_id, |e| e.default_shift_id);
                    let id = self.allocate_id();
                    let mut row = AttendanceRecord::new(id, employee_id, date, policy_id);
                    row.apply_punches(raw);
                    self.attendance.insert(id, row);
                    summary.inserted += 1;
                }
            }
        }

        info!(
            date = %date,
            mode = ?mode,
            removed = summary.removed,
            inserted = summary.inserted,
            updated = summary.updated,
            skipped = summary.skipped,
            "Attendance import saved"
        );
        summary
    }

    /// Rows of one date, ordered by employee name.
    pub fn attendance_on(&self, date: NaiveDate) -> Vec<&AttendanceRecord> {
        let mut rows: Vec<&AttendanceRecord> =
            self.attendance.values().filter(|r| r.date == date).collect();
        rows.sort_by(|a, b| {
            let name = |r: &AttendanceRecord| {
                self.employees
                    .get(&r.employee_id)
                    .map(|e| e.name.clone())
                    .unwrap_or_default()
            };
            name(a).cmp(&name(b))
        });
        rows
    }

    /// Headcount for one date.
    pub fn summary_for_date(&self, date: NaiveDate) -> DateSummary {
        self.attendance
            .values()
            .filter(|r| r.date == date)
            .fold(DateSummary::default(), |mut summary, row| {
                summary.total_employees += 1;
                if row.is_present() {
                    summary.present += 1;
                } else {
                    summary.absent += 1;
                }
                if row.overtime_clock_in.is_some() {
                    summary.with_overtime += 1;
                }
                summary
            })
    }

    fn row_mut(&mut self, attendance_id: u64) -> EngineResult<&mut AttendanceRecord> {
        self.attendance
            .get_mut(&attendance_id)
            .ok_or(EngineError::AttendanceNotFound { attendance_id })
    }

    /// Manually edits one punch. `None` or a blank placeholder clears it.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidTime`] when the value is not a wall-clock time,
    /// [`EngineError::AttendanceNotFound`] when the row does not exist.
    pub fn update_punch(
        &mut self,
        attendance_id: u64,
        field: PunchField,
        value: Option<&str>,
    ) -> EngineResult<()> {
        let value = value.filter(|v| !is_blank(v));
        if let Some(v) = value {
            validate_time(field.as_str(), v)?;
        }

        self.row_mut(attendance_id)?
            .set_punch(field, value.map(str::to_string));
        debug!(attendance_id, field = %field, value = ?value, "Punch updated");
        Ok(())
    }

    fn ensure_policy(&self, policy_id: u32) -> EngineResult<()> {
        if self.policies.contains_key(&policy_id) {
            Ok(())
        } else {
            Err(EngineError::PolicyNotFound { policy_id })
        }
    }

    /// Assigns a shift policy to one attendance day.
    pub fn assign_shift(&mut self, attendance_id: u64, policy_id: u32) -> EngineResult<()> {
        self.ensure_policy(policy_id)?;
        self.row_mut(attendance_id)?.shift_policy_id = policy_id;
        Ok(())
    }

    /// Sets the shift stamped onto an employee's future imports.
    ///
    /// Existing attendance rows are not touched.
    pub fn assign_employee_shift(&mut self, employee_id: u64, policy_id: u32) -> EngineResult<()> {
        self.ensure_policy(policy_id)?;
        let employee = self
            .employees
            .get_mut(&employee_id)
            .ok_or(EngineError::EmployeeNotFound { employee_id })?;
        employee.default_shift_id = policy_id;
        Ok(())
    }

    /// Records a violation against an attendance row and returns its id.
    pub fn add_violation(
        &mut self,
        attendance_id: u64,
        start_time: &str,
        end_time: &str,
        description: &str,
    ) -> EngineResult<u64> {
        if !self.attendance.contains_key(&attendance_id) {
            return Err(EngineError::AttendanceNotFound { attendance_id });
        }
        let start_time = validate_time("start_time", start_time)?;
        let end_time = validate_time("end_time", end_time)?;

        let id = self.allocate_id();
        self.violations.insert(
            id,
            Violation {
                id,
                attendance_id,
                start_time,
                end_time,
                description: description.trim().to_string(),
            },
        );
        Ok(id)
    }

    /// Rewrites an existing violation.
    pub fn update_violation(
        &mut self,
        violation_id: u64,
        start_time: &str,
        end_time: &str,
        description: &str,
    ) -> EngineResult<()> {
        let start_time = validate_time("start_time", start_time)?;
        let end_time = validate_time("end_time", end_time)?;
        let violation = self
            .violations
            .get_mut(&violation_id)
            .ok_or(EngineError::ViolationNotFound { violation_id })?;

        violation.start_time = start_time;
        violation.end_time = end_time;
        violation.description = description.trim().to_string();
        Ok(())
    }

    /// Deletes a violation; returns whether it existed.
    pub fn delete_violation(&mut self, violation_id: u64) -> bool {
        self.violations.remove(&violation_id).is_some()
    }

    /// Records a leave for an employee and returns its id.
    pub fn add_leave(
        &mut self,
        employee_id: u64,
        date: NaiveDate,
        description: &str,
    ) -> EngineResult<u64> {
        if !self.employees.contains_key(&employee_id) {
            return Err(EngineError::EmployeeNotFound { employee_id });
        }
        let id = self.allocate_id();
        self.leaves.insert(
            id,
            Leave {
                id,
                employee_id,
                date,
                description: description.trim().to_string(),
            },
        );
        Ok(id)
    }

    /// Inserts or replaces a policy, returning the previous version.
    pub fn upsert_policy(&mut self, policy: ShiftPolicy) -> Option<ShiftPolicy> {
        info!(policy_id = policy.id, name = %policy.name, "Shift policy saved");
        self.policies.insert(policy.id, policy)
    }

    /// Removes a policy nobody defaults to.
    ///
    /// Attendance rows still pointing at it fall back to the default policy
    /// when reported.
    ///
    /// # Errors
    ///
    /// [`EngineError::PolicyInUse`] when any employee defaults to it,
    /// [`EngineError::PolicyNotFound`] when it does not exist.
    pub fn delete_policy(&mut self, policy_id: u32) -> EngineResult<ShiftPolicy> {
        let employees = self
            .employees
            .values()
            .filter(|e| e.default_shift_id == policy_id)
            .count();
        if employees > 0 {
            return Err(EngineError::PolicyInUse {
                policy_id,
                employees,
            });
        }
        self.policies
            .remove(&policy_id)
            .ok_or(EngineError::PolicyNotFound { policy_id })
    }
}

fn validate_time(field: &str, value: &str) -> EngineResult<NaiveTime> {
    parse_clock(value).ok_or_else(|| EngineError::InvalidTime {
        field: field.to_string(),
        value: value.to_string(),
    })
}

impl AttendanceStore for InMemoryStore {
    fn get_employee(&self, employee_id: u64) -> Option<Employee> {
        self.employees.get(&employee_id).cloned()
    }

    fn get_attendance(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<AttendanceRecord> {
        let mut rows: Vec<AttendanceRecord> = self
            .attendance
            .values()
            .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.date);
        rows
    }

    fn get_shift_policy(&self, policy_id: u32) -> Option<ShiftPolicy> {
        self.policies.get(&policy_id).cloned()
    }

    fn get_violations(&self, attendance_id: u64) -> Vec<Violation> {
        let mut violations: Vec<Violation> = self
            .violations
            .values()
            .filter(|v| v.attendance_id == attendance_id)
            .cloned()
            .collect();
        violations.sort_by_key(|v| v.start_time);
        violations
    }

    fn get_leaves(&self, employee_id: u64, date: NaiveDate) -> Vec<Leave> {
        self.leaves
            .values()
            .filter(|l| l.employee_id == employee_id && l.date == date)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn raw(name: &str, punches: &[&str]) -> RawPunchRecord {
        RawPunchRecord::from_punches(name, punches.iter().map(|p| p.to_string()).collect())
    }

    fn store() -> InMemoryStore {
        InMemoryStore::from_config(&ConfigLoader::builtin())
    }

    #[test]
    fn test_add_or_get_employee_reuses_existing() {
        let mut store = store();
        let first = store.add_or_get_employee("Budi");
        let second = store.add_or_get_employee(" budi ");
        assert_eq!(first, second);
        assert_eq!(store.employees().count(), 1);
        assert_eq!(store.get_employee(first).unwrap().default_shift_id, 1);
    }

    #[test]
    fn test_replace_mode_removes_rows_of_the_date() {
        let mut store = store();
        let date = make_date("2025-03-03");
        store.save_import(date, &[raw("Ani", &["08:00"]), raw("Budi", &["08:05"])], ImportMode::Replace);

        let summary = store.save_import(date, &[raw("Ani", &["07:50", "16:00"])], ImportMode::Replace);
        assert_eq!(summary.removed, 2);
        assert_eq!(summary.inserted, 1);
        assert_eq!(store.attendance_on(date).len(), 1);
    }

    #[test]
    fn test_replace_mode_keeps_other_dates() {
        let mut store = store();
        store.save_import(make_date("2025-03-03"), &[raw("Ani", &["08:00"])], ImportMode::Replace);
        store.save_import(make_date("2025-03-04"), &[raw("Ani", &["08:00"])], ImportMode::Replace);
        assert_eq!(store.attendance_on(make_date("2025-03-03")).len(), 1);
    }

    #[test]
    fn test_merge_mode_overwrites_punches_and_keeps_id() {
        let mut store = store();
        let date = make_date("2025-03-03");
        store.save_import(date, &[raw("Ani", &["08:00", "16:00"])], ImportMode::Replace);
        let id = store.attendance_on(date)[0].id;

        let summary = store.save_import(
            date,
            &[raw("Ani", &["07:45", "16:30"]), raw("Budi", &["08:00"])],
            ImportMode::Merge,
        );
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.written(), 2);

        let ani = store.attendance.get(&id).unwrap();
        assert_eq!(ani.clock_in.as_deref(), Some("07:45"));
    }

    #[test]
    fn test_insert_only_skips_existing() {
        let mut store = store();
        let date = make_date("2025-03-03");
        store.save_import(date, &[raw("Ani", &["08:00"])], ImportMode::Replace);

        let summary = store.save_import(date, &[raw("Ani", &["09:00"])], ImportMode::InsertOnly);
        assert_eq!(summary.skipped, 1);
        assert_eq!(store.attendance_on(date)[0].clock_in.as_deref(), Some("08:00"));
    }

    #[test]
    fn test_new_rows_take_employee_default_shift() {
        let mut store = store();
        let ani = store.add_or_get_employee("Ani");
        store.assign_employee_shift(ani, 2).unwrap();

        let date = make_date("2025-03-03");
        store.save_import(date, &[raw("Ani", &["09:00"])], ImportMode::Replace);
        assert_eq!(store.attendance_on(date)[0].shift_policy_id, 2);
    }

    #[test]
    fn test_attendance_on_sorted_by_name() {
        let mut store = store();
        let date = make_date("2025-03-03");
        store.save_import(date, &[raw("Siti", &[]), raw("Agus", &[])], ImportMode::Replace);
        let names: Vec<_> = store
            .attendance_on(date)
            .iter()
            .map(|r| store.get_employee(r.employee_id).unwrap().name)
            .collect();
        assert_eq!(names, vec!["Agus", "Siti"]);
    }

    #[test]
    fn test_summary_for_date() {
        let mut store = store();
        let date = make_date("2025-03-03");
        store.save_import(
            date,
            &[
                raw("Ani", &["08:00", "16:00", "18:00", "21:00"]),
                raw("Budi", &["08:00", "16:00"]),
                raw("Citra", &[]),
            ],
            ImportMode::Replace,
        );
        assert_eq!(
            store.summary_for_date(date),
            DateSummary {
                total_employees: 3,
                present: 2,
                absent: 1,
                with_overtime: 1,
            }
        );
    }

    #[test]
    fn test_update_punch_validates_and_clears() {
        let mut store = store();
        let date = make_date("2025-03-03");
        store.save_import(date, &[raw("Ani", &["08:00"])], ImportMode::Replace);
        let id = store.attendance_on(date)[0].id;

        let result = store.update_punch(id, PunchField::ClockOut, Some("25:61"));
        assert!(matches!(result, Err(EngineError::InvalidTime { .. })));

        store.update_punch(id, PunchField::ClockOut, Some("16.30")).unwrap();
        assert_eq!(store.attendance[&id].clock_out.as_deref(), Some("16.30"));

        store.update_punch(id, PunchField::ClockIn, Some("")).unwrap();
        assert!(!store.attendance[&id].is_present());

        let missing = store.update_punch(999, PunchField::ClockIn, None);
        assert!(matches!(missing, Err(EngineError::AttendanceNotFound { attendance_id: 999 })));
    }

    #[test]
    fn test_assign_shift_requires_known_policy() {
        let mut store = store();
        let date = make_date("2025-03-03");
        store.save_import(date, &[raw("Ani", &["08:00"])], ImportMode::Replace);
        let id = store.attendance_on(date)[0].id;

        assert!(matches!(
            store.assign_shift(id, 42),
            Err(EngineError::PolicyNotFound { policy_id: 42 })
        ));
        store.assign_shift(id, 2).unwrap();
        assert_eq!(store.attendance[&id].shift_policy_id, 2);
    }

    #[test]
    fn test_violation_lifecycle() {
        let mut store = store();
        let date = make_date("2025-03-03");
        store.save_import(date, &[raw("Ani", &["08:00"])], ImportMode::Replace);
        let attendance_id = store.attendance_on(date)[0].id;

        let late = store.add_violation(attendance_id, "14:00:00", "14:10:00", "Tidur").unwrap();
        let early = store.add_violation(attendance_id, "10:00", "10:05", "Main HP").unwrap();
        let violations = store.get_violations(attendance_id);
        assert_eq!(violations.iter().map(|v| v.id).collect::<Vec<_>>(), vec![early, late]);

        store.update_violation(late, "14:00:00", "14:20:00", "Tidur siang").unwrap();
        assert_eq!(store.get_violations(attendance_id)[1].description, "Tidur siang");

        assert!(store.delete_violation(early));
        assert!(!store.delete_violation(early));
        assert!(matches!(
            store.update_violation(early, "10:00", "10:05", "x"),
            Err(EngineError::ViolationNotFound { .. })
        ));
    }

    #[test]
    fn test_add_violation_rejects_bad_time() {
        let mut store = store();
        let date = make_date("2025-03-03");
        store.save_import(date, &[raw("Ani", &["08:00"])], ImportMode::Replace);
        let attendance_id = store.attendance_on(date)[0].id;

        let result = store.add_violation(attendance_id, "noon", "13:00", "x");
        match result {
            Err(EngineError::InvalidTime { field, value }) => {
                assert_eq!(field, "start_time");
                assert_eq!(value, "noon");
            }
            other => panic!("Expected InvalidTime, got {:?}", other),
        }
    }

    #[test]
    fn test_replace_import_drops_violations_of_removed_rows() {
        let mut store = store();
        let date = make_date("2025-03-03");
        store.save_import(date, &[raw("Ani", &["08:00"])], ImportMode::Replace);
        let attendance_id = store.attendance_on(date)[0].id;
        store.add_violation(attendance_id, "10:00", "10:05", "x").unwrap();

        store.save_import(date, &[raw("Ani", &["08:00"])], ImportMode::Replace);
        assert!(store.get_violations(attendance_id).is_empty());
    }

    #[test]
    fn test_leaves_by_employee_and_date() {
        let mut store = store();
        let ani = store.add_or_get_employee("Ani");
        store.add_leave(ani, make_date("2025-03-04"), "Cuti tahunan").unwrap();

        assert_eq!(store.get_leaves(ani, make_date("2025-03-04")).len(), 1);
        assert!(store.get_leaves(ani, make_date("2025-03-05")).is_empty());
        assert!(matches!(
            store.add_leave(77, make_date("2025-03-04"), "x"),
            Err(EngineError::EmployeeNotFound { employee_id: 77 })
        ));
    }

    #[test]
    fn test_get_attendance_filters_period_and_orders_by_date() {
        let mut store = store();
        for day in ["2025-03-05", "2025-03-03", "2025-03-10"] {
            store.save_import(make_date(day), &[raw("Ani", &["08:00"])], ImportMode::Replace);
        }
        let ani = store.add_or_get_employee("Ani");

        let rows = store.get_attendance(ani, make_date("2025-03-01"), make_date("2025-03-07"));
        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![make_date("2025-03-03"), make_date("2025-03-05")]);
    }

    #[test]
    fn test_delete_policy_refused_while_in_use() {
        let mut store = store();
        store.add_or_get_employee("Ani");

        assert!(matches!(
            store.delete_policy(1),
            Err(EngineError::PolicyInUse { policy_id: 1, employees: 1 })
        ));
        let removed = store.delete_policy(2).unwrap();
        assert_eq!(removed.id, 2);
        assert!(store.get_shift_policy(2).is_none());
        assert!(matches!(
            store.delete_policy(2),
            Err(EngineError::PolicyNotFound { policy_id: 2 })
        ));
    }

    #[test]
    fn test_upsert_policy_replaces() {
        let mut store = store();
        let mut policy = store.get_shift_policy(1).unwrap();
        policy.late_tolerance = 5;
        let previous = store.upsert_policy(policy).unwrap();
        assert_eq!(previous.late_tolerance, 15);
        assert_eq!(store.get_shift_policy(1).unwrap().late_tolerance, 5);
        assert_eq!(store.policies().count(), 2);
    }
}

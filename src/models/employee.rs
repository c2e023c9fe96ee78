//! Employee model.
//!
//! Employees are created on first sight of a name in an imported log; the
//! time clock has no stable employee numbers we can rely on.

use serde::{Deserialize, Serialize};

/// An employee known to the attendance store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-assigned identifier.
    pub id: u64,
    /// Name as printed by the time clock.
    pub name: String,
    /// Shift policy stamped onto newly imported days for this employee.
    pub default_shift_id: u32,
}

impl Employee {
    /// Returns true if `name` refers to this employee.
    ///
    /// Time-clock exports pad and re-case names inconsistently, so the
    /// comparison ignores surrounding whitespace and ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    ///
    /// let employee = Employee { id: 1, name: "Budi Santoso".to_string(), default_shift_id: 1 };
    /// assert!(employee.matches_name("  budi santoso "));
    /// assert!(!employee.matches_name("Budi"));
    /// ```
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_serialization() {
        let employee = Employee {
            id: 42,
            name: "Siti".to_string(),
            default_shift_id: 2,
        };
        let json = serde_json::to_string(&employee).unwrap();
        let back: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(back, employee);
    }

    #[test]
    fn test_matches_name_is_exact_apart_from_case_and_padding() {
        let employee = Employee {
            id: 1,
            name: "Agus".to_string(),
            default_shift_id: 1,
        };
        assert!(employee.matches_name("AGUS"));
        assert!(!employee.matches_name("Agus S"));
    }
}

//! Day classification.
//!
//! Every metric depends on whether the record falls on a weekday, a Saturday
//! or a Sunday. Sunday is the most special-cased: only raw duration counts.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The day category a shift policy distinguishes.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::DayCategory;
///
/// let day = DayCategory::Saturday;
/// assert_eq!(day.to_string(), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCategory {
    /// Monday through Friday.
    Weekday,
    /// Saturday, with its own (usually shorter) schedule.
    Saturday,
    /// Sunday: no overtime, loyalty or lateness.
    Sunday,
}

impl std::fmt::Display for DayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayCategory::Weekday => write!(f, "Weekday"),
            DayCategory::Saturday => write!(f, "Saturday"),
            DayCategory::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Determines the day category for a date using the ISO weekday.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{get_day_category, DayCategory};
/// use chrono::NaiveDate;
///
/// // 2026-01-17 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(get_day_category(saturday), DayCategory::Saturday);
///
/// // 2026-01-18 is a Sunday
/// let sunday = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
/// assert_eq!(get_day_category(sunday), DayCategory::Sunday);
///
/// // 2026-01-12 is a Monday
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// assert_eq!(get_day_category(monday), DayCategory::Weekday);
/// ```
pub fn get_day_category(date: NaiveDate) -> DayCategory {
    match date.weekday() {
        Weekday::Sat => DayCategory::Saturday,
        Weekday::Sun => DayCategory::Sunday,
        _ => DayCategory::Weekday,
    }
}

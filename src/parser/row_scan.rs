//! Row scanning shared by every parse strategy.
//!
//! An employee block is a row containing a header marker (`NAME`, `NAMA`,
//! ...) with the employee name one or two cells to its right, followed by a
//! row holding that day's punches. The first four punches map positionally
//! to clock-in, clock-out, lembur-in and lembur-out; the rest are anomalies.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{RawPunchRecord, parse_clock};

use super::grid::CellGrid;

/// Case-insensitive header markers that introduce an employee block.
pub const HEADER_KEYWORDS: [&str; 8] = [
    "NAME",
    "NAMA",
    "PEGAWAI",
    "KARYAWAN",
    "NAMA KARYAWAN",
    "NAMA PEGAWAI",
    "EMPLOYEE",
    "EMPLOYEE NAME",
];

/// Offsets from the marker cell at which the name is looked for, in order.
const NAME_OFFSETS: [usize; 2] = [1, 2];

/// How many rows below a header are searched for punches.
const PUNCH_ROW_LOOKAHEAD: usize = 2;

static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[:.]\d{2}(?:[:.]\d{2})?$").expect("valid time regex"));

/// Result of scanning one or more grids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Employee blocks recovered, in grid order.
    pub records: Vec<RawPunchRecord>,
    /// Header marker cells seen, named or not.
    pub header_hits: usize,
    /// Header marker cells skipped because no name sat next to them.
    pub nameless_headers: usize,
}

impl ScanReport {
    /// Folds another report into this one.
    pub fn merge(&mut self, other: ScanReport) {
        self.records.extend(other.records);
        self.header_hits += other.header_hits;
        self.nameless_headers += other.nameless_headers;
    }
}

/// Scans one grid for employee blocks.
///
/// Never fails: rows that are too short or carry no valid name are skipped.
///
/// # Example
///
/// ```
/// use attendance_engine::parser::{CellGrid, scan_grid};
///
/// let grid = CellGrid::from_rows(vec![
///     vec!["Work No", "12", "", "", "Name", "", "Budi"],
///     vec!["", "07:58\n16:03\n18:00\n21:10"],
/// ]);
/// let report = scan_grid(&grid);
/// assert_eq!(report.records.len(), 1);
/// assert_eq!(report.records[0].name, "Budi");
/// assert_eq!(report.records[0].overtime_clock_out.as_deref(), Some("21:10"));
/// ```
pub fn scan_grid(grid: &CellGrid) -> ScanReport {
    let rows = grid.rows();
    let mut report = ScanReport::default();
    let mut index = 0;

    while index < rows.len() {
        let header = inspect_header_row(&rows[index]);
        report.header_hits += header.hits;
        report.nameless_headers += header.nameless;

        let Some(name) = header.name else {
            index += 1;
            continue;
        };

        let (punches, consumed) = punches_below(rows, index);
        report.records.push(RawPunchRecord::from_punches(name, punches));
        index += 1 + consumed;
    }

    report
}

/// Extracts time-like tokens from a row, normalizing `.` to `:`.
///
/// Cells are split on whitespace and list separators; a token qualifies when
/// it is at least four characters, contains `:` or `.`, and reads as a valid
/// time of day.
pub fn extract_time_tokens(row: &[String]) -> Vec<String> {
    row.iter()
        .flat_map(|cell| cell.split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '|')))
        .filter(|piece| is_time_token(piece))
        .map(|piece| piece.replace('.', ":"))
        .collect()
}

fn is_time_token(piece: &str) -> bool {
    piece.len() >= 4
        && piece.contains([':', '.'])
        && TIME_TOKEN.is_match(piece)
        && parse_clock(piece).is_some()
}

fn is_header_marker(cell: &str) -> bool {
    let normalized = cell.trim().trim_end_matches(':').trim();
    HEADER_KEYWORDS
        .iter()
        .any(|keyword| normalized.eq_ignore_ascii_case(keyword))
}

fn is_plausible_name(cell: &str) -> bool {
    cell.chars().any(char::is_alphanumeric) && !is_header_marker(cell) && !is_time_token(cell)
}

struct HeaderInspection {
    name: Option<String>,
    hits: usize,
    nameless: usize,
}

fn inspect_header_row(row: &[String]) -> HeaderInspection {
    let mut inspection = HeaderInspection {
        name: None,
        hits: 0,
        nameless: 0,
    };

    for (col, cell) in row.iter().enumerate() {
        if !is_header_marker(cell) {
            continue;
        }
        inspection.hits += 1;

        let name = NAME_OFFSETS
            .iter()
            .filter_map(|offset| row.get(col + offset))
            .find(|candidate| is_plausible_name(candidate));

        match name {
            Some(name) => {
                inspection.name = Some(name.trim_start_matches(':').trim().to_string());
                break;
            }
            None => inspection.nameless += 1,
        }
    }

    inspection
}

fn punches_below(rows: &[Vec<String>], header_index: usize) -> (Vec<String>, usize) {
    for distance in 1..=PUNCH_ROW_LOOKAHEAD {
        let Some(row) = rows.get(header_index + distance) else {
            break;
        };
        if row.iter().any(|cell| is_header_marker(cell)) {
            break;
        }
        let tokens = extract_time_tokens(row);
        if !tokens.is_empty() {
            return (tokens, distance);
        }
    }
    (Vec::new(), 0)
}

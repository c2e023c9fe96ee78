//! Generic two-dimensional cell grid.
//!
//! Every strategy lowers its input (sheet, HTML table, delimited text) to a
//! [`CellGrid`] so the row scanner sees one shape regardless of format.

use crate::models::is_blank;

/// Rectangular-ish grid of cell strings; rows may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGrid {
    rows: Vec<Vec<String>>,
}

impl CellGrid {
    /// Builds a grid, trimming cells and blanking `nan`/`none` placeholders.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::parser::CellGrid;
    ///
    /// let grid = CellGrid::from_rows(vec![vec![" Name ", "nan", "Budi"]]);
    /// assert_eq!(grid.cell(0, 0), Some("Name"));
    /// assert_eq!(grid.cell(0, 1), None);
    /// assert_eq!(grid.cell(0, 9), None);
    /// ```
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| normalize_cell(cell.as_ref())).collect())
            .collect();
        Self { rows }
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Non-empty cell content at a position; out-of-range positions are `None`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }

    /// True when no row has at least two non-empty cells.
    ///
    /// Used to reject delimiter guesses that leave every line in one column.
    pub fn is_trivial(&self) -> bool {
        !self
            .rows
            .iter()
            .any(|row| row.iter().filter(|cell| !cell.is_empty()).count() >= 2)
    }
}

fn normalize_cell(raw: &str) -> String {
    if is_blank(raw) {
        String::new()
    } else {
        raw.trim().to_string()
    }
}

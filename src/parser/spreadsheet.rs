//! Spreadsheet strategy: every sheet of an xls/xlsx/ods workbook.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::NaiveTime;
use tracing::debug;

use super::grid::CellGrid;
use super::row_scan::{ScanReport, scan_grid};
use super::source::SourceFile;
use super::strategy::{ParseStrategy, StrategyAttempt, StrategyKind};

/// Reads the file as a workbook, tolerating legacy binary `.xls`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetStrategy;

impl ParseStrategy for SpreadsheetStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Spreadsheet
    }

    fn attempt(&self, source: &SourceFile) -> StrategyAttempt {
        let grids = match load_sheets(source.bytes()) {
            Ok(grids) => grids,
            Err(err) => {
                debug!(file = source.name(), error = %err, "Not a readable workbook");
                return StrategyAttempt::unreadable(self.kind(), err.to_string());
            }
        };

        let mut scan = ScanReport::default();
        for grid in &grids {
            scan.merge(scan_grid(grid));
        }
        StrategyAttempt::from_scan(self.kind(), scan, grids.len(), "sheet")
    }
}

fn load_sheets(bytes: &[u8]) -> Result<Vec<CellGrid>, calamine::Error> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let grids = workbook
        .worksheets()
        .into_iter()
        .map(|(_, range)| CellGrid::from_rows(range.rows().map(|row| row.iter().map(cell_text))))
        .collect();
    Ok(grids)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.fract() == 0.0 => format!("{}", *value as i64),
        Data::Float(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => {
            let serial = value.as_f64();
            match value.as_datetime() {
                // Serial below one is a bare time of day.
                Some(datetime) if serial < 1.0 => datetime.format("%H:%M").to_string(),
                Some(datetime) if datetime.time() == NaiveTime::MIN => {
                    datetime.date().to_string()
                }
                Some(datetime) => datetime.format("%Y-%m-%d %H:%M").to_string(),
                None => serial.to_string(),
            }
        }
    }
}

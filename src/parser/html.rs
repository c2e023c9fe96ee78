//! HTML-table strategy for exports that are web pages under a spreadsheet name.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::grid::CellGrid;
use super::row_scan::{ScanReport, scan_grid};
use super::source::SourceFile;
use super::strategy::{ParseStrategy, StrategyAttempt, StrategyKind};

/// Upper bound on `colspan`, guarding against absurd attribute values.
const MAX_COLSPAN: usize = 64;

/// Reads every `<table>` of an HTML document as a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTableStrategy;

impl ParseStrategy for HtmlTableStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::HtmlTable
    }

    fn attempt(&self, source: &SourceFile) -> StrategyAttempt {
        let text = source.text();
        if !text.to_ascii_lowercase().contains("<table") {
            return StrategyAttempt::unreadable(self.kind(), "no <table> element");
        }

        let grids = match load_tables(&text) {
            Ok(grids) => grids,
            Err(message) => {
                debug!(file = source.name(), error = %message, "HTML tables unreadable");
                return StrategyAttempt::unreadable(self.kind(), message);
            }
        };

        let mut scan = ScanReport::default();
        for grid in &grids {
            scan.merge(scan_grid(grid));
        }
        StrategyAttempt::from_scan(self.kind(), scan, grids.len(), "table")
    }
}

fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|err| format!("invalid selector '{}': {}", css, err))
}

fn load_tables(text: &str) -> Result<Vec<CellGrid>, String> {
    let document = Html::parse_document(text);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td, th")?;

    let grids = document
        .select(&table_selector)
        .map(|table| {
            let rows: Vec<Vec<String>> = table
                .select(&row_selector)
                .map(|row| expand_cells(row.select(&cell_selector)))
                .collect();
            CellGrid::from_rows(rows)
        })
        .collect();
    Ok(grids)
}

/// Flattens cells into strings, padding `colspan` so column offsets survive.
fn expand_cells<'a>(cells: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
    let mut expanded = Vec::new();
    for cell in cells {
        // Text nodes separated by <br> become separate lines.
        let text = cell
            .text()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_COLSPAN);

        expanded.push(text);
        expanded.extend(std::iter::repeat_n(String::new(), span - 1));
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::StrategyOutcome;

    fn attempt(html: &str) -> StrategyAttempt {
        HtmlTableStrategy.attempt(&SourceFile::from_bytes("log.xls", html.as_bytes().to_vec()))
    }

    #[test]
    fn test_table_with_br_separated_punches() {
        let result = attempt(
            "<html><body><table>\
             <tr><td>NAME</td><td></td><td>Budi</td></tr>\
             <tr><td>07:55<br>16:05</td></tr>\
             </table></body></html>",
        );
        assert!(result.is_match());
        assert_eq!(result.records[0].name, "Budi");
        assert_eq!(result.records[0].clock_in.as_deref(), Some("07:55"));
        assert_eq!(result.records[0].clock_out.as_deref(), Some("16:05"));
    }

    #[test]
    fn test_colspan_preserves_offsets() {
        let result = attempt(
            "<table><tr><td>Nama</td><td colspan=\"2\"></td><td>Ani</td></tr>\
             <tr><td>08:00</td></tr></table>",
        );
        // "Ani" sits three columns right of the marker, outside both offsets.
        assert!(!result.is_match());
        assert_eq!(result.diagnostic.outcome, StrategyOutcome::NoNamedHeader);
    }

    #[test]
    fn test_not_html() {
        let result = attempt("Name,Budi\n08:00,16:00");
        assert_eq!(result.diagnostic.outcome, StrategyOutcome::Unreadable);
    }

    #[test]
    fn test_multiple_tables_are_all_scanned() {
        let result = attempt(
            "<table><tr><th>Name</th><td>Ani</td></tr><tr><td>08:00</td></tr></table>\
             <table><tr><th>Name</th><td>Budi</td></tr><tr><td>09:00</td></tr></table>",
        );
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[1].name, "Budi");
    }
}

//! Delimited-text strategy, the last resort.

use csv::ReaderBuilder;
use tracing::debug;

use super::grid::CellGrid;
use super::row_scan::{ScanReport, scan_grid};
use super::source::SourceFile;
use super::strategy::{ParseStrategy, StrategyAttempt, StrategyKind, StrategyOutcome};

/// Delimiters tried, in order.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b';', b'|'];

/// Reads the file as delimited text, trying each candidate delimiter.
///
/// The first delimiter whose grid is non-trivial and yields records wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedTextStrategy;

impl ParseStrategy for DelimitedTextStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DelimitedText
    }

    fn attempt(&self, source: &SourceFile) -> StrategyAttempt {
        let text = source.text();
        let mut best: Option<StrategyAttempt> = None;
        let mut errors = Vec::new();

        for delimiter in CANDIDATE_DELIMITERS {
            let grid = match read_grid(&text, delimiter) {
                Ok(grid) if !grid.is_trivial() => grid,
                Ok(_) => continue,
                Err(err) => {
                    errors.push(format!("{:?}: {}", delimiter as char, err));
                    continue;
                }
            };

            let scan: ScanReport = scan_grid(&grid);
            let mut attempt = StrategyAttempt::from_scan(self.kind(), scan, 1, "grid");
            attempt.diagnostic.detail = format!(
                "delimiter {:?}: {}",
                delimiter as char, attempt.diagnostic.detail
            );
            debug!(file = source.name(), detail = %attempt.diagnostic.detail, "Delimiter tried");

            if attempt.is_match() {
                return attempt;
            }
            // Keep the most informative miss: a nameless header beats no header.
            let replace = match &best {
                None => true,
                Some(previous) => {
                    previous.diagnostic.outcome == StrategyOutcome::NoHeaderFound
                        && attempt.diagnostic.outcome == StrategyOutcome::NoNamedHeader
                }
            };
            if replace {
                best = Some(attempt);
            }
        }

        best.unwrap_or_else(|| {
            let detail = if errors.is_empty() {
                "no delimiter produced more than one column".to_string()
            } else {
                errors.join("; ")
            };
            StrategyAttempt::unreadable(self.kind(), detail)
        })
    }
}

fn read_grid(text: &str, delimiter: u8) -> Result<CellGrid, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    Ok(CellGrid::from_rows(rows))
}

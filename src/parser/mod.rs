//! Tolerant attendance-log parser.
//!
//! Vendor time-clock exports are unreliable: real binary spreadsheets, HTML
//! pages saved as `.xls`, or plain delimited text. The parser tries an
//! ordered list of [`ParseStrategy`] implementations against the same bytes
//! and stops at the first that recovers any employee block. Only a missing
//! file is an error; everything else degrades to an empty or partial
//! [`ParseOutcome`] whose diagnostics explain what was tried.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::parser::parse;
//!
//! let outcome = parse("./imports/Attendance log.xls")?;
//! for record in &outcome.records {
//!     println!("{}: {:?} - {:?}", record.name, record.clock_in, record.clock_out);
//! }
//! # Ok::<(), attendance_engine::error::EngineError>(())
//! ```

mod delimited;
mod grid;
mod html;
mod row_scan;
mod source;
mod spreadsheet;
mod strategy;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::EngineResult;
use crate::models::RawPunchRecord;

pub use delimited::{CANDIDATE_DELIMITERS, DelimitedTextStrategy};
pub use grid::CellGrid;
pub use html::HtmlTableStrategy;
pub use row_scan::{HEADER_KEYWORDS, ScanReport, extract_time_tokens, scan_grid};
pub use source::SourceFile;
pub use spreadsheet::SpreadsheetStrategy;
pub use strategy::{ParseDiagnostic, ParseStrategy, StrategyAttempt, StrategyKind, StrategyOutcome};

/// What a parse produced and how it got there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Recovered employee blocks; empty when nothing was recognized.
    pub records: Vec<RawPunchRecord>,
    /// The strategy that produced `records`, if any did.
    pub strategy: Option<StrategyKind>,
    /// One event per attempted strategy, in order.
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParseOutcome {
    /// True when no records were recognized.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when any strategy saw a header marker, named or not.
    ///
    /// Distinguishes "structurally readable but not an attendance log" from
    /// "this looks like a log but the names are missing".
    pub fn header_seen(&self) -> bool {
        self.diagnostics.iter().any(|d| {
            matches!(
                d.outcome,
                StrategyOutcome::Matched | StrategyOutcome::NoNamedHeader
            )
        })
    }

    /// True when every attempted strategy failed to read the content at all.
    pub fn all_unreadable(&self) -> bool {
        !self.diagnostics.is_empty()
            && self
                .diagnostics
                .iter()
                .all(|d| d.outcome == StrategyOutcome::Unreadable)
    }
}

/// Runs parse strategies in order until one recovers records.
pub struct AttendanceLogParser {
    strategies: Vec<Box<dyn ParseStrategy>>,
}

impl Default for AttendanceLogParser {
    /// Spreadsheet, then HTML table, then delimited text.
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(SpreadsheetStrategy),
            Box::new(HtmlTableStrategy),
            Box::new(DelimitedTextStrategy),
        ])
    }
}

impl AttendanceLogParser {
    /// Creates a parser with a custom ordered strategy list.
    pub fn with_strategies(strategies: Vec<Box<dyn ParseStrategy>>) -> Self {
        Self { strategies }
    }

    /// Parses a file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::FileNotFound`](crate::error::EngineError::FileNotFound)
    /// when the file does not exist. Every other problem, including other I/O
    /// failures, is reported through the outcome's diagnostics.
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> EngineResult<ParseOutcome> {
        let path = path.as_ref();
        match SourceFile::read(path)? {
            Ok(source) => Ok(self.parse_source(&source)),
            Err(err) => {
                warn!(file = %path.display(), error = %err, "Attendance log could not be read");
                let diagnostics = self
                    .strategies
                    .iter()
                    .map(|strategy| ParseDiagnostic {
                        strategy: strategy.kind(),
                        outcome: StrategyOutcome::Unreadable,
                        detail: format!("file could not be read: {}", err),
                    })
                    .collect();
                Ok(ParseOutcome {
                    diagnostics,
                    ..ParseOutcome::default()
                })
            }
        }
    }

    /// Parses content already in memory.
    pub fn parse_source(&self, source: &SourceFile) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();

        for strategy in &self.strategies {
            let attempt = strategy.attempt(source);
            let matched = attempt.is_match();
            outcome.diagnostics.push(attempt.diagnostic);

            if matched {
                info!(
                    file = source.name(),
                    strategy = %strategy.kind(),
                    records = attempt.records.len(),
                    "Attendance log parsed"
                );
                outcome.records = attempt.records;
                outcome.strategy = Some(strategy.kind());
                return outcome;
            }
        }

        warn!(
            file = source.name(),
            header_seen = outcome.header_seen(),
            "No attendance data recognized"
        );
        outcome
    }
}

/// Parses a file with the default strategy order.
pub fn parse<P: AsRef<Path>>(path: P) -> EngineResult<ParseOutcome> {
    AttendanceLogParser::default().parse(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    struct FixedStrategy {
        kind: StrategyKind,
        records: Vec<RawPunchRecord>,
    }

    impl ParseStrategy for FixedStrategy {
        fn kind(&self) -> StrategyKind {
            self.kind
        }

        fn attempt(&self, _source: &SourceFile) -> StrategyAttempt {
            if self.records.is_empty() {
                StrategyAttempt::unreadable(self.kind, "nothing")
            } else {
                StrategyAttempt::from_scan(
                    self.kind,
                    ScanReport {
                        records: self.records.clone(),
                        header_hits: self.records.len(),
                        nameless_headers: 0,
                    },
                    1,
                    "grid",
                )
            }
        }
    }

    fn source(text: &str) -> SourceFile {
        SourceFile::from_bytes("memory", text.as_bytes().to_vec())
    }

    #[test]
    fn test_stops_at_first_success() {
        let parser = AttendanceLogParser::with_strategies(vec![
            Box::new(FixedStrategy {
                kind: StrategyKind::Spreadsheet,
                records: vec![],
            }),
            Box::new(FixedStrategy {
                kind: StrategyKind::HtmlTable,
                records: vec![RawPunchRecord::from_punches("Ani", vec![])],
            }),
            Box::new(FixedStrategy {
                kind: StrategyKind::DelimitedText,
                records: vec![RawPunchRecord::from_punches("Budi", vec![])],
            }),
        ]);

        let outcome = parser.parse_source(&source(""));
        assert_eq!(outcome.strategy, Some(StrategyKind::HtmlTable));
        assert_eq!(outcome.records[0].name, "Ani");
        assert_eq!(outcome.diagnostics.len(), 2);
    }

    #[test]
    fn test_default_order_falls_through_to_delimited() {
        let outcome = AttendanceLogParser::default().parse_source(&source("Name,Ani\n08:00,16:00\n"));
        assert_eq!(outcome.strategy, Some(StrategyKind::DelimitedText));
        let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.strategy).collect();
        assert_eq!(
            kinds,
            vec![
                StrategyKind::Spreadsheet,
                StrategyKind::HtmlTable,
                StrategyKind::DelimitedText
            ]
        );
    }

    #[test]
    fn test_unrecognized_content_is_empty_not_error() {
        let outcome = AttendanceLogParser::default().parse_source(&source("hello,world\nfoo,bar\n"));
        assert!(outcome.is_empty());
        assert!(outcome.strategy.is_none());
        assert!(!outcome.header_seen());
        assert!(!outcome.all_unreadable());
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = parse("/no/such/attendance.xls");
        assert!(matches!(result, Err(EngineError::FileNotFound { .. })));
    }

    #[test]
    fn test_unreadable_path_degrades() {
        let outcome = parse(std::env::temp_dir()).expect("directory is not a missing file");
        assert!(outcome.is_empty());
        assert!(outcome.all_unreadable());
        assert_eq!(outcome.diagnostics.len(), 3);
    }
}

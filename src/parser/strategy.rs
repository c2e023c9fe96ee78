//! The strategy abstraction and per-attempt diagnostics.

use serde::{Deserialize, Serialize};

use crate::models::RawPunchRecord;

use super::row_scan::ScanReport;
use super::source::SourceFile;

/// Which format interpretation an attempt used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Binary or XML spreadsheet (xls, xlsx, ods).
    Spreadsheet,
    /// HTML document containing tables, often saved with a spreadsheet extension.
    HtmlTable,
    /// Comma, tab, semicolon or pipe separated text.
    DelimitedText,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Spreadsheet => write!(f, "spreadsheet"),
            StrategyKind::HtmlTable => write!(f, "html_table"),
            StrategyKind::DelimitedText => write!(f, "delimited_text"),
        }
    }
}

/// How an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyOutcome {
    /// At least one employee block was recovered.
    Matched,
    /// The content was readable but no header marker appeared.
    NoHeaderFound,
    /// Header markers appeared but none had a usable name next to them.
    NoNamedHeader,
    /// The content could not be interpreted in this format at all.
    Unreadable,
}

/// One event per strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDiagnostic {
    /// Strategy that produced the event.
    pub strategy: StrategyKind,
    /// How the attempt ended.
    pub outcome: StrategyOutcome,
    /// Human-oriented detail (library error text, counts).
    pub detail: String,
}

/// Records recovered by one attempt and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyAttempt {
    /// Recovered records; empty unless the outcome is [`StrategyOutcome::Matched`].
    pub records: Vec<RawPunchRecord>,
    /// The diagnostic event for this attempt.
    pub diagnostic: ParseDiagnostic,
}

impl StrategyAttempt {
    /// An attempt that could not read the content.
    pub fn unreadable(strategy: StrategyKind, detail: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            diagnostic: ParseDiagnostic {
                strategy,
                outcome: StrategyOutcome::Unreadable,
                detail: detail.into(),
            },
        }
    }

    /// Classifies a scan result; `unit` names what was scanned ("sheet", "table").
    pub fn from_scan(strategy: StrategyKind, scan: ScanReport, scanned: usize, unit: &str) -> Self {
        let outcome = if !scan.records.is_empty() {
            StrategyOutcome::Matched
        } else if scan.header_hits > 0 {
            StrategyOutcome::NoNamedHeader
        } else {
            StrategyOutcome::NoHeaderFound
        };
        let detail = format!(
            "{} {}(s) scanned, {} header marker(s), {} without name, {} record(s)",
            scanned,
            unit,
            scan.header_hits,
            scan.nameless_headers,
            scan.records.len()
        );
        Self {
            records: scan.records,
            diagnostic: ParseDiagnostic {
                strategy,
                outcome,
                detail,
            },
        }
    }

    /// True when the attempt recovered records.
    pub fn is_match(&self) -> bool {
        self.diagnostic.outcome == StrategyOutcome::Matched
    }
}

/// One way of interpreting the bytes of an imported file.
///
/// Implementations lower the content to [`CellGrid`](super::CellGrid)s and
/// hand them to the shared row scanner; they never fail, reporting problems
/// through the attempt's diagnostic instead.
pub trait ParseStrategy: Send + Sync {
    /// Identifies the strategy in diagnostics.
    fn kind(&self) -> StrategyKind;

    /// Interprets the source and scans it for employee blocks.
    fn attempt(&self, source: &SourceFile) -> StrategyAttempt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scan_classification() {
        let matched = ScanReport {
            records: vec![RawPunchRecord::from_punches("Ani", vec![])],
            header_hits: 1,
            nameless_headers: 0,
        };
        let attempt = StrategyAttempt::from_scan(StrategyKind::Spreadsheet, matched, 1, "sheet");
        assert!(attempt.is_match());

        let nameless = ScanReport {
            records: vec![],
            header_hits: 2,
            nameless_headers: 2,
        };
        let attempt = StrategyAttempt::from_scan(StrategyKind::HtmlTable, nameless, 1, "table");
        assert_eq!(attempt.diagnostic.outcome, StrategyOutcome::NoNamedHeader);

        let attempt = StrategyAttempt::from_scan(
            StrategyKind::DelimitedText,
            ScanReport::default(),
            0,
            "grid",
        );
        assert_eq!(attempt.diagnostic.outcome, StrategyOutcome::NoHeaderFound);
    }

    #[test]
    fn test_diagnostic_serialization() {
        let attempt = StrategyAttempt::unreadable(StrategyKind::Spreadsheet, "bad magic");
        let json = serde_json::to_value(&attempt.diagnostic).unwrap();
        assert_eq!(json["strategy"], "spreadsheet");
        assert_eq!(json["outcome"], "unreadable");
        assert_eq!(json["detail"], "bad magic");
    }
}

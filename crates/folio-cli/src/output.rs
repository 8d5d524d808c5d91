// crates/folio-cli/src/output.rs
//
// Output formatting utilities for the Folio CLI.
// Supports table and JSON output modes.

use chrono::DateTime;
use serde::Serialize;
use tabled::{Table, Tabled};

use folio_economics::Tokens;
use folio_ledger::OpOutcome;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Motes rendered as a FOLIO amount.
pub fn format_motes(motes: u64) -> String {
    Tokens::from_motes(motes).to_string()
}

/// Ledger time (unix seconds) as a UTC timestamp.
pub fn format_time(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// One-line summary of an applied operation's result.
pub fn describe_outcome(outcome: &OpOutcome) -> String {
    match outcome {
        OpOutcome::Done => "ok".to_string(),
        OpOutcome::Registered(p) => format!("registered {}", p.short()),
        OpOutcome::Rewarded(amount) => format!("rewarded {}", format_motes(*amount)),
        OpOutcome::CitationRecorded(id) => format!("edge {}", id),
        OpOutcome::Scored(n) => format!("scored {} authors", n),
        OpOutcome::PeriodCreated(id) => format!("period {}", id),
        OpOutcome::Withdrawn(amount) => format!("withdrew {}", format_motes(*amount)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "1970-01-01 00:00:00");
        assert_eq!(format_time(86_400), "1970-01-02 00:00:00");
        assert_eq!(format_time(u64::MAX), u64::MAX.to_string());
    }

    #[test]
    fn test_describe_outcome() {
        assert_eq!(describe_outcome(&OpOutcome::Done), "ok");
        assert_eq!(describe_outcome(&OpOutcome::Rewarded(1_500_000_000)), "rewarded 1.5 FOLIO");
        assert_eq!(describe_outcome(&OpOutcome::PeriodCreated(3)), "period 3");
    }
}

// crates/folio-cli/src/commands/replay.rs
//
// `folio replay <ops.jsonl>`: apply an operation log to a ledger.
//
// Each non-empty line is one `OpRecord`. Lines starting with `#` are
// comments. Rejected operations are reported and skipped; a malformed line
// aborts the replay. With `--persist` the log is applied on top of the
// persisted ledger and the result is written back.

use std::fs;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use folio_ledger::{Ledger, LedgerEvent, LedgerStats, OpRecord};

use crate::commands::open_persisted;
use crate::config::FolioConfig;
use crate::output::{describe_outcome, format_json, format_table, OutputFormat};

#[derive(Debug, Args)]
pub struct ReplayCmd {
    /// Path to a JSON-lines operation log.
    pub file: String,

    /// Apply on top of the persisted ledger and save the result.
    #[arg(long)]
    pub persist: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ReplayRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "At")]
    at: u64,
    #[tabled(rename = "Operation")]
    op: String,
    #[tabled(rename = "Result")]
    result: String,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    applied: usize,
    rejected: usize,
    results: Vec<ReplayRow>,
    events: Vec<LedgerEvent>,
    stats: LedgerStats,
    digest: String,
}

/// Parse an operation log. Returns (line number, record) pairs.
fn parse_log(contents: &str) -> Result<Vec<(usize, OpRecord)>, Box<dyn std::error::Error>> {
    let mut records = Vec::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record: OpRecord =
            serde_json::from_str(line).map_err(|e| format!("line {}: {}", idx + 1, e))?;
        records.push((idx + 1, record));
    }
    Ok(records)
}

/// Apply every record, collecting one row per record.
fn apply_all(ledger: &mut Ledger, records: &[(usize, OpRecord)]) -> (Vec<ReplayRow>, usize) {
    let mut rows = Vec::with_capacity(records.len());
    let mut rejected = 0;
    for (line, record) in records {
        let result = match ledger.apply_record(record) {
            Ok(outcome) => describe_outcome(&outcome),
            Err(e) => {
                rejected += 1;
                tracing::warn!("Line {}: {} rejected: {}", line, record.op.name(), e);
                format!("rejected: {}", e)
            }
        };
        rows.push(ReplayRow {
            line: *line,
            at: ledger.now(),
            op: record.op.name().to_string(),
            result,
        });
    }
    (rows, rejected)
}

pub fn run(cmd: &ReplayCmd, config: &FolioConfig, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(&cmd.file)?;
    let records = parse_log(&contents)?;
    tracing::info!("Replaying {} operations from {}", records.len(), cmd.file);

    let (store, mut ledger) = if cmd.persist {
        let (store, ledger) = open_persisted(config)?;
        (Some(store), ledger)
    } else {
        (None, Ledger::new(&config.ledger))
    };

    let (results, rejected) = apply_all(&mut ledger, &records);
    let events = ledger.drain_events();

    if let Some(store) = &store {
        ledger.persist(store)?;
    }

    let report = ReplayReport {
        applied: results.len() - rejected,
        rejected,
        results,
        events,
        stats: ledger.stats(),
        digest: ledger.state_digest()?,
    };

    match format {
        OutputFormat::Json => println!("{}", format_json(&report)),
        OutputFormat::Table => {
            println!("{}", format_table(&report.results));
            println!();
            println!(
                "Applied: {}  |  Rejected: {}  |  Events: {}",
                report.applied,
                report.rejected,
                report.events.len()
            );
            println!(
                "Authors: {}  |  Citations: {}  |  Periods: {}",
                report.stats.authors, report.stats.citation_edges, report.stats.periods
            );
            println!("State digest: {}", report.digest);
            if cmd.persist {
                println!("Persisted to {}", config.ledger_db_path());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::principal::Principal;
    use folio_ledger::LedgerConfig;

    fn line(op: &str) -> String {
        format!(r#"{{"op": {}}}"#, op)
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let caller = Principal([1; 32]).to_hex();
        let contents = format!(
            "# session\n\n{}\n{}\n",
            line(&format!(r#"{{"type": "register_author", "caller": "{}"}}"#, caller)),
            line(r#"{"type": "distribute_profits"}"#)
        );
        let records = parse_log(&contents).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 3);
        assert_eq!(records[1].0, 4);
    }

    #[test]
    fn test_parse_reports_bad_line_number() {
        let err = parse_log("\n{not json}\n").unwrap_err();
        assert!(err.to_string().starts_with("line 2:"));
    }

    #[test]
    fn test_rejections_are_counted() {
        let caller = Principal([1; 32]).to_hex();
        let register = line(&format!(r#"{{"type": "register_author", "caller": "{}"}}"#, caller));
        let records = parse_log(&format!("{}\n{}\n", register, register)).unwrap();
        let mut ledger = Ledger::new(&LedgerConfig::default());
        let (rows, rejected) = apply_all(&mut ledger, &records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rejected, 1);
        assert!(rows[1].result.starts_with("rejected: Already registered"));
    }
}

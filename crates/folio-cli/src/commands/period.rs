// crates/folio-cli/src/commands/period.rs
//
// `folio period <id>`: shares of a persisted distribution period.

use clap::Args;
use tabled::Tabled;

use crate::commands::open_persisted;
use crate::config::FolioConfig;
use crate::output::{format_json, format_motes, format_table, format_time, OutputFormat};

#[derive(Debug, Args)]
pub struct PeriodCmd {
    /// Distribution period id (starts at 1).
    pub id: u64,
}

/// A row in the shares table.
#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Share %")]
    percentage: u8,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Withdrawn")]
    withdrawn: String,
}

pub fn run(cmd: &PeriodCmd, config: &FolioConfig, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let (_store, ledger) = open_persisted(config)?;
    let period = ledger.get_period(cmd.id).ok_or_else(|| {
        format!(
            "Period {} not found (next period id is {})",
            cmd.id,
            ledger.current_distribution_id()
        )
    })?;

    if format == OutputFormat::Json {
        println!("{}", format_json(period));
        return Ok(());
    }

    let rows: Vec<ShareRow> = period
        .shares
        .iter()
        .map(|(author, share)| ShareRow {
            author: author.short(),
            score: period
                .score_snapshot
                .get(author)
                .map(|s| s.to_string())
                .unwrap_or_else(|| "--".to_string()),
            percentage: share.percentage,
            amount: format_motes(share.amount),
            withdrawn: if share.withdrawn { "yes" } else { "no" }.to_string(),
        })
        .collect();

    println!(
        "Period {}  |  Snapshot: {}  |  Pool: {}  |  Allocated: {}",
        period.id,
        format_time(period.snapshot_time),
        format_motes(period.pool_amount),
        format_motes(period.total_allocated())
    );
    println!();
    println!("{}", format_table(&rows));
    Ok(())
}

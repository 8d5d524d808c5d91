// crates/folio-cli/src/commands/stats.rs
//
// `folio stats`: aggregate counters of the persisted ledger.

use tabled::Tabled;

use crate::commands::open_persisted;
use crate::config::FolioConfig;
use crate::output::{format_json, format_motes, format_table, format_time, OutputFormat};

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn run(config: &FolioConfig, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let (_store, ledger) = open_persisted(config)?;
    let stats = ledger.stats();

    if format == OutputFormat::Json {
        println!("{}", format_json(&stats));
        return Ok(());
    }

    let row = |metric: &'static str, value: String| StatRow { metric, value };
    let rows = vec![
        row("Ledger time", format_time(stats.now)),
        row("Authors", stats.authors.to_string()),
        row(
            "Citation edges",
            format!("{} ({} verified)", stats.citation_edges, stats.verified_edges),
        ),
        row("Citation links", stats.links.to_string()),
        row(
            "Identities",
            format!("{} ({} verified)", stats.identities, stats.verified_identities),
        ),
        row("Distribution periods", stats.periods.to_string()),
        row("Next period id", stats.next_period_id.to_string()),
        row("Distribution interval", format!("{}s", stats.distribution_period)),
        row("Circulating supply", format_motes(stats.circulating_supply)),
        row("Revenue pool (available)", format_motes(stats.pool_available)),
        row("Revenue pool (reserved)", format_motes(stats.pool_reserved)),
        row("Token transactions", stats.transactions.to_string()),
    ];

    println!("{}", format_table(&rows));
    println!("State digest: {}", ledger.state_digest()?);
    Ok(())
}

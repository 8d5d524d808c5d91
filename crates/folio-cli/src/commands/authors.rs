// crates/folio-cli/src/commands/authors.rs
//
// `folio authors`: list registered authors of the persisted ledger.

use serde::Serialize;
use tabled::Tabled;

use crate::commands::open_persisted;
use crate::config::FolioConfig;
use crate::output::{format_json, format_motes, format_table, format_time, OutputFormat};

/// A row in the authors table.
#[derive(Serialize, Tabled)]
struct AuthorRow {
    #[tabled(rename = "#")]
    seq: u64,
    #[tabled(rename = "Author")]
    principal: String,
    #[tabled(rename = "Citations")]
    citations: u64,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Registered")]
    registered_at: String,
}

pub fn run(config: &FolioConfig, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let (_store, ledger) = open_persisted(config)?;
    let authors = ledger.authors();

    if format == OutputFormat::Json {
        println!("{}", format_json(&authors));
        return Ok(());
    }

    let rows: Vec<AuthorRow> = authors
        .iter()
        .map(|a| AuthorRow {
            seq: a.registration_seq,
            principal: a.principal.to_hex(),
            citations: a.citation_count,
            score: a.reputation_score.to_string(),
            balance: format_motes(a.balance),
            registered_at: format_time(a.registered_at),
        })
        .collect();

    println!("Registered authors: {}", rows.len());
    println!();
    println!("{}", format_table(&rows));
    Ok(())
}

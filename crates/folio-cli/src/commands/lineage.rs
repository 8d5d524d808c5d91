// crates/folio-cli/src/commands/lineage.rs
//
// `folio lineage <principal>`: direct citers and transitive lineage of an
// author in the persisted citation graph.

use clap::Args;
use serde::Serialize;

use folio_core::principal::Principal;

use crate::commands::open_persisted;
use crate::config::FolioConfig;
use crate::output::{format_json, OutputFormat};

#[derive(Debug, Args)]
pub struct LineageCmd {
    /// Author principal (hex, optional 0x prefix).
    pub principal: String,
}

#[derive(Serialize)]
struct LineageReport {
    author: Principal,
    cited_by: Vec<Principal>,
    cites: Vec<Principal>,
    lineage: Vec<Principal>,
}

pub fn run(cmd: &LineageCmd, config: &FolioConfig, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let author: Principal = cmd.principal.parse()?;
    let (_store, ledger) = open_persisted(config)?;

    let report = LineageReport {
        author,
        cited_by: ledger.get_direct_citers(&author),
        cites: ledger.get_cited_authors(&author),
        lineage: ledger.get_author_lineage(&author),
    };

    match format {
        OutputFormat::Json => println!("{}", format_json(&report)),
        OutputFormat::Table => {
            println!("Author: {}", author);
            print_list("Cited by", &report.cited_by);
            print_list("Cites", &report.cites);
            print_list("Lineage", &report.lineage);
        }
    }
    Ok(())
}

fn print_list(label: &str, principals: &[Principal]) {
    println!("{} ({}):", label, principals.len());
    for p in principals {
        println!("  {}", p);
    }
}

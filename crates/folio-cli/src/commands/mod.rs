// crates/folio-cli/src/commands/mod.rs
//
// Command module declarations for the Folio CLI.

pub mod authors;
pub mod lineage;
pub mod period;
pub mod replay;
pub mod stats;

use folio_ledger::Ledger;
use folio_store::RocksLedgerStore;

use crate::config::FolioConfig;

/// Open the persisted ledger under the configured data directory.
pub(crate) fn open_persisted(config: &FolioConfig) -> Result<(RocksLedgerStore, Ledger), Box<dyn std::error::Error>> {
    let path = config.ledger_db_path();
    if let Some(parent) = std::path::Path::new(&path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = RocksLedgerStore::open(&path)?;
    tracing::debug!("Opened ledger store at {}", path);
    let ledger = Ledger::restore(&store, &config.ledger)?;
    Ok((store, ledger))
}

// crates/folio-store/src/lib.rs
//
// folio-store: Storage layer for the Folio citation ledger.
//
// Provides a RocksDB-backed `LedgerStore` for durable state and an in-memory
// `LedgerStore` for tests and ephemeral replays. Both expose the same four
// keyed tables (authors, citations, distribution periods with share
// sub-tables, identities) plus opaque metadata entries.

pub mod memory;
pub mod rocks;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::MemoryLedgerStore;
pub use rocks::RocksLedgerStore;

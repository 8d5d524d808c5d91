// crates/folio-ledger/src/lib.rs
//
// folio-ledger: The Folio citation ledger state machine.
//
// A single `Ledger` value owns the whole ledger state and applies one
// operation at a time. Each component is a module of free functions over
// `LedgerState`:
//
//   - registry:     author registration, citation rewards, burns, PageRank
//   - graph:        citation edges, lineage, integrity root verification
//   - distribution: revenue pool, periodic profit distribution, withdrawals
//   - identity:     public-key bindings and signature checks
//   - access:       role table behind every privileged operation
//
// Every operation validates fully before it mutates, so a failed operation
// leaves the state untouched. The one exception is the clock: a replayed
// record's timestamp is applied before its operation runs.

pub mod access;
pub mod config;
pub mod distribution;
pub mod events;
pub mod graph;
pub mod identity;
pub mod journal;
pub mod ledger;
pub mod ops;
pub mod persist;
pub mod registry;
pub mod state;

pub use access::{Role, RoleTable};
pub use config::LedgerConfig;
pub use events::LedgerEvent;
pub use journal::{TokenTransaction, TxKind};
pub use ledger::{Ledger, LedgerStats};
pub use ops::{LedgerOp, OpOutcome, OpRecord};
pub use state::LedgerState;

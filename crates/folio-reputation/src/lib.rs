// crates/folio-reputation/src/lib.rs
//
// folio-reputation: Citation link set and fixed-point PageRank for the Folio
// citation ledger.
//
// The engine is stateless. Callers hand it the author count and the set of
// "u cited v" links (by author index) and get back one score per author.
// All arithmetic is scaled-integer so independent replays agree bit for bit.

pub mod link_set;
pub mod pagerank;

pub use link_set::LinkSet;
pub use pagerank::{compute_pagerank, PageRankConfig};

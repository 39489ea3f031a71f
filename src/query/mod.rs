//! Per-query pipeline: entity resolution → ranked retrieval → subgraph
//! assembly.
//!
//! Everything here is synchronous and mutation-free with respect to the
//! index: all working state (candidate sets, counters) is local to one
//! invocation, so a single loaded index can serve concurrent callers without
//! locking.

pub mod resolve;
pub mod retrieve;
pub mod subgraph;
pub mod validity;

pub use resolve::resolve_entities;
pub use retrieve::{MAX_RESULTS, RetrievalResult, search_by_entities};
pub use subgraph::{Edge, Subgraph, build_subgraph};
pub use validity::is_valid_entity;

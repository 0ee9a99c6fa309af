//! Link-graph relevance ranking

pub mod candidates;
pub mod pagerank;

pub use candidates::rank_candidates;

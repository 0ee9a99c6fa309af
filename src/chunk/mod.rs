//! Token-aware chunking

pub mod splitter;

pub use splitter::{ChunkOutcome, Chunker, IndexDocument};

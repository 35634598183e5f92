//! Inverted-index data model and in-memory builder
//!
//! - `types`: `DocId` and `Posting`
//! - `memory`: the mutable in-memory index filled during ingestion
//! - `indexer`: tokenize-and-insert orchestration
//! - `source`: the backend sum the query engine reads through

mod indexer;
mod memory;
mod source;
mod types;

pub use indexer::{Indexer, IndexingMode};
pub use memory::InMemoryIndex;
pub use source::IndexSource;
pub use types::{DocId, Posting};

//! Uniform read interface over the in-memory and mapped index backends

use crate::disk::reader::MappedIndex;

use super::memory::InMemoryIndex;
use super::types::{DocId, Posting};

/// Closed sum over the two index backends.
///
/// The query engine only sees this type; the mapped variant is immutable
/// after open, so a shared reference can be used from multiple threads.
pub enum IndexSource {
    InMemory(InMemoryIndex),
    Mapped(MappedIndex),
}

impl IndexSource {
    /// Posting list for a term, as an owned vector; empty when absent
    pub fn postings(&self, term: &str) -> Vec<Posting> {
        match self {
            IndexSource::InMemory(index) => index.postings(term),
            IndexSource::Mapped(index) => index.postings(term),
        }
    }

    /// Url for a document id, `None` when out of range
    pub fn url(&self, doc_id: DocId) -> Option<&str> {
        match self {
            IndexSource::InMemory(index) => index.url(doc_id),
            IndexSource::Mapped(index) => index.url(doc_id),
        }
    }

    /// Total number of documents behind this source
    pub fn num_docs(&self) -> u32 {
        match self {
            IndexSource::InMemory(index) => index.num_docs(),
            IndexSource::Mapped(index) => index.num_docs(),
        }
    }
}

impl From<InMemoryIndex> for IndexSource {
    fn from(index: InMemoryIndex) -> Self {
        IndexSource::InMemory(index)
    }
}

impl From<MappedIndex> for IndexSource {
    fn from(index: MappedIndex) -> Self {
        IndexSource::Mapped(index)
    }
}

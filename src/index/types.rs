//! Core types for the inverted index

use std::fmt;

/// Dense document identifier, assigned in ingestion order from zero
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId(pub u32);

impl DocId {
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc_{}", self.0)
    }
}

/// A single posting entry within a posting list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Posting {
    /// Document the term occurs in
    pub doc_id: DocId,
    /// Term frequency in this document
    pub tf: u32,
}

impl Posting {
    pub fn new(doc_id: DocId, tf: u32) -> Self {
        Self { doc_id, tf }
    }
}

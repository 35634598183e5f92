//! In-memory inverted index built during ingestion
//!
//! Holds the url table and the `term -> postings` map while a corpus is being
//! indexed. Posting lists stay sorted by construction: all postings for
//! document N are appended before any posting for document N+1, and the
//! last-entry guard in [`InMemoryIndex::add_posting`] drops repeats.

use std::collections::HashMap;

use super::types::{DocId, Posting};

/// Mutable in-memory index: url table plus term postings
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    /// Url of document `i` at slot `i`; urls may repeat
    urls: Vec<String>,
    /// Term to postings mapping
    terms: HashMap<String, Vec<Posting>>,
}

impl InMemoryIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            urls: Vec::new(),
            terms: HashMap::new(),
        }
    }

    /// Append a url to the url table and return its document id
    pub fn add_url(&mut self, url: &str) -> DocId {
        self.urls.push(url.to_string());
        DocId::new((self.urls.len() - 1) as u32)
    }

    /// Append `(doc_id, tf)` to a term's posting list.
    ///
    /// No-op when the list already ends with `doc_id`; together with the
    /// append-in-document-order ingestion discipline this keeps every list
    /// strictly ascending.
    pub fn add_posting(&mut self, term: &str, doc_id: DocId, tf: u32) {
        let postings = self.terms.entry(term.to_string()).or_default();
        if postings.last().map(|p| p.doc_id) != Some(doc_id) {
            postings.push(Posting::new(doc_id, tf));
        }
    }

    /// Current posting list for a term, empty if absent
    pub fn postings(&self, term: &str) -> Vec<Posting> {
        self.terms.get(term).cloned().unwrap_or_default()
    }

    /// Url for a document id, `None` when out of range
    pub fn url(&self, doc_id: DocId) -> Option<&str> {
        self.urls.get(doc_id.as_usize()).map(String::as_str)
    }

    /// All urls in document-id order
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn num_docs(&self) -> u32 {
        self.urls.len() as u32
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.terms.is_empty()
    }

    /// Iterate over all `(term, postings)` pairs; order is unspecified
    pub fn iter_terms(&self) -> impl Iterator<Item = (&str, &[Posting])> {
        self.terms.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }
}

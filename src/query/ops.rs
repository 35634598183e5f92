//! Set algebra over sorted posting lists
//!
//! All three operations are linear merges over lists sorted by `doc_id` and
//! produce sorted, duplicate-free output. Where both sides carry a document,
//! the left-hand entry (and its term frequency) wins.

use crate::index::{DocId, Posting};

/// Documents present in both lists; term frequencies come from `a`
pub fn intersect(a: &[Posting], b: &[Posting]) -> Vec<Posting> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i].doc_id < b[j].doc_id {
            i += 1;
        } else if b[j].doc_id < a[i].doc_id {
            j += 1;
        } else {
            out.push(a[i]);
            i += 1;
            j += 1;
        }
    }
    out
}

/// Documents present in either list; on collision `a`'s entry is kept
pub fn union(a: &[Posting], b: &[Posting]) -> Vec<Posting> {
    let mut out = Vec::with_capacity(a.len().max(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        if i == a.len() {
            out.push(b[j]);
            j += 1;
        } else if j == b.len() {
            out.push(a[i]);
            i += 1;
        } else if a[i].doc_id < b[j].doc_id {
            out.push(a[i]);
            i += 1;
        } else if b[j].doc_id < a[i].doc_id {
            out.push(b[j]);
            j += 1;
        } else {
            out.push(a[i]);
            i += 1;
            j += 1;
        }
    }
    out
}

/// All documents in `[0, num_docs)` absent from `a`; term frequency is zero
pub fn complement(a: &[Posting], num_docs: u32) -> Vec<Posting> {
    let mut out = Vec::new();
    let mut iter = a.iter().peekable();

    for doc in 0..num_docs {
        let doc_id = DocId::new(doc);
        if iter.peek().map(|p| p.doc_id) == Some(doc_id) {
            iter.next();
        } else {
            out.push(Posting::new(doc_id, 0));
        }
    }
    out
}

//! Index dump: prune, lay out offsets, write sections
//!
//! Offsets for the string and posting pools are computed in a single pass
//! before anything past the header is written; the file is then emitted
//! front to back with no seeks.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::index::{InMemoryIndex, Posting};

use super::varint::{varint_len, write_varint};
use super::{fnv1a_32, Header, TermEntry, HEADER_SIZE, MAGIC, TERM_ENTRY_SIZE, VERSION_PACKED, VERSION_PLAIN};

/// Fraction of the corpus above which a term is treated as a stopword and
/// dropped from the dump
const STOPWORD_DOC_RATIO: f64 = 0.95;

/// A term survives the dump iff it carries any discriminative signal: more
/// than one document, or a repeated occurrence in its single document, and
/// presence in less than [`STOPWORD_DOC_RATIO`] of the corpus.
fn survives(postings: &[Posting], num_docs: u32) -> bool {
    match postings {
        [] => false,
        [only] if only.tf <= 1 => false,
        _ => (postings.len() as f64) < STOPWORD_DOC_RATIO * f64::from(num_docs),
    }
}

/// Bytes a posting list occupies under the chosen codec
fn encoded_len(postings: &[Posting], packed: bool) -> u64 {
    if !packed {
        return postings.len() as u64 * 8;
    }
    let mut len = 0u64;
    let mut prev = 0u32;
    for p in postings {
        len += varint_len(p.doc_id.as_u32() - prev) as u64;
        len += varint_len(p.tf) as u64;
        prev = p.doc_id.as_u32();
    }
    len
}

fn encode_postings(out: &mut Vec<u8>, postings: &[Posting], packed: bool) {
    if packed {
        let mut prev = 0u32;
        for p in postings {
            write_varint(out, p.doc_id.as_u32() - prev);
            write_varint(out, p.tf);
            prev = p.doc_id.as_u32();
        }
    } else {
        for p in postings {
            out.extend_from_slice(&p.doc_id.as_u32().to_le_bytes());
            out.extend_from_slice(&p.tf.to_le_bytes());
        }
    }
}

/// Write an index to `path`. `packed` selects the version 2 delta+varint
/// posting codec; version 1 stores raw pairs.
pub fn dump<P: AsRef<Path>>(index: &InMemoryIndex, path: P, packed: bool) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut out = BufWriter::new(file);

    let num_docs = index.num_docs();

    let mut terms: Vec<(u32, &str, &[Posting])> = index
        .iter_terms()
        .filter(|(_, postings)| survives(postings, num_docs))
        .map(|(term, postings)| (fnv1a_32(term.as_bytes()), term, postings))
        .collect();
    terms.sort_by_key(|&(hash, _, _)| hash);

    let header = Header {
        magic: MAGIC,
        version: if packed { VERSION_PACKED } else { VERSION_PLAIN },
        num_docs,
        num_terms: terms.len() as u32,
    };
    out.write_all(&header.encode())?;

    for url in index.urls() {
        out.write_all(&(url.len() as u32).to_le_bytes())?;
        out.write_all(url.as_bytes())?;
    }

    let url_table_len: u64 = index.urls().iter().map(|u| 4 + u.len() as u64).sum();
    let dir_start = HEADER_SIZE as u64 + url_table_len;
    let mut term_offset = dir_start + terms.len() as u64 * TERM_ENTRY_SIZE as u64;
    let mut data_offset =
        term_offset + terms.iter().map(|(_, t, _)| t.len() as u64 + 1).sum::<u64>();

    for &(hash, term, postings) in &terms {
        let entry = TermEntry {
            term_hash: u64::from(hash),
            term_offset,
            data_offset,
            doc_count: postings.len() as u32,
        };
        out.write_all(&entry.encode())?;
        term_offset += term.len() as u64 + 1;
        data_offset += encoded_len(postings, packed);
    }

    for &(_, term, _) in &terms {
        out.write_all(term.as_bytes())?;
        out.write_all(&[0])?;
    }

    let mut buf = Vec::new();
    for &(_, _, postings) in &terms {
        buf.clear();
        encode_postings(&mut buf, postings, packed);
        out.write_all(&buf)?;
    }

    out.flush()?;
    info!(
        version = header.version,
        num_docs,
        num_terms = header.num_terms,
        bytes = data_offset,
        "dumped index"
    );
    Ok(())
}

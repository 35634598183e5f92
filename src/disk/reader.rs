//! Memory-mapped index reader
//!
//! The whole file is mapped read-only; the term directory is binary-searched
//! in place and posting lists are decoded on demand. Urls are small and hot,
//! so the url table is copied out at open time. Every value handed to
//! callers is an owned copy; nothing borrows from the mapping.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::info;

use crate::error::{MurexError, Result};
use crate::index::{DocId, Posting};

use super::varint::read_varint;
use super::{fnv1a_32, Header, TermEntry, HEADER_SIZE, MAGIC, TERM_ENTRY_SIZE, VERSION_PACKED, VERSION_PLAIN};

/// Read-only index backed by a memory-mapped dump file.
///
/// The file handle and the mapping live and die together with this struct.
/// Opening the same file twice yields two independent mappings.
#[derive(Debug)]
pub struct MappedIndex {
    _file: File,
    map: Mmap,
    version: u32,
    urls: Vec<String>,
    dir_offset: usize,
    num_terms: usize,
}

impl MappedIndex {
    /// Map an index file and validate its header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let file_len = file.metadata()?.len() as usize;
        if file_len < HEADER_SIZE {
            return Err(MurexError::InvalidFormat("truncated header".to_string()));
        }

        let map = unsafe { Mmap::map(&file)? };
        let header = Header::decode(&map)?;
        if header.magic != MAGIC {
            return Err(MurexError::bad_magic(header.magic));
        }
        if header.version != VERSION_PLAIN && header.version != VERSION_PACKED {
            return Err(MurexError::bad_version(header.version));
        }

        let mut pos = HEADER_SIZE;
        let mut urls = Vec::with_capacity(header.num_docs as usize);
        for _ in 0..header.num_docs {
            if pos + 4 > file_len {
                return Err(MurexError::InvalidFormat("truncated url table".to_string()));
            }
            let len = u32::from_le_bytes(map[pos..pos + 4].try_into().unwrap()) as usize;
            pos += 4;
            if pos + len > file_len {
                return Err(MurexError::InvalidFormat("truncated url table".to_string()));
            }
            urls.push(String::from_utf8_lossy(&map[pos..pos + len]).into_owned());
            pos += len;
        }

        let num_terms = header.num_terms as usize;
        if pos + num_terms * TERM_ENTRY_SIZE > file_len {
            return Err(MurexError::InvalidFormat(
                "truncated term directory".to_string(),
            ));
        }

        info!(
            version = header.version,
            num_docs = header.num_docs,
            num_terms = header.num_terms,
            "opened mapped index"
        );

        Ok(Self {
            _file: file,
            map,
            version: header.version,
            urls,
            dir_offset: pos,
            num_terms,
        })
    }

    /// Posting list for a term, decoded into an owned vector; empty when the
    /// term is absent
    pub fn postings(&self, term: &str) -> Vec<Posting> {
        match self.find_entry(term) {
            Some(entry) => self.decode_postings(&entry),
            None => Vec::new(),
        }
    }

    /// Url for a document id, `None` when out of range
    pub fn url(&self, doc_id: DocId) -> Option<&str> {
        self.urls.get(doc_id.as_usize()).map(String::as_str)
    }

    pub fn num_docs(&self) -> u32 {
        self.urls.len() as u32
    }

    pub fn num_terms(&self) -> usize {
        self.num_terms
    }

    /// File format version recorded at open time (1 or 2)
    pub fn version(&self) -> u32 {
        self.version
    }

    fn entry(&self, i: usize) -> TermEntry {
        let start = self.dir_offset + i * TERM_ENTRY_SIZE;
        TermEntry::decode(&self.map[start..start + TERM_ENTRY_SIZE])
    }

    /// Binary-search the hash-sorted directory, then resolve collisions by
    /// comparing the stored NUL-terminated term strings.
    fn find_entry(&self, term: &str) -> Option<TermEntry> {
        let hash = u64::from(fnv1a_32(term.as_bytes()));

        let mut lo = 0;
        let mut hi = self.num_terms;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.entry(mid).term_hash < hash {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        while lo < self.num_terms {
            let entry = self.entry(lo);
            if entry.term_hash != hash {
                break;
            }
            if self.term_bytes(entry.term_offset) == Some(term.as_bytes()) {
                return Some(entry);
            }
            lo += 1;
        }
        None
    }

    /// NUL-terminated term string starting at an absolute offset
    fn term_bytes(&self, offset: u64) -> Option<&[u8]> {
        let start = offset as usize;
        let tail = self.map.get(start..)?;
        let end = tail.iter().position(|&b| b == 0)?;
        Some(&tail[..end])
    }

    fn decode_postings(&self, entry: &TermEntry) -> Vec<Posting> {
        let count = entry.doc_count as usize;
        let mut postings = Vec::with_capacity(count);
        let start = entry.data_offset as usize;

        match self.version {
            VERSION_PLAIN => {
                let Some(data) = self.map.get(start..start + count * 8) else {
                    return postings;
                };
                for chunk in data.chunks_exact(8) {
                    let doc_id = u32::from_le_bytes(chunk[0..4].try_into().unwrap());
                    let tf = u32::from_le_bytes(chunk[4..8].try_into().unwrap());
                    postings.push(Posting::new(DocId::new(doc_id), tf));
                }
            }
            _ => {
                let data = &self.map[..];
                let mut pos = start;
                let mut doc_id = 0u32;
                for _ in 0..count {
                    let Some(delta) = read_varint(data, &mut pos) else {
                        break;
                    };
                    let Some(tf) = read_varint(data, &mut pos) else {
                        break;
                    };
                    doc_id += delta;
                    postings.push(Posting::new(DocId::new(doc_id), tf));
                }
            }
        }
        postings
    }
}

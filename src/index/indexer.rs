//! Ingestion driver: tokenize documents and feed the in-memory index

use tracing::debug;

use crate::config::RankingMode;
use crate::tokenizer::Tokenizer;

use super::memory::InMemoryIndex;

/// How per-document term frequencies are recorded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexingMode {
    /// Every term gets tf = 1 per document; presence only
    Boolean,
    /// Real occurrence counts, one posting per distinct term per document
    TfIdf,
}

impl From<RankingMode> for IndexingMode {
    fn from(mode: RankingMode) -> Self {
        match mode {
            RankingMode::Boolean => IndexingMode::Boolean,
            RankingMode::TfIdf => IndexingMode::TfIdf,
        }
    }
}

/// Builds an [`InMemoryIndex`] from a stream of `(url, text)` pairs
pub struct Indexer {
    index: InMemoryIndex,
    tokenizer: Tokenizer,
    mode: IndexingMode,
}

impl Indexer {
    pub fn new(tokenizer: Tokenizer, mode: IndexingMode) -> Self {
        Self {
            index: InMemoryIndex::new(),
            tokenizer,
            mode,
        }
    }

    /// Ingest one document. The url is recorded first so the document's
    /// postings all carry `doc_id == num_docs - 1`.
    pub fn add_document(&mut self, url: &str, text: &str) {
        let doc_id = self.index.add_url(url);

        match self.mode {
            IndexingMode::Boolean => {
                for token in self.tokenizer.tokenize(text) {
                    self.index.add_posting(&token, doc_id, 1);
                }
            }
            IndexingMode::TfIdf => {
                for (term, count) in self.tokenizer.term_frequencies(text) {
                    self.index.add_posting(&term, doc_id, count);
                }
            }
        }

        debug!(doc_id = doc_id.as_u32(), url, "indexed document");
    }

    pub fn index(&self) -> &InMemoryIndex {
        &self.index
    }

    pub fn into_index(self) -> InMemoryIndex {
        self.index
    }

    pub fn num_docs(&self) -> u32 {
        self.index.num_docs()
    }
}

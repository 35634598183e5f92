//! murex: an in-process text search engine.
//!
//! Builds an inverted index from `(url, text)` pairs, persists it to a
//! compact binary file designed for memory-mapped reads, and answers
//! boolean and TF-IDF-ranked queries against either backend.
//!
//! ```
//! use murex::{IndexSource, Indexer, IndexingMode, RankingMode, Searcher, Stemmer, Tokenizer};
//!
//! let tokenizer = Tokenizer::new(Stemmer::Porter);
//! let mut indexer = Indexer::new(tokenizer, IndexingMode::TfIdf);
//! indexer.add_document("http://a", "the quick brown foxes");
//! indexer.add_document("http://b", "lazy dogs sleeping");
//!
//! let searcher = Searcher::new(
//!     IndexSource::from(indexer.into_index()),
//!     tokenizer,
//!     RankingMode::TfIdf,
//! );
//! let hits = searcher.find("fox");
//! assert_eq!(hits[0].url, "http://a");
//! ```

pub mod config;
pub mod disk;
pub mod error;
pub mod index;
pub mod query;
pub mod tokenizer;

pub use config::{IndexSettings, RankingMode, StemmerKind};
pub use disk::reader::MappedIndex;
pub use disk::writer::dump;
pub use error::{MurexError, Result};
pub use index::{DocId, InMemoryIndex, IndexSource, Indexer, IndexingMode, Posting};
pub use query::{SearchResult, Searcher};
pub use tokenizer::{Stemmer, Tokenizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

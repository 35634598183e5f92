use serde::{Deserialize, Serialize};

/// Which stemmer the tokenizer runs over flushed tokens
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmerKind {
    /// Pass tokens through unchanged
    Identity,
    /// Classical Porter (1980) suffix stripping
    #[default]
    Porter,
}

/// How search results are scored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    /// Set membership only; every hit scores 0
    Boolean,
    /// Sublinear TF-IDF scoring over the boolean candidate set
    #[default]
    TfIdf,
}

/// Index build and query configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexSettings {
    pub stemmer: StemmerKind,
    pub ranking: RankingMode,
    /// Write posting lists delta+varint compressed (format version 2)
    pub compress: bool,
    /// Cap on the number of documents ingested, `None` for unlimited
    pub doc_limit: Option<usize>,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            stemmer: StemmerKind::Porter,
            ranking: RankingMode::TfIdf,
            compress: false,
            doc_limit: None,
        }
    }
}

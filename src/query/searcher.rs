//! Query evaluation and ranking
//!
//! Postfix streams are evaluated over a stack of posting lists. Operators
//! with missing operands are skipped rather than reported: an interactive
//! prompt should degrade to an empty result on stray punctuation, not fail.

use std::cmp::Ordering;

use tracing::debug;

use crate::config::RankingMode;
use crate::index::{IndexSource, Posting};
use crate::tokenizer::Tokenizer;

use super::ops::{complement, intersect, union};
use super::parser::{parse_query, to_postfix, QueryToken};

/// One ranked hit. Boolean queries always score 0.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub url: String,
    pub score: f64,
}

/// Query engine over an [`IndexSource`]
pub struct Searcher {
    source: IndexSource,
    tokenizer: Tokenizer,
    mode: RankingMode,
}

impl Searcher {
    pub fn new(source: IndexSource, tokenizer: Tokenizer, mode: RankingMode) -> Self {
        Self {
            source,
            tokenizer,
            mode,
        }
    }

    pub fn source(&self) -> &IndexSource {
        &self.source
    }

    /// Parse, evaluate and rank a query. Malformed queries yield an empty
    /// result, never an error.
    pub fn find(&self, query: &str) -> Vec<SearchResult> {
        let tokens = parse_query(query, &self.tokenizer);
        if tokens.is_empty() {
            return Vec::new();
        }

        let terms: Vec<String> = tokens
            .iter()
            .filter_map(|t| match t {
                QueryToken::Term(term) => Some(term.clone()),
                _ => None,
            })
            .collect();

        let postfix = to_postfix(tokens);
        let docs = self.evaluate(postfix);
        debug!(query, candidates = docs.len(), "evaluated query");
        if docs.is_empty() {
            return Vec::new();
        }

        match self.mode {
            RankingMode::Boolean => self.resolve_boolean(&docs),
            RankingMode::TfIdf => self.resolve_ranked(&docs, &terms),
        }
    }

    /// Postfix evaluation; underflowing operators are silently dropped.
    fn evaluate(&self, postfix: Vec<QueryToken>) -> Vec<Posting> {
        let num_docs = self.source.num_docs();
        let mut stack: Vec<Vec<Posting>> = Vec::new();

        for token in postfix {
            match token {
                QueryToken::Term(term) => stack.push(self.source.postings(&term)),
                QueryToken::Not => {
                    if let Some(operand) = stack.pop() {
                        stack.push(complement(&operand, num_docs));
                    }
                }
                QueryToken::And | QueryToken::Or => {
                    if stack.len() < 2 {
                        continue;
                    }
                    let right = stack.pop().unwrap();
                    let left = stack.pop().unwrap();
                    stack.push(match token {
                        QueryToken::And => intersect(&left, &right),
                        _ => union(&left, &right),
                    });
                }
                // parentheses never reach postfix
                QueryToken::LeftParen | QueryToken::RightParen => {}
            }
        }
        stack.pop().unwrap_or_default()
    }

    /// Urls in evaluator order (ascending doc id), score 0
    fn resolve_boolean(&self, docs: &[Posting]) -> Vec<SearchResult> {
        docs.iter()
            .filter_map(|p| self.source.url(p.doc_id))
            .map(|url| SearchResult {
                url: url.to_string(),
                score: 0.0,
            })
            .collect()
    }

    /// Sublinear TF-IDF over the candidate set.
    ///
    /// The boolean evaluation gates which documents appear; scoring walks
    /// the raw postings of every query term, so a term inside a `!` clause
    /// still adds positive evidence to surviving documents.
    fn resolve_ranked(&self, docs: &[Posting], terms: &[String]) -> Vec<SearchResult> {
        let num_docs = self.source.num_docs() as usize;
        let mut relevant = vec![false; num_docs];
        for p in docs {
            if p.doc_id.as_usize() < num_docs {
                relevant[p.doc_id.as_usize()] = true;
            }
        }

        let mut scores = vec![0.0f64; num_docs];
        for term in terms {
            let postings = self.source.postings(term);
            if postings.is_empty() {
                continue;
            }

            let idf = (num_docs as f64 / (1.0 + postings.len() as f64)).ln();
            for p in &postings {
                let slot = p.doc_id.as_usize();
                if slot < num_docs && relevant[slot] {
                    scores[slot] += (1.0 + f64::from(p.tf).ln()) * idf;
                }
            }
        }

        let mut ranked: Vec<(Posting, f64)> = docs
            .iter()
            .filter(|p| p.doc_id.as_usize() < num_docs)
            .map(|&p| (p, scores[p.doc_id.as_usize()]))
            .collect();
        // stable sort keeps ascending doc order among ties
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        ranked
            .into_iter()
            .filter_map(|(p, score)| {
                self.source.url(p.doc_id).map(|url| SearchResult {
                    url: url.to_string(),
                    score,
                })
            })
            .collect()
    }
}

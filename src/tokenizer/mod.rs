//! Text tokenizer with pluggable stemming
//!
//! The lexer walks raw bytes and grows a current-token buffer. ASCII
//! alphanumerics are always kept (lowercased); `.`/`,`, `'` and `-` are kept
//! only under the contextual rules below; everything else, including any
//! non-ASCII byte, is a delimiter that flushes the buffer through the
//! stemmer.

mod stemmer;

pub use stemmer::{porter_stem, Stemmer};

use std::collections::HashMap;

/// Tokenizer over a fixed stemmer choice
#[derive(Clone, Copy, Debug)]
pub struct Tokenizer {
    stemmer: Stemmer,
}

impl Tokenizer {
    pub fn new(stemmer: Stemmer) -> Self {
        Self { stemmer }
    }

    pub fn stemmer(&self) -> Stemmer {
        self.stemmer
    }

    /// Tokenize text into a vector of normalized, stemmed terms
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let bytes = text.as_bytes();
        let mut tokens = Vec::new();
        let mut current = String::new();
        // at most one decimal separator is absorbed per token
        let mut has_separator = false;

        for (i, &raw) in bytes.iter().enumerate() {
            let next = bytes.get(i + 1).copied();
            let keep = if raw.is_ascii_alphanumeric() {
                true
            } else {
                match raw {
                    b'.' | b',' => {
                        let ok = !has_separator
                            && ends_with_digit(&current)
                            && next.is_some_and(|b| b.is_ascii_digit());
                        has_separator |= ok;
                        ok
                    }
                    b'\'' => {
                        !current.is_empty() && next.is_some_and(|b| b.is_ascii_alphanumeric())
                    }
                    b'-' => {
                        if current.is_empty() {
                            next.is_some_and(|b| b.is_ascii_digit())
                        } else {
                            ends_with_letter(&current)
                                && next.is_some_and(|b| b.is_ascii_alphabetic())
                        }
                    }
                    _ => false,
                }
            };

            if keep {
                current.push(raw.to_ascii_lowercase() as char);
            } else if !current.is_empty() {
                tokens.push(self.stemmer.stem(&current));
                current.clear();
                has_separator = false;
            }
        }

        if !current.is_empty() {
            tokens.push(self.stemmer.stem(&current));
        }
        tokens
    }

    /// Tokenize once and count per-term occurrences for a single document
    pub fn term_frequencies(&self, text: &str) -> HashMap<String, u32> {
        let mut freq = HashMap::new();
        for token in self.tokenize(text) {
            *freq.entry(token).or_insert(0) += 1;
        }
        freq
    }
}

fn ends_with_digit(s: &str) -> bool {
    s.as_bytes().last().is_some_and(|b| b.is_ascii_digit())
}

fn ends_with_letter(s: &str) -> bool {
    s.as_bytes().last().is_some_and(|b| b.is_ascii_alphabetic())
}

/// Split a query string into raw word and operator tokens.
///
/// Operators `( ) ! & |` come out as one-character tokens; other runs are
/// returned verbatim. Word tokens are expected to be re-fed through
/// [`Tokenizer::tokenize`] so they pass the same stemmer as indexed terms.
pub fn split_query(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in query.chars() {
        let is_operator = matches!(ch, '(' | ')' | '!' | '&' | '|');
        if ch.is_ascii_whitespace() || is_operator {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            if is_operator {
                tokens.push(ch.to_string());
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

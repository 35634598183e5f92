//! Query parsing: raw split, implicit AND, shunting-yard
//!
//! Word tokens are re-tokenized with the index's stemmer, so query terms and
//! indexed terms always meet in the same normal form. Juxtaposed operands
//! get an implicit `&` between them before conversion to postfix.

use crate::tokenizer::{split_query, Tokenizer};

/// One token of the processed query stream
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryToken {
    Term(String),
    Not,
    And,
    Or,
    LeftParen,
    RightParen,
}

impl QueryToken {
    fn from_operator(op: &str) -> Option<Self> {
        match op {
            "!" => Some(QueryToken::Not),
            "&" => Some(QueryToken::And),
            "|" => Some(QueryToken::Or),
            "(" => Some(QueryToken::LeftParen),
            ")" => Some(QueryToken::RightParen),
            _ => None,
        }
    }

    /// Operator precedence; `0` for operands and parentheses
    fn precedence(&self) -> u8 {
        match self {
            QueryToken::Not => 3,
            QueryToken::And => 2,
            QueryToken::Or => 1,
            _ => 0,
        }
    }
}

/// Split, normalize and insert implicit `&` tokens.
///
/// A `&` goes in whenever a term or `)` is followed by a term, `(` or `!`.
pub fn parse_query(query: &str, tokenizer: &Tokenizer) -> Vec<QueryToken> {
    let mut processed: Vec<QueryToken> = Vec::new();

    let emit = |token: QueryToken, out: &mut Vec<QueryToken>| {
        let joins_left = matches!(
            out.last(),
            Some(QueryToken::Term(_)) | Some(QueryToken::RightParen)
        );
        let joins_right = matches!(
            token,
            QueryToken::Term(_) | QueryToken::LeftParen | QueryToken::Not
        );
        if joins_left && joins_right {
            out.push(QueryToken::And);
        }
        out.push(token);
    };

    for raw in split_query(query) {
        if let Some(op) = QueryToken::from_operator(&raw) {
            emit(op, &mut processed);
        } else {
            // one raw word may normalize to several terms, or to none
            for term in tokenizer.tokenize(&raw) {
                emit(QueryToken::Term(term), &mut processed);
            }
        }
    }
    processed
}

/// Convert the processed stream to postfix with the shunting-yard algorithm.
///
/// Unbalanced parentheses are tolerated: a stray `)` pops to the nearest `(`
/// if any, a leftover `(` is discarded at the end.
pub fn to_postfix(tokens: Vec<QueryToken>) -> Vec<QueryToken> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<QueryToken> = Vec::new();

    for token in tokens {
        match token {
            QueryToken::Term(_) => output.push(token),
            QueryToken::LeftParen => operators.push(token),
            QueryToken::RightParen => {
                while let Some(top) = operators.last() {
                    if *top == QueryToken::LeftParen {
                        break;
                    }
                    output.push(operators.pop().unwrap());
                }
                operators.pop();
            }
            _ => {
                while let Some(top) = operators.last() {
                    if *top == QueryToken::LeftParen || top.precedence() < token.precedence() {
                        break;
                    }
                    output.push(operators.pop().unwrap());
                }
                operators.push(token);
            }
        }
    }

    while let Some(op) = operators.pop() {
        if op != QueryToken::LeftParen {
            output.push(op);
        }
    }
    output
}

//! Quote-Aware Input Splitting
//!
//! Splits a raw line into pipe-delimited stage strings, and a stage string
//! into whitespace-delimited tokens. A double-quoted run is atomic: pipes and
//! whitespace inside it separate nothing. Whitespace runs between words are
//! emitted as tokens of their own so downstream spans account for every
//! character. Unbalanced quotes are taken literally; no error exists at this
//! layer.

use crate::syntax::Syntax;

use super::element::Token;

/// Split a raw line into one string per pipeline stage
///
/// Pipe characters inside a quoted run are preserved. An empty line yields a
/// single empty stage.
pub fn split_stages(line: &str, syntax: &Syntax) -> Vec<String> {
    let mut stages = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == syntax.quote {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch == syntax.pipe && !in_quotes {
            stages.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    stages.push(current);
    stages
}

/// Split one stage string into word and whitespace tokens
///
/// Token boundaries fall wherever the input switches between whitespace and
/// non-whitespace outside a quoted run. Concatenating the returned token
/// texts reproduces the stage exactly.
pub fn tokenize(stage: &str, syntax: &Syntax) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_start = 0;
    let mut current_is_whitespace = false;
    let mut in_quotes = false;

    for (offset, ch) in stage.char_indices() {
        if ch == syntax.quote {
            in_quotes = !in_quotes;
        }
        let is_whitespace = ch.is_whitespace() && !in_quotes && ch != syntax.quote;

        if current.is_empty() {
            current_start = offset;
            current_is_whitespace = is_whitespace;
        } else if is_whitespace != current_is_whitespace {
            tokens.push(Token {
                text: std::mem::take(&mut current),
                start: current_start,
                end: offset,
            });
            current_start = offset;
            current_is_whitespace = is_whitespace;
        }

        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(Token {
            text: current,
            start: current_start,
            end: stage.len(),
        });
    }

    tokens
}

//! Classified Input Elements
//!
//! Value types for the tokenizer output: raw tokens with source spans, and
//! the typed elements the classifier turns them into. Elements reference each
//! other (name/value pairing) by index into the owning stage's sequence, so
//! the whole tree stays a plain cloneable value with no interior pointers.

use serde::{Deserialize, Serialize};

use super::error::ParseError;

/// A substring of a stage with its source span
///
/// Offsets are byte positions relative to the stage string, end exclusive.
/// Whitespace runs are tokens too, so concatenating token texts in order
/// reproduces the stage exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text exactly as it appeared in the stage
    pub text: String,

    /// Byte offset of the first character within the stage
    pub start: usize,

    /// Byte offset one past the last character
    pub end: usize,
}

impl Token {
    /// Whether this token is a whitespace run
    pub fn is_whitespace(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_whitespace)
    }
}

/// The role a token plays within its stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// First bare word of a stage; a candidate command-path segment
    Command,

    /// `--name` style named argument
    ArgumentName,

    /// `-a` style single-character argument alias
    ArgumentAlias,

    /// Bare word following a named argument or alias
    ArgumentValue,

    /// Bare word in positional context; may still turn out to be a
    /// command-path segment once resolved against the schema
    PositionalValue,

    /// The bare end-of-options marker (`--`)
    EndOfOptions,

    /// Whitespace run
    Empty,

    /// Token that fits no rule in its context
    Unexpected,
}

/// A classified token within a stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Token text exactly as typed, whitespace included
    pub raw: String,

    /// Usable value: prefix stripped for recognized kinds, quotes trimmed
    pub value: String,

    /// Classified role
    pub kind: ElementKind,

    /// Position within the owning stage's element sequence
    pub index: usize,

    /// Byte offset of the first character within the stage
    pub start: usize,

    /// Byte offset one past the last character
    pub end: usize,

    /// Index of the semantic counterpart: a named argument points at its
    /// value element and vice versa
    pub paired_with: Option<usize>,

    /// Whether this element appeared after an end-of-options marker
    pub after_end_of_options: bool,

    /// Validation errors attached during classification
    pub errors: Vec<ParseError>,
}

impl Element {
    /// Whether this element is a whitespace run
    pub fn is_empty(&self) -> bool {
        self.kind == ElementKind::Empty
    }

    /// Whether classification attached any errors to this element
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether the span contains the given stage-relative offset
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

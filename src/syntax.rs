//! Lexical conventions for command-line input
//!
//! Collects the fixed characters and prefixes the tokenizer and classifier
//! operate on. The defaults match the conventional POSIX-style surface
//! (`--name`, `-a`, `|` between pipeline stages, `"` for quoting) but are
//! carried as data so a host application can substitute its own conventions.

use serde::{Deserialize, Serialize};

/// Lexical conventions used when splitting and classifying input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syntax {
    /// Two-character prefix introducing a named argument (e.g. `--output`)
    pub name_prefix: String,

    /// One-character prefix introducing an argument alias (e.g. `-o`)
    pub alias_prefix: String,

    /// Character separating pipeline stages
    pub pipe: char,

    /// Character delimiting a quoted token
    pub quote: char,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            name_prefix: "--".to_string(),
            alias_prefix: "-".to_string(),
            pipe: '|',
            quote: '"',
        }
    }
}

impl Syntax {
    /// Strip surrounding quote characters from a token, if both are present
    ///
    /// Only one layer is removed; interior quotes survive. A lone quote or an
    /// unbalanced pair is left untouched.
    pub fn trim_quotes<'a>(&self, text: &'a str) -> &'a str {
        if text.len() >= 2 && text.starts_with(self.quote) && text.ends_with(self.quote) {
            &text[1..text.len() - 1]
        } else {
            text
        }
    }
}

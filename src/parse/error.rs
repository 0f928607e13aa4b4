//! Parse-Time Error Types
//!
//! Errors produced while tokenizing and classifying input. These are carried
//! as values on the offending element (or stage) rather than returned through
//! `Result`, so one pass collects every problem in a line at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors attached to elements and stages during parsing
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseError {
    /// An alias token carried more than a single character after its prefix
    #[error("alias '{alias}' must be a single character")]
    InvalidAlias { alias: String },

    /// A stage finished parsing without producing a command element
    #[error("no command found in input")]
    NoCommandElement,
}

impl ParseError {
    /// Create an invalid alias error
    pub fn invalid_alias<S: Into<String>>(alias: S) -> Self {
        Self::InvalidAlias { alias: alias.into() }
    }
}

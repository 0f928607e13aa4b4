//! Element Classification
//!
//! Turns one raw token into a typed element given the kind of the nearest
//! preceding non-empty element. Classification never looks ahead: a token's
//! kind is a pure function of its trimmed text, its prefix characters, the
//! previous element's kind, and the after-end-of-options flag. Ambiguity
//! between command-path segments and true positional arguments is left for
//! the resolver, which has the schema to decide with.

use log::trace;

use crate::syntax::Syntax;

use super::element::{Element, ElementKind, Token};
use super::error::ParseError;

/// Classifies raw tokens into typed elements
#[derive(Debug, Clone)]
pub struct ElementClassifier {
    syntax: Syntax,
}

impl ElementClassifier {
    /// Create a classifier for the given lexical conventions
    pub fn new(syntax: Syntax) -> Self {
        Self { syntax }
    }

    /// Classify one token
    ///
    /// `previous` is the nearest preceding non-empty element in the stage,
    /// or `None` when no such element exists. `index` is the position the
    /// element will occupy in the stage's sequence.
    pub fn classify(&self, token: &Token, index: usize, previous: Option<&Element>) -> Element {
        let trimmed = token.text.trim();

        // Everything after an end-of-options marker is a value, no matter
        // what it looks like.
        if let Some(prev) = previous {
            if prev.kind == ElementKind::EndOfOptions || prev.after_end_of_options {
                let kind = if trimmed.is_empty() {
                    ElementKind::Empty
                } else {
                    ElementKind::PositionalValue
                };
                return self.element(token, index, kind, self.syntax.trim_quotes(trimmed), true);
            }
        }

        if trimmed == self.syntax.name_prefix {
            return self.element(token, index, ElementKind::EndOfOptions, "", false);
        }

        if trimmed.starts_with(self.syntax.name_prefix.as_str()) {
            let stripped = self
                .syntax
                .trim_quotes(&trimmed[self.syntax.name_prefix.len()..]);
            let kind = if stripped.is_empty() {
                ElementKind::Unexpected
            } else {
                ElementKind::ArgumentName
            };
            return self.element(token, index, kind, stripped, false);
        }

        if trimmed.starts_with(self.syntax.alias_prefix.as_str()) {
            let stripped = self
                .syntax
                .trim_quotes(&trimmed[self.syntax.alias_prefix.len()..]);
            if stripped.is_empty() {
                return self.element(token, index, ElementKind::Unexpected, stripped, false);
            }
            let mut element =
                self.element(token, index, ElementKind::ArgumentAlias, stripped, false);
            if stripped.chars().count() > 1 {
                element.errors.push(ParseError::invalid_alias(stripped));
            }
            return element;
        }

        // Bare word or quoted string
        if trimmed.is_empty() {
            return self.element(token, index, ElementKind::Empty, "", false);
        }

        let kind = match previous.map(|p| p.kind) {
            Some(ElementKind::ArgumentName) | Some(ElementKind::ArgumentAlias) => {
                ElementKind::ArgumentValue
            }
            None => ElementKind::Command,
            Some(ElementKind::Command)
            | Some(ElementKind::ArgumentValue)
            | Some(ElementKind::PositionalValue) => ElementKind::PositionalValue,
            _ => ElementKind::Unexpected,
        };
        self.element(token, index, kind, self.syntax.trim_quotes(trimmed), false)
    }

    fn element(
        &self,
        token: &Token,
        index: usize,
        kind: ElementKind,
        value: &str,
        after_end_of_options: bool,
    ) -> Element {
        trace!("classified '{}' at {} as {:?}", token.text, index, kind);
        Element {
            raw: token.text.clone(),
            value: value.to_string(),
            kind,
            index,
            start: token.start,
            end: token.end,
            paired_with: None,
            after_end_of_options,
            errors: Vec::new(),
        }
    }
}

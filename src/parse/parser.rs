//! Input Parsing
//!
//! Folds the classifier over the tokens of each pipeline stage, threading the
//! nearest preceding non-empty element, and records name/value pairing and
//! stage-level errors. No classification state crosses a stage boundary; the
//! whole pass is a deterministic function of the input line.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::syntax::Syntax;

use super::classifier::ElementClassifier;
use super::element::{Element, ElementKind};
use super::error::ParseError;
use super::splitter::{split_stages, tokenize};

/// One parsed pipeline stage: an ordered element sequence with its source
/// text and any stage-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedStage {
    /// The stage string exactly as it appeared between pipes
    pub raw: String,

    /// Character count of the whitespace run before the first token
    pub leading_whitespace: usize,

    /// Classified elements in source order
    pub elements: Vec<Element>,

    /// Stage-level errors (element-level errors live on the elements)
    pub errors: Vec<ParseError>,
}

impl ParsedStage {
    /// Whether this stage parsed cleanly: exactly one command element, no
    /// unexpected elements, and no errors anywhere
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
            && self.elements.iter().filter(|e| e.kind == ElementKind::Command).count() == 1
            && self
                .elements
                .iter()
                .all(|e| e.kind != ElementKind::Unexpected && !e.has_errors())
    }

    /// The stage's command element, if one emerged
    pub fn command_element(&self) -> Option<&Element> {
        self.elements.iter().find(|e| e.kind == ElementKind::Command)
    }

    /// The element whose span contains the given stage-relative offset
    ///
    /// Used by completion to establish context at a cursor position.
    pub fn element_at(&self, offset: usize) -> Option<&Element> {
        self.elements.iter().find(|e| e.contains_offset(offset))
    }

    /// Every error in the stage: stage-level first, then element-level in
    /// element order
    pub fn all_errors(&self) -> Vec<&ParseError> {
        self.errors
            .iter()
            .chain(self.elements.iter().flat_map(|e| e.errors.iter()))
            .collect()
    }

    /// Rebuild the stage text from the recorded leading whitespace and the
    /// element raws
    pub fn reconstruct(&self) -> String {
        let mut text = " ".repeat(self.leading_whitespace);
        for element in &self.elements {
            text.push_str(&element.raw);
        }
        text
    }
}

/// A fully parsed input line: one stage per pipe segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInput {
    /// The raw line as received
    pub raw: String,

    /// Parsed stages in pipeline order
    pub stages: Vec<ParsedStage>,
}

impl ParsedInput {
    /// Whether every stage parsed cleanly
    pub fn is_valid(&self) -> bool {
        self.stages.iter().all(ParsedStage::is_valid)
    }
}

/// Parses raw input lines into classified element trees
#[derive(Debug, Clone)]
pub struct InputParser {
    syntax: Syntax,
    classifier: ElementClassifier,
}

impl InputParser {
    /// Create a parser with the default lexical conventions
    pub fn new() -> Self {
        Self::with_syntax(Syntax::default())
    }

    /// Create a parser with custom lexical conventions
    pub fn with_syntax(syntax: Syntax) -> Self {
        let classifier = ElementClassifier::new(syntax.clone());
        Self { syntax, classifier }
    }

    /// Parse a raw line into one stage per pipe segment
    pub fn parse(&self, line: &str) -> ParsedInput {
        let stages: Vec<ParsedStage> = split_stages(line, &self.syntax)
            .into_iter()
            .map(|stage| self.parse_stage(&stage))
            .collect();

        debug!("parsed '{}' into {} stage(s)", line, stages.len());

        ParsedInput { raw: line.to_string(), stages }
    }

    /// Parse a single stage string
    pub fn parse_stage(&self, text: &str) -> ParsedStage {
        let mut tokens = tokenize(text, &self.syntax);

        // A leading whitespace run is recorded as a count rather than an
        // element, so the first element is always the command candidate.
        let mut leading_whitespace = 0;
        if tokens.first().is_some_and(|t| t.is_whitespace()) {
            leading_whitespace = tokens.remove(0).text.chars().count();
        }

        let mut elements: Vec<Element> = Vec::with_capacity(tokens.len());
        let mut previous: Option<usize> = None;

        for token in &tokens {
            let index = elements.len();
            let mut element =
                self.classifier
                    .classify(token, index, previous.map(|i| &elements[i]));

            if element.kind == ElementKind::ArgumentValue {
                if let Some(prev_index) = previous {
                    element.paired_with = Some(prev_index);
                    elements[prev_index].paired_with = Some(index);
                }
            }

            if !element.is_empty() {
                previous = Some(index);
            }
            elements.push(element);
        }

        let mut errors = Vec::new();
        if !elements.iter().any(|e| e.kind == ElementKind::Command) {
            errors.push(ParseError::NoCommandElement);
        }

        ParsedStage {
            raw: text.to_string(),
            leading_whitespace,
            elements,
            errors,
        }
    }
}

impl Default for InputParser {
    fn default() -> Self {
        Self::new()
    }
}

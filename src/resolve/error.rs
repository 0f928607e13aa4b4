//! Resolve-Time Error Types
//!
//! Errors produced while matching a parsed stage against the registered
//! command schema. Like parse errors these accumulate as values on the
//! result so a renderer can report every problem at once; each carries the
//! index of the offending element where one exists, so the exact source span
//! can be highlighted. The only `Result::Err` in this module is the
//! programmer-contract violation of resolving input that failed parsing.

use thiserror::Error;

use crate::parse::ParsedInput;

use super::schema::PayloadType;

/// Errors accumulated while resolving one stage against the schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No registered command matched any prefix of the candidate path
    #[error("command not found: '{path}'")]
    CommandNotFound { path: String },

    /// A named argument or alias matched nothing on the command
    #[error("unknown argument: '{name}'")]
    ArgumentNotFound { name: String, element: usize },

    /// A switch argument was given a value
    #[error("argument '{name}' does not take a value")]
    UnexpectedValue { name: String, element: usize },

    /// A non-collection argument appeared more than once
    #[error("argument '{name}' given more than once")]
    DuplicateArgument { name: String, element: usize },

    /// A required positional argument received no value
    #[error("missing required argument '{name}'")]
    MissingRequiredPositional { name: String },

    /// More positional values than the command declares places for
    #[error("unexpected positional value")]
    ExcessPositionalValues { element: usize },
}

impl ResolveError {
    /// Index of the offending element, where one exists
    ///
    /// Path-level and missing-argument errors have no single offending
    /// element and return `None`.
    pub fn element(&self) -> Option<usize> {
        match self {
            Self::CommandNotFound { .. } | Self::MissingRequiredPositional { .. } => None,
            Self::ArgumentNotFound { element, .. }
            | Self::UnexpectedValue { element, .. }
            | Self::DuplicateArgument { element, .. }
            | Self::ExcessPositionalValues { element } => Some(*element),
        }
    }
}

/// Payload-type incompatibility between adjacent pipeline stages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The earlier stage's output cannot feed the later stage's input
    #[error("stage {from_stage} produces '{output}' which stage {to_stage} does not accept (expects '{input}')")]
    IncompatiblePayload {
        from_stage: usize,
        to_stage: usize,
        output: PayloadType,
        input: PayloadType,
    },
}

/// Raised when resolution is attempted on input that failed parsing
///
/// This is a caller bug, not a user-input error: the parse result exposes
/// `is_valid()` and resolution requires it. The offending input is carried
/// for diagnostics.
#[derive(Error, Debug, Clone)]
#[error("cannot resolve input with parse errors: '{}'", input.raw)]
pub struct InvalidInputError {
    /// The parsed input that failed validation
    pub input: ParsedInput,
}

/// Errors raised while registering commands into a registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A command with the same path is already registered
    #[error("command already registered: '{path}'")]
    DuplicateCommand { path: String },
}

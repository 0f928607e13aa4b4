//! Command-line tokenizer and schema resolver for interactive CLI frameworks
//!
//! Turns a raw input line into classified, position-tracked elements
//! (`parse`), then matches them against a registered command schema with
//! positional, alias, collection and pipeline semantics (`resolve`). Every
//! call is a pure function of the input and the read-only schema; results
//! carry accumulated errors rather than failing fast, so callers can report
//! everything wrong with a line at once.

pub mod parse;
pub mod resolve;
pub mod syntax;

pub use parse::{Element, ElementKind, InputParser, ParseError, ParsedInput, ParsedStage};
pub use resolve::{
    ArgumentSpec, CommandRegistry, CommandResolver, CommandSpec, InvalidInputError, PayloadType,
    PipelineError, PipelineResolver, ResolveError, ResolvedInput, ResolvedStage, Schema,
    SchemaError,
};
pub use syntax::Syntax;

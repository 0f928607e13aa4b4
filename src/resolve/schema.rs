//! Command Schema Types and Lookup
//!
//! The descriptors the resolver matches parsed input against: argument and
//! command declarations, pipeline payload types, the read-only lookup trait
//! the resolver consumes, and an in-memory registry implementing it. The
//! schema is owned outside the parsing core; everything here is read-only at
//! that boundary and safe for concurrent reads.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::SchemaError;

/// The payload a command consumes from or produces into a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadType {
    /// Produces or consumes nothing; a `None` input cannot be piped into
    None,

    /// Accepts any concrete payload
    Any,

    /// A named concrete payload type, compared by name
    Named(String),
}

impl PayloadType {
    /// Create a named payload type
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self::Named(name.into())
    }

    /// Whether this input type can accept the given output type
    ///
    /// `Any` accepts every output; a named type accepts the same name, and
    /// optimistically accepts `Any` (the concrete type is only known at run
    /// time). `None` accepts nothing.
    pub fn accepts(&self, output: &PayloadType) -> bool {
        match self {
            Self::None => false,
            Self::Any => true,
            Self::Named(name) => match output {
                Self::Named(other) => name == other,
                Self::Any => true,
                Self::None => false,
            },
        }
    }
}

impl std::fmt::Display for PayloadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Any => write!(f, "any"),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Declaration of one argument a command accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Canonical argument name, matched against `--name` elements
    pub name: String,

    /// Optional single-character alias, matched against `-a` elements
    pub alias: Option<char>,

    /// Whether this is a no-value switch
    pub switch: bool,

    /// Whether values bind by position rather than by name
    pub positional: bool,

    /// Binding order among positional arguments
    pub position: usize,

    /// Whether resolution fails when no value is supplied
    pub required: bool,

    /// Whether this positional absorbs all trailing unbound values
    pub rest: bool,

    /// Whether repeated occurrences accumulate instead of erroring
    pub collection: bool,
}

impl ArgumentSpec {
    /// Declare a value-taking named argument
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            alias: None,
            switch: false,
            positional: false,
            position: 0,
            required: false,
            rest: false,
            collection: false,
        }
    }

    /// Declare a no-value switch argument
    pub fn flag<S: Into<String>>(name: S) -> Self {
        Self { switch: true, ..Self::named(name) }
    }

    /// Declare a positional argument bound at the given position
    pub fn positional<S: Into<String>>(name: S, position: usize) -> Self {
        Self { positional: true, position, ..Self::named(name) }
    }

    /// Declare a rest positional absorbing all trailing values
    pub fn rest<S: Into<String>>(name: S, position: usize) -> Self {
        Self { rest: true, ..Self::positional(name, position) }
    }

    /// Attach a single-character alias
    pub fn with_alias(mut self, alias: char) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Mark the argument required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the argument as a collection accepting repeated occurrences
    pub fn repeated(mut self) -> Self {
        self.collection = true;
        self
    }

    /// Whether the given element value matches this argument's name
    pub fn matches_name(&self, name: &str, case_sensitive: bool) -> bool {
        if case_sensitive {
            self.name == name
        } else {
            self.name.eq_ignore_ascii_case(name)
        }
    }

    /// Whether the given element value matches this argument's alias
    pub fn matches_alias(&self, alias: &str, case_sensitive: bool) -> bool {
        let Some(own) = self.alias else {
            return false;
        };
        let mut chars = alias.chars();
        let (Some(first), None) = (chars.next(), chars.next()) else {
            return false;
        };
        if case_sensitive {
            own == first
        } else {
            own.eq_ignore_ascii_case(&first)
        }
    }
}

/// Declaration of one command the resolver can match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Space-joined command path (e.g. `"widget list"`)
    pub path: String,

    /// Short human-readable description
    pub description: String,

    /// Declared arguments in declaration order
    pub arguments: Vec<ArgumentSpec>,

    /// Payload type accepted from the preceding pipeline stage
    pub input_type: PayloadType,

    /// Payload type produced for the following pipeline stage
    pub output_type: PayloadType,
}

impl CommandSpec {
    /// Declare a command with no arguments and no pipeline payloads
    pub fn new<P: Into<String>, D: Into<String>>(path: P, description: D) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            arguments: Vec::new(),
            input_type: PayloadType::None,
            output_type: PayloadType::None,
        }
    }

    /// Add an argument declaration
    pub fn with_argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Declare the payload type accepted from a preceding stage
    pub fn with_input(mut self, input: PayloadType) -> Self {
        self.input_type = input;
        self
    }

    /// Declare the payload type produced for a following stage
    pub fn with_output(mut self, output: PayloadType) -> Self {
        self.output_type = output;
        self
    }

    /// Find a named argument by exact name
    pub fn find_named(&self, name: &str, case_sensitive: bool) -> Option<&ArgumentSpec> {
        self.arguments
            .iter()
            .find(|a| !a.positional && a.matches_name(name, case_sensitive))
    }

    /// Find a named argument by single-character alias
    pub fn find_alias(&self, alias: &str, case_sensitive: bool) -> Option<&ArgumentSpec> {
        self.arguments
            .iter()
            .find(|a| !a.positional && a.matches_alias(alias, case_sensitive))
    }

    /// Non-rest positional arguments ordered by declared position
    pub fn positional_arguments(&self) -> Vec<&ArgumentSpec> {
        let mut positionals: Vec<&ArgumentSpec> =
            self.arguments.iter().filter(|a| a.positional && !a.rest).collect();
        positionals.sort_by_key(|a| a.position);
        positionals
    }

    /// The rest positional, if one is declared
    pub fn rest_argument(&self) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.positional && a.rest)
    }
}

/// Read-only command lookup the resolver matches paths against
///
/// Owned by the host application; implementations must tolerate concurrent
/// reads. Paths are space-joined segment sequences.
pub trait Schema {
    /// Find the command registered under the given path
    fn find(&self, path: &str) -> Option<&CommandSpec>;

    /// Whether path and argument matching is case sensitive
    fn case_sensitive(&self) -> bool {
        true
    }
}

/// In-memory command registry
///
/// The standard `Schema` implementation: commands keyed by path, optionally
/// case insensitive. Registration is the only mutation; lookups never write.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandSpec>,
    case_insensitive: bool,
}

impl CommandRegistry {
    /// Create an empty case-sensitive registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty case-insensitive registry
    pub fn case_insensitive() -> Self {
        Self { case_insensitive: true, ..Self::default() }
    }

    /// Register a command under its declared path
    pub fn register(&mut self, spec: CommandSpec) -> Result<(), SchemaError> {
        let key = self.key(&spec.path);
        if self.commands.contains_key(&key) {
            return Err(SchemaError::DuplicateCommand { path: spec.path });
        }
        debug!("registered command '{}' with {} argument(s)", spec.path, spec.arguments.len());
        self.commands.insert(key, spec);
        Ok(())
    }

    /// Number of registered commands
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// All registered commands, in no particular order
    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    fn key(&self, path: &str) -> String {
        if self.case_insensitive {
            path.to_lowercase()
        } else {
            path.to_string()
        }
    }
}

impl Schema for CommandRegistry {
    fn find(&self, path: &str) -> Option<&CommandSpec> {
        self.commands.get(&self.key(path))
    }

    fn case_sensitive(&self) -> bool {
        !self.case_insensitive
    }
}

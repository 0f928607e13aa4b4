//! Stage Resolution
//!
//! Matches one parsed stage against the registered schema: finds the command
//! by longest-prefix path matching with backoff, binds named and aliased
//! elements to their declarations, then binds positional values left to
//! right with rest-capture. Errors accumulate on the result instead of
//! short-circuiting, so a single pass reports everything wrong with a stage.

use std::collections::HashMap;

use log::debug;

use crate::parse::{Element, ElementKind, ParsedInput, ParsedStage};

use super::error::{InvalidInputError, ResolveError};
use super::schema::{CommandSpec, Schema};

/// One parsed stage matched against the schema
///
/// Owns a clone of the stage it resolved and borrows the matched command
/// from the schema. Argument bindings are kept as one map from canonical
/// argument name to the ordered element indices that supplied it; accessors
/// expose the first or the full list.
#[derive(Debug, Clone)]
pub struct ResolvedStage<'s> {
    /// The stage this resolution consumed
    pub stage: ParsedStage,

    /// The matched command, or `None` with a `CommandNotFound` error
    pub command: Option<&'s CommandSpec>,

    /// How many leading elements the command path consumed
    pub matched_segments: usize,

    /// Canonical argument name to supplying element indices, encounter order
    bindings: HashMap<String, Vec<usize>>,

    /// Errors accumulated during resolution
    pub errors: Vec<ResolveError>,
}

impl<'s> ResolvedStage<'s> {
    /// Whether resolution completed without errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first element supplying the given argument
    pub fn binding(&self, name: &str) -> Option<&Element> {
        self.bindings
            .get(name)
            .and_then(|indices| indices.first())
            .map(|&index| &self.stage.elements[index])
    }

    /// Every element supplying the given argument, in encounter order
    pub fn bindings(&self, name: &str) -> Vec<&Element> {
        self.bindings
            .get(name)
            .map(|indices| indices.iter().map(|&index| &self.stage.elements[index]).collect())
            .unwrap_or_default()
    }

    /// The first supplied value for the given argument
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.binding(name).map(|e| e.value.as_str())
    }

    /// Every supplied value for the given argument, in encounter order
    pub fn values_of(&self, name: &str) -> Vec<&str> {
        self.bindings(name).into_iter().map(|e| e.value.as_str()).collect()
    }

    /// Names of all bound arguments, sorted for stable iteration
    pub fn bound_arguments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn bind(&mut self, name: &str, element: usize) {
        self.bindings.entry(name.to_string()).or_default().push(element);
    }
}

/// Resolves parsed stages against a schema
#[derive(Debug, Clone)]
pub struct CommandResolver<'s, S: Schema> {
    schema: &'s S,
}

impl<'s, S: Schema> CommandResolver<'s, S> {
    /// Create a resolver reading from the given schema
    pub fn new(schema: &'s S) -> Self {
        Self { schema }
    }

    /// Resolve one parsed stage
    ///
    /// Returns `Err` only when the stage failed parsing, which is a caller
    /// contract violation; every user-level problem accumulates as an error
    /// on the returned stage instead.
    pub fn resolve_stage(&self, stage: &ParsedStage) -> Result<ResolvedStage<'s>, InvalidInputError> {
        if !stage.is_valid() {
            return Err(InvalidInputError {
                input: ParsedInput { raw: stage.raw.clone(), stages: vec![stage.clone()] },
            });
        }

        let mut resolved = ResolvedStage {
            stage: stage.clone(),
            command: None,
            matched_segments: 0,
            bindings: HashMap::new(),
            errors: Vec::new(),
        };

        let Some(spec) = self.match_command_path(&mut resolved) else {
            // Resolution cannot continue without a command to bind against.
            return Ok(resolved);
        };

        self.bind_named_arguments(&mut resolved, spec);
        self.bind_positional_arguments(&mut resolved, spec);

        debug!(
            "resolved '{}' to '{}' with {} error(s)",
            stage.raw.trim(),
            spec.path,
            resolved.errors.len()
        );
        Ok(resolved)
    }

    /// Longest-prefix command path matching with backoff
    ///
    /// The leading run of command/positional elements forms the candidate
    /// path. The full path is tried first, then segments drop off the end
    /// until the schema matches; the leftover elements return to the
    /// positional pool. Only the schema can say where a multi-word command
    /// path ends and positional values begin.
    fn match_command_path(&self, resolved: &mut ResolvedStage<'s>) -> Option<&'s CommandSpec> {
        let path_elements: Vec<usize> = resolved
            .stage
            .elements
            .iter()
            .filter(|e| !e.is_empty())
            .take_while(|e| {
                matches!(e.kind, ElementKind::Command | ElementKind::PositionalValue)
            })
            .map(|e| e.index)
            .collect();

        let segments: Vec<&str> = path_elements
            .iter()
            .map(|&index| resolved.stage.elements[index].value.as_str())
            .collect();

        for length in (1..=segments.len()).rev() {
            let candidate = segments[..length].join(" ");
            debug!("trying command path '{}'", candidate);
            if let Some(spec) = self.schema.find(&candidate) {
                resolved.command = Some(spec);
                resolved.matched_segments = length;
                return Some(spec);
            }
        }

        resolved.errors.push(ResolveError::CommandNotFound { path: segments.join(" ") });
        None
    }

    fn bind_named_arguments(&self, resolved: &mut ResolvedStage<'s>, spec: &'s CommandSpec) {
        let case_sensitive = self.schema.case_sensitive();
        let elements = resolved.stage.elements.clone();

        for element in &elements {
            let argument = match element.kind {
                ElementKind::ArgumentName => spec.find_named(&element.value, case_sensitive),
                ElementKind::ArgumentAlias => spec.find_alias(&element.value, case_sensitive),
                _ => continue,
            };

            let Some(argument) = argument else {
                resolved.errors.push(ResolveError::ArgumentNotFound {
                    name: element.value.clone(),
                    element: element.index,
                });
                continue;
            };

            if argument.switch {
                if let Some(paired) = element.paired_with {
                    resolved.errors.push(ResolveError::UnexpectedValue {
                        name: argument.name.clone(),
                        element: paired,
                    });
                }
            }

            // A value-taking argument is supplied by its paired value; a
            // switch (or a name still waiting on its value) supplies itself.
            let supplier = if argument.switch {
                element.index
            } else {
                element.paired_with.unwrap_or(element.index)
            };

            let already_bound =
                resolved.bindings.get(&argument.name).is_some_and(|b| !b.is_empty());
            if already_bound && !argument.collection {
                resolved.errors.push(ResolveError::DuplicateArgument {
                    name: argument.name.clone(),
                    element: element.index,
                });
                continue;
            }

            resolved.bind(&argument.name, supplier);
        }
    }

    fn bind_positional_arguments(&self, resolved: &mut ResolvedStage<'s>, spec: &'s CommandSpec) {
        // Positional values are what remains once the matched path segments
        // are taken off the front. Values paired to named arguments carry a
        // different kind and never land here.
        let mut path_remaining = resolved.matched_segments;
        let mut values: Vec<usize> = Vec::new();
        for element in &resolved.stage.elements {
            if element.is_empty() {
                continue;
            }
            if path_remaining > 0
                && matches!(element.kind, ElementKind::Command | ElementKind::PositionalValue)
            {
                path_remaining -= 1;
                continue;
            }
            if element.kind == ElementKind::PositionalValue {
                values.push(element.index);
            }
        }

        let declared = spec.positional_arguments();
        let mut supplied = values.into_iter();

        for argument in &declared {
            match supplied.next() {
                Some(index) => resolved.bind(&argument.name, index),
                None if argument.required => {
                    resolved.errors.push(ResolveError::MissingRequiredPositional {
                        name: argument.name.clone(),
                    });
                }
                None => {}
            }
        }

        let remaining: Vec<usize> = supplied.collect();
        match spec.rest_argument() {
            Some(rest) => {
                if remaining.is_empty() {
                    if rest.required {
                        resolved.errors.push(ResolveError::MissingRequiredPositional {
                            name: rest.name.clone(),
                        });
                    }
                } else {
                    for index in remaining {
                        resolved.bind(&rest.name, index);
                    }
                }
            }
            None => {
                if let Some(&first) = remaining.first() {
                    resolved
                        .errors
                        .push(ResolveError::ExcessPositionalValues { element: first });
                }
            }
        }
    }
}

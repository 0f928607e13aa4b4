//! Pipeline Resolution
//!
//! Resolves every stage of a parsed input independently, then checks that
//! each stage's declared output payload can feed the next stage's declared
//! input. Compatibility checks only run when every stage resolved cleanly;
//! stage-level problems are reported first and alone.

use log::debug;

use crate::parse::ParsedInput;

use super::error::{InvalidInputError, PipelineError};
use super::resolver::{CommandResolver, ResolvedStage};
use super::schema::{PayloadType, Schema};

/// A fully resolved input line
#[derive(Debug, Clone)]
pub struct ResolvedInput<'s> {
    /// Resolved stages in pipeline order
    pub stages: Vec<ResolvedStage<'s>>,

    /// Payload incompatibilities between adjacent stages
    pub pipeline_errors: Vec<PipelineError>,
}

impl ResolvedInput<'_> {
    /// Whether every stage resolved cleanly and all adjacent payloads agree
    pub fn is_valid(&self) -> bool {
        self.pipeline_errors.is_empty() && self.stages.iter().all(ResolvedStage::is_valid)
    }
}

/// Resolves whole input lines, stages and payload compatibility together
#[derive(Debug, Clone)]
pub struct PipelineResolver<'s, S: Schema> {
    resolver: CommandResolver<'s, S>,
}

impl<'s, S: Schema> PipelineResolver<'s, S> {
    /// Create a pipeline resolver reading from the given schema
    pub fn new(schema: &'s S) -> Self {
        Self { resolver: CommandResolver::new(schema) }
    }

    /// Resolve every stage and check adjacent payload compatibility
    ///
    /// Returns `Err` only when the input failed parsing, which is a caller
    /// contract violation.
    pub fn resolve(&self, input: &ParsedInput) -> Result<ResolvedInput<'s>, InvalidInputError> {
        if !input.is_valid() {
            return Err(InvalidInputError { input: input.clone() });
        }

        let stages = input
            .stages
            .iter()
            .map(|stage| self.resolver.resolve_stage(stage))
            .collect::<Result<Vec<_>, _>>()?;

        let mut pipeline_errors = Vec::new();
        if stages.iter().all(ResolvedStage::is_valid) {
            for index in 1..stages.len() {
                let (Some(producer), Some(consumer)) =
                    (stages[index - 1].command, stages[index].command)
                else {
                    continue;
                };
                if producer.output_type == PayloadType::None {
                    continue;
                }
                if !consumer.input_type.accepts(&producer.output_type) {
                    debug!(
                        "payload mismatch between '{}' and '{}'",
                        producer.path, consumer.path
                    );
                    pipeline_errors.push(PipelineError::IncompatiblePayload {
                        from_stage: index - 1,
                        to_stage: index,
                        output: producer.output_type.clone(),
                        input: consumer.input_type.clone(),
                    });
                }
            }
        }

        Ok(ResolvedInput { stages, pipeline_errors })
    }
}

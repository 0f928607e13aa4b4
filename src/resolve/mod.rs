//! Schema matching and argument binding for parsed input

pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod schema;

pub use error::{InvalidInputError, PipelineError, ResolveError, SchemaError};
pub use pipeline::{PipelineResolver, ResolvedInput};
pub use resolver::{CommandResolver, ResolvedStage};
pub use schema::{ArgumentSpec, CommandRegistry, CommandSpec, PayloadType, Schema};

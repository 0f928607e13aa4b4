//! End-to-End Integration Tests
//!
//! Tests complete workflows from raw input lines through tokenization and
//! classification to schema resolution, the way an interactive host drives
//! the crate: parse a line, check validity, resolve it against a registry,
//! read bound values.

use cmdparse::{
    ArgumentSpec, CommandRegistry, CommandResolver, CommandSpec, ElementKind, InputParser,
    ParseError, PayloadType, PipelineError, PipelineResolver, ResolveError,
};

/// Build a registry shaped like a small task-runner application
fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry
        .register(
            CommandSpec::new("task run", "Run a task by name")
                .with_argument(ArgumentSpec::positional("name", 0).required())
                .with_argument(ArgumentSpec::rest("args", 1))
                .with_argument(ArgumentSpec::named("env").with_alias('e').repeated())
                .with_argument(ArgumentSpec::named("timeout").with_alias('t'))
                .with_argument(ArgumentSpec::flag("quiet").with_alias('q'))
                .with_output(PayloadType::named("events")),
        )
        .expect("register task run");

    registry
        .register(
            CommandSpec::new("task", "Show task status")
                .with_argument(ArgumentSpec::positional("name", 0)),
        )
        .expect("register task");

    registry
        .register(
            CommandSpec::new("events tail", "Follow an event stream")
                .with_input(PayloadType::named("events"))
                .with_output(PayloadType::named("text")),
        )
        .expect("register events tail");

    registry
        .register(
            CommandSpec::new("save", "Write text to a file")
                .with_argument(ArgumentSpec::positional("path", 0).required())
                .with_input(PayloadType::named("text")),
        )
        .expect("register save");

    registry
}

#[test]
fn test_full_workflow_single_stage() {
    let registry = build_registry();
    let parser = InputParser::new();

    let input = parser.parse("task run build --env CI=1 -e RELEASE=1 -q -- --verbose");
    assert!(input.is_valid());

    let resolver = CommandResolver::new(&registry);
    let resolved = resolver.resolve_stage(&input.stages[0]).expect("valid stage");

    assert!(resolved.is_valid());
    assert_eq!(resolved.command.expect("matched").path, "task run");
    assert_eq!(resolved.matched_segments, 2);
    assert_eq!(resolved.value_of("name"), Some("build"));
    assert_eq!(resolved.values_of("env"), vec!["CI=1", "RELEASE=1"]);
    assert!(resolved.binding("quiet").is_some());
    // The element after the end-of-options marker became a positional value
    // and fell into the rest argument despite its prefix.
    assert_eq!(resolved.values_of("args"), vec!["--verbose"]);
}

#[test]
fn test_full_workflow_pipeline() {
    let registry = build_registry();
    let input = InputParser::new().parse("task run build | events tail | save \"out put.log\"");
    assert!(input.is_valid());

    let resolved = PipelineResolver::new(&registry).resolve(&input).expect("valid input");
    assert!(resolved.is_valid());
    assert_eq!(resolved.stages.len(), 3);
    assert_eq!(resolved.stages[2].value_of("path"), Some("out put.log"));
}

#[test]
fn test_backoff_prefers_longest_path() {
    let registry = build_registry();
    let parser = InputParser::new();
    let resolver = CommandResolver::new(&registry);

    // "task run build" matches the two-segment command with one positional,
    // not the one-segment "task" command with positional "run".
    let input = parser.parse("task run build");
    let resolved = resolver.resolve_stage(&input.stages[0]).expect("valid stage");
    assert_eq!(resolved.command.expect("matched").path, "task run");
    assert_eq!(resolved.value_of("name"), Some("build"));

    // A bare "task status" backs off to "task".
    let input = parser.parse("task status");
    let resolved = resolver.resolve_stage(&input.stages[0]).expect("valid stage");
    assert_eq!(resolved.command.expect("matched").path, "task");
    assert_eq!(resolved.value_of("name"), Some("status"));
}

#[test]
fn test_errors_accumulate_across_one_stage() {
    let registry = build_registry();
    let input = InputParser::new().parse("task run --bogus x --timeout 5 --timeout 9");
    let resolved = CommandResolver::new(&registry)
        .resolve_stage(&input.stages[0])
        .expect("valid stage");

    // Unknown argument, duplicated scalar, and the missing required
    // positional are all reported together.
    assert_eq!(resolved.errors.len(), 3);
    assert!(resolved
        .errors
        .iter()
        .any(|e| matches!(e, ResolveError::ArgumentNotFound { name, .. } if name == "bogus")));
    assert!(resolved
        .errors
        .iter()
        .any(|e| matches!(e, ResolveError::DuplicateArgument { name, .. } if name == "timeout")));
    assert!(resolved
        .errors
        .iter()
        .any(|e| matches!(e, ResolveError::MissingRequiredPositional { name } if name == "name")));
}

#[test]
fn test_every_argument_error_locates_its_element() {
    let registry = build_registry();
    let input = InputParser::new().parse("task run build --bogus x");
    let resolved = CommandResolver::new(&registry)
        .resolve_stage(&input.stages[0])
        .expect("valid stage");

    for error in &resolved.errors {
        let index = error.element().expect("argument errors carry an element");
        let element = &resolved.stage.elements[index];
        assert_eq!(element.value, "bogus");
        assert!(element.start < element.end);
    }
}

#[test]
fn test_pipeline_mismatch_reported_with_stage_indices() {
    let registry = build_registry();
    // task run produces events; save expects text.
    let input = InputParser::new().parse("task run build | save out.log");
    let resolved = PipelineResolver::new(&registry).resolve(&input).expect("valid input");

    assert!(!resolved.is_valid());
    assert_eq!(
        resolved.pipeline_errors,
        vec![PipelineError::IncompatiblePayload {
            from_stage: 0,
            to_stage: 1,
            output: PayloadType::named("events"),
            input: PayloadType::named("text"),
        }]
    );
}

#[test]
fn test_invalid_parse_surfaces_before_resolution() {
    let registry = build_registry();
    let parser = InputParser::new();

    let input = parser.parse("task run -xyz build");
    assert!(!input.is_valid());
    let alias = input.stages[0]
        .elements
        .iter()
        .find(|e| e.kind == ElementKind::ArgumentAlias)
        .expect("alias element");
    assert_eq!(alias.errors, vec![ParseError::InvalidAlias { alias: "xyz".to_string() }]);

    let result = PipelineResolver::new(&registry).resolve(&input);
    assert!(result.is_err(), "resolving unparsed input is a contract violation");
}

#[test]
fn test_parse_tree_serializes_for_diagnostics() {
    let input = InputParser::new().parse("task run build --env CI=1 | events tail");
    let json = serde_json::to_string(&input).expect("serialize parse tree");

    let restored: cmdparse::ParsedInput = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, input);
    assert!(json.contains("\"Command\""));
    assert!(json.contains("\"ArgumentName\""));
}

#[test]
fn test_completion_context_from_cursor_offset() {
    let parser = InputParser::new();
    let line = "task run --env CI=1";
    let input = parser.parse(line);
    let stage = &input.stages[0];

    // Cursor inside "--env" lands on the argument name element.
    let element = stage.element_at(10).expect("element under cursor");
    assert_eq!(element.kind, ElementKind::ArgumentName);
    assert_eq!(element.value, "env");
    // Its pairing leads completion to the value it owns.
    let value = &stage.elements[element.paired_with.expect("paired value")];
    assert_eq!(value.value, "CI=1");
}

#[test]
fn test_case_insensitive_registry_end_to_end() {
    let mut registry = CommandRegistry::case_insensitive();
    registry
        .register(
            CommandSpec::new("Task Run", "Run a task")
                .with_argument(ArgumentSpec::named("Timeout"))
                .with_argument(ArgumentSpec::positional("name", 0)),
        )
        .expect("register");

    let input = InputParser::new().parse("task run build --timeout 5");
    let resolved = CommandResolver::new(&registry)
        .resolve_stage(&input.stages[0])
        .expect("valid stage");

    assert!(resolved.is_valid());
    assert_eq!(resolved.command.expect("matched").path, "Task Run");
    assert_eq!(resolved.value_of("Timeout"), Some("5"));
}

//! Property-Based Parser Tests
//!
//! Universal invariants of the tokenizer and resolver checked over generated
//! input: stage counting against unquoted pipes, lossless reconstruction of
//! stage text, and deterministic resolution.

use proptest::prelude::*;

use cmdparse::{
    ArgumentSpec, CommandRegistry, CommandResolver, CommandSpec, InputParser, Syntax,
};

/// Count pipe characters that sit outside any double-quoted run
fn unquoted_pipes(line: &str) -> usize {
    let syntax = Syntax::default();
    let mut count = 0;
    let mut in_quotes = false;
    for ch in line.chars() {
        if ch == syntax.quote {
            in_quotes = !in_quotes;
        } else if ch == syntax.pipe && !in_quotes {
            count += 1;
        }
    }
    count
}

proptest! {
    #[test]
    fn stage_count_tracks_unquoted_pipes(line in "[ -~]{0,64}") {
        let input = InputParser::new().parse(&line);
        prop_assert_eq!(input.stages.len(), 1 + unquoted_pipes(&line));
    }

    #[test]
    fn stage_text_reconstructs_exactly(
        // Space-separated words over a printable alphabet, space-indented
        line in "[a-zA-Z0-9 _./\"=-]{0,64}"
    ) {
        let input = InputParser::new().parse(&line);
        for stage in &input.stages {
            prop_assert_eq!(stage.reconstruct(), stage.raw.clone());
        }
    }

    #[test]
    fn element_spans_cover_tokens(line in "[a-z0-9 |\"-]{0,48}") {
        let input = InputParser::new().parse(&line);
        for stage in &input.stages {
            for element in &stage.elements {
                prop_assert_eq!(element.end - element.start, element.raw.len());
                prop_assert_eq!(&stage.raw[element.start..element.end], element.raw.as_str());
            }
        }
    }

    #[test]
    fn parsing_is_deterministic(line in "[ -~]{0,64}") {
        let parser = InputParser::new();
        prop_assert_eq!(parser.parse(&line), parser.parse(&line));
    }

    #[test]
    fn resolution_is_deterministic(tail in "[a-z05 -]{0,32}") {
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandSpec::new("run", "Run")
                    .with_argument(ArgumentSpec::positional("name", 0))
                    .with_argument(ArgumentSpec::rest("rest", 1))
                    .with_argument(ArgumentSpec::named("opt").with_alias('o')),
            )
            .expect("register");

        let stage = InputParser::new().parse_stage(&format!("run {}", tail));
        if stage.is_valid() {
            let resolver = CommandResolver::new(&registry);
            let first = resolver.resolve_stage(&stage).expect("valid stage");
            let second = resolver.resolve_stage(&stage).expect("valid stage");
            prop_assert_eq!(&first.errors, &second.errors);
            prop_assert_eq!(first.bound_arguments(), second.bound_arguments());
        }
    }
}

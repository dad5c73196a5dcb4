//! Test utilities and snapshot helpers.

use crate::{Error, Grammar};

/// Compile a grammar that must be valid.
pub fn compile(text: &str) -> Grammar {
    match Grammar::compile(text) {
        Ok(grammar) => grammar,
        Err(err) => panic!("grammar failed to compile:\n{}", err.render(text)),
    }
}

/// Plain-form diagnostics of a grammar that must fail validation.
pub fn expect_invalid(text: &str) -> String {
    match Grammar::compile(text) {
        Err(Error::GrammarInvalid(diagnostics)) => diagnostics.printer().render(),
        Err(other) => panic!("expected validation errors, got: {other}"),
        Ok(grammar) => panic!("expected validation errors, compiled:\n{grammar}"),
    }
}

/// S-expression of `source` parsed with `rule`.
pub fn sexpr(grammar: &Grammar, rule: &str, source: &str) -> String {
    match grammar.parse(rule, source) {
        Ok(tree) => tree.sexpr(),
        Err(err) => panic!("parse failed:\n{}", err.render(source)),
    }
}

/// Snapshot test for validation diagnostics.
#[macro_export]
macro_rules! shot_invalid {
    ($grammar:literal) => {{
        let grammar = indoc::indoc!($grammar).trim();
        let output = $crate::test_utils::expect_invalid(grammar);
        format!("{grammar}\n---\n{output}")
    }};
}

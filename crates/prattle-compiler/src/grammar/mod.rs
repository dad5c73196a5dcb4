//! Grammar text to rule registry.
//!
//! The pipeline is: parse the text with the grammar-language rules, read
//! the tree into a typed [`ast`], validate it, lower it to patterns.
//!
//! The grammar-language rules come either from the hand-assembled base
//! ([`GrammarCompiler::new`]) or from compiling [`BOOTSTRAP_GRAMMAR`] with
//! that base ([`GrammarCompiler::self_hosted`]). Both produce the same
//! registry.

pub mod ast;
mod bootstrap;
mod lower;
mod validate;


use std::fmt;
use std::ops::Range;

use prattle_core::ParseNode;
use prattle_engine::{ParseError, Parser, Rules};

pub use bootstrap::{BOOTSTRAP_GRAMMAR, GRAMMAR_RULE};

use crate::diagnostics::Diagnostics;
use crate::{Error, Result};

/// Compiles grammar text using a grammar-language registry.
#[derive(Debug, Clone)]
pub struct GrammarCompiler {
    rules: Rules,
}

impl GrammarCompiler {
    /// Compiler driven by the hand-assembled base rules.
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: bootstrap::base_rules()?,
        })
    }

    /// Compiler driven by the rules compiled from [`BOOTSTRAP_GRAMMAR`].
    pub fn self_hosted() -> Result<Self> {
        let grammar = Self::new()?.compile(BOOTSTRAP_GRAMMAR)?;
        Ok(Self::from_grammar(grammar))
    }

    /// Use a compiled grammar of the grammar language to compile further
    /// grammars. It must define the rules of [`BOOTSTRAP_GRAMMAR`].
    pub fn from_grammar(grammar: Grammar) -> Self {
        Self {
            rules: grammar.rules,
        }
    }

    /// The grammar-language rules.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Parse grammar text into its tree, without compiling it.
    pub fn parse_tree(&self, text: &str) -> Result<ParseNode> {
        Parser::new(&self.rules)
            .parse(GRAMMAR_RULE, text)
            .map_err(Error::GrammarSyntax)
    }

    pub fn compile(&self, text: &str) -> Result<Grammar> {
        let tree = self.parse_tree(text)?;
        let ast = ast::from_tree(&tree)?;

        let diagnostics = validate::validate(&ast);
        if diagnostics.has_errors() {
            return Err(Error::GrammarInvalid(diagnostics));
        }

        let rules = lower::lower(&ast)?;
        Ok(Grammar { rules, diagnostics })
    }
}

/// A compiled grammar: named patterns ready to parse source text.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Rules,
    /// Warnings found during validation.
    diagnostics: Diagnostics,
}

impl Grammar {
    /// Compile `text` with the base grammar-language rules.
    pub fn compile(text: &str) -> Result<Self> {
        GrammarCompiler::new()?.compile(text)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn into_rules(self) -> Rules {
        self.rules
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// A parser over this grammar, for setting limits or a tracer.
    pub fn parser(&self) -> Parser<'_> {
        Parser::new(&self.rules)
    }

    /// Parse all of `source` starting at `rule`.
    pub fn parse(&self, rule: &str, source: &str) -> std::result::Result<ParseNode, ParseError> {
        self.parser().parse(rule, source)
    }

    /// Parse `source[range]` starting at `rule`.
    pub fn parse_range(
        &self,
        rule: &str,
        source: &str,
        range: Range<usize>,
    ) -> std::result::Result<ParseNode, ParseError> {
        self.parser().parse_range(rule, source, range)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.rules, f)
    }
}

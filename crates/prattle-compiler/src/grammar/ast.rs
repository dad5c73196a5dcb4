//! Typed view of a grammar text, read from the parse tree of the grammar
//! language.
//!
//! Tokens keep their raw text (delimiters and escapes included) and their
//! span, so validation can point into the grammar text.

use prattle_core::{ParseNode, Span};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Content between the delimiters, with doubled delimiters collapsed.
    pub fn unescaped(&self) -> String {
        let Some(delimiter) = self.text.chars().next() else {
            return String::new();
        };
        let doubled: String = [delimiter, delimiter].iter().collect();
        self.content().replace(&doubled, &delimiter.to_string())
    }

    /// Raw text between the delimiters.
    pub fn content(&self) -> &str {
        let len = self.text.len();
        if len < 2 {
            return "";
        }
        &self.text[1..len - 1]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarAst {
    pub rules: Vec<RuleDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub name: Token,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Choice(ChoiceExpr),
    Table(TableDef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub span: Span,
    pub operators: Vec<OperatorDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDef {
    /// Quoted operator name.
    pub name: Token,
    pub left: Option<Token>,
    pub right: Option<Token>,
    pub pattern: ChoiceExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceExpr {
    pub alternatives: Vec<SequenceExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceExpr {
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Quoted label name.
    pub label: Option<Token>,
    pub prefix: Option<Prefix>,
    pub atom: Atom,
    pub suffix: Option<Suffix>,
}

impl Term {
    /// Unlabeled literals and lookaheads contribute nothing to the tree.
    pub fn is_discardable(&self) -> bool {
        self.label.is_none() && (self.prefix.is_some() || matches!(self.atom, Atom::Literal(_)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    Not,
    And,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    Optional,
    Star,
    Plus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Regex(Token),
    Literal(Token),
    Group(ChoiceExpr),
    Rule(Token),
}

/// Read the tree produced by the `grammar` rule.
pub fn from_tree(tree: &ParseNode) -> Result<GrammarAst> {
    let rules = tree
        .unwrap_lookup()
        .children()
        .map(rule_def)
        .collect::<Result<_>>()?;
    Ok(GrammarAst { rules })
}

fn malformed(expected: &'static str, node: &ParseNode) -> Error {
    Error::MalformedTree {
        expected,
        offset: node.offset(),
    }
}

fn label<'t>(node: &'t ParseNode, name: &'static str) -> Result<&'t ParseNode> {
    node.find_label(name).ok_or_else(|| malformed(name, node))
}

/// Children of a repetition, looking through rule lookups.
fn repeated<'t>(node: &'t ParseNode, what: &'static str) -> Result<&'t [ParseNode]> {
    match node.unwrap_lookup() {
        ParseNode::Quantifier { children, .. } => Ok(children),
        other => Err(malformed(what, other)),
    }
}

/// First child of a sequence or choice, looking through rule lookups.
fn first<'t>(node: &'t ParseNode, what: &'static str) -> Result<&'t ParseNode> {
    node.unwrap_lookup()
        .children()
        .next()
        .ok_or_else(|| malformed(what, node))
}

fn token(node: &ParseNode, what: &'static str) -> Result<Token> {
    match node.unwrap_lookup() {
        ParseNode::Value { offset, text } => Ok(Token {
            text: text.clone(),
            span: Span::new(*offset, offset + text.len()),
        }),
        other => Err(malformed(what, other)),
    }
}

fn rule_def(node: &ParseNode) -> Result<RuleDef> {
    let rule = node.unwrap_lookup();
    let name = token(label(rule, "name")?, "rule name")?;

    let body = first(label(rule, "body")?, "rule body")?;
    let body = match body {
        ParseNode::Lookup { key, .. } if key == "table" => Body::Table(table(body)?),
        _ => Body::Choice(choice(body)?),
    };
    Ok(RuleDef { name, body })
}

fn table(node: &ParseNode) -> Result<TableDef> {
    let table = node.unwrap_lookup();
    let operators = repeated(label(table, "operators")?, "operators")?
        .iter()
        .map(|entry| operator(first(entry, "operator")?))
        .collect::<Result<_>>()?;
    Ok(TableDef {
        span: table.extent(),
        operators,
    })
}

fn operator(node: &ParseNode) -> Result<OperatorDef> {
    let op = node.unwrap_lookup();
    Ok(OperatorDef {
        name: token(label(op, "name")?, "operator name")?,
        left: precedence(label(op, "left")?)?,
        right: precedence(label(op, "right")?)?,
        pattern: choice(label(op, "pattern")?)?,
    })
}

/// `None` for `none`, the digits otherwise.
fn precedence(node: &ParseNode) -> Result<Option<Token>> {
    let token = token(first(node, "precedence")?, "precedence")?;
    Ok((token.text != "none").then_some(token))
}

fn choice(node: &ParseNode) -> Result<ChoiceExpr> {
    let choice = node.unwrap_lookup();
    let mut children = choice.children();

    let head = children.next().ok_or_else(|| malformed("sequence", choice))?;
    let mut alternatives = vec![sequence(head)?];
    if let Some(tail) = children.next() {
        for alternative in repeated(tail, "alternatives")? {
            alternatives.push(sequence(first(alternative, "sequence")?)?);
        }
    }
    Ok(ChoiceExpr { alternatives })
}

fn sequence(node: &ParseNode) -> Result<SequenceExpr> {
    let terms = repeated(node, "terms")?
        .iter()
        .map(|step| term(first(step, "term")?))
        .collect::<Result<_>>()?;
    Ok(SequenceExpr { terms })
}

fn term(node: &ParseNode) -> Result<Term> {
    let term = node.unwrap_lookup();

    let label_name = match repeated(label(term, "label")?, "label")?.first() {
        Some(entry) => Some(token(first(entry, "label name")?, "label name")?),
        None => None,
    };

    let prefix = match optional_symbol(label(term, "prefix")?)? {
        None => None,
        Some("!") => Some(Prefix::Not),
        Some(_) => Some(Prefix::And),
    };

    let suffix = match optional_symbol(label(term, "suffix")?)? {
        None => None,
        Some("?") => Some(Suffix::Optional),
        Some("*") => Some(Suffix::Star),
        Some(_) => Some(Suffix::Plus),
    };

    Ok(Term {
        label: label_name,
        prefix,
        atom: atom(label(term, "atom")?)?,
        suffix,
    })
}

/// Text of an optional choice between single-character literals.
fn optional_symbol(node: &ParseNode) -> Result<Option<&str>> {
    let Some(choice) = repeated(node, "symbol")?.first() else {
        return Ok(None);
    };
    let symbol = first(choice, "symbol")?;
    symbol
        .text()
        .map(Some)
        .ok_or_else(|| malformed("symbol", symbol))
}

fn atom(node: &ParseNode) -> Result<Atom> {
    let atom = first(node, "atom")?;
    match atom {
        ParseNode::Lookup { key, .. } => match key.as_str() {
            "regex" => Ok(Atom::Regex(token(atom, "regex")?)),
            "literal" => Ok(Atom::Literal(token(atom, "literal")?)),
            "ident" => Ok(Atom::Rule(token(atom, "rule name")?)),
            _ => Err(malformed("atom", atom)),
        },
        ParseNode::Sequence { .. } => Ok(Atom::Group(choice(first(atom, "group")?)?)),
        other => Err(malformed("atom", other)),
    }
}

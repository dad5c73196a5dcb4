//! Lowering of a validated grammar to engine patterns.

use prattle_engine::{OperatorInfo, Pattern, PatternError, Rules, Step};

use super::ast::{
    Atom, Body, ChoiceExpr, GrammarAst, OperatorDef, Prefix, SequenceExpr, Suffix, Term, Token,
};

pub fn lower(ast: &GrammarAst) -> Result<Rules, PatternError> {
    let mut rules = Rules::new();
    for rule in &ast.rules {
        let pattern = match &rule.body {
            Body::Choice(choice) => lower_choice(choice)?,
            Body::Table(table) => Pattern::expression(
                table
                    .operators
                    .iter()
                    .map(lower_operator)
                    .collect::<Result<_, _>>()?,
            )?,
        };
        rules.insert(rule.name.text.clone(), pattern);
    }
    Ok(rules)
}

fn lower_operator(op: &OperatorDef) -> Result<OperatorInfo, PatternError> {
    Ok(OperatorInfo::new(
        op.name.unescaped(),
        precedence(op.left.as_ref()),
        precedence(op.right.as_ref()),
        lower_choice(&op.pattern)?,
    ))
}

/// Out-of-range numbers are rejected by validation before lowering.
fn precedence(token: Option<&Token>) -> Option<u32> {
    token.and_then(|token| token.text.parse().ok())
}

fn lower_choice(choice: &ChoiceExpr) -> Result<Pattern, PatternError> {
    let mut alternatives = choice
        .alternatives
        .iter()
        .map(lower_sequence)
        .collect::<Result<Vec<_>, _>>()?;
    if alternatives.len() == 1
        && let Some(single) = alternatives.pop()
    {
        return Ok(single);
    }
    Pattern::choice(alternatives)
}

fn lower_sequence(sequence: &SequenceExpr) -> Result<Pattern, PatternError> {
    if let [single] = sequence.terms.as_slice() {
        return lower_term(single);
    }

    let keep_all = sequence.terms.iter().all(Term::is_discardable);
    let steps = sequence
        .terms
        .iter()
        .map(|term| -> Result<Step, PatternError> {
            let pattern = lower_term(term)?;
            Ok(if keep_all || !term.is_discardable() {
                Step::keep(pattern)
            } else {
                Step::skip(pattern)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Pattern::sequence(steps)
}

fn lower_term(term: &Term) -> Result<Pattern, PatternError> {
    let mut pattern = match &term.atom {
        Atom::Regex(token) => Pattern::regex(&token.unescaped())?,
        Atom::Literal(token) => Pattern::literal(token.unescaped()),
        Atom::Group(choice) => lower_choice(choice)?,
        Atom::Rule(token) => Pattern::lookup(token.text.clone()),
    };

    pattern = match term.suffix {
        None => pattern,
        Some(Suffix::Optional) => pattern.optional(),
        Some(Suffix::Star) => pattern.star(),
        Some(Suffix::Plus) => pattern.plus(),
    };

    pattern = match term.prefix {
        None => pattern,
        Some(Prefix::Not) => pattern.not(),
        Some(Prefix::And) => pattern.and(),
    };

    if let Some(label) = &term.label {
        pattern = pattern.label(label.unescaped());
    }
    Ok(pattern)
}

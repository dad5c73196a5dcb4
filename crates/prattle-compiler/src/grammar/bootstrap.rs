//! The grammar language, hand-assembled from combinators.
//!
//! [`base_rules`] is the seed that parses grammar text before any grammar
//! has been compiled. It must build exactly what compiling
//! [`BOOTSTRAP_GRAMMAR`] builds, down to which sequence steps are kept.

use prattle_engine::{Pattern, PatternError, Rules, Step, TRIVIA_RULE};

/// Grammar of the grammar language, in its own notation.
pub const BOOTSTRAP_GRAMMAR: &str = r#"# Grammar of Prattle grammars.
_ -> `(?:\s|#[^\n]*)*`
grammar -> rule+
rule -> 'name':ident '->' 'body':(table / choice)
table -> '[' 'operators':(operator ','?)* ']'
operator -> 'name':literal 'left':precedence 'right':precedence 'pattern':choice
precedence -> `\d+` / 'none'
choice -> sequence ('/' sequence)*
sequence -> (!(ident '->') term)+
term -> 'label':(literal ':')? 'prefix':('!' / '&')? 'atom':atom 'suffix':('?' / '*' / '+')?
atom -> regex / literal / '(' choice ')' / ident
ident -> `[A-Za-z_][A-Za-z0-9_]*`
literal -> `'(?:[^']|'')*'`
regex -> `\x60(?:[^\x60]|\x60\x60)*\x60`
"#;

/// Rule that matches a whole grammar text.
pub const GRAMMAR_RULE: &str = "grammar";

fn lit(text: &str) -> Pattern {
    Pattern::literal(text)
}

fn rule(name: &str) -> Pattern {
    Pattern::lookup(name)
}

fn keep(pattern: Pattern) -> Step {
    Step::keep(pattern)
}

fn skip(pattern: Pattern) -> Step {
    Step::skip(pattern)
}

pub fn base_rules() -> Result<Rules, PatternError> {
    let mut rules = Rules::new();

    rules.insert(TRIVIA_RULE, Pattern::regex(r"(?:\s|#[^\n]*)*")?);
    rules.insert(GRAMMAR_RULE, rule("rule").plus());
    rules.insert(
        "rule",
        Pattern::sequence([
            keep(rule("ident").label("name")),
            skip(lit("->")),
            keep(Pattern::choice([rule("table"), rule("choice")])?.label("body")),
        ])?,
    );
    rules.insert(
        "table",
        Pattern::sequence([
            skip(lit("[")),
            keep(
                Pattern::sequence([keep(rule("operator")), skip(lit(",").optional())])?
                    .star()
                    .label("operators"),
            ),
            skip(lit("]")),
        ])?,
    );
    rules.insert(
        "operator",
        Pattern::sequence([
            keep(rule("literal").label("name")),
            keep(rule("precedence").label("left")),
            keep(rule("precedence").label("right")),
            keep(rule("choice").label("pattern")),
        ])?,
    );
    rules.insert(
        "precedence",
        Pattern::choice([Pattern::regex(r"\d+")?, lit("none")])?,
    );
    rules.insert(
        "choice",
        Pattern::sequence([
            keep(rule("sequence")),
            keep(Pattern::sequence([skip(lit("/")), keep(rule("sequence"))])?.star()),
        ])?,
    );
    // A rule head ends the body before it.
    rules.insert(
        "sequence",
        Pattern::sequence([
            skip(Pattern::sequence([keep(rule("ident")), skip(lit("->"))])?.not()),
            keep(rule("term")),
        ])?
        .plus(),
    );
    rules.insert(
        "term",
        Pattern::sequence([
            keep(
                Pattern::sequence([keep(rule("literal")), skip(lit(":"))])?
                    .optional()
                    .label("label"),
            ),
            keep(Pattern::choice([lit("!"), lit("&")])?.optional().label("prefix")),
            keep(rule("atom").label("atom")),
            keep(
                Pattern::choice([lit("?"), lit("*"), lit("+")])?
                    .optional()
                    .label("suffix"),
            ),
        ])?,
    );
    rules.insert(
        "atom",
        Pattern::choice([
            rule("regex"),
            rule("literal"),
            Pattern::sequence([skip(lit("(")), keep(rule("choice")), skip(lit(")"))])?,
            rule("ident"),
        ])?,
    );
    rules.insert("ident", Pattern::regex("[A-Za-z_][A-Za-z0-9_]*")?);
    rules.insert("literal", Pattern::regex("'(?:[^']|'')*'")?);
    rules.insert("regex", Pattern::regex(r"\x60(?:[^\x60]|\x60\x60)*\x60")?);

    Ok(rules)
}

use prattle_core::ParseNode;

use crate::{
    FuelLimits, NoopTracer, OperatorInfo, ParseError, Parser, ParserContext, Pattern, PatternError,
    Rules, Step,
};

fn lit(text: &str) -> Pattern {
    Pattern::literal(text)
}

fn re(pattern: &str) -> Pattern {
    Pattern::regex(pattern).unwrap()
}

fn seq(steps: Vec<Step>) -> Pattern {
    Pattern::sequence(steps).unwrap()
}

fn choice(alternatives: Vec<Pattern>) -> Pattern {
    Pattern::choice(alternatives).unwrap()
}

fn parse(pattern: &Pattern, source: &str) -> Result<ParseNode, ParseError> {
    let rules = Rules::new();
    Parser::new(&rules).parse(pattern, source)
}

fn expected(error: ParseError) -> (usize, Vec<String>) {
    match error {
        ParseError::UnexpectedToken { offset, expected } => (offset, expected),
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
}

#[test]
fn regex_terminal() {
    let digit = re(r"\d");

    assert_eq!(parse(&digit, "7").unwrap(), ParseNode::value(0, "7"));

    let (offset, expected) = expected(parse(&digit, "a").unwrap_err());
    assert_eq!(offset, 0);
    assert_eq!(expected, [r"`\d`"]);
}

#[test]
fn regex_is_greedy_and_anchored() {
    let number = re(r"\d+");
    assert_eq!(parse(&number, "1234").unwrap().text(), Some("1234"));

    let (offset, _) = expected(parse(&number, " 12").unwrap_err());
    assert_eq!(offset, 0);
}

#[test]
fn zero_length_terminal_match_is_legal() {
    let digits = re(r"\d*");
    assert_eq!(parse(&digits, "").unwrap(), ParseNode::value(0, ""));
}

#[test]
fn invalid_regex_is_construction_error() {
    let err = Pattern::regex("(a").unwrap_err();
    assert!(matches!(err, PatternError::InvalidRegex { .. }));
}

#[test]
fn sequence_keeps_only_kept_steps() {
    let call = seq(vec![
        Step::keep(re("[a-z]+")),
        Step::skip(lit("(")),
        Step::keep(re(r"\d+")),
        Step::skip(lit(")")),
    ]);

    let tree = parse(&call, "f(42)").unwrap();
    assert_eq!(
        tree,
        ParseNode::Sequence {
            offset: 0,
            children: vec![ParseNode::value(0, "f"), ParseNode::value(2, "42")],
        }
    );
}

#[test]
fn sequence_that_discards_everything_is_rejected() {
    let err = Pattern::sequence([Step::skip(lit("a")), Step::skip(lit("b"))]).unwrap_err();
    assert_eq!(err, PatternError::AllStepsDiscarded);
}

#[test]
fn sequence_failure_reports_furthest_step() {
    let abc = seq(vec![lit("a").into(), lit("b").into(), lit("c").into()]);

    let (offset, expected) = expected(parse(&abc, "abx").unwrap_err());
    assert_eq!(offset, 2);
    assert_eq!(expected, ["'c'"]);
}

#[test]
fn choice_backtracks_between_alternatives() {
    let ab_or_ac = choice(vec![
        seq(vec![lit("a").into(), lit("b").into()]),
        seq(vec![lit("a").into(), lit("c").into()]),
    ]);

    let tree = parse(&ab_or_ac, "ac").unwrap();
    let ParseNode::Choice {
        chosen_index,
        child,
        ..
    } = tree
    else {
        panic!("expected a choice node");
    };
    assert_eq!(chosen_index, 1);
    assert_eq!(child.values(), ["a", "c"]);
}

#[test]
fn choice_commits_to_first_success() {
    let short_first = choice(vec![lit("a"), lit("ab")]);

    let (offset, expected) = expected(parse(&short_first, "ab").unwrap_err());
    assert_eq!(offset, 1);
    assert_eq!(expected, ["end of input"]);
}

#[test]
fn choice_merges_expectations_at_same_offset() {
    let abc = choice(vec![lit("a"), lit("b"), re("[0-9]")]);

    let (offset, expected) = expected(parse(&abc, "?").unwrap_err());
    assert_eq!(offset, 0);
    assert_eq!(expected, ["'a'", "'b'", "`[0-9]`"]);
}

#[test]
fn empty_choice_is_rejected() {
    let err = Pattern::choice(Vec::new()).unwrap_err();
    assert_eq!(err, PatternError::EmptyChoice);
}

#[test]
fn quantifier_bounds() {
    let two_or_three = lit("a").repeat(2, Some(3)).unwrap();

    assert!(parse(&two_or_three, "a").is_err());
    assert_eq!(parse(&two_or_three, "aa").unwrap().values(), ["a", "a"]);
    assert_eq!(parse(&two_or_three, "aaa").unwrap().values(), ["a", "a", "a"]);

    // The fourth `a` is left over.
    let (offset, _) = expected(parse(&two_or_three, "aaaa").unwrap_err());
    assert_eq!(offset, 3);
}

#[test]
fn quantifier_rejects_min_above_max() {
    let err = lit("a").repeat(3, Some(1)).unwrap_err();
    assert_eq!(err, PatternError::InvalidRepetition { min: 3, max: 1 });
}

#[test]
fn star_matches_nothing() {
    let tree = parse(&lit("a").star(), "").unwrap();
    assert_eq!(
        tree,
        ParseNode::Quantifier {
            offset: 0,
            children: vec![],
        }
    );
}

#[test]
fn unbounded_zero_length_repetition_is_fatal() {
    let looping = lit("a").optional().star();

    let err = parse(&looping, "b").unwrap_err();
    assert_eq!(err, ParseError::ZeroLengthMatch { offset: 0 });
    assert!(err.is_fatal());
}

#[test]
fn fatal_error_wins_over_furthest() {
    let pattern = choice(vec![
        seq(vec![lit("x").into(), lit("y").into(), lit("z").into()]),
        seq(vec![lit("x").into(), lit("q").optional().star().into()]),
    ]);

    // The first alternative fails further (at 2) than the loop aborts (at 1).
    let err = parse(&pattern, "xyw").unwrap_err();
    assert_eq!(err, ParseError::ZeroLengthMatch { offset: 1 });
}

#[test]
fn bounded_zero_length_repetition_is_fine() {
    let pattern = lit("a").optional().repeat(0, Some(3)).unwrap();
    let tree = parse(&pattern, "").unwrap();
    assert_eq!(tree.children().count(), 3);
}

#[test]
fn failed_match_restores_cursor() {
    let mut rules = Rules::new();
    rules.insert("digit", re(r"\d"));

    let sum = Pattern::expression(vec![
        OperatorInfo::nullary("ident", re("[a-z]+")),
        OperatorInfo::infix("+", 1, 1, lit("+")),
    ])
    .unwrap();
    let failing = [
        ("regex", re(r"\d")),
        ("literal", lit("abc")),
        (
            "sequence",
            seq(vec![Step::keep(lit("a")), Step::keep(lit("b")), Step::keep(lit("c"))]),
        ),
        (
            "choice",
            choice(vec![seq(vec![Step::keep(lit("a")), Step::keep(lit("c"))]), lit("b")]),
        ),
        ("quantifier", re("[a-z]").repeat(3, None).unwrap()),
        ("lookup", Pattern::lookup("digit")),
        ("expression", sum),
        ("and", lit("b").and()),
        ("not", lit("ab").not()),
        ("label", re(r"\d").label("n")),
    ];

    // Cursor starts on `a`, past unrelated input.
    let source = "xxab+";
    for (kind, pattern) in &failing {
        let mut tracer = NoopTracer;
        let mut ctx =
            ParserContext::new(&rules, source, 2..source.len(), FuelLimits::new(), &mut tracer);
        assert!(pattern.try_match(&mut ctx).is_none(), "{kind} matched");
        assert!(!ctx.is_aborted(), "{kind} aborted");
        assert_eq!(ctx.offset(), 2, "{kind} moved the cursor");
    }
}

#[test]
fn label_wraps_child() {
    let named = re("[a-z]+").label("name");
    assert_eq!(
        parse(&named, "abc").unwrap(),
        ParseNode::Label {
            offset: 0,
            name: "name".into(),
            child: Box::new(ParseNode::value(0, "abc")),
        }
    );
}

#[test]
fn negative_lookahead() {
    let not_keyword = seq(vec![Step::skip(lit("if").not()), Step::keep(re("[a-z]+"))]);

    assert_eq!(parse(&not_keyword, "iffy").unwrap_err().offset(), 0);
    assert_eq!(parse(&not_keyword, "else").unwrap().values(), ["else"]);
}

#[test]
fn positive_lookahead_consumes_nothing() {
    let pattern = seq(vec![Step::keep(lit("a").and()), Step::keep(re("[a-z]+"))]);

    let tree = parse(&pattern, "abc").unwrap();
    assert_eq!(
        tree,
        ParseNode::Sequence {
            offset: 0,
            children: vec![
                ParseNode::Lookahead {
                    offset: 0,
                    child: Some(Box::new(ParseNode::value(0, "a"))),
                },
                ParseNode::value(0, "abc"),
            ],
        }
    );
}

#[test]
fn lookahead_failures_are_not_reported() {
    // `!'a'` fails quietly, so the error comes from the choice's other side.
    let pattern = choice(vec![
        seq(vec![Step::skip(lit("a").not()), Step::keep(lit("b"))]),
        lit("c"),
    ]);

    let (offset, expected) = expected(parse(&pattern, "a").unwrap_err());
    assert_eq!(offset, 0);
    assert_eq!(expected, ["'c'"]);
}

#[test]
fn lookup_resolves_rules_at_match_time() {
    let mut rules = Rules::new();
    rules.insert("list", seq(vec![
        Step::skip(lit("(")),
        Step::keep(Pattern::lookup("item").star()),
        Step::skip(lit(")")),
    ]));
    rules.insert("item", choice(vec![re("[a-z]"), Pattern::lookup("list")]));

    let tree = Parser::new(&rules).parse("list", "(a(b)c)").unwrap();
    assert_eq!(tree.values(), ["a", "b", "c"]);

    // Parsing by rule name does not wrap the result in a lookup.
    assert_eq!(tree.kind_name(), "Sequence");
    let first_item = tree.children().next().unwrap().children().next().unwrap();
    assert_eq!(first_item.kind_name(), "Lookup");
}

#[test]
fn undefined_rule_is_fatal() {
    let pattern = choice(vec![Pattern::lookup("missing"), lit("x")]);

    let err = parse(&pattern, "x").unwrap_err();
    assert_eq!(
        err,
        ParseError::UndefinedRule {
            offset: 0,
            name: "missing".into(),
        }
    );

    let rules = Rules::new();
    let err = Parser::new(&rules).parse("start", "x").unwrap_err();
    assert!(matches!(err, ParseError::UndefinedRule { .. }));
}

fn spaced_rules() -> Rules {
    let mut rules = Rules::new();
    rules.insert("_", re(r"\s*"));
    rules.insert("pair", seq(vec![
        re("[a-z]+").label("key").into(),
        Step::skip(lit("=")),
        re("[0-9]+").label("value").into(),
    ]));
    rules
}

#[test]
fn trivia_is_skipped_before_terminals() {
    let rules = spaced_rules();

    let tree = Parser::new(&rules).parse("pair", "  a =  42  ").unwrap();
    assert_eq!(tree.offset(), 2);
    assert_eq!(tree.find_label("key"), Some(&ParseNode::value(2, "a")));
    assert_eq!(tree.find_label("value"), Some(&ParseNode::value(7, "42")));
}

#[test]
fn trivia_offsets_in_errors() {
    let rules = spaced_rules();

    let (offset, expected) = expected(Parser::new(&rules).parse("pair", "a   ?").unwrap_err());
    assert_eq!(offset, 4);
    assert_eq!(expected, ["'='"]);
}

#[test]
fn parse_range_uses_absolute_offsets() {
    let rules = spaced_rules();

    let source = "skip me; b=1; rest";
    let tree = Parser::new(&rules).parse_range("pair", source, 9..12).unwrap();
    assert_eq!(tree.find_label("key"), Some(&ParseNode::value(9, "b")));
    assert_eq!(tree.find_label("value"), Some(&ParseNode::value(11, "1")));
}

#[test]
fn exec_fuel_exhaustion() {
    let rules = Rules::new();
    let pattern = lit("a").star();

    let err = Parser::new(&rules)
        .exec_fuel(3)
        .parse(&pattern, "aaaa")
        .unwrap_err();
    assert_eq!(err, ParseError::ExecFuelExhausted { offset: 2 });

    assert!(Parser::new(&rules).exec_fuel(100).parse(&pattern, "aaaa").is_ok());
}

#[test]
fn recursion_limit_exceeded() {
    let mut rules = Rules::new();
    rules.insert("nest", choice(vec![
        seq(vec![lit("(").into(), Pattern::lookup("nest").into(), lit(")").into()]),
        lit("x"),
    ]));

    let err = Parser::new(&rules)
        .recursion_limit(2)
        .parse("nest", "((((x))))")
        .unwrap_err();
    assert_eq!(err, ParseError::RecursionLimitExceeded { offset: 3 });

    assert!(Parser::new(&rules).recursion_limit(8).parse("nest", "((((x))))").is_ok());
}

#[test]
fn references_in_order() {
    let pattern = seq(vec![
        Pattern::lookup("a").into(),
        choice(vec![Pattern::lookup("b"), lit("x")]).star().into(),
        Pattern::lookup("c").not().into(),
    ]);
    assert_eq!(pattern.references(), ["a", "b", "c"]);
}

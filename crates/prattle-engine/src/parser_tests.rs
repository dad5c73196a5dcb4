use prattle_core::ParseNode;

use crate::{FuelLimits, ParseError, Parser, Pattern, Rules, Start};

fn word_rules() -> Rules {
    let mut rules = Rules::new();
    rules.insert("word", Pattern::regex("[a-z]+").unwrap());
    rules
}

#[test]
fn fuel_limits_builder() {
    let limits = FuelLimits::new();
    assert_eq!(limits.get_exec_fuel(), None);
    assert_eq!(limits.get_recursion_limit(), None);

    let limits = limits.exec_fuel(10).recursion_limit(4);
    assert_eq!(limits.get_exec_fuel(), Some(10));
    assert_eq!(limits.get_recursion_limit(), Some(4));
}

#[test]
fn start_conversions() {
    let name = String::from("word");
    assert!(matches!(Start::from("word"), Start::Rule("word")));
    assert!(matches!(Start::from(&name), Start::Rule("word")));

    let pattern = Pattern::literal("x");
    assert!(matches!(Start::from(&pattern), Start::Pattern(_)));
}

#[test]
fn parse_by_rule_name_or_pattern() {
    let rules = word_rules();
    let mut parser = Parser::new(&rules);

    assert_eq!(parser.parse("word", "abc").unwrap().text(), Some("abc"));

    let lookup = Pattern::lookup("word");
    let tree = parser.parse(&lookup, "abc").unwrap();
    assert_eq!(tree.kind_name(), "Lookup");
    assert_eq!(tree.unwrap_lookup().text(), Some("abc"));
}

#[test]
fn leftover_input_expects_end() {
    let rules = word_rules();
    let err = Parser::new(&rules).parse("word", "abc1").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            offset: 3,
            expected: vec!["end of input".into()],
        }
    );
    assert!(!err.is_fatal());
    assert_eq!(err.offset(), 3);
}

#[test]
fn parse_range_is_clamped() {
    let rules = word_rules();
    let tree = Parser::new(&rules).parse_range("word", "xyz", 1..99).unwrap();
    assert_eq!(tree.offset(), 1);
    assert_eq!(tree.text(), Some("yz"));
}

#[test]
fn parse_range_snaps_to_char_boundaries() {
    let rules = Rules::new();
    let any = Pattern::regex(".+").unwrap();
    let tree = Parser::new(&rules).parse_range(&any, "aéz", 2..4).unwrap();
    assert_eq!(tree, ParseNode::value(1, "éz"));
}

#[test]
fn limits_apply_through_parser() {
    let rules = word_rules();
    let pattern = Pattern::literal("a").star();
    let err = Parser::new(&rules)
        .limits(FuelLimits::new().exec_fuel(1))
        .parse(&pattern, "aa")
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, ParseError::ExecFuelExhausted { .. }));
}

#[test]
fn error_messages() {
    let expected = |items: &[&str]| ParseError::UnexpectedToken {
        offset: 0,
        expected: items.iter().map(|s| s.to_string()).collect(),
    };
    assert_eq!(expected(&[]).message(), "expected more input");
    assert_eq!(expected(&["'a'"]).message(), "expected 'a'");
    assert_eq!(
        expected(&["'a'", "'b'", "'c'"]).message(),
        "expected 'a', 'b' or 'c'"
    );
    assert_eq!(
        ParseError::UndefinedRule {
            offset: 4,
            name: "x".into()
        }
        .to_string(),
        "reference to undefined rule `x` at 4"
    );
}

#[test]
fn render_points_at_offset() {
    let err = ParseError::UnexpectedToken {
        offset: 7,
        expected: vec!["','".into(), "')'".into()],
    };
    insta::assert_snapshot!(err.render("max(1,2"), @r"
    error: expected ',' or ')'
      |
    1 | max(1,2
      |        ^
    ");
}

#[test]
fn render_on_later_line() {
    let err = ParseError::ExpressionTerm { offset: 4 };
    insta::assert_snapshot!(err.render("a\nb ?\nc"), @r"
    error: expected an expression term
      |
    2 | b ?
      |   ^
    ");
}

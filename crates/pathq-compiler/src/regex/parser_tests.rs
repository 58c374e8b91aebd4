use insta::assert_snapshot;

use super::{Regex, parse_regex};

fn display(source: &str) -> String {
    match parse_regex(source) {
        Ok(regex) => regex.to_string(),
        Err(diagnostics) => diagnostics.to_string(),
    }
}

#[test]
fn juxtaposition_and_dot_concatenate() {
    assert_eq!(
        parse_regex("a b").unwrap(),
        Regex::symbol("a").concat(Regex::symbol("b"))
    );
    assert_eq!(parse_regex("a.b").unwrap(), parse_regex("a b").unwrap());
}

#[test]
fn alternation_binds_loosest() {
    assert_eq!(
        parse_regex("a b | c").unwrap(),
        Regex::symbol("a")
            .concat(Regex::symbol("b"))
            .union(Regex::symbol("c"))
    );
    assert_eq!(parse_regex("a + c").unwrap(), parse_regex("a | c").unwrap());
}

#[test]
fn star_binds_tightest() {
    assert_eq!(
        parse_regex("a b*").unwrap(),
        Regex::symbol("a").concat(Regex::symbol("b").star())
    );
    assert_eq!(
        parse_regex("(a b)*").unwrap(),
        Regex::symbol("a").concat(Regex::symbol("b")).star()
    );
}

#[test]
fn multi_character_symbols() {
    assert_eq!(
        parse_regex("subClassOf_r type").unwrap().symbols(),
        vec!["subClassOf_r", "type"]
    );
}

#[test]
fn empty_text_is_empty_language() {
    assert_eq!(parse_regex("").unwrap(), Regex::Empty);
    assert_eq!(parse_regex("   ").unwrap(), Regex::Empty);
}

#[test]
fn epsilon_markers() {
    assert_eq!(parse_regex("epsilon").unwrap(), Regex::Epsilon);
    assert_eq!(parse_regex("$").unwrap(), Regex::Epsilon);
}

#[test]
fn display_round_trips_precedence() {
    assert_snapshot!(display("(a | b) c*"), @"(a | b) c*");
    assert_snapshot!(display("a | b c"), @"a | b c");
    assert_snapshot!(display("(a b)* | $"), @"(a b)* | $");
}

#[test]
fn unclosed_paren() {
    assert_snapshot!(display("(a b"), @"error at 4..4: missing closing `)` (related: opened here at 0..1)");
}

#[test]
fn dangling_alternation() {
    assert_snapshot!(display("a |"), @"error at 3..3: expected an expression");
}

#[test]
fn stray_close_paren() {
    assert_snapshot!(display("a )"), @"error at 2..3: unexpected token; `)`");
}

#[test]
fn invalid_characters() {
    assert_snapshot!(display("a @@ b"), @"error at 2..4: invalid characters");
}

#[test]
fn nesting_limit() {
    let deep = format!("{}a{}", "(".repeat(300), ")".repeat(300));
    let diagnostics = parse_regex(&deep).unwrap_err();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.to_string().contains("nested too deeply"));
}

#[test]
fn rendered_diagnostic_points_at_source() {
    let diagnostics = parse_regex("(a b").unwrap_err();
    let rendered = diagnostics.render("(a b");
    assert!(rendered.starts_with("error: missing closing `)`"));
    assert!(rendered.contains("1 | (a b"));
}

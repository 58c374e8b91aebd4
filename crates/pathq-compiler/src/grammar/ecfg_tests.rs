use insta::assert_snapshot;

use super::{Ecfg, parse_ecfg, parse_grammar};
use crate::regex::Regex;

#[test]
fn bodies_are_regexes() {
    let ecfg = parse_ecfg("S -> a S b | epsilon\nA -> (x y)*").unwrap();
    assert_snapshot!(ecfg, @r"
    S -> a S b | $
    A -> (x y)*
    ");
}

#[test]
fn repeated_heads_union() {
    let ecfg = parse_ecfg("S -> a\nS -> b").unwrap();
    assert_eq!(
        ecfg.body("S"),
        Some(&Regex::symbol("a").union(Regex::symbol("b")))
    );
    assert_eq!(ecfg.productions().len(), 1);
}

#[test]
fn empty_body_is_epsilon() {
    let ecfg = parse_ecfg("S ->").unwrap();
    assert_eq!(ecfg.body("S"), Some(&Regex::Epsilon));
}

#[test]
fn from_grammar_matches_text_form() {
    let grammar = parse_grammar("S -> a S b | epsilon").unwrap();
    assert_eq!(
        Ecfg::from_grammar(&grammar),
        parse_ecfg("S -> a S b | epsilon").unwrap()
    );
}

#[test]
fn rsm_boxes_are_minimal_dfas() {
    let rsm = parse_ecfg("S -> a S b | epsilon").unwrap().to_rsm();
    assert_eq!(rsm.start(), "S");
    assert!(rsm.is_variable("S"));
    assert!(!rsm.is_variable("a"));

    let body = rsm.box_for("S").unwrap();
    assert!(body.accepts::<&str>(&[]));
    assert!(body.accepts(&["a", "S", "b"]));
    assert!(!body.accepts(&["a", "b"]));
}

#[test]
fn body_errors_point_into_the_line() {
    let err = parse_ecfg("S -> a\nA -> (b").unwrap_err();
    assert_snapshot!(err, @r"
    invalid grammar
    error at 14..14: missing closing `)` (related: opened here at 12..13)
    ");
}

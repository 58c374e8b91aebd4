use insta::assert_snapshot;
use pathq_core::{Grammar, GrammarSymbol, Production, Rule};

use super::{parse_grammar, to_weak_cnf};

fn normalize(source: &str) -> String {
    to_weak_cnf(&parse_grammar(source).unwrap())
        .unwrap()
        .to_string()
}

#[test]
fn already_weak_cnf_is_unchanged() {
    assert_snapshot!(normalize("S -> A B | epsilon\nA -> a\nB -> b"), @r"
    S -> A B
    S -> epsilon
    A -> a
    B -> b
    ");
}

#[test]
fn terminals_are_lifted_and_bodies_binarized() {
    assert_snapshot!(normalize("S -> a S b | epsilon"), @r"
    S -> a#T S#1
    S#1 -> S b#T
    S -> epsilon
    a#T -> a
    b#T -> b
    ");
}

#[test]
fn unit_chains_are_collapsed() {
    assert_snapshot!(normalize("S -> A\nA -> a | B\nB -> b"), @r"
    S -> a
    S -> b
    ");
}

#[test]
fn non_generating_symbols_are_removed() {
    assert_snapshot!(normalize("S -> a | A\nA -> A b"), @"S -> a");
}

#[test]
fn start_that_generates_nothing_gives_empty_grammar() {
    let cnf = to_weak_cnf(&parse_grammar("S -> S a").unwrap()).unwrap();
    assert!(cnf.is_empty());
    assert_eq!(cnf.start_id(), None);
}

#[test]
fn fresh_names_avoid_existing_symbols() {
    let variable = |name: &str| GrammarSymbol::Variable(name.to_owned());
    let terminal = |name: &str| GrammarSymbol::Terminal(name.to_owned());
    let grammar = Grammar::with_productions(
        "S",
        vec![
            Production::new("S", vec![terminal("a"), variable("S1")]),
            Production::new("S1", vec![variable("a#T")]),
            Production::new("a#T", vec![terminal("c")]),
        ],
    );
    let cnf = to_weak_cnf(&grammar).unwrap();
    assert_snapshot!(cnf, @r"
    S -> a#T'1 S1
    S1 -> c
    a#T'1 -> a
    ");
}

#[test]
fn every_rule_has_weak_cnf_shape() {
    let cnf = to_weak_cnf(&parse_grammar("S -> a b c d | S S S | A\nA -> epsilon | x A y").unwrap())
        .unwrap();
    assert!(!cnf.is_empty());
    for rule in cnf.rules() {
        match rule {
            Rule::Epsilon { .. } | Rule::Terminal { .. } | Rule::Binary { .. } => {}
        }
    }
    let round_trip = pathq_core::WeakCnf::from_grammar(&cnf.to_grammar()).unwrap();
    assert_eq!(round_trip.rule_count(), cnf.rule_count());
}

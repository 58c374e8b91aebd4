use crate::{Error, Grammar, GrammarSymbol, Production, Rule, WeakCnf};

fn var(name: &str) -> GrammarSymbol {
    GrammarSymbol::Variable(name.to_owned())
}

fn term(name: &str) -> GrammarSymbol {
    GrammarSymbol::Terminal(name.to_owned())
}

#[test]
fn production_display() {
    let p = Production::new("S", vec![term("a"), var("S"), term("b")]);
    assert_eq!(p.to_string(), "S -> a S b");
    assert_eq!(Production::new("S", vec![]).to_string(), "S -> epsilon");
}

#[test]
fn grammar_symbol_sets() {
    let grammar = Grammar::with_productions(
        "S",
        vec![
            Production::new("S", vec![term("a"), var("A")]),
            Production::new("A", vec![term("b")]),
        ],
    );

    assert_eq!(grammar.variables().into_iter().collect::<Vec<_>>(), ["A", "S"]);
    assert_eq!(grammar.terminals().into_iter().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn weak_cnf_from_well_shaped_grammar() {
    let grammar = Grammar::with_productions(
        "S",
        vec![
            Production::new("S", vec![]),
            Production::new("S", vec![var("A"), var("S")]),
            Production::new("A", vec![term("a")]),
        ],
    );
    let cnf = WeakCnf::from_grammar(&grammar).unwrap();

    let s = cnf.var_id("S").unwrap();
    let a = cnf.var_id("A").unwrap();
    assert_eq!(cnf.start_id(), Some(s));
    assert_eq!(cnf.variable_count(), 2);
    assert_eq!(cnf.name(a), "A");

    let rules: Vec<&Rule> = cnf.rules().collect();
    assert_eq!(
        rules,
        [
            &Rule::Epsilon { head: s },
            &Rule::Binary {
                head: s,
                left: a,
                right: s
            },
            &Rule::Terminal {
                head: a,
                terminal: "a".to_owned()
            },
        ]
    );
}

#[test]
fn weak_cnf_rejects_long_body() {
    let grammar = Grammar::with_productions(
        "S",
        vec![Production::new("S", vec![term("a"), var("S"), term("b")])],
    );

    let err = WeakCnf::from_grammar(&grammar).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedGrammar {
            head: "S".to_owned(),
            body: "a S b".to_owned()
        }
    );
    assert_eq!(err.to_string(), "malformed weak-CNF production `S -> a S b`");
}

#[test]
fn weak_cnf_rejects_mixed_pair() {
    let grammar =
        Grammar::with_productions("S", vec![Production::new("S", vec![term("a"), var("S")])]);
    assert!(matches!(
        WeakCnf::from_grammar(&grammar),
        Err(Error::MalformedGrammar { .. })
    ));
}

#[test]
fn weak_cnf_deduplicates_rules() {
    let mut cnf = WeakCnf::new("S");
    cnf.add_terminal("S", "a");
    cnf.add_terminal("S", "a");
    cnf.add_epsilon("S");

    assert_eq!(cnf.rule_count(), 2);
    assert_eq!(cnf.to_string(), "S -> a\nS -> epsilon\n");
}

#[test]
fn missing_start_symbol() {
    let mut cnf = WeakCnf::new("S");
    cnf.add_terminal("A", "a");
    assert_eq!(cnf.start_id(), None);
}

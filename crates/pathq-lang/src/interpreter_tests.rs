use indoc::{formatdoc, indoc};

use crate::{Env, Error, EvalError, Value, run};

fn output(source: &str) -> String {
    let mut out = Vec::new();
    if let Err(err) = run(source, &mut out) {
        panic!("{}", err.render(source, false));
    }
    String::from_utf8(out).unwrap()
}

fn env_of(source: &str) -> Env {
    run(source, std::io::sink()).unwrap()
}

fn error(source: &str) -> String {
    run(source, std::io::sink())
        .unwrap_err()
        .diagnostics()
        .to_string()
}

#[test]
fn prints_scalars() {
    insta::assert_snapshot!(output(r#"print 1; print "hi"; print true;"#), @r"
    1
    hi
    true
    ");
}

#[test]
fn bind_shadows_earlier_binding() {
    insta::assert_snapshot!(output(r#"bind x = 1; bind x = "two"; print x;"#), @"two");
}

#[test]
fn statements_thread_the_environment() {
    let env = env_of("bind a = 1; bind b = 2; bind a = 3;");
    assert_eq!(env.names(), ["a", "b"]);
    assert!(matches!(env.lookup("a"), Some(Value::Int(3))));
}

#[test]
fn bool_operators_use_payloads() {
    let source = indoc! {"
        print true && false;
        print false && false;
        print true || false;
        print false || false;
    "};
    insta::assert_snapshot!(output(source), @r"
    false
    false
    true
    false
    ");
}

#[test]
fn string_concatenation() {
    insta::assert_snapshot!(output(r#"print "ab" || "cd";"#), @"abcd");
}

#[test]
fn set_operators() {
    let source = indoc! {"
        print {1, 2} && {2, 3};
        print {1, 2} || {2, 3};
        print {3, 1, 2};
    "};
    insta::assert_snapshot!(output(source), @r"
    {1, 2, 3}
    {2}
    {1, 2, 3}
    ");
}

#[test]
fn membership_and_equality() {
    let source = indoc! {r#"
        print 2 in {1, 2};
        print "x" in {1, 2};
        print {1, 2} == {2, 1};
        print 1 != 2;
        print "a" == "a";
    "#};
    insta::assert_snapshot!(output(source), @r"
    true
    false
    true
    true
    true
    ");
}

#[test]
fn mixed_sets_print_in_order() {
    insta::assert_snapshot!(output(r#"print {"b", 2, "a", 1};"#), @r#"{1, 2, "a", "b"}"#);
}

#[test]
fn type_mismatch() {
    insta::assert_snapshot!(error(r#"print 1 == "a";"#), @"error at 6..14: type mismatch; `==` is not defined for int and string");
    insta::assert_snapshot!(error("print 1 && 2;"), @"error at 6..12: type mismatch; `&&` is not defined for int and int");
    insta::assert_snapshot!(error("print {true};"), @"error at 7..11: type mismatch; set elements are ints, strings or tuples, found bool");
    insta::assert_snapshot!(error("print 1 in 2;"), @"error at 6..12: type mismatch; `in` is not defined for int and int");
}

#[test]
fn unbound_variable() {
    insta::assert_snapshot!(error("print y;"), @"error at 6..7: unbound variable; `y`");
}

#[test]
fn parse_errors_stop_before_running() {
    let mut out = Vec::new();
    let err = run("print 1; print ;", &mut out).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert!(out.is_empty());
}

#[test]
fn map_and_filter() {
    let source = indoc! {r#"
        print map(lam (x) -> { x || "!" }, {"a", "b"});
        print filter(lam (x) -> { x in {1, 3} }, {1, 2, 3});
    "#};
    insta::assert_snapshot!(output(source), @r#"
    {"a!", "b!"}
    {1, 3}
    "#);
}

#[test]
fn lambdas_capture_their_environment() {
    let source = indoc! {"
        bind keep = {2};
        bind f = lam (x) -> { x in keep };
        bind keep = {1};
        print filter(f, {1, 2});
        print f;
    "};
    insta::assert_snapshot!(output(source), @r"
    {2}
    <lambda (x)>
    ");
}

#[test]
fn filter_needs_bool() {
    insta::assert_snapshot!(error("print filter(lam (x) -> { x }, {1});"), @"error at 26..27: type mismatch; `filter` predicate must return bool, found int");
}

#[test]
fn regex_strings_act_as_automata() {
    let source = indoc! {r#"
        bind q = "a b";
        print getStart(q);
        print getFinal(q);
        print getVertices(q);
        print getLabels(q);
        print getEdges(q);
        print getReachable(setStart(q, {1}));
    "#};
    insta::assert_snapshot!(output(source), @r#"
    {0}
    {2}
    {0, 1, 2}
    {"a", "b"}
    {(0, "a", 1), (1, "b", 2)}
    {1, 2}
    "#);
}

#[test]
fn automaton_display() {
    insta::assert_snapshot!(output(r#"print setStart("a b", {0});"#), @r#"automaton { states: {0, 1, 2}, start: {0}, final: {2}, edges: {(0, "a", 1), (1, "b", 2)} }"#);
}

#[test]
fn start_and_final_updates() {
    let source = indoc! {r#"
        bind q = "a";
        print getStart(addStart(q, {1}));
        print getFinal(setFinal(q, {0}));
        print getStart(setStart(q, {}));
    "#};
    insta::assert_snapshot!(output(source), @r"
    {0, 1}
    {0}
    {}
    ");
}

#[test]
fn automaton_concatenation() {
    let env = env_of(r#"bind c = setStart("a", {0}) || "b";"#);
    let Some(Value::Automaton(fa)) = env.lookup("c") else {
        panic!("expected automaton");
    };
    assert!(fa.accepts(&["a", "b"]));
    assert!(!fa.accepts(&["a"]));
    assert!(!fa.accepts(&["b"]));
}

#[test]
fn invalid_regex() {
    insta::assert_snapshot!(error(r#"bind q = getStart("(a");"#), @"error at 18..22: evaluation failed; invalid regex `(a`: missing closing `)`");
}

#[test]
fn load_and_query_a_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.txt");
    std::fs::write(&path, "0 a 1\n1 b 2\n").unwrap();

    let source = formatdoc! {r#"
        bind g = load("{}");
        print getEdges(g);
        print getReachable(setStart(g, {{1}}));
        bind p = setStart(g, {{0}}) && "a b";
        print getVertices(p);
        print getFinal(p);
    "#, path.display()};
    insta::assert_snapshot!(output(&source), @r#"
    {(0, "a", 1), (1, "b", 2)}
    {1, 2}
    {(0, 0), (1, 1), (2, 2)}
    {(2, 2)}
    "#);
}

#[test]
fn load_json_graph_with_named_vertices() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    std::fs::write(&path, r#"{"edges": [["x", "a", "y"], ["y", "a", 3]]}"#).unwrap();

    let source = format!(r#"print getVertices(load("{}"));"#, path.display());
    insta::assert_snapshot!(output(&source), @r#"{3, "x", "y"}"#);
}

#[test]
fn load_missing_file() {
    let err = run(r#"print load("/nonexistent/graph.txt");"#, std::io::sink()).unwrap_err();
    assert!(matches!(err, Error::Eval(EvalError::Io { .. })));
}

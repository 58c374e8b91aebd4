use std::collections::BTreeSet;

use pathq_compiler::{compile_regex, parse_grammar, to_weak_cnf};
use pathq_core::{Error as CoreError, Graph};

use crate::{
    CfpqMethod, Error, QueryOptions, RpqMethod, context_free_path_query, regular_path_query,
    regular_path_query_per_source,
};

fn pairs(items: &[(usize, usize)]) -> BTreeSet<(usize, usize)> {
    items.iter().copied().collect()
}

#[test]
fn star_query_on_single_edge() {
    let graph = Graph::from_edges([(0, "a", 1)]);
    for method in [RpqMethod::Closure, RpqMethod::Bfs] {
        let result = regular_path_query(&graph, "a*", &QueryOptions::new(), method).unwrap();
        assert!(result.contains(&(0, 0)));
        assert!(result.contains(&(0, 1)));
    }
}

#[test]
fn precompiled_automaton_query() {
    let graph = Graph::two_cycles(2, 1, ("a", "b"));
    let automaton = compile_regex("a b").unwrap();
    let result =
        regular_path_query(&graph, &automaton, &QueryOptions::new(), RpqMethod::Closure).unwrap();
    assert_eq!(result, pairs(&[(2, 3)]));
}

#[test]
fn vertex_filters_apply() {
    let graph = Graph::two_cycles(2, 1, ("a", "b"));
    let options = QueryOptions::new().with_starts([0]).with_finals([2, 99]);
    for method in [RpqMethod::Closure, RpqMethod::Bfs] {
        let result = regular_path_query(&graph, "a*", &options, method).unwrap();
        assert_eq!(result, pairs(&[(0, 2)]));
    }

    let per_source = regular_path_query_per_source(&graph, "a*", &options).unwrap();
    assert_eq!(per_source.len(), 1);
    assert_eq!(per_source[&0], BTreeSet::from([2]));
}

#[test]
fn malformed_regex_is_a_compile_error() {
    let graph = Graph::from_edges([(0, "a", 1)]);
    let err = regular_path_query(&graph, "(a", &QueryOptions::new(), RpqMethod::Bfs).unwrap_err();
    assert!(matches!(err, Error::Compile(_)));
}

#[test]
fn grammar_text_query() {
    let graph = Graph::two_cycles(2, 1, ("a", "b"));
    for method in [CfpqMethod::Worklist, CfpqMethod::Matrix] {
        let result = context_free_path_query(
            &graph,
            "S -> a b | a S1\nS1 -> S b",
            &QueryOptions::new(),
            method,
        )
        .unwrap();
        assert_eq!(result, pairs(&[(0, 0), (0, 3), (1, 0), (1, 3), (2, 0), (2, 3)]));
    }
}

#[test]
fn grammar_value_and_weak_cnf_queries_agree() {
    let graph = Graph::two_cycles(1, 1, ("a", "b"));
    let grammar = parse_grammar("S -> S b | epsilon").unwrap();
    let cnf = to_weak_cnf(&grammar).unwrap();
    let options = QueryOptions::new();

    let from_grammar = context_free_path_query(&graph, &grammar, &options, CfpqMethod::Worklist).unwrap();
    let from_cnf = context_free_path_query(&graph, &cnf, &options, CfpqMethod::Matrix).unwrap();
    assert_eq!(from_grammar, from_cnf);
    assert_eq!(from_grammar, pairs(&[(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)]));
}

#[test]
fn start_symbol_override() {
    let graph = Graph::from_edges([(0, "a", 1), (1, "b", 2)]);
    let options = QueryOptions::new().with_start_symbol("A");
    let result =
        context_free_path_query(&graph, "S -> A B\nA -> a\nB -> b", &options, CfpqMethod::Worklist)
            .unwrap();
    assert_eq!(result, pairs(&[(0, 1)]));
}

#[test]
fn cfpq_filters_endpoints() {
    let graph = Graph::two_cycles(1, 1, ("a", "b"));
    let options = QueryOptions::new().with_starts([1]).with_finals([0]);
    let result =
        context_free_path_query(&graph, "S -> a S | epsilon", &options, CfpqMethod::Matrix).unwrap();
    assert_eq!(result, pairs(&[(1, 0)]));
}

#[test]
fn cfpq_filters_tolerate_repeats_and_unknown_vertices() {
    let graph = Graph::two_cycles(1, 1, ("a", "b"));
    let options = QueryOptions::new()
        .with_starts([1, 1, 42])
        .with_finals([0, 1, 0]);
    for method in [CfpqMethod::Worklist, CfpqMethod::Matrix] {
        let result = context_free_path_query(&graph, "S -> a S | epsilon", &options, method).unwrap();
        assert_eq!(result, pairs(&[(1, 0), (1, 1)]));
    }
}

#[test]
fn empty_graph_is_not_an_error() {
    let graph = Graph::<usize>::new();
    let options = QueryOptions::new();
    assert!(regular_path_query(&graph, "a*", &options, RpqMethod::Closure).unwrap().is_empty());
    assert!(
        context_free_path_query(&graph, "S -> epsilon", &options, CfpqMethod::Worklist)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn methods_parse_by_name() {
    assert_eq!("bfs".parse::<RpqMethod>().unwrap(), RpqMethod::Bfs);
    assert_eq!("closure".parse::<RpqMethod>().unwrap(), RpqMethod::Closure);
    assert_eq!("hellings".parse::<CfpqMethod>().unwrap(), CfpqMethod::Worklist);
    assert_eq!("matrix".parse::<CfpqMethod>().unwrap(), CfpqMethod::Matrix);

    let err = "dfs".parse::<RpqMethod>().unwrap_err();
    assert_eq!(
        err,
        CoreError::UnknownAlgorithm {
            name: "dfs".to_owned(),
            expected: "closure, bfs"
        }
    );
    assert_eq!(
        "tensor".parse::<CfpqMethod>().unwrap_err().to_string(),
        "unknown algorithm `tensor` (expected one of: worklist, matrix)"
    );
}

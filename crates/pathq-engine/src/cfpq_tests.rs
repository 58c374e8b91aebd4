use std::collections::BTreeSet;

use indoc::indoc;
use pathq_compiler::{parse_grammar, to_weak_cnf};
use pathq_core::{Graph, VarId, WeakCnf};

use crate::trace::Tracer;
use crate::{AutomatonMatrix, Triple, hellings, hellings_with_tracer, matrix_cfpq};

fn cnf(source: &str) -> WeakCnf {
    to_weak_cnf(&parse_grammar(source).unwrap()).unwrap()
}

fn graph_matrix(graph: &Graph<usize>) -> AutomatonMatrix<usize> {
    AutomatonMatrix::from_automaton(&graph.to_automaton(None, None)).unwrap()
}

/// Start-symbol pairs from both solvers, checked to agree.
fn solve(graph: &Graph<usize>, source: &str) -> BTreeSet<(usize, usize)> {
    let grammar = cnf(source);
    let matrix = graph_matrix(graph);
    let worklist = hellings(&matrix, &grammar).unwrap();
    let fixed_point = matrix_cfpq(&matrix, &grammar).unwrap();
    assert_eq!(worklist, fixed_point);
    worklist
        .into_iter()
        .filter(|t| t.variable == grammar.start())
        .map(|t| (t.from, t.to))
        .collect()
}

fn pairs(items: &[(usize, usize)]) -> BTreeSet<(usize, usize)> {
    items.iter().copied().collect()
}

#[test]
fn epsilon_relates_every_vertex_to_itself() {
    let graph = Graph::two_cycles(1, 1, ("a", "b"));
    assert_eq!(solve(&graph, "S -> epsilon"), pairs(&[(0, 0), (1, 1), (2, 2)]));
}

#[test]
fn right_recursive_a_star() {
    let graph = Graph::two_cycles(1, 1, ("a", "b"));
    assert_eq!(
        solve(&graph, "S -> a S | epsilon"),
        pairs(&[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2)])
    );
}

#[test]
fn balanced_a_then_b() {
    let graph = Graph::two_cycles(2, 1, ("a", "b"));
    let grammar = indoc! {"
        S -> a b | a S1
        S1 -> S b
    "};
    assert_eq!(
        solve(&graph, grammar),
        pairs(&[(0, 0), (0, 3), (1, 0), (1, 3), (2, 0), (2, 3)])
    );
}

#[test]
fn left_recursive_b_star() {
    let graph = Graph::two_cycles(1, 1, ("a", "b"));
    assert_eq!(
        solve(&graph, "S -> S b | epsilon"),
        pairs(&[(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)])
    );
}

#[test]
fn triples_name_every_variable() {
    let graph = Graph::from_edges([(0, "a", 1), (1, "b", 2)]);
    let grammar = cnf("S -> A B\nA -> a\nB -> b");
    let triples = hellings(&graph_matrix(&graph), &grammar).unwrap();
    let expected: BTreeSet<Triple<usize>> = [(0, "A", 1), (1, "B", 2), (0, "S", 2)]
        .into_iter()
        .map(|(from, variable, to)| Triple {
            from,
            variable: variable.to_owned(),
            to,
        })
        .collect();
    assert_eq!(triples, expected);
}

#[test]
fn empty_graph_or_grammar_gives_nothing() {
    let empty = Graph::<usize>::new();
    assert!(solve(&empty, "S -> a S | epsilon").is_empty());

    let graph = Graph::two_cycles(1, 1, ("a", "b"));
    assert!(solve(&graph, "S -> S a").is_empty());
}

#[test]
fn unknown_terminals_are_ignored() {
    let graph = Graph::two_cycles(1, 1, ("a", "b"));
    assert!(solve(&graph, "S -> c").is_empty());
}

#[derive(Default)]
struct Recorder {
    totals: Vec<usize>,
    pops: usize,
}

impl Tracer for Recorder {
    fn trace_pop(&mut self, _from: u32, _variable: VarId, _to: u32) {
        self.pops += 1;
    }

    fn trace_derived(&mut self, _from: u32, _variable: VarId, _to: u32, total: usize) {
        self.totals.push(total);
    }

    fn trace_round(&mut self, _round: usize, _size: u64) {}
}

#[test]
fn worklist_result_only_grows() {
    let graph = Graph::two_cycles(3, 2, ("a", "b"));
    let grammar = cnf("S -> a S b | a b");
    let mut recorder = Recorder::default();
    let triples = hellings_with_tracer(&graph_matrix(&graph), &grammar, &mut recorder).unwrap();

    assert!(recorder.totals.windows(2).all(|w| w[1] == w[0] + 1));
    assert_eq!(recorder.totals.last().copied(), Some(triples.len()));
    // Every derived triple is popped exactly once.
    assert_eq!(recorder.pops, triples.len());
}

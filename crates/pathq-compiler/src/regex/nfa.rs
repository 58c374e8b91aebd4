//! Thompson construction: regex to ε-NFA.

use std::collections::BTreeSet;

use super::ast::Regex;

/// ε-NFA with a single start and a single accepting state.
///
/// `None` labels are ε-moves.
#[derive(Debug, Clone)]
pub(crate) struct EpsilonNfa {
    edges: Vec<Vec<(Option<String>, usize)>>,
    start: usize,
    accept: usize,
}

impl EpsilonNfa {
    pub(crate) fn from_regex(regex: &Regex) -> Self {
        let mut nfa = Self {
            edges: Vec::new(),
            start: 0,
            accept: 0,
        };
        let (start, accept) = nfa.build(regex);
        nfa.start = start;
        nfa.accept = accept;
        nfa
    }

    fn new_state(&mut self) -> usize {
        self.edges.push(Vec::new());
        self.edges.len() - 1
    }

    fn connect(&mut self, from: usize, label: Option<&str>, to: usize) {
        self.edges[from].push((label.map(str::to_owned), to));
    }

    fn build(&mut self, regex: &Regex) -> (usize, usize) {
        match regex {
            Regex::Empty => (self.new_state(), self.new_state()),
            Regex::Epsilon => {
                let (start, accept) = (self.new_state(), self.new_state());
                self.connect(start, None, accept);
                (start, accept)
            }
            Regex::Symbol(name) => {
                let (start, accept) = (self.new_state(), self.new_state());
                self.connect(start, Some(name), accept);
                (start, accept)
            }
            Regex::Concat(left, right) => {
                let (left_start, left_accept) = self.build(left);
                let (right_start, right_accept) = self.build(right);
                self.connect(left_accept, None, right_start);
                (left_start, right_accept)
            }
            Regex::Union(left, right) => {
                let start = self.new_state();
                let (left_start, left_accept) = self.build(left);
                let (right_start, right_accept) = self.build(right);
                let accept = self.new_state();
                self.connect(start, None, left_start);
                self.connect(start, None, right_start);
                self.connect(left_accept, None, accept);
                self.connect(right_accept, None, accept);
                (start, accept)
            }
            Regex::Star(inner) => {
                let start = self.new_state();
                let (inner_start, inner_accept) = self.build(inner);
                let accept = self.new_state();
                self.connect(start, None, inner_start);
                self.connect(start, None, accept);
                self.connect(inner_accept, None, inner_start);
                self.connect(inner_accept, None, accept);
                (start, accept)
            }
        }
    }

    pub(crate) fn start(&self) -> usize {
        self.start
    }

    pub(crate) fn accept(&self) -> usize {
        self.accept
    }

    pub(crate) fn state_count(&self) -> usize {
        self.edges.len()
    }

    /// Labels used by any transition, sorted.
    pub(crate) fn alphabet(&self) -> BTreeSet<&str> {
        self.edges
            .iter()
            .flatten()
            .filter_map(|(label, _)| label.as_deref())
            .collect()
    }

    /// ε-closure of a state set, as a sorted vector.
    pub(crate) fn epsilon_closure(&self, states: impl IntoIterator<Item = usize>) -> Vec<usize> {
        let mut seen = vec![false; self.state_count()];
        let mut stack: Vec<usize> = states.into_iter().collect();
        while let Some(state) = stack.pop() {
            if seen[state] {
                continue;
            }
            seen[state] = true;
            for (label, to) in &self.edges[state] {
                if label.is_none() && !seen[*to] {
                    stack.push(*to);
                }
            }
        }
        (0..seen.len()).filter(|&s| seen[s]).collect()
    }

    /// Direct successors on `label`, without closing over ε.
    pub(crate) fn step(&self, states: &[usize], label: &str) -> Vec<usize> {
        let mut targets = Vec::new();
        for &state in states {
            for (edge_label, to) in &self.edges[state] {
                if edge_label.as_deref() == Some(label) && !targets.contains(to) {
                    targets.push(*to);
                }
            }
        }
        targets
    }
}

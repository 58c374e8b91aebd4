//! Subset construction and Hopcroft minimization.
//!
//! The DFA is kept as a dense table indexed by state and by position in the
//! sorted alphabet. Missing entries are transitions to an implicit dead state.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use pathq_core::Automaton;

use super::ast::Regex;
use super::nfa::EpsilonNfa;

/// Deterministic automaton with a partial transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    alphabet: Vec<String>,
    delta: Vec<Vec<Option<usize>>>,
    start: Option<usize>,
    finals: Vec<bool>,
}

impl Dfa {
    fn empty(alphabet: Vec<String>) -> Self {
        Self {
            alphabet,
            delta: Vec::new(),
            start: None,
            finals: Vec::new(),
        }
    }

    /// Determinize a regex without minimizing.
    pub fn from_regex(regex: &Regex) -> Self {
        Self::from_nfa(&EpsilonNfa::from_regex(regex))
    }

    pub(crate) fn from_nfa(nfa: &EpsilonNfa) -> Self {
        let alphabet: Vec<String> = nfa.alphabet().into_iter().map(str::to_owned).collect();

        let mut subsets: IndexSet<Vec<usize>> = IndexSet::new();
        subsets.insert(nfa.epsilon_closure([nfa.start()]));

        let mut delta = Vec::new();
        let mut finals = Vec::new();
        let mut next = 0;
        while let Some(current) = subsets.get_index(next).cloned() {
            finals.push(current.contains(&nfa.accept()));
            let mut row = Vec::with_capacity(alphabet.len());
            for label in &alphabet {
                let moved = nfa.step(&current, label);
                if moved.is_empty() {
                    row.push(None);
                    continue;
                }
                let (target, _) = subsets.insert_full(nfa.epsilon_closure(moved));
                row.push(Some(target));
            }
            delta.push(row);
            next += 1;
        }

        Self {
            alphabet,
            delta,
            start: Some(0),
            finals,
        }
    }

    pub fn state_count(&self) -> usize {
        self.delta.len()
    }

    pub fn start(&self) -> Option<usize> {
        self.start
    }

    pub fn is_final(&self, state: usize) -> bool {
        self.finals.get(state).copied().unwrap_or(false)
    }

    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    /// Successor of `state` on `label`, `None` if the move leads nowhere.
    pub fn next(&self, state: usize, label: &str) -> Option<usize> {
        let column = self.alphabet.binary_search_by(|l| l.as_str().cmp(label)).ok()?;
        self.delta.get(state)?.get(column).copied().flatten()
    }

    pub fn accepts<L: AsRef<str>>(&self, word: &[L]) -> bool {
        let mut state = match self.start {
            Some(start) => start,
            None => return false,
        };
        for symbol in word {
            match self.next(state, symbol.as_ref()) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_final(state)
    }

    /// Drop states that are unreachable from the start or cannot reach a
    /// final state. A DFA accepting nothing becomes the zero-state DFA.
    pub fn trim(&self) -> Self {
        let Some(start) = self.start else {
            return Self::empty(self.alphabet.clone());
        };
        let n = self.state_count();

        let mut reachable = vec![false; n];
        let mut stack = vec![start];
        while let Some(state) = stack.pop() {
            if std::mem::replace(&mut reachable[state], true) {
                continue;
            }
            stack.extend(self.delta[state].iter().flatten().copied());
        }

        let mut predecessors = vec![Vec::new(); n];
        for (from, row) in self.delta.iter().enumerate() {
            for &to in row.iter().flatten() {
                predecessors[to].push(from);
            }
        }
        let mut productive = vec![false; n];
        let mut stack: Vec<usize> = (0..n).filter(|&s| self.finals[s]).collect();
        while let Some(state) = stack.pop() {
            if std::mem::replace(&mut productive[state], true) {
                continue;
            }
            stack.extend(predecessors[state].iter().copied());
        }

        if !(reachable[start] && productive[start]) {
            return Self::empty(self.alphabet.clone());
        }

        let kept: IndexSet<usize> = (0..n)
            .filter(|&s| reachable[s] && productive[s])
            .collect();
        let delta = kept
            .iter()
            .map(|&s| {
                self.delta[s]
                    .iter()
                    .map(|target| target.and_then(|t| kept.get_index_of(&t)))
                    .collect()
            })
            .collect();
        let finals = kept.iter().map(|&s| self.finals[s]).collect();

        Self {
            alphabet: self.alphabet.clone(),
            delta,
            start: kept.get_index_of(&start),
            finals,
        }
    }

    /// Minimal equivalent DFA, trimmed, with states numbered in BFS order
    /// from the start state.
    pub fn minimize(&self) -> Self {
        let trimmed = self.trim();
        let Some(start) = trimmed.start else {
            return trimmed;
        };

        let n = trimmed.state_count();
        let k = trimmed.alphabet.len();
        let sink = n;
        let total = n + 1;
        let target = |state: usize, column: usize| -> usize {
            if state == sink {
                sink
            } else {
                trimmed.delta[state][column].unwrap_or(sink)
            }
        };

        let mut inverse = vec![vec![Vec::new(); total]; k];
        for state in 0..total {
            for (column, sources) in inverse.iter_mut().enumerate() {
                sources[target(state, column)].push(state);
            }
        }

        let accepting: Vec<usize> = (0..n).filter(|&s| trimmed.finals[s]).collect();
        let rejecting: Vec<usize> = (0..total)
            .filter(|&s| s == sink || !trimmed.finals[s])
            .collect();

        let mut blocks: Vec<Vec<usize>> = Vec::new();
        let mut block_of = vec![0; total];
        for part in [accepting, rejecting] {
            if part.is_empty() {
                continue;
            }
            for &state in &part {
                block_of[state] = blocks.len();
            }
            blocks.push(part);
        }

        let mut work: Vec<usize> = (0..blocks.len()).collect();
        let mut in_work = vec![true; blocks.len()];

        while let Some(splitter) = work.pop() {
            in_work[splitter] = false;
            let splitter_states = blocks[splitter].clone();

            for sources in &inverse {
                let mut hits: IndexMap<usize, Vec<usize>> = IndexMap::new();
                for &t in &splitter_states {
                    for &s in &sources[t] {
                        hits.entry(block_of[s]).or_default().push(s);
                    }
                }

                for (block, inside) in hits {
                    if inside.len() == blocks[block].len() {
                        continue;
                    }
                    let inside_set: HashSet<usize> = inside.iter().copied().collect();
                    let outside: Vec<usize> = blocks[block]
                        .iter()
                        .copied()
                        .filter(|s| !inside_set.contains(s))
                        .collect();

                    let new_block = blocks.len();
                    for &state in &outside {
                        block_of[state] = new_block;
                    }
                    blocks[block] = inside;
                    blocks.push(outside);
                    in_work.push(false);

                    let pushed = if in_work[block] || blocks[new_block].len() < blocks[block].len() {
                        new_block
                    } else {
                        block
                    };
                    if !in_work[pushed] {
                        in_work[pushed] = true;
                        work.push(pushed);
                    }
                }
            }
        }

        let sink_block = block_of[sink];
        let mut order: IndexSet<usize> = IndexSet::new();
        order.insert(block_of[start]);
        let mut next = 0;
        while let Some(&block) = order.get_index(next) {
            let representative = blocks[block][0];
            for column in 0..k {
                let to = block_of[target(representative, column)];
                if to != sink_block {
                    order.insert(to);
                }
            }
            next += 1;
        }

        let delta = order
            .iter()
            .map(|&block| {
                let representative = blocks[block][0];
                (0..k)
                    .map(|column| {
                        let to = block_of[target(representative, column)];
                        order.get_index_of(&to)
                    })
                    .collect()
            })
            .collect();
        let finals = order
            .iter()
            .map(|&block| trimmed.finals[blocks[block][0]])
            .collect();

        Self {
            alphabet: trimmed.alphabet.clone(),
            delta,
            start: Some(0),
            finals,
        }
    }

    /// Convert to a core automaton with states `0..state_count()`.
    pub fn to_automaton(&self) -> Automaton<usize> {
        let mut automaton = Automaton::new();
        for state in 0..self.state_count() {
            automaton.add_state(state);
        }
        for (from, row) in self.delta.iter().enumerate() {
            for (column, target) in row.iter().enumerate() {
                if let Some(to) = target {
                    automaton.add_transition(from, self.alphabet[column].clone(), *to);
                }
            }
        }
        if let Some(start) = self.start {
            automaton.add_start(start);
        }
        for (state, &accepting) in self.finals.iter().enumerate() {
            if accepting {
                automaton.add_final(state);
            }
        }
        automaton
    }
}

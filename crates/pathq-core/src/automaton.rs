//! Finite automata over string labels.
//!
//! Possibly nondeterministic, no ε-moves. States are opaque identifiers kept
//! in insertion order, which later fixes their matrix indices.

use std::collections::{BTreeSet, HashMap, VecDeque};

use indexmap::IndexSet;

/// A transition `from -label-> to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition<S> {
    pub from: S,
    pub label: String,
    pub to: S,
}

/// Nondeterministic finite automaton.
#[derive(Debug, Clone)]
pub struct Automaton<S> {
    states: IndexSet<S>,
    alphabet: BTreeSet<String>,
    transitions: IndexSet<Transition<S>>,
    start: IndexSet<S>,
    finals: IndexSet<S>,
}

impl<S: std::hash::Hash + Eq> Default for Automaton<S> {
    fn default() -> Self {
        Self {
            states: IndexSet::new(),
            alphabet: BTreeSet::new(),
            transitions: IndexSet::new(),
            start: IndexSet::new(),
            finals: IndexSet::new(),
        }
    }
}

/// Structural equality: same states, transitions, start and final sets,
/// regardless of insertion order.
impl<S: std::hash::Hash + Eq> PartialEq for Automaton<S> {
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states
            && self.alphabet == other.alphabet
            && self.transitions == other.transitions
            && self.start == other.start
            && self.finals == other.finals
    }
}

impl<S: std::hash::Hash + Eq> Eq for Automaton<S> {}

impl<S: Clone + std::hash::Hash + Eq> Automaton<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state. Returns false if it was already present.
    pub fn add_state(&mut self, state: S) -> bool {
        self.states.insert(state)
    }

    /// Add a transition, registering its endpoints and label.
    pub fn add_transition(&mut self, from: S, label: impl Into<String>, to: S) {
        let label = label.into();
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        if !self.alphabet.contains(&label) {
            self.alphabet.insert(label.clone());
        }
        self.transitions.insert(Transition { from, label, to });
    }

    pub fn add_start(&mut self, state: S) {
        self.states.insert(state.clone());
        self.start.insert(state);
    }

    pub fn add_final(&mut self, state: S) {
        self.states.insert(state.clone());
        self.finals.insert(state);
    }

    /// Replace the start set.
    pub fn set_starts(&mut self, states: impl IntoIterator<Item = S>) {
        self.start.clear();
        for state in states {
            self.add_start(state);
        }
    }

    /// Replace the final set.
    pub fn set_finals(&mut self, states: impl IntoIterator<Item = S>) {
        self.finals.clear();
        for state in states {
            self.add_final(state);
        }
    }

    pub fn states(&self) -> &IndexSet<S> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<String> {
        &self.alphabet
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition<S>> {
        self.transitions.iter()
    }

    pub fn start_states(&self) -> &IndexSet<S> {
        &self.start
    }

    pub fn final_states(&self) -> &IndexSet<S> {
        &self.finals
    }

    pub fn is_start(&self, state: &S) -> bool {
        self.start.contains(state)
    }

    pub fn is_final(&self, state: &S) -> bool {
        self.finals.contains(state)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether the automaton accepts the given label sequence.
    pub fn accepts<L: AsRef<str>>(&self, word: &[L]) -> bool {
        let mut current: BTreeSet<usize> = self
            .start
            .iter()
            .filter_map(|s| self.states.get_index_of(s))
            .collect();

        for symbol in word {
            let symbol = symbol.as_ref();
            let mut next = BTreeSet::new();
            for t in self.transitions.iter().filter(|t| t.label == symbol) {
                let Some(from) = self.states.get_index_of(&t.from) else {
                    continue;
                };
                if current.contains(&from)
                    && let Some(to) = self.states.get_index_of(&t.to)
                {
                    next.insert(to);
                }
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }

        current
            .iter()
            .filter_map(|&i| self.states.get_index(i))
            .any(|s| self.finals.contains(s))
    }

    /// States reachable from the start set, in discovery order.
    pub fn reachable_states(&self) -> IndexSet<S> {
        let mut successors: HashMap<&S, Vec<&S>> = HashMap::new();
        for t in &self.transitions {
            successors.entry(&t.from).or_default().push(&t.to);
        }

        let mut reachable = IndexSet::new();
        let mut queue: VecDeque<&S> = self.start.iter().collect();
        while let Some(state) = queue.pop_front() {
            if !reachable.insert(state.clone()) {
                continue;
            }
            if let Some(next) = successors.get(state) {
                queue.extend(next.iter().copied());
            }
        }
        reachable
    }

    /// Rename every state through `f`.
    ///
    /// `f` must be injective over this automaton's states, otherwise distinct
    /// states merge.
    pub fn map_states<T, F>(&self, mut f: F) -> Automaton<T>
    where
        T: Clone + std::hash::Hash + Eq,
        F: FnMut(&S) -> T,
    {
        let mut mapped = Automaton::new();
        for state in &self.states {
            mapped.add_state(f(state));
        }
        for t in &self.transitions {
            mapped.add_transition(f(&t.from), t.label.clone(), f(&t.to));
        }
        for state in &self.start {
            mapped.add_start(f(state));
        }
        for state in &self.finals {
            mapped.add_final(f(state));
        }
        mapped.alphabet.extend(self.alphabet.iter().cloned());
        mapped
    }

    /// Renumber states densely as `0..state_count()` in insertion order.
    pub fn renumbered(&self) -> Automaton<usize> {
        self.map_states(|s| self.states.get_index_of(s).unwrap_or_default())
    }

    /// Automaton for the concatenation of both languages.
    ///
    /// States of `self` keep indices `0..n1`, states of `other` are shifted to
    /// `n1..n1 + n2`. Built without ε-moves: every transition into a final
    /// state of `self` is duplicated into each start state of `other`.
    pub fn concat<T: Clone + std::hash::Hash + Eq>(&self, other: &Automaton<T>) -> Automaton<usize> {
        let left = self.renumbered();
        let offset = left.state_count();
        let right = other.renumbered().map_states(|&s| s + offset);

        let mut result = Automaton::new();
        for &state in left.states().iter().chain(right.states()) {
            result.add_state(state);
        }
        for t in left.transitions().chain(right.transitions()) {
            result.add_transition(t.from, t.label.clone(), t.to);
        }
        for t in left.transitions().filter(|t| left.is_final(&t.to)) {
            for &start in right.start_states() {
                result.add_transition(t.from, t.label.clone(), start);
            }
        }

        let left_nullable = left.start_states().iter().any(|s| left.is_final(s));
        let right_nullable = right.start_states().iter().any(|s| right.is_final(s));

        for &start in left.start_states() {
            result.add_start(start);
        }
        if left_nullable {
            for &start in right.start_states() {
                result.add_start(start);
            }
        }
        for &state in right.final_states() {
            result.add_final(state);
        }
        if right_nullable {
            for &state in left.final_states() {
                result.add_final(state);
            }
        }
        result.alphabet.extend(left.alphabet.iter().cloned());
        result.alphabet.extend(right.alphabet.iter().cloned());
        result
    }
}

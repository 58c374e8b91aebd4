//! Boolean-matrix view of a finite automaton.

use std::collections::BTreeMap;

use indexmap::IndexSet;
use pathq_core::{Automaton, Error, Result, Vertex};
use roaring::RoaringBitmap;

use crate::matrix::{BoolMatrix, dimension};

/// An automaton as one `n × n` boolean matrix per label.
///
/// States are indexed `0..n` in the automaton's insertion order. Every
/// matrix, as well as the start and final sets, only refers to indices in
/// that range.
#[derive(Debug, Clone)]
pub struct AutomatonMatrix<S> {
    states: IndexSet<S>,
    matrices: BTreeMap<String, BoolMatrix>,
    start: RoaringBitmap,
    finals: RoaringBitmap,
}

impl<S: Vertex> AutomatonMatrix<S> {
    pub fn from_automaton(automaton: &Automaton<S>) -> Result<Self> {
        let n = dimension(automaton.state_count())?;
        let states = automaton.states().clone();
        let index = |state: &S| -> Result<u32> {
            states
                .get_index_of(state)
                .map(|i| i as u32)
                .ok_or_else(|| Error::unknown_state(state, states.len()))
        };

        let mut matrices: BTreeMap<String, BoolMatrix> = BTreeMap::new();
        for t in automaton.transitions() {
            let (from, to) = (index(&t.from)?, index(&t.to)?);
            matrices
                .entry(t.label.clone())
                .or_insert_with(|| BoolMatrix::zeros(n, n))
                .set(from, to);
        }

        let start = automaton
            .start_states()
            .iter()
            .map(index)
            .collect::<Result<RoaringBitmap>>()?;
        let finals = automaton
            .final_states()
            .iter()
            .map(index)
            .collect::<Result<RoaringBitmap>>()?;

        Ok(Self {
            states,
            matrices,
            start,
            finals,
        })
    }

    /// Assemble from parts. Indices must already be in `0..states.len()`.
    pub(crate) fn from_parts(
        states: IndexSet<S>,
        matrices: BTreeMap<String, BoolMatrix>,
        start: RoaringBitmap,
        finals: RoaringBitmap,
    ) -> Self {
        Self {
            states,
            matrices,
            start,
            finals,
        }
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// `state_count` in the matrices' index space.
    pub fn dim(&self) -> u32 {
        self.states.len() as u32
    }

    pub fn start_count(&self) -> u64 {
        self.start.len()
    }

    pub fn final_count(&self) -> u64 {
        self.finals.len()
    }

    pub fn states(&self) -> &IndexSet<S> {
        &self.states
    }

    pub fn index_of(&self, state: &S) -> Result<u32> {
        self.states
            .get_index_of(state)
            .map(|i| i as u32)
            .ok_or_else(|| Error::unknown_state(state, self.states.len()))
    }

    pub fn state_at(&self, index: u32) -> Result<&S> {
        self.states
            .get_index(index as usize)
            .ok_or_else(|| Error::unknown_index(index as usize, self.states.len()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.matrices.keys().map(String::as_str)
    }

    pub fn matrix(&self, label: &str) -> Option<&BoolMatrix> {
        self.matrices.get(label)
    }

    pub fn matrices(&self) -> &BTreeMap<String, BoolMatrix> {
        &self.matrices
    }

    pub fn start_indices(&self) -> &RoaringBitmap {
        &self.start
    }

    pub fn final_indices(&self) -> &RoaringBitmap {
        &self.finals
    }

    pub fn is_start(&self, index: u32) -> bool {
        self.start.contains(index)
    }

    pub fn is_final(&self, index: u32) -> bool {
        self.finals.contains(index)
    }

    /// Union of all per-label matrices.
    pub fn adjacency(&self) -> BoolMatrix {
        let mut sum = BoolMatrix::zeros(self.dim(), self.dim());
        for matrix in self.matrices.values() {
            sum.or_assign(matrix);
        }
        sum
    }

    /// Back to an automaton over the original states.
    pub fn to_automaton(&self) -> Automaton<S> {
        let mut automaton = Automaton::new();
        for state in &self.states {
            automaton.add_state(state.clone());
        }
        for (label, matrix) in &self.matrices {
            for (i, j) in matrix.iter() {
                automaton.add_transition(
                    self.states[i as usize].clone(),
                    label.clone(),
                    self.states[j as usize].clone(),
                );
            }
        }
        for i in &self.start {
            automaton.add_start(self.states[i as usize].clone());
        }
        for i in &self.finals {
            automaton.add_final(self.states[i as usize].clone());
        }
        automaton
    }
}

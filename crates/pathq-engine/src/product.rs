//! Kronecker-product intersection of two automata.

use std::collections::BTreeMap;

use indexmap::IndexSet;
use pathq_core::{Automaton, Error, Result, Vertex};
use roaring::RoaringBitmap;

use crate::automaton_matrix::AutomatonMatrix;

/// Linearization of index pairs `(i, j)` with `i < n1`, `j < n2` as
/// `i * n2 + j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductIndex {
    n1: u32,
    n2: u32,
}

impl ProductIndex {
    /// Fails with `TooManyStates` if `n1 * n2` does not fit in `u32`.
    pub fn new(n1: u32, n2: u32) -> Result<Self> {
        let size = u128::from(n1) * u128::from(n2);
        if size > u128::from(u32::MAX) {
            return Err(Error::TooManyStates { states: size });
        }
        Ok(Self { n1, n2 })
    }

    pub fn size(&self) -> u32 {
        self.n1 * self.n2
    }

    pub fn left_size(&self) -> u32 {
        self.n1
    }

    pub fn right_size(&self) -> u32 {
        self.n2
    }

    #[inline]
    pub fn encode(&self, i: u32, j: u32) -> u32 {
        debug_assert!(i < self.n1 && j < self.n2);
        i * self.n2 + j
    }

    /// Inverse of `encode`; out-of-range indices are `UnknownState`.
    #[inline]
    pub fn decode(&self, index: u32) -> Result<(u32, u32)> {
        if index >= self.size() {
            return Err(Error::unknown_index(index as usize, self.size() as usize));
        }
        Ok((index / self.n2, index % self.n2))
    }
}

/// Product automaton together with the index map back to its factors.
#[derive(Debug, Clone)]
pub struct Product {
    pub index: ProductIndex,
    pub matrix: AutomatonMatrix<u32>,
}

/// Product of two automata; its language is the intersection of theirs.
///
/// Only labels present in both factors get a matrix. A product index is a
/// start (final) index iff both components are start (final) indices.
pub fn intersect<S: Vertex, T: Vertex>(
    first: &AutomatonMatrix<S>,
    second: &AutomatonMatrix<T>,
) -> Result<Product> {
    let index = ProductIndex::new(first.dim(), second.dim())?;

    let mut matrices = BTreeMap::new();
    for (label, left) in first.matrices() {
        if let Some(right) = second.matrix(label) {
            matrices.insert(label.clone(), left.kron(right));
        }
    }

    let pairs = |a: &RoaringBitmap, b: &RoaringBitmap| -> RoaringBitmap {
        a.iter()
            .flat_map(|i| b.iter().map(move |j| index.encode(i, j)))
            .collect()
    };
    let start = pairs(first.start_indices(), second.start_indices());
    let finals = pairs(first.final_indices(), second.final_indices());

    tracing::trace!(
        left = index.left_size(),
        right = index.right_size(),
        labels = matrices.len(),
        "built product automaton"
    );

    let states: IndexSet<u32> = (0..index.size()).collect();
    Ok(Product {
        index,
        matrix: AutomatonMatrix::from_parts(states, matrices, start, finals),
    })
}

/// Intersection as an automaton over state pairs.
///
/// Keeps only the pairs reachable from a start pair.
pub fn intersect_automata<S: Vertex, T: Vertex>(
    first: &Automaton<S>,
    second: &Automaton<T>,
) -> Result<Automaton<(S, T)>> {
    let left = AutomatonMatrix::from_automaton(first)?;
    let right = AutomatonMatrix::from_automaton(second)?;
    let product = intersect(&left, &right)?;

    let pair = |k: u32| -> Result<(S, T)> {
        let (i, j) = product.index.decode(k)?;
        Ok((left.state_at(i)?.clone(), right.state_at(j)?.clone()))
    };

    let full = product.matrix.to_automaton();
    let reachable = full.reachable_states();
    let mut result = Automaton::new();
    for &k in &reachable {
        result.add_state(pair(k)?);
    }
    for t in full.transitions() {
        if reachable.contains(&t.from) {
            result.add_transition(pair(t.from)?, t.label.clone(), pair(t.to)?);
        }
    }
    for &k in full.start_states() {
        result.add_start(pair(k)?);
    }
    for &k in full.final_states().iter().filter(|k| reachable.contains(*k)) {
        result.add_final(pair(k)?);
    }
    Ok(result)
}

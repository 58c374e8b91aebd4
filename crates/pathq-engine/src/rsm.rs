//! Matrix form of recursive state machines.

use indexmap::IndexMap;
use pathq_compiler::Rsm;
use pathq_core::Result;

use crate::automaton_matrix::AutomatonMatrix;

/// One boolean automaton matrix per RSM box, keyed by variable.
pub fn rsm_matrices(rsm: &Rsm) -> Result<IndexMap<String, AutomatonMatrix<usize>>> {
    rsm.boxes()
        .iter()
        .map(|(variable, body)| Ok((variable.clone(), AutomatonMatrix::from_automaton(body)?)))
        .collect()
}

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Path-query engine over labeled graphs.
//!
//! Automata become one sparse boolean matrix per label (`AutomatonMatrix`).
//! Regular queries intersect the graph with the query automaton and solve
//! reachability by transitive closure or frontier propagation. Context-free
//! queries run Hellings' worklist or the matrix fixed point over a weak-CNF
//! grammar. The drivers in `query` tie these to graph and query inputs.

pub mod automaton_matrix;
pub mod cfpq;
pub mod matrix;
pub mod method;
pub mod product;
pub mod query;
pub mod rpq;
pub mod rsm;
pub mod trace;

#[cfg(test)]
mod cfpq_tests;
#[cfg(test)]
mod matrix_tests;
#[cfg(test)]
mod query_tests;

pub use automaton_matrix::AutomatonMatrix;
pub use cfpq::{Triple, hellings, hellings_with_tracer, matrix_cfpq, matrix_cfpq_with_tracer};
pub use matrix::BoolMatrix;
pub use method::{CfpqMethod, RpqMethod};
pub use product::{Product, ProductIndex, intersect, intersect_automata};
pub use query::{
    ContextFreeQuery, QueryOptions, RegularQuery, context_free_path_query, regular_path_query,
    regular_path_query_per_source,
};
pub use rpq::{
    bfs_pairs, bfs_per_source, bfs_per_source_with_tracer, closure_pairs, transitive_closure,
    transitive_closure_with_tracer,
};
pub use rsm::rsm_matrices;
pub use trace::{NoopTracer, Tracer};

/// Errors from running a query.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] pathq_compiler::Error),

    #[error(transparent)]
    Core(#[from] pathq_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

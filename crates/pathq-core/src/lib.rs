#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for pathq.
//!
//! - `Graph`: labeled directed multigraph, the data being queried
//! - `Automaton`: finite automaton, the regular query or the graph viewed as one
//! - `Grammar` / `WeakCnf`: context-free queries before and after normalization
//!
//! Everything here is plain data. Algorithms live in `pathq-engine`, parsing
//! and normalization in `pathq-compiler`.

use std::fmt::Debug;
use std::hash::Hash;

pub mod automaton;
mod error;
pub mod grammar;
pub mod graph;

#[cfg(test)]
mod automaton_tests;
#[cfg(test)]
mod grammar_tests;

pub use automaton::{Automaton, Transition};
pub use error::{Error, Result};
pub use grammar::{DEFAULT_START, Grammar, GrammarSymbol, Production, Rule, VarId, WeakCnf};
pub use graph::{
    Edge, Graph, GraphInfo, LoadGraphError, ParseDotError, ParseGraphError, load_graph, parse_dot,
    parse_edge_list, parse_graph_json,
};

/// Requirements on vertex and state identifiers.
///
/// Identifiers are opaque: only equality, hashing and a total order (for
/// deterministic result sets) are used.
pub trait Vertex: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Vertex for T {}

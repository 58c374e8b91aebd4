//! Query drivers: compile the query, run a solver, filter the answer.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use pathq_compiler::{compile_regex, parse_grammar_with_start, to_weak_cnf};
use pathq_core::{Automaton, DEFAULT_START, Grammar, Graph, Vertex, WeakCnf};

use crate::Result;
use crate::automaton_matrix::AutomatonMatrix;
use crate::cfpq::{hellings, matrix_cfpq};
use crate::method::{CfpqMethod, RpqMethod};
use crate::rpq::{bfs_pairs, bfs_per_source, closure_pairs};

/// Start/final vertex filters and the grammar start symbol.
///
/// `None` filters mean every graph vertex. Vertices missing from the graph
/// are ignored.
#[derive(Debug, Clone)]
pub struct QueryOptions<V> {
    pub starts: Option<Vec<V>>,
    pub finals: Option<Vec<V>>,
    pub start_symbol: Option<String>,
}

impl<V> Default for QueryOptions<V> {
    fn default() -> Self {
        Self {
            starts: None,
            finals: None,
            start_symbol: None,
        }
    }
}

impl<V> QueryOptions<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_starts(mut self, starts: impl IntoIterator<Item = V>) -> Self {
        self.starts = Some(starts.into_iter().collect());
        self
    }

    pub fn with_finals(mut self, finals: impl IntoIterator<Item = V>) -> Self {
        self.finals = Some(finals.into_iter().collect());
        self
    }

    pub fn with_start_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.start_symbol = Some(symbol.into());
        self
    }
}

/// A regular query: regex text or an already built automaton.
#[derive(Debug, Clone, Copy)]
pub enum RegularQuery<'a> {
    Regex(&'a str),
    Automaton(&'a Automaton<usize>),
}

impl<'a> From<&'a str> for RegularQuery<'a> {
    fn from(text: &'a str) -> Self {
        RegularQuery::Regex(text)
    }
}

impl<'a> From<&'a Automaton<usize>> for RegularQuery<'a> {
    fn from(automaton: &'a Automaton<usize>) -> Self {
        RegularQuery::Automaton(automaton)
    }
}

impl RegularQuery<'_> {
    fn to_matrix(self) -> Result<AutomatonMatrix<usize>> {
        match self {
            RegularQuery::Regex(text) => Ok(AutomatonMatrix::from_automaton(&compile_regex(text)?)?),
            RegularQuery::Automaton(automaton) => Ok(AutomatonMatrix::from_automaton(automaton)?),
        }
    }
}

/// A context-free query: grammar text, a parsed grammar or one already in
/// weak CNF.
#[derive(Debug, Clone, Copy)]
pub enum ContextFreeQuery<'a> {
    Text(&'a str),
    Grammar(&'a Grammar),
    WeakCnf(&'a WeakCnf),
}

impl<'a> From<&'a str> for ContextFreeQuery<'a> {
    fn from(text: &'a str) -> Self {
        ContextFreeQuery::Text(text)
    }
}

impl<'a> From<&'a Grammar> for ContextFreeQuery<'a> {
    fn from(grammar: &'a Grammar) -> Self {
        ContextFreeQuery::Grammar(grammar)
    }
}

impl<'a> From<&'a WeakCnf> for ContextFreeQuery<'a> {
    fn from(cnf: &'a WeakCnf) -> Self {
        ContextFreeQuery::WeakCnf(cnf)
    }
}

impl ContextFreeQuery<'_> {
    /// Normalized grammar plus the symbol whose triples are reported.
    fn to_weak_cnf(self, start_symbol: Option<&str>) -> Result<(WeakCnf, String)> {
        match self {
            ContextFreeQuery::Text(text) => {
                let start = start_symbol.unwrap_or(DEFAULT_START);
                let grammar = parse_grammar_with_start(text, start)?;
                Ok((to_weak_cnf(&grammar)?, start.to_owned()))
            }
            ContextFreeQuery::Grammar(grammar) => {
                let mut grammar = grammar.clone();
                if let Some(start) = start_symbol {
                    grammar.set_start(start);
                }
                let start = grammar.start().to_owned();
                Ok((to_weak_cnf(&grammar)?, start))
            }
            ContextFreeQuery::WeakCnf(cnf) => {
                let start = start_symbol.unwrap_or(cnf.start()).to_owned();
                Ok((cnf.clone(), start))
            }
        }
    }
}

fn graph_matrix<V: Vertex>(graph: &Graph<V>, options: &QueryOptions<V>) -> Result<AutomatonMatrix<V>> {
    let automaton = graph.to_automaton(options.starts.as_deref(), options.finals.as_deref());
    Ok(AutomatonMatrix::from_automaton(&automaton)?)
}

/// Pairs `(u, v)` joined by a path whose labels spell a word of the query.
pub fn regular_path_query<'q, V: Vertex>(
    graph: &Graph<V>,
    query: impl Into<RegularQuery<'q>>,
    options: &QueryOptions<V>,
    method: RpqMethod,
) -> Result<BTreeSet<(V, V)>> {
    let graph_matrix = graph_matrix(graph, options)?;
    let query_matrix = query.into().to_matrix()?;

    let pairs = match method {
        RpqMethod::Closure => closure_pairs(&graph_matrix, &query_matrix)?,
        RpqMethod::Bfs => bfs_pairs(&graph_matrix, &query_matrix)?,
    };
    tracing::info!(
        %method,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        query_states = query_matrix.state_count(),
        pairs = pairs.len(),
        "regular path query"
    );
    Ok(pairs)
}

/// Reachable final vertices for each start vertex.
pub fn regular_path_query_per_source<'q, V: Vertex>(
    graph: &Graph<V>,
    query: impl Into<RegularQuery<'q>>,
    options: &QueryOptions<V>,
) -> Result<BTreeMap<V, BTreeSet<V>>> {
    let graph_matrix = graph_matrix(graph, options)?;
    let query_matrix = query.into().to_matrix()?;

    let reachable = bfs_per_source(&graph_matrix, &query_matrix)?;
    tracing::info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        query_states = query_matrix.state_count(),
        sources = reachable.len(),
        "regular path query per source"
    );
    Ok(reachable)
}

/// Pairs `(u, v)` such that the start symbol derives the label word of a
/// path from `u` to `v`.
pub fn context_free_path_query<'q, V: Vertex>(
    graph: &Graph<V>,
    query: impl Into<ContextFreeQuery<'q>>,
    options: &QueryOptions<V>,
    method: CfpqMethod,
) -> Result<BTreeSet<(V, V)>> {
    let (cnf, start_symbol) = query.into().to_weak_cnf(options.start_symbol.as_deref())?;
    let matrix = AutomatonMatrix::from_automaton(&graph.to_automaton(None, None))?;

    let triples = match method {
        CfpqMethod::Worklist => hellings(&matrix, &cnf)?,
        CfpqMethod::Matrix => matrix_cfpq(&matrix, &cnf)?,
    };

    let starts: Option<HashSet<&V>> = options.starts.as_ref().map(|vs| vs.iter().collect());
    let finals: Option<HashSet<&V>> = options.finals.as_ref().map(|vs| vs.iter().collect());
    let allowed = |filter: &Option<HashSet<&V>>, vertex: &V| {
        filter.as_ref().is_none_or(|vs| vs.contains(vertex))
    };
    let pairs: BTreeSet<(V, V)> = triples
        .into_iter()
        .filter(|t| t.variable == start_symbol)
        .filter(|t| allowed(&starts, &t.from) && allowed(&finals, &t.to))
        .map(|t| (t.from, t.to))
        .collect();

    tracing::info!(
        %method,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        rules = cnf.rule_count(),
        pairs = pairs.len(),
        "context-free path query"
    );
    Ok(pairs)
}

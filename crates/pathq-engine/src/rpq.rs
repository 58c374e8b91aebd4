//! Regular path queries over a graph automaton and a query automaton.
//!
//! Both solvers report `(u, v)` when some path from `u` to `v` spells a word
//! of the query language, `u` is a graph start vertex and `v` a graph final
//! vertex. A query accepting ε relates every start vertex that is also final
//! to itself.

use std::collections::{BTreeMap, BTreeSet};

use pathq_core::{Result, Vertex};
use roaring::RoaringBitmap;

use crate::automaton_matrix::AutomatonMatrix;
use crate::matrix::BoolMatrix;
use crate::product::intersect;
use crate::trace::{NoopTracer, Tracer};

/// Saturate `R ← R + R·R` until the number of entries stops growing.
///
/// The result is the transitive (not reflexive) closure.
pub fn transitive_closure(matrix: &BoolMatrix) -> BoolMatrix {
    transitive_closure_with_tracer(matrix, &mut NoopTracer)
}

pub fn transitive_closure_with_tracer<T: Tracer>(matrix: &BoolMatrix, tracer: &mut T) -> BoolMatrix {
    let mut closure = matrix.clone();
    let mut nnz = closure.nnz();
    let mut round = 0;
    loop {
        round += 1;
        let squared = closure.mul(&closure);
        closure.or_assign(&squared);
        let next = closure.nnz();
        tracing::debug!(round, nnz = next, "closure squaring");
        tracer.trace_round(round, next);
        if next == nnz {
            return closure;
        }
        nnz = next;
    }
}

/// RPQ via the transitive closure of the product automaton.
pub fn closure_pairs<V: Vertex, Q: Vertex>(
    graph: &AutomatonMatrix<V>,
    query: &AutomatonMatrix<Q>,
) -> Result<BTreeSet<(V, V)>> {
    let mut pairs = BTreeSet::new();
    if graph.state_count() == 0 || query.state_count() == 0 {
        return Ok(pairs);
    }

    let product = intersect(graph, query)?;
    let closure = transitive_closure(&product.matrix.adjacency());
    let vertex = |k: u32| -> Result<V> {
        let (g, _) = product.index.decode(k)?;
        graph.state_at(g).cloned()
    };

    for start in product.matrix.start_indices() {
        if product.matrix.is_final(start) {
            let v = vertex(start)?;
            pairs.insert((v.clone(), v));
        }
        for end in closure.row(start) {
            if product.matrix.is_final(end) {
                pairs.insert((vertex(start)?, vertex(end)?));
            }
        }
    }
    Ok(pairs)
}

/// RPQ via multi-source frontier propagation, one result set per start vertex.
///
/// Every graph start vertex has an entry, possibly empty.
pub fn bfs_per_source<V: Vertex, Q: Vertex>(
    graph: &AutomatonMatrix<V>,
    query: &AutomatonMatrix<Q>,
) -> Result<BTreeMap<V, BTreeSet<V>>> {
    bfs_per_source_with_tracer(graph, query, &mut NoopTracer)
}

pub fn bfs_per_source_with_tracer<V: Vertex, Q: Vertex, T: Tracer>(
    graph: &AutomatonMatrix<V>,
    query: &AutomatonMatrix<Q>,
    tracer: &mut T,
) -> Result<BTreeMap<V, BTreeSet<V>>> {
    let mut result = BTreeMap::new();
    if graph.state_count() == 0 || query.state_count() == 0 {
        return Ok(result);
    }

    let sources: Vec<u32> = graph.start_indices().iter().collect();
    let k = query.dim();
    let rows = crate::matrix::dimension(sources.len() * k as usize)?;

    // Row `b * k + q`: graph vertices reached from source `b` with the query in state `q`.
    let mut front = BoolMatrix::zeros(rows, graph.dim());
    for (b, &source) in sources.iter().enumerate() {
        for q in query.start_indices() {
            front.set(b as u32 * k + q, source);
        }
    }
    let mut visited = front.clone();

    let shared: Vec<(&BoolMatrix, &BoolMatrix)> = graph
        .matrices()
        .iter()
        .filter_map(|(label, g)| query.matrix(label).map(|q| (g, q)))
        .collect();

    let mut round = 0;
    loop {
        round += 1;
        let mut next = BoolMatrix::zeros(rows, graph.dim());
        for &(graph_step, query_step) in &shared {
            let moved = front.mul(graph_step);
            for (i, j) in query_step.iter() {
                for b in 0..sources.len() as u32 {
                    next.or_row(b * k + j, moved.row(b * k + i));
                }
            }
        }

        let fresh = next.difference(&visited);
        let size = fresh.nnz();
        tracing::debug!(round, front = size, "bfs round");
        tracer.trace_round(round, size);
        if size == 0 {
            break;
        }
        visited.or_assign(&fresh);
        front = fresh;
    }

    for (b, &source) in sources.iter().enumerate() {
        let mut reached = RoaringBitmap::new();
        for f in query.final_indices() {
            reached |= visited.row(b as u32 * k + f);
        }
        reached &= graph.final_indices();

        let targets = reached
            .iter()
            .map(|v| graph.state_at(v).cloned())
            .collect::<Result<BTreeSet<V>>>()?;
        result.insert(graph.state_at(source)?.clone(), targets);
    }
    Ok(result)
}

/// RPQ via frontier propagation, flattened to pairs.
pub fn bfs_pairs<V: Vertex, Q: Vertex>(
    graph: &AutomatonMatrix<V>,
    query: &AutomatonMatrix<Q>,
) -> Result<BTreeSet<(V, V)>> {
    let per_source = bfs_per_source(graph, query)?;
    Ok(per_source
        .into_iter()
        .flat_map(|(source, targets)| targets.into_iter().map(move |t| (source.clone(), t)))
        .collect())
}

//! Context-free path queries over a weak-CNF grammar.
//!
//! Both solvers compute every derivability triple `(u, A, v)`: variable `A`
//! derives the label word of some path from `u` to `v`. The result set only
//! grows and is bounded by `|V|² · |variables|`, which bounds both loops.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use pathq_core::{Result, Rule, VarId, Vertex, WeakCnf};

use crate::automaton_matrix::AutomatonMatrix;
use crate::matrix::BoolMatrix;
use crate::trace::{NoopTracer, Tracer};

/// `variable` derives a path from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple<V> {
    pub from: V,
    pub variable: String,
    pub to: V,
}

type RawTriple = (u32, VarId, u32);

/// Worklist state with per-vertex indexes, so joining a popped triple only
/// visits triples that share its endpoint.
struct Derivations {
    found: HashSet<RawTriple>,
    ending_at: Vec<Vec<(u32, VarId)>>,
    starting_at: Vec<Vec<(VarId, u32)>>,
    worklist: VecDeque<RawTriple>,
}

impl Derivations {
    fn new(n: u32) -> Self {
        Self {
            found: HashSet::new(),
            ending_at: vec![Vec::new(); n as usize],
            starting_at: vec![Vec::new(); n as usize],
            worklist: VecDeque::new(),
        }
    }

    fn add<T: Tracer>(&mut self, triple: RawTriple, tracer: &mut T) {
        if !self.found.insert(triple) {
            return;
        }
        let (u, a, v) = triple;
        self.ending_at[v as usize].push((u, a));
        self.starting_at[u as usize].push((a, v));
        self.worklist.push_back(triple);
        tracing::trace!(from = u, variable = a.as_u32(), to = v, "derived");
        tracer.trace_derived(u, a, v, self.found.len());
    }
}

/// Hellings' worklist algorithm.
pub fn hellings<V: Vertex>(graph: &AutomatonMatrix<V>, grammar: &WeakCnf) -> Result<BTreeSet<Triple<V>>> {
    hellings_with_tracer(graph, grammar, &mut NoopTracer)
}

pub fn hellings_with_tracer<V: Vertex, T: Tracer>(
    graph: &AutomatonMatrix<V>,
    grammar: &WeakCnf,
    tracer: &mut T,
) -> Result<BTreeSet<Triple<V>>> {
    let n = graph.dim();
    if n == 0 {
        return Ok(BTreeSet::new());
    }

    // (left, right) -> heads of `head -> left right`
    let mut binary: HashMap<(VarId, VarId), Vec<VarId>> = HashMap::new();
    for rule in grammar.rules() {
        if let Rule::Binary { head, left, right } = rule {
            binary.entry((*left, *right)).or_default().push(*head);
        }
    }

    let mut state = Derivations::new(n);
    for rule in grammar.rules() {
        match rule {
            Rule::Epsilon { head } => {
                for v in 0..n {
                    state.add((v, *head, v), tracer);
                }
            }
            Rule::Terminal { head, terminal } => {
                if let Some(edges) = graph.matrix(terminal) {
                    for (u, v) in edges.iter() {
                        state.add((u, *head, v), tracer);
                    }
                }
            }
            Rule::Binary { .. } => {}
        }
    }
    tracing::debug!(seeded = state.found.len(), "hellings seeded");

    let mut proposals = Vec::new();
    while let Some((u1, x, v1)) = state.worklist.pop_front() {
        tracer.trace_pop(u1, x, v1);

        // (u2, Y, u1) followed by (u1, X, v1)
        for &(u2, y) in &state.ending_at[u1 as usize] {
            for &z in binary.get(&(y, x)).into_iter().flatten() {
                proposals.push((u2, z, v1));
            }
        }
        // (u1, X, v1) followed by (v1, Y, v2)
        for &(y, v2) in &state.starting_at[v1 as usize] {
            for &z in binary.get(&(x, y)).into_iter().flatten() {
                proposals.push((u1, z, v2));
            }
        }

        for triple in proposals.drain(..) {
            state.add(triple, tracer);
        }
    }
    tracing::debug!(triples = state.found.len(), "hellings done");

    decode(graph, grammar, state.found)
}

/// Boolean-matrix fixed point: `M_A ← M_A + M_B · M_C` for every
/// `A -> B C` until a full pass changes nothing.
pub fn matrix_cfpq<V: Vertex>(graph: &AutomatonMatrix<V>, grammar: &WeakCnf) -> Result<BTreeSet<Triple<V>>> {
    matrix_cfpq_with_tracer(graph, grammar, &mut NoopTracer)
}

pub fn matrix_cfpq_with_tracer<V: Vertex, T: Tracer>(
    graph: &AutomatonMatrix<V>,
    grammar: &WeakCnf,
    tracer: &mut T,
) -> Result<BTreeSet<Triple<V>>> {
    let n = graph.dim();
    if n == 0 {
        return Ok(BTreeSet::new());
    }

    let mut matrices = vec![BoolMatrix::zeros(n, n); grammar.variable_count()];
    let mut binary = Vec::new();
    for rule in grammar.rules() {
        match rule {
            Rule::Epsilon { head } => matrices[head.index()].or_assign(&BoolMatrix::identity(n)),
            Rule::Terminal { head, terminal } => {
                if let Some(edges) = graph.matrix(terminal) {
                    matrices[head.index()].or_assign(edges);
                }
            }
            Rule::Binary { head, left, right } => binary.push((*head, *left, *right)),
        }
    }

    let mut round = 0;
    loop {
        round += 1;
        let mut changed = false;
        for &(head, left, right) in &binary {
            let derived = matrices[left.index()].mul(&matrices[right.index()]);
            let target = &mut matrices[head.index()];
            let before = target.nnz();
            target.or_assign(&derived);
            changed |= target.nnz() != before;
        }
        let total: u64 = matrices.iter().map(BoolMatrix::nnz).sum();
        tracing::debug!(round, total, changed, "matrix cfpq pass");
        tracer.trace_round(round, total);
        if !changed {
            break;
        }
    }

    let raw = matrices
        .iter()
        .enumerate()
        .flat_map(|(a, matrix)| {
            matrix
                .iter()
                .map(move |(u, v)| (u, VarId::from_raw(a as u32), v))
        })
        .collect();
    decode(graph, grammar, raw)
}

fn decode<V: Vertex>(
    graph: &AutomatonMatrix<V>,
    grammar: &WeakCnf,
    raw: HashSet<RawTriple>,
) -> Result<BTreeSet<Triple<V>>> {
    raw.into_iter()
        .map(|(u, a, v)| {
            Ok(Triple {
                from: graph.state_at(u)?.clone(),
                variable: grammar.name(a).to_owned(),
                to: graph.state_at(v)?.clone(),
            })
        })
        .collect()
}

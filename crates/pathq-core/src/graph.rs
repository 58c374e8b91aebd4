//! Labeled directed multigraphs.
//!
//! Vertices are opaque identifiers compared by equality only. Edges form a
//! multiset: parallel edges and self-loops are kept as given.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::Vertex;
use crate::automaton::Automaton;

/// A single labeled edge `from -label-> to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge<V> {
    pub from: V,
    pub label: String,
    pub to: V,
}

impl<V> Edge<V> {
    pub fn new(from: V, label: impl Into<String>, to: V) -> Self {
        Self {
            from,
            label: label.into(),
            to,
        }
    }
}

/// Directed labeled multigraph.
///
/// Vertex order is insertion order; it determines matrix indices downstream.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "V: Serialize + std::hash::Hash + Eq"))]
pub struct Graph<V> {
    vertices: IndexSet<V>,
    edges: Vec<Edge<V>>,
}

/// Equal when vertex insertion order and the edge sequence both match.
impl<V: Vertex> PartialEq for Graph<V> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices.iter().eq(other.vertices.iter()) && self.edges == other.edges
    }
}

impl<V: Vertex> Eq for Graph<V> {}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self {
            vertices: IndexSet::new(),
            edges: Vec::new(),
        }
    }
}

impl<V: Vertex> Graph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(from, label, to)` triples.
    pub fn from_edges<L: Into<String>>(edges: impl IntoIterator<Item = (V, L, V)>) -> Self {
        let mut graph = Self::new();
        for (from, label, to) in edges {
            graph.add_edge(from, label, to);
        }
        graph
    }

    /// Add an isolated vertex. Returns false if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        self.vertices.insert(vertex)
    }

    /// Add an edge, registering both endpoints as vertices.
    pub fn add_edge(&mut self, from: V, label: impl Into<String>, to: V) {
        self.vertices.insert(from.clone());
        self.vertices.insert(to.clone());
        self.edges.push(Edge::new(from, label, to));
    }

    pub fn vertices(&self) -> &IndexSet<V> {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge<V>] {
        &self.edges
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// Position of a vertex in insertion order.
    pub fn vertex_index(&self, vertex: &V) -> Option<usize> {
        self.vertices.get_index_of(vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Distinct edge labels, sorted.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.edges.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn info(&self) -> GraphInfo {
        GraphInfo {
            vertices: self.vertex_count(),
            edges: self.edge_count(),
            labels: self.labels().into_iter().map(str::to_owned).collect(),
        }
    }

    /// View the graph as an automaton over its edge labels.
    ///
    /// Every vertex becomes a state and every edge a transition. Omitted
    /// start/final sets default to all vertices. Requested vertices that are
    /// not in the graph are ignored.
    pub fn to_automaton(&self, starts: Option<&[V]>, finals: Option<&[V]>) -> Automaton<V> {
        let mut automaton = Automaton::new();
        for vertex in &self.vertices {
            automaton.add_state(vertex.clone());
        }
        for edge in &self.edges {
            automaton.add_transition(edge.from.clone(), edge.label.clone(), edge.to.clone());
        }

        let pick = |requested: Option<&[V]>| -> Vec<V> {
            match requested {
                Some(vs) => vs
                    .iter()
                    .filter(|v| self.vertices.contains(*v))
                    .cloned()
                    .collect(),
                None => self.vertices.iter().cloned().collect(),
            }
        };
        for vertex in pick(starts) {
            automaton.add_start(vertex);
        }
        for vertex in pick(finals) {
            automaton.add_final(vertex);
        }
        automaton
    }
}

impl<V: Vertex + fmt::Display> Graph<V> {
    /// Graphviz DOT text, one statement per line.
    ///
    /// Every vertex is declared in insertion order before the edges, so
    /// [`parse_dot`] restores an equal graph (as strings).
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph {\n");
        for vertex in &self.vertices {
            writeln!(out, "    {};", DotId(vertex)).expect("String write never fails");
        }
        for edge in &self.edges {
            writeln!(
                out,
                "    {} -> {} [label={}];",
                DotId(&edge.from),
                DotId(&edge.to),
                DotId(&edge.label)
            )
            .expect("String write never fails");
        }
        out.push_str("}\n");
        out
    }
}

/// Quoted DOT identifier.
struct DotId<'a, T>(&'a T);

impl<T: fmt::Display> fmt::Display for DotId<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for c in self.0.to_string().chars() {
            if matches!(c, '"' | '\\') {
                f.write_char('\\')?;
            }
            f.write_char(c)?;
        }
        f.write_char('"')
    }
}

impl Graph<usize> {
    /// Two labeled cycles sharing vertex 0.
    ///
    /// Vertices are `0..=n + m`. The first cycle `0 -> 1 -> … -> n -> 0` is
    /// labeled `labels.0`, the second `0 -> n+1 -> … -> n+m -> 0` is labeled
    /// `labels.1`.
    pub fn two_cycles(n: usize, m: usize, labels: (&str, &str)) -> Self {
        let mut graph = Self::new();
        graph.add_vertex(0);

        let first: Vec<usize> = (0..=n).collect();
        for pair in first.windows(2) {
            graph.add_edge(pair[0], labels.0, pair[1]);
        }
        if n > 0 {
            graph.add_edge(n, labels.0, 0);
        }

        let second: Vec<usize> = std::iter::once(0).chain(n + 1..=n + m).collect();
        for pair in second.windows(2) {
            graph.add_edge(pair[0], labels.1, pair[1]);
        }
        if m > 0 {
            graph.add_edge(n + m, labels.1, 0);
        }
        graph
    }
}

/// Summary counts for a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphInfo {
    pub vertices: usize,
    pub edges: usize,
    pub labels: Vec<String>,
}

/// Edge-list parse failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: expected `from label to`, found {fields} fields")]
pub struct ParseGraphError {
    pub line: usize,
    pub fields: usize,
}

/// Parse a whitespace-separated edge list.
///
/// One edge per line as `from label to`. A line with a single token declares
/// an isolated vertex. Blank lines and `#` comments are skipped.
pub fn parse_edge_list(text: &str) -> Result<Graph<String>, ParseGraphError> {
    let mut graph = Graph::new();
    for (i, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default();
        let fields: Vec<&str> = content.split_whitespace().collect();
        match fields.as_slice() {
            [] => {}
            [vertex] => {
                graph.add_vertex((*vertex).to_owned());
            }
            [from, label, to] => graph.add_edge((*from).to_owned(), *label, (*to).to_owned()),
            _ => {
                return Err(ParseGraphError {
                    line: i + 1,
                    fields: fields.len(),
                });
            }
        }
    }
    Ok(graph)
}

/// Vertex id as it may appear in JSON: numbers and strings are both accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawVertex {
    Int(i64),
    Str(String),
}

impl From<RawVertex> for String {
    fn from(raw: RawVertex) -> Self {
        match raw {
            RawVertex::Int(n) => n.to_string(),
            RawVertex::Str(s) => s,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawGraph {
    #[serde(default)]
    vertices: Vec<RawVertex>,
    edges: Vec<(RawVertex, String, RawVertex)>,
}

/// Parse a JSON graph: `{"vertices": [...], "edges": [[from, label, to], ...]}`.
///
/// `vertices` is optional and only needed for isolated vertices.
pub fn parse_graph_json(json: &str) -> Result<Graph<String>, serde_json::Error> {
    let raw: RawGraph = serde_json::from_str(json)?;
    let mut graph = Graph::new();
    for vertex in raw.vertices {
        graph.add_vertex(vertex.into());
    }
    for (from, label, to) in raw.edges {
        graph.add_edge(from.into(), label, to.into());
    }
    Ok(graph)
}

/// DOT parse failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ParseDotError {
    pub line: usize,
    pub message: String,
}

/// Parse the line-oriented DOT subset written by [`Graph::to_dot`].
///
/// The file is `digraph [name] {`, then one statement per line, then `}`.
/// A statement is a vertex `id;` or an edge `id -> id [label=id];`. Ids are
/// quoted strings or bare words. Blank lines and `//` comments are skipped.
pub fn parse_dot(text: &str) -> Result<Graph<String>, ParseDotError> {
    let mut graph = Graph::new();
    let mut opened = false;
    let mut closed = false;
    let mut last_line = 0;

    for (i, line) in text.lines().enumerate() {
        last_line = i + 1;
        let err = |message: &str| ParseDotError {
            line: i + 1,
            message: message.to_owned(),
        };
        let mut scan = DotScanner::new(line);
        if scan.at_end() || scan.eat("//") {
            continue;
        }
        if closed {
            return Err(err("unexpected text after closing `}`"));
        }
        if !opened {
            if !scan.eat("digraph") {
                return Err(err("expected `digraph`"));
            }
            scan.id();
            if !scan.eat("{") || !scan.at_end() {
                return Err(err("expected `{` at end of line"));
            }
            opened = true;
            continue;
        }
        if scan.eat("}") {
            closed = true;
            continue;
        }

        let from = scan.id().ok_or_else(|| err("expected vertex id"))?;
        if scan.eat("->") {
            let to = scan.id().ok_or_else(|| err("expected target vertex id"))?;
            let label = scan.label().ok_or_else(|| err("expected `[label=...]`"))?;
            graph.add_edge(from, label, to);
        } else {
            graph.add_vertex(from);
        }
        scan.eat(";");
        if !scan.at_end() {
            return Err(err("expected one statement per line"));
        }
    }

    if !opened || !closed {
        return Err(ParseDotError {
            line: last_line,
            message: "expected `digraph { ... }`".to_owned(),
        });
    }
    Ok(graph)
}

struct DotScanner<'a> {
    rest: &'a str,
}

impl<'a> DotScanner<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.rest.is_empty()
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn id(&mut self) -> Option<String> {
        self.skip_whitespace();
        if let Some(quoted) = self.rest.strip_prefix('"') {
            let mut id = String::new();
            let mut chars = quoted.char_indices();
            while let Some((i, c)) = chars.next() {
                match c {
                    '"' => {
                        self.rest = &quoted[i + 1..];
                        return Some(id);
                    }
                    '\\' => id.push(chars.next()?.1),
                    c => id.push(c),
                }
            }
            return None;
        }
        let end = self
            .rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (id, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(id.to_owned())
    }

    /// `[label=id]`
    fn label(&mut self) -> Option<String> {
        if !(self.eat("[") && self.eat("label") && self.eat("=")) {
            return None;
        }
        let label = self.id()?;
        self.eat("]").then_some(label)
    }
}

/// Failure to load a graph file.
#[derive(Debug, thiserror::Error)]
pub enum LoadGraphError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}`: {source}", path.display())]
    EdgeList {
        path: PathBuf,
        #[source]
        source: ParseGraphError,
    },

    #[error("`{}`: {source}", path.display())]
    Dot {
        path: PathBuf,
        #[source]
        source: ParseDotError,
    },

    #[error("`{}`: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a graph file, choosing the format by extension: `.json` files are
/// JSON graphs, `.dot` and `.gv` files are DOT, everything else is an edge
/// list.
pub fn load_graph(path: &Path) -> Result<Graph<String>, LoadGraphError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadGraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let has_extension = |names: &[&str]| {
        path.extension()
            .is_some_and(|ext| names.iter().any(|name| ext.eq_ignore_ascii_case(name)))
    };
    let path = path.to_path_buf();
    if has_extension(&["json"]) {
        parse_graph_json(&text).map_err(|source| LoadGraphError::Json { path, source })
    } else if has_extension(&["dot", "gv"]) {
        parse_dot(&text).map_err(|source| LoadGraphError::Dot { path, source })
    } else {
        parse_edge_list(&text).map_err(|source| LoadGraphError::EdgeList { path, source })
    }
}

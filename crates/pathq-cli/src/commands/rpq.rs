use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use pathq_engine::{QueryOptions, RpqMethod, regular_path_query, regular_path_query_per_source};

use super::common::{fail, fail_query, load_graph};

pub struct RpqArgs {
    pub graph_path: PathBuf,
    pub query: String,
    pub method: RpqMethod,
    pub starts: Option<Vec<String>>,
    pub finals: Option<Vec<String>>,
    pub per_source: bool,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: RpqArgs) {
    let graph = load_graph(&args.graph_path);
    let options = QueryOptions {
        starts: args.starts,
        finals: args.finals,
        start_symbol: None,
    };

    if args.per_source {
        let reachable = regular_path_query_per_source(&graph, args.query.as_str(), &options)
            .unwrap_or_else(|err| fail_query(&err, args.color));
        print!("{}", format_per_source(&reachable, args.json));
        return;
    }

    let pairs = regular_path_query(&graph, args.query.as_str(), &options, args.method)
        .unwrap_or_else(|err| fail_query(&err, args.color));
    print!("{}", format_pairs(&pairs, args.json));
}

/// One `from -> to` line per pair, or a JSON array of pairs.
pub fn format_pairs(pairs: &BTreeSet<(String, String)>, json: bool) -> String {
    if json {
        return to_json(pairs);
    }
    pairs
        .iter()
        .map(|(from, to)| format!("{from} -> {to}\n"))
        .collect()
}

/// One `from: [to, ...]` line per start vertex, or a JSON object.
pub fn format_per_source(reachable: &BTreeMap<String, BTreeSet<String>>, json: bool) -> String {
    if json {
        return to_json(reachable);
    }
    reachable
        .iter()
        .map(|(from, targets)| {
            let targets: Vec<&str> = targets.iter().map(String::as_str).collect();
            format!("{from}: [{}]\n", targets.join(", "))
        })
        .collect()
}

pub(crate) fn to_json(value: &impl serde::Serialize) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json + "\n",
        Err(err) => fail(err),
    }
}

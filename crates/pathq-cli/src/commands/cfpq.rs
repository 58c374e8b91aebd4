use std::path::PathBuf;

use pathq_engine::{CfpqMethod, QueryOptions, context_free_path_query};

use super::common::{fail, fail_query, load_graph, read_file};
use super::rpq::format_pairs;

pub struct CfpqArgs {
    pub graph_path: PathBuf,
    pub grammar_path: PathBuf,
    pub method: CfpqMethod,
    pub start_symbol: Option<String>,
    pub starts: Option<Vec<String>>,
    pub finals: Option<Vec<String>>,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: CfpqArgs) {
    let grammar = read_file(&args.grammar_path).unwrap_or_else(|msg| fail(msg));
    let graph = load_graph(&args.graph_path);
    let options = QueryOptions {
        starts: args.starts,
        finals: args.finals,
        start_symbol: args.start_symbol,
    };

    let pairs = context_free_path_query(&graph, grammar.as_str(), &options, args.method)
        .unwrap_or_else(|err| fail_query(&err, args.color));
    print!("{}", format_pairs(&pairs, args.json));
}

//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use pathq_engine::{CfpqMethod, RpqMethod};

/// Graph file (positional).
pub fn graph_path_arg() -> Arg {
    Arg::new("graph_path")
        .value_name("GRAPH")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Graph file: JSON for .json, DOT for .dot/.gv, otherwise an edge list")
}

/// Regex query (-q/--query).
pub fn regex_arg() -> Arg {
    Arg::new("query")
        .short('q')
        .long("query")
        .value_name("REGEX")
        .required(true)
        .help("Regular expression over edge labels")
}

/// Grammar file (positional).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("GRAMMAR")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Grammar file, one `Head -> body | body` group per line")
}

/// RPQ solver (--method).
pub fn rpq_method_arg() -> Arg {
    Arg::new("method")
        .long("method")
        .value_name("METHOD")
        .default_value("closure")
        .value_parser(|s: &str| s.parse::<RpqMethod>().map_err(|e| e.to_string()))
        .help("Solver: closure or bfs")
}

/// CFPQ solver (--method).
pub fn cfpq_method_arg() -> Arg {
    Arg::new("method")
        .long("method")
        .value_name("METHOD")
        .default_value("worklist")
        .value_parser(|s: &str| s.parse::<CfpqMethod>().map_err(|e| e.to_string()))
        .help("Solver: worklist or matrix")
}

/// Start vertex filter (--start, repeatable).
pub fn start_vertex_arg() -> Arg {
    Arg::new("start")
        .long("start")
        .value_name("VERTEX")
        .action(ArgAction::Append)
        .help("Only report paths starting here (repeatable; default: every vertex)")
}

/// Final vertex filter (--final, repeatable).
pub fn final_vertex_arg() -> Arg {
    Arg::new("final")
        .long("final")
        .value_name("VERTEX")
        .action(ArgAction::Append)
        .help("Only report paths ending here (repeatable; default: every vertex)")
}

/// Group results by start vertex (--per-source).
pub fn per_source_arg() -> Arg {
    Arg::new("per_source")
        .long("per-source")
        .action(ArgAction::SetTrue)
        .help("Group reachable vertices by start vertex")
}

/// Grammar start symbol (--start-symbol).
pub fn start_symbol_arg() -> Arg {
    Arg::new("start_symbol")
        .long("start-symbol")
        .value_name("SYMBOL")
        .help("Grammar start symbol (default: S)")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print results as JSON")
}

/// DOT output (--dot).
pub fn dot_arg() -> Arg {
    Arg::new("dot")
        .long("dot")
        .action(ArgAction::SetTrue)
        .conflicts_with("json")
        .help("Print the graph itself as Graphviz DOT")
}

/// Script file (positional).
pub fn script_path_arg() -> Arg {
    Arg::new("script_path")
        .value_name("SCRIPT")
        .value_parser(value_parser!(PathBuf))
        .help("Script file, or - for stdin")
}

/// Inline script text (-e).
pub fn script_text_arg() -> Arg {
    Arg::new("script_text")
        .short('e')
        .long("eval")
        .value_name("TEXT")
        .help("Inline script text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}

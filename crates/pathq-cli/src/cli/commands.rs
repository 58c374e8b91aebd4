//! Command builders for the CLI.

use clap::{ArgGroup, Command};

use super::args::*;

/// Build the complete CLI with all subcommands.
///
/// `-v` and `--color` are global so they may appear after the subcommand.
pub fn build_cli() -> Command {
    Command::new("pathq")
        .about("Regular and context-free path queries over labeled graphs")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg().global(true))
        .arg(color_arg().global(true))
        .subcommand(rpq_command())
        .subcommand(cfpq_command())
        .subcommand(run_command())
        .subcommand(check_command())
        .subcommand(info_command())
}

/// Regular path query.
pub fn rpq_command() -> Command {
    Command::new("rpq")
        .about("Find vertex pairs joined by a path matching a regex")
        .override_usage(
            "\
  pathq rpq <GRAPH> -q <REGEX> [--method closure|bfs]
  pathq rpq <GRAPH> -q <REGEX> --per-source",
        )
        .after_help(
            r#"EXAMPLES:
  pathq rpq graph.txt -q 'a* b'                 # all pairs
  pathq rpq graph.txt -q 'a* b' --start 0       # paths from vertex 0
  pathq rpq graph.txt -q '(a | b)*' --method bfs
  pathq rpq graph.json -q 'a b' --per-source --json"#,
        )
        .arg(graph_path_arg())
        .arg(regex_arg())
        .arg(rpq_method_arg())
        .arg(start_vertex_arg())
        .arg(final_vertex_arg())
        .arg(per_source_arg())
        .arg(json_arg())
}

/// Context-free path query.
pub fn cfpq_command() -> Command {
    Command::new("cfpq")
        .about("Find vertex pairs joined by a path derivable from a grammar")
        .override_usage("  pathq cfpq <GRAPH> <GRAMMAR> [--method worklist|matrix]")
        .after_help(
            r#"EXAMPLES:
  pathq cfpq graph.txt brackets.cfg                    # start symbol S
  pathq cfpq graph.txt brackets.cfg --start-symbol A   # another variable
  pathq cfpq graph.txt brackets.cfg --method matrix --json"#,
        )
        .arg(graph_path_arg())
        .arg(grammar_path_arg())
        .arg(cfpq_method_arg())
        .arg(start_symbol_arg())
        .arg(start_vertex_arg())
        .arg(final_vertex_arg())
        .arg(json_arg())
}

fn script_group() -> ArgGroup {
    ArgGroup::new("script")
        .args(["script_path", "script_text"])
        .required(true)
}

/// Execute a script.
pub fn run_command() -> Command {
    Command::new("run")
        .about("Execute a script")
        .override_usage(
            "\
  pathq run <SCRIPT>
  pathq run -e <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  pathq run queries.pq
  pathq run -e 'print getLabels("a b*");'"#,
        )
        .arg(script_path_arg())
        .arg(script_text_arg())
        .group(script_group())
}

/// Validate a script without running it.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate script syntax")
        .override_usage(
            "\
  pathq check <SCRIPT>
  pathq check -e <TEXT>",
        )
        .arg(script_path_arg())
        .arg(script_text_arg())
        .group(script_group())
}

/// Summarize a graph file.
pub fn info_command() -> Command {
    Command::new("info")
        .about("Show vertex, edge and label counts of a graph, or convert it to DOT")
        .arg(graph_path_arg())
        .arg(json_arg())
        .arg(dot_arg())
}

//! Input loading and error reporting shared by the commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use pathq_core::Graph;

/// Print `error: <message>` and exit with status 1.
pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

/// Report an engine error, with rendered diagnostics for parse failures.
pub fn fail_query(err: &pathq_engine::Error, color: bool) -> ! {
    match err {
        pathq_engine::Error::Compile(err @ pathq_compiler::Error::Core(_)) => fail(err),
        pathq_engine::Error::Compile(err) => {
            let message = err.to_string();
            eprintln!("error: {}", message.lines().next().unwrap_or_default());
            eprintln!("{}", err.render(color).trim_end());
            std::process::exit(1);
        }
        pathq_engine::Error::Core(err) => fail(err),
    }
}

pub fn load_graph(path: &Path) -> Graph<String> {
    match pathq_core::load_graph(path) {
        Ok(graph) => {
            tracing::debug!(
                path = %path.display(),
                vertices = graph.vertex_count(),
                edges = graph.edge_count(),
                "loaded graph"
            );
            graph
        }
        Err(err) => fail(err),
    }
}

pub fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

/// Script text from `-e`, a file, or stdin when the path is `-`.
pub fn load_script(path: Option<&Path>, text: Option<&str>) -> Result<String, String> {
    if let Some(text) = text {
        return Ok(text.to_owned());
    }
    match path {
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("failed to read stdin: {}", e))?;
            Ok(buf)
        }
        Some(path) => read_file(path),
        None => Err("script is required: use a positional argument or -e".to_owned()),
    }
}

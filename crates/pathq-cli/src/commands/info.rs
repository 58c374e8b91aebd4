use std::path::PathBuf;

use pathq_core::GraphInfo;

use super::common::load_graph;
use super::rpq::to_json;

pub struct InfoArgs {
    pub graph_path: PathBuf,
    pub json: bool,
    pub dot: bool,
}

pub fn run(args: InfoArgs) {
    let graph = load_graph(&args.graph_path);
    if args.dot {
        print!("{}", graph.to_dot());
        return;
    }
    print!("{}", format_info(&graph.info(), args.json));
}

pub fn format_info(info: &GraphInfo, json: bool) -> String {
    if json {
        return to_json(info);
    }
    format!(
        "vertices: {}\nedges: {}\nlabels: {}\n",
        info.vertices,
        info.edges,
        info.labels.join(", ")
    )
}

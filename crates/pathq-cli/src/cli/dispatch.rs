//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` mirror the command `*Args` but are populated from clap; the
//! `From` impls resolve presentation choices such as color.

use std::path::PathBuf;

use clap::ArgMatches;
use pathq_engine::{CfpqMethod, RpqMethod};

use super::ColorChoice;
use crate::commands::cfpq::CfpqArgs;
use crate::commands::check::CheckArgs;
use crate::commands::info::InfoArgs;
use crate::commands::rpq::RpqArgs;
use crate::commands::run::RunArgs;

pub struct RpqParams {
    pub graph_path: PathBuf,
    pub query: String,
    pub method: RpqMethod,
    pub starts: Option<Vec<String>>,
    pub finals: Option<Vec<String>>,
    pub per_source: bool,
    pub json: bool,
    pub color: ColorChoice,
}

impl RpqParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            query: m.get_one::<String>("query").cloned().unwrap_or_default(),
            method: m.get_one::<RpqMethod>("method").copied().unwrap_or_default(),
            starts: vertices(m, "start"),
            finals: vertices(m, "final"),
            per_source: m.get_flag("per_source"),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<RpqParams> for RpqArgs {
    fn from(p: RpqParams) -> Self {
        Self {
            graph_path: p.graph_path,
            query: p.query,
            method: p.method,
            starts: p.starts,
            finals: p.finals,
            per_source: p.per_source,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CfpqParams {
    pub graph_path: PathBuf,
    pub grammar_path: PathBuf,
    pub method: CfpqMethod,
    pub start_symbol: Option<String>,
    pub starts: Option<Vec<String>>,
    pub finals: Option<Vec<String>>,
    pub json: bool,
    pub color: ColorChoice,
}

impl CfpqParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            grammar_path: m
                .get_one::<PathBuf>("grammar_path")
                .cloned()
                .unwrap_or_default(),
            method: m.get_one::<CfpqMethod>("method").copied().unwrap_or_default(),
            start_symbol: m.get_one::<String>("start_symbol").cloned(),
            starts: vertices(m, "start"),
            finals: vertices(m, "final"),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<CfpqParams> for CfpqArgs {
    fn from(p: CfpqParams) -> Self {
        Self {
            graph_path: p.graph_path,
            grammar_path: p.grammar_path,
            method: p.method,
            start_symbol: p.start_symbol,
            starts: p.starts,
            finals: p.finals,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct RunParams {
    pub script_path: Option<PathBuf>,
    pub script_text: Option<String>,
    pub color: ColorChoice,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            script_path: m.get_one::<PathBuf>("script_path").cloned(),
            script_text: m.get_one::<String>("script_text").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        Self {
            script_path: p.script_path,
            script_text: p.script_text,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub script_path: Option<PathBuf>,
    pub script_text: Option<String>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            script_path: m.get_one::<PathBuf>("script_path").cloned(),
            script_text: m.get_one::<String>("script_text").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            script_path: p.script_path,
            script_text: p.script_text,
            color: p.color.should_colorize(),
        }
    }
}

pub struct InfoParams {
    pub graph_path: PathBuf,
    pub json: bool,
    pub dot: bool,
}

impl InfoParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            graph_path: graph_path(m),
            json: m.get_flag("json"),
            dot: m.get_flag("dot"),
        }
    }
}

impl From<InfoParams> for InfoArgs {
    fn from(p: InfoParams) -> Self {
        Self {
            graph_path: p.graph_path,
            json: p.json,
            dot: p.dot,
        }
    }
}

/// Log level requested with `-v`: 0 = warn, 1 = debug, 2+ = trace.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_count("verbose")
}

fn graph_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("graph_path").cloned().unwrap_or_default()
}

/// Repeated vertex flag; `None` when absent so the default (all vertices)
/// applies.
fn vertices(m: &ArgMatches, id: &str) -> Option<Vec<String>> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

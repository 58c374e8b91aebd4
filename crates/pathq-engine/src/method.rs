//! Solver selection.

use std::fmt;
use std::str::FromStr;

use pathq_core::Error;

/// RPQ solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RpqMethod {
    /// Transitive closure of the product automaton.
    #[default]
    Closure,
    /// Multi-source frontier propagation.
    Bfs,
}

impl RpqMethod {
    pub const NAMES: &'static str = "closure, bfs";

    pub fn as_str(self) -> &'static str {
        match self {
            RpqMethod::Closure => "closure",
            RpqMethod::Bfs => "bfs",
        }
    }
}

impl FromStr for RpqMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closure" | "transitive-closure" => Ok(RpqMethod::Closure),
            "bfs" => Ok(RpqMethod::Bfs),
            _ => Err(Error::UnknownAlgorithm {
                name: s.to_owned(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for RpqMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CFPQ solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CfpqMethod {
    /// Hellings' worklist algorithm.
    #[default]
    Worklist,
    /// Boolean-matrix fixed point.
    Matrix,
}

impl CfpqMethod {
    pub const NAMES: &'static str = "worklist, matrix";

    pub fn as_str(self) -> &'static str {
        match self {
            CfpqMethod::Worklist => "worklist",
            CfpqMethod::Matrix => "matrix",
        }
    }
}

impl FromStr for CfpqMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "worklist" | "hellings" => Ok(CfpqMethod::Worklist),
            "matrix" => Ok(CfpqMethod::Matrix),
            _ => Err(Error::UnknownAlgorithm {
                name: s.to_owned(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for CfpqMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the path-query core.
///
/// All of these are precondition or invariant violations, never transient
/// conditions: callers surface them as-is instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A production does not have one of the shapes `A -> ε`, `A -> t`, `A -> B C`.
    #[error("malformed weak-CNF production `{head} -> {body}`")]
    MalformedGrammar { head: String, body: String },

    /// A solver name that is not one of the supported algorithms.
    #[error("unknown algorithm `{name}` (expected one of: {expected})")]
    UnknownAlgorithm { name: String, expected: &'static str },

    /// An index or state lookup missed the automaton's index bijection.
    #[error("unknown state {state} (automaton has {size} states)")]
    UnknownState { state: String, size: usize },

    /// Index space exhausted: sparse rows are addressed by `u32`.
    #[error("automaton with {states} states exceeds the supported index space")]
    TooManyStates { states: u128 },
}

impl Error {
    pub fn unknown_state(state: impl std::fmt::Debug, size: usize) -> Self {
        Self::UnknownState {
            state: format!("{state:?}"),
            size,
        }
    }

    pub fn unknown_index(index: usize, size: usize) -> Self {
        Self::UnknownState {
            state: format!("#{index}"),
            size,
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

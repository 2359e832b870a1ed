//! Shared error definitions for hook primitives.

use thiserror::Error;

/// Result alias used throughout the hook crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating hook primitive types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The provided name does not identify a lifecycle transition.
    #[error("unknown lifecycle transition `{name}`")]
    UnknownTransition {
        /// The offending name.
        name: String,
    },

    /// A transition list contained no entries.
    #[error("transition list is empty; use `none` to select no transitions")]
    EmptyTransitionList,
}

impl Error {
    /// Helper to construct [`Error::UnknownTransition`] from string-like values.
    #[must_use]
    pub fn unknown_transition(name: impl Into<String>) -> Self {
        Self::UnknownTransition { name: name.into() }
    }
}

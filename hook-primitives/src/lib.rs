//! Core shared types for lifecycle hooks.

#![warn(missing_docs, clippy::pedantic)]

mod callback;
mod error;
mod transition;

/// Shared callback handle stored in hook slots.
pub use callback::{Callback, callback};
/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Lifecycle transition kinds and sets of them.
pub use transition::{TransitionKind, TransitionSet, TransitionSetIter};

/// `tracing` target carrying per-transition debug events.
pub const TRACE_TARGET: &str = "hook_core::transition";

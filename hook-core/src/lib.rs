//! Lifecycle hooks for Rust values.
//!
//! Two independent building blocks live here:
//!
//! - [`LifetimeHook`]: a scope guard running one callback on creation and another
//!   on drop.
//! - [`TransitionHooks`]: six callback slots fired by construction, copy, move,
//!   assignment, and destruction of the instance holding them, with every
//!   transition also reported to an injected [`TransitionObserver`].
//!
//! [`Instrumented`] pairs a payload with a [`TransitionHooks`] so the payload's
//! own transitions drive the hooks.

#![warn(missing_docs, clippy::pedantic)]

mod instrumented;
mod lifetime;
mod observer;
mod transitions;

pub use hook_primitives::{Callback, TRACE_TARGET, TransitionKind, TransitionSet, callback};
pub use instrumented::Instrumented;
pub use lifetime::LifetimeHook;
pub use observer::{
    CollectingObserver, CountingObserver, NoopObserver, TracingObserver, TransitionObserver,
    TransitionTally,
};
pub use transitions::{TransitionHooks, TransitionHooksBuilder};

//! Attach callbacks to the lifecycle transitions of Rust values.
//!
//! Depend on this crate to pull in the hook building blocks. Components sit
//! behind feature flags so downstream users can drop what they do not need.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use hook_primitives as primitives;

/// Lifetime and transition hooks (enabled by `core` feature).
#[cfg(feature = "core")]
pub use hook_core as hooks;

/// Subscriber setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use hook_telemetry as telemetry;

/// Commonly used items.
pub mod prelude {
    pub use hook_primitives::{Callback, TransitionKind, TransitionSet, callback};

    #[cfg(feature = "core")]
    pub use hook_core::{
        CountingObserver, Instrumented, LifetimeHook, TracingObserver, TransitionHooks,
        TransitionObserver,
    };

    #[cfg(feature = "telemetry")]
    pub use hook_telemetry::TelemetryConfig;
}

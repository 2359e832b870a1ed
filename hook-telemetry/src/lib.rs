//! Tracing subscriber setup for binaries and tests that exercise lifecycle hooks.
//!
//! Transition events are emitted at debug level under
//! [`TRACE_TARGET`](hook_primitives::TRACE_TARGET); [`TelemetryConfig`] builds
//! the filter that decides whether they reach the output.

#![warn(missing_docs, clippy::pedantic)]

use std::env;

use hook_primitives::TRACE_TARGET;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Environment variable consulted by [`TelemetryConfig::from_env`].
pub const FILTER_ENV: &str = "RUST_LOG";

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter `{directive}`: {source}")]
    InvalidFilter {
        /// The rejected directive string.
        directive: String,
        /// Parser error from `tracing-subscriber`.
        #[source]
        source: ParseError,
    },
    /// A global subscriber was already installed.
    #[error("tracing subscriber already initialised: {reason}")]
    AlreadyInitialized {
        /// Message returned by the subscriber registry.
        reason: String,
    },
}

/// Result alias for telemetry setup.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Logging configuration for a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    directive: String,
    trace_transitions: bool,
    with_target: bool,
    ansi: bool,
}

impl TelemetryConfig {
    /// Creates a configuration using `directive` as the base filter.
    #[must_use]
    pub fn new(directive: impl Into<String>) -> Self {
        Self {
            directive: directive.into(),
            trace_transitions: false,
            with_target: false,
            ansi: true,
        }
    }

    /// Reads the base filter from `RUST_LOG`, falling back to `fallback`.
    #[must_use]
    pub fn from_env(fallback: &str) -> Self {
        let directive = env::var(FILTER_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| fallback.to_owned());
        Self::new(directive)
    }

    /// Enables debug output for every hook transition regardless of the base filter.
    #[must_use]
    pub fn trace_transitions(mut self, enabled: bool) -> Self {
        self.trace_transitions = enabled;
        self
    }

    /// Shows the event target in formatted output.
    #[must_use]
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Toggles ANSI colors in formatted output.
    #[must_use]
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    /// Returns the full filter directive, including the transition target when enabled.
    #[must_use]
    pub fn directive(&self) -> String {
        let base = self.directive.trim();
        match (self.trace_transitions, base.is_empty()) {
            (false, _) => base.to_owned(),
            (true, true) => format!("{TRACE_TARGET}=debug"),
            (true, false) => format!("{base},{TRACE_TARGET}=debug"),
        }
    }

    /// Parses the directive into an [`EnvFilter`].
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidFilter`] when the directive is malformed.
    pub fn env_filter(&self) -> TelemetryResult<EnvFilter> {
        let directive = self.directive();
        EnvFilter::try_new(&directive)
            .map_err(|source| TelemetryError::InvalidFilter { directive, source })
    }

    /// Installs a global `fmt` subscriber built from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidFilter`] for a malformed directive and
    /// [`TelemetryError::AlreadyInitialized`] when a global subscriber exists.
    pub fn init(&self) -> TelemetryResult<()> {
        let filter = self.env_filter()?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.with_target)
            .with_ansi(self.ansi)
            .try_init()
            .map_err(|err| TelemetryError::AlreadyInitialized {
                reason: err.to_string(),
            })?;
        tracing::debug!(directive = %self.directive(), "telemetry initialised");
        Ok(())
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

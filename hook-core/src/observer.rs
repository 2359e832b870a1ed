//! Observers notified of every transition a [`TransitionHooks`](crate::TransitionHooks) goes through.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use hook_primitives::{TRACE_TARGET, TransitionKind, TransitionSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sink receiving one notification per lifecycle transition.
///
/// Notifications are delivered whether or not a user callback is registered for
/// the transition, and before that callback runs.
pub trait TransitionObserver: Send + Sync {
    /// Records that the observed instance went through `kind`.
    fn on_transition(&self, kind: TransitionKind);
}

/// Observer that emits a debug-level `tracing` event per transition.
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    kinds: TransitionSet,
}

impl TracingObserver {
    /// Creates an observer reporting every transition.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kinds: TransitionSet::all(),
        }
    }

    /// Creates an observer reporting only the supplied transitions.
    #[must_use]
    pub const fn with_kinds(kinds: TransitionSet) -> Self {
        Self { kinds }
    }

    /// Returns the transitions this observer reports.
    #[must_use]
    pub const fn kinds(&self) -> TransitionSet {
        self.kinds
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionObserver for TracingObserver {
    fn on_transition(&self, kind: TransitionKind) {
        if self.kinds.contains(kind) {
            debug!(target: TRACE_TARGET, transition = %kind, "transition hooks: {kind} called");
        }
    }
}

/// Observer that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TransitionObserver for NoopObserver {
    fn on_transition(&self, _kind: TransitionKind) {}
}

/// Observer that counts transitions per kind.
#[derive(Debug, Default)]
pub struct CountingObserver {
    counts: [AtomicU64; TransitionKind::COUNT],
}

impl CountingObserver {
    /// Creates a shared counting observer.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns how many times `kind` has been observed.
    #[must_use]
    pub fn count(&self, kind: TransitionKind) -> u64 {
        self.counts[kind.index()].load(Ordering::Relaxed)
    }

    /// Returns a point-in-time copy of all counters.
    #[must_use]
    pub fn snapshot(&self) -> TransitionTally {
        TransitionTally {
            construct: self.count(TransitionKind::Construct),
            copy_construct: self.count(TransitionKind::CopyConstruct),
            move_construct: self.count(TransitionKind::MoveConstruct),
            copy_assign: self.count(TransitionKind::CopyAssign),
            move_assign: self.count(TransitionKind::MoveAssign),
            destroy: self.count(TransitionKind::Destroy),
        }
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        for counter in &self.counts {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl TransitionObserver for CountingObserver {
    fn on_transition(&self, kind: TransitionKind) {
        self.counts[kind.index()].fetch_add(1, Ordering::Relaxed);
    }
}

/// Per-kind transition counts captured by [`CountingObserver::snapshot`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTally {
    /// Fresh constructions.
    pub construct: u64,
    /// Copy constructions.
    pub copy_construct: u64,
    /// Move constructions.
    pub move_construct: u64,
    /// Copy assignments.
    pub copy_assign: u64,
    /// Move assignments.
    pub move_assign: u64,
    /// Destructions.
    pub destroy: u64,
}

impl TransitionTally {
    /// Returns the count recorded for `kind`.
    #[must_use]
    pub const fn get(&self, kind: TransitionKind) -> u64 {
        match kind {
            TransitionKind::Construct => self.construct,
            TransitionKind::CopyConstruct => self.copy_construct,
            TransitionKind::MoveConstruct => self.move_construct,
            TransitionKind::CopyAssign => self.copy_assign,
            TransitionKind::MoveAssign => self.move_assign,
            TransitionKind::Destroy => self.destroy,
        }
    }

    /// Returns the number of constructions not yet matched by a destruction.
    #[must_use]
    pub const fn live(&self) -> u64 {
        (self.construct + self.copy_construct + self.move_construct).saturating_sub(self.destroy)
    }

    /// Returns the sum of all counters.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.construct
            + self.copy_construct
            + self.move_construct
            + self.copy_assign
            + self.move_assign
            + self.destroy
    }
}

/// Observer used during testing to capture the ordered transition log.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<TransitionKind>>,
}

impl CollectingObserver {
    /// Creates a new collecting observer.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns and clears the collected transitions.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex has been poisoned by a previous panic.
    #[must_use]
    pub fn drain(&self) -> Vec<TransitionKind> {
        let mut lock = self.events.lock().expect("collecting observer poisoned");
        lock.drain(..).collect()
    }
}

impl TransitionObserver for CollectingObserver {
    fn on_transition(&self, kind: TransitionKind) {
        self.events
            .lock()
            .expect("collecting observer poisoned")
            .push(kind);
    }
}

//! Six-slot hook bundle covering every lifecycle transition.
//!
//! Rust has no user-visible move constructor or move assignment, and moves are
//! plain memory copies that cannot be intercepted. The transitions therefore map
//! onto explicit operations:
//!
//! | transition       | operation                             |
//! |------------------|---------------------------------------|
//! | construct        | [`TransitionHooks::new`], [`TransitionHooksBuilder::build`] |
//! | copy-construct   | [`Clone::clone`]                      |
//! | move-construct   | [`TransitionHooks::take`]             |
//! | copy-assign      | [`Clone::clone_from`], [`TransitionHooks::copy_assign`] |
//! | move-assign      | [`TransitionHooks::move_assign`]      |
//! | destroy          | [`Drop`]                              |
//!
//! Self-assignment cannot be expressed: both assignment forms borrow the source
//! while mutably borrowing the destination.
//!
//! ```compile_fail
//! let mut hooks = hook_core::TransitionHooks::new();
//! hooks.clone_from(&hooks);
//! ```
//!
//! ```compile_fail
//! let mut hooks = hook_core::TransitionHooks::new();
//! hooks.move_assign(&mut hooks);
//! ```

use std::fmt;
use std::mem;
use std::sync::Arc;

use hook_primitives::{Callback, TransitionKind, TransitionSet};

use crate::observer::{TracingObserver, TransitionObserver};

type Slots = [Option<Callback>; TransitionKind::COUNT];

fn default_observer() -> Arc<dyn TransitionObserver> {
    Arc::new(TracingObserver::new())
}

fn notify(slots: &Slots, observer: &dyn TransitionObserver, kind: TransitionKind) {
    observer.on_transition(kind);
    if let Some(callback) = &slots[kind.index()] {
        callback();
    }
}

/// Callback slots fired by the lifecycle transitions of the instance holding them.
///
/// Embed a `TransitionHooks` as a field to observe the enclosing value: cloning
/// the value clones the hooks, dropping it drops them. Copies and moves carry
/// every registered slot along, so the registered behavior persists.
///
/// A derived `Clone` on the enclosing type does not forward `clone_from`: the
/// default implementation is `*self = source.clone()`, which fires
/// copy-construct for the new value and destroy for the old one instead of
/// copy-assign. Implement `clone_from` by hand to forward it to this field, or
/// wrap the payload in [`Instrumented`](crate::Instrumented), which does.
///
/// Each transition first notifies the instance's [`TransitionObserver`] and then
/// runs the matching slot, if one is registered. Construction transitions run
/// before the new bundle exists, so a panicking construct, copy-construct or
/// move-construct callback leaves nothing behind to be destroyed.
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use hook_core::TransitionHooks;
/// use hook_primitives::TransitionKind;
///
/// let copies = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&copies);
/// let mut hooks = TransitionHooks::new();
/// hooks.set(TransitionKind::CopyConstruct, move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let copy = hooks.clone();
/// let _again = copy.clone();
/// assert_eq!(copies.load(Ordering::SeqCst), 2);
/// ```
pub struct TransitionHooks {
    slots: Slots,
    observer: Arc<dyn TransitionObserver>,
}

impl TransitionHooks {
    /// Creates a bundle with every slot empty, reporting to a [`TracingObserver`].
    ///
    /// The construct slot is checked after initialization, but it is always
    /// empty at that point, so only the observer is notified. Use
    /// [`TransitionHooks::builder`] to have the construct slot fire.
    #[must_use]
    pub fn new() -> Self {
        Self::with_observer(default_observer())
    }

    /// Creates an empty bundle reporting to `observer`.
    #[must_use]
    pub fn with_observer(observer: Arc<dyn TransitionObserver>) -> Self {
        Self::construct(Slots::default(), observer)
    }

    /// Starts a builder that populates slots before construction completes.
    #[must_use]
    pub fn builder() -> TransitionHooksBuilder {
        TransitionHooksBuilder::new()
    }

    fn construct(slots: Slots, observer: Arc<dyn TransitionObserver>) -> Self {
        Self::assemble(slots, observer, TransitionKind::Construct)
    }

    // Fires `kind` on the loose parts and only then wraps them, so an unwinding
    // callback never reaches `Drop`.
    fn assemble(
        slots: Slots,
        observer: Arc<dyn TransitionObserver>,
        kind: TransitionKind,
    ) -> Self {
        notify(&slots, observer.as_ref(), kind);
        Self { slots, observer }
    }

    fn fire(&self, kind: TransitionKind) {
        notify(&self.slots, self.observer.as_ref(), kind);
    }

    /// Registers `f` for `kind`, replacing any previous callback.
    pub fn set<F>(&mut self, kind: TransitionKind, f: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.set_callback(kind, Arc::new(f))
    }

    /// Registers an existing callback handle for `kind`.
    pub fn set_callback(&mut self, kind: TransitionKind, callback: Callback) -> &mut Self {
        self.slots[kind.index()] = Some(callback);
        self
    }

    /// Empties the slot for `kind`, returning its previous callback.
    pub fn clear(&mut self, kind: TransitionKind) -> Option<Callback> {
        self.slots[kind.index()].take()
    }

    /// Returns the callback registered for `kind`.
    #[must_use]
    pub fn get(&self, kind: TransitionKind) -> Option<&Callback> {
        self.slots[kind.index()].as_ref()
    }

    /// Returns `true` if a callback is registered for `kind`.
    #[must_use]
    pub fn is_set(&self, kind: TransitionKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Returns the set of transitions with a registered callback.
    #[must_use]
    pub fn registered(&self) -> TransitionSet {
        TransitionKind::ALL
            .into_iter()
            .filter(|kind| self.is_set(*kind))
            .collect()
    }

    /// Returns the observer notified of this instance's transitions.
    #[must_use]
    pub fn observer(&self) -> &Arc<dyn TransitionObserver> {
        &self.observer
    }

    /// Replaces the observer notified of this instance's transitions.
    pub fn set_observer(&mut self, observer: Arc<dyn TransitionObserver>) {
        self.observer = observer;
    }

    /// Move-constructs a new bundle from `self`.
    ///
    /// Every slot is transferred, leaving `self` with empty slots; it stays
    /// usable and its eventual drop runs no callback. The new bundle shares
    /// this instance's observer and then fires its move-construct slot.
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self::assemble(
            mem::take(&mut self.slots),
            Arc::clone(&self.observer),
            TransitionKind::MoveConstruct,
        )
    }

    /// Copy-assigns `source` into `self`.
    ///
    /// Every slot of `self` is overwritten with a duplicate of the matching slot
    /// of `source`, then the copy-assign slot of `self` fires. The observer of
    /// `self` is kept.
    pub fn copy_assign(&mut self, source: &Self) {
        self.slots.clone_from(&source.slots);
        self.fire(TransitionKind::CopyAssign);
    }

    /// Move-assigns `source` into `self`.
    ///
    /// Every slot is transferred from `source`, which is left with empty slots,
    /// then the move-assign slot of `self` fires. Callbacks previously held by
    /// `self` are released without running. The observer of `self` is kept.
    pub fn move_assign(&mut self, source: &mut Self) {
        self.slots = mem::take(&mut source.slots);
        self.fire(TransitionKind::MoveAssign);
    }
}

impl Default for TransitionHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TransitionHooks {
    fn clone(&self) -> Self {
        Self::assemble(
            self.slots.clone(),
            Arc::clone(&self.observer),
            TransitionKind::CopyConstruct,
        )
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_assign(source);
    }
}

impl Drop for TransitionHooks {
    fn drop(&mut self) {
        self.fire(TransitionKind::Destroy);
    }
}

impl fmt::Debug for TransitionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionHooks")
            .field("registered", &self.registered())
            .finish_non_exhaustive()
    }
}

/// Builder for [`TransitionHooks`] whose construct slot is populated up front.
#[must_use]
pub struct TransitionHooksBuilder {
    slots: Slots,
    observer: Option<Arc<dyn TransitionObserver>>,
}

impl TransitionHooksBuilder {
    /// Starts a builder with every slot empty.
    pub fn new() -> Self {
        Self {
            slots: Slots::default(),
            observer: None,
        }
    }

    /// Registers `f` for `kind`.
    pub fn on<F>(mut self, kind: TransitionKind, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.slots[kind.index()] = Some(Arc::new(f));
        self
    }

    /// Registers an existing callback handle for `kind`.
    pub fn callback(mut self, kind: TransitionKind, callback: Callback) -> Self {
        self.slots[kind.index()] = Some(callback);
        self
    }

    /// Registers the construct callback; it fires from [`build`](Self::build).
    pub fn on_construct<F>(self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on(TransitionKind::Construct, f)
    }

    /// Registers the copy-construct callback.
    pub fn on_copy_construct<F>(self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on(TransitionKind::CopyConstruct, f)
    }

    /// Registers the move-construct callback.
    pub fn on_move_construct<F>(self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on(TransitionKind::MoveConstruct, f)
    }

    /// Registers the copy-assign callback.
    pub fn on_copy_assign<F>(self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on(TransitionKind::CopyAssign, f)
    }

    /// Registers the move-assign callback.
    pub fn on_move_assign<F>(self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on(TransitionKind::MoveAssign, f)
    }

    /// Registers the destroy callback.
    pub fn on_destroy<F>(self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on(TransitionKind::Destroy, f)
    }

    /// Installs the observer; defaults to a [`TracingObserver`].
    pub fn observer(mut self, observer: Arc<dyn TransitionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Constructs the bundle and fires its construct slot.
    #[must_use]
    pub fn build(self) -> TransitionHooks {
        let observer = self.observer.unwrap_or_else(default_observer);
        TransitionHooks::construct(self.slots, observer)
    }
}

impl Default for TransitionHooksBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Value wrapper that runs [`TransitionHooks`] alongside its payload.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use crate::transitions::TransitionHooks;

/// Payload paired with the hooks observing its transitions.
///
/// Copying or moving an `Instrumented` copies or moves the payload first and
/// then runs the matching hook transition, so callbacks see the payload
/// already in place. Dropping it drops the payload, then fires the destroy slot.
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use hook_core::{Instrumented, TransitionHooks};
///
/// let copies = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&copies);
/// let hooks = TransitionHooks::builder()
///     .on_copy_construct(move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     })
///     .build();
///
/// let names = Instrumented::new(vec!["a".to_string()], hooks);
/// let mut copy = names.clone();
/// copy.push("b".to_string());
///
/// assert_eq!(names.len(), 1);
/// assert_eq!(copy.len(), 2);
/// assert_eq!(copies.load(Ordering::SeqCst), 1);
/// ```
pub struct Instrumented<T> {
    value: T,
    hooks: TransitionHooks,
}

impl<T> Instrumented<T> {
    /// Wraps `value` with `hooks`.
    #[must_use]
    pub fn new(value: T, hooks: TransitionHooks) -> Self {
        Self { value, hooks }
    }

    /// Returns the hooks attached to the payload.
    #[must_use]
    pub const fn hooks(&self) -> &TransitionHooks {
        &self.hooks
    }

    /// Returns the hooks for registering or clearing callbacks.
    pub fn hooks_mut(&mut self) -> &mut TransitionHooks {
        &mut self.hooks
    }

    /// Unwraps the payload, destroying the hooks.
    #[must_use]
    pub fn into_inner(self) -> T {
        let Self { value, hooks } = self;
        drop(hooks);
        value
    }
}

impl<T: Default> Instrumented<T> {
    /// Move-constructs a new wrapper, leaving a default payload and empty
    /// hook slots behind.
    #[must_use]
    pub fn take(&mut self) -> Self {
        let value = mem::take(&mut self.value);
        Self {
            value,
            hooks: self.hooks.take(),
        }
    }

    /// Move-assigns `source` into `self`, leaving a default payload and empty
    /// hook slots in `source`.
    pub fn move_assign(&mut self, source: &mut Self) {
        self.value = mem::take(&mut source.value);
        self.hooks.move_assign(&mut source.hooks);
    }
}

impl<T: Default> Default for Instrumented<T> {
    fn default() -> Self {
        Self::new(T::default(), TransitionHooks::new())
    }
}

impl<T: Clone> Clone for Instrumented<T> {
    fn clone(&self) -> Self {
        let value = self.value.clone();
        Self {
            value,
            hooks: self.hooks.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.value.clone_from(&source.value);
        self.hooks.clone_from(&source.hooks);
    }
}

impl<T> Deref for Instrumented<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Instrumented<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Instrumented<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrumented")
            .field("value", &self.value)
            .field("hooks", &self.hooks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use hook_primitives::TransitionKind;

    use crate::observer::{CountingObserver, NoopObserver};

    fn recording(log: &Arc<Mutex<Vec<String>>>) -> TransitionHooks {
        let mut hooks = TransitionHooks::with_observer(Arc::new(NoopObserver));
        for kind in TransitionKind::ALL {
            let log = Arc::clone(log);
            hooks.set(kind, move || log.lock().unwrap().push(kind.to_string()));
        }
        hooks
    }

    #[test]
    fn clone_copies_payload_and_fires_copy_construct() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let original = Instrumented::new(7_u32, recording(&log));
        let copy = original.clone();
        assert_eq!(*copy, 7);
        assert_eq!(log.lock().unwrap().as_slice(), ["copy_construct"]);
    }

    #[test]
    fn clone_from_copy_assigns_both_parts() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let source = Instrumented::new(vec![1, 2, 3], recording(&log));
        let mut dest = Instrumented::new(
            Vec::new(),
            TransitionHooks::with_observer(Arc::new(NoopObserver)),
        );

        dest.clone_from(&source);
        assert_eq!(*dest, vec![1, 2, 3]);
        assert!(dest.hooks().is_set(TransitionKind::Destroy));
        assert_eq!(log.lock().unwrap().as_slice(), ["copy_assign"]);
    }

    #[test]
    fn take_moves_payload_and_hooks() {
        let observer = CountingObserver::new();
        let mut source = Instrumented::new(
            String::from("payload"),
            TransitionHooks::with_observer(observer.clone()),
        );
        source.hooks_mut().set(TransitionKind::Destroy, || {});

        let moved = source.take();
        assert_eq!(moved.as_str(), "payload");
        assert!(source.is_empty());
        assert!(moved.hooks().is_set(TransitionKind::Destroy));
        assert!(source.hooks().registered().is_empty());
        assert_eq!(observer.count(TransitionKind::MoveConstruct), 1);
    }

    #[test]
    fn move_assign_transfers_payload() {
        let observer = CountingObserver::new();
        let mut source =
            Instrumented::new(vec![1], TransitionHooks::with_observer(observer.clone()));
        let mut dest =
            Instrumented::new(vec![9, 9], TransitionHooks::with_observer(observer.clone()));

        dest.move_assign(&mut source);
        assert_eq!(*dest, vec![1]);
        assert!(source.is_empty());
        assert_eq!(observer.count(TransitionKind::MoveAssign), 1);
    }

    #[test]
    fn drop_and_into_inner_fire_destroy() {
        let observer = CountingObserver::new();
        let wrapped =
            Instrumented::new(5_i64, TransitionHooks::with_observer(observer.clone()));
        let value = wrapped.into_inner();
        assert_eq!(value, 5);
        assert_eq!(observer.count(TransitionKind::Destroy), 1);

        drop(Instrumented::new((), TransitionHooks::with_observer(observer.clone())));
        assert_eq!(observer.count(TransitionKind::Destroy), 2);
        assert_eq!(observer.snapshot().live(), 0);
    }
}

//! Scoped create/destroy hook.

use std::fmt;

type CreateFn<'c> = Box<dyn FnOnce() + 'c>;
type DestroyFn<'a> = Box<dyn FnOnce() + 'a>;

/// Runs one callback when constructed and another when dropped.
///
/// The create callback runs before the constructor returns and is not kept.
/// The destroy callback runs exactly once, when the hook goes out of scope.
/// Neither callback needs to be `Send`; a hook holding a non-`Send` destroy
/// callback stays on the thread that created it.
///
/// ```
/// use std::cell::Cell;
/// use hook_core::LifetimeHook;
///
/// let created = Cell::new(false);
/// let destroyed = Cell::new(false);
/// {
///     let _hook = LifetimeHook::new(|| created.set(true), || destroyed.set(true));
///     assert!(created.get());
///     assert!(!destroyed.get());
/// }
/// assert!(destroyed.get());
/// ```
#[must_use = "dropping the hook runs its destroy callback immediately"]
pub struct LifetimeHook<'a> {
    on_destroy: Option<DestroyFn<'a>>,
}

impl<'a> LifetimeHook<'a> {
    /// Runs `on_create` now and arms `on_destroy` for scope exit.
    pub fn new<C, D>(on_create: C, on_destroy: D) -> Self
    where
        C: FnOnce(),
        D: FnOnce() + 'a,
    {
        on_create();
        Self::on_drop(on_destroy)
    }

    /// Arms `on_destroy` for scope exit without a create callback.
    pub fn on_drop<D>(on_destroy: D) -> Self
    where
        D: FnOnce() + 'a,
    {
        Self {
            on_destroy: Some(Box::new(on_destroy)),
        }
    }

    /// Builds a hook from optional callbacks; absent callbacks are skipped.
    pub fn with_callbacks(
        on_create: Option<CreateFn<'_>>,
        on_destroy: Option<DestroyFn<'a>>,
    ) -> Self {
        if let Some(on_create) = on_create {
            on_create();
        }
        Self { on_destroy }
    }

    /// Returns `true` while a destroy callback is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.on_destroy.is_some()
    }
}

impl Drop for LifetimeHook<'_> {
    fn drop(&mut self) {
        if let Some(on_destroy) = self.on_destroy.take() {
            on_destroy();
        }
    }
}

impl fmt::Debug for LifetimeHook<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifetimeHook")
            .field("armed", &self.is_armed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn create_fires_before_constructor_returns() {
        let created = AtomicUsize::new(0);
        let hook = LifetimeHook::new(
            || {
                created.fetch_add(1, Ordering::SeqCst);
            },
            || {},
        );
        assert_eq!(created.load(Ordering::SeqCst), 1);
        drop(hook);
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn destroy_fires_once_at_scope_exit() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        {
            let counter = Arc::clone(&destroyed);
            let hook = LifetimeHook::on_drop(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            assert!(hook.is_armed());
            assert_eq!(destroyed.load(Ordering::SeqCst), 0);
        }
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn destroy_follows_the_hook_when_moved() {
        let destroyed = AtomicUsize::new(0);
        let counter = &destroyed;
        let hooks: Vec<LifetimeHook<'_>> = (0..3)
            .map(|_| {
                LifetimeHook::on_drop(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();
        assert_eq!(destroyed.load(Ordering::SeqCst), 0);
        drop(hooks);
        assert_eq!(destroyed.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn destroy_may_capture_thread_local_state() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let on_create = Rc::clone(&log);
            let on_destroy = Rc::clone(&log);
            let _hook = LifetimeHook::new(
                move || on_create.borrow_mut().push("create"),
                move || on_destroy.borrow_mut().push("destroy"),
            );
            log.borrow_mut().push("body");
        }
        assert_eq!(*log.borrow(), ["create", "body", "destroy"]);
        assert_eq!(Rc::strong_count(&log), 1);
    }

    #[test]
    fn absent_callbacks_are_skipped() {
        let hook = LifetimeHook::with_callbacks(None, None);
        assert!(!hook.is_armed());
        drop(hook);
    }

    #[test]
    fn optional_callbacks_fire_when_present() {
        let created = AtomicUsize::new(0);
        let destroyed = AtomicUsize::new(0);
        let hook = LifetimeHook::with_callbacks(
            Some(Box::new(|| {
                created.fetch_add(1, Ordering::SeqCst);
            })),
            Some(Box::new(|| {
                destroyed.fetch_add(1, Ordering::SeqCst);
            })),
        );
        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert_eq!(destroyed.load(Ordering::SeqCst), 0);
        drop(hook);
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn create_only_hook_is_not_armed() {
        let created = AtomicUsize::new(0);
        let hook = LifetimeHook::with_callbacks(
            Some(Box::new(|| {
                created.fetch_add(1, Ordering::SeqCst);
            })),
            None,
        );
        assert!(!hook.is_armed());
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }
}

//! Callback handles stored in hook slots.

use std::sync::Arc;

/// Zero-argument callback invoked when a lifecycle transition fires.
///
/// Handles are reference counted: copying a hook bundle clones the handle, so
/// both bundles run the same closure and share whatever it captures.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Wraps a closure into a [`Callback`].
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
/// let cb = hook_primitives::callback(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
/// cb();
/// cb();
/// assert_eq!(hits.load(Ordering::SeqCst), 2);
/// ```
#[must_use]
pub fn callback<F>(f: F) -> Callback
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

//! Per-thread logger binding
//!
//! Each thread has one slot holding the logger meant for it. Shared code
//! calls [`ContextBinding::resolve`] and gets that logger, or the registry's
//! root logger when the thread never bound one. Slots are thread-local, so
//! no locking is involved and one thread's binding is invisible to others.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use super::logger::NamedLogger;
use super::registry::LoggerRegistry;

thread_local! {
    static BOUND_LOGGER: RefCell<Option<Arc<NamedLogger>>> = const { RefCell::new(None) };
}

/// Access to the calling thread's logger slot
pub struct ContextBinding;

impl ContextBinding {
    /// Store `logger` for the calling thread, replacing any earlier binding
    pub fn bind(logger: Arc<NamedLogger>) {
        BOUND_LOGGER.with(|slot| *slot.borrow_mut() = Some(logger));
    }

    /// The logger bound on this thread, if any
    pub fn current() -> Option<Arc<NamedLogger>> {
        BOUND_LOGGER.with(|slot| slot.borrow().clone())
    }

    /// The logger bound on this thread, falling back to `registry`'s root
    pub fn resolve(registry: &LoggerRegistry) -> Arc<NamedLogger> {
        Self::current().unwrap_or_else(|| registry.root())
    }

    /// Remove this thread's binding, returning it
    pub fn clear() -> Option<Arc<NamedLogger>> {
        BOUND_LOGGER.with(|slot| slot.replace(None))
    }

    /// Bind `logger` until the returned guard drops, then restore the
    /// previous binding
    pub fn scoped(logger: Arc<NamedLogger>) -> BindingGuard {
        let previous = BOUND_LOGGER.with(|slot| slot.replace(Some(logger)));
        BindingGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

/// Restores the previous binding on drop
///
/// Tied to the thread that created it.
#[must_use = "the binding is reverted when the guard is dropped"]
pub struct BindingGuard {
    previous: Option<Arc<NamedLogger>>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for BindingGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        BOUND_LOGGER.with(|slot| *slot.borrow_mut() = previous);
    }
}

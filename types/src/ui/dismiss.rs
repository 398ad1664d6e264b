//! LIFO stack of overlay dismiss handlers.
//!
//! Every overlay registers a close handler when it opens. A single cancel
//! signal (Esc) at app scope pops and runs the most recent handler, so nested
//! overlays close one layer at a time without knowing about each other.
//!
//! The stack is a cheap cloneable handle over shared state. Create one per
//! app and hand clones to whatever opens overlays.
//!
//! Handlers never run while the stack is borrowed, so a handler may freely
//! push, pop, clear, or drop registrations on the same stack.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Handler = Box<dyn FnOnce()>;

/// Identifies one pushed handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct Entry {
    id: HandlerId,
    handler: Handler,
}

#[derive(Default)]
struct Inner {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Inner {
    fn push(&mut self, handler: Handler) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, handler });
        id
    }

    fn remove(&mut self, id: HandlerId) -> Option<Entry> {
        let pos = self.entries.iter().rposition(|entry| entry.id == id)?;
        Some(self.entries.remove(pos))
    }
}

/// What the cancel listener did with a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// A handler ran; the signal must not propagate further.
    Consumed,
    /// Nothing was registered; the signal is free for other uses.
    Ignored,
}

impl CancelOutcome {
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

#[derive(Clone, Default)]
pub struct DismissStack {
    inner: Rc<RefCell<Inner>>,
}

impl DismissStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler`. Pushing the same logical handler twice registers it
    /// twice; tie pushes to overlay open, not to every render.
    pub fn push(&self, handler: impl FnOnce() + 'static) -> HandlerId {
        let id = self.inner.borrow_mut().push(Box::new(handler));
        tracing::trace!(?id, depth = self.len(), "dismiss handler pushed");
        id
    }

    /// Remove and run the most recent handler. Returns whether one ran.
    pub fn pop(&self) -> bool {
        let entry = self.inner.borrow_mut().entries.pop();
        match entry {
            Some(entry) => {
                tracing::debug!(id = ?entry.id, depth = self.len(), "dismissing top overlay");
                (entry.handler)();
                true
            }
            None => false,
        }
    }

    /// Drop every handler without running any of them.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut self.inner.borrow_mut().entries);
        if !drained.is_empty() {
            tracing::trace!(count = drained.len(), "dismiss stack cleared");
        }
        drop(drained);
    }

    /// Push `handler` for as long as the returned guard lives.
    ///
    /// Dropping the guard removes the handler (without running it) if a cancel
    /// signal has not already consumed it. Overlays hold the guard while
    /// visible so that every exit path, unwinding included, deregisters.
    #[must_use = "dropping the registration immediately deregisters the handler"]
    pub fn register(&self, handler: impl FnOnce() + 'static) -> DismissRegistration {
        let id = self.push(handler);
        DismissRegistration {
            stack: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// App-scope cancel listener: pop one handler if any is registered.
    pub fn handle_cancel(&self) -> CancelOutcome {
        if self.pop() {
            CancelOutcome::Consumed
        } else {
            CancelOutcome::Ignored
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for DismissStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissStack")
            .field("depth", &self.len())
            .finish()
    }
}

/// Scoped registration returned by [`DismissStack::register`].
#[derive(Debug)]
pub struct DismissRegistration {
    stack: Weak<RefCell<Inner>>,
    id: HandlerId,
}

impl DismissRegistration {
    /// Whether the handler is still waiting on the stack.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.stack
            .upgrade()
            .is_some_and(|inner| inner.borrow().entries.iter().any(|e| e.id == self.id))
    }
}

impl Drop for DismissRegistration {
    fn drop(&mut self) {
        let Some(inner) = self.stack.upgrade() else {
            return;
        };
        let removed = inner.borrow_mut().remove(self.id);
        if removed.is_some() {
            tracing::trace!(id = ?self.id, "dismiss handler released");
        }
        // The handler (and anything it captured) drops here, after the borrow.
        drop(removed);
    }
}

//! In-process model of the page document.
//!
//! The header acquires three page-global resources: a scroll listener, an
//! Escape keydown listener, and the body scroll lock. Each acquisition returns
//! an RAII handle; dropping the handle is the only way to release it. The
//! registry counts what is currently held so callers (and tests) can assert
//! that nothing outlives its owner.
//!
//! Single-threaded, like the browser main thread: [`Document`] is an
//! `Rc<RefCell<..>>` handle and is deliberately `!Send`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    #[error("body scroll lock is already held")]
    ScrollLockHeld,
}

/// Kinds of document-level listeners the header registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListenerKind {
    Scroll,
    EscapeKey,
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerKind::Scroll => write!(f, "scroll"),
            ListenerKind::EscapeKey => write!(f, "keydown(Escape)"),
        }
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    listeners: BTreeMap<ListenerKind, usize>,
    scroll_locked: bool,
    scroll_offset: f64,
}

/// Shared handle to the page document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    state: Rc<RefCell<DocumentState>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays active until the handle is dropped.
    pub fn add_listener(&self, kind: ListenerKind) -> ListenerHandle {
        *self.state.borrow_mut().listeners.entry(kind).or_insert(0) += 1;
        tracing::trace!(%kind, "listener added");
        ListenerHandle {
            document: self.clone(),
            kind,
        }
    }

    /// Number of live listeners of `kind`.
    pub fn active_listeners(&self, kind: ListenerKind) -> usize {
        self.state
            .borrow()
            .listeners
            .get(&kind)
            .copied()
            .unwrap_or(0)
    }

    /// Acquire the body scroll lock. Fails if another owner holds it.
    pub fn lock_scroll(&self) -> Result<ScrollLock, DocumentError> {
        let mut state = self.state.borrow_mut();
        if state.scroll_locked {
            return Err(DocumentError::ScrollLockHeld);
        }
        state.scroll_locked = true;
        tracing::trace!("body scroll locked");
        Ok(ScrollLock {
            document: self.clone(),
        })
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.state.borrow().scroll_locked
    }

    /// Record a new viewport scroll offset. Ignored while the body is locked,
    /// since the page underneath cannot move.
    pub fn scroll_to(&self, offset: f64) -> f64 {
        let mut state = self.state.borrow_mut();
        if !state.scroll_locked {
            state.scroll_offset = offset.max(0.0);
        }
        state.scroll_offset
    }

    pub fn scroll_offset(&self) -> f64 {
        self.state.borrow().scroll_offset
    }

    fn remove_listener(&self, kind: ListenerKind) {
        let mut state = self.state.borrow_mut();
        if let Some(count) = state.listeners.get_mut(&kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                state.listeners.remove(&kind);
            }
        }
        tracing::trace!(%kind, "listener removed");
    }

    fn unlock_scroll(&self) {
        self.state.borrow_mut().scroll_locked = false;
        tracing::trace!("body scroll unlocked");
    }
}

/// A registered document listener. Deregisters on drop.
#[must_use = "dropping the handle removes the listener immediately"]
#[derive(Debug)]
pub struct ListenerHandle {
    document: Document,
    kind: ListenerKind,
}

impl ListenerHandle {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.document.remove_listener(self.kind);
    }
}

/// The held body scroll lock. Releases on drop.
#[must_use = "dropping the lock releases it immediately"]
#[derive(Debug)]
pub struct ScrollLock {
    document: Document,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.document.unlock_scroll();
    }
}

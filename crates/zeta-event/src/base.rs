//! Type-erased glue between events and contexts.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use zeta_core::alloc::{IndexMap, index_map};

use crate::id::{ContextId, EventId};

/// Payload-independent view of an event, held weakly by every context that
/// joined it.
pub(crate) trait EventBase {
    fn event_id(&self) -> EventId;

    /// Remove `context`, deferring the removal if an emission is running.
    fn unregister_context(&self, context: ContextId);

    /// Store the handler registered by `old` under `new` instead, keeping its
    /// dispatch position. No handler is invoked.
    fn rekey_context(&self, old: ContextId, new: ContextId, link: Weak<ContextState>);
}

pub(crate) type EventLink = Weak<dyn EventBase>;

/// Heap-pinned half of an [`EventContext`](crate::EventContext).
///
/// Events keep a `Weak` to this so they can drop themselves from the
/// context's joined set when they are destroyed.
pub(crate) struct ContextState {
    id: ContextId,
    joined: RefCell<IndexMap<EventId, EventLink>>,
}

impl ContextState {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            id: ContextId::next(),
            joined: RefCell::new(index_map()),
        })
    }

    pub(crate) fn id(&self) -> ContextId {
        self.id
    }

    pub(crate) fn join(&self, event: EventId, link: EventLink) {
        self.joined.borrow_mut().insert(event, link);
    }

    pub(crate) fn forget(&self, event: EventId) {
        self.joined.borrow_mut().shift_remove(&event);
    }

    pub(crate) fn is_joined(&self, event: EventId) -> bool {
        self.joined.borrow().contains_key(&event)
    }

    pub(crate) fn joined_count(&self) -> usize {
        self.joined.borrow().len()
    }

    /// Detach the joined set, leaving this context with no events.
    ///
    /// Callers iterate the returned map without holding a borrow, so events
    /// are free to call [`ContextState::forget`] meanwhile.
    pub(crate) fn take_joined(&self) -> IndexMap<EventId, EventLink> {
        std::mem::replace(&mut *self.joined.borrow_mut(), index_map())
    }
}

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use zeta_core::alloc::{HashMap, HashSet, IndexMap, index_map};
use zeta_core::profiling::profile_function;

use crate::base::{ContextState, EventBase, EventLink};
use crate::context::EventContext;
use crate::id::{ContextId, EventId};

/// Callback stored for one subscriber of an [`Event<A>`].
pub type Handler<A> = Rc<dyn Fn(&A)>;

struct Subscriber<A> {
    handler: Handler<A>,
    context: Weak<ContextState>,
}

struct EventState<A> {
    id: EventId,
    subscribers: RefCell<IndexMap<ContextId, Subscriber<A>>>,
    /// Removals requested while emitting. Always empty between emissions.
    pending_removal: RefCell<HashSet<ContextId>>,
    /// Re-keys performed while emitting: id at emission start -> current id.
    relocated: RefCell<HashMap<ContextId, ContextId>>,
    /// Nesting depth of running emissions.
    depth: Cell<u32>,
}

/// A typed broadcast signal.
///
/// Subscribers are [`EventContext`]s; each context holds at most one handler
/// per event and handlers run in the order their contexts first registered.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use zeta_event::{Event, EventContext};
///
/// let on_resize: Event<(u32, u32)> = Event::new();
/// let area = Rc::new(Cell::new(0));
///
/// let ctx = EventContext::new();
/// let sink = Rc::clone(&area);
/// ctx.register_event(&on_resize, move |&(w, h)| sink.set(w * h));
///
/// on_resize.emit((4, 3));
/// assert_eq!(area.get(), 12);
/// ```
pub struct Event<A: 'static = ()> {
    state: Rc<EventState<A>>,
}

impl<A: 'static> Event<A> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(EventState {
                id: EventId::next(),
                subscribers: RefCell::new(index_map()),
                pending_removal: RefCell::new(HashSet::new()),
                relocated: RefCell::new(HashMap::new()),
                depth: Cell::new(0),
            }),
        }
    }

    pub fn id(&self) -> EventId {
        self.state.id
    }

    /// Register `context` with `handler`, replacing any handler it already
    /// had on this event. Same as [`EventContext::register_event`].
    pub fn register(&self, context: &EventContext, handler: impl Fn(&A) + 'static) {
        context.register_event(self, handler);
    }

    /// Same as [`EventContext::unregister_event`]. Unknown contexts are ignored.
    pub fn unregister(&self, context: &EventContext) {
        context.unregister_event(self);
    }

    /// Invoke every live handler with `payload`.
    ///
    /// Only subscribers present when the call starts are visited. A
    /// subscriber unregistered by an earlier handler is skipped and removed
    /// once the outermost emission returns.
    pub fn emit(&self, payload: A) {
        profile_function!();
        let state = &*self.state;

        let snapshot: Vec<(ContextId, Handler<A>)> = state
            .subscribers
            .borrow()
            .iter()
            .map(|(id, sub)| (*id, Rc::clone(&sub.handler)))
            .collect();

        state.depth.set(state.depth.get() + 1);
        let _guard = EmitGuard { state };

        for (id, handler) in snapshot {
            if state.is_live(id, &handler) {
                handler(&payload);
            }
        }
    }

    /// Number of subscribers that will be visited by the next emission.
    pub fn len(&self) -> usize {
        let pending = self.state.pending_removal.borrow();
        self.state
            .subscribers
            .borrow()
            .keys()
            .filter(|id| !pending.contains(*id))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `context` has a handler here that is not pending removal.
    pub fn is_registered(&self, context: &EventContext) -> bool {
        self.contains(context.id())
    }

    pub fn contains(&self, id: ContextId) -> bool {
        self.state.subscribers.borrow().contains_key(&id)
            && !self.state.pending_removal.borrow().contains(&id)
    }

    /// Live subscriber ids in dispatch order.
    pub fn subscriber_ids(&self) -> Vec<ContextId> {
        let pending = self.state.pending_removal.borrow();
        self.state
            .subscribers
            .borrow()
            .keys()
            .filter(|id| !pending.contains(*id))
            .copied()
            .collect()
    }

    pub fn is_emitting(&self) -> bool {
        self.state.depth.get() > 0
    }

    pub fn pending_removal_count(&self) -> usize {
        self.state.pending_removal.borrow().len()
    }

    pub(crate) fn insert(&self, id: ContextId, handler: Handler<A>, link: Weak<ContextState>) {
        self.state.insert(id, handler, link);
    }

    pub(crate) fn remove(&self, id: ContextId) {
        self.state.remove(id);
    }

    pub(crate) fn link(&self) -> EventLink {
        let state: Rc<dyn EventBase> = self.state.clone();
        Rc::downgrade(&state)
    }
}

impl<A: 'static> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.state.id)
            .field("subscribers", &self.state.subscribers.borrow().len())
            .field("pending_removal", &self.state.pending_removal.borrow().len())
            .finish()
    }
}

impl<A: 'static> Drop for Event<A> {
    fn drop(&mut self) {
        let subscribers = std::mem::replace(&mut *self.state.subscribers.borrow_mut(), index_map());
        for (_, subscriber) in subscribers {
            if let Some(context) = subscriber.context.upgrade() {
                context.forget(self.state.id);
            }
        }
        tracing::trace!("{} dropped", self.state.id);
    }
}

impl<A> EventState<A> {
    fn insert(&self, id: ContextId, handler: Handler<A>, context: Weak<ContextState>) {
        // Bound so the old handler is dropped after the borrow ends; it may own
        // contexts that unregister from this event.
        let replaced = self
            .subscribers
            .borrow_mut()
            .insert(id, Subscriber { handler, context });
        // Re-registration wins over a removal requested earlier in this emission.
        self.pending_removal.borrow_mut().remove(&id);

        if replaced.is_some() {
            tracing::trace!("{} replaced handler of {}", self.id, id);
        } else {
            tracing::trace!("{} registered {}", self.id, id);
        }
        drop(replaced);
    }

    fn remove(&self, id: ContextId) {
        if !self.subscribers.borrow().contains_key(&id) {
            return;
        }

        if self.depth.get() > 0 {
            self.pending_removal.borrow_mut().insert(id);
            tracing::trace!("{} deferred removal of {}", self.id, id);
        } else {
            let removed = self.subscribers.borrow_mut().shift_remove(&id);
            tracing::trace!("{} unregistered {}", self.id, id);
            drop(removed);
        }
    }

    /// Whether a snapshot entry should still be invoked.
    fn is_live(&self, id: ContextId, handler: &Handler<A>) -> bool {
        let id = self.relocated.borrow().get(&id).copied().unwrap_or(id);

        if self.pending_removal.borrow().contains(&id) {
            return false;
        }

        self.subscribers
            .borrow()
            .get(&id)
            .is_some_and(|sub| Rc::ptr_eq(&sub.handler, handler))
    }

    fn finish_emit(&self) {
        let depth = self.depth.get().saturating_sub(1);
        self.depth.set(depth);
        if depth > 0 {
            return;
        }

        self.relocated.borrow_mut().clear();

        let pending = std::mem::take(&mut *self.pending_removal.borrow_mut());
        if pending.is_empty() {
            return;
        }

        let removed: Vec<Subscriber<A>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            pending
                .iter()
                .filter_map(|id| subscribers.shift_remove(id))
                .collect()
        };
        tracing::trace!("{} flushed {} deferred removals", self.id, removed.len());
        // Dropped handlers may own contexts that now leave this event directly.
        drop(removed);
    }
}

impl<A> EventBase for EventState<A> {
    fn event_id(&self) -> EventId {
        self.id
    }

    fn unregister_context(&self, context: ContextId) {
        self.remove(context);
    }

    fn rekey_context(&self, old: ContextId, new: ContextId, link: Weak<ContextState>) {
        if old == new {
            return;
        }

        let stale = {
            let mut subscribers = self.subscribers.borrow_mut();
            // A stale entry under `new` can only be one awaiting deferred removal.
            let stale = subscribers.shift_remove(&new);

            let Some((index, _, mut subscriber)) = subscribers.shift_remove_full(&old) else {
                drop(subscribers);
                drop(stale);
                return;
            };
            subscriber.context = link;
            subscribers.shift_insert(index, new, subscriber);
            stale
        };

        {
            let mut pending = self.pending_removal.borrow_mut();
            pending.remove(&old);
            pending.remove(&new);
        }

        if self.depth.get() > 0 {
            // Keys stay the ids entries had when the emission started, so a
            // lookup is a single hop even when contexts move back and forth.
            let mut relocated = self.relocated.borrow_mut();
            for current in relocated.values_mut() {
                if *current == old {
                    *current = new;
                }
            }
            relocated.entry(old).or_insert(new);
        }

        tracing::trace!("{} re-keyed {} -> {}", self.id, old, new);
        drop(stale);
    }
}

/// Closes an emission even if a handler unwinds.
struct EmitGuard<'a, A> {
    state: &'a EventState<A>,
}

impl<A> Drop for EmitGuard<'_, A> {
    fn drop(&mut self) {
        self.state.finish_emit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn log() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_emit_without_subscribers_is_noop() {
        let event: Event<u8> = Event::new();
        event.emit(1);
        assert!(event.is_empty());
        assert!(!event.is_emitting());
        assert_eq!(event.pending_removal_count(), 0);
    }

    #[test]
    fn test_dispatch_order_is_registration_order() {
        let event: Event<i32> = Event::new();
        let calls = log();
        let contexts: Vec<EventContext> = (0..3).map(|_| EventContext::new()).collect();

        for (i, ctx) in contexts.iter().enumerate() {
            let calls = Rc::clone(&calls);
            ctx.register_event(&event, move |v| calls.borrow_mut().push(format!("{i}:{v}")));
        }

        event.emit(5);
        assert_eq!(*calls.borrow(), vec!["0:5", "1:5", "2:5"]);
        assert_eq!(
            event.subscriber_ids(),
            contexts.iter().map(EventContext::id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_overwrite_keeps_dispatch_position() {
        let event: Event = Event::new();
        let calls = log();
        let first = EventContext::new();
        let second = EventContext::new();

        let c = Rc::clone(&calls);
        first.register_event(&event, move |_| c.borrow_mut().push("first".into()));
        let c = Rc::clone(&calls);
        second.register_event(&event, move |_| c.borrow_mut().push("second".into()));
        let c = Rc::clone(&calls);
        first.register_event(&event, move |_| c.borrow_mut().push("first-again".into()));

        event.emit(());
        assert_eq!(*calls.borrow(), vec!["first-again", "second"]);
        assert_eq!(event.len(), 2);
    }

    #[test]
    fn test_pending_removal_is_flushed_after_emit() {
        let event: Rc<Event<()>> = Rc::new(Event::new());
        let victim = Rc::new(EventContext::new());
        let remover = EventContext::new();

        let (e, v) = (Rc::clone(&event), Rc::clone(&victim));
        remover.register_event(&event, move |_| {
            e.unregister(&v);
            assert!(e.is_emitting());
            assert_eq!(e.pending_removal_count(), 1);
            assert!(!e.is_registered(&v));
        });
        victim.register_event(&event, |_| panic!("victim must be skipped"));

        event.emit(());
        assert_eq!(event.pending_removal_count(), 0);
        assert_eq!(event.state.subscribers.borrow().len(), 1);
    }

    #[test]
    fn test_flush_waits_for_outermost_emission() {
        let event: Rc<Event<u32>> = Rc::new(Event::new());
        let ctx = Rc::new(EventContext::new());
        let calls = log();

        let (e, c, calls2) = (Rc::clone(&event), Rc::clone(&ctx), Rc::clone(&calls));
        ctx.register_event(&event, move |depth| {
            calls2.borrow_mut().push(format!("depth {depth}"));
            if *depth == 0 {
                e.unregister(&c);
                e.emit(1);
                // Still physically present until the outer emission ends.
                assert_eq!(e.pending_removal_count(), 1);
            }
        });

        event.emit(0);
        assert_eq!(*calls.borrow(), vec!["depth 0"]);
        assert_eq!(event.pending_removal_count(), 0);
        assert!(event.is_empty());
    }

    #[test]
    fn test_reregistration_cancels_pending_removal() {
        let event: Rc<Event<()>> = Rc::new(Event::new());
        let ctx = Rc::new(EventContext::new());
        let hits = Rc::new(Cell::new(0));

        let (e, c, h) = (Rc::clone(&event), Rc::clone(&ctx), Rc::clone(&hits));
        ctx.register_event(&event, move |_| {
            e.unregister(&c);
            let h = Rc::clone(&h);
            c.register_event(&e, move |_| h.set(h.get() + 1));
        });

        event.emit(());
        assert_eq!(hits.get(), 0, "replacement is not visited by the running emission");
        assert!(event.is_registered(&ctx));

        event.emit(());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_panicking_handler_still_closes_emission() {
        let event: Event<()> = Event::new();
        let ctx = EventContext::new();
        ctx.register_event(&event, |_| panic!("boom"));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| event.emit(())));
        assert!(result.is_err());
        assert!(!event.is_emitting());

        ctx.unregister_event(&event);
        assert!(event.is_empty());
        assert_eq!(event.pending_removal_count(), 0);
    }
}

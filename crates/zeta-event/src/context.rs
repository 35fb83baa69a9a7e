use std::fmt;
use std::rc::Rc;

use crate::base::ContextState;
use crate::event::{Event, Handler};
use crate::id::ContextId;

/// Subscriber-side anchor for event handlers.
///
/// Embed one in any object that registers handlers. Dropping the context
/// unregisters it from every event it joined, so no handler outlives its
/// owner.
///
/// An ordinary Rust move of an `EventContext` keeps all subscriptions intact
/// since its state lives on the heap. [`EventContext::take`] and
/// [`EventContext::assign_from`] hand the subscriptions to a different
/// identity instead.
///
/// `EventContext` is deliberately not `Clone`: two contexts answering to the
/// same id would unregister each other's handlers.
pub struct EventContext {
    state: Rc<ContextState>,
}

impl EventContext {
    pub fn new() -> Self {
        Self {
            state: ContextState::new(),
        }
    }

    pub fn id(&self) -> ContextId {
        self.state.id()
    }

    /// Register `handler` on `event` for this context.
    ///
    /// Registering again on the same event replaces the previous handler.
    pub fn register_event<A: 'static>(&self, event: &Event<A>, handler: impl Fn(&A) + 'static) {
        let handler: Handler<A> = Rc::new(handler);
        event.insert(self.id(), handler, Rc::downgrade(&self.state));
        self.state.join(event.id(), event.link());
    }

    /// Remove this context's handler from `event`.
    ///
    /// Inside a running emission of `event` the handler is skipped right away
    /// and physically removed when the emission ends.
    pub fn unregister_event<A: 'static>(&self, event: &Event<A>) {
        event.remove(self.id());
        self.state.forget(event.id());
    }

    /// Move every subscription into a new context with a fresh id.
    ///
    /// Each joined event re-keys its handler from this context's id to the
    /// new one without invoking it. `self` is left with no subscriptions.
    pub fn take(&self) -> EventContext {
        let target = EventContext::new();
        target.adopt(self);
        target
    }

    /// Replace this context's subscriptions with those of `source`.
    ///
    /// Existing subscriptions of `self` are released first, exactly as if it
    /// were dropped. `source` is left with no subscriptions. Assigning a
    /// context to itself does nothing.
    pub fn assign_from(&self, source: &EventContext) {
        if Rc::ptr_eq(&self.state, &source.state) {
            return;
        }
        self.release_all();
        self.adopt(source);
    }

    pub fn joined_count(&self) -> usize {
        self.state.joined_count()
    }

    pub fn is_joined<A: 'static>(&self, event: &Event<A>) -> bool {
        self.state.is_joined(event.id())
    }

    fn adopt(&self, source: &EventContext) {
        let (old, new) = (source.id(), self.id());
        let joined = source.state.take_joined();
        if joined.is_empty() {
            return;
        }

        for (event_id, link) in joined {
            let Some(event) = link.upgrade() else {
                continue;
            };
            event.rekey_context(old, new, Rc::downgrade(&self.state));
            self.state.join(event_id, link);
        }
        tracing::trace!("relocated subscriptions {} -> {}", old, new);
    }

    fn release_all(&self) {
        let id = self.id();
        for (_, link) in self.state.take_joined() {
            if let Some(event) = link.upgrade() {
                tracing::trace!("{} leaving {}", id, event.event_id());
                event.unregister_context(id);
            }
        }
    }
}

impl Default for EventContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventContext {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl fmt::Debug for EventContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventContext")
            .field("id", &self.id())
            .field("joined", &self.joined_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_register_tracks_joined_events() {
        let quit: Event = Event::new();
        let resize: Event<(u32, u32)> = Event::new();
        let ctx = EventContext::new();

        ctx.register_event(&quit, |_| {});
        ctx.register_event(&resize, |_| {});
        ctx.register_event(&resize, |_| {});

        assert_eq!(ctx.joined_count(), 2);
        assert!(ctx.is_joined(&quit));
        assert!(ctx.is_joined(&resize));

        ctx.unregister_event(&quit);
        assert!(!ctx.is_joined(&quit));
        assert!(!quit.is_registered(&ctx));
        assert_eq!(ctx.joined_count(), 1);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let event: Event<u8> = Event::new();
        let ctx = EventContext::new();
        ctx.unregister_event(&event);
        assert_eq!(ctx.joined_count(), 0);
        assert!(event.is_empty());
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let event: Event<u8> = Event::new();
        let hits = Rc::new(Cell::new(0u32));
        let source = EventContext::new();
        let h = Rc::clone(&hits);
        source.register_event(&event, move |v| h.set(h.get() + *v as u32));

        let target = source.take();
        assert_ne!(source.id(), target.id());
        assert_eq!(source.joined_count(), 0);
        assert_eq!(target.joined_count(), 1);
        assert_eq!(hits.get(), 0, "relocation must not invoke handlers");

        drop(source);
        event.emit(3);
        assert_eq!(hits.get(), 3);
        assert_eq!(event.subscriber_ids(), vec![target.id()]);
    }

    #[test]
    fn test_assign_from_self_is_noop() {
        let event: Event = Event::new();
        let ctx = EventContext::new();
        ctx.register_event(&event, |_| {});

        ctx.assign_from(&ctx);
        assert!(event.is_registered(&ctx));
        assert_eq!(ctx.joined_count(), 1);
    }

    #[test]
    fn test_take_empty_context() {
        let ctx = EventContext::new();
        let moved = ctx.take();
        assert_eq!(moved.joined_count(), 0);
        assert_eq!(ctx.joined_count(), 0);
    }

    #[test]
    fn test_debug_output() {
        let ctx = EventContext::new();
        let text = format!("{:?}", ctx);
        assert!(text.contains("EventContext"));
        assert!(text.contains("joined: 0"));
    }
}

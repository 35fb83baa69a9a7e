//! Typed events with subscriber lifetime tracking.
//!
//! An [`Event<A>`] is a broadcast channel for payloads of type `A` (use a
//! tuple for several arguments and `()` for none). Objects that want to be
//! called back embed an [`EventContext`] and register handlers through it.
//!
//! Neither side owns the other:
//!
//! - dropping an [`EventContext`] unregisters it from every event it joined,
//! - dropping an [`Event`] makes every subscribed context forget it,
//! - [`EventContext::take`] and [`EventContext::assign_from`] move all
//!   subscriptions to another identity without running any handler.
//!
//! Handlers may register, unregister, relocate or drop contexts while an
//! emission is running. Removals requested mid-emission are deferred until
//! the emission finishes; registrations made mid-emission are first visited
//! by the next emission.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use zeta_event::{Event, EventContext};
//!
//! let on_value: Event<i32> = Event::new();
//! let received = Rc::new(Cell::new(-1));
//!
//! let ctx = EventContext::new();
//! let sink = Rc::clone(&received);
//! ctx.register_event(&on_value, move |v| sink.set(*v));
//!
//! on_value.emit(42);
//! assert_eq!(received.get(), 42);
//!
//! drop(ctx);
//! on_value.emit(7);
//! assert_eq!(received.get(), 42);
//! ```
//!
//! Everything here is single-threaded: events and contexts are `!Send`.

mod base;
mod context;
mod event;
mod id;

pub use context::EventContext;
pub use event::{Event, Handler};
pub use id::{ContextId, EventId};

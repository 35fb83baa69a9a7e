use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_EVENT_ID: AtomicU64 = AtomicU64::new(1);

/// Counters start at 1 and only return to 0 after wrapping, which would
/// hand out ids that are already in use.
fn next_raw(counter: &AtomicU64) -> NonZeroU64 {
    match NonZeroU64::new(counter.fetch_add(1, Ordering::Relaxed)) {
        Some(id) => id,
        None => panic!("id counter exhausted"),
    }
}

/// Identity of an [`EventContext`](crate::EventContext).
///
/// Ids are handed out from a process-wide counter and never reused, so a
/// relocated context always answers to a different id than its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(NonZeroU64);

impl ContextId {
    pub(crate) fn next() -> Self {
        Self(next_raw(&NEXT_CONTEXT_ID))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

/// Identity of an [`Event`](crate::Event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(NonZeroU64);

impl EventId {
    pub(crate) fn next() -> Self {
        Self(next_raw(&NEXT_EVENT_ID))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.0)
    }
}

static_assertions::assert_eq_size!(ContextId, Option<ContextId>);
static_assertions::assert_eq_size!(EventId, Option<EventId>);

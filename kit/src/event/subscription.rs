use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Source of registry identities, so a token is never honoured by a registry
/// that did not issue it.
static NEXT_ORIGIN: AtomicU64 = AtomicU64::new(0);

/// Allocates a new registry identity.
#[inline]
pub(crate) fn next_origin() -> u64 {
    NEXT_ORIGIN.fetch_add(1, Ordering::Relaxed)
}

/// Opaque handle for one subscriber, returned by `subscribe`.
///
/// Pass it to `unsubscribe` to drop that subscriber while leaving the others on
/// the same topic in place. Dropping the token does not unsubscribe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    origin: u64,
    topic: String,
    id: u64,
}

impl Subscription {
    #[inline]
    pub(crate) fn new(origin: u64, topic: String, id: u64) -> Self {
        Self { origin, topic, id }
    }

    /// The topic this subscriber listens on.
    #[inline]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[inline]
    pub(crate) fn origin(&self) -> u64 {
        self.origin
    }

    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}#{}", self.topic, self.id)
    }
}

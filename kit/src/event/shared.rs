//! Thread-safe topic registry.
//!
//! [`SharedRegistry`] has the same dispatch rules as
//! [`Registry`](crate::event::Registry) but every method takes `&self`, so it can
//! be shared behind an `Arc` and subscribers may call back into it.
//!
//! # Locking
//!
//! Topics live in a `DashMap`. All changes to a topic's list happen under that
//! topic's shard lock, and a publish copies the list (cheap `Arc` clones) under
//! the same lock. The lock is released before any subscriber runs, which gives
//! two guarantees:
//!
//! - A publish always sees a consistent list: the one present when it started.
//! - Subscribers may `subscribe`, `unsubscribe` or `remove` on the same registry
//!   without deadlocking. Those changes apply to the next publish.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use dashmap::DashMap;
use log::{debug, trace};

use crate::event::{BoxError, Config, Subscription, subscription::next_origin};

/// Shared subscriber as stored by [`SharedRegistry`].
type Handler<P, E> = Arc<dyn Fn(Option<&P>) -> Result<(), E> + Send + Sync>;

/// Topic registry and dispatcher that can be shared between threads.
///
/// # Example
///
/// ```rust
/// use rusty_kit::event::SharedRegistry;
/// use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
///
/// let registry: Arc<SharedRegistry<u64>> = Arc::new(SharedRegistry::new());
/// let total = Arc::new(AtomicUsize::new(0));
///
/// let sum = Arc::clone(&total);
/// registry.subscribe("tick", move |n| {
///     sum.fetch_add(n.copied().unwrap_or(0) as usize, Ordering::SeqCst);
///     Ok(())
/// });
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let registry = Arc::clone(&registry);
///         std::thread::spawn(move || registry.publish("tick", &5))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap().unwrap();
/// }
///
/// assert_eq!(total.load(Ordering::SeqCst), 20);
/// ```
pub struct SharedRegistry<P: ?Sized, E = BoxError> {
    /// Identity stamped into every token this registry issues.
    origin: u64,

    /// Subscribers per topic, ordered by id.
    topics: DashMap<String, Vec<(u64, Handler<P, E>)>>,

    /// Next subscriber id. Only advanced while holding the target topic's lock.
    next_id: AtomicU64,

    config: Config,
}

impl<P: ?Sized, E> SharedRegistry<P, E> {
    /// Creates an empty registry with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty registry sized by `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            origin: next_origin(),
            topics: DashMap::with_capacity(config.topic_capacity),
            next_id: AtomicU64::new(0),
            config,
        }
    }

    /// The sizing this registry was created with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Appends `handler` to the subscribers of `topic`, creating the topic if needed.
    pub fn subscribe<F>(&self, topic: impl Into<String>, handler: F) -> Subscription
    where
        F: Fn(Option<&P>) -> Result<(), E> + Send + Sync + 'static,
    {
        let topic = topic.into();
        let handler: Handler<P, E> = Arc::new(handler);
        let capacity = self.config.subscriber_capacity;

        // Allocate the id under the topic lock so each list stays sorted by id.
        let mut list = self
            .topics
            .entry(topic.clone())
            .or_insert_with(|| Vec::with_capacity(capacity));
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        list.push((id, handler));
        drop(list);

        trace!("subscribed #{id} to `{topic}`");
        Subscription::new(self.origin, topic, id)
    }

    /// Calls every subscriber of `topic` with `payload`, in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by a subscriber, unchanged. Subscribers
    /// after the failing one are not called.
    #[inline]
    pub fn publish(&self, topic: &str, payload: &P) -> Result<(), E> {
        self.dispatch(topic, Some(payload))
    }

    /// Calls every subscriber of `topic` without a payload.
    #[inline]
    pub fn notify(&self, topic: &str) -> Result<(), E> {
        self.dispatch(topic, None)
    }

    fn dispatch(&self, topic: &str, payload: Option<&P>) -> Result<(), E> {
        let snapshot: Vec<Handler<P, E>> = match self.topics.get(topic) {
            Some(list) => list.iter().map(|(_, handler)| Arc::clone(handler)).collect(),
            None => return Ok(()),
        };

        let total = snapshot.len();
        for (position, handler) in snapshot.iter().enumerate() {
            if let Err(err) = handler(payload) {
                debug!(
                    "publish on `{topic}` stopped at subscriber {} of {total}",
                    position + 1
                );
                return Err(err);
            }
        }
        Ok(())
    }

    /// Drops every subscriber of `topic` and returns how many there were.
    pub fn remove(&self, topic: &str) -> usize {
        let removed = self.topics.remove(topic).map_or(0, |(_, list)| list.len());
        if removed > 0 {
            trace!("removed `{topic}` with {removed} subscriber(s)");
        }
        removed
    }

    /// Drops the single subscriber identified by `subscription`.
    ///
    /// Returns `false` if it was already gone, or if the token was issued by
    /// another registry.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        if subscription.origin() != self.origin {
            return false;
        }

        let emptied = {
            let Some(mut list) = self.topics.get_mut(subscription.topic()) else {
                return false;
            };
            let Ok(index) = list.binary_search_by_key(&subscription.id(), |(id, _)| *id) else {
                return false;
            };
            let (_, handler) = list.remove(index);
            drop(handler);
            list.is_empty()
        };

        // Re-checked under the lock: another thread may have subscribed since.
        if emptied {
            self.topics
                .remove_if(subscription.topic(), |_, list| list.is_empty());
        }
        trace!("unsubscribed {subscription}");
        true
    }

    /// Number of subscribers currently registered for `topic`.
    #[inline]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, |list| list.len())
    }

    /// Returns `true` if `topic` has at least one subscriber.
    #[inline]
    pub fn contains(&self, topic: &str) -> bool {
        self.subscriber_count(topic) > 0
    }

    /// Topics with at least one subscriber, sorted.
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self
            .topics
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        topics.sort_unstable();
        topics
    }

    /// Returns `true` if no topic has a subscriber.
    pub fn is_empty(&self) -> bool {
        self.topics.iter().all(|entry| entry.value().is_empty())
    }

    /// Drops every subscriber of every topic.
    pub fn clear(&self) {
        self.topics.clear();
    }
}

impl<P: ?Sized, E> Default for SharedRegistry<P, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized, E> fmt::Debug for SharedRegistry<P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for topic in self.topics() {
            let count = self.subscriber_count(&topic);
            map.entry(&topic, &count);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::{Mutex, OnceLock, Weak, atomic::AtomicUsize},
        thread,
    };

    type Log = Arc<Mutex<Vec<String>>>;

    fn record(registry: &SharedRegistry<u32>, topic: &str, label: &'static str, log: &Log) -> Subscription {
        let log = Arc::clone(log);
        registry.subscribe(topic, move |payload| {
            let value = payload.map_or("-".to_string(), u32::to_string);
            log.lock().unwrap().push(format!("{label}:{value}"));
            Ok(())
        })
    }

    // ==================== Dispatch ====================

    #[test]
    fn publish_preserves_registration_order() {
        // Given
        let log = Log::default();
        let registry = SharedRegistry::new();
        record(&registry, "t", "h1", &log);
        record(&registry, "t", "h2", &log);

        // When
        registry.publish("t", &3).unwrap();

        // Then
        assert_eq!(*log.lock().unwrap(), vec!["h1:3", "h2:3"]);
    }

    #[test]
    fn publish_unknown_topic_is_noop() {
        let registry: SharedRegistry<u32> = SharedRegistry::new();

        assert!(registry.notify("nobody").is_ok());
    }

    #[test]
    fn failing_subscriber_aborts_fan_out() {
        // Given
        let log = Log::default();
        let registry: SharedRegistry<u32, String> = SharedRegistry::new();
        registry.subscribe("t", |_| Err("first failed".to_string()));
        let sink = Arc::clone(&log);
        registry.subscribe("t", move |_| {
            sink.lock().unwrap().push("second".into());
            Ok(())
        });

        // When
        let result = registry.notify("t");

        // Then
        assert_eq!(result, Err("first failed".to_string()));
        assert!(log.lock().unwrap().is_empty());
    }

    // ==================== Removal ====================

    #[test]
    fn remove_and_unsubscribe() {
        // Given
        let log = Log::default();
        let registry = SharedRegistry::new();
        let first = record(&registry, "t", "h1", &log);
        record(&registry, "t", "h2", &log);
        record(&registry, "u", "u", &log);

        // When
        assert!(registry.unsubscribe(&first));
        registry.notify("t").unwrap();
        let removed = registry.remove("t");
        registry.notify("t").unwrap();

        // Then
        assert_eq!(removed, 1);
        assert_eq!(*log.lock().unwrap(), vec!["h2:-"]);
        assert_eq!(registry.topics(), vec!["u".to_string()]);
        assert!(!registry.unsubscribe(&first));
    }

    #[test]
    fn unsubscribing_last_subscriber_drops_topic() {
        let log = Log::default();
        let registry = SharedRegistry::new();
        let token = record(&registry, "t", "h", &log);

        assert!(registry.unsubscribe(&token));

        assert!(registry.is_empty());
        assert!(!registry.contains("t"));
    }

    // ==================== Re-entrancy ====================

    #[test]
    fn subscribe_during_publish_applies_to_next_publish() {
        // Given - a subscriber that adds another subscriber every time it runs
        let registry: Arc<SharedRegistry<u32>> = Arc::new(SharedRegistry::new());
        let late_calls = Arc::new(AtomicUsize::new(0));

        let weak: Weak<SharedRegistry<u32>> = Arc::downgrade(&registry);
        let counter = Arc::clone(&late_calls);
        registry.subscribe("t", move |_| {
            if let Some(registry) = weak.upgrade() {
                let counter = Arc::clone(&counter);
                registry.subscribe("t", move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                });
            }
            Ok(())
        });

        // When
        registry.notify("t").unwrap();

        // Then - the subscriber added mid-publish did not run
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);
        assert_eq!(registry.subscriber_count("t"), 2);

        // When
        registry.notify("t").unwrap();

        // Then
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remove_during_publish_does_not_stop_it() {
        // Given
        let log = Log::default();
        let registry: Arc<SharedRegistry<u32>> = Arc::new(SharedRegistry::new());
        let weak = Arc::downgrade(&registry);
        registry.subscribe("t", move |_| {
            if let Some(registry) = weak.upgrade() {
                registry.remove("t");
            }
            Ok(())
        });
        record(&registry, "t", "after", &log);

        // When
        registry.notify("t").unwrap();
        registry.notify("t").unwrap();

        // Then
        assert_eq!(*log.lock().unwrap(), vec!["after:-"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn unsubscribe_self_during_publish_applies_to_next_publish() {
        // Given - "a" drops its own subscription the first time it runs
        let log = Log::default();
        let registry: Arc<SharedRegistry<u32>> = Arc::new(SharedRegistry::new());
        let own_token: Arc<OnceLock<Subscription>> = Arc::new(OnceLock::new());

        let weak = Arc::downgrade(&registry);
        let token = Arc::clone(&own_token);
        let sink = Arc::clone(&log);
        let first = registry.subscribe("t", move |_| {
            sink.lock().unwrap().push("a".to_string());
            if let (Some(registry), Some(token)) = (weak.upgrade(), token.get()) {
                registry.unsubscribe(token);
            }
            Ok(())
        });
        own_token.set(first).unwrap();

        let sink = Arc::clone(&log);
        registry.subscribe("t", move |_| {
            sink.lock().unwrap().push("b".to_string());
            Ok(())
        });

        // When
        registry.notify("t").unwrap();
        registry.notify("t").unwrap();

        // Then - the in-flight publish still reached "b"; the next one skipped "a"
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "b"]);
        assert_eq!(registry.subscriber_count("t"), 1);
    }

    // ==================== Threads ====================

    #[test]
    fn concurrent_subscribe_and_publish() {
        // Given
        let registry: Arc<SharedRegistry<u32>> = Arc::new(SharedRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));

        // When - 4 threads each subscribe 25 handlers to the same topic
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    for _ in 0..25 {
                        let calls = Arc::clone(&calls);
                        registry.subscribe("t", move |_| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok(())
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        registry.notify("t").unwrap();

        // Then
        assert_eq!(registry.subscriber_count("t"), 100);
        assert_eq!(calls.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn debug_lists_topic_counts() {
        let log = Log::default();
        let registry = SharedRegistry::new();
        record(&registry, "b", "b", &log);
        record(&registry, "a", "a", &log);
        record(&registry, "a", "a", &log);

        assert_eq!(format!("{registry:?}"), r#"{"a": 2, "b": 1}"#);
    }
}

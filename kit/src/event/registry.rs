//! Single-threaded topic registry.
//!
//! This module provides [`Registry`], which owns every subscriber for a set of
//! topics and dispatches payloads to them.
//!
//! # Overview
//!
//! - **Subscription**: closures are attached to a topic with
//!   [`subscribe()`](Registry::subscribe) and receive a [`Subscription`] token.
//! - **Dispatch**: [`publish()`](Registry::publish) and
//!   [`notify()`](Registry::notify) call a topic's subscribers in registration order.
//! - **Removal**: a whole topic with [`remove()`](Registry::remove), or a single
//!   subscriber with [`unsubscribe()`](Registry::unsubscribe).
//!
//! # Storage
//!
//! Each topic maps to a `Vec<(id, handler)>`. Ids come from a per-registry counter
//! that only increases, so each list is sorted by id and its order is the
//! registration order. Unsubscribing binary-searches the id.
//!
//! # Example
//!
//! ```rust
//! use rusty_kit::event::Registry;
//! use std::{cell::RefCell, rc::Rc};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut registry: Registry<u32> = Registry::new();
//!
//! let sink = Rc::clone(&seen);
//! registry.subscribe("damage", move |amount| {
//!     sink.borrow_mut().push(amount.copied());
//!     Ok(())
//! });
//!
//! registry.publish("damage", &50).unwrap();
//! registry.notify("damage").unwrap();
//!
//! assert_eq!(*seen.borrow(), vec![Some(50), None]);
//! ```

use std::{collections::HashMap, fmt};

use log::{debug, trace};

use crate::event::{BoxError, Config, Subscription, subscription::next_origin};

/// Boxed subscriber as stored by [`Registry`].
type Handler<P, E> = Box<dyn FnMut(Option<&P>) -> Result<(), E>>;

/// Topic registry and dispatcher for a single thread.
///
/// `P` is the payload type handed to subscribers (by reference) and `E` is the
/// error a subscriber may return to abort a publish.
///
/// # Thread Safety
///
/// `Registry` is not thread-safe and its subscribers need not be `Send`. Every
/// mutation and every publish takes `&mut self`, so a subscriber cannot borrow
/// the registry that is dispatching it. A registry held in `Rc<RefCell<_>>` can
/// be reached from a subscriber, but the re-borrow panics with `BorrowMutError`
/// while the publish holds the outer borrow. Use
/// [`SharedRegistry`](crate::event::SharedRegistry) when subscribers need to
/// call back into the registry or when it is shared across threads.
pub struct Registry<P: ?Sized, E = BoxError> {
    /// Identity stamped into every token this registry issues.
    origin: u64,

    /// Subscribers per topic, ordered by id.
    topics: HashMap<String, Vec<(u64, Handler<P, E>)>>,

    /// Next subscriber id.
    next_id: u64,

    config: Config,
}

impl<P: ?Sized, E> Registry<P, E> {
    /// Creates an empty registry with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty registry sized by `config`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rusty_kit::event::{Config, Registry};
    ///
    /// let registry: Registry<str> =
    ///     Registry::with_config(Config::new().with_topic_capacity(256));
    /// assert!(registry.is_empty());
    /// ```
    pub fn with_config(config: Config) -> Self {
        Self {
            origin: next_origin(),
            topics: HashMap::with_capacity(config.topic_capacity),
            next_id: 0,
            config,
        }
    }

    /// The sizing this registry was created with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Appends `handler` to the subscribers of `topic`, creating the topic if needed.
    ///
    /// The same closure may be subscribed any number of times; every subscription
    /// is called on each publish.
    pub fn subscribe<F>(&mut self, topic: impl Into<String>, handler: F) -> Subscription
    where
        F: FnMut(Option<&P>) -> Result<(), E> + 'static,
    {
        let topic = topic.into();
        let handler: Handler<P, E> = Box::new(handler);
        let id = self.next_id;
        self.next_id += 1;

        let capacity = self.config.subscriber_capacity;
        self.topics
            .entry(topic.clone())
            .or_insert_with(|| Vec::with_capacity(capacity))
            .push((id, handler));

        trace!("subscribed #{id} to `{topic}`");
        Subscription::new(self.origin, topic, id)
    }

    /// Calls every subscriber of `topic` with `payload`, in registration order.
    ///
    /// Does nothing if the topic has no subscribers.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by a subscriber, unchanged. Subscribers
    /// after the failing one are not called.
    #[inline]
    pub fn publish(&mut self, topic: &str, payload: &P) -> Result<(), E> {
        self.dispatch(topic, Some(payload))
    }

    /// Calls every subscriber of `topic` without a payload.
    ///
    /// Subscribers receive `None`. Otherwise identical to [`publish()`](Self::publish).
    #[inline]
    pub fn notify(&mut self, topic: &str) -> Result<(), E> {
        self.dispatch(topic, None)
    }

    fn dispatch(&mut self, topic: &str, payload: Option<&P>) -> Result<(), E> {
        let Some(subscribers) = self.topics.get_mut(topic) else {
            return Ok(());
        };

        let total = subscribers.len();
        for (position, (_, handler)) in subscribers.iter_mut().enumerate() {
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
    ///
    /// Removing an unknown topic is a no-op that returns 0.
    pub fn remove(&mut self, topic: &str) -> usize {
        let removed = self.topics.remove(topic).map_or(0, |list| list.len());
        if removed > 0 {
            trace!("removed `{topic}` with {removed} subscriber(s)");
        }
        removed
    }

    /// Drops the single subscriber identified by `subscription`.
    ///
    /// Returns `false` if it was already gone, or if the token was issued by
    /// another registry.
    pub fn unsubscribe(&mut self, subscription: &Subscription) -> bool {
        if subscription.origin() != self.origin {
            return false;
        }
        let Some(list) = self.topics.get_mut(subscription.topic()) else {
            return false;
        };
        let Ok(index) = list.binary_search_by_key(&subscription.id(), |(id, _)| *id) else {
            return false;
        };

        let (_, handler) = list.remove(index);
        drop(handler);
        if list.is_empty() {
            self.topics.remove(subscription.topic());
        }
        trace!("unsubscribed {subscription}");
        true
    }

    /// Number of subscribers currently registered for `topic`.
    #[inline]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Vec::len)
    }

    /// Returns `true` if `topic` has at least one subscriber.
    #[inline]
    pub fn contains(&self, topic: &str) -> bool {
        self.subscriber_count(topic) > 0
    }

    /// Topics with at least one subscriber, sorted.
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = self
            .topics
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(topic, _)| topic.as_str())
            .collect();
        topics.sort_unstable();
        topics
    }

    /// Returns `true` if no topic has a subscriber.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.topics.values().all(Vec::is_empty)
    }

    /// Drops every subscriber of every topic.
    pub fn clear(&mut self) {
        self.topics.clear();
    }
}

impl<P: ?Sized, E> Default for Registry<P, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized, E> fmt::Debug for Registry<P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for topic in self.topics() {
            map.entry(&topic, &self.subscriber_count(topic));
        }
        map.finish()
    }
}

//! Keyed, synchronous publish/subscribe.
//!
//! A registry maps string topics to an ordered list of subscribers. Publishing on
//! a topic calls every subscriber registered for it, in registration order, on the
//! calling thread, before `publish` returns.
//!
//! Two registries share the same surface:
//!
//! - [`Registry`]: single-threaded, `&mut self` mutation, `FnMut` subscribers.
//! - [`SharedRegistry`]: `Send + Sync`, `&self` mutation, `Fn + Send + Sync`
//!   subscribers. Subscribers may call back into the registry while being
//!   dispatched.
//!
//! # Dispatch Rules
//!
//! - Publishing on a topic with no subscribers does nothing and returns `Ok(())`.
//! - Subscribing the same closure twice makes it run twice per publish.
//! - The first subscriber that returns `Err` stops the fan-out. Its error is
//!   returned from `publish` as-is and later subscribers are not called.
//! - A publish works on the subscriber list as it was when the publish started.
//!   Subscriptions and removals made while it runs apply to the next publish.
//!
//! # Example
//!
//! ```rust
//! use rusty_kit::event::Registry;
//!
//! let mut registry: Registry<String> = Registry::new();
//!
//! let token = registry.subscribe("user.login", |name| {
//!     println!("welcome back, {}", name.map(String::as_str).unwrap_or("stranger"));
//!     Ok(())
//! });
//!
//! registry.publish("user.login", &String::from("ada")).unwrap();
//! registry.notify("user.login").unwrap();
//!
//! assert!(registry.unsubscribe(&token));
//! assert!(registry.is_empty());
//! ```

pub mod config;
pub mod registry;
pub mod shared;
pub mod subscription;

pub use config::Config;
pub use registry::Registry;
pub use shared::SharedRegistry;
pub use subscription::Subscription;

/// Default subscriber error type: any error that can cross threads.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

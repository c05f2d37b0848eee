//! Small in-process building blocks.
//!
//! - [`seq`]: cursor-based sequence iteration and structural comparison.
//! - [`event`]: keyed, synchronous publish/subscribe registries.
//! - [`logging`]: a channel-backed `log::Log` implementation for hosts that want to
//!   consume log records themselves.

pub mod event;
pub mod logging;
pub mod seq;

pub use event::{Registry, SharedRegistry, Subscription};
pub use seq::{Cursor, OutOfBounds, SequenceIterator, make_iterator, sequences_equal};

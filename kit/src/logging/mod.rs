//! Log sinks for hosts that want to handle records themselves.
//!
//! The library only emits records through the `log` facade and never installs a
//! logger. Binaries and tests pick a sink; [`ChannelLogger`] forwards records over
//! a `crossbeam` channel so another thread (a UI, a test assertion) can drain them.

pub mod channel;

pub use channel::{ChannelLogger, LogMessage};

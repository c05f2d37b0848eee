//! Benchmark utilities for Rusty Kit.
//!
//! - **Sequence benchmarks**: lock-step comparison over slices and lazy iterators
//! - **Dispatch benchmarks**: publish fan-out on the single-threaded and shared registries
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_bench -- fan_out
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod fixtures;

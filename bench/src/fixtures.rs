//! Seeded input generation so every run benchmarks the same data.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed shared by all fixtures.
pub const SEED: u64 = 12345;

/// A pair of equal random sequences of length `len`.
pub fn equal_pair(len: usize) -> (Vec<u64>, Vec<u64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let left: Vec<u64> = (0..len).map(|_| rng.r#gen()).collect();
    let right = left.clone();
    (left, right)
}

/// A pair of random sequences of length `len` that differ only at `at`.
pub fn mismatched_pair(len: usize, at: usize) -> (Vec<u64>, Vec<u64>) {
    let (left, mut right) = equal_pair(len);
    if let Some(value) = right.get_mut(at) {
        *value = value.wrapping_add(1);
    }
    (left, right)
}

/// Random topic names of the form `topic.N`, `count` of them, drawn from `distinct` values.
pub fn topics(count: usize, distinct: usize) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    (0..count)
        .map(|_| format!("topic.{}", rng.gen_range(0..distinct.max(1))))
        .collect()
}

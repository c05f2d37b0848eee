//! Cursor-based iteration over ordered sequences.
//!
//! This module separates *where* elements live from *how* they are walked:
//!
//! - [`Sequence`] describes any ordered, finite, indexable collection.
//! - [`SequenceIterator`] is a position-aware reader with an explicit
//!   `advance` / `is_done` / `current` protocol.
//! - [`Cursor`] is the `{ source, cursor }` reader over a [`Sequence`].
//! - [`Stepper`] adapts any [`Iterator`] to the same protocol.
//! - [`sequences_equal`] and [`first_mismatch`] compare two readers structurally.
//!
//! # State Machine
//!
//! Every reader is either *active* (an element is available at the current
//! position) or *done*. A reader over an empty source starts done, and once done
//! it stays done: [`advance()`](SequenceIterator::advance) is a no-op and
//! [`current()`](SequenceIterator::current) fails with [`OutOfBounds`].
//!
//! # Example
//!
//! ```rust
//! use rusty_kit::seq::{make_iterator, sequences_equal};
//!
//! let left = vec![1, 2, 3];
//! let right = [1, 2, 3];
//!
//! assert!(sequences_equal(make_iterator(&left), make_iterator(&right)).unwrap());
//! assert!(!sequences_equal(make_iterator(&left[..1]), make_iterator(&right)).unwrap());
//! ```

pub mod compare;
pub mod cursor;
pub mod stepper;

use std::{collections::VecDeque, fmt};

pub use compare::{first_mismatch, sequences_equal};
pub use cursor::{Cursor, make_iterator};
pub use stepper::Stepper;

/// An ordered, finite collection addressable by a zero-based position.
///
/// Implementations must be stable while borrowed: `len()` and `get()` return the
/// same answers for as long as a reader holds the sequence.
pub trait Sequence {
    /// Element type.
    type Item;

    /// Number of elements in the sequence.
    fn len(&self) -> usize;

    /// Element at `index`, or `None` when `index >= len()`.
    fn get(&self, index: usize) -> Option<&Self::Item>;

    /// Returns `true` if the sequence has no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Sequence for [T] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T> Sequence for Vec<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T> Sequence for VecDeque<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }
}

/// Position-aware, advance-only reader over a sequence.
///
/// Two readers over unrelated storage can be driven in lock-step by
/// [`sequences_equal`].
pub trait SequenceIterator {
    /// Element type yielded by [`current()`](Self::current).
    type Item;

    /// Moves to the next position. Once the reader is done this has no effect.
    fn advance(&mut self);

    /// Returns `true` once every element has been passed.
    fn is_done(&self) -> bool;

    /// The element at the current position.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the reader is done.
    fn current(&self) -> Result<&Self::Item, OutOfBounds>;
}

/// Returned when an exhausted reader is asked for its current element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    /// The position that was read.
    pub index: usize,
    /// Length of the source, if known. Iterator-backed readers only know it
    /// after they are exhausted, which is always the case when this error occurs.
    pub len: usize,
}

impl OutOfBounds {
    /// Constructs a new `OutOfBounds` for a read at `index` on a source of `len` elements.
    #[inline]
    pub const fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "read past end of sequence: index {} (length {})",
            self.index, self.len
        )
    }
}

impl std::error::Error for OutOfBounds {}

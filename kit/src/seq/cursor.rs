//! The `{ source, cursor }` reader over a borrowed [`Sequence`].

use std::{fmt, ops::ControlFlow};

use crate::seq::{OutOfBounds, Sequence, SequenceIterator};

/// Advance-only reader over a borrowed [`Sequence`].
///
/// A `Cursor` holds nothing but a shared reference to its source and the current
/// position, so it is `Copy` and can be duplicated freely to inspect the same
/// source from several positions.
///
/// # Invariants
///
/// - `0 <= position <= source.len()`
/// - `position` never decreases.
///
/// # Example
///
/// ```rust
/// use rusty_kit::seq::{Cursor, SequenceIterator};
///
/// let data = [10, 20];
/// let mut cursor = Cursor::new(&data);
///
/// assert_eq!(cursor.current(), Ok(&10));
/// cursor.advance();
/// cursor.advance();
/// assert!(cursor.is_done());
/// assert!(cursor.current().is_err());
/// ```
pub struct Cursor<'a, S: Sequence + ?Sized> {
    source: &'a S,
    position: usize,
}

/// Creates a fresh [`Cursor`] positioned at the start of `sequence`.
#[inline]
pub fn make_iterator<S: Sequence + ?Sized>(sequence: &S) -> Cursor<'_, S> {
    Cursor::new(sequence)
}

impl<'a, S: Sequence + ?Sized> Cursor<'a, S> {
    /// Creates a cursor at position 0.
    #[inline]
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// The current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Length of the underlying source.
    #[inline]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns `true` if the underlying source is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.source.len() == 0
    }

    /// Number of elements not yet passed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.source.len() - self.position
    }

    /// Walks every remaining element, passing its position and value to `f`.
    ///
    /// Leaves the cursor done.
    pub fn visit<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &'a S::Item),
    {
        let _ = self.visit_while(|index, item| -> ControlFlow<()> {
            f(index, item);
            ControlFlow::Continue(())
        });
    }

    /// Walks the remaining elements until `f` breaks.
    ///
    /// On [`ControlFlow::Break`] the cursor stays on the element that broke, so
    /// [`current()`](SequenceIterator::current) returns it. Otherwise the cursor
    /// ends done and `Continue(())` is returned.
    ///
    /// ```rust
    /// use std::ops::ControlFlow;
    /// use rusty_kit::seq::{Cursor, SequenceIterator};
    ///
    /// let data = [1, 2, 3];
    /// let mut cursor = Cursor::new(&data);
    /// let stopped = cursor.visit_while(|_, &n| {
    ///     if n == 2 { ControlFlow::Break(n) } else { ControlFlow::Continue(()) }
    /// });
    ///
    /// assert_eq!(stopped, ControlFlow::Break(2));
    /// assert_eq!(cursor.current(), Ok(&2));
    /// ```
    pub fn visit_while<B, F>(&mut self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(usize, &'a S::Item) -> ControlFlow<B>,
    {
        while let Some(item) = self.source.get(self.position) {
            f(self.position, item)?;
            self.position += 1;
        }
        ControlFlow::Continue(())
    }
}

impl<'a, S: Sequence + ?Sized> SequenceIterator for Cursor<'a, S> {
    type Item = S::Item;

    #[inline]
    fn advance(&mut self) {
        if self.position < self.source.len() {
            self.position += 1;
        }
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.position >= self.source.len()
    }

    #[inline]
    fn current(&self) -> Result<&S::Item, OutOfBounds> {
        self.source
            .get(self.position)
            .ok_or_else(|| OutOfBounds::new(self.position, self.source.len()))
    }
}

impl<S: Sequence + ?Sized> Clone for Cursor<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Sequence + ?Sized> Copy for Cursor<'_, S> {}

impl<S: Sequence + ?Sized> fmt::Debug for Cursor<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("len", &self.source.len())
            .finish()
    }
}

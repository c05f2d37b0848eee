//! [`SequenceIterator`] over any [`Iterator`].

use crate::seq::{OutOfBounds, SequenceIterator};

/// Adapts an [`Iterator`] to the [`SequenceIterator`] protocol.
///
/// The stepper reads one element ahead: the element it holds is the
/// [`current()`](SequenceIterator::current) one, and [`advance()`](SequenceIterator::advance)
/// replaces it with the next item pulled from the inner iterator. Once the inner
/// iterator returns `None` the stepper is done and never polls it again.
#[derive(Debug, Clone)]
pub struct Stepper<I: Iterator> {
    inner: I,
    current: Option<I::Item>,
    position: usize,
}

impl<I: Iterator> Stepper<I> {
    /// Wraps `iter`, pulling its first element immediately.
    pub fn new<II>(iter: II) -> Self
    where
        II: IntoIterator<IntoIter = I>,
    {
        let mut inner = iter.into_iter();
        let current = inner.next();
        Self {
            inner,
            current,
            position: 0,
        }
    }

    /// Number of elements passed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<I: Iterator> SequenceIterator for Stepper<I> {
    type Item = I::Item;

    fn advance(&mut self) {
        if self.current.is_some() {
            self.position += 1;
            self.current = self.inner.next();
        }
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.current.is_none()
    }

    #[inline]
    fn current(&self) -> Result<&I::Item, OutOfBounds> {
        // A done stepper has seen exactly `position` elements.
        self.current
            .as_ref()
            .ok_or(OutOfBounds::new(self.position, self.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn steps_through_items() {
        // Given
        let mut stepper = Stepper::new(vec![1, 2]);

        // Then
        assert_eq!(stepper.current(), Ok(&1));
        stepper.advance();
        assert_eq!(stepper.current(), Ok(&2));
        stepper.advance();
        assert!(stepper.is_done());
        assert_eq!(stepper.current(), Err(OutOfBounds::new(2, 2)));
    }

    #[test]
    fn empty_iterator_starts_done() {
        let stepper = Stepper::new(std::iter::empty::<u8>());
        assert!(stepper.is_done());
        assert_eq!(stepper.position(), 0);
    }

    #[test]
    fn inner_is_not_polled_after_exhaustion() {
        // Given
        let polls = Cell::new(0);
        let source = std::iter::from_fn(|| {
            polls.set(polls.get() + 1);
            None::<u8>
        });
        let mut stepper = Stepper::new(source);

        // When
        stepper.advance();
        stepper.advance();

        // Then
        assert_eq!(polls.get(), 1);
    }
}

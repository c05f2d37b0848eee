//! Structural comparison of two [`SequenceIterator`]s.

use crate::seq::{OutOfBounds, SequenceIterator};

/// Returns `true` if both readers yield the same elements in the same order and
/// run out at the same time.
///
/// Comparison stops at the first differing element; later elements are never
/// read. A reader that is a strict prefix of the other compares unequal.
///
/// # Errors
///
/// Propagates any [`OutOfBounds`] raised by either reader.
///
/// # Example
///
/// ```rust
/// use rusty_kit::seq::{make_iterator, sequences_equal};
///
/// let empty: [u8; 0] = [];
/// assert_eq!(sequences_equal(make_iterator(&empty), make_iterator(&empty)), Ok(true));
/// assert_eq!(sequences_equal(make_iterator(&[1]), make_iterator(&[1, 2])), Ok(false));
/// ```
#[inline]
pub fn sequences_equal<A, B>(a: A, b: B) -> Result<bool, OutOfBounds>
where
    A: SequenceIterator,
    B: SequenceIterator,
    A::Item: PartialEq<B::Item>,
{
    Ok(first_mismatch(a, b)?.is_none())
}

/// Position of the first difference between two readers, or `None` if they are equal.
///
/// When one reader runs out before the other, the mismatch is reported at the
/// length of the shorter one.
pub fn first_mismatch<A, B>(mut a: A, mut b: B) -> Result<Option<usize>, OutOfBounds>
where
    A: SequenceIterator,
    B: SequenceIterator,
    A::Item: PartialEq<B::Item>,
{
    let mut index = 0;
    while !a.is_done() && !b.is_done() {
        if a.current()? != b.current()? {
            return Ok(Some(index));
        }
        a.advance();
        b.advance();
        index += 1;
    }

    if a.is_done() && b.is_done() {
        Ok(None)
    } else {
        Ok(Some(index))
    }
}

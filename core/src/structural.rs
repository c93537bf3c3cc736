//! Element-wise equality, ordering and hashing.
//!
//! `PartialEq` on [`ReadOnlyArray`] compares identity. These traits compare
//! contents instead, using an element comparer supplied by the caller, so
//! views of different element types can be compared too.
//!
//! Only read-only views take part. Comparing a view against raw storage
//! (`[U]`, [`Array<U>`], [`ImmutableArray<U>`]) is never equal and never
//! ordered.

use core::cmp::Ordering;

use roarray_storage::{Array, ImmutableArray};

use crate::{ReadOnlyArray, error::Error};

const NOT_A_READ_ONLY_ARRAY: &str = "object is not a read-only array";
const LENGTH_MISMATCH: &str = "read-only arrays must have the same length";

/// Equality of contents under a caller-supplied element equality.
pub trait StructuralEq<Rhs: ?Sized, T, U> {
    /// Two default views are equal, a default view never equals a present
    /// one, and present views are equal when they have the same length and
    /// `eq` holds for every pair of elements.
    fn structural_eq(&self, other: &Rhs, eq: &mut dyn FnMut(&T, &U) -> bool) -> bool;
}

/// Ordering of contents under a caller-supplied element comparer.
pub trait StructuralOrd<Rhs: ?Sized, T, U> {
    /// Default views order before present ones. Present views of the same
    /// length compare lexicographically.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentMismatch`] when both views are present with
    /// different lengths, or when `other` is not a read-only view.
    fn structural_cmp(
        &self,
        other: &Rhs,
        cmp: &mut dyn FnMut(&T, &U) -> Ordering,
    ) -> Result<Ordering, Error>;
}

// --- Views ---

impl<'b, T, U> StructuralEq<ReadOnlyArray<'b, U>, T, U> for ReadOnlyArray<'_, T> {
    fn structural_eq(
        &self,
        other: &ReadOnlyArray<'b, U>,
        eq: &mut dyn FnMut(&T, &U) -> bool,
    ) -> bool {
        match (self.try_slice(), other.try_slice()) {
            (None, None) => true,
            (Some(left), Some(right)) => {
                left.len() == right.len() && left.iter().zip(right).all(|(l, r)| eq(l, r))
            }
            _ => false,
        }
    }
}

impl<'b, T, U> StructuralOrd<ReadOnlyArray<'b, U>, T, U> for ReadOnlyArray<'_, T> {
    fn structural_cmp(
        &self,
        other: &ReadOnlyArray<'b, U>,
        cmp: &mut dyn FnMut(&T, &U) -> Ordering,
    ) -> Result<Ordering, Error> {
        match (self.try_slice(), other.try_slice()) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Less),
            (Some(_), None) => Ok(Ordering::Greater),
            (Some(left), Some(right)) => {
                if left.len() != right.len() {
                    return Err(Error::ArgumentMismatch(LENGTH_MISMATCH));
                }
                Ok(left
                    .iter()
                    .zip(right)
                    .map(|(l, r)| cmp(l, r))
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal))
            }
        }
    }
}

// --- Raw storage ---

macro_rules! reject_raw_storage {
    ($($rhs:ty),+ $(,)?) => {
        $(
            impl<T, U> StructuralEq<$rhs, T, U> for ReadOnlyArray<'_, T> {
                fn structural_eq(&self, _: &$rhs, _: &mut dyn FnMut(&T, &U) -> bool) -> bool {
                    false
                }
            }

            impl<T, U> StructuralOrd<$rhs, T, U> for ReadOnlyArray<'_, T> {
                fn structural_cmp(
                    &self,
                    _: &$rhs,
                    _: &mut dyn FnMut(&T, &U) -> Ordering,
                ) -> Result<Ordering, Error> {
                    Err(Error::ArgumentMismatch(NOT_A_READ_ONLY_ARRAY))
                }
            }
        )+
    };
}

reject_raw_storage!([U], Array<U>, ImmutableArray<U>);

// --- Hashing ---

/// Elements that contribute to [`ReadOnlyArray::structural_hash`], counted
/// from the end.
const HASHED_ELEMENTS: usize = 8;

impl<T> ReadOnlyArray<'_, T> {
    /// Combines the hashes `hash` produces for the last eight elements.
    ///
    /// Zero for a default view. Views that are
    /// [`structural_eq`](StructuralEq::structural_eq) under an equality
    /// consistent with `hash` hash alike.
    pub fn structural_hash(&self, mut hash: impl FnMut(&T) -> u64) -> u64 {
        let Some(elements) = self.try_slice() else {
            return 0;
        };
        let tail = &elements[elements.len().saturating_sub(HASHED_ELEMENTS)..];
        tail.iter()
            .fold(0u64, |acc, element| (acc << 5).wrapping_add(acc) ^ hash(element))
    }
}

//! Free functions for building views and snapshots.

use roarray_storage::{Array, Element, ImmutableArray};

use crate::{
    ReadOnlyArray,
    error::{Error, fault},
};

/// Same as [`ReadOnlyArray::wrap`].
pub fn from_array<T>(array: Option<&Array<T>>) -> ReadOnlyArray<'_, T> {
    ReadOnlyArray::wrap(array)
}

/// Same as [`ReadOnlyArray::wrap_immutable`].
pub fn from_immutable<T>(array: &ImmutableArray<T>) -> ReadOnlyArray<'_, T> {
    ReadOnlyArray::wrap_immutable(array)
}

/// Copies `length` elements of `items` starting at `start` into a new
/// immutable array.
///
/// # Panics
///
/// Panics if `items` is default or the range does not fit in it.
///
/// ```
/// use roarray_core::{ReadOnlyArray, factory};
/// use roarray_storage::Array;
///
/// let array = Array::from([1, 2, 3, 4]);
/// let middle = factory::create_immutable(ReadOnlyArray::from(&array), 1, 2);
/// assert_eq!(&*middle, &[2, 3]);
/// ```
#[track_caller]
pub fn create_immutable<T: Element + Clone>(
    items: ReadOnlyArray<'_, T>,
    start: usize,
    length: usize,
) -> ImmutableArray<T> {
    let Some(elements) = items.try_slice() else {
        fault(Error::NullDereference)
    };
    let Some(range) = start
        .checked_add(length)
        .and_then(|end| elements.get(start..end))
    else {
        fault(Error::RangeOutOfBounds {
            start,
            count: length,
            len: elements.len(),
        })
    };
    ImmutableArray::from_slice(range)
}

/// Copies `items` into a new immutable array.
pub fn create_immutable_from_slice<T: Element + Clone>(items: &[T]) -> ImmutableArray<T> {
    ImmutableArray::from_slice(items)
}

//! Read-only views over array storage.
//!
//! `ReadOnlyArray<'a, T>` borrows the buffer of an [`Array`] or an
//! [`ImmutableArray`] without copying it. The view itself is pointer-sized and
//! `Copy`; it cannot be used to mutate the buffer, but it does not promise
//! that nobody else can (see [`to_immutable`](ReadOnlyArray::to_immutable)
//! for that).
//!
//! A view is either *default* (no buffer, like a null array) or *present*.
//! A present view over a zero-length buffer is *empty*, not default.
//!
//! # Example
//!
//! ```
//! use roarray_core::ReadOnlyArray;
//! use roarray_storage::Array;
//!
//! let array = Array::from(vec![3, 1, 2]);
//! let view = ReadOnlyArray::wrap(Some(&array));
//!
//! assert_eq!(view[0], 3);
//! assert_eq!(view.len(), 3);
//! assert_eq!(view.index_of(&2), Some(2));
//! assert!(view == ReadOnlyArray::from(&array));
//!
//! let missing = ReadOnlyArray::<i32>::wrap(None);
//! assert!(missing.is_default());
//! assert!(missing.as_slice().is_empty());
//! ```

use core::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::Index,
    slice,
};

use roarray_storage::{Array, BufRef, Element, ImmutableArray};

use crate::error::{Error, fault};

/// A read-only view of an array.
///
/// Equality is identity: two views are equal when they borrow the same
/// buffer, or are both default. Use
/// [`StructuralEq`](crate::StructuralEq) to compare contents.
pub struct ReadOnlyArray<'a, T> {
    buf: Option<BufRef<'a>>,
    _marker: PhantomData<&'a [T]>,
}

static_assertions::assert_eq_size!(ReadOnlyArray<'static, u64>, usize);

// --- Manual Clone/Copy to avoid T: Clone/Copy bounds ---

impl<T> Clone for ReadOnlyArray<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReadOnlyArray<'_, T> {}

// --- Construction ---

impl<'a, T> ReadOnlyArray<'a, T> {
    /// The default (uninitialized) view.
    pub const DEFAULT: Self = ReadOnlyArray {
        buf: None,
        _marker: PhantomData,
    };

    /// Caller guarantees `T` is layout-compatible with the buffer's element type.
    pub(crate) const fn from_buf_unchecked(buf: Option<BufRef<'a>>) -> Self {
        ReadOnlyArray {
            buf,
            _marker: PhantomData,
        }
    }

    /// Wraps an array, or nothing. Never copies and never fails.
    pub fn wrap(array: Option<&'a Array<T>>) -> Self {
        Self::from_buf_unchecked(array.map(Array::buf))
    }

    /// Wraps an immutable array without copying.
    pub fn wrap_immutable(array: &'a ImmutableArray<T>) -> Self {
        Self::from_buf_unchecked(Some(array.buf()))
    }

    pub(crate) fn buf(&self) -> Option<BufRef<'a>> {
        self.buf
    }
}

#[cfg(feature = "std")]
impl<T: Element> ReadOnlyArray<'static, T> {
    /// A view of the shared empty array of `T`. Not default, but empty.
    pub fn empty() -> Self {
        Self::wrap_immutable(ImmutableArray::empty_ref())
    }
}

impl<T> Default for ReadOnlyArray<'_, T> {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'a, T> From<&'a Array<T>> for ReadOnlyArray<'a, T> {
    fn from(array: &'a Array<T>) -> Self {
        Self::wrap(Some(array))
    }
}

impl<'a, T> From<Option<&'a Array<T>>> for ReadOnlyArray<'a, T> {
    fn from(array: Option<&'a Array<T>>) -> Self {
        Self::wrap(array)
    }
}

impl<'a, T> From<&'a ImmutableArray<T>> for ReadOnlyArray<'a, T> {
    fn from(array: &'a ImmutableArray<T>) -> Self {
        Self::wrap_immutable(array)
    }
}

// --- State ---

impl<'a, T> ReadOnlyArray<'a, T> {
    /// Whether the view was never given an array.
    pub fn is_default(&self) -> bool {
        self.buf.is_none()
    }

    /// # Panics
    ///
    /// Panics if the view is default.
    #[track_caller]
    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }

    pub fn is_default_or_empty(&self) -> bool {
        self.buf.is_none_or(BufRef::is_empty)
    }

    /// # Panics
    ///
    /// Panics if the view is default.
    #[track_caller]
    pub fn len(&self) -> usize {
        self.present().len()
    }

    #[track_caller]
    fn present(&self) -> BufRef<'a> {
        match self.buf {
            Some(buf) => buf,
            None => fault(Error::NullDereference),
        }
    }

    /// The elements, or a null-dereference panic on a default view.
    #[track_caller]
    pub(crate) fn slice(&self) -> &'a [T] {
        // SAFETY: every constructor checks that `T` matches the buffer.
        unsafe { self.present().as_slice() }
    }

    /// The elements, or `None` on a default view.
    pub(crate) fn try_slice(&self) -> Option<&'a [T]> {
        // SAFETY: every constructor checks that `T` matches the buffer.
        self.buf.map(|buf| unsafe { buf.as_slice() })
    }
}

// --- Indexed access ---

impl<'a, T> ReadOnlyArray<'a, T> {
    /// Reference to the element at `index`.
    ///
    /// Unchecked for default views: callers check
    /// [`is_default`](Self::is_default) first. Use
    /// [`ReadOnlyList::get`](crate::ReadOnlyList::get) for a checked lookup.
    ///
    /// # Panics
    ///
    /// Panics if the view is default or `index >= len`.
    #[track_caller]
    pub fn item_ref(&self, index: usize) -> &'a T {
        &self.slice()[index]
    }
}

impl<T> Index<usize> for ReadOnlyArray<'_, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        &self.slice()[index]
    }
}

// --- Search ---

impl<T: PartialEq> ReadOnlyArray<'_, T> {
    /// Index of the first element equal to `item`.
    #[track_caller]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        let elements = self.slice();
        search_forward(elements, item, 0, elements.len())
    }

    /// Index of the first element equal to `item` at or after `start`.
    ///
    /// # Panics
    ///
    /// Panics if the view is default or `start > len`.
    #[track_caller]
    pub fn index_of_from(&self, item: &T, start: usize) -> Option<usize> {
        let elements = self.slice();
        let count = elements.len().saturating_sub(start);
        search_forward(elements, item, start, count)
    }

    /// Index of the first element equal to `item` in `start..start + count`.
    ///
    /// # Panics
    ///
    /// Panics if the view is default, `start > len`, or the range does not
    /// fit in the array.
    #[track_caller]
    pub fn index_of_range(&self, item: &T, start: usize, count: usize) -> Option<usize> {
        search_forward(self.slice(), item, start, count)
    }

    /// Index of the last element equal to `item`.
    #[track_caller]
    pub fn last_index_of(&self, item: &T) -> Option<usize> {
        let elements = self.slice();
        match elements.len() {
            0 => None,
            len => search_backward(elements, item, len - 1, len),
        }
    }

    /// Index of the last element equal to `item` at or before `start`.
    ///
    /// # Panics
    ///
    /// Panics if the view is default or `start >= len`. On an empty array
    /// only `start == 0` is accepted.
    #[track_caller]
    pub fn last_index_of_from(&self, item: &T, start: usize) -> Option<usize> {
        let elements = self.slice();
        let count = if elements.is_empty() { 0 } else { start.saturating_add(1) };
        search_backward(elements, item, start, count)
    }

    /// Index of the last element equal to `item` among the `count` elements
    /// ending at `start` (inclusive), that is `start + 1 - count..=start`.
    ///
    /// # Panics
    ///
    /// Panics if the view is default, `start >= len`, or `count > start + 1`.
    /// On an empty array only `start == 0` with `count == 0` is accepted.
    #[track_caller]
    pub fn last_index_of_range(&self, item: &T, start: usize, count: usize) -> Option<usize> {
        search_backward(self.slice(), item, start, count)
    }
}

#[track_caller]
fn search_forward<T: PartialEq>(
    elements: &[T],
    item: &T,
    start: usize,
    count: usize,
) -> Option<usize> {
    let len = elements.len();
    if start > len {
        fault(Error::IndexOutOfRange { index: start, len });
    }
    if count > len - start {
        fault(Error::RangeOutOfBounds { start, count, len });
    }
    elements[start..start + count]
        .iter()
        .position(|element| element == item)
        .map(|offset| start + offset)
}

#[track_caller]
fn search_backward<T: PartialEq>(
    elements: &[T],
    item: &T,
    start: usize,
    count: usize,
) -> Option<usize> {
    let len = elements.len();
    if len == 0 {
        // Nothing to search, but the arguments must still describe an empty range.
        if start != 0 {
            fault(Error::IndexOutOfRange { index: start, len });
        }
        if count != 0 {
            fault(Error::RangeOutOfBounds { start, count, len });
        }
        return None;
    }
    if start >= len {
        fault(Error::IndexOutOfRange { index: start, len });
    }
    if count > start + 1 {
        fault(Error::RangeOutOfBounds { start, count, len });
    }
    let first = start + 1 - count;
    elements[first..=start]
        .iter()
        .rposition(|element| element == item)
        .map(|offset| first + offset)
}

// --- Copy-out ---

impl<T: Clone> ReadOnlyArray<'_, T> {
    /// Clones every element into the front of `destination`.
    ///
    /// # Panics
    ///
    /// Panics if the view is default or `destination` is shorter than the array.
    #[track_caller]
    pub fn copy_to(&self, destination: &mut [T]) {
        let elements = self.slice();
        destination[..elements.len()].clone_from_slice(elements);
    }

    /// Clones every element into `destination` starting at `destination_index`.
    ///
    /// # Panics
    ///
    /// Panics if the view is default or the elements do not fit.
    #[track_caller]
    pub fn copy_to_offset(&self, destination: &mut [T], destination_index: usize) {
        let elements = self.slice();
        destination[destination_index..][..elements.len()].clone_from_slice(elements);
    }

    /// Clones `len` elements starting at `source_index` into `destination`
    /// starting at `destination_index`.
    ///
    /// # Panics
    ///
    /// Panics if the view is default or either range is out of bounds.
    #[track_caller]
    pub fn copy_range_to(
        &self,
        source_index: usize,
        destination: &mut [T],
        destination_index: usize,
        len: usize,
    ) {
        let elements = self.slice();
        destination[destination_index..][..len]
            .clone_from_slice(&elements[source_index..][..len]);
    }
}

// --- Snapshots and slices ---

impl<'a, T> ReadOnlyArray<'a, T> {
    /// Copies the elements into a new immutable array.
    ///
    /// Always copies, even when the view wraps an [`ImmutableArray`]: the
    /// view cannot tell whether someone else still holds a mutable path to
    /// its buffer.
    ///
    /// # Panics
    ///
    /// Panics if the view is default.
    #[track_caller]
    pub fn to_immutable(&self) -> ImmutableArray<T>
    where
        T: Element + Clone,
    {
        ImmutableArray::from_slice(self.slice())
    }

    /// The elements as a borrowed slice. Empty for a default view.
    pub fn as_slice(&self) -> &'a [T] {
        self.try_slice().unwrap_or(&[])
    }

    /// Iterates over the elements. Each call starts a new pass.
    ///
    /// # Panics
    ///
    /// Panics if the view is default.
    #[track_caller]
    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.slice().iter()
    }
}

impl<T> AsRef<[T]> for ReadOnlyArray<'_, T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> IntoIterator for ReadOnlyArray<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[track_caller]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &ReadOnlyArray<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[track_caller]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --- Identity ---

impl<T> ReadOnlyArray<'_, T> {
    /// Address of the borrowed buffer, or zero for a default view.
    fn addr(&self) -> usize {
        self.buf.map_or(0, BufRef::addr)
    }
}

impl<'b, T> PartialEq<ReadOnlyArray<'b, T>> for ReadOnlyArray<'_, T> {
    fn eq(&self, other: &ReadOnlyArray<'b, T>) -> bool {
        self.addr() == other.addr()
    }
}

impl<T> Eq for ReadOnlyArray<'_, T> {}

/// Hashes the buffer identity, not the contents.
impl<T> Hash for ReadOnlyArray<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.addr());
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnlyArray<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_slice() {
            Some(elements) => f.debug_list().entries(elements).finish(),
            None => f.write_str("Uninitialized"),
        }
    }
}

// Same rules as `&'a [T]`. `BufRef` alone is neither.
unsafe impl<T: Sync> Send for ReadOnlyArray<'_, T> {}
unsafe impl<T: Sync> Sync for ReadOnlyArray<'_, T> {}

#[cfg(test)]
mod tests {
    use alloc::{format, vec};
    use core::cell::Cell;

    use super::*;

    #[test]
    fn default_is_not_empty_array() {
        let default = ReadOnlyArray::<u8>::DEFAULT;
        let array = Array::<u8>::default();
        let empty = ReadOnlyArray::wrap(Some(&array));

        assert!(default.is_default());
        assert!(default.is_default_or_empty());
        assert!(!empty.is_default());
        assert!(empty.is_empty());
        assert!(empty.is_default_or_empty());
        assert_ne!(default, empty);
    }

    #[test]
    #[should_panic(expected = "null dereference")]
    fn len_of_default_panics() {
        let _ = ReadOnlyArray::<u8>::DEFAULT.len();
    }

    #[test]
    #[should_panic(expected = "null dereference")]
    fn is_empty_of_default_panics() {
        let _ = ReadOnlyArray::<u8>::DEFAULT.is_empty();
    }

    #[test]
    fn search_backward_on_empty_accepts_only_an_empty_range() {
        let elements: [u8; 0] = [];
        assert_eq!(search_backward(&elements, &1, 0, 0), None);
    }

    #[test]
    #[should_panic(expected = "index 5 is out of range for length 0")]
    fn search_backward_on_empty_rejects_start() {
        search_backward(&[] as &[u8], &1, 5, 0);
    }

    #[test]
    #[should_panic(expected = "range of 1 elements starting at 0 is out of bounds for length 0")]
    fn search_backward_on_empty_rejects_count() {
        search_backward(&[] as &[u8], &1, 0, 1);
    }

    #[test]
    #[should_panic(expected = "index 4 is out of range for length 3")]
    fn search_forward_reports_start_past_end_as_index() {
        search_forward(&[1u8, 2, 3], &1, 4, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn search_backward_rejects_long_count() {
        search_backward(&[1u8, 2, 3], &1, 1, 3);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn search_forward_rejects_range_past_end() {
        search_forward(&[1u8, 2, 3], &1, 2, 2);
    }

    #[test]
    fn search_forward_allows_empty_range_at_end() {
        assert_eq!(search_forward(&[1u8, 2, 3], &1, 3, 0), None);
    }

    #[test]
    fn debug_output() {
        let array = Array::from(vec![3, 1, 2]);
        assert_eq!(format!("{:?}", ReadOnlyArray::from(&array)), "[3, 1, 2]");
        assert_eq!(format!("{:?}", ReadOnlyArray::<i32>::DEFAULT), "Uninitialized");
    }

    #[test]
    fn views_are_copy_without_element_bounds() {
        struct NotClone;
        roarray_storage::element!(NotClone);

        let array = Array::new([NotClone]);
        let view = ReadOnlyArray::from(&array);
        let copy = view;
        assert!(view == copy);
        assert_eq!(copy.len(), 1);
    }

    #[test]
    fn send_sync_follow_shared_slices() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ReadOnlyArray<'static, u8>>();
        assert_sync::<ReadOnlyArray<'static, u8>>();
    }

    static_assertions::assert_not_impl_any!(ReadOnlyArray<'static, Cell<u8>>: Send, Sync);
}

use core::{
    fmt,
    marker::PhantomData,
    mem::ManuallyDrop,
    ops::{Deref, DerefMut},
};

use alloc::vec::Vec;

use crate::{
    element::{Element, ElementType},
    immutable::ImmutableArray,
    raw::{BufRef, RawBuf},
};

/// A fixed-length, heap-allocated, mutable array.
///
/// An `Array` is the sole owner of its buffer. The buffer address is the
/// array's identity: two arrays with equal contents are still different
/// arrays, and a [`clone`](Clone::clone) is a new one.
///
/// # Example
///
/// ```
/// use roarray_storage::Array;
///
/// let mut array = Array::from(vec![3, 1, 2]);
/// array[0] = 4;
/// assert_eq!(&*array, &[4, 1, 2]);
///
/// let frozen = array.into_immutable();
/// assert_eq!(&*frozen, &[4, 1, 2]);
/// ```
pub struct Array<T> {
    raw: RawBuf,
    _marker: PhantomData<T>,
}

static_assertions::assert_eq_size!(Array<u8>, usize);

impl<T: Element> Array<T> {
    /// Creates an array holding `values`.
    pub fn new(values: impl IntoIterator<Item = T, IntoIter: ExactSizeIterator>) -> Self {
        Array {
            raw: RawBuf::new(values),
            _marker: PhantomData,
        }
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        Self::new(values)
    }

    /// Creates an array holding clones of `values`.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::new(values.iter().cloned())
    }
}

impl<T> Array<T> {
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the buffer was allocated for `T` and lives as long as `self`.
        unsafe { self.raw.as_slice() }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `Array` is the only holder of its buffer.
        unsafe { self.raw.as_mut_slice() }
    }

    /// Borrows the buffer header. This is what read-only views hold on to.
    pub fn buf(&self) -> BufRef<'_> {
        self.raw.borrow()
    }

    pub fn element_type(&self) -> &ElementType {
        self.raw.element()
    }

    /// Whether both arrays are the same array.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.raw.ptr_eq(&other.raw)
    }

    /// Freezes the array without copying.
    ///
    /// The array is consumed, so nothing keeps a writable path to the buffer.
    pub fn into_immutable(self) -> ImmutableArray<T> {
        let this = ManuallyDrop::new(self);
        // SAFETY: the buffer's reference count is one and ownership moves over.
        unsafe { ImmutableArray::from_raw(this.raw) }
    }
}

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        // SAFETY: the buffer was allocated for `T` and `Array` is its only holder.
        unsafe { self.raw.drop_and_free::<T>() }
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Array<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Array<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Array<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Element + Clone> Clone for Array<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self)
    }
}

impl<T: Element> Default for Array<T> {
    fn default() -> Self {
        Self::new([])
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Element> From<Vec<T>> for Array<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: Element, const N: usize> From<[T; N]> for Array<T> {
    fn from(values: [T; N]) -> Self {
        Self::new(values)
    }
}

impl<T: Element> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Same rules as `Vec<T>`.
unsafe impl<T: Send> Send for Array<T> {}
unsafe impl<T: Sync> Sync for Array<T> {}

#[cfg(test)]
mod tests {
    use alloc::{format, rc::Rc, string::String, vec};
    use core::cell::Cell;

    use super::*;

    #[test]
    fn new_holds_values() {
        let array = Array::new([1i32, 2, 3]);
        assert_eq!(&*array, &[1, 2, 3]);
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn empty_array() {
        let array = Array::<i32>::default();
        assert!(array.is_empty());
        assert_eq!(array.buf().len(), 0);
    }

    #[test]
    fn mutation_through_deref_mut() {
        let mut array = Array::from(vec![3u8, 1, 2]);
        array[1] = 9;
        array.as_mut_slice().reverse();
        assert_eq!(&*array, &[2, 9, 3]);
    }

    #[test]
    fn clone_is_a_different_array() {
        let array = Array::from([String::from("a"), String::from("b")]);
        let copy = array.clone();
        assert_eq!(&*array, &*copy);
        assert!(!Array::ptr_eq(&array, &copy));
        assert!(Array::ptr_eq(&array, &array));
    }

    #[test]
    fn from_iterator_collects() {
        let array: Array<u32> = (1..=4).filter(|n| n % 2 == 0).collect();
        assert_eq!(&*array, &[2, 4]);
    }

    #[test]
    fn element_type_is_recorded() {
        let array = Array::from([1u64]);
        assert!(array.element_type().is::<u64>());
        assert_eq!(array.buf().element(), &ElementType::of::<u64>());
    }

    #[test]
    fn drop_runs_element_destructors() {
        let drops = Rc::new(Cell::new(0));

        struct Counted(Rc<Cell<usize>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }
        crate::element!(Counted);

        let array = Array::new([Counted(drops.clone()), Counted(drops.clone())]);
        assert_eq!(drops.get(), 0);
        drop(array);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn into_immutable_keeps_the_buffer() {
        let array = Array::from([5u8, 6]);
        let addr = array.buf().addr();
        let frozen = array.into_immutable();
        assert_eq!(frozen.buf().addr(), addr);
        assert_eq!(&*frozen, &[5, 6]);
    }

    #[test]
    fn debug_lists_elements() {
        let array = Array::from([1, 2, 3]);
        assert_eq!(format!("{:?}", array), "[1, 2, 3]");
    }

    #[test]
    fn send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Array<i32>>();
        assert_sync::<Array<i32>>();
    }

    static_assertions::assert_not_impl_any!(Array<Rc<u8>>: Send, Sync);
}

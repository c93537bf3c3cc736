use core::{fmt, marker::PhantomData, ops::Deref};

use alloc::vec::Vec;

use crate::{
    element::{Element, ElementType},
    raw::{BufRef, RawBuf},
};

/// An immutable, reference-counted array.
///
/// Clones share the buffer. Nothing ever hands out `&mut [T]` to it, so once
/// data is held by an `ImmutableArray` no writable alias exists.
///
/// # Example
///
/// ```
/// use roarray_storage::ImmutableArray;
///
/// let numbers = ImmutableArray::from(vec![1, 2, 3]);
/// let shared = numbers.clone();
/// assert!(ImmutableArray::ptr_eq(&numbers, &shared));
/// assert_eq!(&*shared, &[1, 2, 3]);
/// ```
pub struct ImmutableArray<T> {
    raw: RawBuf,
    _marker: PhantomData<T>,
}

static_assertions::assert_eq_size!(ImmutableArray<u8>, usize);

impl<T: Element> ImmutableArray<T> {
    /// Creates an immutable array holding `values`.
    pub fn new(values: impl IntoIterator<Item = T, IntoIter: ExactSizeIterator>) -> Self {
        // SAFETY: a fresh buffer has a reference count of one.
        unsafe { Self::from_raw(RawBuf::new(values)) }
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        Self::new(values)
    }

    /// Creates an immutable array holding clones of `values`.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::new(values.iter().cloned())
    }

    /// The empty immutable array of `T`.
    ///
    /// With the `std` feature every call returns the same shared buffer.
    pub fn empty() -> Self {
        #[cfg(feature = "std")]
        {
            Self::empty_ref().clone()
        }
        #[cfg(not(feature = "std"))]
        {
            Self::new([])
        }
    }

    /// A `'static` reference to the shared empty array of `T`.
    #[cfg(feature = "std")]
    pub fn empty_ref() -> &'static Self {
        crate::shared::empty::<T>()
    }
}

impl<T> ImmutableArray<T> {
    /// # Safety
    ///
    /// `raw` must have been allocated for `T`, and the caller hands its
    /// reference over to the new handle.
    pub(crate) unsafe fn from_raw(raw: RawBuf) -> Self {
        ImmutableArray {
            raw,
            _marker: PhantomData,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the buffer was allocated for `T` and this handle keeps it alive.
        unsafe { self.raw.as_slice() }
    }

    /// Borrows the buffer header. This is what read-only views hold on to.
    pub fn buf(&self) -> BufRef<'_> {
        self.raw.borrow()
    }

    pub fn element_type(&self) -> &ElementType {
        self.raw.element()
    }

    /// Whether both handles share one buffer.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.raw.ptr_eq(&other.raw)
    }
}

impl<T> Clone for ImmutableArray<T> {
    fn clone(&self) -> Self {
        self.raw.retain();
        ImmutableArray {
            raw: self.raw,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for ImmutableArray<T> {
    fn drop(&mut self) {
        if self.raw.release() {
            // SAFETY: that was the last reference and the buffer holds `T`.
            unsafe { self.raw.drop_and_free::<T>() }
        }
    }
}

impl<T> Deref for ImmutableArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for ImmutableArray<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T: Element> Default for ImmutableArray<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Element> From<Vec<T>> for ImmutableArray<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: Element, const N: usize> From<[T; N]> for ImmutableArray<T> {
    fn from(values: [T; N]) -> Self {
        Self::new(values)
    }
}

impl<T: Element> FromIterator<T> for ImmutableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ImmutableArray<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Same rules as `Arc<[T]>`.
unsafe impl<T: Send + Sync> Send for ImmutableArray<T> {}
unsafe impl<T: Send + Sync> Sync for ImmutableArray<T> {}

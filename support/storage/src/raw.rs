//! The buffer every array handle points to.
//!
//! ```text
//! ptr ──▶ [refs | len | element][pad][data: T × len]
//!         └──────── Header ───────┘
//!         single allocation
//! ```
//!
//! `RawBuf` is untyped and never frees on its own: [`Array`](crate::Array) and
//! [`ImmutableArray`](crate::ImmutableArray) know the element type and decide
//! when the buffer dies. [`BufRef`] is the borrowed form handed to views.

use core::{
    alloc::Layout,
    fmt,
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
    slice,
    sync::atomic::{self, AtomicUsize, Ordering},
};

use alloc::alloc::{alloc, dealloc, handle_alloc_error};

use crate::element::{Element, ElementType};

#[repr(C)]
pub(crate) struct Header {
    refs: AtomicUsize,
    len: usize,
    element: ElementType,
}

const MAX_REFS: usize = isize::MAX as usize;

#[derive(Clone, Copy)]
pub(crate) struct RawBuf {
    ptr: NonNull<Header>,
}

impl RawBuf {
    /// Allocates a buffer and moves `values` into it. The reference count starts at one.
    pub(crate) fn new<T: Element>(
        values: impl IntoIterator<Item = T, IntoIter: ExactSizeIterator>,
    ) -> Self {
        let mut iter = values.into_iter();
        let len = iter.len();
        let (layout, data_offset) = Self::layout::<T>(len);

        // SAFETY: the layout is never zero-sized, it always holds a header.
        let Some(ptr) = NonNull::new(unsafe { alloc(layout) }) else {
            handle_alloc_error(layout)
        };

        // SAFETY: the data offset lies inside the allocation.
        let data = unsafe { ptr.add(data_offset).cast::<T>() };
        let mut filling = Filling {
            ptr,
            layout,
            data,
            written: 0,
        };
        for value in iter.by_ref().take(len) {
            // SAFETY: `written < len`, so the slot is inside the data area.
            unsafe { filling.data.add(filling.written).write(value) };
            filling.written += 1;
        }
        if filling.written != len || iter.next().is_some() {
            panic!("iterator yielded a different number of elements than its reported length");
        }
        mem::forget(filling);

        // SAFETY: the allocation starts with room for a header. It goes in
        // last so a failed fill never leaves a buffer that claims elements.
        unsafe {
            ptr.cast::<Header>().write(Header {
                refs: AtomicUsize::new(1),
                len,
                element: ElementType::of::<T>(),
            });
        }

        tracing::trace!(len, element = core::any::type_name::<T>(), "allocated array buffer");

        RawBuf { ptr: ptr.cast() }
    }

    /// Returns the layout of a buffer holding `len` elements and the offset to the data.
    fn layout<T>(len: usize) -> (Layout, usize) {
        let Ok(array) = Layout::array::<T>(len) else {
            capacity_overflow()
        };
        let Ok((layout, data_offset)) = Layout::new::<Header>().extend(array) else {
            capacity_overflow()
        };
        (layout.pad_to_align(), data_offset)
    }

    /// Offset to the data. Depends only on the alignment of `T`, so any
    /// layout-compatible element type finds the same elements.
    fn data_offset<T>() -> usize {
        size_of::<Header>().next_multiple_of(align_of::<T>())
    }

    fn header(&self) -> &Header {
        // SAFETY: the header is initialized before a `RawBuf` is handed out
        // and lives until the owning handle frees the buffer.
        unsafe { self.ptr.as_ref() }
    }

    pub(crate) fn len(&self) -> usize {
        self.header().len
    }

    pub(crate) fn element(&self) -> &ElementType {
        &self.header().element
    }

    pub(crate) fn borrow(&self) -> BufRef<'_> {
        BufRef {
            ptr: self.ptr,
            phantom: PhantomData,
        }
    }

    pub(crate) fn ptr_eq(&self, other: &RawBuf) -> bool {
        self.ptr == other.ptr
    }

    /// # Safety
    ///
    /// `T` must be layout-compatible with the buffer's element type.
    pub(crate) unsafe fn data<T>(&self) -> NonNull<T> {
        unsafe { self.ptr.cast::<u8>().add(Self::data_offset::<T>()).cast() }
    }

    /// # Safety
    ///
    /// `T` must be layout-compatible with the buffer's element type and the
    /// returned slice must not outlive the buffer.
    pub(crate) unsafe fn as_slice<'a, T>(&self) -> &'a [T] {
        unsafe { slice::from_raw_parts(self.data::<T>().as_ptr(), self.len()) }
    }

    /// # Safety
    ///
    /// As for [`as_slice`](Self::as_slice), and the caller must be the only
    /// holder of the buffer.
    pub(crate) unsafe fn as_mut_slice<'a, T>(&mut self) -> &'a mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data::<T>().as_ptr(), self.len()) }
    }

    pub(crate) fn retain(&self) {
        let old = self.header().refs.fetch_add(1, Ordering::Relaxed);
        if old > MAX_REFS {
            panic!("array reference count overflow");
        }
    }

    /// Drops one reference and returns `true` if it was the last one.
    pub(crate) fn release(&self) -> bool {
        if self.header().refs.fetch_sub(1, Ordering::Release) != 1 {
            return false;
        }
        atomic::fence(Ordering::Acquire);
        true
    }

    /// Drops the elements and frees the buffer.
    ///
    /// # Safety
    ///
    /// `T` must be the element type the buffer was allocated with and no
    /// other handle or borrow may refer to it.
    pub(crate) unsafe fn drop_and_free<T>(self) {
        let len = self.len();
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.data::<T>().as_ptr(),
                len,
            ));
            dealloc(self.ptr.cast().as_ptr(), Self::layout::<T>(len).0);
        }
    }
}

/// A buffer being filled. Dropping it, on unwind, drops the elements written
/// so far and frees the allocation.
struct Filling<T> {
    ptr: NonNull<u8>,
    layout: Layout,
    data: NonNull<T>,
    written: usize,
}

impl<T> Drop for Filling<T> {
    fn drop(&mut self) {
        // SAFETY: the first `written` slots hold initialized elements and
        // nothing else refers to the allocation yet.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.data.as_ptr(), self.written));
            dealloc(self.ptr.as_ptr(), self.layout);
        }
    }
}

#[cold]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

/// A borrowed thin pointer to a buffer.
///
/// Pointer-sized and `Copy`. Gives access to the header and, through
/// [`downcast`](BufRef::downcast), to the elements when the requested type
/// matches the buffer's runtime element type.
///
/// A `BufRef` does not know its element type statically, so it can never
/// leave the thread it was borrowed on. Typed wrappers decide that instead.
///
/// ```compile_fail
/// use roarray_storage::Array;
///
/// let array = Array::from(vec![1u8]);
/// let buf = array.buf();
/// std::thread::scope(|scope| {
///     scope.spawn(move || buf.len());
/// });
/// ```
#[derive(Clone, Copy)]
pub struct BufRef<'a> {
    ptr: NonNull<Header>,
    phantom: PhantomData<&'a Header>,
}

static_assertions::assert_eq_size!(BufRef<'static>, usize);
static_assertions::assert_eq_size!(Option<BufRef<'static>>, usize);
static_assertions::assert_not_impl_any!(BufRef<'static>: Send, Sync);

impl<'a> BufRef<'a> {
    fn header(self) -> &'a Header {
        // SAFETY: a `BufRef` borrows a live handle for `'a`.
        unsafe { self.ptr.as_ref() }
    }

    pub fn len(self) -> usize {
        self.header().len
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// The element type the buffer was allocated with.
    pub fn element(self) -> &'a ElementType {
        &self.header().element
    }

    /// Address of the buffer. Two live buffers never share an address, even
    /// when both are empty.
    pub fn addr(self) -> usize {
        self.ptr.as_ptr().addr()
    }

    pub fn ptr_eq(self, other: BufRef<'_>) -> bool {
        self.ptr == other.ptr
    }

    /// Reads the elements as a `[T]` without checking the element type.
    ///
    /// # Safety
    ///
    /// `T` must be layout-compatible with [`element`](BufRef::element): the
    /// element type itself, one of its supertypes, or a type it [`Upcast`]s to.
    ///
    /// [`Upcast`]: crate::Upcast
    pub unsafe fn as_slice<T>(self) -> &'a [T] {
        unsafe {
            let data = self.ptr.cast::<u8>().add(RawBuf::data_offset::<T>()).cast::<T>();
            slice::from_raw_parts(data.as_ptr(), self.len())
        }
    }

    /// Reads the elements as a `[T]` if the buffer's element type is `T` or
    /// declares `T` as a supertype.
    pub fn downcast<T: 'static>(self) -> Option<&'a [T]> {
        // SAFETY: `is` only accepts the element type and its declared
        // supertypes, which `Element` guarantees are layout-compatible.
        self.element()
            .is::<T>()
            .then(|| unsafe { self.as_slice::<T>() })
    }
}

impl fmt::Debug for BufRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufRef")
            .field("addr", &self.addr())
            .field("len", &self.len())
            .field("element", self.element())
            .finish()
    }
}

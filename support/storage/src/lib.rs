//! Array storage shared by mutable arrays, immutable snapshots and read-only views.
//!
//! Every array handle is a thin pointer to one heap allocation that carries a
//! small header before the elements:
//!
//! ```text
//! Array<T> / ImmutableArray<T> / BufRef<'a>
//!         ptr ──▶ [refs | len | element type][data...]
//!                 └────────────────────────────────┘
//!                          single allocation
//! ```
//!
//! - [`Array<T>`] owns its buffer alone and can be mutated.
//! - [`ImmutableArray<T>`] shares its buffer through a reference count and
//!   never exposes it mutably. [`Array::into_immutable`] converts without
//!   copying.
//! - [`BufRef<'a>`] is a borrowed, `Copy` pointer to a buffer. It is what
//!   read-only views store.
//!
//! The header records the buffer's runtime [`ElementType`], which lets a view
//! of one element type be re-checked against another at runtime. Element types
//! opt in through [`Element`], usually via [`element!`].
//!
//! # Example
//!
//! ```
//! use roarray_storage::{Array, ImmutableArray};
//!
//! let mut array = Array::from(vec![3, 1, 2]);
//! array.sort();
//!
//! let view = array.buf();
//! assert_eq!(view.len(), 3);
//! assert_eq!(view.downcast::<i32>(), Some(&[1, 2, 3][..]));
//! assert_eq!(view.downcast::<u8>(), None);
//!
//! let frozen: ImmutableArray<i32> = array.into_immutable();
//! assert_eq!(&*frozen, &[1, 2, 3]);
//! ```
//!
//! # Gotchas
//!
//! - **Identity**: buffers are compared by address. Two arrays with the same
//!   contents are different arrays; a clone of an `Array` is a new array.
//! - **Supertypes are not transitive**: [`Element::SUPERTYPES`] lists every
//!   type a buffer may be read as.

#![no_std]

extern crate alloc;

mod array;
mod element;
mod immutable;
mod raw;
#[cfg(feature = "std")]
mod shared;

pub use array::Array;
pub use element::{Element, ElementType, Upcast};
pub use immutable::ImmutableArray;
pub use raw::BufRef;

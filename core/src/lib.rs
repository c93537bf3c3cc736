#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

//! Read-only views over arrays.
//!
//! [`ReadOnlyArray`] is a `Copy`, pointer-sized view of an
//! [`Array`](roarray_storage::Array) or an
//! [`ImmutableArray`](roarray_storage::ImmutableArray). It exposes lookup,
//! search, copy-out and iteration, and never allows writing.
//!
//! Two families of operations coexist:
//!
//! - Direct methods (`view[i]`, [`len`](ReadOnlyArray::len),
//!   [`index_of`](ReadOnlyArray::index_of), ...) panic on a default view, the
//!   same way indexing a slice panics out of bounds.
//! - Capability traits ([`ReadOnlyList`], [`StructuralEq`],
//!   [`StructuralOrd`]) return an [`Error`] instead.
//!
//! ```
//! use roarray_core::{ReadOnlyArray, ReadOnlyList, Error};
//! use roarray_storage::Array;
//!
//! let array = Array::from(vec![10, 20, 30]);
//! let view = ReadOnlyArray::from(&array);
//! assert_eq!(view[1], 20);
//! assert_eq!(view.get(5), Err(Error::IndexOutOfRange { index: 5, len: 3 }));
//!
//! let default = ReadOnlyArray::<i32>::DEFAULT;
//! assert_eq!(default.get(0), Err(Error::InvalidState));
//! ```

extern crate alloc;

mod cast;
mod error;
pub mod factory;
mod list;
mod structural;
mod view;

pub use error::Error;
pub use list::ReadOnlyList;
pub use structural::{StructuralEq, StructuralOrd};
pub use view::ReadOnlyArray;

pub use roarray_storage::{Array, Element, ElementType, ImmutableArray, Upcast, element};

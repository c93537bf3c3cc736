#![cfg_attr(not(feature = "std"), no_std)]

//! roarray - read-only views over arrays
//!
//! # Overview
//!
//! An [`Array`] owns a fixed-length buffer and can be mutated. An
//! [`ImmutableArray`] shares a buffer that nobody can mutate. A
//! [`ReadOnlyArray`] borrows either one without copying and only lets you
//! read.
//!
//! # Quick Start
//!
//! ```
//! use roarray::{Array, ReadOnlyArray};
//!
//! let mut scores = Array::from(vec![3, 1, 2]);
//! scores[0] = 4;
//!
//! let view = ReadOnlyArray::from(&scores);
//! assert_eq!(view.index_of(&2), Some(2));
//! assert_eq!(view.iter().sum::<i32>(), 7);
//!
//! // A snapshot is an independent copy.
//! let snapshot = view.to_immutable();
//! assert_eq!(&*snapshot, &[4, 1, 2]);
//! ```
//!
//! # Default and empty
//!
//! `ReadOnlyArray::DEFAULT` holds no array at all. It is different from a
//! view of a zero-length array:
//!
//! ```
//! use roarray::{Array, ReadOnlyArray};
//!
//! let none = ReadOnlyArray::<u8>::DEFAULT;
//! let zero = Array::<u8>::default();
//! let empty = ReadOnlyArray::from(&zero);
//!
//! assert!(none.is_default());
//! assert!(!empty.is_default() && empty.is_empty());
//! assert!(none.is_default_or_empty() && empty.is_default_or_empty());
//! ```
//!
//! # Covariance
//!
//! Element types can declare supertypes with [`element!`]. A view of the
//! derived type can then be cast to the base type, statically with
//! [`ReadOnlyArray::cast_up`] or at runtime with [`ReadOnlyArray::as_type`]
//! and [`ReadOnlyArray::cast_array`].

pub use roarray_core::{
    Array, Element, ElementType, Error, ImmutableArray, ReadOnlyArray, ReadOnlyList, StructuralEq,
    StructuralOrd, Upcast, element, factory,
};

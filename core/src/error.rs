//! Errors raised by read-only arrays.
//!
//! Operations on [`ReadOnlyArray`](crate::ReadOnlyArray) come in two flavours.
//! Direct methods treat a default view as a broken precondition and panic
//! with the [`Error::NullDereference`] message. Methods reached through a
//! capability trait ([`ReadOnlyList`](crate::ReadOnlyList),
//! [`StructuralOrd`](crate::StructuralOrd)) return these errors instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A direct operation was used on a default (uninitialized) view.
    #[error("null dereference: the read-only array is uninitialized")]
    NullDereference,

    /// A capability operation was used on a default (uninitialized) view.
    #[error("operation is not valid on an uninitialized read-only array")]
    InvalidState,

    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("range of {count} elements starting at {start} is out of bounds for length {len}")]
    RangeOutOfBounds {
        start: usize,
        count: usize,
        len: usize,
    },

    /// The array's runtime element type cannot be read as the requested type.
    #[error("cannot cast an array of `{from}` to an array of `{to}`")]
    InvalidCast {
        from: &'static str,
        to: &'static str,
    },

    #[error("{0}")]
    ArgumentMismatch(&'static str),
}

/// Panics with the message of `error`.
#[cold]
#[track_caller]
pub(crate) fn fault(error: Error) -> ! {
    panic!("{error}")
}

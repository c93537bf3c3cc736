//! Checked, read-only list access.
//!
//! [`ReadOnlyList`] is the fallible counterpart of the direct accessors on
//! [`ReadOnlyArray`]: a default view reports [`Error::InvalidState`] instead
//! of panicking. The trait is object safe, so heterogeneous callers can work
//! through `&dyn ReadOnlyList<T>`.

use alloc::boxed::Box;

use roarray_storage::{Array, ImmutableArray};

use crate::{ReadOnlyArray, error::Error};

/// A read-only list of `T`.
pub trait ReadOnlyList<T> {
    /// Number of elements.
    fn count(&self) -> Result<usize, Error>;

    /// The element at `index`.
    fn get(&self, index: usize) -> Result<&T, Error>;

    /// A fresh iterator positioned before the first element.
    fn elements(&self) -> Result<Box<dyn Iterator<Item = &T> + '_>, Error>;

    fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.count()? == 0)
    }
}

fn checked_get<T>(elements: &[T], index: usize) -> Result<&T, Error> {
    elements.get(index).ok_or(Error::IndexOutOfRange {
        index,
        len: elements.len(),
    })
}

impl<T> ReadOnlyList<T> for ReadOnlyArray<'_, T> {
    fn count(&self) -> Result<usize, Error> {
        self.try_slice().map(<[T]>::len).ok_or(Error::InvalidState)
    }

    fn get(&self, index: usize) -> Result<&T, Error> {
        checked_get(self.try_slice().ok_or(Error::InvalidState)?, index)
    }

    fn elements(&self) -> Result<Box<dyn Iterator<Item = &T> + '_>, Error> {
        let elements = self.try_slice().ok_or(Error::InvalidState)?;
        Ok(Box::new(elements.iter()))
    }
}

// --- Raw storage ---

impl<T> ReadOnlyList<T> for [T] {
    fn count(&self) -> Result<usize, Error> {
        Ok(self.len())
    }

    fn get(&self, index: usize) -> Result<&T, Error> {
        checked_get(self, index)
    }

    fn elements(&self) -> Result<Box<dyn Iterator<Item = &T> + '_>, Error> {
        Ok(Box::new(self.iter()))
    }
}

impl<T> ReadOnlyList<T> for Array<T> {
    fn count(&self) -> Result<usize, Error> {
        self.as_slice().count()
    }

    fn get(&self, index: usize) -> Result<&T, Error> {
        checked_get(self, index)
    }

    fn elements(&self) -> Result<Box<dyn Iterator<Item = &T> + '_>, Error> {
        self.as_slice().elements()
    }
}

impl<T> ReadOnlyList<T> for ImmutableArray<T> {
    fn count(&self) -> Result<usize, Error> {
        self.as_slice().count()
    }

    fn get(&self, index: usize) -> Result<&T, Error> {
        checked_get(self, index)
    }

    fn elements(&self) -> Result<Box<dyn Iterator<Item = &T> + '_>, Error> {
        self.as_slice().elements()
    }
}

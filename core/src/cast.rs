//! Covariant casts between views.
//!
//! A buffer allocated for `Derived` may be read as `[Base]` when `Derived`
//! declares `Base` as a supertype (see [`element!`](roarray_storage::element)).
//! Casts never copy; the result borrows the same buffer.

use core::any::type_name;

use roarray_storage::Upcast;

use crate::{ReadOnlyArray, error::Error};

impl<'a, T> ReadOnlyArray<'a, T> {
    /// Views the elements as their base type.
    ///
    /// Checked at compile time: only available when `T` upcasts to `Base`.
    /// The result is identity-equal to `self`; a default view stays default.
    ///
    /// ```
    /// use roarray_core::ReadOnlyArray;
    /// use roarray_storage::{Array, element};
    ///
    /// struct Shape(u32);
    /// #[repr(transparent)]
    /// struct Square(Shape);
    ///
    /// element!(Shape);
    /// element!(unsafe Square: Shape);
    ///
    /// let squares = Array::from([Square(Shape(4))]);
    /// let shapes: ReadOnlyArray<'_, Shape> = ReadOnlyArray::from(&squares).cast_up();
    /// assert_eq!(shapes[0].0, 4);
    /// ```
    pub fn cast_up<Base>(self) -> ReadOnlyArray<'a, Base>
    where
        T: Upcast<Base>,
    {
        ReadOnlyArray::from_buf_unchecked(self.buf())
    }

    /// Views the elements as `U` if the buffer's runtime element type is `U`
    /// or declares it as a supertype. Otherwise returns the default view.
    pub fn as_type<U: 'static>(self) -> ReadOnlyArray<'a, U> {
        match self.buf() {
            Some(buf) if buf.element().is::<U>() => ReadOnlyArray::from_buf_unchecked(Some(buf)),
            Some(buf) => {
                tracing::trace!(
                    from = buf.element().name(),
                    to = type_name::<U>(),
                    "as_type fell back to the default view"
                );
                ReadOnlyArray::DEFAULT
            }
            None => ReadOnlyArray::DEFAULT,
        }
    }

    /// Like [`as_type`](Self::as_type), but reports an incompatible element
    /// type as an error. A default view casts to the default view of any `U`.
    pub fn cast_array<U: 'static>(self) -> Result<ReadOnlyArray<'a, U>, Error> {
        match self.buf() {
            Some(buf) if buf.element().is::<U>() => {
                Ok(ReadOnlyArray::from_buf_unchecked(Some(buf)))
            }
            Some(buf) => {
                let from = buf.element().name();
                let to = type_name::<U>();
                tracing::debug!(from, to, "rejected array cast");
                Err(Error::InvalidCast { from, to })
            }
            None => Ok(ReadOnlyArray::DEFAULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use roarray_storage::{Array, element};

    use super::*;
    use crate::test_utils::init_test_logging;

    #[derive(Debug, PartialEq)]
    struct Animal(&'static str);

    #[derive(Debug, PartialEq)]
    #[repr(transparent)]
    struct Dog(Animal);

    #[derive(Debug, PartialEq)]
    struct Rock;

    element!(Animal, Rock);
    element!(unsafe Dog: Animal);

    #[test]
    fn cast_up_preserves_identity() {
        let dogs = Array::from([Dog(Animal("rex")), Dog(Animal("fido"))]);
        let view = ReadOnlyArray::from(&dogs);
        let animals = view.cast_up::<Animal>();

        assert_eq!(animals.len(), 2);
        assert_eq!(animals[1], Animal("fido"));
        assert!(animals == view.cast_up::<Animal>());
    }

    #[test]
    fn cast_up_of_default_is_default() {
        assert!(ReadOnlyArray::<Dog>::DEFAULT.cast_up::<Animal>().is_default());
    }

    #[test]
    fn as_type_round_trips_to_the_runtime_type() {
        let dogs = Array::from([Dog(Animal("rex"))]);
        let animals = ReadOnlyArray::from(&dogs).cast_up::<Animal>();

        let back = animals.as_type::<Dog>();
        assert!(!back.is_default());
        assert_eq!(back[0], Dog(Animal("rex")));
    }

    #[test]
    fn as_type_does_not_downcast_base_buffers() {
        init_test_logging();

        let animals = Array::from([Animal("cat")]);
        assert!(ReadOnlyArray::from(&animals).as_type::<Dog>().is_default());
        assert!(ReadOnlyArray::from(&animals).as_type::<Rock>().is_default());
    }

    #[test]
    fn cast_array_reports_incompatible_types() {
        init_test_logging();

        let rocks = Array::from([Rock]);
        let err = ReadOnlyArray::from(&rocks).cast_array::<Animal>().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCast {
                from: type_name::<Rock>(),
                to: type_name::<Animal>(),
            }
        );
    }

    #[test]
    fn cast_array_of_default_is_default() {
        let cast = ReadOnlyArray::<Rock>::DEFAULT.cast_array::<Animal>();
        assert!(cast.is_ok_and(|view| view.is_default()));
    }
}

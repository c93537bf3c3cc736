//! Runtime element types and the contracts behind covariant views.

use core::{
    any::{TypeId, type_name},
    fmt,
};

use alloc::{boxed::Box, string::String, vec::Vec};

/// Types that can be stored in an array buffer.
///
/// Every buffer records the [`ElementType`] of the `T` it was allocated for,
/// so a view can later ask whether the buffer may be read as some other type.
///
/// Most types should use the [`element!`](crate::element) macro instead of
/// implementing this trait by hand.
///
/// # Safety
///
/// Every type listed in [`SUPERTYPES`](Element::SUPERTYPES) must have the same
/// size, alignment and validity as `Self`: any `[Self]` must also be a valid
/// slice of that type. `#[repr(transparent)]` newtypes around the supertype
/// satisfy this.
pub unsafe trait Element: 'static {
    /// Types a buffer of `Self` may be read as, in addition to `Self`.
    ///
    /// The list is not transitive. A type lists every ancestor it can be viewed as.
    const SUPERTYPES: &'static [fn() -> TypeId] = &[];
}

/// Static proof that a `[Self]` may be read as a `[Base]` without conversion.
///
/// Implemented reflexively for every type.
///
/// # Safety
///
/// Same contract as [`Element::SUPERTYPES`]: `Self` and `Base` share size,
/// alignment and validity.
pub unsafe trait Upcast<Base> {}

// SAFETY: a type is trivially layout-compatible with itself.
unsafe impl<T> Upcast<T> for T {}

/// The runtime element type recorded in a buffer header.
#[derive(Clone, Copy)]
pub struct ElementType {
    type_id: fn() -> TypeId,
    type_name: fn() -> &'static str,
    supertypes: &'static [fn() -> TypeId],
}

impl ElementType {
    pub fn of<T: Element>() -> Self {
        ElementType {
            type_id: TypeId::of::<T>,
            type_name: type_name::<T>,
            supertypes: T::SUPERTYPES,
        }
    }

    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Whether a buffer of this element type may be read as a `[U]`.
    ///
    /// True when `U` is this type or one of its declared supertypes.
    pub fn is<U: 'static>(&self) -> bool {
        let target = TypeId::of::<U>();
        self.type_id() == target || self.supertypes.iter().any(|supertype| supertype() == target)
    }
}

impl PartialEq for ElementType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for ElementType {}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Implements [`Element`] for one or more types.
///
/// ```
/// use roarray_storage::{Array, element};
///
/// #[derive(Debug, Clone, PartialEq)]
/// pub struct Base(u32);
///
/// #[derive(Debug, Clone, PartialEq)]
/// #[repr(transparent)]
/// pub struct Derived(Base);
///
/// element!(Base);
///
/// // Declares that a `[Derived]` may be read as a `[Base]`.
/// element!(unsafe Derived: Base);
///
/// let array = Array::from(vec![Derived(Base(1))]);
/// assert!(array.element_type().is::<Base>());
/// ```
///
/// The `unsafe` form also implements [`Upcast`] for every listed supertype;
/// the caller asserts the layout contract of [`Element`].
#[macro_export]
macro_rules! element {
    (unsafe $derived:ty : $($base:ty),+ $(,)?) => {
        unsafe impl $crate::Element for $derived {
            const SUPERTYPES: &'static [fn() -> ::core::any::TypeId] =
                &[$(::core::any::TypeId::of::<$base>),+];
        }
        $(
            unsafe impl $crate::Upcast<$base> for $derived {}
        )+
    };
    ($($ty:ty),+ $(,)?) => {
        $(
            // SAFETY: no supertypes are declared.
            unsafe impl $crate::Element for $ty {}
        )+
    };
}

element!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
);

// SAFETY: no supertypes are declared.
unsafe impl<T: 'static> Element for Option<T> {}
// SAFETY: no supertypes are declared.
unsafe impl<T: 'static> Element for Vec<T> {}
// SAFETY: no supertypes are declared.
unsafe impl<T: ?Sized + 'static> Element for Box<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    struct Base(u32);

    #[allow(dead_code)]
    #[repr(transparent)]
    struct Derived(Base);

    #[allow(dead_code)]
    #[repr(transparent)]
    struct MoreDerived(Derived);

    #[allow(dead_code)]
    struct Unrelated;

    crate::element!(Base, Unrelated);
    crate::element!(unsafe Derived: Base);
    crate::element!(unsafe MoreDerived: Derived, Base);

    #[test]
    fn is_matches_exact_type() {
        let element = ElementType::of::<u8>();
        assert!(element.is::<u8>());
        assert!(!element.is::<i8>());
    }

    #[test]
    fn is_matches_declared_supertypes() {
        let element = ElementType::of::<MoreDerived>();
        assert!(element.is::<MoreDerived>());
        assert!(element.is::<Derived>());
        assert!(element.is::<Base>());
        assert!(!element.is::<Unrelated>());
    }

    #[test]
    fn supertypes_do_not_point_down() {
        let element = ElementType::of::<Base>();
        assert!(!element.is::<Derived>());
    }

    #[test]
    fn equality_is_by_type_id() {
        assert_eq!(ElementType::of::<Derived>(), ElementType::of::<Derived>());
        assert_ne!(ElementType::of::<Derived>(), ElementType::of::<Base>());
    }

    #[test]
    fn debug_prints_type_name() {
        let debug = alloc::format!("{:?}", ElementType::of::<u32>());
        assert_eq!(debug, "u32");
    }

    #[test]
    fn upcast_holds_for_self_and_declared_supertypes() {
        fn assert_upcast<T: Upcast<B>, B>() {}
        assert_upcast::<u8, u8>();
        assert_upcast::<Derived, Base>();
        assert_upcast::<MoreDerived, Base>();
    }
}

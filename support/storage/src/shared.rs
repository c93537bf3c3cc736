//! Process-wide empty arrays, one per element type.

extern crate std;

use core::any::{Any, TypeId};
use std::sync::{Mutex, PoisonError};

use alloc::boxed::Box;
use hashbrown::HashMap;
use once_cell::sync::Lazy;

use crate::{element::Element, immutable::ImmutableArray};

struct Leaked(&'static (dyn Any + 'static));

// SAFETY: the registry only stores empty arrays. They hold no `T`, and their
// header is only touched through atomics.
unsafe impl Send for Leaked {}

static EMPTY: Lazy<Mutex<HashMap<TypeId, Leaked>>> = Lazy::new(Default::default);

pub(crate) fn empty<T: Element>() -> &'static ImmutableArray<T> {
    let mut empties = EMPTY.lock().unwrap_or_else(PoisonError::into_inner);
    let leaked = empties.entry(TypeId::of::<T>()).or_insert_with(|| {
        tracing::trace!(element = core::any::type_name::<T>(), "created shared empty array");
        Leaked(Box::leak(Box::new(ImmutableArray::<T>::new([]))))
    });
    let any: &'static dyn Any = leaked.0;
    any.downcast_ref::<ImmutableArray<T>>()
        .unwrap_or_else(|| unreachable!("registry entries are keyed by element type"))
}

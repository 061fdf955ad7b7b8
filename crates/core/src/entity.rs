//! Entity trait: identity + continuity across state changes.
//!
//! Two entities are the same entity when their identities compare equal, no
//! matter which concrete types they are or what their other attributes hold.

use core::fmt::Debug;
use core::hash::Hash;

use crate::registry;

/// Entity marker + minimal interface.
///
/// Object safe: `&dyn Entity<Id = I>` works anywhere a concrete entity does.
pub trait Entity {
    /// Strongly-typed entity identifier.
    ///
    /// `Eq + Hash` provide the natural-equality default; `'static` lets the
    /// default comparer registry key on the identifier type.
    type Id: Eq + Hash + Debug + 'static;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Same-identity check backed by the process-wide default comparer.
///
/// Implemented for every [`Entity`], trait objects included.
pub trait SameIdentity: Entity {
    /// Returns `true` if `other` is present and has the same identity as `self`
    /// under the current default comparer for `Self::Id`.
    fn is_same_as<E>(&self, other: Option<&E>) -> bool
    where
        E: Entity<Id = Self::Id> + ?Sized;
}

impl<T: Entity + ?Sized> SameIdentity for T {
    fn is_same_as<E>(&self, other: Option<&E>) -> bool
    where
        E: Entity<Id = Self::Id> + ?Sized,
    {
        registry::default_comparer::<T::Id>().equals(Some(self), other)
    }
}

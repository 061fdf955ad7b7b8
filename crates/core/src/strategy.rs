//! Identity comparison strategies.
//!
//! A strategy is the `equals`/`hash_of` pair that decides whether two identity
//! values denote the same entity. Implementations must behave as an
//! equivalence relation and keep hashes consistent with it: identities that
//! compare equal must hash equal.

use core::any::type_name;
use core::fmt;
use core::hash::{BuildHasher, BuildHasherDefault, Hash};
use core::marker::PhantomData;
use std::collections::hash_map::DefaultHasher;
use std::sync::Arc;

/// Equality + hashing over identity values of type `I`.
///
/// Strategies are `Send + Sync` because the default one for each identity type
/// lives in process-wide state (see [`crate::registry`]).
pub trait IdentityEquality<I: ?Sized>: Send + Sync {
    /// Returns `true` if both identities denote the same entity.
    fn equals(&self, a: &I, b: &I) -> bool;

    /// Hash of an identity, consistent with [`IdentityEquality::equals`].
    fn hash_of(&self, id: &I) -> u64;
}

/// Shareable, type-erased strategy reference.
///
/// `Option<SharedStrategy<I>>` is how an optional ("possibly absent") strategy
/// is passed to the checked constructors and to the registry.
pub type SharedStrategy<I> = Arc<dyn IdentityEquality<I>>;

/// Natural equality: `Eq` for comparison and `Hash` for hashing.
///
/// Hashes use SipHash with fixed keys, so they are deterministic for the life
/// of the process (unlike `RandomState`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalEquality;

impl<I: Eq + Hash + ?Sized> IdentityEquality<I> for NaturalEquality {
    fn equals(&self, a: &I, b: &I) -> bool {
        a == b
    }

    fn hash_of(&self, id: &I) -> u64 {
        stable_hash(id)
    }
}

/// Compares identities by a derived key.
///
/// The key function projects an identity onto the part that actually carries
/// identity (e.g. the inner id of a wrapper type); keys are then compared with
/// natural equality. The key is produced by value on every call.
///
/// ```ignore
/// let by_inner = KeyEquality::new(|id: &OrderRef| id.number);
/// set_default_comparer::<OrderRef>(Some(Arc::new(by_inner)))?;
/// ```
pub struct KeyEquality<F, K> {
    key: F,
    _key: PhantomData<fn() -> K>,
}

impl<F, K> KeyEquality<F, K> {
    pub fn new<I>(key: F) -> Self
    where
        I: ?Sized,
        F: Fn(&I) -> K,
    {
        Self {
            key,
            _key: PhantomData,
        }
    }
}

impl<F, K> fmt::Debug for KeyEquality<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEquality")
            .field("key", &type_name::<K>())
            .finish_non_exhaustive()
    }
}

impl<I, K, F> IdentityEquality<I> for KeyEquality<F, K>
where
    I: ?Sized,
    F: Fn(&I) -> K + Send + Sync,
    K: Eq + Hash,
{
    fn equals(&self, a: &I, b: &I) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    fn hash_of(&self, id: &I) -> u64 {
        stable_hash(&(self.key)(id))
    }
}

fn stable_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    BuildHasherDefault::<DefaultHasher>::default().hash_one(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Tagged {
        id: u32,
        tag: &'static str,
    }

    #[test]
    fn natural_equality_follows_eq() {
        assert!(NaturalEquality.equals("test-id", "test-id"));
        assert!(!NaturalEquality.equals("test-id", "test-id2"));
    }

    #[test]
    fn natural_hash_is_deterministic() {
        let a = String::from("test-id");
        let b = String::from("test-id");
        assert_eq!(NaturalEquality.hash_of(&a), NaturalEquality.hash_of(&b));
        assert_ne!(NaturalEquality.hash_of(&a), NaturalEquality.hash_of("test-id2"));
    }

    #[test]
    fn natural_hash_matches_for_owned_and_borrowed_str() {
        let owned = String::from("test-id");
        assert_eq!(
            IdentityEquality::<String>::hash_of(&NaturalEquality, &owned),
            IdentityEquality::<str>::hash_of(&NaturalEquality, "test-id"),
        );
    }

    #[test]
    fn key_equality_ignores_fields_outside_the_key() {
        let by_id = KeyEquality::new(|t: &Tagged| t.id);
        let a = Tagged { id: 7, tag: "a" };
        let b = Tagged { id: 7, tag: "b" };
        let c = Tagged { id: 8, tag: "a" };

        assert!(!NaturalEquality.equals(&a, &b));
        assert!(by_id.equals(&a, &b));
        assert_eq!(by_id.hash_of(&a), by_id.hash_of(&b));
        assert!(!by_id.equals(&a, &c));
    }

    #[test]
    fn strategies_erase_into_shared_references() {
        let shared: SharedStrategy<Tagged> = Arc::new(KeyEquality::new(|t: &Tagged| t.tag));
        let a = Tagged { id: 1, tag: "x" };
        let b = Tagged { id: 2, tag: "x" };
        assert!(shared.equals(&a, &b));
    }
}

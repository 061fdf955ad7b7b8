//! Identity keys: entities as hash-collection keys.
//!
//! Rust collections take `Eq`/`Hash` from the key type, so a comparer cannot
//! be handed to a `HashSet` directly. [`IdentityKey`] pairs an entity with the
//! comparer that should decide its equality and hash.

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::comparer::IdentityComparer;
use crate::entity::Entity;

/// An entity borrowed together with the comparer that defines its equality.
///
/// All keys stored in one collection must come from the same comparer (or from
/// comparers with the same strategy); equality between keys is evaluated with
/// the left-hand key's comparer.
pub struct IdentityKey<'a, E: Entity + ?Sized> {
    comparer: &'a IdentityComparer<E::Id>,
    entity: &'a E,
}

impl<'a, E: Entity + ?Sized> IdentityKey<'a, E> {
    pub fn new(comparer: &'a IdentityComparer<E::Id>, entity: &'a E) -> Self {
        Self { comparer, entity }
    }

    pub fn entity(&self) -> &'a E {
        self.entity
    }
}

impl<E: Entity + ?Sized> PartialEq for IdentityKey<'_, E> {
    fn eq(&self, other: &Self) -> bool {
        self.comparer.equals(Some(self.entity), Some(other.entity))
    }
}

impl<E: Entity + ?Sized> Eq for IdentityKey<'_, E> {}

impl<E: Entity + ?Sized> Hash for IdentityKey<'_, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.comparer.hash_of(Some(self.entity)));
    }
}

impl<E: Entity + ?Sized> Clone for IdentityKey<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Entity + ?Sized> Copy for IdentityKey<'_, E> {}

impl<E: Entity + ?Sized> fmt::Debug for IdentityKey<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityKey")
            .field("id", self.entity.id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::KeyEquality;
    use std::collections::{HashMap, HashSet};

    #[derive(Debug)]
    struct Invoice {
        number: String,
        total: u64,
    }

    #[derive(Debug)]
    struct CreditNote {
        number: String,
    }

    impl Entity for Invoice {
        type Id = String;

        fn id(&self) -> &Self::Id {
            &self.number
        }
    }

    impl Entity for CreditNote {
        type Id = String;

        fn id(&self) -> &Self::Id {
            &self.number
        }
    }

    fn invoice(number: &str, total: u64) -> Invoice {
        Invoice {
            number: number.to_string(),
            total,
        }
    }

    #[test]
    fn hash_set_deduplicates_by_identity() {
        let comparer = IdentityComparer::<String>::new();
        let a = invoice("INV-1", 100);
        let b = invoice("INV-1", 250);
        let c = invoice("INV-2", 100);

        let set: HashSet<_> = [&a, &b, &c].into_iter().map(|e| comparer.key(e)).collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&comparer.key(&invoice("INV-2", 0))));
    }

    #[test]
    fn hash_set_mixes_entity_types_through_trait_objects() {
        let comparer = IdentityComparer::<String>::new();
        let a = invoice("DOC-1", 100);
        let b = CreditNote {
            number: "DOC-1".to_string(),
        };
        let entities: [&dyn Entity<Id = String>; 2] = [&a, &b];

        let set: HashSet<_> = entities.iter().map(|e| comparer.key(*e)).collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn map_lookup_uses_the_comparer_strategy() {
        let case_insensitive = IdentityComparer::with_strategy(KeyEquality::new(|id: &String| {
            id.to_ascii_lowercase()
        }));
        let a = invoice("inv-7", 700);
        let mut totals = HashMap::new();
        totals.insert(case_insensitive.key(&a), a.total);

        let probe = invoice("INV-7", 0);
        assert_eq!(totals.get(&case_insensitive.key(&probe)), Some(&700));
    }

    #[test]
    fn key_exposes_the_wrapped_entity() {
        let comparer = IdentityComparer::<String>::new();
        let a = invoice("INV-9", 9);
        let key = comparer.key(&a);
        assert_eq!(key.entity().total, 9);
        assert_eq!(format!("{key:?}"), "IdentityKey { id: \"INV-9\" }");
    }
}

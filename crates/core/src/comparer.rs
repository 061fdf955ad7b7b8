//! Identity comparer: equality over entities that share an identity type.

use core::any::type_name;
use core::fmt;
use core::hash::Hash;
use std::sync::Arc;

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::key::IdentityKey;
use crate::registry;
use crate::strategy::{IdentityEquality, NaturalEquality, SharedStrategy};

/// Hash reported for an absent entity.
pub const ABSENT_HASH: u64 = 0;

/// Compares entities by identity using a wrapped [`IdentityEquality`] strategy.
///
/// Entities may be of different concrete types; only their identities are
/// compared. Absent entities (`None`) are valid inputs: two absent entities are
/// equal, an absent and a present one are not.
///
/// Cloning is cheap; clones share the strategy.
pub struct IdentityComparer<I> {
    strategy: SharedStrategy<I>,
}

impl<I: Eq + Hash + 'static> IdentityComparer<I> {
    /// Comparer using natural equality for `I`.
    pub fn new() -> Self {
        Self::with_strategy(NaturalEquality)
    }

    /// Natural-equality comparer for `I`, created once per identity type and
    /// reused afterwards.
    pub fn shared() -> Self {
        registry::shared_natural::<I>()
    }
}

impl<I: Eq + Hash + 'static> Default for IdentityComparer<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> IdentityComparer<I> {
    pub fn with_strategy<S>(strategy: S) -> Self
    where
        S: IdentityEquality<I> + 'static,
    {
        Self {
            strategy: Arc::new(strategy),
        }
    }

    /// Comparer over an optional shared strategy.
    ///
    /// Fails with [`DomainError::InvalidArgument`] if `strategy` is `None`.
    pub fn from_shared(strategy: Option<SharedStrategy<I>>) -> DomainResult<Self> {
        let strategy =
            strategy.ok_or_else(|| DomainError::invalid_argument("strategy must be provided"))?;
        Ok(Self { strategy })
    }

    pub fn strategy(&self) -> &SharedStrategy<I> {
        &self.strategy
    }

    pub fn equals<A, B>(&self, a: Option<&A>, b: Option<&B>) -> bool
    where
        A: Entity<Id = I> + ?Sized,
        B: Entity<Id = I> + ?Sized,
    {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.strategy.equals(a.id(), b.id()),
            _ => false,
        }
    }

    /// Hash consistent with [`IdentityComparer::equals`]; [`ABSENT_HASH`] for `None`.
    pub fn hash_of<A>(&self, a: Option<&A>) -> u64
    where
        A: Entity<Id = I> + ?Sized,
    {
        a.map_or(ABSENT_HASH, |a| self.strategy.hash_of(a.id()))
    }

    /// Wraps `entity` into a collection key that compares and hashes through
    /// this comparer.
    pub fn key<'a, E>(&'a self, entity: &'a E) -> IdentityKey<'a, E>
    where
        E: Entity<Id = I> + ?Sized,
    {
        IdentityKey::new(self, entity)
    }
}

impl<I> Clone for IdentityComparer<I> {
    fn clone(&self) -> Self {
        Self {
            strategy: Arc::clone(&self.strategy),
        }
    }
}

impl<I> fmt::Debug for IdentityComparer<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityComparer")
            .field("identity", &type_name::<I>())
            .finish_non_exhaustive()
    }
}

//! Process-wide default identity comparers, one per identity type.
//!
//! [`crate::SameIdentity::is_same_as`] has no comparer parameter; it uses the
//! default registered here for the entity's identity type. Until something is
//! installed, the default is natural equality.
//!
//! Replacement is atomic with respect to readers: a writer swaps the whole
//! comparer under the write lock and readers only clone an `Arc` under the read
//! lock. Every reader that starts after [`set_default_comparer`] returns sees
//! the new strategy.

use core::any::{Any, TypeId, type_name};
use core::hash::Hash;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;
use tracing::{debug, info, warn};

use crate::comparer::IdentityComparer;
use crate::error::DomainResult;
use crate::strategy::SharedStrategy;

/// Type-erased `IdentityComparer<I>` values keyed by `TypeId::of::<I>()`.
type Slots = RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>;

/// Defaults installed through [`set_default_comparer`].
static INSTALLED: Lazy<Slots> = Lazy::new(Default::default);

/// Cached natural-equality comparers backing [`IdentityComparer::shared`].
static NATURAL: Lazy<Slots> = Lazy::new(Default::default);

/// Current default comparer for identity type `I`.
pub fn default_comparer<I: Eq + Hash + 'static>() -> IdentityComparer<I> {
    lookup::<I>(&INSTALLED).unwrap_or_else(IdentityComparer::shared)
}

/// Replaces the default comparer for identity type `I`.
///
/// The previous default is discarded, not composed with the new one. Fails with
/// [`crate::DomainError::InvalidArgument`] if `strategy` is `None`, in which
/// case the current default is left untouched.
pub fn set_default_comparer<I: 'static>(strategy: Option<SharedStrategy<I>>) -> DomainResult<()> {
    let comparer = IdentityComparer::from_shared(strategy).inspect_err(|_| {
        warn!(identity = type_name::<I>(), "rejected absent default identity strategy");
    })?;

    write(&INSTALLED).insert(TypeId::of::<I>(), Box::new(comparer));
    info!(identity = type_name::<I>(), "default identity comparer replaced");
    Ok(())
}

/// Restores natural equality as the default comparer for identity type `I`.
pub fn reset_default_comparer<I: 'static>() {
    if write(&INSTALLED).remove(&TypeId::of::<I>()).is_some() {
        info!(identity = type_name::<I>(), "default identity comparer reset");
    }
}

pub(crate) fn shared_natural<I: Eq + Hash + 'static>() -> IdentityComparer<I> {
    if let Some(comparer) = lookup::<I>(&NATURAL) {
        return comparer;
    }

    let mut slots = write(&NATURAL);
    slots
        .entry(TypeId::of::<I>())
        .or_insert_with(|| {
            debug!(identity = type_name::<I>(), "created shared identity comparer");
            let comparer: Box<dyn Any + Send + Sync> = Box::new(IdentityComparer::<I>::new());
            comparer
        })
        .downcast_ref::<IdentityComparer<I>>()
        .cloned()
        .unwrap_or_else(IdentityComparer::new)
}

fn lookup<I: 'static>(slots: &Slots) -> Option<IdentityComparer<I>> {
    read(slots)
        .get(&TypeId::of::<I>())
        .and_then(|slot| slot.downcast_ref::<IdentityComparer<I>>())
        .cloned()
}

// Slots only ever hold complete values, so a poisoned lock is still consistent.
fn read(slots: &Slots) -> RwLockReadGuard<'_, HashMap<TypeId, Box<dyn Any + Send + Sync>>> {
    slots.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(slots: &Slots) -> RwLockWriteGuard<'_, HashMap<TypeId, Box<dyn Any + Send + Sync>>> {
    slots.write().unwrap_or_else(PoisonError::into_inner)
}

//! `ddd-core`: identity equality for domain entities.
//!
//! Two entities are the same entity when their identities compare equal. This
//! crate provides:
//!
//! - [`Entity`]: the identity accessor every entity type implements, and
//!   [`SameIdentity::is_same_as`] on top of it;
//! - [`IdentityEquality`] strategies ([`NaturalEquality`], [`KeyEquality`]);
//! - [`IdentityComparer`]: a reusable comparer over entities sharing an
//!   identity type, with [`IdentityKey`] for hash collections;
//! - a process-wide default comparer per identity type ([`registry`]).
//!
//! Everything here is **pure domain** logic (no infrastructure concerns).

pub mod comparer;
pub mod entity;
pub mod error;
pub mod key;
pub mod registry;
pub mod strategy;

pub use comparer::{ABSENT_HASH, IdentityComparer};
pub use entity::{Entity, SameIdentity};
pub use error::{DomainError, DomainResult};
pub use key::IdentityKey;
pub use registry::{default_comparer, reset_default_comparer, set_default_comparer};
pub use strategy::{IdentityEquality, KeyEquality, NaturalEquality, SharedStrategy};

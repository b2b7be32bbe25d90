//! Catalog entity records.
//!
//! Each record knows how to read itself from a [`BinaryReader`] positioned
//! at its first field, and how to write the same layout back out.
//!
//! [`BinaryReader`]: herodex_common::BinaryReader

mod class;
mod effect;
mod enhancement;
mod power;
mod powerset;
mod set;

pub use class::Class;
pub use effect::{AttribOverrides, Effect, EffectExpressions};
pub use enhancement::{Enhancement, EnhancementEffect};
pub use power::{Power, Requirement};
pub use powerset::{MutexSet, Powerset};
pub use set::{BonusGrant, EnhancementSet, SetBonus};

//! Enhancement and powers catalog decoder.
//!
//! The game data ships as two binary catalogs: the enhancement catalog
//! (enhancements and enhancement sets) and the powers catalog (classes,
//! powersets and powers). This crate decodes both and builds the uid and
//! static-index lookups that character saves are resolved against.
//!
//! # Quick Start
//!
//! ```no_run
//! use herodex_catalog::Catalog;
//!
//! let catalog = Catalog::open("EnhDB.mhd", "I12.mhd")?;
//!
//! if let Some(power) = catalog.power_by_uid("Pool.Speed.Hasten") {
//!     println!("{} (#{})", power.display_name, power.static_index);
//! }
//! for power in catalog.powers_in_set("Blaster_Ranged.Fire_Blast") {
//!     println!("  {}", power.display_name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Resolving references
//!
//! Saves store references either as text uids or as numeric static
//! indices. Both go through the same resolver:
//!
//! ```no_run
//! use herodex_catalog::{Catalog, Reference};
//!
//! let catalog = Catalog::open("EnhDB.mhd", "I12.mhd")?;
//! let by_name = catalog.resolve_power(&Reference::Uid("Pool.Speed.Hasten".into()));
//! let by_index = catalog.resolve_power(&Reference::StaticIndex(1234));
//! println!("{:?} {:?}", by_name, by_index);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod database;
mod enhancement_db;
mod error;
mod powers_db;
mod reference;
mod types;

pub mod structs;

// Primary API
pub use database::Catalog;
pub use enhancement_db::EnhancementDb;
pub use error::{Error, Result};
pub use powers_db::{PowersDb, PowersDbInfo};
pub use reference::{RefMode, Reference};

// Entity types
pub use structs::{
    AttribOverrides, BonusGrant, Class, Effect, EffectExpressions, Enhancement, EnhancementEffect,
    EnhancementSet, MutexSet, Power, Powerset, Requirement, SetBonus,
};
pub use types::{DbDate, EnhancementId, EnhancementType, MutexGroup, PowerId, SetId};

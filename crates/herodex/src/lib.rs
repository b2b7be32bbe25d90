//! Herodex - hero build catalog and save string decoding library.
//!
//! This crate provides a unified interface to the Herodex crates.
//!
//! # Crates
//!
//! - [`herodex_common`] - Little-endian binary reader and writer
//! - [`herodex_catalog`] - Enhancement and powers catalog decoding
//! - [`herodex_save`] - Save string envelope and payload decoding
//!
//! # Example
//!
//! ```no_run
//! use herodex::prelude::*;
//!
//! let catalog = Catalog::open("EnhDB.mhd", "I12.mhd")?;
//! let character = Character::from_file(&catalog, "build.mbd")?;
//!
//! print!("{}", BuildSummary::new(&catalog, &character));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use herodex_catalog as catalog;
pub use herodex_common as common;
pub use herodex_save as save;

mod summary;

pub use summary::{BuildSummary, InstanceSummary, PowerSummary, SlotSummary};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::summary::BuildSummary;
    pub use herodex_catalog::{
        Catalog, Enhancement, EnhancementDb, EnhancementId, EnhancementType, Power, PowerId,
        PowersDb, RefMode, Reference,
    };
    pub use herodex_common::{BinaryReader, BinaryWriter};
    pub use herodex_save::{decode_payload, decode_save, Character, SaveEnvelope, SchemaVersion};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

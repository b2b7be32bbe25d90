//! Character save decoder.
//!
//! Saves travel as a single line of text: a semicolon-separated header
//! followed by a hex-encoded deflate stream. The inflated payload is a
//! little-endian binary record whose field set depends on its schema
//! version and whose power and enhancement references are resolved
//! against a [`Catalog`].
//!
//! ```no_run
//! use herodex_catalog::Catalog;
//! use herodex_save::decode_save;
//!
//! let catalog = Catalog::open("EnhDB.mhd", "I12.mhd")?;
//! let save = std::fs::read_to_string("build.mbd")?;
//! let character = decode_save(&catalog, &save)?;
//!
//! for entry in &character.power_entries {
//!     let power = catalog.power(entry.power).unwrap();
//!     println!("{:>2} {} ({} slots)", entry.level, power.display_name, entry.slots.len());
//! }
//! if !character.stats.is_lossless() {
//!     eprintln!("{} powers missing from catalog", character.stats.powers_dropped);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! References that do not resolve are not errors. The entry is read in
//! full to keep the payload aligned and then left out, and the loss is
//! counted in [`DecodeStats`].
//!
//! [`Catalog`]: herodex_catalog::Catalog

mod character;
mod decode;
mod envelope;
mod error;
mod version;

pub use character::{
    Alignment, Character, DecodeStats, EnhancementInstance, InstanceDetail, PowerEntry, Slot,
    SubPowerEntry,
};
pub use decode::{decode_payload, decode_save, PAYLOAD_MAGIC_LEN};
pub use envelope::SaveEnvelope;
pub use error::{Error, Result, Stage};
pub use version::SchemaVersion;

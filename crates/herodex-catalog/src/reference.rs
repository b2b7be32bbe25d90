//! Cross-references from save payloads into the catalog.
//!
//! A save picks one [`RefMode`] for its whole payload. Every reference is
//! read through [`RefMode::read_reference`] and resolved through
//! [`Catalog::resolve_power`] or [`Catalog::resolve_enhancement`], so an
//! unresolved reference is handled the same way wherever it appears.

use std::fmt;

use herodex_common::{BinaryReader, BinaryWriter, Result};
use tracing::debug;

use crate::database::Catalog;
use crate::types::{EnhancementId, PowerId};

/// How references are encoded in a save payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RefMode {
    /// References are catalog unique ids stored as text.
    QualifiedName,
    /// References are catalog static indices stored as i32.
    StaticIndex,
}

impl RefMode {
    /// Mode for the payload's `qualifiedNames` flag.
    pub fn from_flag(qualified_names: bool) -> Self {
        if qualified_names {
            Self::QualifiedName
        } else {
            Self::StaticIndex
        }
    }

    pub fn is_qualified(&self) -> bool {
        matches!(self, Self::QualifiedName)
    }

    /// Read one reference in this mode.
    pub fn read_reference(&self, reader: &mut BinaryReader<'_>) -> Result<Reference> {
        match self {
            Self::QualifiedName => reader.read_text().map(Reference::Uid),
            Self::StaticIndex => reader.read_i32().map(Reference::StaticIndex),
        }
    }

    /// Write a reference, converting it to this mode's encoding.
    ///
    /// A reference of the other kind is written as an empty uid or `-1`,
    /// neither of which resolves.
    pub fn write_reference(&self, writer: &mut BinaryWriter, reference: &Reference) {
        match (self, reference) {
            (Self::QualifiedName, Reference::Uid(uid)) => {
                writer.write_text(uid);
            }
            (Self::QualifiedName, Reference::StaticIndex(_)) => {
                writer.write_text("");
            }
            (Self::StaticIndex, Reference::StaticIndex(index)) => {
                writer.write_i32(*index);
            }
            (Self::StaticIndex, Reference::Uid(_)) => {
                writer.write_i32(-1);
            }
        }
    }
}

/// A raw reference as stored in a save.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Reference {
    Uid(String),
    StaticIndex(i32),
}

impl Reference {
    /// Whether this is the placeholder an empty slot is saved with.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Uid(uid) => uid.is_empty(),
            Self::StaticIndex(index) => *index < 0,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uid(uid) => write!(f, "uid {:?}", uid),
            Self::StaticIndex(index) => write!(f, "static index {}", index),
        }
    }
}

impl Catalog {
    /// Resolve a power reference, or `None` if the catalog has no match.
    pub fn resolve_power(&self, reference: &Reference) -> Option<PowerId> {
        let db = self.powers_db();
        let resolved = match reference {
            Reference::Uid(uid) => db.id_by_uid(uid),
            Reference::StaticIndex(index) => db.id_by_static_index(*index),
        };
        if resolved.is_none() {
            debug!(reference = %reference, "unresolved power reference");
        }
        resolved
    }

    /// Resolve an enhancement reference, or `None` if the catalog has no match.
    pub fn resolve_enhancement(&self, reference: &Reference) -> Option<EnhancementId> {
        let db = self.enhancement_db();
        let resolved = match reference {
            Reference::Uid(uid) => db.id_by_uid(uid),
            Reference::StaticIndex(index) => db.id_by_static_index(*index),
        };
        if resolved.is_none() {
            debug!(reference = %reference, "unresolved enhancement reference");
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhancement_db::EnhancementDb;
    use crate::powers_db::{PowersDb, PowersDbInfo};
    use crate::structs::{Enhancement, Power};

    fn catalog() -> Catalog {
        let enhancements = vec![Enhancement {
            static_index: 55,
            uid: "Crafted_Recharge".into(),
            ..Default::default()
        }];
        let powers = vec![Power {
            static_index: 12,
            full_name: "Pool.Speed.Hasten".into(),
            ..Default::default()
        }];
        Catalog::new(
            EnhancementDb::new("", enhancements, Vec::new()),
            PowersDb::new(PowersDbInfo::default(), Vec::new(), Vec::new(), powers),
        )
    }

    #[test]
    fn test_read_reference_by_mode() {
        let mut writer = BinaryWriter::new();
        writer.write_text("Pool.Speed.Hasten").write_i32(12);
        let bytes = writer.into_bytes();
        let mut reader = BinaryReader::new(&bytes);

        let uid = RefMode::from_flag(true).read_reference(&mut reader).unwrap();
        let index = RefMode::from_flag(false).read_reference(&mut reader).unwrap();
        assert_eq!(uid, Reference::Uid("Pool.Speed.Hasten".into()));
        assert_eq!(index, Reference::StaticIndex(12));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_modes_resolve_to_same_entity() {
        let catalog = catalog();
        assert_eq!(
            catalog.resolve_power(&Reference::Uid("Pool.Speed.Hasten".into())),
            catalog.resolve_power(&Reference::StaticIndex(12))
        );
        assert_eq!(
            catalog.resolve_enhancement(&Reference::Uid("Crafted_Recharge".into())),
            Some(EnhancementId(0))
        );
        assert_eq!(
            catalog.resolve_enhancement(&Reference::StaticIndex(55)),
            Some(EnhancementId(0))
        );
    }

    #[test]
    fn test_unresolved_is_none() {
        let catalog = catalog();
        assert_eq!(catalog.resolve_power(&Reference::Uid("Pool.Speed.Whirlwind".into())), None);
        assert_eq!(catalog.resolve_power(&Reference::StaticIndex(-1)), None);
        assert_eq!(catalog.resolve_enhancement(&Reference::StaticIndex(12)), None);
    }

    #[test]
    fn test_empty_slot_placeholders() {
        assert!(Reference::Uid(String::new()).is_empty());
        assert!(Reference::StaticIndex(-1).is_empty());
        assert!(!Reference::StaticIndex(0).is_empty());
    }

    #[test]
    fn test_reference_display() {
        assert_eq!(Reference::StaticIndex(4).to_string(), "static index 4");
        assert_eq!(Reference::Uid("A.B".into()).to_string(), "uid \"A.B\"");
    }
}

//! The combined catalog handed to save decoding.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::info;

use crate::enhancement_db::EnhancementDb;
use crate::powers_db::PowersDb;
use crate::structs::{Class, Enhancement, EnhancementSet, Power, Powerset};
use crate::types::{EnhancementId, PowerId, SetId};
use crate::Result;

/// Both decoded catalogs, immutable once built.
///
/// Every lookup takes `&self`, so a `Catalog` behind an `Arc` can be shared
/// by any number of concurrent save decodes.
#[derive(Debug, Clone)]
pub struct Catalog {
    enhancements: EnhancementDb,
    powers: PowersDb,
}

impl Catalog {
    /// Combine two already-decoded catalogs.
    pub fn new(enhancements: EnhancementDb, powers: PowersDb) -> Self {
        Self {
            enhancements,
            powers,
        }
    }

    /// Decode both catalogs from in-memory bytes.
    pub fn parse(enhancement_bytes: &[u8], power_bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(
            EnhancementDb::parse(enhancement_bytes)?,
            PowersDb::parse(power_bytes)?,
        ))
    }

    /// Memory-map and decode both catalog files.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(enhancement_path: P, powers_path: Q) -> Result<Self> {
        let enhancement_path = enhancement_path.as_ref();
        let powers_path = powers_path.as_ref();

        let enhancement_file = File::open(enhancement_path)?;
        let enhancement_map = unsafe { Mmap::map(&enhancement_file)? };
        let powers_file = File::open(powers_path)?;
        let powers_map = unsafe { Mmap::map(&powers_file)? };

        let catalog = Self::parse(&enhancement_map, &powers_map)?;
        info!(
            enhancement_db = %enhancement_path.display(),
            powers_db = %powers_path.display(),
            "opened catalog"
        );
        Ok(catalog)
    }

    /// The enhancement half of the catalog.
    pub fn enhancement_db(&self) -> &EnhancementDb {
        &self.enhancements
    }

    /// The powers half of the catalog.
    pub fn powers_db(&self) -> &PowersDb {
        &self.powers
    }

    pub fn enhancement(&self, id: EnhancementId) -> Option<&Enhancement> {
        self.enhancements.get(id)
    }

    pub fn power(&self, id: PowerId) -> Option<&Power> {
        self.powers.get(id)
    }

    pub fn set(&self, id: SetId) -> Option<&EnhancementSet> {
        self.enhancements.set(id)
    }

    pub fn enhancement_by_uid(&self, uid: &str) -> Option<&Enhancement> {
        self.enhancements
            .id_by_uid(uid)
            .and_then(|id| self.enhancements.get(id))
    }

    pub fn enhancement_by_static_index(&self, static_index: i32) -> Option<&Enhancement> {
        self.enhancements
            .id_by_static_index(static_index)
            .and_then(|id| self.enhancements.get(id))
    }

    pub fn power_by_uid(&self, uid: &str) -> Option<&Power> {
        self.powers.id_by_uid(uid).and_then(|id| self.powers.get(id))
    }

    pub fn power_by_static_index(&self, static_index: i32) -> Option<&Power> {
        self.powers
            .id_by_static_index(static_index)
            .and_then(|id| self.powers.get(id))
    }

    pub fn powerset_by_full_name(&self, full_name: &str) -> Option<&Powerset> {
        self.powers.powerset_by_full_name(full_name)
    }

    pub fn class_by_name(&self, name: &str) -> Option<&Class> {
        self.powers.class_by_name(name)
    }

    /// Powers belonging to a powerset, in catalog order.
    pub fn powers_in_set<'a>(&'a self, full_name: &'a str) -> impl Iterator<Item = &'a Power> + 'a {
        self.powers
            .powers()
            .iter()
            .filter(move |power| power.powerset_full_name().eq_ignore_ascii_case(full_name))
    }

    /// The set an enhancement belongs to.
    ///
    /// The set uid wins; the stored set position is only consulted when
    /// the enhancement carries no uid.
    pub fn set_of(&self, enhancement: &Enhancement) -> Option<&EnhancementSet> {
        if !enhancement.set_uid.is_empty() {
            return self
                .enhancements
                .set_id_by_uid(&enhancement.set_uid)
                .and_then(|id| self.enhancements.set(id));
        }
        usize::try_from(enhancement.set_static_index)
            .ok()
            .and_then(|index| self.enhancements.set(SetId(index)))
    }
}

//! Enhancement catalog decoder.

use hashbrown::HashMap as FastHashMap;
use herodex_common::{BinaryReader, BinaryWriter};
use rustc_hash::FxHasher;
use tracing::{debug, info};

use crate::structs::{Enhancement, EnhancementSet};
use crate::types::{EnhancementId, SetId};
use crate::{Error, Result};

pub(crate) type FxHashMap<K, V> = FastHashMap<K, V, std::hash::BuildHasherDefault<FxHasher>>;

/// Decoded enhancement catalog with its lookup indices.
///
/// The catalog is immutable once decoded; all lookups borrow it.
#[derive(Debug, Clone)]
pub struct EnhancementDb {
    header: String,
    format_marker: f32,
    enhancements: Vec<Enhancement>,
    sets: Vec<EnhancementSet>,

    // Computed indices
    by_uid: FxHashMap<String, EnhancementId>,
    by_static_index: FxHashMap<i32, EnhancementId>,
    sets_by_uid: FxHashMap<String, SetId>,
}

impl EnhancementDb {
    /// Build a catalog from already-decoded entities.
    pub fn new(
        header: impl Into<String>,
        enhancements: Vec<Enhancement>,
        sets: Vec<EnhancementSet>,
    ) -> Self {
        Self::with_indices(header.into(), 0.0, enhancements, sets)
    }

    /// Decode an enhancement catalog from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let header = reader.read_text()?;
        let format_marker = reader.read_f32()?;
        debug!(header = %header, format_marker, "enhancement catalog header");

        let enhancement_count = reader.read_count()?;
        let mut enhancements = Vec::with_capacity(reader.capacity_for(enhancement_count));
        for index in 0..enhancement_count {
            let enhancement =
                Enhancement::read(&mut reader).map_err(Error::record("enhancement", index))?;
            enhancements.push(enhancement);
        }

        let set_count = reader.read_count()?;
        let mut sets = Vec::with_capacity(reader.capacity_for(set_count));
        for index in 0..set_count {
            let set = EnhancementSet::read(&mut reader)
                .map_err(Error::record("enhancement set", index))?;
            sets.push(set);
        }

        let db = Self::with_indices(header, format_marker, enhancements, sets);
        info!(
            enhancements = db.enhancements.len(),
            sets = db.sets.len(),
            "decoded enhancement catalog"
        );
        Ok(db)
    }

    fn with_indices(
        header: String,
        format_marker: f32,
        enhancements: Vec<Enhancement>,
        sets: Vec<EnhancementSet>,
    ) -> Self {
        let mut by_uid = FxHashMap::default();
        let mut by_static_index = FxHashMap::default();
        for (index, enhancement) in enhancements.iter().enumerate() {
            let id = EnhancementId(index);
            if by_uid.insert(enhancement.uid.clone(), id).is_some() {
                debug!(uid = %enhancement.uid, "duplicate enhancement uid, later entry wins");
            }
            by_static_index.insert(enhancement.static_index, id);
        }

        let sets_by_uid = sets
            .iter()
            .enumerate()
            .map(|(index, set)| (set.uid.clone(), SetId(index)))
            .collect();

        Self {
            header,
            format_marker,
            enhancements,
            sets,
            by_uid,
            by_static_index,
            sets_by_uid,
        }
    }

    /// Encode the catalog back into its binary layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        writer
            .write_text(&self.header)
            .write_f32(self.format_marker)
            .write_count(self.enhancements.len());
        for enhancement in &self.enhancements {
            enhancement.write_to(&mut writer);
        }
        writer.write_count(self.sets.len());
        for set in &self.sets {
            set.write_to(&mut writer);
        }
        writer.into_bytes()
    }

    /// Get the header string.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Get the format marker float stored after the header.
    pub fn format_marker(&self) -> f32 {
        self.format_marker
    }

    /// All enhancements, in catalog order.
    pub fn enhancements(&self) -> &[Enhancement] {
        &self.enhancements
    }

    /// All enhancement sets, in catalog order.
    pub fn sets(&self) -> &[EnhancementSet] {
        &self.sets
    }

    /// Get an enhancement by handle.
    pub fn get(&self, id: EnhancementId) -> Option<&Enhancement> {
        self.enhancements.get(id.0)
    }

    /// Get a set by handle.
    pub fn set(&self, id: SetId) -> Option<&EnhancementSet> {
        self.sets.get(id.0)
    }

    /// Look up an enhancement handle by unique id.
    pub fn id_by_uid(&self, uid: &str) -> Option<EnhancementId> {
        self.by_uid.get(uid).copied()
    }

    /// Look up an enhancement handle by static index.
    pub fn id_by_static_index(&self, static_index: i32) -> Option<EnhancementId> {
        self.by_static_index.get(&static_index).copied()
    }

    /// Look up a set handle by unique id.
    pub fn set_id_by_uid(&self, uid: &str) -> Option<SetId> {
        self.sets_by_uid.get(uid).copied()
    }

    /// Iterate over the uid index.
    pub fn uid_index(&self) -> impl Iterator<Item = (&str, EnhancementId)> {
        self.by_uid.iter().map(|(uid, id)| (uid.as_str(), *id))
    }

    /// Iterate over the static-index index.
    pub fn static_index(&self) -> impl Iterator<Item = (i32, EnhancementId)> + '_ {
        self.by_static_index.iter().map(|(index, id)| (*index, *id))
    }
}

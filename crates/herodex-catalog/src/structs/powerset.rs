//! Powerset records.

use herodex_common::{BinaryReader, BinaryWriter, Result};

/// A powerset that cannot be picked together with the owning set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MutexSet {
    pub uid: String,
    pub nid: i32,
}

/// A powerset from the powers catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Powerset {
    pub display_name: String,
    pub id: i32,
    pub set_type: i32,
    pub image: String,
    /// Qualified `group.set` name. Never empty after decoding.
    pub full_name: String,
    pub set_name: String,
    pub description: String,
    pub sub_name: String,
    /// Name of the owning archetype, empty for shared pools.
    pub archetype_class: String,
    pub trunk_set: Option<String>,
    pub link_secondary: Option<String>,
    pub mutex_sets: Vec<MutexSet>,
}

impl Powerset {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let display_name = reader.read_text()?;
        let id = reader.read_i32()?;
        let set_type = reader.read_i32()?;
        let image = reader.read_text()?;
        let mut full_name = reader.read_text()?;
        if full_name.is_empty() {
            full_name = format!("Orphan.{}", display_name.replacen(' ', "_", 1));
        }

        Ok(Self {
            display_name,
            id,
            set_type,
            image,
            full_name,
            set_name: reader.read_text()?,
            description: reader.read_text()?,
            sub_name: reader.read_text()?,
            archetype_class: reader.read_text()?,
            trunk_set: non_empty(reader.read_text()?),
            link_secondary: non_empty(reader.read_text()?),
            mutex_sets: reader.read_list(|reader| {
                Ok(MutexSet {
                    uid: reader.read_text()?,
                    nid: reader.read_i32()?,
                })
            })?,
        })
    }

    pub(crate) fn write_to(&self, writer: &mut BinaryWriter) {
        writer
            .write_text(&self.display_name)
            .write_i32(self.id)
            .write_i32(self.set_type)
            .write_text(&self.image)
            .write_text(&self.full_name)
            .write_text(&self.set_name)
            .write_text(&self.description)
            .write_text(&self.sub_name)
            .write_text(&self.archetype_class)
            .write_text(self.trunk_set.as_deref().unwrap_or(""))
            .write_text(self.link_secondary.as_deref().unwrap_or(""))
            .write_count(self.mutex_sets.len());
        for mutex in &self.mutex_sets {
            writer.write_text(&mutex.uid).write_i32(mutex.nid);
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

//! Archetype (class) records.

use herodex_common::{BinaryReader, BinaryWriter, Result};

/// A playable or non-playable archetype from the powers catalog.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Class {
    pub display_name: String,
    pub hitpoints: i32,
    pub hitpoint_cap: f32,
    pub description: String,
    pub resistance_cap: f32,
    pub origins: Vec<String>,
    /// Internal class name, as referenced by saves and requirements.
    pub name: String,
    pub class_type: i32,
    pub column: i32,
    pub short_description: String,
    pub primary_group: String,
    pub secondary_group: String,
    pub playable: bool,
    pub recharge_cap: f32,
    pub damage_cap: f32,
    pub recovery_cap: f32,
    pub regen_cap: f32,
    pub base_recovery: f32,
    pub base_regen: f32,
    pub base_threat: f32,
    pub perception_cap: f32,
}

impl Class {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            display_name: reader.read_text()?,
            hitpoints: reader.read_i32()?,
            hitpoint_cap: reader.read_f32()?,
            description: reader.read_text()?,
            resistance_cap: reader.read_f32()?,
            origins: reader.read_text_list()?,
            name: reader.read_text()?,
            class_type: reader.read_i32()?,
            column: reader.read_i32()?,
            short_description: reader.read_text()?,
            primary_group: reader.read_text()?,
            secondary_group: reader.read_text()?,
            playable: reader.read_bool()?,
            recharge_cap: reader.read_f32()?,
            damage_cap: reader.read_f32()?,
            recovery_cap: reader.read_f32()?,
            regen_cap: reader.read_f32()?,
            base_recovery: reader.read_f32()?,
            base_regen: reader.read_f32()?,
            base_threat: reader.read_f32()?,
            perception_cap: reader.read_f32()?,
        })
    }

    pub(crate) fn write_to(&self, writer: &mut BinaryWriter) {
        writer
            .write_text(&self.display_name)
            .write_i32(self.hitpoints)
            .write_f32(self.hitpoint_cap)
            .write_text(&self.description)
            .write_f32(self.resistance_cap)
            .write_text_list(&self.origins)
            .write_text(&self.name)
            .write_i32(self.class_type)
            .write_i32(self.column)
            .write_text(&self.short_description)
            .write_text(&self.primary_group)
            .write_text(&self.secondary_group)
            .write_bool(self.playable)
            .write_f32(self.recharge_cap)
            .write_f32(self.damage_cap)
            .write_f32(self.recovery_cap)
            .write_f32(self.regen_cap)
            .write_f32(self.base_recovery)
            .write_f32(self.base_regen)
            .write_f32(self.base_threat)
            .write_f32(self.perception_cap);
    }

    /// Whether characters of this class may pick the given origin.
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o.eq_ignore_ascii_case(origin))
    }
}

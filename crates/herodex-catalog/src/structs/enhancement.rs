//! Enhancement records.

use herodex_common::{BinaryReader, BinaryWriter, Result};

use super::Effect;
use crate::types::{EnhancementType, MutexGroup};

/// One attribute an enhancement modifies, optionally with a full effect.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnhancementEffect {
    pub mode: i32,
    pub buff_mode: i32,
    pub enhance_id: i32,
    pub enhance_sub_id: i32,
    pub schedule: i32,
    pub multiplier: f32,
    pub fx: Option<Effect>,
}

impl EnhancementEffect {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let mode = reader.read_i32()?;
        let buff_mode = reader.read_i32()?;
        let enhance_id = reader.read_i32()?;
        let enhance_sub_id = reader.read_i32()?;
        let schedule = reader.read_i32()?;
        let multiplier = reader.read_f32()?;
        let fx = if reader.read_bool()? {
            Some(Effect::read(reader)?)
        } else {
            None
        };

        Ok(Self {
            mode,
            buff_mode,
            enhance_id,
            enhance_sub_id,
            schedule,
            multiplier,
            fx,
        })
    }

    fn write_to(&self, writer: &mut BinaryWriter) {
        writer
            .write_i32(self.mode)
            .write_i32(self.buff_mode)
            .write_i32(self.enhance_id)
            .write_i32(self.enhance_sub_id)
            .write_i32(self.schedule)
            .write_f32(self.multiplier)
            .write_bool(self.fx.is_some());
        if let Some(fx) = &self.fx {
            fx.write_to(writer);
        }
    }
}

/// An enhancement from the enhancement catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Enhancement {
    /// Catalog-unique numeric identifier used by static-index saves.
    pub static_index: i32,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub enhancement_type: EnhancementType,
    pub subtype_id: i32,
    /// Ids of the enhancement classes this enhancement belongs to.
    pub class_ids: Vec<i32>,
    pub image: String,
    /// Position of the owning set in the set list, or negative.
    pub set_static_index: i32,
    /// Unique id of the owning set, or empty.
    pub set_uid: String,
    pub effect_chance: f32,
    pub min_level: i32,
    pub max_level: i32,
    pub unique: bool,
    pub mutex_group: MutexGroup,
    pub buff_mode: i32,
    pub effects: Vec<EnhancementEffect>,
    /// Catalog-unique string identifier used by qualified-name saves.
    pub uid: String,
    pub recipe_name: String,
    pub superior: bool,
    pub is_proc: bool,
    pub is_scalable: bool,
}

impl Default for Enhancement {
    fn default() -> Self {
        Self {
            static_index: -1,
            name: String::new(),
            short_name: String::new(),
            description: String::new(),
            enhancement_type: EnhancementType::None,
            subtype_id: 0,
            class_ids: Vec::new(),
            image: String::new(),
            set_static_index: -1,
            set_uid: String::new(),
            effect_chance: 1.0,
            min_level: 1,
            max_level: 53,
            unique: false,
            mutex_group: MutexGroup::None,
            buff_mode: 0,
            effects: Vec::new(),
            uid: String::new(),
            recipe_name: String::new(),
            superior: false,
            is_proc: false,
            is_scalable: false,
        }
    }
}

impl Enhancement {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let static_index = reader.read_i32()?;
        let name = reader.read_text()?;
        let short_name = reader.read_text()?;
        let description = reader.read_text()?;
        let enhancement_type = EnhancementType::from_raw(reader.read_i32()?);
        let subtype_id = reader.read_i32()?;
        let class_ids = reader.read_i32_list()?;
        let image = reader.read_text()?;
        let set_static_index = reader.read_i32()?;
        let set_uid = reader.read_text()?;
        let effect_chance = reader.read_f32()?;
        let min_level = reader.read_i32()?;
        let max_level = reader.read_i32()?;
        let unique = reader.read_bool()?;
        let mutex_group = MutexGroup::from_raw(reader.read_i32()?);
        let buff_mode = reader.read_i32()?;
        let effects = reader.read_list(EnhancementEffect::read)?;

        Ok(Self {
            static_index,
            name,
            short_name,
            description,
            enhancement_type,
            subtype_id,
            class_ids,
            image,
            set_static_index,
            set_uid,
            effect_chance,
            min_level,
            max_level,
            unique,
            mutex_group,
            buff_mode,
            effects,
            uid: reader.read_text()?,
            recipe_name: reader.read_text()?,
            superior: reader.read_bool()?,
            is_proc: reader.read_bool()?,
            is_scalable: reader.read_bool()?,
        })
    }

    pub(crate) fn write_to(&self, writer: &mut BinaryWriter) {
        writer
            .write_i32(self.static_index)
            .write_text(&self.name)
            .write_text(&self.short_name)
            .write_text(&self.description)
            .write_i32(self.enhancement_type.raw())
            .write_i32(self.subtype_id)
            .write_i32_list(&self.class_ids)
            .write_text(&self.image)
            .write_i32(self.set_static_index)
            .write_text(&self.set_uid)
            .write_f32(self.effect_chance)
            .write_i32(self.min_level)
            .write_i32(self.max_level)
            .write_bool(self.unique)
            .write_i32(self.mutex_group.raw())
            .write_i32(self.buff_mode)
            .write_count(self.effects.len());
        for effect in &self.effects {
            effect.write_to(writer);
        }
        writer
            .write_text(&self.uid)
            .write_text(&self.recipe_name)
            .write_bool(self.superior)
            .write_bool(self.is_proc)
            .write_bool(self.is_scalable);
    }

    /// Whether this enhancement claims membership of a set.
    pub fn has_set(&self) -> bool {
        !self.set_uid.is_empty() || self.set_static_index >= 0
    }
}

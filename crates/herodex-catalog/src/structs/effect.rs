//! Effect records shared by powers and enhancements.

use std::collections::BTreeMap;

use herodex_common::{BinaryReader, BinaryWriter, Result};

/// Attribute values an effect overrides on its parent power.
///
/// Stored twice per effect: the original values and the modified ones.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttribOverrides {
    pub accuracy: f32,
    pub activate_period: f32,
    pub arc: i32,
    pub cast_time: f32,
    pub effect_area: i32,
    pub endurance_cost: f32,
    pub interrupt_time: f32,
    pub max_targets: i32,
    pub radius: f32,
    pub range: f32,
    pub recharge_time: f32,
    pub secondary_range: f32,
}

impl AttribOverrides {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            accuracy: reader.read_f32()?,
            activate_period: reader.read_f32()?,
            arc: reader.read_i32()?,
            cast_time: reader.read_f32()?,
            effect_area: reader.read_i32()?,
            endurance_cost: reader.read_f32()?,
            interrupt_time: reader.read_f32()?,
            max_targets: reader.read_i32()?,
            radius: reader.read_f32()?,
            range: reader.read_f32()?,
            recharge_time: reader.read_f32()?,
            secondary_range: reader.read_f32()?,
        })
    }

    fn write_to(&self, writer: &mut BinaryWriter) {
        writer
            .write_f32(self.accuracy)
            .write_f32(self.activate_period)
            .write_i32(self.arc)
            .write_f32(self.cast_time)
            .write_i32(self.effect_area)
            .write_f32(self.endurance_cost)
            .write_f32(self.interrupt_time)
            .write_i32(self.max_targets)
            .write_f32(self.radius)
            .write_f32(self.range)
            .write_f32(self.recharge_time)
            .write_f32(self.secondary_range);
    }
}

/// Textual expressions that replace the fixed duration, magnitude and
/// probability when present. They are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EffectExpressions {
    pub duration: String,
    pub magnitude: String,
    pub probability: String,
}

/// One gameplay effect attached to a power or an enhancement.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Effect {
    pub power_full_name: String,
    pub unique_id: i32,
    pub effect_class: i32,
    pub effect_type: i32,
    pub damage_type: i32,
    pub mez_type: i32,
    pub modifies_effect_type: i32,
    pub summon: String,
    pub delayed_time: f32,
    pub ticks: i32,
    pub stacking: i32,
    pub base_probability: f32,
    pub suppression: i32,
    pub buffable: bool,
    pub resistable: bool,
    pub special_case: i32,
    pub variable_modified_override: bool,
    pub ignore_scaling: bool,
    pub pv_mode: i32,
    pub to_whom: i32,
    pub display_percentage_override: i32,
    pub scale: f32,
    pub magnitude: f32,
    pub duration: f32,
    pub attrib_type: i32,
    pub aspect: i32,
    pub modifier_table: String,
    pub near_ground: bool,
    pub cancel_on_miss: bool,
    pub requires_hit_check: bool,
    pub uid_class_name: String,
    pub nid_class_name: i32,
    pub expressions: EffectExpressions,
    pub reward: String,
    pub effect_id: String,
    pub ignore_ed: bool,
    pub override_name: String,
    pub procs_per_minute: f32,
    pub power_attribs: i32,
    pub original_attribs: AttribOverrides,
    pub modified_attribs: AttribOverrides,
    /// Conditions gating the effect, keyed by condition expression.
    pub conditionals: BTreeMap<String, String>,
}

impl Effect {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let mut effect = Self {
            power_full_name: reader.read_text()?,
            unique_id: reader.read_i32()?,
            effect_class: reader.read_i32()?,
            effect_type: reader.read_i32()?,
            damage_type: reader.read_i32()?,
            mez_type: reader.read_i32()?,
            modifies_effect_type: reader.read_i32()?,
            summon: reader.read_text()?,
            delayed_time: reader.read_f32()?,
            ticks: reader.read_i32()?,
            stacking: reader.read_i32()?,
            base_probability: reader.read_f32()?,
            suppression: reader.read_i32()?,
            buffable: reader.read_bool()?,
            resistable: reader.read_bool()?,
            special_case: reader.read_i32()?,
            variable_modified_override: reader.read_bool()?,
            ignore_scaling: reader.read_bool()?,
            pv_mode: reader.read_i32()?,
            to_whom: reader.read_i32()?,
            display_percentage_override: reader.read_i32()?,
            scale: reader.read_f32()?,
            magnitude: reader.read_f32()?,
            duration: reader.read_f32()?,
            attrib_type: reader.read_i32()?,
            aspect: reader.read_i32()?,
            modifier_table: reader.read_text()?,
            near_ground: reader.read_bool()?,
            cancel_on_miss: reader.read_bool()?,
            requires_hit_check: reader.read_bool()?,
            uid_class_name: reader.read_text()?,
            nid_class_name: reader.read_i32()?,
            expressions: EffectExpressions {
                duration: reader.read_text()?,
                magnitude: reader.read_text()?,
                probability: reader.read_text()?,
            },
            reward: reader.read_text()?,
            effect_id: reader.read_text()?,
            ignore_ed: reader.read_bool()?,
            override_name: reader.read_text()?,
            procs_per_minute: reader.read_f32()?,
            power_attribs: reader.read_i32()?,
            original_attribs: AttribOverrides::read(reader)?,
            modified_attribs: AttribOverrides::read(reader)?,
            conditionals: BTreeMap::new(),
        };

        // Unlike every other collection, this count is stored as-is.
        let conditional_count = reader.read_i32()?.max(0);
        for _ in 0..conditional_count {
            let key = reader.read_text()?;
            let value = reader.read_text()?;
            effect.conditionals.insert(key, value);
        }

        Ok(effect)
    }

    pub(crate) fn write_to(&self, writer: &mut BinaryWriter) {
        writer
            .write_text(&self.power_full_name)
            .write_i32(self.unique_id)
            .write_i32(self.effect_class)
            .write_i32(self.effect_type)
            .write_i32(self.damage_type)
            .write_i32(self.mez_type)
            .write_i32(self.modifies_effect_type)
            .write_text(&self.summon)
            .write_f32(self.delayed_time)
            .write_i32(self.ticks)
            .write_i32(self.stacking)
            .write_f32(self.base_probability)
            .write_i32(self.suppression)
            .write_bool(self.buffable)
            .write_bool(self.resistable)
            .write_i32(self.special_case)
            .write_bool(self.variable_modified_override)
            .write_bool(self.ignore_scaling)
            .write_i32(self.pv_mode)
            .write_i32(self.to_whom)
            .write_i32(self.display_percentage_override)
            .write_f32(self.scale)
            .write_f32(self.magnitude)
            .write_f32(self.duration)
            .write_i32(self.attrib_type)
            .write_i32(self.aspect)
            .write_text(&self.modifier_table)
            .write_bool(self.near_ground)
            .write_bool(self.cancel_on_miss)
            .write_bool(self.requires_hit_check)
            .write_text(&self.uid_class_name)
            .write_i32(self.nid_class_name)
            .write_text(&self.expressions.duration)
            .write_text(&self.expressions.magnitude)
            .write_text(&self.expressions.probability)
            .write_text(&self.reward)
            .write_text(&self.effect_id)
            .write_bool(self.ignore_ed)
            .write_text(&self.override_name)
            .write_f32(self.procs_per_minute)
            .write_i32(self.power_attribs);
        self.original_attribs.write_to(writer);
        self.modified_attribs.write_to(writer);

        writer.write_i32(self.conditionals.len() as i32);
        for (key, value) in &self.conditionals {
            writer.write_text(key).write_text(value);
        }
    }
}

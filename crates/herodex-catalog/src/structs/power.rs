//! Power records.

use herodex_common::{BinaryReader, BinaryWriter, Result};

use super::Effect;

/// Who may take a power.
///
/// Power-id pairs name two powers, either of which satisfies (or violates)
/// the requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Requirement {
    pub class_names: Vec<String>,
    pub class_names_not: Vec<String>,
    pub power_ids: Vec<(String, String)>,
    pub power_ids_not: Vec<(String, String)>,
}

impl Requirement {
    fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        fn read_pair(reader: &mut BinaryReader<'_>) -> Result<(String, String)> {
            Ok((reader.read_text()?, reader.read_text()?))
        }

        Ok(Self {
            class_names: reader.read_text_list()?,
            class_names_not: reader.read_text_list()?,
            power_ids: reader.read_list(read_pair)?,
            power_ids_not: reader.read_list(read_pair)?,
        })
    }

    fn write_to(&self, writer: &mut BinaryWriter) {
        writer
            .write_text_list(&self.class_names)
            .write_text_list(&self.class_names_not);
        for pairs in [&self.power_ids, &self.power_ids_not] {
            writer.write_count(pairs.len());
            for (first, second) in pairs {
                writer.write_text(first).write_text(second);
            }
        }
    }

    /// Whether a class passes the class allow/deny lists.
    ///
    /// An empty allow list admits every class not explicitly denied.
    pub fn allows_class(&self, class_name: &str) -> bool {
        let denied = self
            .class_names_not
            .iter()
            .any(|c| c.eq_ignore_ascii_case(class_name));
        let allowed = self.class_names.is_empty()
            || self
                .class_names
                .iter()
                .any(|c| c.eq_ignore_ascii_case(class_name));
        allowed && !denied
    }
}

/// A power from the powers catalog.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Power {
    /// Catalog-unique numeric identifier used by static-index saves.
    pub static_index: i32,
    /// Qualified `group.set.power` name, also the power's unique id.
    pub full_name: String,
    pub group_name: String,
    pub set_name: String,
    pub power_name: String,
    pub display_name: String,
    pub available: i32,
    pub requirement: Requirement,
    pub modes_required: i32,
    pub modes_disallowed: i32,
    pub power_type: i32,
    pub accuracy: f32,
    pub attack_types: i32,
    pub group_memberships: Vec<String>,
    pub entities_affected: i32,
    pub entities_auto_hit: i32,
    pub target: i32,
    pub target_los: bool,
    pub range: f32,
    pub target_secondary: i32,
    pub range_secondary: f32,
    pub end_cost: f32,
    pub interrupt_time: f32,
    pub cast_time: f32,
    pub recharge_time: f32,
    pub base_recharge_time: f32,
    pub activate_period: f32,
    pub effect_area: i32,
    pub radius: f32,
    pub arc: i32,
    pub max_targets: i32,
    pub max_boosts: String,
    pub cast_flags: i32,
    pub ai_report: i32,
    pub num_charges: i32,
    pub usage_time: i32,
    pub life_time: i32,
    pub life_time_in_game: i32,
    pub num_allowed: i32,
    pub do_not_save: bool,
    pub boosts_allowed: Vec<String>,
    pub cast_through_hold: bool,
    pub ignore_strength: bool,
    pub description_short: String,
    pub description: String,
    /// Enhancement classes this power accepts.
    pub enhancements: Vec<i32>,
    /// Enhancement set types this power accepts, first occurrence order.
    pub set_types: Vec<i32>,
    pub click_buff: bool,
    pub always_toggle: bool,
    pub level: i32,
    pub allow_front_loading: bool,
    pub variable_enabled: bool,
    pub variable_override: bool,
    pub variable_name: String,
    pub variable_min: i32,
    pub variable_max: i32,
    /// Qualified names of the powers this power grants.
    pub sub_power_uids: Vec<String>,
    pub ignore_enhancements: Vec<i32>,
    pub ignore_buffs: Vec<i32>,
    pub skip_max: bool,
    pub inherent_type: i32,
    pub display_location: i32,
    pub mutex_auto: bool,
    pub mutex_ignore: bool,
    pub absorb_summon_effects: bool,
    pub absorb_summon_attributes: bool,
    pub show_summon_anyway: bool,
    pub never_auto_update: bool,
    pub never_auto_update_requirements: bool,
    pub include_flag: bool,
    pub forced_class: String,
    pub sort_override: bool,
    pub boost_boostable: bool,
    pub boost_use_player_level: bool,
    pub effects: Vec<Effect>,
    pub hidden_power: bool,
    pub active: bool,
    pub taken: bool,
    pub stacks: i32,
    pub variable_start: i32,
}

impl Power {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            static_index: reader.read_i32()?,
            full_name: reader.read_text()?,
            group_name: reader.read_text()?,
            set_name: reader.read_text()?,
            power_name: reader.read_text()?,
            display_name: reader.read_text()?,
            available: reader.read_i32()?,
            requirement: Requirement::read(reader)?,
            modes_required: reader.read_i32()?,
            modes_disallowed: reader.read_i32()?,
            power_type: reader.read_i32()?,
            accuracy: reader.read_f32()?,
            attack_types: reader.read_i32()?,
            group_memberships: reader.read_text_list()?,
            entities_affected: reader.read_i32()?,
            entities_auto_hit: reader.read_i32()?,
            target: reader.read_i32()?,
            target_los: reader.read_bool()?,
            range: reader.read_f32()?,
            target_secondary: reader.read_i32()?,
            range_secondary: reader.read_f32()?,
            end_cost: reader.read_f32()?,
            interrupt_time: reader.read_f32()?,
            cast_time: reader.read_f32()?,
            recharge_time: reader.read_f32()?,
            base_recharge_time: reader.read_f32()?,
            activate_period: reader.read_f32()?,
            effect_area: reader.read_i32()?,
            radius: reader.read_f32()?,
            arc: reader.read_i32()?,
            max_targets: reader.read_i32()?,
            max_boosts: reader.read_text()?,
            cast_flags: reader.read_i32()?,
            ai_report: reader.read_i32()?,
            num_charges: reader.read_i32()?,
            usage_time: reader.read_i32()?,
            life_time: reader.read_i32()?,
            life_time_in_game: reader.read_i32()?,
            num_allowed: reader.read_i32()?,
            do_not_save: reader.read_bool()?,
            boosts_allowed: reader.read_text_list()?,
            cast_through_hold: reader.read_bool()?,
            ignore_strength: reader.read_bool()?,
            description_short: reader.read_text()?,
            description: reader.read_text()?,
            enhancements: reader.read_i32_list()?,
            set_types: dedup_in_order(reader.read_i32_list()?),
            click_buff: reader.read_bool()?,
            always_toggle: reader.read_bool()?,
            level: reader.read_i32()?,
            allow_front_loading: reader.read_bool()?,
            variable_enabled: reader.read_bool()?,
            variable_override: reader.read_bool()?,
            variable_name: reader.read_text()?,
            variable_min: reader.read_i32()?,
            variable_max: reader.read_i32()?,
            sub_power_uids: reader.read_text_list()?,
            ignore_enhancements: reader.read_i32_list()?,
            ignore_buffs: reader.read_i32_list()?,
            skip_max: reader.read_bool()?,
            inherent_type: reader.read_i32()?,
            display_location: reader.read_i32()?,
            mutex_auto: reader.read_bool()?,
            mutex_ignore: reader.read_bool()?,
            absorb_summon_effects: reader.read_bool()?,
            absorb_summon_attributes: reader.read_bool()?,
            show_summon_anyway: reader.read_bool()?,
            never_auto_update: reader.read_bool()?,
            never_auto_update_requirements: reader.read_bool()?,
            include_flag: reader.read_bool()?,
            forced_class: reader.read_text()?,
            sort_override: reader.read_bool()?,
            boost_boostable: reader.read_bool()?,
            boost_use_player_level: reader.read_bool()?,
            effects: reader.read_list(Effect::read)?,
            hidden_power: reader.read_bool()?,
            active: reader.read_bool()?,
            taken: reader.read_bool()?,
            stacks: reader.read_i32()?,
            variable_start: reader.read_i32()?,
        })
    }

    pub(crate) fn write_to(&self, writer: &mut BinaryWriter) {
        writer
            .write_i32(self.static_index)
            .write_text(&self.full_name)
            .write_text(&self.group_name)
            .write_text(&self.set_name)
            .write_text(&self.power_name)
            .write_text(&self.display_name)
            .write_i32(self.available);
        self.requirement.write_to(writer);
        writer
            .write_i32(self.modes_required)
            .write_i32(self.modes_disallowed)
            .write_i32(self.power_type)
            .write_f32(self.accuracy)
            .write_i32(self.attack_types)
            .write_text_list(&self.group_memberships)
            .write_i32(self.entities_affected)
            .write_i32(self.entities_auto_hit)
            .write_i32(self.target)
            .write_bool(self.target_los)
            .write_f32(self.range)
            .write_i32(self.target_secondary)
            .write_f32(self.range_secondary)
            .write_f32(self.end_cost)
            .write_f32(self.interrupt_time)
            .write_f32(self.cast_time)
            .write_f32(self.recharge_time)
            .write_f32(self.base_recharge_time)
            .write_f32(self.activate_period)
            .write_i32(self.effect_area)
            .write_f32(self.radius)
            .write_i32(self.arc)
            .write_i32(self.max_targets)
            .write_text(&self.max_boosts)
            .write_i32(self.cast_flags)
            .write_i32(self.ai_report)
            .write_i32(self.num_charges)
            .write_i32(self.usage_time)
            .write_i32(self.life_time)
            .write_i32(self.life_time_in_game)
            .write_i32(self.num_allowed)
            .write_bool(self.do_not_save)
            .write_text_list(&self.boosts_allowed)
            .write_bool(self.cast_through_hold)
            .write_bool(self.ignore_strength)
            .write_text(&self.description_short)
            .write_text(&self.description)
            .write_i32_list(&self.enhancements)
            .write_i32_list(&self.set_types)
            .write_bool(self.click_buff)
            .write_bool(self.always_toggle)
            .write_i32(self.level)
            .write_bool(self.allow_front_loading)
            .write_bool(self.variable_enabled)
            .write_bool(self.variable_override)
            .write_text(&self.variable_name)
            .write_i32(self.variable_min)
            .write_i32(self.variable_max)
            .write_text_list(&self.sub_power_uids)
            .write_i32_list(&self.ignore_enhancements)
            .write_i32_list(&self.ignore_buffs)
            .write_bool(self.skip_max)
            .write_i32(self.inherent_type)
            .write_i32(self.display_location)
            .write_bool(self.mutex_auto)
            .write_bool(self.mutex_ignore)
            .write_bool(self.absorb_summon_effects)
            .write_bool(self.absorb_summon_attributes)
            .write_bool(self.show_summon_anyway)
            .write_bool(self.never_auto_update)
            .write_bool(self.never_auto_update_requirements)
            .write_bool(self.include_flag)
            .write_text(&self.forced_class)
            .write_bool(self.sort_override)
            .write_bool(self.boost_boostable)
            .write_bool(self.boost_use_player_level)
            .write_count(self.effects.len());
        for effect in &self.effects {
            effect.write_to(writer);
        }
        writer
            .write_bool(self.hidden_power)
            .write_bool(self.active)
            .write_bool(self.taken)
            .write_i32(self.stacks)
            .write_i32(self.variable_start);
    }

    /// Qualified name of the powerset this power belongs to.
    pub fn powerset_full_name(&self) -> String {
        format!("{}.{}", self.group_name, self.set_name)
    }

    /// Whether the power accepts enhancements of the given set type.
    pub fn accepts_set_type(&self, set_type: i32) -> bool {
        self.set_types.contains(&set_type)
    }
}

fn dedup_in_order(values: Vec<i32>) -> Vec<i32> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

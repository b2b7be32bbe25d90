//! Decoded character records.
//!
//! A [`Character`] never owns catalog entities. Powers and enhancements are
//! held as [`PowerId`] / [`EnhancementId`] handles into the [`Catalog`] the
//! save was decoded against.
//!
//! [`Catalog`]: herodex_catalog::Catalog

use std::fmt;

use herodex_catalog::{EnhancementId, PowerId, RefMode};

use crate::version::SchemaVersion;

/// Character alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Alignment {
    #[default]
    Hero,
    Rogue,
    Vigilante,
    Villain,
    Loyalist,
    Resistance,
    Unknown(i32),
}

impl Alignment {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Hero,
            1 => Self::Rogue,
            2 => Self::Vigilante,
            3 => Self::Villain,
            4 => Self::Loyalist,
            5 => Self::Resistance,
            other => Self::Unknown(other),
        }
    }

    pub fn raw(&self) -> i32 {
        match *self {
            Self::Hero => 0,
            Self::Rogue => 1,
            Self::Vigilante => 2,
            Self::Villain => 3,
            Self::Loyalist => 4,
            Self::Resistance => 5,
            Self::Unknown(other) => other,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Hero => f.write_str("Hero"),
            Self::Rogue => f.write_str("Rogue"),
            Self::Vigilante => f.write_str("Vigilante"),
            Self::Villain => f.write_str("Villain"),
            Self::Loyalist => f.write_str("Loyalist"),
            Self::Resistance => f.write_str("Resistance"),
            Self::Unknown(v) => write!(f, "Unknown ({})", v),
        }
    }
}

/// Per-instance data that depends on the enhancement's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InstanceDetail {
    /// Normal and special enhancements.
    Graded { relative_level: i8, grade: i8 },
    /// Invention and set-invention enhancements.
    Invention {
        io_level: u8,
        relative_level: Option<i8>,
    },
    /// Any other type; nothing follows the reference.
    Plain,
}

/// One enhancement placed into one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnhancementInstance {
    pub enhancement: EnhancementId,
    pub detail: InstanceDetail,
}

impl EnhancementInstance {
    pub fn relative_level(&self) -> Option<i8> {
        match self.detail {
            InstanceDetail::Graded { relative_level, .. } => Some(relative_level),
            InstanceDetail::Invention { relative_level, .. } => relative_level,
            InstanceDetail::Plain => None,
        }
    }

    pub fn io_level(&self) -> Option<u8> {
        match self.detail {
            InstanceDetail::Invention { io_level, .. } => Some(io_level),
            _ => None,
        }
    }
}

/// An enhancement slot on a power.
///
/// Either half may be empty when its reference did not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Slot {
    pub level: u8,
    pub inherent: bool,
    pub enhancement: Option<EnhancementInstance>,
    pub flipped: Option<EnhancementInstance>,
}

/// A sub-power attached to a power entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubPowerEntry {
    pub power: PowerId,
    pub stat_include: bool,
}

/// A power taken by the character.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PowerEntry {
    pub power: PowerId,
    pub level: u8,
    pub stat_include: bool,
    pub proc_include: bool,
    pub variable_value: i32,
    pub inherent_slots_used: i32,
    pub sub_powers: Vec<SubPowerEntry>,
    pub slots: Vec<Slot>,
}

/// What was read from a payload versus what survived resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodeStats {
    pub powers_read: usize,
    pub powers_dropped: usize,
    /// Misses inside kept power entries only.
    pub sub_powers_dropped: usize,
    /// Misses inside kept power entries only. Empty slots are not misses.
    pub enhancements_dropped: usize,
}

impl DecodeStats {
    /// Whether any reference failed to resolve.
    pub fn is_lossless(&self) -> bool {
        self.powers_dropped == 0 && self.sub_powers_dropped == 0 && self.enhancements_dropped == 0
    }
}

/// A decoded character build.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Character {
    pub version: SchemaVersion,
    pub ref_mode: RefMode,
    pub has_sub_powers: bool,
    pub class_name: String,
    pub origin: String,
    pub alignment: Alignment,
    pub name: String,
    pub powersets: Vec<String>,
    pub last_power_index: i32,
    pub power_entries: Vec<PowerEntry>,
    pub stats: DecodeStats,
}

impl Character {
    /// Handles of every power taken, in save order.
    pub fn powers(&self) -> impl Iterator<Item = PowerId> + '_ {
        self.power_entries.iter().map(|entry| entry.power)
    }

    /// Total number of slots across all power entries.
    pub fn slot_count(&self) -> usize {
        self.power_entries.iter().map(|entry| entry.slots.len()).sum()
    }

    /// Every resolved enhancement instance, primary before flipped per slot.
    pub fn enhancement_instances(&self) -> impl Iterator<Item = &EnhancementInstance> + '_ {
        self.power_entries
            .iter()
            .flat_map(|entry| entry.slots.iter())
            .flat_map(|slot| slot.enhancement.iter().chain(slot.flipped.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_raw() {
        for raw in 0..=5 {
            assert_eq!(Alignment::from_raw(raw).raw(), raw);
        }
        assert_eq!(Alignment::from_raw(-1), Alignment::Unknown(-1));
        assert_eq!(Alignment::default(), Alignment::Hero);
        assert_eq!(Alignment::Villain.to_string(), "Villain");
    }

    #[test]
    fn test_instance_accessors() {
        let graded = EnhancementInstance {
            enhancement: EnhancementId(0),
            detail: InstanceDetail::Graded {
                relative_level: 2,
                grade: 3,
            },
        };
        assert_eq!(graded.relative_level(), Some(2));
        assert_eq!(graded.io_level(), None);

        let old_io = EnhancementInstance {
            enhancement: EnhancementId(1),
            detail: InstanceDetail::Invention {
                io_level: 49,
                relative_level: None,
            },
        };
        assert_eq!(old_io.io_level(), Some(49));
        assert_eq!(old_io.relative_level(), None);
    }

    #[test]
    fn test_character_helpers() {
        let instance = |id| EnhancementInstance {
            enhancement: EnhancementId(id),
            detail: InstanceDetail::Plain,
        };
        let character = Character {
            version: SchemaVersion::MAX,
            ref_mode: RefMode::QualifiedName,
            has_sub_powers: false,
            class_name: "Class_Blaster".into(),
            origin: "Science".into(),
            alignment: Alignment::Hero,
            name: "Test".into(),
            powersets: Vec::new(),
            last_power_index: 0,
            power_entries: vec![PowerEntry {
                power: PowerId(4),
                level: 1,
                stat_include: true,
                proc_include: false,
                variable_value: 0,
                inherent_slots_used: 0,
                sub_powers: Vec::new(),
                slots: vec![
                    Slot {
                        enhancement: Some(instance(1)),
                        flipped: Some(instance(2)),
                        ..Default::default()
                    },
                    Slot {
                        flipped: Some(instance(3)),
                        ..Default::default()
                    },
                    Slot::default(),
                ],
            }],
            stats: DecodeStats::default(),
        };

        assert_eq!(character.powers().collect::<Vec<_>>(), vec![PowerId(4)]);
        assert_eq!(character.slot_count(), 3);
        let ids: Vec<_> = character
            .enhancement_instances()
            .map(|i| i.enhancement.0)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(character.stats.is_lossless());
    }
}

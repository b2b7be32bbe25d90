//! Character builds with catalog names filled in.

use std::fmt;

use herodex_catalog::Catalog;
use herodex_save::{Alignment, Character, DecodeStats, EnhancementInstance, SchemaVersion, Slot};

/// A decoded character joined with the catalog it was decoded against.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BuildSummary<'a> {
    pub name: &'a str,
    pub class_name: &'a str,
    pub class_display_name: Option<&'a str>,
    pub origin: &'a str,
    pub alignment: Alignment,
    pub version: SchemaVersion,
    pub powersets: &'a [String],
    pub powers: Vec<PowerSummary<'a>>,
    pub stats: DecodeStats,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PowerSummary<'a> {
    pub full_name: &'a str,
    pub display_name: &'a str,
    pub level: u8,
    pub sub_powers: Vec<&'a str>,
    pub slots: Vec<SlotSummary<'a>>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SlotSummary<'a> {
    pub level: u8,
    pub inherent: bool,
    pub enhancement: Option<InstanceSummary<'a>>,
    pub flipped: Option<InstanceSummary<'a>>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct InstanceSummary<'a> {
    pub uid: &'a str,
    pub name: &'a str,
    pub set: Option<&'a str>,
    pub io_level: Option<u8>,
    pub relative_level: Option<i8>,
}

impl<'a> BuildSummary<'a> {
    /// Resolve every handle in `character` to catalog names.
    pub fn new(catalog: &'a Catalog, character: &'a Character) -> Self {
        let powers = character
            .power_entries
            .iter()
            .filter_map(|entry| {
                let power = catalog.power(entry.power)?;
                Some(PowerSummary {
                    full_name: &power.full_name,
                    display_name: &power.display_name,
                    level: entry.level,
                    sub_powers: entry
                        .sub_powers
                        .iter()
                        .filter_map(|sub| catalog.power(sub.power))
                        .map(|sub| sub.full_name.as_str())
                        .collect(),
                    slots: entry
                        .slots
                        .iter()
                        .map(|slot| SlotSummary::new(catalog, slot))
                        .collect(),
                })
            })
            .collect();

        Self {
            name: &character.name,
            class_name: &character.class_name,
            class_display_name: catalog
                .class_by_name(&character.class_name)
                .map(|class| class.display_name.as_str()),
            origin: &character.origin,
            alignment: character.alignment,
            version: character.version,
            powersets: &character.powersets,
            powers,
            stats: character.stats,
        }
    }

    /// Serialize the summary as pretty-printed JSON.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> SlotSummary<'a> {
    fn new(catalog: &'a Catalog, slot: &Slot) -> Self {
        Self {
            level: slot.level,
            inherent: slot.inherent,
            enhancement: slot
                .enhancement
                .and_then(|instance| InstanceSummary::new(catalog, &instance)),
            flipped: slot
                .flipped
                .and_then(|instance| InstanceSummary::new(catalog, &instance)),
        }
    }
}

impl<'a> InstanceSummary<'a> {
    fn new(catalog: &'a Catalog, instance: &EnhancementInstance) -> Option<Self> {
        let enhancement = catalog.enhancement(instance.enhancement)?;
        Some(Self {
            uid: &enhancement.uid,
            name: &enhancement.name,
            set: catalog
                .set_of(enhancement)
                .map(|set| set.display_name.as_str()),
            io_level: instance.io_level(),
            relative_level: instance.relative_level(),
        })
    }
}

impl fmt::Display for BuildSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} - {} {} ({}), schema {}",
            self.name,
            self.origin,
            self.class_display_name.unwrap_or(self.class_name),
            self.alignment,
            self.version
        )?;
        for powerset in self.powersets {
            writeln!(f, "  set   {}", powerset)?;
        }
        for power in &self.powers {
            let slotted: Vec<&str> = power
                .slots
                .iter()
                .map(|slot| slot.enhancement.as_ref().map_or("(empty)", |e| e.name))
                .collect();
            writeln!(
                f,
                "  {:>2}  {:<28} {}",
                power.level,
                power.display_name,
                slotted.join(", ")
            )?;
        }
        if !self.stats.is_lossless() {
            writeln!(
                f,
                "  missing from catalog: {} powers, {} sub-powers, {} enhancements",
                self.stats.powers_dropped,
                self.stats.sub_powers_dropped,
                self.stats.enhancements_dropped
            )?;
        }
        Ok(())
    }
}

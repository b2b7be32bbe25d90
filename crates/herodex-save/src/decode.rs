//! Binary payload decoding.

use std::fs;
use std::path::Path;

use herodex_catalog::{Catalog, EnhancementType, RefMode};
use herodex_common::BinaryReader;
use tracing::{debug, info};

use crate::character::{
    Alignment, Character, DecodeStats, EnhancementInstance, InstanceDetail, PowerEntry, Slot,
    SubPowerEntry,
};
use crate::envelope::SaveEnvelope;
use crate::error::{Error, Result};
use crate::version::SchemaVersion;

/// Length of the magic prefix at the start of every payload.
pub const PAYLOAD_MAGIC_LEN: usize = 4;

/// Decode a save string against a catalog.
pub fn decode_save(catalog: &Catalog, save: &str) -> Result<Character> {
    let envelope = SaveEnvelope::parse(save)?;
    decode_payload(catalog, &envelope.payload)
}

/// Decode an already-inflated binary payload against a catalog.
pub fn decode_payload(catalog: &Catalog, payload: &[u8]) -> Result<Character> {
    let mut reader = BinaryReader::new(payload);
    reader.skip(PAYLOAD_MAGIC_LEN)?;

    let version = SchemaVersion::from_float(reader.read_f32()?);
    if !version.is_supported() {
        return Err(Error::VersionTooNew {
            found: version.get(),
            max: SchemaVersion::MAX.get(),
        });
    }

    let ref_mode = RefMode::from_flag(reader.read_bool()?);
    let has_sub_powers = reader.read_bool()?;
    debug!(%version, ?ref_mode, has_sub_powers, "save payload header");

    let class_name = reader.read_text()?;
    let origin = reader.read_text()?;
    let alignment = if version.has_alignment() {
        Alignment::from_raw(reader.read_i32()?)
    } else {
        Alignment::Hero
    };
    let name = reader.read_text()?;
    let powersets = reader.read_text_list()?;
    let last_power_index = reader.read_i32()?.saturating_sub(1);

    let mut decoder = EntryDecoder {
        catalog,
        version,
        ref_mode,
        has_sub_powers,
        stats: DecodeStats::default(),
    };

    let entry_count = reader.read_count()?;
    let mut power_entries = Vec::with_capacity(reader.capacity_for(entry_count));
    for _ in 0..entry_count {
        decoder.stats.powers_read += 1;
        if let Some(entry) = decoder.read_power_entry(&mut reader)? {
            power_entries.push(entry);
        } else {
            decoder.stats.powers_dropped += 1;
        }
    }

    let stats = decoder.stats;
    info!(
        name = %name,
        class = %class_name,
        powers = power_entries.len(),
        dropped = stats.powers_dropped,
        "decoded character"
    );

    Ok(Character {
        version,
        ref_mode,
        has_sub_powers,
        class_name,
        origin,
        alignment,
        name,
        powersets,
        last_power_index,
        power_entries,
        stats,
    })
}

impl Character {
    /// Read a save string from a file and decode it.
    pub fn from_file<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<Self> {
        let save = fs::read_to_string(path)?;
        decode_save(catalog, &save)
    }
}

/// Per-payload settings threaded through every record read.
struct EntryDecoder<'c> {
    catalog: &'c Catalog,
    version: SchemaVersion,
    ref_mode: RefMode,
    has_sub_powers: bool,
    stats: DecodeStats,
}

impl EntryDecoder<'_> {
    /// Read one power entry in full. `None` if its power did not resolve.
    ///
    /// Misses counted while reading a dropped entry are rolled back, since
    /// the whole entry is already reported as one dropped power.
    fn read_power_entry(&mut self, reader: &mut BinaryReader<'_>) -> Result<Option<PowerEntry>> {
        let before = self.stats;
        let reference = self.ref_mode.read_reference(reader)?;
        let power = self.catalog.resolve_power(&reference);

        let level = reader.read_u8()?;
        let stat_include = reader.read_bool()?;
        let proc_include = if self.version.has_proc_include() {
            reader.read_bool()?
        } else {
            false
        };
        let variable_value = reader.read_i32()?;
        let inherent_slots_used = if self.version.has_inherent_slots_used() {
            reader.read_i32()?
        } else {
            0
        };

        let mut sub_powers = Vec::new();
        if self.has_sub_powers {
            let count = reader.read_count_i8()?;
            for _ in 0..count {
                let reference = self.ref_mode.read_reference(reader)?;
                let stat_include = reader.read_bool()?;
                match self.catalog.resolve_power(&reference) {
                    Some(power) => sub_powers.push(SubPowerEntry {
                        power,
                        stat_include,
                    }),
                    None => self.stats.sub_powers_dropped += 1,
                }
            }
        }

        let slot_count = reader.read_count_i8()?;
        let mut slots = Vec::with_capacity(slot_count);
        for _ in 0..slot_count {
            slots.push(self.read_slot(reader)?);
        }

        let Some(power) = power else {
            debug!(%reference, "dropping power entry");
            self.stats.sub_powers_dropped = before.sub_powers_dropped;
            self.stats.enhancements_dropped = before.enhancements_dropped;
            return Ok(None);
        };
        Ok(Some(PowerEntry {
            power,
            level,
            stat_include,
            proc_include,
            variable_value,
            inherent_slots_used,
            sub_powers,
            slots,
        }))
    }

    fn read_slot(&mut self, reader: &mut BinaryReader<'_>) -> Result<Slot> {
        let level = reader.read_u8()?;
        let inherent = if self.version.has_inherent_slot_flag() {
            reader.read_bool()?
        } else {
            false
        };
        let enhancement = self.read_instance(reader)?;
        let flipped = if reader.read_bool()? {
            self.read_instance(reader)?
        } else {
            None
        };

        Ok(Slot {
            level,
            inherent,
            enhancement,
            flipped,
        })
    }

    /// Read an enhancement instance.
    ///
    /// The extra fields depend on the resolved enhancement's type, so an
    /// unresolved reference stops after the reference itself. Empty slots
    /// are stored that way; a save whose unresolved enhancement did carry
    /// extras cannot stay aligned.
    fn read_instance(
        &mut self,
        reader: &mut BinaryReader<'_>,
    ) -> Result<Option<EnhancementInstance>> {
        let reference = self.ref_mode.read_reference(reader)?;
        let Some(id) = self.catalog.resolve_enhancement(&reference) else {
            if !reference.is_empty() {
                self.stats.enhancements_dropped += 1;
            }
            return Ok(None);
        };

        let enhancement_type = self
            .catalog
            .enhancement(id)
            .map(|enhancement| enhancement.enhancement_type)
            .unwrap_or(EnhancementType::None);

        let detail = match enhancement_type {
            EnhancementType::Normal | EnhancementType::Special => InstanceDetail::Graded {
                relative_level: reader.read_i8()?,
                grade: reader.read_i8()?,
            },
            EnhancementType::Io | EnhancementType::SetIo => {
                let io_level = reader.read_u8()?;
                let relative_level = if self.version.has_io_relative_level() {
                    Some(reader.read_i8()?)
                } else {
                    None
                };
                InstanceDetail::Invention {
                    io_level,
                    relative_level,
                }
            }
            EnhancementType::None | EnhancementType::Unknown(_) => InstanceDetail::Plain,
        };

        Ok(Some(EnhancementInstance {
            enhancement: id,
            detail,
        }))
    }
}

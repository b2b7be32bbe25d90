//! Enhancement set records.

use herodex_common::{BinaryReader, BinaryWriter, Result};

/// A power granted by a set bonus: the bonus power's name and its numeric id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BonusGrant {
    pub name: String,
    pub index: i32,
}

/// A set bonus.
///
/// Graduated bonuses unlock by slotted count; the threshold is implied by
/// the bonus's position in [`EnhancementSet::bonuses`]. Special bonuses are
/// tied to individual enhancements and carry no `pv_mode`/`slotted` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetBonus {
    pub special: i32,
    pub alt_string: String,
    pub pv_mode: i32,
    pub slotted: i32,
    pub grants: Vec<BonusGrant>,
}

impl SetBonus {
    fn read_grants(reader: &mut BinaryReader<'_>) -> Result<Vec<BonusGrant>> {
        reader.read_list(|reader| {
            Ok(BonusGrant {
                name: reader.read_text()?,
                index: reader.read_i32()?,
            })
        })
    }

    fn write_grants(&self, writer: &mut BinaryWriter) {
        writer.write_count(self.grants.len());
        for grant in &self.grants {
            writer.write_text(&grant.name).write_i32(grant.index);
        }
    }

    fn read_graduated(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            special: reader.read_i32()?,
            alt_string: reader.read_text()?,
            pv_mode: reader.read_i32()?,
            slotted: reader.read_i32()?,
            grants: Self::read_grants(reader)?,
        })
    }

    fn read_special(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            special: reader.read_i32()?,
            alt_string: reader.read_text()?,
            pv_mode: 0,
            slotted: 0,
            grants: Self::read_grants(reader)?,
        })
    }

    fn write_graduated(&self, writer: &mut BinaryWriter) {
        writer
            .write_i32(self.special)
            .write_text(&self.alt_string)
            .write_i32(self.pv_mode)
            .write_i32(self.slotted);
        self.write_grants(writer);
    }

    fn write_special(&self, writer: &mut BinaryWriter) {
        writer.write_i32(self.special).write_text(&self.alt_string);
        self.write_grants(writer);
    }
}

/// An enhancement set from the enhancement catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnhancementSet {
    pub display_name: String,
    pub short_name: String,
    pub uid: String,
    pub description: String,
    pub set_type: i32,
    pub image: String,
    pub min_level: i32,
    pub max_level: i32,
    /// Static indices of the member enhancements, in set order.
    pub enhancements: Vec<i32>,
    pub bonuses: Vec<SetBonus>,
    pub special_bonuses: Vec<SetBonus>,
}

impl EnhancementSet {
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            display_name: reader.read_text()?,
            short_name: reader.read_text()?,
            uid: reader.read_text()?,
            description: reader.read_text()?,
            set_type: reader.read_i32()?,
            image: reader.read_text()?,
            min_level: reader.read_i32()?,
            max_level: reader.read_i32()?,
            enhancements: reader.read_i32_list()?,
            bonuses: reader.read_list(SetBonus::read_graduated)?,
            special_bonuses: reader.read_list(SetBonus::read_special)?,
        })
    }

    pub(crate) fn write_to(&self, writer: &mut BinaryWriter) {
        writer
            .write_text(&self.display_name)
            .write_text(&self.short_name)
            .write_text(&self.uid)
            .write_text(&self.description)
            .write_i32(self.set_type)
            .write_text(&self.image)
            .write_i32(self.min_level)
            .write_i32(self.max_level)
            .write_i32_list(&self.enhancements)
            .write_count(self.bonuses.len());
        for bonus in &self.bonuses {
            bonus.write_graduated(writer);
        }
        writer.write_count(self.special_bonuses.len());
        for bonus in &self.special_bonuses {
            bonus.write_special(writer);
        }
    }

    /// Bonuses active with `slotted` members of this set in one power.
    ///
    /// The first graduated bonus needs two members, the next three, and so on.
    pub fn active_bonuses(&self, slotted: usize) -> &[SetBonus] {
        let unlocked = slotted.saturating_sub(1).min(self.bonuses.len());
        &self.bonuses[..unlocked]
    }
}

//! Powers catalog decoder: classes, powersets and powers.

use herodex_common::{BinaryReader, BinaryWriter};
use tracing::{debug, info};

use crate::enhancement_db::FxHashMap;
use crate::structs::{Class, Power, Powerset};
use crate::types::{DbDate, PowerId};
use crate::{Error, Result};

/// Metadata stamped at the top of the powers catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PowersDbInfo {
    pub header: String,
    pub version: String,
    pub date: DbDate,
    pub issue: i32,
    pub page_vol: i32,
    pub page_vol_text: String,
    pub class_header: String,
    pub powerset_header: String,
    pub power_header: String,
    pub summon_header: String,
}

impl Default for PowersDbInfo {
    fn default() -> Self {
        Self {
            header: String::new(),
            version: String::new(),
            date: DbDate::Ymd { year: 1, month: 1, day: 1 },
            issue: 0,
            page_vol: 0,
            page_vol_text: String::new(),
            class_header: String::new(),
            powerset_header: String::new(),
            power_header: String::new(),
            summon_header: String::new(),
        }
    }
}

impl PowersDbInfo {
    fn read_date(reader: &mut BinaryReader<'_>) -> herodex_common::Result<DbDate> {
        let year = reader.read_i32()?;
        if year > 0 {
            Ok(DbDate::Ymd {
                year,
                month: reader.read_i32()?,
                day: reader.read_i32()?,
            })
        } else {
            Ok(DbDate::Timestamp(reader.read_i64()?))
        }
    }

    fn write_date(&self, writer: &mut BinaryWriter) {
        match self.date {
            DbDate::Ymd { year, month, day } => {
                writer.write_i32(year).write_i32(month).write_i32(day);
            }
            DbDate::Timestamp(ticks) => {
                writer.write_i32(0).write_i64(ticks);
            }
        }
    }
}

/// Decoded powers catalog with its lookup indices.
#[derive(Debug, Clone)]
pub struct PowersDb {
    info: PowersDbInfo,
    classes: Vec<Class>,
    powersets: Vec<Powerset>,
    powers: Vec<Power>,

    by_uid: FxHashMap<String, PowerId>,
    by_static_index: FxHashMap<i32, PowerId>,
    powersets_by_name: FxHashMap<String, usize>,
    classes_by_name: FxHashMap<String, usize>,
}

impl PowersDb {
    /// Build a catalog from already-decoded entities.
    pub fn new(
        info: PowersDbInfo,
        classes: Vec<Class>,
        powersets: Vec<Powerset>,
        powers: Vec<Power>,
    ) -> Self {
        let mut by_uid = FxHashMap::default();
        let mut by_static_index = FxHashMap::default();
        for (index, power) in powers.iter().enumerate() {
            let id = PowerId(index);
            if by_uid.insert(power.full_name.clone(), id).is_some() {
                debug!(uid = %power.full_name, "duplicate power uid, later entry wins");
            }
            by_static_index.insert(power.static_index, id);
        }

        let powersets_by_name = powersets
            .iter()
            .enumerate()
            .map(|(index, set)| (set.full_name.to_ascii_lowercase(), index))
            .collect();
        let classes_by_name = classes
            .iter()
            .enumerate()
            .map(|(index, class)| (class.name.to_ascii_lowercase(), index))
            .collect();

        Self {
            info,
            classes,
            powersets,
            powers,
            by_uid,
            by_static_index,
            powersets_by_name,
            classes_by_name,
        }
    }

    /// Decode a powers catalog from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        let header = reader.read_text()?;
        let version = reader.read_text()?;
        let date = PowersDbInfo::read_date(&mut reader)?;
        let issue = reader.read_i32()?;
        let page_vol = reader.read_i32()?;
        let page_vol_text = reader.read_text()?;
        debug!(header = %header, version = %version, date = %date, issue, "powers catalog header");

        let class_header = reader.read_text()?;
        let class_count = reader.read_count()?;
        let mut classes = Vec::with_capacity(reader.capacity_for(class_count));
        for index in 0..class_count {
            classes.push(Class::read(&mut reader).map_err(Error::record("class", index))?);
        }

        let powerset_header = reader.read_text()?;
        let powerset_count = reader.read_count()?;
        let mut powersets = Vec::with_capacity(reader.capacity_for(powerset_count));
        for index in 0..powerset_count {
            powersets.push(Powerset::read(&mut reader).map_err(Error::record("powerset", index))?);
        }

        let power_header = reader.read_text()?;
        let power_count = reader.read_count()?;
        let mut powers = Vec::with_capacity(reader.capacity_for(power_count));
        for index in 0..power_count {
            powers.push(Power::read(&mut reader).map_err(Error::record("power", index))?);
        }

        // Summon records have no known layout; only the header is stored.
        let summon_header = reader.read_text()?;

        let info = PowersDbInfo {
            header,
            version,
            date,
            issue,
            page_vol,
            page_vol_text,
            class_header,
            powerset_header,
            power_header,
            summon_header,
        };
        let db = Self::new(info, classes, powersets, powers);
        info!(
            classes = db.classes.len(),
            powersets = db.powersets.len(),
            powers = db.powers.len(),
            "decoded powers catalog"
        );
        Ok(db)
    }

    /// Encode the catalog back into its binary layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let info = &self.info;
        let mut writer = BinaryWriter::new();
        writer.write_text(&info.header).write_text(&info.version);
        info.write_date(&mut writer);
        writer
            .write_i32(info.issue)
            .write_i32(info.page_vol)
            .write_text(&info.page_vol_text)
            .write_text(&info.class_header)
            .write_count(self.classes.len());
        for class in &self.classes {
            class.write_to(&mut writer);
        }
        writer
            .write_text(&info.powerset_header)
            .write_count(self.powersets.len());
        for powerset in &self.powersets {
            powerset.write_to(&mut writer);
        }
        writer
            .write_text(&info.power_header)
            .write_count(self.powers.len());
        for power in &self.powers {
            power.write_to(&mut writer);
        }
        writer.write_text(&info.summon_header);
        writer.into_bytes()
    }

    pub fn info(&self) -> &PowersDbInfo {
        &self.info
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn powersets(&self) -> &[Powerset] {
        &self.powersets
    }

    pub fn powers(&self) -> &[Power] {
        &self.powers
    }

    /// Get a power by handle.
    pub fn get(&self, id: PowerId) -> Option<&Power> {
        self.powers.get(id.0)
    }

    /// Look up a power handle by full name.
    pub fn id_by_uid(&self, uid: &str) -> Option<PowerId> {
        self.by_uid.get(uid).copied()
    }

    /// Look up a power handle by static index.
    pub fn id_by_static_index(&self, static_index: i32) -> Option<PowerId> {
        self.by_static_index.get(&static_index).copied()
    }

    /// Find a powerset by full name (case-insensitive).
    pub fn powerset_by_full_name(&self, full_name: &str) -> Option<&Powerset> {
        self.powersets_by_name
            .get(&full_name.to_ascii_lowercase())
            .and_then(|&index| self.powersets.get(index))
    }

    /// Find a class by internal name (case-insensitive).
    pub fn class_by_name(&self, name: &str) -> Option<&Class> {
        self.classes_by_name
            .get(&name.to_ascii_lowercase())
            .and_then(|&index| self.classes.get(index))
    }

    /// Iterate over the uid index.
    pub fn uid_index(&self) -> impl Iterator<Item = (&str, PowerId)> {
        self.by_uid.iter().map(|(uid, id)| (uid.as_str(), *id))
    }

    /// Iterate over the static-index index.
    pub fn static_index(&self) -> impl Iterator<Item = (i32, PowerId)> + '_ {
        self.by_static_index.iter().map(|(index, id)| (*index, *id))
    }
}

//! Catalog enumerations and identifiers.

use std::fmt;

/// Enhancement type, keyed off the raw type id in the catalog.
///
/// The type decides which extra fields follow an enhancement reference in
/// a save payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EnhancementType {
    /// No type.
    None,
    /// Training/dual/single origin enhancement.
    Normal,
    /// Invention origin enhancement.
    Io,
    /// Hamidon/special origin enhancement.
    Special,
    /// Invention enhancement belonging to a set.
    SetIo,
    /// A type id this decoder does not know.
    Unknown(i32),
}

impl EnhancementType {
    pub const NONE_RAW: i32 = 0;
    pub const NORMAL_RAW: i32 = 1;
    pub const IO_RAW: i32 = 2;
    pub const SPECIAL_RAW: i32 = 3;
    pub const SET_IO_RAW: i32 = 4;

    pub fn from_raw(raw: i32) -> Self {
        match raw {
            Self::NONE_RAW => Self::None,
            Self::NORMAL_RAW => Self::Normal,
            Self::IO_RAW => Self::Io,
            Self::SPECIAL_RAW => Self::Special,
            Self::SET_IO_RAW => Self::SetIo,
            other => Self::Unknown(other),
        }
    }

    pub fn raw(&self) -> i32 {
        match *self {
            Self::None => Self::NONE_RAW,
            Self::Normal => Self::NORMAL_RAW,
            Self::Io => Self::IO_RAW,
            Self::Special => Self::SPECIAL_RAW,
            Self::SetIo => Self::SET_IO_RAW,
            Self::Unknown(other) => other,
        }
    }

    /// Whether slotted instances carry relative level and grade.
    pub fn is_graded(&self) -> bool {
        matches!(self, Self::Normal | Self::Special)
    }

    /// Whether slotted instances carry an invention level.
    pub fn is_invention(&self) -> bool {
        matches!(self, Self::Io | Self::SetIo)
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::None => "None",
            Self::Normal => "Normal",
            Self::Io => "IO",
            Self::Special => "Special",
            Self::SetIo => "Set IO",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for EnhancementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Unknown(v) => write!(f, "Unknown ({})", v),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// Mutual-exclusion group of an enhancement.
///
/// Raw values below [`MutexGroup::NONE_RAW`] are clamped to `None` when the
/// catalog is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MutexGroup {
    None,
    Stealth,
    A,
    B,
    C,
    D,
    E,
    F,
    Unknown(i32),
}

impl MutexGroup {
    pub const NONE_RAW: i32 = 0;

    /// Build from a raw id, clamping anything below the sentinel to `None`.
    pub fn from_raw(raw: i32) -> Self {
        match raw.max(Self::NONE_RAW) {
            0 => Self::None,
            1 => Self::Stealth,
            2 => Self::A,
            3 => Self::B,
            4 => Self::C,
            5 => Self::D,
            6 => Self::E,
            7 => Self::F,
            other => Self::Unknown(other),
        }
    }

    pub fn raw(&self) -> i32 {
        match *self {
            Self::None => 0,
            Self::Stealth => 1,
            Self::A => 2,
            Self::B => 3,
            Self::C => 4,
            Self::D => 5,
            Self::E => 6,
            Self::F => 7,
            Self::Unknown(other) => other,
        }
    }
}

/// Build date stamped into the powers catalog.
///
/// Which form is present depends on the sign of the first stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DbDate {
    /// Calendar date stored as three i32 fields.
    Ymd { year: i32, month: i32, day: i32 },
    /// Opaque 64-bit timestamp stored after a non-positive year.
    Timestamp(i64),
}

impl fmt::Display for DbDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Ymd { year, month, day } => write!(f, "{:04}-{:02}-{:02}", year, month, day),
            Self::Timestamp(ticks) => write!(f, "@{}", ticks),
        }
    }
}

/// Stable handle to an enhancement: its position in the catalog's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnhancementId(pub usize);

/// Stable handle to a power: its position in the catalog's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PowerId(pub usize);

/// Stable handle to an enhancement set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetId(pub usize);

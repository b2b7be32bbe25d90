//! Save payload schema versions.

use std::fmt;

/// Schema version of a save payload, stored as `round(float * 10)`.
///
/// Field presence varies with the version; the predicates below are the
/// only place the gates are spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SchemaVersion(i32);

impl SchemaVersion {
    /// Newest version this decoder understands.
    pub const MAX: Self = Self(32);

    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Derive the version from the float stored in the payload.
    pub fn from_float(value: f32) -> Self {
        Self((f64::from(value) * 10.0).round() as i32)
    }

    /// The float written for this version.
    pub fn to_float(self) -> f32 {
        self.0 as f32 / 10.0
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub fn is_supported(self) -> bool {
        self <= Self::MAX
    }

    /// Alignment is stored; older saves are always heroes.
    pub fn has_alignment(self) -> bool {
        self.0 > 10
    }

    /// Power entries carry a proc-include flag.
    pub fn has_proc_include(self) -> bool {
        matches!(self.0, 31 | 32)
    }

    /// Power entries carry the inherent-slots-used count.
    pub fn has_inherent_slots_used(self) -> bool {
        self.0 == 32
    }

    /// Slots carry an inherent flag.
    pub fn has_inherent_slot_flag(self) -> bool {
        self.0 == 32
    }

    /// Invention instances carry a relative level after the IO level.
    pub fn has_io_relative_level(self) -> bool {
        self.0 > 10
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, (self.0 % 10).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_float_rounds() {
        assert_eq!(SchemaVersion::from_float(3.2).get(), 32);
        assert_eq!(SchemaVersion::from_float(3.1).get(), 31);
        assert_eq!(SchemaVersion::from_float(1.0).get(), 10);
        assert_eq!(SchemaVersion::from_float(3.249).get(), 32);
        assert_eq!(SchemaVersion::from_float(3.3).get(), 33);
        assert_eq!(SchemaVersion::new(32).to_float(), 3.2);
    }

    #[test]
    fn test_gates() {
        let v10 = SchemaVersion::new(10);
        let v11 = SchemaVersion::new(11);
        let v31 = SchemaVersion::new(31);
        let v32 = SchemaVersion::MAX;

        assert!(!v10.has_alignment());
        assert!(v11.has_alignment());
        assert!(!v10.has_io_relative_level());
        assert!(v11.has_io_relative_level());

        assert!(!v11.has_proc_include());
        assert!(v31.has_proc_include());
        assert!(!v31.has_inherent_slots_used());
        assert!(!v31.has_inherent_slot_flag());
        assert!(v32.has_proc_include());
        assert!(v32.has_inherent_slots_used());
        assert!(v32.has_inherent_slot_flag());

        assert!(v32.is_supported());
        assert!(!SchemaVersion::new(33).is_supported());
    }

    #[test]
    fn test_display() {
        assert_eq!(SchemaVersion::new(32).to_string(), "3.2");
        assert_eq!(SchemaVersion::new(10).to_string(), "1.0");
    }
}

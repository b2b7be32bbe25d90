//! End-to-end decoding against a hand-built catalog.

use herodex::catalog::{
    Catalog, Class, DbDate, Enhancement, EnhancementDb, EnhancementSet, EnhancementType, Power,
    PowersDb, PowersDbInfo, Powerset, RefMode, Reference,
};
use herodex::common::BinaryWriter;
use herodex::save::{
    decode_payload, decode_save, Alignment, Error, InstanceDetail, SaveEnvelope, Stage,
};
use herodex::BuildSummary;

const POWER_UID: &str = "Blaster_Ranged.Fire_Blast.Flares";
const POWER_SID: i32 = 1200;
const SUB_POWER_UID: &str = "Blaster_Ranged.Fire_Blast.Flares_Proc";
const SUB_POWER_SID: i32 = 1201;
const IO_UID: &str = "Crafted_Thunderstrike_A";
const IO_SID: i32 = 310;
const NORMAL_UID: &str = "Magic_Damage";
const NORMAL_SID: i32 = 311;

fn catalog_bytes() -> (Vec<u8>, Vec<u8>) {
    let enhancements = vec![
        Enhancement {
            static_index: IO_SID,
            name: "Thunderstrike: Accuracy/Damage".into(),
            uid: IO_UID.into(),
            enhancement_type: EnhancementType::SetIo,
            set_uid: "Thunderstrike".into(),
            ..Default::default()
        },
        Enhancement {
            static_index: NORMAL_SID,
            name: "Damage".into(),
            uid: NORMAL_UID.into(),
            enhancement_type: EnhancementType::Normal,
            ..Default::default()
        },
    ];
    let sets = vec![EnhancementSet {
        display_name: "Thunderstrike".into(),
        uid: "Thunderstrike".into(),
        enhancements: vec![IO_SID],
        ..Default::default()
    }];
    let enh_db = EnhancementDb::new("Mids Reborn Enhancement Database", enhancements, sets);

    let info = PowersDbInfo {
        header: "Mids Reborn Powers Database".into(),
        version: "2023.4.1".into(),
        date: DbDate::Ymd {
            year: 2023,
            month: 4,
            day: 1,
        },
        ..Default::default()
    };
    let classes = vec![Class {
        name: "Class_Blaster".into(),
        display_name: "Blaster".into(),
        ..Default::default()
    }];
    let powersets = vec![Powerset {
        display_name: "Fire Blast".into(),
        full_name: "Blaster_Ranged.Fire_Blast".into(),
        ..Default::default()
    }];
    let powers = vec![
        Power {
            static_index: POWER_SID,
            full_name: POWER_UID.into(),
            group_name: "Blaster_Ranged".into(),
            set_name: "Fire_Blast".into(),
            display_name: "Flares".into(),
            ..Default::default()
        },
        Power {
            static_index: SUB_POWER_SID,
            full_name: SUB_POWER_UID.into(),
            group_name: "Blaster_Ranged".into(),
            set_name: "Fire_Blast".into(),
            display_name: "Flares Proc".into(),
            ..Default::default()
        },
    ];
    let powers_db = PowersDb::new(info, classes, powersets, powers);

    (enh_db.to_bytes(), powers_db.to_bytes())
}

fn catalog() -> Catalog {
    let (enh, powers) = catalog_bytes();
    Catalog::parse(&enh, &powers).unwrap()
}

/// Builds save payloads field by field in a fixed reference mode.
struct PayloadBuilder {
    writer: BinaryWriter,
    mode: RefMode,
}

impl PayloadBuilder {
    fn new(version: f32, mode: RefMode, has_sub_powers: bool, alignment: i32) -> Self {
        let mut writer = BinaryWriter::new();
        writer
            .write_bytes(b"MxDz")
            .write_f32(version)
            .write_bool(mode.is_qualified())
            .write_bool(has_sub_powers)
            .write_text("Class_Blaster")
            .write_text("Science");
        if version > 1.05 {
            writer.write_i32(alignment);
        }
        writer
            .write_text("Flare")
            .write_text_list(&["Blaster_Ranged.Fire_Blast", "Pool.Speed"])
            .write_i32(2);
        Self { writer, mode }
    }

    fn reference(&mut self, uid: &str, static_index: i32) -> &mut Self {
        let reference = match self.mode {
            RefMode::QualifiedName => Reference::Uid(uid.to_string()),
            RefMode::StaticIndex => Reference::StaticIndex(static_index),
        };
        self.mode.write_reference(&mut self.writer, &reference);
        self
    }

    fn bytes(&self) -> Vec<u8> {
        self.writer.as_bytes().to_vec()
    }

    fn save(&self) -> String {
        SaveEnvelope::encode("MxDz", "HEX", self.writer.as_bytes()).unwrap()
    }
}

/// One v3.2 power entry with a set IO slot flipped with a normal enhancement.
fn write_full_entry(builder: &mut PayloadBuilder, uid: &str, sid: i32) {
    builder.reference(uid, sid);
    builder
        .writer
        .write_u8(0) // level
        .write_bool(true) // stat include
        .write_bool(false) // proc include
        .write_i32(0) // variable value
        .write_i32(1) // inherent slots used
        .write_count_i8(1); // sub-powers
    builder.reference(SUB_POWER_UID, SUB_POWER_SID);
    builder
        .writer
        .write_bool(true)
        .write_count_i8(1) // slots
        .write_u8(0)
        .write_bool(true); // inherent
    builder.reference(IO_UID, IO_SID);
    builder.writer.write_u8(49).write_i8(0).write_bool(true);
    builder.reference(NORMAL_UID, NORMAL_SID);
    builder.writer.write_i8(1).write_i8(2);
}

#[test]
fn test_both_reference_modes_resolve_identically() {
    let catalog = catalog();

    let decode = |mode| {
        let mut builder = PayloadBuilder::new(3.2, mode, true, 0);
        builder.writer.write_count(1);
        write_full_entry(&mut builder, POWER_UID, POWER_SID);
        decode_save(&catalog, &builder.save()).unwrap()
    };
    let qualified = decode(RefMode::QualifiedName);
    let indexed = decode(RefMode::StaticIndex);

    assert_eq!(qualified.ref_mode, RefMode::QualifiedName);
    assert_eq!(indexed.ref_mode, RefMode::StaticIndex);
    assert_eq!(qualified.power_entries, indexed.power_entries);

    let entry = &qualified.power_entries[0];
    assert_eq!(catalog.power(entry.power).unwrap().full_name, POWER_UID);
    assert_eq!(entry.inherent_slots_used, 1);
    assert_eq!(
        catalog.power(entry.sub_powers[0].power).unwrap().full_name,
        SUB_POWER_UID
    );

    let slot = entry.slots[0];
    assert!(slot.inherent);
    let primary = slot.enhancement.unwrap();
    assert_eq!(catalog.enhancement(primary.enhancement).unwrap().uid, IO_UID);
    assert_eq!(
        primary.detail,
        InstanceDetail::Invention {
            io_level: 49,
            relative_level: Some(0)
        }
    );
    let flipped = slot.flipped.unwrap();
    assert_eq!(catalog.enhancement(flipped.enhancement).unwrap().uid, NORMAL_UID);
    assert_eq!(
        flipped.detail,
        InstanceDetail::Graded {
            relative_level: 1,
            grade: 2
        }
    );
}

#[test]
fn test_unresolved_power_is_dropped_and_cursor_stays_aligned() {
    let catalog = catalog();
    for mode in [RefMode::QualifiedName, RefMode::StaticIndex] {
        let mut builder = PayloadBuilder::new(3.2, mode, true, 0);
        builder.writer.write_count(3);
        write_full_entry(&mut builder, POWER_UID, POWER_SID);
        write_full_entry(&mut builder, "Pool.Speed.Whirlwind", 9999);
        write_full_entry(&mut builder, SUB_POWER_UID, SUB_POWER_SID);

        let character = decode_payload(&catalog, &builder.bytes()).unwrap();
        let names: Vec<_> = character
            .powers()
            .map(|id| catalog.power(id).unwrap().full_name.as_str())
            .collect();
        assert_eq!(names, vec![POWER_UID, SUB_POWER_UID]);
        assert_eq!(character.stats.powers_read, 3);
        assert_eq!(character.stats.powers_dropped, 1);
        assert_eq!(character.slot_count(), 2);
        assert_eq!(character.enhancement_instances().count(), 4);
    }
}

#[test]
fn test_unresolved_sub_power_dropped_individually() {
    let catalog = catalog();
    let mut builder = PayloadBuilder::new(3.0, RefMode::StaticIndex, true, 0);
    builder.writer.write_count(1);
    builder.reference(POWER_UID, POWER_SID);
    builder
        .writer
        .write_u8(4)
        .write_bool(false)
        .write_i32(0) // variable value only before 3.1
        .write_count_i8(2);
    builder.reference("", 4242);
    builder.writer.write_bool(true);
    builder.reference(SUB_POWER_UID, SUB_POWER_SID);
    builder.writer.write_bool(false).write_count_i8(0);

    let character = decode_payload(&catalog, &builder.bytes()).unwrap();
    let entry = &character.power_entries[0];
    assert_eq!(entry.level, 4);
    assert!(!entry.proc_include);
    assert_eq!(entry.sub_powers.len(), 1);
    assert!(!entry.sub_powers[0].stat_include);
    assert_eq!(character.stats.sub_powers_dropped, 1);
    assert!(entry.slots.is_empty());
}

#[test]
fn test_flipped_flag_gates_second_instance() {
    let catalog = catalog();
    let mut builder = PayloadBuilder::new(2.0, RefMode::StaticIndex, false, 0);
    builder.writer.write_count(1);
    builder.reference(POWER_UID, POWER_SID);
    builder
        .writer
        .write_u8(0)
        .write_bool(true)
        .write_i32(0)
        .write_count_i8(2);
    // No flip: the next byte is the second slot's level.
    builder.writer.write_u8(0);
    builder.reference(NORMAL_UID, NORMAL_SID);
    builder.writer.write_i8(0).write_i8(3).write_bool(false);
    // Flip present but unresolved: the primary half stays intact.
    builder.writer.write_u8(7);
    builder.reference(IO_UID, IO_SID);
    builder.writer.write_u8(30).write_i8(-1).write_bool(true);
    builder.reference("", 9999);

    let character = decode_payload(&catalog, &builder.bytes()).unwrap();
    let slots = &character.power_entries[0].slots;
    assert_eq!(slots.len(), 2);
    assert!(slots[0].flipped.is_none());
    assert_eq!(slots[1].level, 7);
    assert_eq!(slots[1].enhancement.and_then(|i| i.io_level()), Some(30));
    assert_eq!(slots[1].enhancement.and_then(|i| i.relative_level()), Some(-1));
    assert!(slots[1].flipped.is_none());
    assert_eq!(character.stats.enhancements_dropped, 1);
}

#[test]
fn test_misses_inside_dropped_entry_are_not_counted() {
    let catalog = catalog();
    let mut builder = PayloadBuilder::new(3.2, RefMode::StaticIndex, true, 0);
    builder.writer.write_count(2);
    builder.reference("", 9999);
    builder
        .writer
        .write_u8(0)
        .write_bool(false)
        .write_bool(false)
        .write_i32(0)
        .write_i32(0)
        .write_count_i8(1);
    builder.reference("", 4242);
    builder
        .writer
        .write_bool(true)
        .write_count_i8(1)
        .write_u8(0)
        .write_bool(false);
    builder.reference("", 8888);
    builder.writer.write_bool(false);
    write_full_entry(&mut builder, POWER_UID, POWER_SID);

    let character = decode_payload(&catalog, &builder.bytes()).unwrap();
    assert_eq!(character.power_entries.len(), 1);
    assert_eq!(character.stats.powers_dropped, 1);
    assert_eq!(character.stats.sub_powers_dropped, 0);
    assert_eq!(character.stats.enhancements_dropped, 0);
    assert_eq!(character.enhancement_instances().count(), 2);
}

#[test]
fn test_early_version_invention_has_no_relative_level() {
    let catalog = catalog();
    let mut builder = PayloadBuilder::new(1.0, RefMode::StaticIndex, false, 0);
    builder.writer.write_count(2);
    builder.reference(POWER_UID, POWER_SID);
    builder
        .writer
        .write_u8(1)
        .write_bool(true)
        .write_i32(0)
        .write_count_i8(2)
        .write_u8(1);
    builder.reference(IO_UID, IO_SID);
    builder.writer.write_u8(25).write_bool(true);
    builder.reference(NORMAL_UID, NORMAL_SID);
    builder.writer.write_i8(-2).write_i8(1).write_u8(9);
    builder.reference(IO_UID, IO_SID);
    builder.writer.write_u8(40).write_bool(false);
    builder.reference(SUB_POWER_UID, SUB_POWER_SID);
    builder
        .writer
        .write_u8(2)
        .write_bool(false)
        .write_i32(7)
        .write_count_i8(0);

    let character = decode_payload(&catalog, &builder.bytes()).unwrap();
    assert_eq!(character.version.get(), 10);
    assert_eq!(character.power_entries.len(), 2);

    let slots = &character.power_entries[0].slots;
    assert_eq!(
        slots[0].enhancement.map(|i| i.detail),
        Some(InstanceDetail::Invention {
            io_level: 25,
            relative_level: None
        })
    );
    assert_eq!(
        slots[0].flipped.map(|i| i.detail),
        Some(InstanceDetail::Graded {
            relative_level: -2,
            grade: 1
        })
    );
    assert_eq!(slots[1].level, 9);
    assert_eq!(slots[1].enhancement.and_then(|i| i.io_level()), Some(40));
    assert_eq!(slots[1].enhancement.and_then(|i| i.relative_level()), None);

    let last = &character.power_entries[1];
    assert_eq!(catalog.power(last.power).unwrap().full_name, SUB_POWER_UID);
    assert_eq!(last.level, 2);
    assert_eq!(last.variable_value, 7);
    assert!(character.stats.is_lossless());
}

#[test]
fn test_count_field_two_yields_three_elements() {
    let catalog = catalog();
    let mut writer = BinaryWriter::new();
    writer
        .write_bytes(b"MxDz")
        .write_f32(1.0)
        .write_bool(false)
        .write_bool(false)
        .write_text("Class_Blaster")
        .write_text("Magic")
        .write_text("Trio")
        .write_i32(2)
        .write_text("A.One")
        .write_text("B.Two")
        .write_text("C.Three")
        .write_i32(0)
        .write_i32(-1);

    let character = decode_payload(&catalog, writer.as_bytes()).unwrap();
    assert_eq!(character.powersets, vec!["A.One", "B.Two", "C.Three"]);
    assert_eq!(character.alignment, Alignment::Hero);
    assert_eq!(character.last_power_index, -1);
}

#[test]
fn test_format_errors_precede_binary_decode() {
    let catalog = catalog();
    let good = PayloadBuilder::new(3.2, RefMode::StaticIndex, false, 0).save();

    let missing_field = good.splitn(2, ';').nth(1).unwrap();
    let err = decode_save(&catalog, missing_field).unwrap_err();
    assert!(matches!(err, Error::Format { stage: Stage::Split, .. }));

    let odd = format!("{}0", good);
    let err = decode_save(&catalog, &odd).unwrap_err();
    assert!(matches!(err, Error::Format { stage: Stage::HexDecode, .. }));
    assert!(err.is_format());
}

#[test]
fn test_version_too_new_is_distinct_error() {
    let catalog = catalog();
    let save = PayloadBuilder::new(3.3, RefMode::StaticIndex, false, 0).save();
    let err = decode_save(&catalog, &save).unwrap_err();
    assert!(matches!(err, Error::VersionTooNew { found: 33, max: 32 }));
    assert!(!err.is_format());
}

#[test]
fn test_alignment_is_read_signed() {
    // Older producers wrote this field unsigned; a negative value tells the
    // two readings apart.
    let catalog = catalog();
    let mut builder = PayloadBuilder::new(3.2, RefMode::StaticIndex, false, -1);
    builder.writer.write_count(0);
    let character = decode_payload(&catalog, &builder.bytes()).unwrap();
    assert_eq!(character.alignment, Alignment::Unknown(-1));

    let mut builder = PayloadBuilder::new(3.2, RefMode::StaticIndex, false, 3);
    builder.writer.write_count(0);
    let character = decode_payload(&catalog, &builder.bytes()).unwrap();
    assert_eq!(character.alignment, Alignment::Villain);
}

#[test]
fn test_catalog_decode_is_deterministic() {
    let (enh, powers) = catalog_bytes();
    let first = Catalog::parse(&enh, &powers).unwrap();
    let second = Catalog::parse(&enh, &powers).unwrap();

    assert_eq!(
        first.enhancement_db().enhancements(),
        second.enhancement_db().enhancements()
    );
    assert_eq!(first.powers_db().powers(), second.powers_db().powers());
    for uid in [IO_UID, NORMAL_UID] {
        assert_eq!(
            first.enhancement_db().id_by_uid(uid),
            second.enhancement_db().id_by_uid(uid)
        );
    }
    assert_eq!(first.enhancement_db().to_bytes(), enh);
    assert_eq!(first.powers_db().to_bytes(), powers);
}

#[test]
fn test_summary_resolves_names() {
    let catalog = catalog();
    let mut builder = PayloadBuilder::new(3.2, RefMode::QualifiedName, true, 0);
    builder.writer.write_count(1);
    write_full_entry(&mut builder, POWER_UID, POWER_SID);
    let character = decode_save(&catalog, &builder.save()).unwrap();

    let summary = BuildSummary::new(&catalog, &character);
    assert_eq!(summary.class_display_name, Some("Blaster"));
    assert_eq!(summary.powers[0].display_name, "Flares");
    assert_eq!(summary.powers[0].sub_powers, vec![SUB_POWER_UID]);
    let slot = &summary.powers[0].slots[0];
    assert_eq!(
        slot.enhancement.as_ref().and_then(|e| e.set),
        Some("Thunderstrike")
    );

    let text = summary.to_string();
    assert!(text.contains("Flare - Science Blaster (Hero), schema 3.2"));
    assert!(text.contains("Thunderstrike: Accuracy/Damage"));
}

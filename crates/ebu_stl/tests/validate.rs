use pretty_assertions::assert_eq;

use chrono::NaiveDate;
use ebu_stl::error::{Error, FieldRef, Rule, WarningKind};
use ebu_stl::gsi::GsiField;
use ebu_stl::tti::TtiField;
use ebu_stl::types::{
    CharacterCodeTable, CodePage, CumulativeStatus, DiskFormatCode, DisplayStandardCode,
    LanguageCode, TimeCodeStatus,
};
use ebu_stl::{GsiBlock, StlFile, Timecode, TtiBlock};

// A file that passes validation without a single warning; each test breaks
// exactly the rule it is about.
fn clean_gsi() -> GsiBlock {
    GsiBlock {
        code_page: Some(CodePage::Multilingual),
        disk_format: Some(DiskFormatCode::Stl25),
        display_standard: Some(DisplayStandardCode::OpenSubtitling),
        character_table: Some(CharacterCodeTable::Latin),
        language: Some(LanguageCode(0x09)),
        original_program_title: "Night Train".into(),
        original_episode_title: "Pilot".into(),
        translated_program_title: "Le Train de Nuit".into(),
        translated_episode_title: "Pilote".into(),
        translator_name: "J. Martin".into(),
        translator_contact: "j.martin@example.org".into(),
        subtitle_list_ref: "REF-001".into(),
        creation_date: NaiveDate::from_ymd_opt(2017, 3, 2),
        revision_date: NaiveDate::from_ymd_opt(2017, 4, 1),
        revision_number: Some(1),
        tti_blocks: Some(2),
        subtitles: Some(2),
        subtitle_groups: Some(1),
        max_row_chars: Some(40),
        max_rows: Some(23),
        timecode_status: Some(TimeCodeStatus::IntendedForUse),
        start_of_program: Timecode::new(10, 0, 0, 0),
        first_in_cue: Timecode::new(10, 0, 5, 0),
        disks: Some(1),
        disk_sequence: Some(1),
        country_of_origin: "FRA".into(),
        publisher: "Example TV".into(),
        editor_name: "A. Dupont".into(),
        editor_contact: "a.dupont@example.org".into(),
        user_defined: Vec::new(),
    }
}

fn subtitle(sn: u16, minute: u8) -> TtiBlock {
    let mut tti = TtiBlock::new(
        sn,
        Timecode::new(10, minute, 5, 0),
        Timecode::new(10, minute, 8, 0),
    );
    tti.vertical_position = 20;
    tti.set_text(&format!("Subtitle {sn}"), CharacterCodeTable::Latin)
        .unwrap();
    tti
}

fn clean_file() -> StlFile {
    let mut file = StlFile::new(clean_gsi());
    file.tti.push(subtitle(0, 0));
    file.tti.push(subtitle(1, 1));
    file
}

fn rule_warnings(warnings: &[ebu_stl::Warning]) -> Vec<(FieldRef, Rule)> {
    warnings
        .iter()
        .filter_map(|w| match &w.kind {
            WarningKind::Rule(e) => Some((w.context, e.rule)),
            WarningKind::Decode(_) => None,
        })
        .collect()
}

#[test]
fn a_clean_file_validates_without_warnings() {
    let file = clean_file();
    let mut warnings = Vec::new();
    file.validate(&mut warnings).unwrap();
    assert_eq!(warnings, vec![]);
}

#[test]
fn consecutive_numbering_reconciles_with_declared_totals() {
    // TNS=2, TNG=1 over [SN 0, SN 1] in one group: no mismatch warnings
    let file = clean_file();
    let mut warnings = Vec::new();
    file.validate(&mut warnings).unwrap();
    assert!(rule_warnings(&warnings).is_empty());
}

#[test]
fn a_subtitle_number_jump_warns_once() {
    let mut file = clean_file();
    file.tti[1].number = 2; // 0 then 2

    let mut warnings = Vec::new();
    file.validate(&mut warnings).unwrap();
    assert_eq!(
        rule_warnings(&warnings),
        vec![(
            FieldRef::Tti {
                block: 1,
                field: TtiField::Sn
            },
            Rule::SnNotConsecutive
        )]
    );
}

#[test]
fn first_in_cue_must_match_the_first_subtitle() {
    let mut file = clean_file();
    file.gsi.first_in_cue = Timecode::new(0, 0, 0, 0);
    file.tti[0].time_in = Timecode::new(1, 0, 0, 0);
    file.tti[0].time_out = Timecode::new(1, 0, 3, 0);

    let mut warnings = Vec::new();
    let err = file.validate(&mut warnings).unwrap_err();
    assert!(matches!(err, Error::FirstCueMismatch { .. }));
}

#[test]
fn a_file_without_subtitles_is_rejected() {
    let file = StlFile::new(clean_gsi());
    let mut warnings = Vec::new();
    assert!(matches!(
        file.validate(&mut warnings),
        Err(Error::NoTtiBlocks)
    ));
}

#[test]
fn an_unsupported_disk_format_is_fatal() {
    let mut file = clean_file();
    file.gsi.disk_format = Some(DiskFormatCode::from_code("STL24.01"));

    let mut warnings = Vec::new();
    let err = file.validate(&mut warnings).unwrap_err();
    assert!(matches!(
        err,
        Error::GsiInvalid {
            field: GsiField::Dfc,
            ..
        }
    ));
}

#[test]
fn reversed_cue_timecodes_are_fatal() {
    let mut file = clean_file();
    file.tti[1].time_in = Timecode::new(10, 1, 8, 0);
    file.tti[1].time_out = Timecode::new(10, 1, 5, 0);

    let mut warnings = Vec::new();
    let err = file.validate(&mut warnings).unwrap_err();
    assert!(matches!(
        err,
        Error::TtiInvalid {
            block: 1,
            field: TtiField::Tco,
            ..
        }
    ));
}

#[test]
fn extension_blocks_must_advance_by_one() {
    let mut file = clean_file();
    // subtitle 1 split over three blocks: EBN 0, then a jump to 2
    let fragment = |ebn: u8| {
        let mut tti = subtitle(1, 1);
        tti.extension_block = ebn;
        tti
    };
    file.tti = vec![subtitle(0, 0), fragment(0), fragment(2), fragment(0xFF)];
    file.gsi.tti_blocks = Some(4);

    let mut warnings = Vec::new();
    file.validate(&mut warnings).unwrap();
    let rules = rule_warnings(&warnings);
    assert!(rules.contains(&(
        FieldRef::Tti {
            block: 2,
            field: TtiField::Ebn
        },
        Rule::EbnNotConsecutive
    )));
}

#[test]
fn cumulative_status_transitions_follow_the_table() {
    let mut file = clean_file();
    // None -> Intermediate is not a legal transition
    file.tti[1].cumulative = CumulativeStatus::Intermediate;
    file.tti[1].extension_block = 0xFF;

    let mut warnings = Vec::new();
    file.validate(&mut warnings).unwrap();
    let rules = rule_warnings(&warnings);
    assert!(rules.contains(&(
        FieldRef::Tti {
            block: 1,
            field: TtiField::Cs
        },
        Rule::CsNotNoneOrFirst
    )));
}

#[test]
fn a_new_group_resets_the_subtitle_number() {
    let mut file = clean_file();
    let mut third = subtitle(0, 2);
    third.group = 1;
    third.number = 3; // should be 0
    file.tti.push(third);
    file.gsi.tti_blocks = Some(3);
    file.gsi.subtitles = Some(3);
    file.gsi.subtitle_groups = Some(2);

    let mut warnings = Vec::new();
    file.validate(&mut warnings).unwrap();
    let rules = rule_warnings(&warnings);
    assert!(rules.contains(&(
        FieldRef::Tti {
            block: 2,
            field: TtiField::Sn
        },
        Rule::NoFirstSubtitleInNewGroup
    )));
    // the group change itself is consecutive, so only the reset rule fires
    assert!(!rules
        .iter()
        .any(|(_, rule)| *rule == Rule::SgnNotConsecutive));
}

#[test]
fn declared_totals_are_reconciled_as_warnings() {
    let mut file = clean_file();
    file.gsi.tti_blocks = Some(9);
    file.gsi.subtitles = Some(5);
    file.gsi.subtitle_groups = Some(3);

    let mut warnings = Vec::new();
    file.validate(&mut warnings).unwrap();
    let rules = rule_warnings(&warnings);
    assert_eq!(
        rules,
        vec![
            (FieldRef::Gsi(GsiField::Tnb), Rule::TtiCountMismatch),
            (FieldRef::Gsi(GsiField::Tns), Rule::SubtitleCountMismatch),
            (FieldRef::Gsi(GsiField::Tng), Rule::GroupCountMismatch),
        ]
    );
}

#[test]
fn empty_header_strings_warn() {
    let mut file = clean_file();
    file.gsi.publisher = String::new();

    let mut warnings = Vec::new();
    file.validate(&mut warnings).unwrap();
    assert_eq!(
        rule_warnings(&warnings),
        vec![(FieldRef::Gsi(GsiField::Pub), Rule::EmptyPub)]
    );
}

#[test]
fn vertical_position_range_depends_on_the_display_standard() {
    let mut file = clean_file();
    file.gsi.display_standard = Some(DisplayStandardCode::Level1Teletext);
    file.gsi.max_rows = Some(23);
    file.tti[0].vertical_position = 0; // teletext rows start at 1

    let mut warnings = Vec::new();
    file.validate(&mut warnings).unwrap();
    assert!(rule_warnings(&warnings).contains(&(
        FieldRef::Tti {
            block: 0,
            field: TtiField::Vp
        },
        Rule::UnsupportedVpTeletext
    )));
}

#[test]
fn a_blank_display_standard_makes_vertical_position_unusable() {
    let mut file = clean_file();
    file.gsi.display_standard = None;

    let mut warnings = Vec::new();
    let err = file.validate(&mut warnings).unwrap_err();
    assert!(matches!(
        err,
        Error::TtiInvalid {
            block: 0,
            field: TtiField::Vp,
            ..
        }
    ));
}

#[test]
fn validation_is_idempotent() {
    let mut file = clean_file();
    file.tti[1].number = 2;
    file.gsi.subtitle_groups = Some(7);

    let mut first = Vec::new();
    file.validate(&mut first).unwrap();
    let mut second = Vec::new();
    file.validate(&mut second).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

use std::io::Cursor;

use pretty_assertions::assert_eq;

use ebu_stl::error::{FieldRef, ValueKind, WarningKind};
use ebu_stl::gsi::GsiField;
use ebu_stl::types::{
    CharacterCodeTable, CodePage, DiskFormatCode, DisplayStandardCode, LanguageCode,
    TimeCodeStatus,
};
use ebu_stl::{StlFile, Timecode};

// A hand-built wire image, so decoding is checked against the documented
// offsets rather than against the encoder.
fn gsi_bytes() -> Vec<u8> {
    let mut b = vec![b' '; 1024];
    b[0..3].copy_from_slice(b"850");
    b[3..11].copy_from_slice(b"STL25.01");
    b[11] = b'0';
    b[12..14].copy_from_slice(b"00");
    b[14..16].copy_from_slice(b"0F");
    b[16..25].copy_from_slice(b"Au revoir");
    b[224..230].copy_from_slice(b"170302");
    b[230..236].copy_from_slice(b"170401");
    b[236..238].copy_from_slice(b"01");
    b[238..243].copy_from_slice(b"00002");
    b[243..248].copy_from_slice(b"00002");
    b[248..251].copy_from_slice(b"001");
    b[251..253].copy_from_slice(b"40");
    b[253..255].copy_from_slice(b"23");
    b[255] = b'1';
    b[256..264].copy_from_slice(b"10000000");
    b[264..272].copy_from_slice(b"10000500");
    b[272] = b'1';
    b[273] = b'1';
    b[274..277].copy_from_slice(b"FRA");
    b
}

fn tti_bytes(sn: u16, seconds_in: u8, seconds_out: u8, text: &[u8]) -> Vec<u8> {
    let mut b = vec![0x8F; 128];
    b[0] = 0;
    b[1..3].copy_from_slice(&sn.to_le_bytes());
    b[3] = 0xFF;
    b[4] = 0;
    b[5..9].copy_from_slice(&[10, 0, seconds_in, 0]);
    b[9..13].copy_from_slice(&[10, 0, seconds_out, 0]);
    b[13] = 20;
    b[14] = 2;
    b[15] = 0;
    b[16..16 + text.len()].copy_from_slice(text);
    b
}

fn file_bytes() -> Vec<u8> {
    let mut bytes = gsi_bytes();
    bytes.extend(tti_bytes(0, 5, 8, b"Bonjour."));
    bytes.extend(tti_bytes(1, 9, 12, b"Au revoir."));
    bytes
}

#[test]
fn decode_gsi_fields() {
    let mut warnings = Vec::new();
    let stl = StlFile::decode(&mut Cursor::new(file_bytes()), &mut warnings).unwrap();
    assert_eq!(warnings, vec![]);

    let gsi = &stl.gsi;
    assert_eq!(gsi.code_page, Some(CodePage::Multilingual));
    assert_eq!(gsi.disk_format, Some(DiskFormatCode::Stl25));
    assert_eq!(gsi.framerate(), Some(25));
    assert_eq!(gsi.display_standard, Some(DisplayStandardCode::OpenSubtitling));
    assert_eq!(gsi.character_table, Some(CharacterCodeTable::Latin));
    assert_eq!(gsi.language, Some(LanguageCode(0x0F)));
    assert_eq!(gsi.original_program_title, "Au revoir");
    assert_eq!(gsi.original_episode_title, "");
    assert_eq!(
        gsi.creation_date,
        chrono::NaiveDate::from_ymd_opt(2017, 3, 2)
    );
    assert_eq!(
        gsi.revision_date,
        chrono::NaiveDate::from_ymd_opt(2017, 4, 1)
    );
    assert_eq!(gsi.revision_number, Some(1));
    assert_eq!(gsi.tti_blocks, Some(2));
    assert_eq!(gsi.subtitles, Some(2));
    assert_eq!(gsi.subtitle_groups, Some(1));
    assert_eq!(gsi.max_row_chars, Some(40));
    assert_eq!(gsi.max_rows, Some(23));
    assert_eq!(gsi.timecode_status, Some(TimeCodeStatus::IntendedForUse));
    assert_eq!(gsi.start_of_program, Timecode::new(10, 0, 0, 0));
    assert_eq!(gsi.first_in_cue, Timecode::new(10, 0, 5, 0));
    assert_eq!(gsi.disks, Some(1));
    assert_eq!(gsi.disk_sequence, Some(1));
    assert_eq!(gsi.country_of_origin, "FRA");
    assert_eq!(gsi.user_defined, vec![b' '; 576]);
}

#[test]
fn decode_tti_fields() {
    let mut warnings = Vec::new();
    let stl = StlFile::decode(&mut Cursor::new(file_bytes()), &mut warnings).unwrap();

    assert_eq!(stl.tti.len(), 2);
    let first = &stl.tti[0];
    assert_eq!(first.group, 0);
    assert_eq!(first.number, 0);
    assert_eq!(first.extension_block, 0xFF);
    assert_eq!(first.time_in, Timecode::new(10, 0, 5, 0));
    assert_eq!(first.time_out, Timecode::new(10, 0, 8, 0));
    assert_eq!(first.vertical_position, 20);
    assert_eq!(first.raw_text(), b"Bonjour.");
    assert_eq!(
        first.text(CharacterCodeTable::Latin).unwrap(),
        "Bonjour."
    );
    assert_eq!(stl.tti[1].number, 1);
    assert_eq!(stl.tti[1].raw_text(), b"Au revoir.");
}

#[test]
fn damaged_fields_warn_and_decoding_continues() {
    let mut bytes = file_bytes();
    bytes[238..243].copy_from_slice(b"ABCDE"); // TNB
    bytes[255] = b'X'; // TCS

    let mut warnings = Vec::new();
    let stl = StlFile::decode(&mut Cursor::new(bytes), &mut warnings).unwrap();

    assert_eq!(stl.gsi.tti_blocks, None);
    assert_eq!(stl.gsi.timecode_status, None);
    assert_eq!(stl.gsi.country_of_origin, "FRA");
    assert_eq!(stl.tti.len(), 2);

    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].context, FieldRef::Gsi(GsiField::Tnb));
    assert!(matches!(
        &warnings[0].kind,
        WarningKind::Decode(e) if e.kind == ValueKind::InvalidInt
    ));
    assert_eq!(warnings[1].context, FieldRef::Gsi(GsiField::Tcs));
    assert!(matches!(
        &warnings[1].kind,
        WarningKind::Decode(e) if e.kind == ValueKind::InvalidByte
    ));
}

#[test]
fn blank_numeric_fields_decode_as_absent() {
    let mut bytes = file_bytes();
    bytes[238..243].copy_from_slice(b"     "); // TNB
    bytes[224..230].copy_from_slice(b"000101"); // CD zero-date

    let mut warnings = Vec::new();
    let stl = StlFile::decode(&mut Cursor::new(bytes), &mut warnings).unwrap();

    assert_eq!(stl.gsi.tti_blocks, None);
    assert_eq!(stl.gsi.creation_date, None);
    // the blank integer is still reported
    assert!(warnings.iter().any(|w| {
        w.context == FieldRef::Gsi(GsiField::Tnb)
            && matches!(&w.kind, WarningKind::Decode(e) if e.kind == ValueKind::EmptyInt)
    }));
    // the zero-date sentinel is not
    assert!(!warnings
        .iter()
        .any(|w| w.context == FieldRef::Gsi(GsiField::Cd)));
}

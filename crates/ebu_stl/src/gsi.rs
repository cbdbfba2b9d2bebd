//! General Subtitle Information (GSI) block.
//!
//! The GSI block is the fixed 1024-byte header of an STL file. All of its
//! numeric fields are ASCII, all of its string fields are space-padded and
//! encoded in the code page named by the CPN field.
//!
//! | Bytes      | Field | Description                                |
//! |------------|-------|--------------------------------------------|
//! | 0..3       | CPN   | Code Page Number                           |
//! | 3..11      | DFC   | Disk Format Code                           |
//! | 11         | DSC   | Display Standard Code                      |
//! | 12..14     | CCT   | Character Code Table number                |
//! | 14..16     | LC    | Language Code (hex)                        |
//! | 16..48     | OPT   | Original Program Title                     |
//! | 48..80     | OET   | Original Episode Title                     |
//! | 80..112    | TPT   | Translated Program Title                   |
//! | 112..144   | TET   | Translated Episode Title                   |
//! | 144..176   | TN    | Translator's Name                          |
//! | 176..208   | TCD   | Translator's Contact Details               |
//! | 208..224   | SLR   | Subtitle List Reference Code               |
//! | 224..230   | CD    | Creation Date (YYMMDD)                     |
//! | 230..236   | RD    | Revision Date (YYMMDD)                     |
//! | 236..238   | RN    | Revision Number                            |
//! | 238..243   | TNB   | Total Number of TTI blocks                 |
//! | 243..248   | TNS   | Total Number of Subtitles                  |
//! | 248..251   | TNG   | Total Number of Subtitle Groups            |
//! | 251..253   | MNC   | Maximum Number of Displayable Characters   |
//! | 253..255   | MNR   | Maximum Number of Displayable Rows         |
//! | 255        | TCS   | Time Code: Status                          |
//! | 256..264   | TCP   | Time Code: Start-of-Program (HHMMSSFF)     |
//! | 264..272   | TCF   | Time Code: First In-Cue (HHMMSSFF)         |
//! | 272        | TND   | Total Number of Disks                      |
//! | 273        | DSN   | Disk Sequence Number                       |
//! | 274..277   | CO    | Country of Origin                          |
//! | 277..309   | PUB   | Publisher                                  |
//! | 309..341   | EN    | Editor's Name                              |
//! | 341..373   | ECD   | Editor's Contact Details                   |
//! | 373..448   | —     | Spare bytes                                |
//! | 448..1024  | UDA   | User-Defined Area                          |

use std::io::{Read, Write};

use chrono::NaiveDate;
use derive_more::Display;
use tracing::instrument;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{Error, Result, Warning};
use crate::text;
use crate::timecode::Timecode;
use crate::types::{
    CharacterCodeTable, CodePage, DiskFormatCode, DisplayStandardCode, LanguageCode,
    TimeCodeStatus,
};

/// Identifies a GSI block field in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GsiField {
    #[display("CPN")]
    Cpn,
    #[display("DFC")]
    Dfc,
    #[display("DSC")]
    Dsc,
    #[display("CCT")]
    Cct,
    #[display("LC")]
    Lc,
    #[display("OPT")]
    Opt,
    #[display("OET")]
    Oet,
    #[display("TPT")]
    Tpt,
    #[display("TET")]
    Tet,
    #[display("TN")]
    Tn,
    #[display("TCD")]
    Tcd,
    #[display("SLR")]
    Slr,
    #[display("CD")]
    Cd,
    #[display("RD")]
    Rd,
    #[display("RN")]
    Rn,
    #[display("TNB")]
    Tnb,
    #[display("TNS")]
    Tns,
    #[display("TNG")]
    Tng,
    #[display("MNC")]
    Mnc,
    #[display("MNR")]
    Mnr,
    #[display("TCS")]
    Tcs,
    #[display("TCP")]
    Tcp,
    #[display("TCF")]
    Tcf,
    #[display("TND")]
    Tnd,
    #[display("DSN")]
    Dsn,
    #[display("CO")]
    Co,
    #[display("PUB")]
    Pub,
    #[display("EN")]
    En,
    #[display("ECD")]
    Ecd,
    #[display("UDA")]
    Uda,
}

/// The decoded GSI block.
///
/// Absent fields (space-filled on the wire) are `None`; they re-encode as
/// the same space fill. A block decoded from a file is complete after one
/// [`decode`](GsiBlock::decode) call; mutate fields directly before
/// [`encode`](GsiBlock::encode) when producing a file.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GsiBlock {
    /// CPN: code page for the header strings
    pub code_page: Option<CodePage>,
    /// DFC: disk format code, carries the framerate
    pub disk_format: Option<DiskFormatCode>,
    /// DSC: display standard, `None` when blank
    pub display_standard: Option<DisplayStandardCode>,
    /// CCT: character code table for the TTI text fields
    pub character_table: Option<CharacterCodeTable>,
    /// LC: language code
    pub language: Option<LanguageCode>,
    /// OPT: original program title
    pub original_program_title: String,
    /// OET: original episode title
    pub original_episode_title: String,
    /// TPT: translated program title
    pub translated_program_title: String,
    /// TET: translated episode title
    pub translated_episode_title: String,
    /// TN: translator's name
    pub translator_name: String,
    /// TCD: translator's contact details
    pub translator_contact: String,
    /// SLR: subtitle list reference code
    pub subtitle_list_ref: String,
    /// CD: creation date
    pub creation_date: Option<NaiveDate>,
    /// RD: revision date
    pub revision_date: Option<NaiveDate>,
    /// RN: revision number
    pub revision_number: Option<u32>,
    /// TNB: declared total of TTI blocks
    pub tti_blocks: Option<u32>,
    /// TNS: declared total of subtitles
    pub subtitles: Option<u32>,
    /// TNG: declared total of subtitle groups
    pub subtitle_groups: Option<u32>,
    /// MNC: maximum characters per row
    pub max_row_chars: Option<u32>,
    /// MNR: maximum displayable rows
    pub max_rows: Option<u32>,
    /// TCS: time code status
    pub timecode_status: Option<TimeCodeStatus>,
    /// TCP: start-of-program timecode
    pub start_of_program: Timecode,
    /// TCF: first in-cue timecode
    pub first_in_cue: Timecode,
    /// TND: total number of disks
    pub disks: Option<u32>,
    /// DSN: disk sequence number
    pub disk_sequence: Option<u32>,
    /// CO: country of origin
    pub country_of_origin: String,
    /// PUB: publisher
    pub publisher: String,
    /// EN: editor's name
    pub editor_name: String,
    /// ECD: editor's contact details
    pub editor_contact: String,
    /// UDA: user-defined area, raw
    pub user_defined: Vec<u8>,
}

impl GsiBlock {
    /// Size in bytes of the GSI block in an STL file.
    pub const SIZE: usize = 1024;

    /// Framerate extracted from the disk format code.
    ///
    /// `None` means the code is unsupported; callers must treat that as a
    /// hard stop before any framerate-dependent operation.
    pub fn framerate(&self) -> Option<u32> {
        self.disk_format.as_ref().and_then(DiskFormatCode::framerate)
    }

    /// Read and decode one GSI block.
    ///
    /// Only a short read is fatal. Every field is decoded regardless of the
    /// others; per-field failures are pushed to `warnings` tagged with the
    /// field and leave that field at its default.
    #[instrument(skip_all, err)]
    pub fn decode<R: Read>(reader: &mut R, warnings: &mut Vec<Warning>) -> Result<GsiBlock> {
        let mut b = [0u8; Self::SIZE];
        reader.read_exact(&mut b)?;
        Ok(Self::from_bytes(&b, warnings))
    }

    /// Decode a GSI block from its raw 1024 bytes.
    pub fn from_bytes(b: &[u8; Self::SIZE], warnings: &mut Vec<Warning>) -> GsiBlock {
        let mut gsi = GsiBlock::default();

        // CPN - bytes 0..3; decoded first, the string fields below need it
        match codec::decode_int(&b[0..3]) {
            Ok(v) => gsi.code_page = Some(CodePage::from_number(v as u16)),
            Err(e) => warnings.push(Warning::gsi(GsiField::Cpn, e)),
        }
        let cp = gsi.code_page;

        // DFC - bytes 3..11
        match text::decode_page_field(cp, &b[3..11]) {
            Ok(s) if s.is_empty() => {}
            Ok(s) => gsi.disk_format = Some(DiskFormatCode::from_code(&s)),
            Err(e) => warnings.push(Warning::gsi(GsiField::Dfc, e)),
        }

        // DSC - byte 11
        match codec::decode_byte(&b[11..12]) {
            Ok(v) => gsi.display_standard = Some(DisplayStandardCode::from_value(v)),
            Err(e) => warnings.push(Warning::gsi(GsiField::Dsc, e)),
        }

        // CCT - bytes 12..14
        match codec::decode_byte(&b[12..14]) {
            Ok(v) => gsi.character_table = Some(CharacterCodeTable::from_value(v)),
            Err(e) => warnings.push(Warning::gsi(GsiField::Cct, e)),
        }

        // LC - bytes 14..16
        match codec::decode_hex(&b[14..16]) {
            Ok(v) => gsi.language = Some(LanguageCode(v)),
            Err(e) => warnings.push(Warning::gsi(GsiField::Lc, e)),
        }

        let string_field = |field, range: std::ops::Range<usize>, warnings: &mut Vec<Warning>| {
            match text::decode_page_field(cp, &b[range]) {
                Ok(s) => s,
                Err(e) => {
                    warnings.push(Warning::gsi(field, e));
                    String::new()
                }
            }
        };

        gsi.original_program_title = string_field(GsiField::Opt, 16..48, warnings);
        gsi.original_episode_title = string_field(GsiField::Oet, 48..80, warnings);
        gsi.translated_program_title = string_field(GsiField::Tpt, 80..112, warnings);
        gsi.translated_episode_title = string_field(GsiField::Tet, 112..144, warnings);
        gsi.translator_name = string_field(GsiField::Tn, 144..176, warnings);
        gsi.translator_contact = string_field(GsiField::Tcd, 176..208, warnings);
        gsi.subtitle_list_ref = string_field(GsiField::Slr, 208..224, warnings);

        // CD - bytes 224..230, RD - bytes 230..236
        match codec::decode_date(&b[224..230]) {
            Ok(d) => gsi.creation_date = d,
            Err(e) => warnings.push(Warning::gsi(GsiField::Cd, e)),
        }
        match codec::decode_date(&b[230..236]) {
            Ok(d) => gsi.revision_date = d,
            Err(e) => warnings.push(Warning::gsi(GsiField::Rd, e)),
        }

        let int_field = |field, range: std::ops::Range<usize>, warnings: &mut Vec<Warning>| {
            match codec::decode_int(&b[range]) {
                Ok(v) => Some(v),
                Err(e) => {
                    warnings.push(Warning::gsi(field, e));
                    None
                }
            }
        };

        gsi.revision_number = int_field(GsiField::Rn, 236..238, warnings);
        gsi.tti_blocks = int_field(GsiField::Tnb, 238..243, warnings);
        gsi.subtitles = int_field(GsiField::Tns, 243..248, warnings);
        gsi.subtitle_groups = int_field(GsiField::Tng, 248..251, warnings);
        gsi.max_row_chars = int_field(GsiField::Mnc, 251..253, warnings);
        gsi.max_rows = int_field(GsiField::Mnr, 253..255, warnings);

        // TCS - byte 255
        match codec::decode_byte(&b[255..256]) {
            Ok(v) => gsi.timecode_status = Some(TimeCodeStatus::from_value(v)),
            Err(e) => warnings.push(Warning::gsi(GsiField::Tcs, e)),
        }

        // TCP - bytes 256..264, TCF - bytes 264..272
        match codec::decode_timecode(&b[256..264]) {
            Ok(tc) => gsi.start_of_program = tc,
            Err(e) => warnings.push(Warning::gsi(GsiField::Tcp, e)),
        }
        match codec::decode_timecode(&b[264..272]) {
            Ok(tc) => gsi.first_in_cue = tc,
            Err(e) => warnings.push(Warning::gsi(GsiField::Tcf, e)),
        }

        gsi.disks = int_field(GsiField::Tnd, 272..273, warnings);
        gsi.disk_sequence = int_field(GsiField::Dsn, 273..274, warnings);

        gsi.country_of_origin = string_field(GsiField::Co, 274..277, warnings);
        gsi.publisher = string_field(GsiField::Pub, 277..309, warnings);
        gsi.editor_name = string_field(GsiField::En, 309..341, warnings);
        gsi.editor_contact = string_field(GsiField::Ecd, 341..373, warnings);

        // UDA - bytes 448..1024
        gsi.user_defined = b[448..1024].to_vec();

        gsi
    }

    /// Encode and write the GSI block.
    ///
    /// Unlike decoding, encoding is fail-fast: the first string field the
    /// text codec rejects aborts the whole block with that field's error.
    #[instrument(skip_all, err)]
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<()> {
        let b = self.to_bytes()?;
        writer.write_all(&b)?;
        Ok(())
    }

    /// Encode the GSI block into its raw 1024 bytes.
    pub fn to_bytes(&self) -> Result<[u8; Self::SIZE]> {
        let mut b = [0u8; Self::SIZE];
        let cp = self.code_page;

        let gsi_err = |field| move |e| Error::GsiEncode { field, source: e };

        // CPN - bytes 0..3
        codec::encode_int(&mut b[0..3], cp.map(|p| u32::from(p.number())));

        // DFC - bytes 3..11
        let dfc = self.disk_format.as_ref().map_or("", DiskFormatCode::as_str);
        text::encode_page_field(&mut b[3..11], dfc, cp).map_err(gsi_err(GsiField::Dfc))?;

        // DSC - byte 11
        codec::encode_byte(&mut b[11..12], self.display_standard.map(|d| d.value()));

        // CCT - bytes 12..14
        codec::encode_byte(&mut b[12..14], self.character_table.map(|t| t.value()));

        // LC - bytes 14..16
        codec::encode_hex(&mut b[14..16], self.language.map(|l| l.0));

        // OPT - bytes 16..48
        text::encode_page_field(&mut b[16..48], &self.original_program_title, cp)
            .map_err(gsi_err(GsiField::Opt))?;
        // OET - bytes 48..80
        text::encode_page_field(&mut b[48..80], &self.original_episode_title, cp)
            .map_err(gsi_err(GsiField::Oet))?;
        // TPT - bytes 80..112
        text::encode_page_field(&mut b[80..112], &self.translated_program_title, cp)
            .map_err(gsi_err(GsiField::Tpt))?;
        // TET - bytes 112..144
        text::encode_page_field(&mut b[112..144], &self.translated_episode_title, cp)
            .map_err(gsi_err(GsiField::Tet))?;
        // TN - bytes 144..176
        text::encode_page_field(&mut b[144..176], &self.translator_name, cp)
            .map_err(gsi_err(GsiField::Tn))?;
        // TCD - bytes 176..208
        text::encode_page_field(&mut b[176..208], &self.translator_contact, cp)
            .map_err(gsi_err(GsiField::Tcd))?;
        // SLR - bytes 208..224
        text::encode_page_field(&mut b[208..224], &self.subtitle_list_ref, cp)
            .map_err(gsi_err(GsiField::Slr))?;

        // CD - bytes 224..230, RD - bytes 230..236
        codec::encode_date(&mut b[224..230], self.creation_date);
        codec::encode_date(&mut b[230..236], self.revision_date);

        // RN - bytes 236..238
        codec::encode_int(&mut b[236..238], self.revision_number);
        // TNB - bytes 238..243
        codec::encode_int(&mut b[238..243], self.tti_blocks);
        // TNS - bytes 243..248
        codec::encode_int(&mut b[243..248], self.subtitles);
        // TNG - bytes 248..251
        codec::encode_int(&mut b[248..251], self.subtitle_groups);
        // MNC - bytes 251..253
        codec::encode_int(&mut b[251..253], self.max_row_chars);
        // MNR - bytes 253..255
        codec::encode_int(&mut b[253..255], self.max_rows);

        // TCS - byte 255
        codec::encode_byte(&mut b[255..256], self.timecode_status.map(|t| t.value()));

        // TCP - bytes 256..264, TCF - bytes 264..272
        codec::encode_timecode(&mut b[256..264], self.start_of_program);
        codec::encode_timecode(&mut b[264..272], self.first_in_cue);

        // TND - byte 272, DSN - byte 273
        codec::encode_int(&mut b[272..273], self.disks);
        codec::encode_int(&mut b[273..274], self.disk_sequence);

        // CO - bytes 274..277
        text::encode_page_field(&mut b[274..277], &self.country_of_origin, cp)
            .map_err(gsi_err(GsiField::Co))?;
        // PUB - bytes 277..309
        text::encode_page_field(&mut b[277..309], &self.publisher, cp)
            .map_err(gsi_err(GsiField::Pub))?;
        // EN - bytes 309..341
        text::encode_page_field(&mut b[309..341], &self.editor_name, cp)
            .map_err(gsi_err(GsiField::En))?;
        // ECD - bytes 341..373
        text::encode_page_field(&mut b[341..373], &self.editor_contact, cp)
            .map_err(gsi_err(GsiField::Ecd))?;

        // UDA - bytes 448..1024
        let n = self.user_defined.len().min(576);
        b[448..448 + n].copy_from_slice(&self.user_defined[..n]);

        Ok(b)
    }
}

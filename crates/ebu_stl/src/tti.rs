//! Text and Timing Information (TTI) block.
//!
//! Each subtitle fragment is one fixed 128-byte TTI block. Unlike the GSI
//! header, the numeric fields here are raw little-endian binary, not ASCII.
//!
//! | Bytes    | Field | Description                          |
//! |----------|-------|--------------------------------------|
//! | 0        | SGN   | Subtitle Group Number                |
//! | 1..3     | SN    | Subtitle Number (little endian)      |
//! | 3        | EBN   | Extension Block Number (0xFF = last) |
//! | 4        | CS    | Cumulative Status                    |
//! | 5..9     | TCI   | Time Code In (binary)                |
//! | 9..13    | TCO   | Time Code Out (binary)               |
//! | 13       | VP    | Vertical Position                    |
//! | 14       | JC    | Justification Code                   |
//! | 15       | CF    | Comment Flag                         |
//! | 16..128  | TF    | Text Field, 0x8F-filled tail         |

use std::io::{Read, Write};

use derive_more::Display;
use tracing::instrument;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::Result;
use crate::text;
use crate::timecode::Timecode;
use crate::types::{control, CharacterCodeTable, CommentFlag, CumulativeStatus, Justification};

/// Extension block number marking the last (or only) block of a subtitle.
pub const EBN_LAST: u8 = 0xFF;

/// Width in bytes of the text field.
const TEXT_FIELD_SIZE: usize = 112;

/// Identifies a TTI block field in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TtiField {
    #[display("SGN")]
    Sgn,
    #[display("SN")]
    Sn,
    #[display("EBN")]
    Ebn,
    #[display("CS")]
    Cs,
    #[display("TCI")]
    Tci,
    #[display("TCO")]
    Tco,
    #[display("VP")]
    Vp,
    #[display("JC")]
    Jc,
    #[display("CF")]
    Cf,
    #[display("TF")]
    Tf,
}

/// A decoded TTI block.
///
/// The text field is kept in its raw character-table encoding; use
/// [`text`](TtiBlock::text) and [`set_text`](TtiBlock::set_text) with the
/// character code table from the GSI block to transcode it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TtiBlock {
    /// SGN: subtitle group number
    pub group: u8,
    /// SN: subtitle number
    pub number: u16,
    /// EBN: extension block number, [`EBN_LAST`] closes a subtitle
    pub extension_block: u8,
    /// CS: cumulative status
    pub cumulative: CumulativeStatus,
    /// TCI: in-cue timecode
    pub time_in: Timecode,
    /// TCO: out-cue timecode
    pub time_out: Timecode,
    /// VP: vertical position
    pub vertical_position: u8,
    /// JC: justification code
    pub justification: Justification,
    /// CF: comment flag
    pub comment: CommentFlag,
    /// TF: raw table-encoded text, trailing 0x8F filler trimmed
    text: Vec<u8>,
    /// Whether byte 127 held the 0x8F filler. The sequencing validator
    /// requires this of every closing block; it does not take part in
    /// equality or round trips.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) padded: bool,
}

impl Default for TtiBlock {
    fn default() -> Self {
        TtiBlock {
            group: 0,
            number: 0,
            extension_block: EBN_LAST,
            cumulative: CumulativeStatus::None,
            time_in: Timecode::default(),
            time_out: Timecode::default(),
            vertical_position: 0,
            justification: Justification::Unchanged,
            comment: CommentFlag::SubtitleData,
            text: Vec::new(),
            padded: true,
        }
    }
}

impl PartialEq for TtiBlock {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
            && self.number == other.number
            && self.extension_block == other.extension_block
            && self.cumulative == other.cumulative
            && self.time_in == other.time_in
            && self.time_out == other.time_out
            && self.vertical_position == other.vertical_position
            && self.justification == other.justification
            && self.comment == other.comment
            && self.text == other.text
    }
}

impl Eq for TtiBlock {}

impl TtiBlock {
    /// Size in bytes of a TTI block in an STL file.
    pub const SIZE: usize = 128;

    /// A standalone subtitle block displayed from `time_in` to `time_out`.
    pub fn new(number: u16, time_in: Timecode, time_out: Timecode) -> TtiBlock {
        TtiBlock {
            number,
            time_in,
            time_out,
            ..TtiBlock::default()
        }
    }

    /// Read and decode one TTI block. Only a short read can fail.
    #[instrument(skip_all, err)]
    pub fn decode<R: Read>(reader: &mut R) -> Result<TtiBlock> {
        let mut b = [0u8; Self::SIZE];
        reader.read_exact(&mut b)?;
        Ok(Self::from_bytes(&b))
    }

    /// Decode a TTI block from its raw 128 bytes.
    pub fn from_bytes(b: &[u8; Self::SIZE]) -> TtiBlock {
        let text_end = b[16..]
            .iter()
            .rposition(|&c| c != control::UNUSED_SPACE)
            .map_or(16, |p| 17 + p);
        TtiBlock {
            group: b[0],
            number: codec::decode_tti_u16(&b[1..3]),
            extension_block: b[3],
            cumulative: CumulativeStatus::from_value(b[4]),
            time_in: codec::decode_tti_timecode(&b[5..9]),
            time_out: codec::decode_tti_timecode(&b[9..13]),
            vertical_position: b[13],
            justification: Justification::from_value(b[14]),
            comment: CommentFlag::from_value(b[15]),
            padded: b[127] == control::UNUSED_SPACE,
            text: b[16..text_end].to_vec(),
        }
    }

    /// Encode and write the TTI block. In-range values always encode.
    #[instrument(skip_all, err)]
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Encode the TTI block into its raw 128 bytes.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut b = [0u8; Self::SIZE];
        b[0] = self.group;
        codec::encode_tti_u16(&mut b[1..3], self.number);
        b[3] = self.extension_block;
        b[4] = self.cumulative.value();
        codec::encode_tti_timecode(&mut b[5..9], self.time_in);
        codec::encode_tti_timecode(&mut b[9..13], self.time_out);
        b[13] = self.vertical_position;
        b[14] = self.justification.value();
        b[15] = self.comment.value();
        let n = self.text.len().min(TEXT_FIELD_SIZE);
        b[16..16 + n].copy_from_slice(&self.text[..n]);
        b[16 + n..].fill(control::UNUSED_SPACE);
        b
    }

    /// The raw table-encoded text field.
    pub fn raw_text(&self) -> &[u8] {
        &self.text
    }

    /// Replace the text field with already-encoded bytes.
    pub fn set_raw_text(&mut self, text: Vec<u8>) {
        self.padded = text.len() < TEXT_FIELD_SIZE;
        self.text = text;
    }

    /// Transcode the text field to UTF-8 using the given character table.
    pub fn text(&self, table: CharacterCodeTable) -> Result<String> {
        text::decode_text(table, &self.text)
    }

    /// Set the text field from UTF-8, encoding it with the given table.
    pub fn set_text(&mut self, text: &str, table: CharacterCodeTable) -> Result<()> {
        self.set_raw_text(text::encode_text(table, text)?);
        Ok(())
    }
}

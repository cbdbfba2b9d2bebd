//! Byte/text transcoding for the GSI code pages and TTI character tables.
//!
//! Two registries, matching the two kinds of textual payload: GSI header
//! strings use a DOS code page (437, 850, 860, 863, 865) selected by the
//! CPN field, TTI text uses a character code table (ISO 6937 or one of the
//! ISO 8859 variants) selected by the CCT field. Unsupported identifiers
//! fail before any byte is transcoded. Decoding is strict; encoding is
//! lossy and substitutes `?` for unmappable characters instead of failing
//! the whole field.

use codepage_strings::Coding;
use textcode::{iso6937, iso8859_5, iso8859_6, iso8859_7, iso8859_8};

use crate::error::{Error, Result, ValueError, ValueKind};
use crate::types::{CharacterCodeTable, CodePage};

fn coding(page: CodePage) -> Option<Coding> {
    if !page.is_supported() {
        return None;
    }
    Coding::new(page.number()).ok()
}

/// Decode a space-padded GSI string field.
pub(crate) fn decode_page_field(
    page: Option<CodePage>,
    b: &[u8],
) -> std::result::Result<String, ValueError> {
    let coding = page
        .and_then(coding)
        .ok_or_else(|| ValueError::new(ValueKind::UnsupportedCodePage, b))?;
    let end = b.iter().rposition(|&c| c != b' ').map_or(0, |p| p + 1);
    coding
        .decode(&b[..end])
        .map(|s| s.into_owned())
        .map_err(|_| ValueError::new(ValueKind::InvalidString, b))
}

/// Encode a GSI string into a space-padded fixed-width field.
///
/// The encoded bytes are cut to the field width when too long; length never
/// fails the field.
pub(crate) fn encode_page_field(
    b: &mut [u8],
    s: &str,
    page: Option<CodePage>,
) -> std::result::Result<(), ValueError> {
    let coding = page
        .and_then(coding)
        .ok_or_else(|| ValueError::new(ValueKind::UnsupportedCodePage, s.as_bytes()))?;
    let encoded: Vec<u8> = s
        .chars()
        .flat_map(|c| coding.encode(c.to_string()).unwrap_or_else(|_| vec![b'?']))
        .collect();
    let n = encoded.len().min(b.len());
    b[..n].copy_from_slice(&encoded[..n]);
    b[n..].fill(b' ');
    Ok(())
}

/// Decode table-encoded subtitle text to UTF-8.
pub fn decode_text(table: CharacterCodeTable, b: &[u8]) -> Result<String> {
    match table {
        CharacterCodeTable::Latin => Ok(iso6937::decode_to_string(b)),
        CharacterCodeTable::LatinCyrillic => Ok(iso8859_5::decode_to_string(b)),
        CharacterCodeTable::LatinArabic => Ok(iso8859_6::decode_to_string(b)),
        CharacterCodeTable::LatinGreek => Ok(iso8859_7::decode_to_string(b)),
        CharacterCodeTable::LatinHebrew => Ok(iso8859_8::decode_to_string(b)),
        CharacterCodeTable::Other(_) => Err(Error::UnsupportedTable(table)),
    }
}

/// Encode UTF-8 subtitle text into its table encoding.
pub fn encode_text(table: CharacterCodeTable, s: &str) -> Result<Vec<u8>> {
    match table {
        CharacterCodeTable::Latin => Ok(iso6937::encode_to_vec(s)),
        CharacterCodeTable::LatinCyrillic => Ok(iso8859_5::encode_to_vec(s)),
        CharacterCodeTable::LatinArabic => Ok(iso8859_6::encode_to_vec(s)),
        CharacterCodeTable::LatinGreek => Ok(iso8859_7::encode_to_vec(s)),
        CharacterCodeTable::LatinHebrew => Ok(iso8859_8::encode_to_vec(s)),
        CharacterCodeTable::Other(_) => Err(Error::UnsupportedTable(table)),
    }
}

//! Fixed-width field primitives for the two block codecs.
//!
//! GSI fields are ASCII: decimal digits right-justified and zero-padded,
//! with an all-spaces fill standing for an absent value. TTI numeric fields
//! are unsigned little-endian binary. The two conventions are genuinely
//! different wire formats and are kept as separate primitive sets.
//!
//! Width contract: every function asserts the declared width of the slice it
//! is handed. A wrong width is a caller bug, not a data error, and panics.

use byteorder::{ByteOrder, LittleEndian};
use chrono::{Datelike, NaiveDate};

use crate::error::{ValueError, ValueKind};
use crate::timecode::Timecode;

fn trim_spaces(b: &[u8]) -> &[u8] {
    let start = b.iter().position(|&c| c != b' ').unwrap_or(b.len());
    let end = b.iter().rposition(|&c| c != b' ').map_or(start, |p| p + 1);
    &b[start..end]
}

/// Decode a fixed-width ASCII decimal field.
pub(crate) fn decode_int(b: &[u8]) -> Result<u32, ValueError> {
    let s = trim_spaces(b);
    if s.is_empty() {
        return Err(ValueError::new(ValueKind::EmptyInt, b));
    }
    if !s.iter().all(u8::is_ascii_digit) {
        return Err(ValueError::new(ValueKind::InvalidInt, b));
    }
    std::str::from_utf8(s)
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| ValueError::new(ValueKind::InvalidInt, b))
}

/// Encode a value as right-justified zero-padded decimal digits.
///
/// `None` stands for an absent value and fills the field with spaces. A
/// value wider than the field silently loses its high-order digits; existing
/// producers rely on this truncation, so it is preserved as-is.
pub(crate) fn encode_int(b: &mut [u8], v: Option<u32>) {
    match v {
        None => b.fill(b' '),
        Some(mut v) => {
            for i in (0..b.len()).rev() {
                b[i] = b'0' + (v % 10) as u8;
                v /= 10;
            }
        }
    }
}

/// Decode a one- or two-digit ASCII field into a single byte (0..=99).
pub(crate) fn decode_byte(b: &[u8]) -> Result<u8, ValueError> {
    assert!(b.len() <= 2, "byte field wider than 2 bytes ({})", b.len());
    match decode_int(b) {
        Ok(v) => Ok(v as u8),
        Err(e) if e.kind == ValueKind::EmptyInt => Err(ValueError::new(ValueKind::EmptyByte, b)),
        Err(_) => Err(ValueError::new(ValueKind::InvalidByte, b)),
    }
}

pub(crate) fn encode_byte(b: &mut [u8], v: Option<u8>) {
    assert!(b.len() <= 2, "byte field wider than 2 bytes ({})", b.len());
    encode_int(b, v.map(u32::from));
}

/// Decode a two-character uppercase hex field.
pub(crate) fn decode_hex(b: &[u8]) -> Result<u8, ValueError> {
    assert_eq!(b.len(), 2, "hex field must be 2 bytes ({})", b.len());
    let s = trim_spaces(b);
    if s.is_empty() {
        return Err(ValueError::new(ValueKind::EmptyHex, b));
    }
    std::str::from_utf8(s)
        .ok()
        .and_then(|s| u8::from_str_radix(s, 16).ok())
        .ok_or_else(|| ValueError::new(ValueKind::InvalidHex, b))
}

pub(crate) fn encode_hex(b: &mut [u8], v: Option<u8>) {
    assert_eq!(b.len(), 2, "hex field must be 2 bytes ({})", b.len());
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    match v {
        None => b.fill(b' '),
        Some(v) => {
            b[0] = HEX[usize::from(v >> 4)];
            b[1] = HEX[usize::from(v & 0x0F)];
        }
    }
}

/// Decode a six-digit `YYMMDD` date, year 2000-based.
///
/// The `000101` fill pattern stands for "no date" and decodes to `None`
/// rather than 2000-01-01.
pub(crate) fn decode_date(b: &[u8]) -> Result<Option<NaiveDate>, ValueError> {
    assert_eq!(b.len(), 6, "date field must be 6 bytes ({})", b.len());
    let component = |r: &[u8]| {
        decode_int(r)
            .map_err(|_| ValueError::new(ValueKind::InvalidDate, b))
    };
    let year = component(&b[0..2])?;
    let month = component(&b[2..4])?;
    let day = component(&b[4..6])?;

    if (year, month, day) == (0, 1, 1) {
        return Ok(None);
    }
    NaiveDate::from_ymd_opt(2000 + year as i32, month, day)
        .map(Some)
        .ok_or_else(|| ValueError::new(ValueKind::InvalidDate, b))
}

pub(crate) fn encode_date(b: &mut [u8], v: Option<NaiveDate>) {
    assert_eq!(b.len(), 6, "date field must be 6 bytes ({})", b.len());
    match v {
        None => b.copy_from_slice(b"000101"),
        Some(date) => {
            encode_int(&mut b[0..2], Some((date.year() - 2000).rem_euclid(100) as u32));
            encode_int(&mut b[2..4], Some(date.month()));
            encode_int(&mut b[4..6], Some(date.day()));
        }
    }
}

/// Decode an eight-digit `HHMMSSFF` timecode.
///
/// A failure in any component fails the whole field; a blank component wins
/// over a malformed one when picking the reported kind.
pub(crate) fn decode_timecode(b: &[u8]) -> Result<Timecode, ValueError> {
    assert_eq!(b.len(), 8, "timecode field must be 8 bytes ({})", b.len());
    let mut empty = false;
    let mut invalid = false;
    let mut component = |r: &[u8]| match decode_int(r) {
        Ok(v) => v as u8,
        Err(e) => {
            if e.kind == ValueKind::EmptyInt {
                empty = true;
            } else {
                invalid = true;
            }
            0
        }
    };
    let tc = Timecode {
        hours: component(&b[0..2]),
        minutes: component(&b[2..4]),
        seconds: component(&b[4..6]),
        frames: component(&b[6..8]),
    };
    if empty {
        Err(ValueError::new(ValueKind::EmptyTimecode, b))
    } else if invalid {
        Err(ValueError::new(ValueKind::InvalidTimecode, b))
    } else {
        Ok(tc)
    }
}

pub(crate) fn encode_timecode(b: &mut [u8], v: Timecode) {
    assert_eq!(b.len(), 8, "timecode field must be 8 bytes ({})", b.len());
    encode_int(&mut b[0..2], Some(u32::from(v.hours)));
    encode_int(&mut b[2..4], Some(u32::from(v.minutes)));
    encode_int(&mut b[4..6], Some(u32::from(v.seconds)));
    encode_int(&mut b[6..8], Some(u32::from(v.frames)));
}

/// Decode a little-endian unsigned 16-bit TTI field.
pub(crate) fn decode_tti_u16(b: &[u8]) -> u16 {
    assert_eq!(b.len(), 2, "TTI u16 field must be 2 bytes ({})", b.len());
    LittleEndian::read_u16(b)
}

pub(crate) fn encode_tti_u16(b: &mut [u8], v: u16) {
    assert_eq!(b.len(), 2, "TTI u16 field must be 2 bytes ({})", b.len());
    LittleEndian::write_u16(b, v);
}

/// Decode a four-byte binary TTI timecode, one byte per component.
pub(crate) fn decode_tti_timecode(b: &[u8]) -> Timecode {
    assert_eq!(b.len(), 4, "TTI timecode field must be 4 bytes ({})", b.len());
    Timecode {
        hours: b[0],
        minutes: b[1],
        seconds: b[2],
        frames: b[3],
    }
}

pub(crate) fn encode_tti_timecode(b: &mut [u8], v: Timecode) {
    assert_eq!(b.len(), 4, "TTI timecode field must be 4 bytes ({})", b.len());
    b[0] = v.hours;
    b[1] = v.minutes;
    b[2] = v.seconds;
    b[3] = v.frames;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ValueKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_int_trims_and_parses() {
        assert_eq!(decode_int(b"  123").unwrap(), 123);
        assert_eq!(decode_int(b"123  ").unwrap(), 123);
        assert_eq!(decode_int(b" 123 ").unwrap(), 123);
        assert_eq!(decode_int(b"0000").unwrap(), 0);
        assert_eq!(decode_int(b"2147483647").unwrap(), 2147483647);
    }

    #[test]
    fn decode_int_failures() {
        assert_eq!(decode_int(b"   ").unwrap_err().kind, ValueKind::EmptyInt);
        assert_eq!(decode_int(b"").unwrap_err().kind, ValueKind::EmptyInt);
        assert_eq!(decode_int(b"ABC").unwrap_err().kind, ValueKind::InvalidInt);
        assert_eq!(decode_int(b"-12").unwrap_err().kind, ValueKind::InvalidInt);
        assert_eq!(decode_int(b"1 2").unwrap_err().kind, ValueKind::InvalidInt);
    }

    #[test]
    fn encode_int_pads_and_fills() {
        let mut b = [0u8; 6];
        encode_int(&mut b, Some(123));
        assert_eq!(&b, b"000123");

        let mut b = [0u8; 3];
        encode_int(&mut b, None);
        assert_eq!(&b, b"   ");

        let mut b = [0u8; 1];
        encode_int(&mut b, Some(0));
        assert_eq!(&b, b"0");
    }

    // Values wider than the field lose their high-order digits. Producers
    // in the wild depend on this, so it is pinned here rather than fixed.
    #[test]
    fn encode_int_truncates_wide_values() {
        let mut b = [0u8; 2];
        encode_int(&mut b, Some(123));
        assert_eq!(&b, b"23");
    }

    #[test]
    fn byte_field_limits() {
        assert_eq!(decode_byte(b" 1").unwrap(), 1);
        assert_eq!(decode_byte(b"99").unwrap(), 99);
        assert_eq!(decode_byte(b"  ").unwrap_err().kind, ValueKind::EmptyByte);
        assert_eq!(decode_byte(b"AB").unwrap_err().kind, ValueKind::InvalidByte);
    }

    #[test]
    #[should_panic(expected = "byte field wider than 2")]
    fn byte_field_width_is_a_contract() {
        let _ = decode_byte(b"123");
    }

    #[test]
    fn hex_field() {
        assert_eq!(decode_hex(b"12").unwrap(), 0x12);
        assert_eq!(decode_hex(b"FF").unwrap(), 0xFF);
        assert_eq!(decode_hex(b" 1").unwrap(), 0x01);
        assert_eq!(decode_hex(b"GG").unwrap_err().kind, ValueKind::InvalidHex);
        assert_eq!(decode_hex(b"  ").unwrap_err().kind, ValueKind::EmptyHex);

        let mut b = [0u8; 2];
        encode_hex(&mut b, Some(0x0C));
        assert_eq!(&b, b"0C");
        encode_hex(&mut b, Some(0xFF));
        assert_eq!(&b, b"FF");
        encode_hex(&mut b, None);
        assert_eq!(&b, b"  ");
    }

    #[test]
    fn date_field() {
        assert_eq!(
            decode_date(b"170302").unwrap(),
            NaiveDate::from_ymd_opt(2017, 3, 2)
        );
        assert_eq!(decode_date(b"000101").unwrap(), None);
        assert_eq!(
            decode_date(b"1703AB").unwrap_err().kind,
            ValueKind::InvalidDate
        );
        assert_eq!(
            decode_date(b"170231").unwrap_err().kind,
            ValueKind::InvalidDate
        );
        assert_eq!(
            decode_date(b"1703  ").unwrap_err().kind,
            ValueKind::InvalidDate
        );

        let mut b = [0u8; 6];
        encode_date(&mut b, NaiveDate::from_ymd_opt(2017, 1, 1));
        assert_eq!(&b, b"170101");
        encode_date(&mut b, None);
        assert_eq!(&b, b"000101");
    }

    #[test]
    fn timecode_field() {
        assert_eq!(
            decode_timecode(b"44332211").unwrap(),
            Timecode::new(44, 33, 22, 11)
        );
        assert_eq!(
            decode_timecode(b"443322AB").unwrap_err().kind,
            ValueKind::InvalidTimecode
        );
        // a blank component outranks a malformed one
        assert_eq!(
            decode_timecode(b"4433  AB").unwrap_err().kind,
            ValueKind::EmptyTimecode
        );
        assert_eq!(
            decode_timecode(b"        ").unwrap_err().kind,
            ValueKind::EmptyTimecode
        );

        let mut b = [0u8; 8];
        encode_timecode(&mut b, Timecode::new(44, 33, 22, 11));
        assert_eq!(&b, b"44332211");
    }

    #[test]
    fn tti_fields_are_little_endian() {
        assert_eq!(decode_tti_u16(&[0x34, 0x12]), 0x1234);
        let mut b = [0u8; 2];
        encode_tti_u16(&mut b, 0x1234);
        assert_eq!(b, [0x34, 0x12]);

        let tc = decode_tti_timecode(&[1, 2, 3, 4]);
        assert_eq!(tc, Timecode::new(1, 2, 3, 4));
        let mut b = [0u8; 4];
        encode_tti_timecode(&mut b, tc);
        assert_eq!(b, [1, 2, 3, 4]);
    }
}

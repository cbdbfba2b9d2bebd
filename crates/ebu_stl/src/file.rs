//! Reading and writing whole STL files.

use std::io::{Read, Write};

use tracing::{debug, instrument};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, Warning};
use crate::gsi::GsiBlock;
use crate::tti::TtiBlock;

/// An STL file: one GSI header block and the TTI blocks that follow it.
///
/// The order of `tti` is semantically significant; it defines the block
/// numbering used in diagnostics and the sequencing rules the validator
/// enforces.
///
/// ```no_run
/// use std::fs::File;
///
/// fn check(path: &str) -> ebu_stl::Result<()> {
///     let mut warnings = Vec::new();
///     let stl = ebu_stl::StlFile::decode(&mut File::open(path)?, &mut warnings)?;
///     stl.validate(&mut warnings)?;
///     for warning in &warnings {
///         eprintln!("{warning}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StlFile {
    pub gsi: GsiBlock,
    pub tti: Vec<TtiBlock>,
}

impl StlFile {
    /// A file with the given header and no subtitles yet.
    pub fn new(gsi: GsiBlock) -> Self {
        StlFile {
            gsi,
            tti: Vec::new(),
        }
    }

    /// Read and decode a whole STL file.
    ///
    /// One GSI block, then TTI blocks until the input ends. Ending cleanly
    /// between blocks is the normal termination; input that stops inside a
    /// block is fatal. Field-level trouble lands in `warnings`, which keeps
    /// whatever was collected even when an error is returned.
    #[instrument(skip_all, err)]
    pub fn decode<R: Read>(reader: &mut R, warnings: &mut Vec<Warning>) -> Result<StlFile> {
        let gsi = GsiBlock::decode(reader, warnings)?;

        let mut tti = Vec::new();
        let mut block = [0u8; TtiBlock::SIZE];
        while read_block(reader, &mut block, tti.len())? {
            tti.push(TtiBlock::from_bytes(&block));
        }
        debug!(blocks = tti.len(), "decoded STL file");

        Ok(StlFile { gsi, tti })
    }

    /// Encode and write the whole file, GSI block first.
    ///
    /// Fail-fast: the first block that cannot be encoded aborts the write.
    #[instrument(skip_all, err)]
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.gsi.encode(writer)?;
        for tti in &self.tti {
            tti.encode(writer)?;
        }
        Ok(())
    }
}

/// Fill `buf` completely, or read nothing at all.
///
/// Returns `Ok(false)` on a clean end of input at a block boundary; input
/// ending mid-block is an error.
fn read_block<R: Read>(reader: &mut R, buf: &mut [u8], block: usize) -> Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => {
                return Err(Error::TruncatedTtiBlock {
                    block,
                    read: filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::timecode::Timecode;
    use crate::types::{CharacterCodeTable, CodePage, DiskFormatCode, DisplayStandardCode};

    fn sample_file() -> StlFile {
        let gsi = GsiBlock {
            code_page: Some(CodePage::Multilingual),
            disk_format: Some(DiskFormatCode::Stl25),
            display_standard: Some(DisplayStandardCode::OpenSubtitling),
            character_table: Some(CharacterCodeTable::Latin),
            tti_blocks: Some(2),
            subtitles: Some(2),
            subtitle_groups: Some(1),
            first_in_cue: Timecode::new(10, 0, 0, 0),
            ..GsiBlock::default()
        };
        let mut file = StlFile::new(gsi);
        for n in 0..2u16 {
            let mut tti = TtiBlock::new(
                n,
                Timecode::new(10, n as u8, 0, 0),
                Timecode::new(10, n as u8, 3, 0),
            );
            tti.set_text(&format!("Subtitle {n}"), CharacterCodeTable::Latin)
                .unwrap();
            file.tti.push(tti);
        }
        file
    }

    #[traced_test]
    #[test]
    fn file_round_trip() {
        let file = sample_file();
        let mut bytes = Vec::new();
        file.encode(&mut bytes).unwrap();
        assert_eq!(bytes.len(), 1024 + 2 * 128);

        let mut warnings = Vec::new();
        let mut decoded = StlFile::decode(&mut Cursor::new(&bytes), &mut warnings).unwrap();
        assert_eq!(warnings, vec![]);
        decoded.gsi.user_defined = Vec::new();
        assert_eq!(decoded, file);
    }

    #[test]
    fn clean_eof_after_gsi_is_an_empty_file() {
        let file = StlFile::new(sample_file().gsi);
        let mut bytes = Vec::new();
        file.encode(&mut bytes).unwrap();

        let mut warnings = Vec::new();
        let decoded = StlFile::decode(&mut Cursor::new(&bytes), &mut warnings).unwrap();
        assert!(decoded.tti.is_empty());
    }

    #[traced_test]
    #[test]
    fn partial_trailing_block_is_fatal() {
        let file = sample_file();
        let mut bytes = Vec::new();
        file.encode(&mut bytes).unwrap();
        bytes.truncate(1024 + 128 + 60);

        let mut warnings = Vec::new();
        let err = StlFile::decode(&mut Cursor::new(&bytes), &mut warnings).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedTtiBlock { block: 1, read: 60 }
        ));
    }

    #[test]
    fn short_gsi_is_fatal() {
        let bytes = vec![b' '; 100];
        let mut warnings = Vec::new();
        let err = StlFile::decode(&mut Cursor::new(&bytes), &mut warnings).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

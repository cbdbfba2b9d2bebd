//! # EBU STL Format Documentation
//!
//! This crate reads, validates and writes subtitle files in the **STL**
//! format defined by EBU Tech. 3264, the exchange format broadcasters use
//! to ship subtitle lists between systems. STL files are typically
//! identified with the `.stl` extension.
//!
//! ## File Structure
//!
//! An STL file is a fixed-layout binary file: one 1024-byte **General
//! Subtitle Information** (GSI) block followed by any number of 128-byte
//! **Text and Timing Information** (TTI) blocks, one per subtitle fragment.
//!
//! | Offset (bytes)   | Block | Description                                 |
//! |------------------|-------|---------------------------------------------|
//! | 0x0000           | GSI   | 1024 bytes: file-wide header                |
//! | 0x0400 + n * 128 | TTI   | 128 bytes each: one subtitle fragment       |
//!
//! The GSI block is ASCII throughout: numbers are right-justified
//! zero-padded decimal digits (space-filled when absent), dates are
//! `YYMMDD`, timecodes are `HHMMSSFF`, and free-text fields are space-padded
//! strings in the DOS code page named by the header's CPN field. TTI
//! numeric fields use a second, unrelated convention: unsigned little-endian
//! binary integers. Subtitle text is stored in the character code table
//! named by the header's CCT field (ISO 6937 or an ISO 8859 variant), with
//! the unused tail of the 112-byte text field filled with the 0x8F control
//! code. Per-field byte offsets are documented in [`gsi`] and [`tti`].
//!
//! ## Decoding, warnings and errors
//!
//! Real-world STL files are frequently sloppy, so the decoder refuses to
//! give up on a file over one bad field: anything that only damages a
//! single field is reported as a [`Warning`] into a caller-supplied sink
//! and decoding continues. Only structural problems (a truncated block,
//! nothing after the header, an unusable framerate) are hard errors.
//! [`StlFile::validate`] applies the format's semantic rules the same way:
//! per-field checks, a sequential scan over the subtitle numbering and
//! cumulative-status chain, and reconciliation of the header's declared
//! totals against what was actually decoded.
//!
//! ```no_run
//! use std::fs::File;
//!
//! fn dump(path: &str) -> ebu_stl::Result<()> {
//!     let mut warnings = Vec::new();
//!     let stl = ebu_stl::StlFile::decode(&mut File::open(path)?, &mut warnings)?;
//!     stl.validate(&mut warnings)?;
//!
//!     for warning in &warnings {
//!         eprintln!("warning: {warning}");
//!     }
//!     if let Some(table) = stl.gsi.character_table {
//!         for tti in &stl.tti {
//!             println!("{} --> {} {}", tti.time_in, tti.time_out, tti.text(table)?);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod codec;
pub mod error;
pub mod file;
pub mod gsi;
pub mod text;
pub mod timecode;
pub mod tti;
pub mod types;
mod validate;

pub use error::{Error, Result, Warning};
pub use file::StlFile;
pub use gsi::GsiBlock;
pub use timecode::Timecode;
pub use tti::TtiBlock;

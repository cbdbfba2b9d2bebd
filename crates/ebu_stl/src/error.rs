//! Error and warning types that can be emitted from this library
//!
//! The decoder and the validator are deliberately tolerant: anything that
//! only damages a single field is collected as a [`Warning`] in the caller's
//! sink and processing continues, so one pass yields every diagnostic the
//! input deserves. [`Error`] is reserved for conditions that make further
//! processing meaningless (a truncated block, an unsupported framerate, a
//! fatal rule violation). A fatal condition is never demoted into the
//! warning list.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::gsi::GsiField;
use crate::timecode::Timecode;
use crate::tti::TtiField;
use crate::types::CharacterCodeTable;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Input ended in the middle of a 128-byte TTI block
    #[error("TTI block {block}: truncated (read {read} of 128 bytes)")]
    TruncatedTtiBlock { block: usize, read: usize },

    /// A GSI field value could not be represented in the target encoding
    #[error("GSI {field}: {source}")]
    GsiEncode { field: GsiField, source: ValueError },

    /// A fatal rule violation on a GSI field
    #[error("GSI {field}: {source}")]
    GsiInvalid { field: GsiField, source: RuleError },

    /// A fatal rule violation on a TTI field
    #[error("TTI block {block} {field}: {source}")]
    TtiInvalid {
        block: usize,
        field: TtiField,
        source: RuleError,
    },

    /// Text transcoding was requested for a character code table without a
    /// registered coding
    #[error("unsupported character code table ({0})")]
    UnsupportedTable(CharacterCodeTable),

    /// The file carries no TTI blocks at all
    #[error("file contains no TTI blocks")]
    NoTtiBlocks,

    /// The disk format code does not resolve to a framerate, which blocks
    /// every timecode check
    #[error("unsupported disk format code, framerate unknown")]
    UnsupportedFramerate,

    /// The GSI first-in-cue timecode does not match the first TTI in-cue
    #[error("GSI TCF {tcf} does not match the first TTI in-cue {tci}")]
    FirstCueMismatch { tcf: Timecode, tci: Timecode },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;

/// A non-fatal diagnostic raised while decoding or validating a block field.
///
/// Warnings are pushed into the `Vec<Warning>` sink the caller hands to
/// [`decode`](crate::StlFile::decode) and
/// [`validate`](crate::StlFile::validate); they survive a subsequent fatal
/// error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{context}: {kind}")]
pub struct Warning {
    /// The block and field the diagnostic was raised for
    pub context: FieldRef,
    /// What went wrong
    pub kind: WarningKind,
}

impl Warning {
    pub(crate) fn gsi(field: GsiField, err: ValueError) -> Self {
        Warning {
            context: FieldRef::Gsi(field),
            kind: WarningKind::Decode(err),
        }
    }

    pub(crate) fn gsi_rule(field: GsiField, err: RuleError) -> Self {
        Warning {
            context: FieldRef::Gsi(field),
            kind: WarningKind::Rule(err),
        }
    }

    pub(crate) fn tti_rule(block: usize, field: TtiField, err: RuleError) -> Self {
        Warning {
            context: FieldRef::Tti { block, field },
            kind: WarningKind::Rule(err),
        }
    }
}

/// Location of a diagnostic: which block and field it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    /// A field of the GSI block
    Gsi(GsiField),
    /// A field of the TTI block at `block` (0-based position in the file)
    Tti { block: usize, field: TtiField },
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Gsi(field) => write!(f, "GSI {field}"),
            FieldRef::Tti { block, field } => write!(f, "TTI block {block} {field}"),
        }
    }
}

/// Payload of a [`Warning`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// The field's bytes could not be decoded from their wire form
    #[error(transparent)]
    Decode(ValueError),

    /// The field decoded fine but violates a format rule
    #[error(transparent)]
    Rule(RuleError),
}

/// A field value that could not be decoded from, or encoded to, its wire
/// form. Carries the offending input bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (input: {input:02X?})")]
pub struct ValueError {
    pub kind: ValueKind,
    pub input: Box<[u8]>,
}

impl ValueError {
    pub(crate) fn new(kind: ValueKind, input: &[u8]) -> Self {
        ValueError {
            kind,
            input: input.into(),
        }
    }
}

/// The ways a fixed-width field value can fail to decode or encode.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    #[error("empty integer value")]
    EmptyInt,
    #[error("invalid integer value")]
    InvalidInt,
    #[error("empty byte value")]
    EmptyByte,
    #[error("invalid byte value")]
    InvalidByte,
    #[error("empty hex value")]
    EmptyHex,
    #[error("invalid hex value")]
    InvalidHex,
    #[error("invalid date value")]
    InvalidDate,
    #[error("empty timecode value")]
    EmptyTimecode,
    #[error("invalid timecode value")]
    InvalidTimecode,
    #[error("invalid string value")]
    InvalidString,
    #[error("unsupported code page")]
    UnsupportedCodePage,
    #[error("unsupported character code table")]
    UnsupportedTable,
}

/// A format rule violation found by the validator.
///
/// `fatal` mirrors the severity the rule carries in the format: fatal
/// violations are returned as [`Error`] and stop validation of the current
/// section, the rest accumulate as warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleError {
    pub rule: Rule,
    /// Constraint description, e.g. `must be in range [0;99]`
    pub detail: Option<String>,
    /// Display form of the offending value
    pub value: String,
    pub fatal: bool,
}

impl RuleError {
    pub(crate) fn new(rule: Rule, value: impl fmt::Display, fatal: bool) -> Self {
        RuleError {
            rule,
            detail: None,
            value: value.to_string(),
            fatal,
        }
    }

    pub(crate) fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fatal {
            write!(f, "fatal: ")?;
        }
        write!(f, "{}", self.rule)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        write!(f, " (value: {})", self.value)
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.rule)
    }
}

/// The format rules the validator can report against.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    // GSI field rules
    #[error("unsupported CPN")]
    UnsupportedCpn,
    #[error("unsupported DFC")]
    UnsupportedDfc,
    #[error("unsupported DSC")]
    UnsupportedDsc,
    #[error("unsupported CCT")]
    UnsupportedCct,
    #[error("unsupported LC")]
    UnsupportedLc,
    #[error("empty OPT")]
    EmptyOpt,
    #[error("empty OET")]
    EmptyOet,
    #[error("empty TPT")]
    EmptyTpt,
    #[error("empty TET")]
    EmptyTet,
    #[error("empty TN")]
    EmptyTn,
    #[error("empty TCD")]
    EmptyTcd,
    #[error("empty SLR")]
    EmptySlr,
    #[error("empty CD")]
    EmptyCd,
    #[error("empty RD")]
    EmptyRd,
    #[error("CD greater than RD")]
    CdAfterRd,
    #[error("unsupported RN")]
    UnsupportedRn,
    #[error("unsupported TNB")]
    UnsupportedTnb,
    #[error("unsupported TNS")]
    UnsupportedTns,
    #[error("unsupported TNG")]
    UnsupportedTng,
    #[error("unsupported MNC")]
    UnsupportedMnc,
    #[error("unsupported MNR (teletext)")]
    UnsupportedMnrTeletext,
    #[error("unsupported MNR (open subtitling)")]
    UnsupportedMnrOpenSubtitling,
    #[error("unsupported TCS")]
    UnsupportedTcs,
    #[error("invalid TCP")]
    InvalidTcp,
    #[error("invalid TCF")]
    InvalidTcf,
    #[error("TCP greater than TCF")]
    TcpAfterTcf,
    #[error("unsupported TND")]
    UnsupportedTnd,
    #[error("unsupported DSN")]
    UnsupportedDsn,
    #[error("empty CO")]
    EmptyCo,
    #[error("empty PUB")]
    EmptyPub,
    #[error("empty EN")]
    EmptyEn,
    #[error("empty ECD")]
    EmptyEcd,

    // TTI field rules
    #[error("closing block text not terminated by unused-space filler")]
    ClosingTextNotTerminated,
    #[error("EBN in reserved range")]
    ReservedEbn,
    #[error("unsupported CS")]
    UnsupportedCs,
    #[error("invalid TCI")]
    InvalidTci,
    #[error("invalid TCO")]
    InvalidTco,
    #[error("invalid TCI/TCO order")]
    TciNotBeforeTco,
    #[error("unsupported VP (teletext)")]
    UnsupportedVpTeletext,
    #[error("unsupported VP (open subtitling)")]
    UnsupportedVpOpenSubtitling,
    #[error("unsupported JC")]
    UnsupportedJc,
    #[error("unsupported CF")]
    UnsupportedCf,

    // cross-block sequencing rules
    #[error("EBN not consecutive")]
    EbnNotConsecutive,
    #[error("SN not consecutive")]
    SnNotConsecutive,
    #[error("SGN not consecutive")]
    SgnNotConsecutive,
    #[error("no first subtitle in new group")]
    NoFirstSubtitleInNewGroup,
    #[error("non closing EBN for last subtitle")]
    NonClosingEbn,
    #[error("CS not none or first")]
    CsNotNoneOrFirst,
    #[error("CS not intermediate or last")]
    CsNotIntermediateOrLast,
    #[error("CS not none or last")]
    CsNotNoneOrLast,

    // whole-file count reconciliation
    #[error("TTI blocks count mismatch")]
    TtiCountMismatch,
    #[error("subtitle count mismatch")]
    SubtitleCountMismatch,
    #[error("group count mismatch")]
    GroupCountMismatch,
}

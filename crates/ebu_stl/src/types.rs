//! Wire-level enumerations shared by the GSI and TTI blocks.
//!
//! Every enum keeps unrecognized raw values in an `Other` variant so that a
//! decode → encode round trip reproduces the input byte-for-byte even when
//! the value is outside the format's tables. `is_supported` answers whether
//! the value is one the format defines; the validator reports the rest.

use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Code page used for the textual fields of the GSI block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CodePage {
    #[display("United States")]
    UnitedStates,
    #[display("Multilingual")]
    Multilingual,
    #[display("Portugal")]
    Portugal,
    #[display("Canadian/French")]
    CanadianFrench,
    #[display("Nordic")]
    Nordic,
    #[display("code page {_0}")]
    Other(u16),
}

impl CodePage {
    pub fn from_number(number: u16) -> Self {
        match number {
            437 => CodePage::UnitedStates,
            850 => CodePage::Multilingual,
            860 => CodePage::Portugal,
            863 => CodePage::CanadianFrench,
            865 => CodePage::Nordic,
            other => CodePage::Other(other),
        }
    }

    pub fn number(self) -> u16 {
        match self {
            CodePage::UnitedStates => 437,
            CodePage::Multilingual => 850,
            CodePage::Portugal => 860,
            CodePage::CanadianFrench => 863,
            CodePage::Nordic => 865,
            CodePage::Other(number) => number,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, CodePage::Other(_))
    }
}

/// Disk format code, an eight-character string carrying the framerate.
///
/// Only `STL25.01` (25 fps) and `STL30.01` (30 fps) are defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiskFormatCode {
    /// `STL25.01`, 25 fps
    Stl25,
    /// `STL30.01`, 30 fps
    Stl30,
    /// Unrecognized code, kept verbatim
    Other(Box<str>),
}

impl DiskFormatCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "STL25.01" => DiskFormatCode::Stl25,
            "STL30.01" => DiskFormatCode::Stl30,
            other => DiskFormatCode::Other(other.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DiskFormatCode::Stl25 => "STL25.01",
            DiskFormatCode::Stl30 => "STL30.01",
            DiskFormatCode::Other(code) => code,
        }
    }

    /// The framerate the code stands for, `None` when unsupported.
    pub fn framerate(&self) -> Option<u32> {
        match self {
            DiskFormatCode::Stl25 => Some(25),
            DiskFormatCode::Stl30 => Some(30),
            DiskFormatCode::Other(_) => None,
        }
    }
}

impl std::fmt::Display for DiskFormatCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display standard code: how the subtitles are meant to be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayStandardCode {
    #[display("Open Subtitling")]
    OpenSubtitling,
    #[display("Level-1 Teletext")]
    Level1Teletext,
    #[display("Level-2 Teletext")]
    Level2Teletext,
    #[display("display standard {_0}")]
    Other(u8),
}

impl DisplayStandardCode {
    pub fn from_value(value: u8) -> Self {
        match value {
            0 => DisplayStandardCode::OpenSubtitling,
            1 => DisplayStandardCode::Level1Teletext,
            2 => DisplayStandardCode::Level2Teletext,
            other => DisplayStandardCode::Other(other),
        }
    }

    pub fn value(self) -> u8 {
        match self {
            DisplayStandardCode::OpenSubtitling => 0,
            DisplayStandardCode::Level1Teletext => 1,
            DisplayStandardCode::Level2Teletext => 2,
            DisplayStandardCode::Other(value) => value,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, DisplayStandardCode::Other(_))
    }

    pub fn is_teletext(self) -> bool {
        matches!(
            self,
            DisplayStandardCode::Level1Teletext | DisplayStandardCode::Level2Teletext
        )
    }
}

/// Character code table used for the text field of the TTI blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CharacterCodeTable {
    #[display("Latin")]
    Latin,
    #[display("Latin/Cyrillic")]
    LatinCyrillic,
    #[display("Latin/Arabic")]
    LatinArabic,
    #[display("Latin/Greek")]
    LatinGreek,
    #[display("Latin/Hebrew")]
    LatinHebrew,
    #[display("character code table {_0}")]
    Other(u8),
}

impl CharacterCodeTable {
    pub fn from_value(value: u8) -> Self {
        match value {
            0 => CharacterCodeTable::Latin,
            1 => CharacterCodeTable::LatinCyrillic,
            2 => CharacterCodeTable::LatinArabic,
            3 => CharacterCodeTable::LatinGreek,
            4 => CharacterCodeTable::LatinHebrew,
            other => CharacterCodeTable::Other(other),
        }
    }

    pub fn value(self) -> u8 {
        match self {
            CharacterCodeTable::Latin => 0,
            CharacterCodeTable::LatinCyrillic => 1,
            CharacterCodeTable::LatinArabic => 2,
            CharacterCodeTable::LatinGreek => 3,
            CharacterCodeTable::LatinHebrew => 4,
            CharacterCodeTable::Other(value) => value,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, CharacterCodeTable::Other(_))
    }
}

/// Language the subtitle list is prepared for, as a raw table value.
///
/// The table is sparse; [`name`](LanguageCode::name) resolves the values the
/// format defines and returns `None` for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LanguageCode(pub u8);

impl LanguageCode {
    pub const UNKNOWN: LanguageCode = LanguageCode(0x00);

    pub fn is_known(self) -> bool {
        self.name().is_some()
    }

    pub fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            0x00 => "Unknown/not applicable",
            0x01 => "Albanian",
            0x02 => "Breton",
            0x03 => "Catalan",
            0x04 => "Croatian",
            0x05 => "Welsh",
            0x06 => "Czech",
            0x07 => "Danish",
            0x08 => "German",
            0x09 => "English",
            0x0A => "Spanish",
            0x0B => "Esperanto",
            0x0C => "Estonian",
            0x0D => "Basque",
            0x0E => "Faroese",
            0x0F => "French",
            0x10 => "Frisian",
            0x11 => "Irish",
            0x12 => "Gaelic",
            0x13 => "Galician",
            0x14 => "Icelandic",
            0x15 => "Italian",
            0x16 => "Lappish",
            0x17 => "Latin",
            0x18 => "Latvian",
            0x19 => "Luxembourgian",
            0x1A => "Lithuanian",
            0x1B => "Hungarian",
            0x1C => "Maltese",
            0x1D => "Dutch",
            0x1E => "Norwegian",
            0x1F => "Occitan",
            0x20 => "Polish",
            0x21 => "Portugese",
            0x22 => "Romanian",
            0x23 => "Romansh",
            0x24 => "Serbian",
            0x25 => "Slovak",
            0x26 => "Slovenian",
            0x27 => "Finnish",
            0x28 => "Swedish",
            0x29 => "Turkish",
            0x2A => "Flemish",
            0x2B => "Wallon",
            0x45 => "Zulu",
            0x46 => "Vietnamese",
            0x47 => "Uzbek",
            0x48 => "Urdu",
            0x49 => "Ukrainian",
            0x4A => "Thai",
            0x4B => "Telugu",
            0x4C => "Tatar",
            0x4D => "Tamil",
            0x4E => "Tadzhik",
            0x4F => "Swahili",
            0x50 => "Sranan Tongo",
            0x51 => "Somali",
            0x52 => "Sinhalese",
            0x53 => "Shona",
            0x54 => "Serbo-croat",
            0x55 => "Ruthenian",
            0x56 => "Russian",
            0x57 => "Quechua",
            0x58 => "Pushtu",
            0x59 => "Punjabi",
            0x5A => "Persian",
            0x5B => "Papamiento",
            0x5C => "Oriya",
            0x5D => "Nepali",
            0x5E => "Ndebele",
            0x5F => "Marathi",
            0x60 => "Moldavian",
            0x61 => "Malaysian",
            0x62 => "Malagasay",
            0x63 => "Macedonian",
            0x64 => "Laotian",
            0x65 => "Korean",
            0x66 => "Khmer",
            0x67 => "Kazakh",
            0x68 => "Kannada",
            0x69 => "Japanese",
            0x6A => "Indonesian",
            0x6B => "Hindi",
            0x6C => "Hebrew",
            0x6D => "Hausa",
            0x6E => "Gurani",
            0x6F => "Gujurati",
            0x70 => "Greek",
            0x71 => "Georgian",
            0x72 => "Fulani",
            0x73 => "Dari",
            0x74 => "Churash",
            0x75 => "Chinese",
            0x76 => "Burmese",
            0x77 => "Bulgarian",
            0x78 => "Bengali",
            0x79 => "Bielorussian",
            0x7A => "Bambora",
            0x7B => "Azerbaijani",
            0x7C => "Assamese",
            0x7D => "Armenian",
            0x7E => "Arabic",
            0x7F => "Amharic",
            _ => return None,
        })
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "language 0x{:02X}", self.0),
        }
    }
}

/// Whether the timecode information of the file is intended for use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeCodeStatus {
    #[display("Not intended for use")]
    NotIntendedForUse,
    #[display("Intended for use")]
    IntendedForUse,
    #[display("time code status {_0}")]
    Other(u8),
}

impl TimeCodeStatus {
    pub fn from_value(value: u8) -> Self {
        match value {
            0 => TimeCodeStatus::NotIntendedForUse,
            1 => TimeCodeStatus::IntendedForUse,
            other => TimeCodeStatus::Other(other),
        }
    }

    pub fn value(self) -> u8 {
        match self {
            TimeCodeStatus::NotIntendedForUse => 0,
            TimeCodeStatus::IntendedForUse => 1,
            TimeCodeStatus::Other(value) => value,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, TimeCodeStatus::Other(_))
    }
}

/// Marks a subtitle as standalone or part of a cumulative set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CumulativeStatus {
    #[default]
    #[display("None")]
    None,
    #[display("First")]
    First,
    #[display("Intermediate")]
    Intermediate,
    #[display("Last")]
    Last,
    #[display("cumulative status {_0}")]
    Other(u8),
}

impl CumulativeStatus {
    pub fn from_value(value: u8) -> Self {
        match value {
            0 => CumulativeStatus::None,
            1 => CumulativeStatus::First,
            2 => CumulativeStatus::Intermediate,
            3 => CumulativeStatus::Last,
            other => CumulativeStatus::Other(other),
        }
    }

    pub fn value(self) -> u8 {
        match self {
            CumulativeStatus::None => 0,
            CumulativeStatus::First => 1,
            CumulativeStatus::Intermediate => 2,
            CumulativeStatus::Last => 3,
            CumulativeStatus::Other(value) => value,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, CumulativeStatus::Other(_))
    }
}

/// Horizontal alignment of the displayed subtitle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Justification {
    #[default]
    #[display("Unchanged presentation")]
    Unchanged,
    #[display("Left-justified text")]
    Left,
    #[display("Centered text")]
    Centered,
    #[display("Right-justified text")]
    Right,
    #[display("justification {_0}")]
    Other(u8),
}

impl Justification {
    pub fn from_value(value: u8) -> Self {
        match value {
            0 => Justification::Unchanged,
            1 => Justification::Left,
            2 => Justification::Centered,
            3 => Justification::Right,
            other => Justification::Other(other),
        }
    }

    pub fn value(self) -> u8 {
        match self {
            Justification::Unchanged => 0,
            Justification::Left => 1,
            Justification::Centered => 2,
            Justification::Right => 3,
            Justification::Other(value) => value,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, Justification::Other(_))
    }
}

/// Distinguishes subtitle data from translator's comments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommentFlag {
    #[default]
    #[display("Subtitle data")]
    SubtitleData,
    #[display("Translator's comments")]
    TranslatorComments,
    #[display("comment flag {_0}")]
    Other(u8),
}

impl CommentFlag {
    pub fn from_value(value: u8) -> Self {
        match value {
            0 => CommentFlag::SubtitleData,
            1 => CommentFlag::TranslatorComments,
            other => CommentFlag::Other(other),
        }
    }

    pub fn value(self) -> u8 {
        match self {
            CommentFlag::SubtitleData => 0,
            CommentFlag::TranslatorComments => 1,
            CommentFlag::Other(value) => value,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, CommentFlag::Other(_))
    }
}

/// Control codes that may appear inside a TTI text field.
pub mod control {
    pub const ITALIC_ON: u8 = 0x80;
    pub const ITALIC_OFF: u8 = 0x81;
    pub const UNDERLINE_ON: u8 = 0x82;
    pub const UNDERLINE_OFF: u8 = 0x83;
    pub const BOXING_ON: u8 = 0x84;
    pub const BOXING_OFF: u8 = 0x85;
    pub const LINE_BREAK: u8 = 0x8A;
    /// Fills the unused tail of the 112-byte text field.
    pub const UNUSED_SPACE: u8 = 0x8F;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn code_page_numbers_round_trip() {
        for n in [437u16, 850, 860, 863, 865, 1252] {
            assert_eq!(CodePage::from_number(n).number(), n);
        }
        assert!(!CodePage::from_number(1252).is_supported());
    }

    #[test]
    fn disk_format_framerates() {
        assert_eq!(DiskFormatCode::from_code("STL25.01").framerate(), Some(25));
        assert_eq!(DiskFormatCode::from_code("STL30.01").framerate(), Some(30));
        assert_eq!(DiskFormatCode::from_code("STL24.01").framerate(), None);
        assert_eq!(DiskFormatCode::from_code("").framerate(), None);
    }

    #[test]
    fn language_names() {
        assert_eq!(LanguageCode(0x0F).name(), Some("French"));
        assert_eq!(LanguageCode(0x7F).name(), Some("Amharic"));
        assert_eq!(LanguageCode(0x30).name(), None);
        assert!(LanguageCode::UNKNOWN.is_known());
    }

    #[test]
    fn raw_enum_values_survive() {
        assert_eq!(CumulativeStatus::from_value(7).value(), 7);
        assert_eq!(Justification::from_value(9).value(), 9);
        assert_eq!(DisplayStandardCode::from_value(5).value(), 5);
    }
}

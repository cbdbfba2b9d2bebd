//! Field-level and cross-block validation.
//!
//! Validation is layered: pure field checks shared by both blocks, per-block
//! rule sets, and a single left-to-right scan over the TTI sequence that
//! carries the previous block's numbering and cumulative status to enforce
//! the sequencing rules. Nothing here mutates a block; running validation
//! twice over the same file yields the same warnings in the same order.

use std::fmt;

use tracing::instrument;

use crate::error::{Error, Result, Rule, RuleError, Warning};
use crate::file::StlFile;
use crate::gsi::{GsiBlock, GsiField};
use crate::timecode::Timecode;
use crate::tti::{TtiBlock, TtiField, EBN_LAST};
use crate::types::{CumulativeStatus, DisplayStandardCode, LanguageCode};

fn disp<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "blank".to_string(),
    }
}

fn supported(ok: bool, rule: Rule, value: String, fatal: bool) -> Option<RuleError> {
    if ok {
        None
    } else {
        Some(RuleError::new(rule, value, fatal))
    }
}

fn range(value: i64, min: i64, max: i64, rule: Rule, fatal: bool) -> Option<RuleError> {
    if (min..=max).contains(&value) {
        None
    } else {
        Some(RuleError::new(rule, value, fatal).with_detail(format!("must be in range [{min};{max}]")))
    }
}

fn int_range(value: Option<u32>, min: u32, max: u32, rule: Rule, fatal: bool) -> Option<RuleError> {
    match value {
        Some(v) if (min..=max).contains(&v) => None,
        other => Some(
            RuleError::new(rule, disp(&other), fatal)
                .with_detail(format!("must be in range [{min};{max}]")),
        ),
    }
}

fn not_in_range(value: i64, min: i64, max: i64, rule: Rule, fatal: bool) -> Option<RuleError> {
    if (min..=max).contains(&value) {
        Some(
            RuleError::new(rule, value, fatal)
                .with_detail(format!("must not be in range [{min};{max}]")),
        )
    } else {
        None
    }
}

fn non_empty(value: &str, rule: Rule, fatal: bool) -> Option<RuleError> {
    if value.is_empty() {
        Some(RuleError::new(rule, "\"\"", fatal))
    } else {
        None
    }
}

fn timecode_valid(tc: Timecode, framerate: u32, rule: Rule, fatal: bool) -> Option<RuleError> {
    if tc.is_valid(framerate) {
        None
    } else {
        Some(RuleError::new(rule, tc, fatal).with_detail(format!("at {framerate} fps")))
    }
}

/// `first` must not come after `second`.
fn timecode_order(
    first: Timecode,
    second: Timecode,
    framerate: u32,
    rule: Rule,
    fatal: bool,
) -> Option<RuleError> {
    if first.to_frames(framerate) > second.to_frames(framerate) {
        Some(RuleError::new(rule, first, fatal).with_detail(format!("{first} > {second}")))
    } else {
        None
    }
}

/// `first` must come strictly before `second`.
fn timecode_order_strict(
    first: Timecode,
    second: Timecode,
    framerate: u32,
    rule: Rule,
    fatal: bool,
) -> Option<RuleError> {
    if first.to_frames(framerate) >= second.to_frames(framerate) {
        Some(RuleError::new(rule, first, fatal).with_detail(format!("{first} >= {second}")))
    } else {
        None
    }
}

/// Route a violation: fatal ones abort the current section, the rest join
/// the warning sink.
fn gsi_gate(
    warnings: &mut Vec<Warning>,
    field: GsiField,
    violation: Option<RuleError>,
) -> Result<()> {
    match violation {
        Some(e) if e.fatal => Err(Error::GsiInvalid { field, source: e }),
        Some(e) => {
            warnings.push(Warning::gsi_rule(field, e));
            Ok(())
        }
        None => Ok(()),
    }
}

fn tti_gate(
    warnings: &mut Vec<Warning>,
    block: usize,
    field: TtiField,
    violation: Option<RuleError>,
) -> Result<()> {
    match violation {
        Some(e) if e.fatal => Err(Error::TtiInvalid {
            block,
            field,
            source: e,
        }),
        Some(e) => {
            warnings.push(Warning::tti_rule(block, field, e));
            Ok(())
        }
        None => Ok(()),
    }
}

impl GsiBlock {
    /// Check every GSI field against the format's rules.
    ///
    /// Most violations are warnings; an unsupported disk format code is
    /// fatal since nothing framerate-dependent can be checked without it.
    #[instrument(skip_all, err)]
    pub fn validate(&self, warnings: &mut Vec<Warning>) -> Result<()> {
        use GsiField::*;
        use Rule::*;

        gsi_gate(
            warnings,
            Cpn,
            supported(
                self.code_page.is_some_and(|p| p.is_supported()),
                UnsupportedCpn,
                disp(&self.code_page),
                false,
            ),
        )?;
        gsi_gate(
            warnings,
            Dfc,
            supported(
                self.framerate().is_some(),
                UnsupportedDfc,
                disp(&self.disk_format),
                true,
            ),
        )?;
        // a blank display standard is allowed
        gsi_gate(
            warnings,
            Dsc,
            supported(
                self.display_standard.map_or(true, |d| d.is_supported()),
                UnsupportedDsc,
                disp(&self.display_standard),
                false,
            ),
        )?;
        gsi_gate(
            warnings,
            Cct,
            supported(
                self.character_table.is_some_and(|t| t.is_supported()),
                UnsupportedCct,
                disp(&self.character_table),
                false,
            ),
        )?;
        gsi_gate(
            warnings,
            Lc,
            supported(
                self.language.is_some_and(LanguageCode::is_known),
                UnsupportedLc,
                disp(&self.language),
                false,
            ),
        )?;

        gsi_gate(warnings, Opt, non_empty(&self.original_program_title, EmptyOpt, false))?;
        gsi_gate(warnings, Oet, non_empty(&self.original_episode_title, EmptyOet, false))?;
        gsi_gate(warnings, Tpt, non_empty(&self.translated_program_title, EmptyTpt, false))?;
        gsi_gate(warnings, Tet, non_empty(&self.translated_episode_title, EmptyTet, false))?;
        gsi_gate(warnings, Tn, non_empty(&self.translator_name, EmptyTn, false))?;
        gsi_gate(warnings, Tcd, non_empty(&self.translator_contact, EmptyTcd, false))?;
        gsi_gate(warnings, Slr, non_empty(&self.subtitle_list_ref, EmptySlr, false))?;

        gsi_gate(
            warnings,
            Cd,
            supported(self.creation_date.is_some(), EmptyCd, disp(&self.creation_date), false),
        )?;
        gsi_gate(
            warnings,
            Rd,
            supported(self.revision_date.is_some(), EmptyRd, disp(&self.revision_date), false),
        )?;
        if let (Some(cd), Some(rd)) = (self.creation_date, self.revision_date) {
            gsi_gate(
                warnings,
                Cd,
                supported(cd <= rd, CdAfterRd, format!("{cd} > {rd}"), false),
            )?;
        }

        gsi_gate(warnings, Rn, int_range(self.revision_number, 0, 99, UnsupportedRn, false))?;
        gsi_gate(warnings, Tnb, int_range(self.tti_blocks, 1, 99999, UnsupportedTnb, false))?;
        gsi_gate(warnings, Tns, int_range(self.subtitles, 1, 99999, UnsupportedTns, false))?;
        gsi_gate(warnings, Tng, int_range(self.subtitle_groups, 1, 999, UnsupportedTng, false))?;
        gsi_gate(warnings, Mnc, int_range(self.max_row_chars, 1, 99, UnsupportedMnc, false))?;
        match self.display_standard {
            Some(dsc) if dsc.is_teletext() => {
                gsi_gate(
                    warnings,
                    Mnr,
                    int_range(self.max_rows, 1, 23, UnsupportedMnrTeletext, false),
                )?;
            }
            Some(DisplayStandardCode::OpenSubtitling) => {
                gsi_gate(
                    warnings,
                    Mnr,
                    int_range(self.max_rows, 1, 99, UnsupportedMnrOpenSubtitling, false),
                )?;
            }
            _ => {}
        }

        gsi_gate(
            warnings,
            Tcs,
            supported(
                self.timecode_status.is_some_and(|t| t.is_supported()),
                UnsupportedTcs,
                disp(&self.timecode_status),
                false,
            ),
        )?;

        let framerate = self.framerate().ok_or(Error::UnsupportedFramerate)?;
        gsi_gate(
            warnings,
            Tcp,
            timecode_valid(self.start_of_program, framerate, InvalidTcp, false),
        )?;
        gsi_gate(
            warnings,
            Tcf,
            timecode_valid(self.first_in_cue, framerate, InvalidTcf, false),
        )?;
        gsi_gate(
            warnings,
            Tcp,
            timecode_order(self.start_of_program, self.first_in_cue, framerate, TcpAfterTcf, false),
        )?;

        gsi_gate(warnings, Tnd, int_range(self.disks, 1, 9, UnsupportedTnd, false))?;
        gsi_gate(
            warnings,
            Dsn,
            int_range(self.disk_sequence, 1, self.disks.unwrap_or(9), UnsupportedDsn, false),
        )?;

        gsi_gate(warnings, Co, non_empty(&self.country_of_origin, EmptyCo, false))?;
        gsi_gate(warnings, Pub, non_empty(&self.publisher, EmptyPub, false))?;
        gsi_gate(warnings, En, non_empty(&self.editor_name, EmptyEn, false))?;
        gsi_gate(warnings, Ecd, non_empty(&self.editor_contact, EmptyEcd, false))?;

        Ok(())
    }
}

impl TtiBlock {
    /// Check one TTI block's fields.
    ///
    /// `display_standard` and `max_rows` come from the GSI block; they pick
    /// the vertical-position rule. Malformed timecodes and an unusable
    /// display standard are fatal, everything else is a warning.
    pub fn validate(
        &self,
        framerate: u32,
        display_standard: Option<DisplayStandardCode>,
        max_rows: Option<u32>,
        block: usize,
        warnings: &mut Vec<Warning>,
    ) -> Result<()> {
        use Rule::*;
        use TtiField::*;

        // the text of a closing block must end in unused-space filler
        if self.extension_block == EBN_LAST && !self.padded {
            tti_gate(
                warnings,
                block,
                Ebn,
                Some(RuleError::new(ClosingTextNotTerminated, self.extension_block, false)),
            )?;
        }
        tti_gate(
            warnings,
            block,
            Ebn,
            not_in_range(i64::from(self.extension_block), 0xF0, 0xFD, ReservedEbn, false),
        )?;
        tti_gate(
            warnings,
            block,
            Cs,
            supported(
                self.cumulative.is_supported(),
                UnsupportedCs,
                self.cumulative.to_string(),
                false,
            ),
        )?;
        tti_gate(
            warnings,
            block,
            Tci,
            timecode_valid(self.time_in, framerate, InvalidTci, true),
        )?;
        tti_gate(
            warnings,
            block,
            Tco,
            timecode_valid(self.time_out, framerate, InvalidTco, true),
        )?;
        tti_gate(
            warnings,
            block,
            Tco,
            timecode_order_strict(self.time_in, self.time_out, framerate, TciNotBeforeTco, true),
        )?;

        match display_standard {
            Some(dsc) if dsc.is_teletext() => {
                tti_gate(
                    warnings,
                    block,
                    Vp,
                    range(
                        i64::from(self.vertical_position),
                        1,
                        23,
                        UnsupportedVpTeletext,
                        false,
                    ),
                )?;
            }
            Some(DisplayStandardCode::OpenSubtitling) => {
                tti_gate(
                    warnings,
                    block,
                    Vp,
                    range(
                        i64::from(self.vertical_position),
                        0,
                        i64::from(max_rows.unwrap_or(99)),
                        UnsupportedVpOpenSubtitling,
                        false,
                    ),
                )?;
            }
            other => {
                tti_gate(
                    warnings,
                    block,
                    Vp,
                    Some(RuleError::new(UnsupportedDsc, disp(&other), true)),
                )?;
            }
        }

        tti_gate(
            warnings,
            block,
            Jc,
            supported(
                self.justification.is_supported(),
                UnsupportedJc,
                self.justification.to_string(),
                false,
            ),
        )?;
        tti_gate(
            warnings,
            block,
            Cf,
            supported(
                self.comment.is_supported(),
                UnsupportedCf,
                self.comment.to_string(),
                false,
            ),
        )?;

        Ok(())
    }
}

impl StlFile {
    /// Validate the whole file: the GSI block, every TTI block, the
    /// cross-block sequencing rules, and the declared totals.
    ///
    /// Warnings accumulate in `warnings` and survive a fatal error. The
    /// scan carries the previous block's subtitle number, group number,
    /// extension block number and cumulative status; each block is
    /// classified as a continuation of the same subtitle, a new subtitle in
    /// the same group, or a new group, and checked against the rules of
    /// that transition.
    #[instrument(skip_all, err)]
    pub fn validate(&self, warnings: &mut Vec<Warning>) -> Result<()> {
        use Rule::*;

        self.gsi.validate(warnings)?;

        if self.tti.is_empty() {
            return Err(Error::NoTtiBlocks);
        }
        let framerate = self.gsi.framerate().ok_or(Error::UnsupportedFramerate)?;

        if self.gsi.first_in_cue != self.tti[0].time_in {
            return Err(Error::FirstCueMismatch {
                tcf: self.gsi.first_in_cue,
                tci: self.tti[0].time_in,
            });
        }

        let mut subtitles: u32 = 0;
        // the first block opens the first group
        let mut groups: u32 = 1;
        let mut last_sn: Option<u16> = None;
        let mut last_sgn: u8 = self.tti[0].group;
        let mut last_ebn: u8 = EBN_LAST;
        let mut last_cs = CumulativeStatus::None;

        for (i, tti) in self.tti.iter().enumerate() {
            tti.validate(
                framerate,
                self.gsi.display_standard,
                self.gsi.max_rows,
                i,
                warnings,
            )?;

            let same_group = tti.group == last_sgn;
            let same_subtitle = same_group && Some(tti.number) == last_sn;

            if same_subtitle {
                // continuation: the extension block number must advance by one
                if u16::from(tti.extension_block) != u16::from(last_ebn) + 1 {
                    warnings.push(Warning::tti_rule(
                        i,
                        TtiField::Ebn,
                        RuleError::new(EbnNotConsecutive, tti.extension_block, false),
                    ));
                }
            } else {
                subtitles += 1;
            }

            if !same_subtitle && same_group {
                // new subtitle within the group
                let expected = last_sn.map_or(0, |sn| u32::from(sn) + 1);
                if u32::from(tti.number) != expected {
                    warnings.push(Warning::tti_rule(
                        i,
                        TtiField::Sn,
                        RuleError::new(SnNotConsecutive, tti.number, false),
                    ));
                }
                if last_ebn != EBN_LAST {
                    warnings.push(Warning::tti_rule(
                        i,
                        TtiField::Ebn,
                        RuleError::new(NonClosingEbn, last_ebn, false),
                    ));
                }
                match last_cs {
                    CumulativeStatus::None => {
                        if !matches!(
                            tti.cumulative,
                            CumulativeStatus::None | CumulativeStatus::First
                        ) {
                            warnings.push(Warning::tti_rule(
                                i,
                                TtiField::Cs,
                                RuleError::new(CsNotNoneOrFirst, tti.cumulative, false),
                            ));
                        }
                    }
                    CumulativeStatus::First | CumulativeStatus::Intermediate => {
                        if !matches!(
                            tti.cumulative,
                            CumulativeStatus::Intermediate | CumulativeStatus::Last
                        ) {
                            warnings.push(Warning::tti_rule(
                                i,
                                TtiField::Cs,
                                RuleError::new(CsNotIntermediateOrLast, tti.cumulative, false),
                            ));
                        }
                    }
                    CumulativeStatus::Last => {
                        if !matches!(
                            tti.cumulative,
                            CumulativeStatus::None | CumulativeStatus::Last
                        ) {
                            warnings.push(Warning::tti_rule(
                                i,
                                TtiField::Cs,
                                RuleError::new(CsNotNoneOrLast, tti.cumulative, false),
                            ));
                        }
                    }
                    // an out-of-table status was already reported by the block check
                    CumulativeStatus::Other(_) => {}
                }
            }

            if !same_group {
                // new group
                if u16::from(tti.group) != u16::from(last_sgn) + 1 {
                    warnings.push(Warning::tti_rule(
                        i,
                        TtiField::Sgn,
                        RuleError::new(SgnNotConsecutive, tti.group, false),
                    ));
                }
                if tti.number != 0 {
                    warnings.push(Warning::tti_rule(
                        i,
                        TtiField::Sn,
                        RuleError::new(NoFirstSubtitleInNewGroup, tti.number, false),
                    ));
                }
                if last_ebn != EBN_LAST {
                    warnings.push(Warning::tti_rule(
                        i,
                        TtiField::Ebn,
                        RuleError::new(NonClosingEbn, last_ebn, false),
                    ));
                }
                if !matches!(
                    tti.cumulative,
                    CumulativeStatus::None | CumulativeStatus::Last
                ) {
                    warnings.push(Warning::tti_rule(
                        i,
                        TtiField::Cs,
                        RuleError::new(CsNotNoneOrLast, tti.cumulative, false),
                    ));
                }
                groups += 1;
            }

            last_ebn = tti.extension_block;
            last_sn = Some(tti.number);
            last_sgn = tti.group;
            last_cs = tti.cumulative;
        }

        // reconcile the declared totals with what the scan saw
        if self.gsi.tti_blocks != Some(self.tti.len() as u32) {
            warnings.push(Warning::gsi_rule(
                GsiField::Tnb,
                RuleError::new(TtiCountMismatch, disp(&self.gsi.tti_blocks), false)
                    .with_detail(format!("{} blocks decoded", self.tti.len())),
            ));
        }
        if self.gsi.subtitles != Some(subtitles) {
            warnings.push(Warning::gsi_rule(
                GsiField::Tns,
                RuleError::new(SubtitleCountMismatch, disp(&self.gsi.subtitles), false)
                    .with_detail(format!("{subtitles} subtitles counted")),
            ));
        }
        if self.gsi.subtitle_groups != Some(groups) {
            warnings.push(Warning::gsi_rule(
                GsiField::Tng,
                RuleError::new(GroupCountMismatch, disp(&self.gsi.subtitle_groups), false)
                    .with_detail(format!("{groups} groups counted")),
            ));
        }

        Ok(())
    }
}

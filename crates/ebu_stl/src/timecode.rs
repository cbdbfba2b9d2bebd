//! Timecode value type

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A temporal position expressed as hours, minutes, seconds and frames.
///
/// The frame component counts at the file's framerate (25 or 30 fps), so
/// conversions to and from absolute frame counts take the framerate as an
/// argument.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timecode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
}

impl Timecode {
    pub const fn new(hours: u8, minutes: u8, seconds: u8, frames: u8) -> Self {
        Timecode {
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    /// Total number of frames since 00:00:00:00 at `framerate` fps.
    pub fn to_frames(self, framerate: u32) -> u32 {
        u32::from(self.hours) * 3600 * framerate
            + u32::from(self.minutes) * 60 * framerate
            + u32::from(self.seconds) * framerate
            + u32::from(self.frames)
    }

    /// Timecode for an absolute frame count at `framerate` fps.
    pub fn from_frames(mut frames: u32, framerate: u32) -> Self {
        let hours = frames / (3600 * framerate);
        frames -= hours * 3600 * framerate;
        let minutes = frames / (60 * framerate);
        frames -= minutes * 60 * framerate;
        let seconds = frames / framerate;
        frames -= seconds * framerate;
        Timecode {
            hours: hours as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
            frames: frames as u8,
        }
    }

    /// Carries out-of-range components into the next unit, e.g. 00:00:00:30
    /// at 25 fps becomes 00:00:01:05.
    pub fn normalize(&mut self, framerate: u32) {
        *self = Timecode::from_frames(self.to_frames(framerate), framerate);
    }

    /// Whether every component is within its range at `framerate` fps.
    pub fn is_valid(self, framerate: u32) -> bool {
        self.hours < 24
            && self.minutes < 60
            && self.seconds < 60
            && u32::from(self.frames) < framerate
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

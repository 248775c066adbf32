//! Codec2 operating modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Codec2Error;
use crate::geometry::FrameGeometry;

/// Codec2 operating mode.
///
/// Each mode fixes the bitrate and the frame geometry of a session. The
/// ordinal (declaration order) is the value callers pass across the
/// handle API; it is distinct from the engine's own mode constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "3200")]
    Mode3200,
    #[serde(rename = "2400")]
    Mode2400,
    #[serde(rename = "1600")]
    Mode1600,
    #[serde(rename = "1400")]
    Mode1400,
    #[serde(rename = "1300")]
    Mode1300,
    #[serde(rename = "1200")]
    Mode1200,
    #[serde(rename = "700C", alias = "700c")]
    Mode700C,
}

impl Mode {
    /// All recognized modes in ordinal order.
    pub const ALL: [Mode; 7] = [
        Mode::Mode3200,
        Mode::Mode2400,
        Mode::Mode1600,
        Mode::Mode1400,
        Mode::Mode1300,
        Mode::Mode1200,
        Mode::Mode700C,
    ];

    /// Returns the mode for a caller-facing ordinal.
    pub fn from_ordinal(ordinal: i32) -> Result<Self, Codec2Error> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(Codec2Error::InvalidMode(ordinal))
    }

    /// Returns the caller-facing ordinal.
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Returns the mode constant understood by libcodec2.
    pub fn engine_id(self) -> i32 {
        match self {
            Self::Mode3200 => 0,
            Self::Mode2400 => 1,
            Self::Mode1600 => 2,
            Self::Mode1400 => 3,
            Self::Mode1300 => 4,
            Self::Mode1200 => 5,
            Self::Mode700C => 8,
        }
    }

    /// Returns the nominal bitrate in bits per second.
    pub fn bitrate(self) -> u32 {
        match self {
            Self::Mode3200 => 3200,
            Self::Mode2400 => 2400,
            Self::Mode1600 => 1600,
            Self::Mode1400 => 1400,
            Self::Mode1300 => 1300,
            Self::Mode1200 => 1200,
            Self::Mode700C => 700,
        }
    }

    /// Returns the short name, e.g. `"1300"` or `"700C"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mode3200 => "3200",
            Self::Mode2400 => "2400",
            Self::Mode1600 => "1600",
            Self::Mode1400 => "1400",
            Self::Mode1300 => "1300",
            Self::Mode1200 => "1200",
            Self::Mode700C => "700C",
        }
    }

    /// Returns the frame geometry libcodec2 uses for this mode.
    ///
    /// A live session always reports what its engine returns; this table is
    /// for display and for engines that do not model a real codec.
    pub fn nominal_geometry(self) -> FrameGeometry {
        match self {
            Self::Mode3200 => FrameGeometry::new(160, 8),
            Self::Mode2400 => FrameGeometry::new(160, 6),
            Self::Mode1600 => FrameGeometry::new(320, 8),
            Self::Mode1400 => FrameGeometry::new(320, 7),
            Self::Mode1300 => FrameGeometry::new(320, 7),
            Self::Mode1200 => FrameGeometry::new(320, 6),
            Self::Mode700C => FrameGeometry::new(320, 4),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = Codec2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Codec2Error::UnknownModeName(s.to_string()))
    }
}

impl TryFrom<i32> for Mode {
    type Error = Codec2Error;

    fn try_from(ordinal: i32) -> Result<Self, Self::Error> {
        Self::from_ordinal(ordinal)
    }
}

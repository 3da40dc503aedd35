use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of playable lanes.
pub const LANE_COUNT: usize = 6;

/// A playable lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lane {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl Lane {
    /// Returns all lanes in order.
    pub fn all() -> &'static [Lane] {
        &[
            Lane::One,
            Lane::Two,
            Lane::Three,
            Lane::Four,
            Lane::Five,
            Lane::Six,
        ]
    }

    /// Returns the lane index (0-based).
    pub fn index(self) -> usize {
        match self {
            Lane::One => 0,
            Lane::Two => 1,
            Lane::Three => 2,
            Lane::Four => 3,
            Lane::Five => 4,
            Lane::Six => 5,
        }
    }

    /// Returns the lane number as written in charts (1-based).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Create a lane from its 1-based number.
    pub fn from_number(number: u8) -> Option<Lane> {
        match number {
            1 => Some(Lane::One),
            2 => Some(Lane::Two),
            3 => Some(Lane::Three),
            4 => Some(Lane::Four),
            5 => Some(Lane::Five),
            6 => Some(Lane::Six),
            _ => None,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lane{}", self.number())
    }
}

/// Channel of a `#MMMCC:` directive.
///
/// Lane channels carry note codes. The control channels are recognised and
/// stored but tempo and measure length stay constant for the whole chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChannelType {
    /// xxx02
    MeasureLengthChange,
    /// xxx03
    BpmChange,
    /// xxx08
    ExtBpmChange,
    /// xxx09
    ExtStop,
    /// xxx11
    Lane1,
    /// xxx12
    Lane2,
    /// xxx13
    Lane3,
    /// xxx14
    Lane4,
    /// xxx15
    Lane5,
    /// xxx18
    Lane6,
}

impl ChannelType {
    /// Look up a two-digit decimal channel code. Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(Self::MeasureLengthChange),
            3 => Some(Self::BpmChange),
            8 => Some(Self::ExtBpmChange),
            9 => Some(Self::ExtStop),
            11 => Some(Self::Lane1),
            12 => Some(Self::Lane2),
            13 => Some(Self::Lane3),
            14 => Some(Self::Lane4),
            15 => Some(Self::Lane5),
            18 => Some(Self::Lane6),
            _ => None,
        }
    }

    /// The two-digit code this channel is written with.
    pub fn code(self) -> u8 {
        match self {
            Self::MeasureLengthChange => 2,
            Self::BpmChange => 3,
            Self::ExtBpmChange => 8,
            Self::ExtStop => 9,
            Self::Lane1 => 11,
            Self::Lane2 => 12,
            Self::Lane3 => 13,
            Self::Lane4 => 14,
            Self::Lane5 => 15,
            Self::Lane6 => 18,
        }
    }

    /// The playable lane for lane channels, `None` for control channels.
    pub fn lane(self) -> Option<Lane> {
        match self {
            Self::Lane1 => Some(Lane::One),
            Self::Lane2 => Some(Lane::Two),
            Self::Lane3 => Some(Lane::Three),
            Self::Lane4 => Some(Lane::Four),
            Self::Lane5 => Some(Lane::Five),
            Self::Lane6 => Some(Lane::Six),
            _ => None,
        }
    }

    pub fn is_lane(self) -> bool {
        self.lane().is_some()
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:02})", self, self.code())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::channel::Lane;

/// The type of a note, as encoded by the value of a lane token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NoteType {
    Tap = 1,
    Mine = 2,
    Hold = 3,
    Keep = 4,
    Fake = 5,
}

impl NoteType {
    /// Map a parsed token value to a note type.
    ///
    /// Only the integral values 1..=5 are note codes; anything else
    /// (including 0, negatives and fractions) yields `None`.
    pub fn from_code(value: f64) -> Option<Self> {
        if value.fract() != 0.0 {
            return None;
        }
        match value as i64 {
            1 => Some(Self::Tap),
            2 => Some(Self::Mine),
            3 => Some(Self::Hold),
            4 => Some(Self::Keep),
            5 => Some(Self::Fake),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A single timed note on the global tick axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Global tick (9600 per measure).
    pub tick: i64,
    pub note_type: NoteType,
    pub lane: Lane,
}

impl NoteEvent {
    pub fn new(tick: i64, note_type: NoteType, lane: Lane) -> Self {
        Self {
            tick,
            note_type,
            lane,
        }
    }

    /// Timeline order: ascending tick, then ascending lane.
    pub fn timeline_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.tick
            .cmp(&other.tick)
            .then_with(|| self.lane.cmp(&other.lane))
    }
}

impl fmt::Display for NoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8} {} {:?}", self.tick, self.lane, self.note_type)
    }
}

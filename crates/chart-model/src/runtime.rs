use std::fmt;

use serde::Serialize;

use crate::note::NoteEvent;
use crate::tick::TICKS_PER_MEASURE;

/// Flattened, play-ready chart.
///
/// `events` is always in timeline order (ascending tick, ties by ascending
/// lane) so interval queries can binary search it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeScore {
    title: Option<String>,
    initial_bpm: u32,
    offset_seconds: f64,
    events: Vec<NoteEvent>,
}

impl RuntimeScore {
    /// Build a runtime score, sorting `events` into timeline order.
    pub fn new(
        title: Option<String>,
        initial_bpm: u32,
        offset_seconds: f64,
        mut events: Vec<NoteEvent>,
    ) -> Self {
        events.sort_by(NoteEvent::timeline_cmp);
        Self {
            title,
            initial_bpm,
            offset_seconds,
            events,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn initial_bpm(&self) -> u32 {
        self.initial_bpm
    }

    pub fn offset_seconds(&self) -> f64 {
        self.offset_seconds
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Tick of the last event, if any.
    pub fn last_tick(&self) -> Option<i64> {
        self.events.last().map(|e| e.tick)
    }

    /// Number of measures spanned by the events.
    pub fn measure_count(&self) -> i64 {
        self.last_tick()
            .map(|tick| tick / TICKS_PER_MEASURE + 1)
            .unwrap_or(0)
    }
}

impl fmt::Display for RuntimeScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title.as_deref().unwrap_or("(none)"))?;
        writeln!(f, "BPM: {}", self.initial_bpm)?;
        writeln!(f, "Offset: {}", self.offset_seconds)?;
        writeln!(f, "Measures: {}", self.measure_count())?;
        writeln!(f, "Total Events: {}", self.events.len())?;
        for event in &self.events {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}

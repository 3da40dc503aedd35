use std::cmp::Ordering;

use chart_model::tick::TICKS_PER_MEASURE;
use chart_model::{Lane, NoteEvent, RuntimeScore};

use crate::query::{find_hit_range, find_offset_range, find_range};
use crate::settings::PlaySettings;

/// Outcome of one scheduling step. Every list is in timeline order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub appeared: Vec<NoteEvent>,
    pub hit: Vec<NoteEvent>,
    pub missed: Vec<NoteEvent>,
}

impl StepReport {
    pub fn is_empty(&self) -> bool {
        self.appeared.is_empty() && self.hit.is_empty() && self.missed.is_empty()
    }
}

/// Tracks which events are on screen as the playhead sweeps forward.
///
/// Per step: newly due events appear, pressed lanes hit active events inside
/// the hit window, and active events past the trail offset are missed.
#[derive(Debug, Clone)]
pub struct NoteLifecycle<'a> {
    events: &'a [NoteEvent],
    bpm: f64,
    appear_offset_ticks: f64,
    disappear_offset_ticks: f64,
    hit_range_ms: f64,
    note_pos_ratio: f64,
    active: Vec<NoteEvent>,
    /// Upper bound of the last appear window, `None` before the first step.
    appeared_until: Option<f64>,
}

impl<'a> NoteLifecycle<'a> {
    /// Settings are validated first, so every event that appears is
    /// eventually hit or missed.
    pub fn new(score: &'a RuntimeScore, settings: &PlaySettings) -> Self {
        let mut settings = settings.clone();
        settings.validate();
        let ticks_per_measure = TICKS_PER_MEASURE as f64;
        Self {
            events: score.events(),
            bpm: f64::from(score.initial_bpm()),
            appear_offset_ticks: settings.appear_measure_offset * ticks_per_measure,
            disappear_offset_ticks: settings.disappear_measure_offset * ticks_per_measure,
            hit_range_ms: settings.hit_range_ms,
            note_pos_ratio: settings.note_pos_ratio,
            active: Vec::new(),
            appeared_until: None,
        }
    }

    /// Run one step over the window `(previous_tick, current_tick]`.
    ///
    /// The first step also claims every event already inside the lead and
    /// trail distances, so a playhead that starts late loses nothing.
    pub fn step(&mut self, previous_tick: f64, current_tick: f64, pressed: &[Lane]) -> StepReport {
        let first_step = self.appeared_until.is_none();

        let appeared = if first_step {
            find_range(self.events, f64::NEG_INFINITY, current_tick + self.appear_offset_ticks)
        } else {
            find_offset_range(self.events, previous_tick, current_tick, self.appear_offset_ticks)
        }
        .to_vec();
        self.appeared_until = Some(current_tick + self.appear_offset_ticks);
        self.admit(&appeared);

        let hit: Vec<NoteEvent> = find_hit_range(&self.active, current_tick, self.hit_range_ms, self.bpm)
            .iter()
            .filter(|e| pressed.contains(&e.lane))
            .copied()
            .collect();
        self.remove(&hit);

        let missed = if first_step {
            find_range(&self.active, f64::NEG_INFINITY, current_tick + self.disappear_offset_ticks)
        } else {
            find_offset_range(&self.active, previous_tick, current_tick, self.disappear_offset_ticks)
        }
        .to_vec();
        self.remove(&missed);

        StepReport {
            appeared,
            hit,
            missed,
        }
    }

    fn admit(&mut self, appeared: &[NoteEvent]) {
        let out_of_order = match (self.active.last(), appeared.first()) {
            (Some(last), Some(first)) => last.timeline_cmp(first) == Ordering::Greater,
            _ => false,
        };
        self.active.extend_from_slice(appeared);
        if out_of_order {
            self.active.sort_by(NoteEvent::timeline_cmp);
        }
    }

    fn remove(&mut self, gone: &[NoteEvent]) {
        if !gone.is_empty() {
            self.active.retain(|e| !gone.contains(e));
        }
    }

    /// Currently visible events in timeline order.
    pub fn active(&self) -> &[NoteEvent] {
        &self.active
    }

    /// Active events a press at `current_tick` would hit.
    pub fn hittable(&self, current_tick: f64) -> &[NoteEvent] {
        find_hit_range(&self.active, current_tick, self.hit_range_ms, self.bpm)
    }

    /// Nothing is visible and every event has already appeared.
    pub fn is_finished(&self) -> bool {
        let Some(until) = self.appeared_until else {
            return self.events.is_empty();
        };
        self.active.is_empty() && self.events.last().is_none_or(|e| e.tick as f64 <= until)
    }

    /// Screen placement of `event`: lane index and scroll position.
    ///
    /// `y` is the distance to the judge line in measures times
    /// `note_pos_ratio`; positive is still to come.
    pub fn placement(&self, event: &NoteEvent, current_tick: f64) -> (usize, f64) {
        let y = (event.tick as f64 - current_tick) / TICKS_PER_MEASURE as f64 * self.note_pos_ratio;
        (event.lane.index(), y)
    }
}

// Interval queries over a tick-sorted event slice.
//
// Every window is half-open, `(from, to]`. Under a monotonic sweep where each
// step starts at the previous step's end, every tick belongs to exactly one
// window.

use chart_model::NoteEvent;
use chart_model::tick::seconds_to_ticks;

/// Events with `from_exclusive < tick <= to_inclusive`, in their original order.
///
/// `events` must be sorted by tick. Any sorted subset of a timeline is valid
/// input. An empty or inverted window yields an empty slice.
pub fn find_range(events: &[NoteEvent], from_exclusive: f64, to_inclusive: f64) -> &[NoteEvent] {
    let start = events.partition_point(|e| e.tick as f64 <= from_exclusive);
    let end = events.partition_point(|e| e.tick as f64 <= to_inclusive);
    &events[start..end.max(start)]
}

/// [`find_range`] over the step window shifted by `offset_ticks`.
pub fn find_offset_range(
    events: &[NoteEvent],
    previous_tick: f64,
    current_tick: f64,
    offset_ticks: f64,
) -> &[NoteEvent] {
    find_range(events, previous_tick + offset_ticks, current_tick + offset_ticks)
}

/// Events within `tolerance_ms` of `current_tick` at a constant `bpm`.
///
/// The late edge (`current - tolerance`) is excluded, the early edge
/// (`current + tolerance`) is included.
pub fn find_hit_range(
    events: &[NoteEvent],
    current_tick: f64,
    tolerance_ms: f64,
    bpm: f64,
) -> &[NoteEvent] {
    let tolerance_ticks = hit_tolerance_ticks(tolerance_ms, bpm);
    find_range(events, current_tick - tolerance_ticks, current_tick + tolerance_ticks)
}

pub fn hit_tolerance_ticks(tolerance_ms: f64, bpm: f64) -> f64 {
    seconds_to_ticks(tolerance_ms / 1000.0, bpm, 1.0)
}

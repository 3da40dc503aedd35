use log::{debug, warn};

use crate::note::{NoteEvent, NoteType};
use crate::runtime::RuntimeScore;
use crate::score::Score;
use crate::tick::{DEFAULT_MEASURE_LENGTH, token_tick};

/// Flatten the measure/channel grid of `score` into one timeline of note
/// events.
///
/// Every non-zero lane token with a valid note code (1..=5) becomes one
/// event; chords stay separate events. Control channels are not applied:
/// tempo and measure length are constant for the whole chart.
pub fn flatten(score: &Score) -> RuntimeScore {
    if score.has_control_channels() {
        warn!("chart has tempo/measure-length/stop channels; they are not applied");
    }

    let mut events = Vec::new();
    if let Some(max_measure) = score.max_measure() {
        for measure in 0..=max_measure {
            let Some(channels) = score.measure(measure) else {
                continue;
            };
            for (&channel, tokens) in channels {
                let Some(lane) = channel.lane() else {
                    continue;
                };
                let token_count = tokens.len();
                for (position, &value) in tokens.iter().enumerate() {
                    if value == 0.0 {
                        continue;
                    }
                    let Some(note_type) = NoteType::from_code(value) else {
                        debug!("measure {measure} {channel}: skipped note code {value}");
                        continue;
                    };
                    let tick = token_tick(measure, position, token_count, DEFAULT_MEASURE_LENGTH);
                    events.push(NoteEvent::new(tick, note_type, lane));
                }
            }
        }
    }

    RuntimeScore::new(
        score.title().map(str::to_string),
        score.initial_bpm(),
        score.offset_seconds(),
        events,
    )
}

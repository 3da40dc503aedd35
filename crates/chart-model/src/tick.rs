// Tick/seconds conversion under a constant tempo.

/// Tick resolution of one measure, constant across the chart.
pub const TICKS_PER_MEASURE: i64 = 9600;

/// Ticks in one quarter-note beat.
pub const TICKS_PER_BEAT: i64 = TICKS_PER_MEASURE / 4;

/// Measure length factor used when a chart does not change it.
pub const DEFAULT_MEASURE_LENGTH: f64 = 1.0;

/// Ticks elapsed per second at `bpm`.
pub fn ticks_per_second(bpm: f64, measure_length: f64) -> f64 {
    TICKS_PER_BEAT as f64 * (bpm / 60.0) * measure_length
}

/// Convert seconds to ticks.
pub fn seconds_to_ticks(seconds: f64, bpm: f64, measure_length: f64) -> f64 {
    seconds * ticks_per_second(bpm, measure_length)
}

/// Convert ticks to seconds.
pub fn ticks_to_seconds(ticks: f64, bpm: f64, measure_length: f64) -> f64 {
    ticks / ticks_per_second(bpm, measure_length)
}

/// Global tick of the token at `position` in a channel string of
/// `token_count` tokens in measure `measure`.
///
/// `floor(position * 9600 / token_count / measure_length)` past the measure
/// start. A `token_count` of zero places the token at the measure start.
pub fn token_tick(measure: u32, position: usize, token_count: usize, measure_length: f64) -> i64 {
    let measure_start = measure as i64 * TICKS_PER_MEASURE;
    if token_count == 0 {
        return measure_start;
    }
    let scaled = (position as i64 * TICKS_PER_MEASURE) as f64 / token_count as f64;
    measure_start + (scaled / measure_length).floor() as i64
}

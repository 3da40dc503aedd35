use chart_model::RuntimeScore;
use chart_model::tick::seconds_to_ticks;

#[derive(Debug, Clone, Copy, PartialEq)]
enum TickerState {
    Idle,
    Playing { started_us: i64, start_tick: f64 },
    Stopped,
}

/// Maps wall-clock time to chart ticks under a constant tempo.
///
/// Each [`tick`](Self::tick) moves `previous_tick` to the old
/// `current_tick`, so consecutive step windows abut exactly.
#[derive(Debug, Clone)]
pub struct RuntimeTicker {
    bpm: f64,
    offset_seconds: f64,
    state: TickerState,
    previous_tick: f64,
    current_tick: f64,
}

impl RuntimeTicker {
    pub fn new(bpm: f64, offset_seconds: f64) -> Self {
        Self {
            bpm,
            offset_seconds,
            state: TickerState::Idle,
            previous_tick: 0.0,
            current_tick: 0.0,
        }
    }

    pub fn for_score(score: &RuntimeScore) -> Self {
        Self::new(f64::from(score.initial_bpm()), score.offset_seconds())
    }

    /// Start playback at `now_us`.
    ///
    /// The playhead starts `offset_seconds + lead_in_seconds` before tick 0.
    pub fn play(&mut self, now_us: i64, lead_in_seconds: f64) {
        let start_tick = -seconds_to_ticks(self.offset_seconds + lead_in_seconds, self.bpm, 1.0);
        self.previous_tick = start_tick;
        self.current_tick = start_tick;
        self.state = TickerState::Playing {
            started_us: now_us,
            start_tick,
        };
    }

    /// Advance the playhead to `now_us`. Returns false when not playing.
    ///
    /// The playhead never moves backwards, even if `now_us` does.
    pub fn tick(&mut self, now_us: i64) -> bool {
        let TickerState::Playing {
            started_us,
            start_tick,
        } = self.state
        else {
            return false;
        };
        let elapsed_seconds = (now_us - started_us) as f64 / 1_000_000.0;
        let target = start_tick + seconds_to_ticks(elapsed_seconds, self.bpm, 1.0);
        self.previous_tick = self.current_tick;
        self.current_tick = target.max(self.current_tick);
        true
    }

    pub fn stop(&mut self) {
        self.state = TickerState::Stopped;
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, TickerState::Playing { .. })
    }

    pub fn previous_tick(&self) -> f64 {
        self.previous_tick
    }

    pub fn current_tick(&self) -> f64 {
        self.current_tick
    }

    /// `(previous_tick, current_tick)` of the last step.
    pub fn window(&self) -> (f64, f64) {
        (self.previous_tick, self.current_tick)
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }
}

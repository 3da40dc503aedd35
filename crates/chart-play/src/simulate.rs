use std::thread;
use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;

use chart_model::{Lane, RuntimeScore};

use crate::lifecycle::NoteLifecycle;
use crate::settings::PlaySettings;
use crate::ticker::RuntimeTicker;
use crate::time::{MockTimeProvider, SystemTimeProvider, TimeProvider, frame_interval_us};

/// Totals of a headless playthrough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationSummary {
    pub frames: u64,
    pub appeared: usize,
    pub hit: usize,
    pub missed: usize,
}

/// Play `score` headlessly on a simulated clock at a fixed frame rate.
///
/// With `autoplay`, every lane holding a hittable event is pressed on each
/// frame; otherwise nothing is pressed and every event ends up missed.
pub fn simulate(score: &RuntimeScore, settings: &PlaySettings, fps: u32, autoplay: bool) -> SimulationSummary {
    let clock = MockTimeProvider::new();
    let frame_us = frame_interval_us(fps);
    run_playthrough(score, settings, &clock, || clock.advance(frame_us), autoplay)
}

/// Play `score` against the system clock, sleeping one frame between steps.
pub fn simulate_realtime(
    score: &RuntimeScore,
    settings: &PlaySettings,
    fps: u32,
    autoplay: bool,
) -> SimulationSummary {
    let clock = SystemTimeProvider::new();
    let frame = Duration::from_micros(frame_interval_us(fps).unsigned_abs());
    run_playthrough(score, settings, &clock, || thread::sleep(frame), autoplay)
}

/// Drive a ticker and lifecycle over `score` until every event has appeared
/// and left the screen. `wait_frame` runs before each step.
pub fn run_playthrough<C: TimeProvider>(
    score: &RuntimeScore,
    settings: &PlaySettings,
    clock: &C,
    mut wait_frame: impl FnMut(),
    autoplay: bool,
) -> SimulationSummary {
    let mut summary = SimulationSummary::default();
    if score.initial_bpm() == 0 {
        warn!("tempo is zero, nothing to simulate");
        return summary;
    }

    let mut settings = settings.clone();
    settings.validate();

    let mut ticker = RuntimeTicker::for_score(score);
    let mut lifecycle = NoteLifecycle::new(score, &settings);

    ticker.play(clock.now_us(), settings.play_offset);
    while !lifecycle.is_finished() {
        wait_frame();
        ticker.tick(clock.now_us());
        let (previous, current) = ticker.window();

        let pressed: Vec<Lane> = if autoplay {
            let mut lanes: Vec<Lane> = lifecycle.hittable(current).iter().map(|e| e.lane).collect();
            lanes.sort();
            lanes.dedup();
            lanes
        } else {
            Vec::new()
        };

        let report = lifecycle.step(previous, current, &pressed);
        if !report.is_empty() {
            debug!(
                "frame {} tick {current:.1}: +{} hit {} miss {}",
                summary.frames,
                report.appeared.len(),
                report.hit.len(),
                report.missed.len()
            );
        }
        summary.frames += 1;
        summary.appeared += report.appeared.len();
        summary.hit += report.hit.len();
        summary.missed += report.missed.len();
    }
    ticker.stop();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_model::load_str;

    const CHART: &str = "#BPM 120\n#00011:01010101\n#00113:0002\n";

    #[test]
    fn autoplay_hits_everything() {
        let score = load_str(CHART);
        let summary = simulate(&score, &PlaySettings::default(), 60, true);
        assert_eq!(summary.appeared, 5);
        assert_eq!(summary.hit, 5);
        assert_eq!(summary.missed, 0);
    }

    #[test]
    fn idle_play_misses_everything() {
        let score = load_str(CHART);
        let summary = simulate(&score, &PlaySettings::default(), 60, false);
        assert_eq!(summary.appeared, 5);
        assert_eq!(summary.hit, 0);
        assert_eq!(summary.missed, 5);
    }

    #[test]
    fn trail_ahead_of_lead_terminates() {
        let score = load_str("#BPM 120\n#01011:01\n");
        let settings = PlaySettings {
            appear_measure_offset: 2.0,
            disappear_measure_offset: 3.0,
            ..Default::default()
        };
        let summary = simulate(&score, &settings, 60, false);
        assert_eq!(summary.appeared, 1);
        assert_eq!(summary.missed, 1);
    }

    #[test]
    fn non_finite_lead_in_terminates() {
        let score = load_str("#BPM 120\n#00011:01\n");
        let settings = PlaySettings {
            play_offset: f64::NAN,
            ..Default::default()
        };
        let summary = simulate(&score, &settings, 60, true);
        assert_eq!(summary.hit, 1);
    }

    #[test]
    fn realtime_playthrough_follows_system_clock() {
        // 38400 ticks/s: the single note is missed after about a quarter second
        let score = load_str("#BPM 960\n#00011:01\n");
        let settings = PlaySettings {
            play_offset: 0.0,
            ..Default::default()
        };
        let summary = simulate_realtime(&score, &settings, 500, false);
        assert_eq!(summary.appeared, 1);
        assert_eq!(summary.missed, 1);
        assert!(summary.frames > 0);
    }

    #[test]
    fn empty_chart_runs_no_frames() {
        let score = load_str("#TITLE nothing\n");
        assert_eq!(simulate(&score, &PlaySettings::default(), 60, true), SimulationSummary::default());
    }
}

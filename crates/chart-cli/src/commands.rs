use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use chart_model::{ParseOptions, RuntimeScore, Score, flatten, parse_with, read_chart_file};
use chart_play::PlaySettings;

fn load(path: &Path, options: ParseOptions) -> Result<(Score, RuntimeScore)> {
    let lines = read_chart_file(path)?;
    let score = parse_with(&lines, options);
    let runtime = flatten(&score);
    info!(
        "loaded {}: {} lines, {} events",
        path.display(),
        lines.len(),
        runtime.len()
    );
    Ok((score, runtime))
}

pub fn inspect(out: &mut impl Write, path: &Path, options: ParseOptions) -> Result<()> {
    let (score, runtime) = load(path, options)?;
    writeln!(out, "{score}")?;
    if !score.bpm_definitions().is_empty() {
        writeln!(out, "BPM definitions:")?;
        for (id, bpm) in score.bpm_definitions() {
            writeln!(out, "  {id}: {bpm}")?;
        }
        writeln!(out)?;
    }
    write!(out, "{runtime}")?;
    Ok(())
}

pub fn dump(out: &mut impl Write, path: &Path, options: ParseOptions, pretty: bool) -> Result<()> {
    let (_, runtime) = load(path, options)?;
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &runtime)?;
    } else {
        serde_json::to_writer(&mut *out, &runtime)?;
    }
    writeln!(out)?;
    Ok(())
}

/// How `simulate` steps through the chart.
#[derive(Debug, Clone, Copy)]
pub struct SimulateRun {
    pub fps: u32,
    pub autoplay: bool,
    pub realtime: bool,
}

pub fn simulate(
    out: &mut impl Write,
    path: &Path,
    options: ParseOptions,
    config: &Path,
    run: SimulateRun,
) -> Result<()> {
    let settings = PlaySettings::load_from(config)
        .with_context(|| format!("Failed to load play settings: {}", config.display()))?;
    let (_, runtime) = load(path, options)?;
    let summary = if run.realtime {
        chart_play::simulate_realtime(&runtime, &settings, run.fps, run.autoplay)
    } else {
        chart_play::simulate(&runtime, &settings, run.fps, run.autoplay)
    };
    info!("simulated {} frames at {} fps", summary.frames, run.fps);
    writeln!(out, "Events: {}", runtime.len())?;
    writeln!(out, "Appeared: {}", summary.appeared)?;
    writeln!(out, "Hit: {}", summary.hit)?;
    writeln!(out, "Missed: {}", summary.missed)?;
    Ok(())
}

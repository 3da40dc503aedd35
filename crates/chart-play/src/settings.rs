use std::fs;
use std::path::Path;

use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};

/// Playback and lifecycle tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaySettings {
    /// Lead-in in seconds before tick 0 is reached.
    pub play_offset: f64,
    /// Scroll distance of one measure, used by note placement.
    pub note_pos_ratio: f64,
    /// Measures ahead of the playhead at which notes appear.
    pub appear_measure_offset: f64,
    /// Measures relative to the playhead at which notes disappear. Negative is behind.
    pub disappear_measure_offset: f64,
    /// Symmetric hit tolerance in milliseconds.
    pub hit_range_ms: f64,
}

impl Default for PlaySettings {
    fn default() -> Self {
        Self {
            play_offset: 3.0,
            note_pos_ratio: 5.0,
            appear_measure_offset: 2.0,
            disappear_measure_offset: -1.0,
            hit_range_ms: 75.0,
        }
    }
}

impl PlaySettings {
    /// Loads settings from `path`.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::read(path)
    }

    /// Reads settings from `path`; a missing file is an error.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut settings: PlaySettings = serde_json::from_str(&data)?;
        settings.validate();
        Ok(settings)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Replaces non-finite and out-of-range values with their defaults.
    pub fn validate(&mut self) {
        let defaults = Self::default();
        reset_if(&mut self.play_offset, defaults.play_offset, |v| v < 0.0, "play_offset");
        reset_if(&mut self.note_pos_ratio, defaults.note_pos_ratio, |_| false, "note_pos_ratio");
        reset_if(
            &mut self.appear_measure_offset,
            defaults.appear_measure_offset,
            |_| false,
            "appear_measure_offset",
        );
        reset_if(
            &mut self.disappear_measure_offset,
            defaults.disappear_measure_offset,
            |_| false,
            "disappear_measure_offset",
        );
        reset_if(&mut self.hit_range_ms, defaults.hit_range_ms, |v| v < 0.0, "hit_range_ms");

        // A trail at or ahead of the lead would leave appeared notes active forever
        if self.disappear_measure_offset >= self.appear_measure_offset {
            warn!(
                "disappear_measure_offset {} is not behind appear_measure_offset {}, using {} and {}",
                self.disappear_measure_offset,
                self.appear_measure_offset,
                defaults.disappear_measure_offset,
                defaults.appear_measure_offset
            );
            self.appear_measure_offset = defaults.appear_measure_offset;
            self.disappear_measure_offset = defaults.disappear_measure_offset;
        }
    }
}

fn reset_if(value: &mut f64, default: f64, out_of_range: impl Fn(f64) -> bool, name: &str) {
    if !value.is_finite() || out_of_range(*value) {
        warn!("{name} = {value} is invalid, using {default}");
        *value = default;
    }
}

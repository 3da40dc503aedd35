use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::channel::ChannelType;

/// Default tempo when a chart has no usable `#BPM` line.
pub const DEFAULT_BPM: u32 = 120;

/// Default offset when a chart has no usable `#OFFSET` line.
pub const DEFAULT_OFFSET_SECONDS: f64 = 0.0;

/// Token arrays of one measure, keyed by channel.
pub type MeasureChannels = BTreeMap<ChannelType, Vec<f64>>;

/// Measure index → channel → token array.
///
/// Only measures and channels that appeared in the source are present.
pub type Grid = BTreeMap<u32, MeasureChannels>;

/// Parsed chart: header values plus the per-measure channel grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    title: Option<String>,
    initial_bpm: u32,
    offset_seconds: f64,
    /// `#BPMxx` definitions (extended tempo table), keyed by the two-character id.
    bpm_definitions: BTreeMap<String, u32>,
    grid: Grid,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            title: None,
            initial_bpm: DEFAULT_BPM,
            offset_seconds: DEFAULT_OFFSET_SECONDS,
            bpm_definitions: BTreeMap::new(),
            grid: Grid::new(),
        }
    }
}

impl Score {
    pub fn new(title: Option<String>, initial_bpm: u32, offset_seconds: f64, grid: Grid) -> Self {
        Self {
            title,
            initial_bpm,
            offset_seconds,
            bpm_definitions: BTreeMap::new(),
            grid,
        }
    }

    pub(crate) fn with_bpm_definitions(mut self, defs: BTreeMap<String, u32>) -> Self {
        self.bpm_definitions = defs;
        self
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

    pub fn bpm_definitions(&self) -> &BTreeMap<String, u32> {
        &self.bpm_definitions
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Channels of one measure, `None` when the measure never appeared.
    pub fn measure(&self, measure: u32) -> Option<&MeasureChannels> {
        self.grid.get(&measure)
    }

    /// Token array of one measure/channel pair.
    pub fn tokens(&self, measure: u32, channel: ChannelType) -> Option<&[f64]> {
        self.grid
            .get(&measure)
            .and_then(|channels| channels.get(&channel))
            .map(Vec::as_slice)
    }

    /// Greatest measure index present in the grid.
    pub fn max_measure(&self) -> Option<u32> {
        self.grid.keys().next_back().copied()
    }

    /// Control channel entries (measure length, tempo, stop) present in the grid.
    pub fn control_channels(&self) -> impl Iterator<Item = (u32, ChannelType, &[f64])> + '_ {
        self.grid.iter().flat_map(|(&measure, channels)| {
            channels
                .iter()
                .filter(|(channel, _)| !channel.is_lane())
                .map(move |(&channel, tokens)| (measure, channel, tokens.as_slice()))
        })
    }

    pub fn has_control_channels(&self) -> bool {
        self.control_channels().next().is_some()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title.as_deref().unwrap_or("(none)"))?;
        writeln!(f, "BPM: {}", self.initial_bpm)?;
        writeln!(f, "Offset: {}", self.offset_seconds)?;
        writeln!(f, "Measures: {}", self.grid.len())?;
        for (measure, channels) in &self.grid {
            writeln!(f, "Measure {measure:03}:")?;
            for (channel, tokens) in channels {
                let values: Vec<String> = tokens.iter().map(f64::to_string).collect();
                writeln!(f, "  {channel}: {}", values.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(entries: &[(u32, ChannelType, &[f64])]) -> Grid {
        let mut grid = Grid::new();
        for &(measure, channel, tokens) in entries {
            grid.entry(measure)
                .or_default()
                .insert(channel, tokens.to_vec());
        }
        grid
    }

    #[test]
    fn default_score_uses_chart_defaults() {
        let score = Score::default();
        assert_eq!(score.title(), None);
        assert_eq!(score.initial_bpm(), 120);
        assert_eq!(score.offset_seconds(), 0.0);
        assert!(score.grid().is_empty());
        assert_eq!(score.max_measure(), None);
    }

    #[test]
    fn max_measure_is_greatest_key() {
        let grid = grid_with(&[
            (3, ChannelType::Lane1, &[1.0]),
            (0, ChannelType::Lane2, &[1.0]),
        ]);
        let score = Score::new(None, 120, 0.0, grid);
        assert_eq!(score.max_measure(), Some(3));
        assert!(score.measure(1).is_none());
        assert_eq!(score.tokens(3, ChannelType::Lane1), Some(&[1.0][..]));
        assert_eq!(score.tokens(3, ChannelType::Lane2), None);
    }

    #[test]
    fn control_channels_skip_lanes() {
        let grid = grid_with(&[
            (0, ChannelType::Lane1, &[1.0]),
            (1, ChannelType::BpmChange, &[0.0, 96.0]),
            (2, ChannelType::ExtStop, &[1.0]),
        ]);
        let score = Score::new(None, 120, 0.0, grid);
        let control: Vec<(u32, ChannelType)> =
            score.control_channels().map(|(m, c, _)| (m, c)).collect();
        assert_eq!(
            control,
            vec![(1, ChannelType::BpmChange), (2, ChannelType::ExtStop)]
        );
        assert!(score.has_control_channels());
    }

    #[test]
    fn display_lists_measures() {
        let grid = grid_with(&[(0, ChannelType::Lane1, &[0.0, 1.0])]);
        let score = Score::new(Some("Song".to_string()), 150, 0.5, grid);
        let text = score.to_string();
        assert!(text.contains("Title: Song"));
        assert!(text.contains("BPM: 150"));
        assert!(text.contains("Measure 000:"));
        assert!(text.contains("Lane1(11): 0, 1"));
    }
}

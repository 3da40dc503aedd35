use std::collections::HashMap;

use chart_model::tick::token_tick;
use chart_model::{ChannelType, Grid, Score, flatten, parse};
use proptest::prelude::*;

const LANE_CODES: [u8; 6] = [11, 12, 13, 14, 15, 18];

/// One channel line: measure, lane code, token values 0..=9.
fn channel_line() -> impl Strategy<Value = (u32, u8, Vec<u8>)> {
    (
        0u32..8,
        prop::sample::select(LANE_CODES.to_vec()),
        prop::collection::vec(0u8..10, 1..17),
    )
}

fn render((measure, code, values): &(u32, u8, Vec<u8>)) -> String {
    let data: String = values.iter().map(|v| format!("{v:02}")).collect();
    format!("#{measure:03}{code:02}:{data}")
}

proptest! {
    #[test]
    fn token_tick_is_monotonic(measure in 0u32..1000, count in 1usize..512) {
        let mut prev = token_tick(measure, 0, count, 1.0);
        for position in 1..count {
            let tick = token_tick(measure, position, count, 1.0);
            prop_assert!(tick >= prev);
            prev = tick;
        }
        prop_assert!(prev < (measure as i64 + 1) * 9600);
    }

    #[test]
    fn event_count_matches_valid_tokens(lines in prop::collection::vec(channel_line(), 0..24)) {
        // a later line for the same measure and lane replaces the earlier one
        let mut surviving: HashMap<(u32, u8), &[u8]> = HashMap::new();
        for (measure, code, values) in &lines {
            surviving.insert((*measure, *code), values.as_slice());
        }
        let expected: usize = surviving
            .values()
            .map(|values| values.iter().filter(|&&v| (1..=5).contains(&v)).count())
            .sum();

        let text: Vec<String> = lines.iter().map(render).collect();
        prop_assert_eq!(flatten(&parse(&text)).len(), expected);
    }

    #[test]
    fn events_are_in_timeline_order(lines in prop::collection::vec(channel_line(), 0..24)) {
        let text: Vec<String> = lines.iter().map(render).collect();
        let runtime = flatten(&parse(&text));
        for pair in runtime.events().windows(2) {
            prop_assert!((pair[0].tick, pair[0].lane) <= (pair[1].tick, pair[1].lane));
        }
    }

    #[test]
    fn parse_and_flatten_are_deterministic(lines in prop::collection::vec(channel_line(), 0..24)) {
        let text: Vec<String> = lines.iter().map(render).collect();
        let a = flatten(&parse(&text));
        let b = flatten(&parse(&text));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn flatten_ignores_channel_insertion_order(values in prop::collection::vec(0u8..6, 1..9)) {
        let tokens: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        let mut forward = Grid::new();
        let mut backward = Grid::new();
        let channels = [ChannelType::Lane1, ChannelType::Lane2, ChannelType::Lane6];
        for channel in channels {
            forward.entry(0).or_default().insert(channel, tokens.clone());
        }
        for channel in channels.iter().rev() {
            backward.entry(0).or_default().insert(*channel, tokens.clone());
        }
        let a = flatten(&Score::new(None, 120, 0.0, forward));
        let b = flatten(&Score::new(None, 120, 0.0, backward));
        prop_assert_eq!(a.events(), b.events());
    }

    #[test]
    fn parse_never_panics(lines in prop::collection::vec(".*", 0..16)) {
        let score = parse(&lines);
        let _ = flatten(&score);
    }
}

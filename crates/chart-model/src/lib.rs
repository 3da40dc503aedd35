// Chart data model: parser, tick conversion, flattening into note events

pub mod channel;
mod error;
mod flatten;
mod note;
mod parse;
mod runtime;
mod score;
pub mod source;
pub mod tick;

pub use channel::{ChannelType, LANE_COUNT, Lane};
pub use error::ChartError;
pub use flatten::flatten;
pub use note::{NoteEvent, NoteType};
pub use parse::{ChartParser, ParseOptions, TokenPolicy, parse, parse_with};
pub use runtime::RuntimeScore;
pub use score::{DEFAULT_BPM, DEFAULT_OFFSET_SECONDS, Grid, MeasureChannels, Score};
pub use source::{lines_from_str, read_chart_file};
pub use tick::{TICKS_PER_BEAT, TICKS_PER_MEASURE};

/// Parse and flatten chart text in one step.
pub fn load_str(text: &str) -> RuntimeScore {
    flatten(&parse(text.lines()))
}

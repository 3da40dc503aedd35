// Playback side of a chart: interval queries, playhead ticker, note lifecycle

mod lifecycle;
pub mod query;
mod settings;
mod simulate;
mod ticker;
pub mod time;

pub use lifecycle::{NoteLifecycle, StepReport};
pub use query::{find_hit_range, find_offset_range, find_range};
pub use settings::PlaySettings;
pub use simulate::{SimulationSummary, run_playthrough, simulate, simulate_realtime};
pub use ticker::RuntimeTicker;
pub use time::{MockTimeProvider, SystemTimeProvider, TimeProvider};

use std::cell::Cell;
use std::time::Instant;

/// Source of wall-clock time for the playhead.
pub trait TimeProvider {
    /// Current time in microseconds from an arbitrary epoch.
    fn now_us(&self) -> i64;
}

impl<T: TimeProvider + ?Sized> TimeProvider for &T {
    fn now_us(&self) -> i64 {
        (**self).now_us()
    }
}

/// Monotonic clock measured from construction.
pub struct SystemTimeProvider {
    origin: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}

/// Manually driven clock for tests and headless simulation.
#[derive(Debug, Default)]
pub struct MockTimeProvider {
    now_us: Cell<i64>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&self, us: i64) {
        self.now_us.set(us);
    }

    pub fn advance(&self, delta_us: i64) {
        self.now_us.set(self.now_us.get() + delta_us);
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_us(&self) -> i64 {
        self.now_us.get()
    }
}

/// Microseconds per frame at `fps`, at least 1.
pub fn frame_interval_us(fps: u32) -> i64 {
    (1_000_000 / i64::from(fps.max(1))).max(1)
}

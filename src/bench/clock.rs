//! Time source for benchmark measurements

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;

    /// Seconds elapsed since an earlier reading of this clock.
    fn seconds_since(&self, start: Duration) -> f64 {
        self.now().saturating_sub(start).as_secs_f64()
    }
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Replays fixed readings in order, then repeats the last one.
///
/// Lets tests assert exact elapsed times.
#[derive(Debug, Default)]
pub struct ScriptedClock {
    readings: Mutex<VecDeque<Duration>>,
    last: Mutex<Duration>,
}

impl ScriptedClock {
    pub fn new(readings: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            readings: Mutex::new(readings.into_iter().collect()),
            last: Mutex::new(Duration::ZERO),
        }
    }

    /// Readings given in seconds
    pub fn from_secs_f64(readings: &[f64]) -> Self {
        Self::new(readings.iter().map(|s| Duration::from_secs_f64(*s)))
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> Duration {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let next = self
            .readings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        if let Some(reading) = next {
            *last = reading;
        }
        *last
    }
}

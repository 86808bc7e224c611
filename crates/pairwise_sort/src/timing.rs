//! Wall-clock bookkeeping: decision latencies, session stopwatch and the
//! display tick. None of it feeds back into the sort itself.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads the platform monotonic clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time, so a host
/// can keep a handle while the engine owns another.
///
/// ```
/// use std::time::Duration;
/// use pairwise_sort::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// let t0 = clock.now();
/// handle.advance(Duration::from_secs(2));
/// assert_eq!(clock.now() - t0, Duration::from_secs(2));
/// ```
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

/// Fixed-capacity ring of the time taken by recent decisions.
///
/// When full, the oldest sample is evicted on each new `record()`.
#[derive(Clone, Debug)]
pub struct LatencyWindow {
    samples: VecDeque<Duration>,
    capacity: usize,
    last_mark: Option<Instant>,
}

impl LatencyWindow {
    /// A capacity of 0 is clamped to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            last_mark: None,
        }
    }

    /// Sets the instant the next latency is measured from.
    pub fn mark(&mut self, now: Instant) {
        self.last_mark = Some(now);
    }

    /// Stores the time since the previous mark and re-marks at `now`.
    pub fn record(&mut self, now: Instant) -> Option<Duration> {
        let since = self.last_mark.replace(now)?;
        let sample = now.saturating_duration_since(since);
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        Some(sample)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples oldest-first.
    pub fn samples(&self) -> impl Iterator<Item = Duration> + '_ {
        self.samples.iter().copied()
    }

    /// Mean of the last `n` samples (or all of them, if fewer are stored).
    pub fn recent_average(&self, n: usize) -> Option<Duration> {
        let start = self.samples.len().saturating_sub(n);
        let recent = self.samples.range(start..);
        let count = recent.len();
        if count == 0 {
            return None;
        }
        let total: Duration = recent.sum();
        Some(total / u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// Projected time for `remaining` more decisions at the recent pace.
    /// `None` until at least `min_samples` latencies are known.
    pub fn project(&self, remaining: usize, window: usize, min_samples: usize) -> Option<Duration> {
        if self.samples.len() < min_samples {
            return None;
        }
        let average = self.recent_average(window)?;
        Some(average.mul_f64(remaining as f64))
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.last_mark = None;
    }
}

/// Wall-clock span of a session, frozen once stopped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stopwatch {
    started: Option<Instant>,
    stopped: Option<Instant>,
}

impl Stopwatch {
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
        self.stopped = None;
    }

    /// Freezes the reading. Later calls keep the first stop.
    pub fn stop(&mut self, now: Instant) {
        if self.started.is_some() && self.stopped.is_none() {
            self.stopped = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some() && self.stopped.is_none()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.started, self.stopped) {
            (Some(start), Some(stop)) => stop.saturating_duration_since(start),
            (Some(start), None) => now.saturating_duration_since(start),
            (None, _) => Duration::ZERO,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Periodic display tick owned by the engine.
///
/// The host polls it; a tick only signals that time-based views should be
/// refreshed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// A zero interval is clamped to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of whole intervals that came due since the last poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }
        let late = now.saturating_duration_since(due).as_nanos() / self.interval.as_nanos();
        let ticks = u32::try_from(late + 1).unwrap_or(u32::MAX);
        self.next_due = Some(due + self.interval * ticks);
        ticks
    }
}

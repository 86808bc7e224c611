use std::time::Duration;

use tracing::{debug, debug_span, info, trace};
use web_time::Instant;

use crate::config::{DEFAULT_CONFIG, EngineConfig};
use crate::cursor::{Cursor, Step};
use crate::error::Rejection;
use crate::item::{Item, ItemId, build_items, parse_lines};
use crate::ledger::{ComparisonRecord, Ledger};
use crate::progress::{ProgressEstimator, percent, raw_estimate};
use crate::timing::{Clock, LatencyWindow, Stopwatch, SystemClock, Ticker};

/// Top-level lifecycle of an [`Engine`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Nothing loaded.
    Input,
    /// A schedule is active; a comparison may be pending.
    Sorting,
    /// Schedule exhausted, items are in final order.
    Complete,
}

/// The single decision the engine is waiting for.
#[derive(Clone, Copy, Debug)]
pub struct PendingComparison<'a> {
    pub left: &'a Item,
    pub right: &'a Item,
    pub left_index: usize,
    pub right_index: usize,
}

/// Interactive Shell sort driven by externally supplied decisions.
///
/// Every operation returns as soon as the engine either finishes or needs a
/// decision it has not seen before; the host reads
/// [`pending_comparison`](Engine::pending_comparison) and answers with
/// [`submit_decision`](Engine::submit_decision).
///
/// ```
/// use pairwise_sort::{Engine, Phase};
///
/// let mut engine = Engine::new();
/// engine.initialize("b\na");
/// let pending = engine.pending_comparison().unwrap();
/// let winner = pending.right.id();
/// assert_eq!(engine.submit_decision(winner), Ok(Phase::Complete));
/// let texts: Vec<_> = engine.items().iter().map(|item| item.text()).collect();
/// assert_eq!(texts, ["a", "b"]);
/// ```
#[derive(Debug)]
pub struct Engine<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
    phase: Phase,
    items: Vec<Item>,
    ledger: Ledger,
    cursor: Cursor,
    progress: ProgressEstimator,
    latencies: LatencyWindow,
    stopwatch: Stopwatch,
    ticker: Ticker,
}

impl Engine<SystemClock> {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CONFIG, SystemClock)
    }
}

impl Default for Engine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Engine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(DEFAULT_CONFIG, clock)
    }

    pub fn with_config(config: EngineConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            phase: Phase::Input,
            items: Vec::new(),
            ledger: Ledger::new(),
            cursor: Cursor::new(0),
            progress: ProgressEstimator::new(),
            latencies: LatencyWindow::with_capacity(config.latency_capacity),
            stopwatch: Stopwatch::default(),
            ticker: Ticker::new(config.tick_interval),
        }
    }

    /// Starts a new session from newline separated text. Blank lines are
    /// dropped and surrounding whitespace trimmed.
    pub fn initialize(&mut self, text: &str) {
        self.load(parse_lines(text));
    }

    /// Starts a new session from already split lines, kept as given.
    pub fn load<S: Into<String>>(&mut self, lines: impl IntoIterator<Item = S>) {
        self.clear_session();
        self.items = build_items(lines);
        let n = self.items.len();
        let now = self.clock.now();

        if n <= 1 {
            debug!(items = n, "nothing to compare");
            self.phase = Phase::Complete;
            return;
        }

        self.cursor = Cursor::new(n);
        debug!(items = n, gaps = ?self.cursor.gaps(), "sort session started");
        self.phase = Phase::Sorting;
        self.progress.seed(n);
        self.latencies.mark(now);
        self.stopwatch.start(now);
        self.ticker.start(now);

        if self.cursor.advance(&mut self.items, &self.ledger, now) == Step::Complete {
            self.finish(now);
        }
    }

    /// Records `winner` for the pending comparison and runs the sort forward
    /// to the next unanswered comparison (or to completion).
    ///
    /// Rejected decisions change nothing.
    pub fn submit_decision(&mut self, winner: ItemId) -> Result<Phase, Rejection> {
        let _span = debug_span!("submit_decision", %winner).entered();

        let pending = match self.phase {
            Phase::Sorting => self.cursor.pending(),
            Phase::Input | Phase::Complete => None,
        };
        let Some((left_index, right_index)) = pending else {
            debug!("decision ignored: nothing pending");
            return Err(Rejection::NoPendingComparison);
        };

        let left = self.items[left_index].id();
        let right = self.items[right_index].id();
        if winner != left && winner != right {
            debug!(%left, %right, "decision ignored: not a contender");
            return Err(Rejection::NotAContender { winner });
        }

        let now = self.clock.now();
        self.expire_flags(now);
        let recorded = self.ledger.record(left, right, winner);
        debug_assert!(recorded, "pending pair {left}/{right} was already resolved");
        if let Some(latency) = self.latencies.record(now) {
            trace!(latency_ms = latency.as_millis() as u64, "decision latency");
        }

        let step = self
            .cursor
            .resolve(&mut self.items, &self.ledger, winner == right, now);
        match step {
            Step::Pending { .. } => {
                let raw = raw_estimate(
                    &self.cursor,
                    self.items.len(),
                    self.ledger.len(),
                    &self.config,
                );
                let smoothed = self.progress.update(raw, &self.config);
                trace!(raw, smoothed, "estimate updated");
            }
            Step::Complete => self.finish(now),
        }
        Ok(self.phase)
    }

    /// Drops every item and decision and returns to [`Phase::Input`].
    pub fn reset(&mut self) {
        if self.phase != Phase::Input {
            debug!(phase = ?self.phase, "session reset");
        }
        self.clear_session();
    }

    /// Polls the display tick and expires stale swap flags. Returns the number
    /// of ticks that came due. Ordering state is never touched.
    pub fn tick(&mut self) -> u32 {
        let now = self.clock.now();
        self.expire_flags(now);
        self.ticker.poll(now)
    }

    pub fn pending_comparison(&self) -> Option<PendingComparison<'_>> {
        if self.phase != Phase::Sorting {
            return None;
        }
        let (left_index, right_index) = self.cursor.pending()?;
        Some(PendingComparison {
            left: &self.items[left_index],
            right: &self.items[right_index],
            left_index,
            right_index,
        })
    }

    /// Items in their current order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn total_comparisons(&self) -> usize {
        self.ledger.len()
    }

    /// Every decision taken this session, oldest first.
    pub fn comparisons(&self) -> &[ComparisonRecord] {
        self.ledger.records()
    }

    pub fn estimated_total_comparisons(&self) -> usize {
        match self.phase {
            // nothing is loaded outside a session; the static estimate seeds
            // the damped value on entry to Sorting instead
            Phase::Input => 0,
            Phase::Sorting => {
                let smoothed = self.progress.smoothed().round() as usize;
                smoothed.max(self.ledger.len() + 1)
            }
            Phase::Complete => self.ledger.len(),
        }
    }

    /// Share of the estimated decisions already taken, in `0.0..=100.0`.
    pub fn progress_percent(&self) -> f64 {
        percent(self.total_comparisons(), self.estimated_total_comparisons())
    }

    /// Finished gap passes that were followed by another pass.
    pub fn rounds_completed(&self) -> usize {
        self.cursor.rounds_completed()
    }

    pub fn current_gap(&self) -> Option<usize> {
        match self.phase {
            Phase::Sorting => self.cursor.current_gap(),
            Phase::Input | Phase::Complete => None,
        }
    }

    /// Time since sorting started, frozen once complete.
    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed(self.clock.now())
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Projected time to finish at the recent decision pace, `None` while
    /// too few decisions have been timed.
    pub fn estimated_remaining(&self) -> Option<Duration> {
        let remaining = self
            .estimated_total_comparisons()
            .saturating_sub(self.total_comparisons());
        self.latencies.project(
            remaining,
            self.config.latency_window,
            self.config.min_latency_samples,
        )
    }

    pub fn estimated_remaining_seconds(&self) -> Option<u64> {
        self.estimated_remaining()
            .map(|remaining| remaining.as_secs_f64().round() as u64)
    }

    /// Whether the display tick is running.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn finish(&mut self, now: Instant) {
        self.phase = Phase::Complete;
        self.stopwatch.stop(now);
        self.ticker.stop();
        info!(
            items = self.items.len(),
            comparisons = self.ledger.len(),
            rounds = self.cursor.rounds_completed(),
            elapsed_ms = self.stopwatch.elapsed(now).as_millis() as u64,
            "sort complete"
        );
    }

    fn expire_flags(&mut self, now: Instant) {
        let ttl = self.config.swap_flag_duration;
        for item in &mut self.items {
            item.expire_flag(now, ttl);
        }
    }

    fn clear_session(&mut self) {
        self.phase = Phase::Input;
        self.items.clear();
        self.ledger.clear();
        self.cursor = Cursor::new(0);
        self.progress.clear();
        self.latencies.clear();
        self.stopwatch.clear();
        self.ticker.stop();
    }
}

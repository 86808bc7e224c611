//! Projection of how many decisions a session will need.
//!
//! Human-paced sorting makes the raw projection jumpy early in each gap, so
//! the figure shown to users is a damped version of it.

use crate::config::EngineConfig;
use crate::cursor::Cursor;
use crate::gaps::gaps;

/// Expected comparisons per element placed under `gap`.
#[inline]
pub fn gap_weight(gap: usize) -> f64 {
    (gap as f64).log2().max(1.0)
}

/// Up-front estimate of the comparisons needed to sort `n` items:
/// `Σ (n - gap) · max(1, log2 gap)` over the gap schedule.
pub fn static_estimate(n: usize) -> usize {
    let total: f64 = gaps(n)
        .into_iter()
        .map(|gap| n.saturating_sub(gap) as f64 * gap_weight(gap))
        .sum();
    total.round() as usize
}

/// Undamped projection while sorting: decisions already made, plus the
/// observed efficiency applied to what is left of the active gap, plus a
/// static projection for every gap not yet started.
pub fn raw_estimate(cursor: &Cursor, n: usize, comparisons: usize, config: &EngineConfig) -> f64 {
    if cursor.is_complete() {
        return comparisons as f64;
    }

    let efficiency = if cursor.placements() == 0 {
        config.efficiency_min
    } else {
        (comparisons as f64 / cursor.placements() as f64)
            .clamp(config.efficiency_min, config.efficiency_max)
    };
    let remaining_in_gap = n.saturating_sub(cursor.outer_index()) as f64;

    let future: f64 = cursor.gaps()[cursor.gap_index() + 1..]
        .iter()
        .map(|&gap| n.saturating_sub(gap) as f64 * gap_weight(gap) * config.future_gap_weight)
        .sum();

    comparisons as f64 + efficiency * remaining_in_gap + future
}

/// `min(100, done / estimate · 100)`, or 0 when nothing is estimated.
pub fn percent(done: usize, estimate: usize) -> f64 {
    if estimate == 0 {
        return 0.0;
    }
    (done as f64 / estimate as f64 * 100.0).min(100.0)
}

/// Holds the damped estimate between decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressEstimator {
    smoothed: f64,
}

impl ProgressEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from the static estimate for `n` items.
    pub fn seed(&mut self, n: usize) {
        self.smoothed = static_estimate(n) as f64;
    }

    pub fn clear(&mut self) {
        self.smoothed = 0.0;
    }

    pub fn smoothed(&self) -> f64 {
        self.smoothed
    }

    /// Moves the estimate toward `raw`: the target is first capped to within
    /// `max_estimate_step` of the previous value, then approached by
    /// `estimate_blend` of the distance.
    pub fn update(&mut self, raw: f64, config: &EngineConfig) -> f64 {
        let prev = self.smoothed;
        if prev <= 0.0 {
            self.smoothed = raw.max(0.0);
            return self.smoothed;
        }
        let capped = raw.clamp(
            prev * (1.0 - config.max_estimate_step),
            prev * (1.0 + config.max_estimate_step),
        );
        self.smoothed = prev + config.estimate_blend * (capped - prev);
        self.smoothed
    }
}

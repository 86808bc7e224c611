use std::time::Duration;

/// Tuning knobs for estimation and display timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Number of recent decision latencies kept.
    pub latency_capacity: usize,
    /// Number of most recent latencies averaged for the remaining-time estimate.
    pub latency_window: usize,
    /// Latencies required before a remaining-time estimate is reported.
    pub min_latency_samples: usize,
    /// Clamp for observed comparisons per placed element.
    pub efficiency_min: f64,
    pub efficiency_max: f64,
    /// Per-element weight multiplier projected for gaps not yet started.
    pub future_gap_weight: f64,
    /// Largest relative move of the published estimate per update.
    pub max_estimate_step: f64,
    /// Fraction of the distance to the capped raw estimate taken per update.
    pub estimate_blend: f64,
    /// Lifetime of the cosmetic swap direction flag.
    pub swap_flag_duration: Duration,
    /// Period of the elapsed-time display tick.
    pub tick_interval: Duration,
}

pub const DEFAULT_CONFIG: EngineConfig = EngineConfig {
    latency_capacity: 20,
    latency_window: 10,
    min_latency_samples: 3,
    efficiency_min: 1.5,
    efficiency_max: 3.0,
    future_gap_weight: 0.8,
    max_estimate_step: 0.15,
    estimate_blend: 0.3,
    swap_flag_duration: Duration::from_millis(600),
    tick_interval: Duration::from_secs(1),
};

impl Default for EngineConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

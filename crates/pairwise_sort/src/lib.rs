//! Human-in-the-loop Shell sort.
//!
//! The engine never compares items itself. It walks the classic halving
//! Shell sort schedule, stops whenever it needs a "which comes first"
//! answer it has not been given before, and resumes once the host supplies
//! one. Answers are memoized, so no unordered pair is ever asked twice.

mod config;
mod cursor;
mod engine;
mod error;
mod gaps;
mod item;
mod ledger;
mod progress;
mod timing;

pub use config::{DEFAULT_CONFIG, EngineConfig};
pub use cursor::{Cursor, Step};
pub use engine::{Engine, PendingComparison, Phase};
pub use error::Rejection;
pub use gaps::{GapSequence, gaps};
pub use item::{Direction, Item, ItemId, parse_lines};
pub use ledger::{ComparisonRecord, Ledger};
pub use progress::{ProgressEstimator, gap_weight, percent, raw_estimate, static_estimate};
pub use timing::{Clock, LatencyWindow, ManualClock, Stopwatch, SystemClock, Ticker};

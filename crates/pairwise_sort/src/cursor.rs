use tracing::trace;
use web_time::Instant;

use crate::gaps::gaps;
use crate::item::{Item, swap_items};
use crate::ledger::Ledger;

/// Where the cursor stopped after advancing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// Needs a decision between positions `left` and `right` (`left < right`).
    Pending { left: usize, right: usize },
    Complete,
}

/// Suspendable gapped insertion sort.
///
/// For the active gap, `outer` walks `gap..n` and names the next element to
/// place; `insertion` is the current position of the element being placed and
/// moves backward by `gap` each time it wins. The element being placed is
/// always compared against `insertion - gap`.
#[derive(Clone, Debug)]
pub struct Cursor {
    gaps: Vec<usize>,
    gap_index: usize,
    outer: usize,
    insertion: usize,
    placements: usize,
    rounds_completed: usize,
    pending: Option<(usize, usize)>,
}

impl Cursor {
    pub fn new(n: usize) -> Self {
        let gaps = gaps(n);
        let first = gaps.first().copied().unwrap_or(0);
        Self {
            gaps,
            gap_index: 0,
            outer: first,
            insertion: first,
            placements: 0,
            rounds_completed: 0,
            pending: None,
        }
    }

    pub fn gaps(&self) -> &[usize] {
        &self.gaps
    }

    pub fn gap_index(&self) -> usize {
        self.gap_index
    }

    /// Active gap, `None` once the schedule is exhausted.
    pub fn current_gap(&self) -> Option<usize> {
        self.gaps.get(self.gap_index).copied()
    }

    /// Next element to place under the active gap.
    pub fn outer_index(&self) -> usize {
        self.outer
    }

    pub fn insertion_index(&self) -> usize {
        self.insertion
    }

    /// Elements settled so far, summed over all gaps.
    pub fn placements(&self) -> usize {
        self.placements
    }

    pub fn rounds_completed(&self) -> usize {
        self.rounds_completed
    }

    pub fn pending(&self) -> Option<(usize, usize)> {
        self.pending
    }

    pub fn is_complete(&self) -> bool {
        self.gap_index >= self.gaps.len()
    }

    /// Runs the schedule forward, replaying memoized decisions, until a
    /// decision is missing from `ledger` or the schedule is exhausted.
    pub fn advance(&mut self, items: &mut [Item], ledger: &Ledger, now: Instant) -> Step {
        let n = items.len();
        loop {
            let Some(gap) = self.current_gap() else {
                self.pending = None;
                return Step::Complete;
            };

            if self.outer >= n {
                self.next_gap();
                continue;
            }

            if self.insertion < gap {
                self.settle();
                continue;
            }

            let compare = self.insertion - gap;
            let mover = items[self.insertion].id();
            match ledger.winner(items[compare].id(), mover) {
                Some(winner) if winner == mover => {
                    trace!(gap, from = self.insertion, to = compare, "replaying memoized swap");
                    self.step_back(items, compare, now);
                }
                Some(_) => {
                    trace!(gap, position = self.insertion, "replaying memoized settle");
                    self.settle();
                }
                None => {
                    self.pending = Some((compare, self.insertion));
                    return Step::Pending {
                        left: compare,
                        right: self.insertion,
                    };
                }
            }
        }
    }

    /// Applies the decision for the pending pair and advances again.
    ///
    /// `mover_won` is true when the element being placed (the right side of
    /// the pending pair) was chosen. Does nothing if no pair is pending.
    pub fn resolve(
        &mut self,
        items: &mut [Item],
        ledger: &Ledger,
        mover_won: bool,
        now: Instant,
    ) -> Step {
        let Some((compare, _)) = self.pending.take() else {
            return if self.is_complete() {
                Step::Complete
            } else {
                self.advance(items, ledger, now)
            };
        };

        if mover_won {
            self.step_back(items, compare, now);
        } else {
            self.settle();
        }
        self.advance(items, ledger, now)
    }

    fn step_back(&mut self, items: &mut [Item], compare: usize, now: Instant) {
        swap_items(items, compare, self.insertion, now);
        self.insertion = compare;
    }

    fn settle(&mut self) {
        self.placements += 1;
        self.outer += 1;
        self.insertion = self.outer;
    }

    fn next_gap(&mut self) {
        self.gap_index += 1;
        if let Some(&gap) = self.gaps.get(self.gap_index) {
            self.rounds_completed += 1;
            self.outer = gap;
            self.insertion = gap;
        }
    }
}

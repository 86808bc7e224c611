use crate::item::ItemId;

/// A resolved decision between two items. `winner` is one of the pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ComparisonRecord {
    pub left: ItemId,
    pub right: ItemId,
    pub winner: ItemId,
}

impl ComparisonRecord {
    /// True when this record resolves the unordered pair `{a, b}`.
    pub fn covers(&self, a: ItemId, b: ItemId) -> bool {
        (self.left == a && self.right == b) || (self.left == b && self.right == a)
    }
}

/// Append-only memo of every decision taken in the current session.
///
/// - Lookups ignore pair order: `(a, b)` matches a stored `(b, a)`.
/// - At most one record exists per unordered pair; [`Ledger::record`]
///   refuses duplicates instead of overwriting.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    records: Vec<ComparisonRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a decision. Returns `false` (and stores nothing) when the pair
    /// is already resolved or `winner` is not part of the pair.
    pub fn record(&mut self, left: ItemId, right: ItemId, winner: ItemId) -> bool {
        if left == right || (winner != left && winner != right) {
            return false;
        }
        if self.lookup(left, right).is_some() {
            return false;
        }
        self.records.push(ComparisonRecord {
            left,
            right,
            winner,
        });
        true
    }

    pub fn lookup(&self, a: ItemId, b: ItemId) -> Option<&ComparisonRecord> {
        self.records.iter().find(|record| record.covers(a, b))
    }

    pub fn winner(&self, a: ItemId, b: ItemId) -> Option<ItemId> {
        self.lookup(a, b).map(|record| record.winner)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Decisions in the order they were taken.
    pub fn records(&self) -> &[ComparisonRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

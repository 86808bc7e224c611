use std::fmt;

use web_time::Instant;

/// Opaque identity of an item within one sort session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ItemId(usize);

impl ItemId {
    pub(crate) fn new(raw: usize) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which way an item travelled in its most recent swap.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
}

/// One line of user input taking part in the sort.
///
/// Only the position of an item inside the engine's list changes while
/// sorting; `id`, `text` and `original_index` are fixed at creation.
#[derive(Clone, Debug)]
pub struct Item {
    id: ItemId,
    text: String,
    original_index: usize,
    flag: Option<(Direction, Instant)>,
}

impl Item {
    pub(crate) fn new(id: ItemId, text: String, original_index: usize) -> Self {
        Self {
            id,
            text,
            original_index,
            flag: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position in the input before any sorting happened.
    pub fn original_index(&self) -> usize {
        self.original_index
    }

    /// Display-only hint set by the last swap. Never consulted by the sort.
    pub fn direction(&self) -> Option<Direction> {
        self.flag.map(|(direction, _)| direction)
    }

    pub(crate) fn flag(&mut self, direction: Direction, now: Instant) {
        self.flag = Some((direction, now));
    }

    /// Drops the direction flag once it is older than `ttl`.
    pub(crate) fn expire_flag(&mut self, now: Instant, ttl: std::time::Duration) -> bool {
        match self.flag {
            Some((_, set_at)) if now.saturating_duration_since(set_at) >= ttl => {
                self.flag = None;
                true
            }
            _ => false,
        }
    }
}

/// Splits raw input into trimmed, non-empty lines in input order.
pub fn parse_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Builds the initial item list, ids assigned in input order.
pub(crate) fn build_items<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Vec<Item> {
    lines
        .into_iter()
        .enumerate()
        .map(|(index, text)| Item::new(ItemId::new(index), text.into(), index))
        .collect()
}

/// Exchanges two positions and tags both items with the direction they moved.
pub(crate) fn swap_items(items: &mut [Item], a: usize, b: usize, now: Instant) {
    let (upper, lower) = if a < b { (a, b) } else { (b, a) };
    items[upper].flag(Direction::Down, now);
    items[lower].flag(Direction::Up, now);
    items.swap(upper, lower);
}

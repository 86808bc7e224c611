//! Property-based checks for the interactive sort engine.
//!
//! 1. A consistent decision source always yields a fully sorted list.
//! 2. No unordered pair is ever asked (or recorded) twice.
//! 3. Arbitrary decisions terminate within n(n-1)/2 answers.
//! 4. Total comparisons never decrease; progress reaches 100 only on completion.
//! 5. Reset is idempotent and restores the fresh state.
//! 6. The gap schedule is strictly decreasing and ends at 1.

use std::collections::HashSet;

use pairwise_sort::{Engine, Item, ItemId, Phase, gaps};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn values_strategy(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(0u32..1000, 0..=max_len)
}

fn input_text(values: &[u32]) -> String {
    values
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn smaller_wins(engine: &Engine) -> Option<ItemId> {
    let pending = engine.pending_comparison()?;
    let left: u32 = pending.left.text().parse().ok()?;
    let right: u32 = pending.right.text().parse().ok()?;
    Some(if right < left {
        pending.right.id()
    } else {
        pending.left.id()
    })
}

fn unordered(a: ItemId, b: ItemId) -> (ItemId, ItemId) {
    if a < b { (a, b) } else { (b, a) }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Order fidelity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn consistent_answers_sort_ascending(values in values_strategy(48)) {
        let mut engine = Engine::new();
        engine.initialize(&input_text(&values));

        while let Some(winner) = smaller_wins(&engine) {
            prop_assert!(engine.submit_decision(winner).is_ok());
        }

        let actual: Vec<u32> = engine
            .items()
            .iter()
            .map(|item| item.text().parse().unwrap())
            .collect();
        let mut expected = values.clone();
        expected.sort_unstable();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(engine.phase(), Phase::Complete);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2 + 3. Ledger uniqueness and termination under arbitrary answers
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_answers_never_repeat_a_pair(
        len in 0usize..40,
        coins in proptest::collection::vec(any::<bool>(), 0..800),
    ) {
        let mut engine = Engine::new();
        engine.load((0..len).map(|v| format!("item {v}")));

        let bound = len * len.saturating_sub(1) / 2;
        let mut asked = HashSet::new();
        let mut coins = coins.into_iter().cycle();
        while let Some(pending) = engine.pending_comparison() {
            let pair = unordered(pending.left.id(), pending.right.id());
            prop_assert!(asked.insert(pair), "pair asked twice: {:?}", pair);
            let winner = if coins.next().unwrap_or(false) {
                pending.left.id()
            } else {
                pending.right.id()
            };
            engine.submit_decision(winner).unwrap();
            prop_assert!(asked.len() <= bound);
        }

        prop_assert!(engine.is_finished());
        let recorded: HashSet<_> = engine
            .comparisons()
            .iter()
            .map(|record| unordered(record.left, record.right))
            .collect();
        prop_assert_eq!(recorded.len(), engine.total_comparisons());
        prop_assert_eq!(engine.items().len(), len);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Progress monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn progress_is_monotone_and_completes_at_hundred(values in values_strategy(40)) {
        let mut engine = Engine::new();
        engine.initialize(&input_text(&values));

        let mut last = engine.total_comparisons();
        while let Some(winner) = smaller_wins(&engine) {
            prop_assert!(engine.progress_percent() < 100.0);
            engine.submit_decision(winner).unwrap();
            prop_assert!(engine.total_comparisons() >= last);
            last = engine.total_comparisons();
        }

        if engine.total_comparisons() > 0 {
            prop_assert_eq!(engine.progress_percent(), 100.0);
        }
        prop_assert_eq!(engine.estimated_total_comparisons(), engine.total_comparisons());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Reset
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reset_restores_fresh_state(values in values_strategy(20), answers in 0usize..10) {
        let mut engine = Engine::new();
        engine.initialize(&input_text(&values));
        for _ in 0..answers {
            let Some(winner) = smaller_wins(&engine) else { break };
            engine.submit_decision(winner).unwrap();
        }

        engine.reset();
        engine.reset();

        let fresh = Engine::new();
        prop_assert_eq!(engine.phase(), fresh.phase());
        prop_assert!(engine.items().is_empty());
        prop_assert!(engine.pending_comparison().is_none());
        prop_assert_eq!(engine.total_comparisons(), 0);
        prop_assert_eq!(engine.estimated_total_comparisons(), fresh.estimated_total_comparisons());
        prop_assert_eq!(engine.elapsed(), fresh.elapsed());
        prop_assert_eq!(engine.estimated_remaining(), None);
        prop_assert!(!engine.is_ticking());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Gap schedule
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn gap_schedule_halves_down_to_one(n in 0usize..100_000) {
        let schedule = gaps(n);
        if n <= 1 {
            prop_assert!(schedule.is_empty());
        } else {
            prop_assert_eq!(schedule[0], n / 2);
            prop_assert_eq!(*schedule.last().unwrap(), 1);
        }
        for pair in schedule.windows(2) {
            prop_assert!(pair[0] > pair[1]);
            prop_assert_eq!(pair[1], pair[0] / 2);
        }
    }
}

#[test]
fn items_keep_identity_through_sorting() {
    let mut engine = Engine::new();
    engine.initialize("c\nb\na\nd");
    let before: Vec<(ItemId, String)> = engine
        .items()
        .iter()
        .map(|item| (item.id(), item.text().to_owned()))
        .collect();

    while let Some(pending) = engine.pending_comparison() {
        let winner = if pending.right.text() < pending.left.text() {
            pending.right.id()
        } else {
            pending.left.id()
        };
        engine.submit_decision(winner).unwrap();
    }

    let texts: Vec<&str> = engine.items().iter().map(Item::text).collect();
    assert_eq!(texts, ["a", "b", "c", "d"]);
    for item in engine.items() {
        let (_, text) = &before[item.original_index()];
        assert_eq!(text, item.text());
        assert_eq!(before[item.original_index()].0, item.id());
    }
}

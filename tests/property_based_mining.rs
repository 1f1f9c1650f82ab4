//! Property-based tests for the mining invariants, with proptest.

use proptest::collection::vec;
use proptest::prelude::*;
use seqmine::mine::{ContiguousMiner, GraspMiner, SpmParameters};
use seqmine::visitations::{VisitRange, Visitations};
use std::collections::HashMap;

/// Small databases over a small alphabet keep the search space dense
/// enough to produce patterns.
fn arb_database() -> impl Strategy<Value = Vec<Vec<u32>>> {
    vec(vec(0u32..6, 1..12), 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_apriori_monotonicity(db in arb_database(), min_sup in 1u32..4) {
        let params = SpmParameters::new(db, min_sup).unwrap();
        let patterns = ContiguousMiner::all().run(&params);
        let support: HashMap<Vec<u32>, u32> = patterns
            .iter()
            .map(|p| (p.sequence.clone(), p.support))
            .collect();

        for pattern in &patterns {
            if pattern.len() < 2 {
                continue;
            }
            let prefix = &pattern.sequence[..pattern.len() - 1];
            let suffix = &pattern.sequence[1..];
            // every frequent pattern's sub-patterns are frequent too, with
            // at least its support
            prop_assert!(support[prefix] >= pattern.support);
            prop_assert!(support[suffix] >= pattern.support);
        }
    }

    #[test]
    fn prop_mining_is_idempotent(db in arb_database(), min_sup in 1u32..4) {
        let params = SpmParameters::new(db, min_sup).unwrap();
        let first = ContiguousMiner::closed().run(&params);
        let second = ContiguousMiner::closed().run(&params);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_every_mined_pattern_meets_support(db in arb_database(), min_sup in 1u32..4) {
        let params = SpmParameters::new(db.clone(), min_sup).unwrap();
        for pattern in ContiguousMiner::all().run(&params) {
            prop_assert!(pattern.support >= min_sup);
            // the reported support never exceeds the sequences that
            // actually contain the pattern contiguously
            let containing = db
                .iter()
                .filter(|seq| seq.windows(pattern.len()).any(|w| w == pattern.sequence))
                .count() as u32;
            prop_assert_eq!(pattern.support, containing);
        }
    }

    #[test]
    fn prop_grasp_is_deterministic(db in arb_database(), min_sup in 1u32..3, max_gap in 1usize..4) {
        let params = SpmParameters::new(db, min_sup)
            .unwrap()
            .with_max_gap(max_gap)
            .unwrap();
        let miner = GraspMiner::new(params.min_sup(), params.max_gap());
        prop_assert_eq!(miner.run_database(&params), miner.run_database(&params));
    }

    #[test]
    fn prop_try_connect_gap_boundary(start in 0usize..50, span in 1usize..5, gap in 1usize..6) {
        let pre_end = start + span;
        let mut pre = Visitations::new();
        pre.add_visitor(0, VisitRange::new(start, pre_end));

        let mut at_gap = Visitations::new();
        at_gap.add_visitor(0, VisitRange::new(pre_end + gap, pre_end + gap + 1));
        let joined = Visitations::try_connect(&pre, &at_gap, gap, 1);
        prop_assert_eq!(joined.support(), 1);

        let mut past_gap = Visitations::new();
        past_gap.add_visitor(0, VisitRange::new(pre_end + gap + 1, pre_end + gap + 2));
        let joined = Visitations::try_connect(&pre, &past_gap, gap, 1);
        prop_assert_eq!(joined.support(), 0);
    }

    #[test]
    fn prop_union_cover_is_monotone(
        a in vec((0usize..4, 0usize..20), 1..8),
        b in vec((0usize..4, 0usize..20), 1..8),
    ) {
        let build = |entries: &[(usize, usize)]| {
            let mut v = Visitations::new();
            for &(seq, at) in entries {
                v.add_visitor(seq, VisitRange::new(at, at + 1));
            }
            v
        };
        let left = build(&a);
        let right = build(&b);
        let mut union = left.clone();
        union.union(&right);
        prop_assert!(union.cover() >= left.cover());
        prop_assert!(union.support() >= left.support());
        prop_assert!(union.support() >= right.support());
    }
}

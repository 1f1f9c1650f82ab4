use super::{VisitRange, Visitations};

fn visits(entries: &[(usize, (usize, usize))]) -> Visitations {
    let mut v = Visitations::new();
    for &(seq_id, (start, end)) in entries {
        v.add_visitor(seq_id, VisitRange::new(start, end));
    }
    v
}

#[test]
fn test_support_counts_distinct_sequences() {
    let v = visits(&[(0, (0, 1)), (0, (4, 5)), (2, (1, 2))]);
    assert_eq!(v.support(), 2);
}

#[test]
fn test_cover_counts_repeat_visits() {
    let v = visits(&[(0, (0, 1)), (0, (4, 5)), (2, (1, 2))]);
    // two 2-wide ranges in sequence 0 plus one in sequence 2
    assert_eq!(v.cover(), 6);
}

#[test]
fn test_union_introduces_new_sequence_ids() {
    let mut a = visits(&[(0, (0, 1))]);
    let b = visits(&[(1, (3, 4))]);
    a.union(&b);
    assert_eq!(a.support(), 2);
    assert_eq!(a.cover(), 4);
}

#[test]
fn test_union_absorbs_contained_ranges() {
    let mut a = visits(&[(0, (0, 5))]);
    let b = visits(&[(0, (2, 3))]);
    a.union(&b);
    assert_eq!(a.cover(), 6);
    assert_eq!(a.ranges(0).unwrap().len(), 1);
}

#[test]
fn test_add_complement_ignores_absent_sequence_ids() {
    let mut a = visits(&[(0, (4, 5))]);
    let b = visits(&[(0, (0, 1)), (7, (0, 1))]);
    a.add_complement(&b);
    assert_eq!(a.support(), 1);
    assert_eq!(a.ranges(0).unwrap().len(), 2);
    assert!(a.ranges(7).is_none());
}

#[test]
fn test_minus_removes_overlap_and_drops_empty_entries() {
    let a = visits(&[(0, (0, 9)), (1, (0, 1))]);
    let b = visits(&[(0, (4, 5)), (1, (0, 1))]);
    let out = a.minus(&b);
    assert_eq!(out.support(), 1);
    let ranges: Vec<_> = out.ranges(0).unwrap().iter().copied().collect();
    assert_eq!(
        ranges,
        vec![VisitRange::new(0, 3), VisitRange::new(6, 9)]
    );
}

#[test]
fn test_minus_without_overlap_keeps_everything() {
    let a = visits(&[(0, (0, 1))]);
    let b = visits(&[(1, (0, 1))]);
    assert_eq!(a.minus(&b), a);
}

#[test]
fn test_try_connect_disjoint_ids_is_empty() {
    let pre = visits(&[(0, (0, 1))]);
    let post = visits(&[(1, (2, 3))]);
    let joined = Visitations::try_connect(&pre, &post, 2, 1);
    assert_eq!(joined.support(), 0);
    assert!(joined.is_empty());
}

#[test]
fn test_try_connect_gap_boundary() {
    let pre = visits(&[(0, (0, 1))]);
    let at_gap = visits(&[(0, (3, 4))]);
    let past_gap = visits(&[(0, (4, 5))]);

    let joined = Visitations::try_connect(&pre, &at_gap, 2, 1);
    assert_eq!(joined.support(), 1);
    assert_eq!(joined.cover(), 4);

    let joined = Visitations::try_connect(&pre, &past_gap, 2, 1);
    assert_eq!(joined.support(), 0);
}

#[test]
fn test_try_connect_merges_touching_join() {
    let pre = visits(&[(0, (0, 1))]);
    let post = visits(&[(0, (1, 2))]);
    let joined = Visitations::try_connect(&pre, &post, 1, 1);
    assert_eq!(joined.support(), 1);
    // the two ranges share position 1 and collapse into one span
    assert_eq!(joined.ranges(0).unwrap().len(), 1);
    assert_eq!(joined.cover(), 3);
}

#[test]
fn test_try_connect_joins_at_most_one_post_range() {
    let pre = visits(&[(0, (0, 1))]);
    let post = visits(&[(0, (1, 2)), (0, (5, 6))]);
    let joined = Visitations::try_connect(&pre, &post, 10, 1);
    assert_eq!(joined.cover(), 3);
}

#[test]
fn test_try_connect_early_exit_when_support_unreachable() {
    // both sequences fail to connect, so with min_sup 2 the scan stops
    let pre = visits(&[(0, (0, 1)), (1, (0, 1))]);
    let post = visits(&[(0, (9, 10)), (1, (9, 10))]);
    let joined = Visitations::try_connect(&pre, &post, 1, 2);
    assert_eq!(joined.support(), 0);
}

#[test]
fn test_try_connect_touching_joins_all_pairs() {
    let pre = visits(&[(0, (0, 1)), (0, (4, 5))]);
    let post = visits(&[(0, (1, 2)), (0, (5, 6))]);
    let joined = Visitations::try_connect_touching(&pre, &post);
    assert_eq!(joined.support(), 1);
    // both occurrence chains join: [0,2] and [4,6]
    assert_eq!(joined.ranges(0).unwrap().len(), 2);
    assert_eq!(joined.cover(), 6);
}

#[test]
fn test_try_connect_touching_requires_shared_boundary_or_adjacency() {
    let pre = visits(&[(0, (0, 1))]);
    let too_far = visits(&[(0, (3, 4))]);
    let joined = Visitations::try_connect_touching(&pre, &too_far);
    assert_eq!(joined.support(), 0);
}

use super::{PatternClosure, Trie};

#[test]
fn test_build_and_query() {
    let mut t: Trie<char> = Trie::new();
    t.add(&['a'], usize::MAX, false, false);
    t.add(&['t', 'o'], usize::MAX, false, false);
    t.add(&['t', 'e', 'a'], usize::MAX, false, false);
    t.add(&['t', 'e', 'd'], usize::MAX, false, false);
    t.add(&['t', 'e', 'n'], usize::MAX, false, false);
    t.add(&['i'], usize::MAX, false, false);
    t.add(&['i', 'n'], usize::MAX, false, false);
    t.add(&['i', 'n', 'n'], usize::MAX, false, false);

    assert_eq!(t.frequency_of(&['a']), 1);
    assert_eq!(t.frequency_of(&['t', 'o']), 1);
    assert_eq!(t.frequency_of(&['t', 'e']), 1);
    assert_eq!(t.frequency_of(&['t', 'e', 'd']), 1);
    assert_eq!(t.frequency_of(&['i', 'n', 'n']), 1);
    assert_eq!(t.frequency_of(&['i', 'n']), 1);
    assert_eq!(t.frequency_of(&['i']), 1);
    assert_eq!(t.frequency_of(&['z']), 0);
}

#[test]
fn test_add_respects_max_new_nodes() {
    let mut t: Trie<char> = Trie::new();
    // nothing exists yet, so a two-symbol path needs two new nodes
    assert!(!t.add(&['a', 'b'], 1, false, false));
    assert_eq!(t.frequency_of(&['a']), 0);

    assert!(t.add(&['a'], 1, false, false));
    assert!(t.add(&['a', 'b'], 1, false, false));
    assert_eq!(t.frequency_of(&['a', 'b']), 1);
}

#[test]
fn test_locked_terminal_counts_once() {
    let mut t: Trie<char> = Trie::new();
    assert!(t.add(&['a', 'b', 'c'], 3, true, false));
    // locked: a second insert within the same scan must not count
    assert!(!t.add(&['a', 'b', 'c'], 3, true, false));
    assert_eq!(t.frequency_of(&['a', 'b', 'c']), 1);

    // a different path is unaffected
    assert!(t.add(&['a', 'b', 'd'], 3, true, false));
    assert_eq!(t.frequency_of(&['a', 'b', 'd']), 1);
    assert_eq!(t.frequency_of(&['a', 'b']), 1);
    assert_eq!(t.frequency_of(&['a']), 1);

    // after unlocking (a new source sequence) the count grows again
    t.unlock_all();
    assert!(t.add(&['a', 'b', 'c'], 3, true, false));
    assert_eq!(t.frequency_of(&['a', 'b', 'c']), 2);
}

#[test]
fn test_supersede_prunes_below_support() {
    let mut t: Trie<char> = Trie::new();
    t.add(&['a'], 1, false, true);
    t.add(&['a'], 1, false, true);
    t.add(&['a', 'b'], 1, false, true);
    t.add(&['a', 'b'], 1, false, true);
    t.add(&['a', 'c'], 1, false, true);

    assert!(t.supersede(&['a', 'b'], 2, PatternClosure::Closed));
    assert_eq!(t.frequency_of(&['a', 'b']), 2);

    assert!(!t.supersede(&['a', 'c'], 2, PatternClosure::Closed));
    assert_eq!(t.frequency_of(&['a', 'c']), 0);

    // missing paths supersede to nothing
    assert!(!t.supersede(&['a', 'z'], 2, PatternClosure::Closed));
}

#[test]
fn test_supersede_closed_unmarks_equal_support_prefix() {
    let mut t: Trie<u32> = Trie::new();
    t.add(&[1], 1, false, true);
    t.add(&[1], 1, false, true);
    t.add(&[1, 2], 1, false, true);
    t.add(&[1, 2], 1, false, true);

    assert!(t.supersede(&[1, 2], 2, PatternClosure::Closed));

    // prefix (1) has the same support as (1,2): not closed, unmarked
    let mut iter = t.pattern_iter(true);
    while let Some(pattern) = iter.next() {
        match pattern.as_slice() {
            [1, 2] => assert!(iter.is_marked()),
            [1] => assert!(!iter.is_marked()),
            other => panic!("unexpected pattern {other:?}"),
        }
    }
}

#[test]
fn test_supersede_closed_unmarks_equal_support_suffix() {
    let mut t: Trie<u32> = Trie::new();
    // suffix (2) appears under the root on its own path
    t.add(&[2], 1, false, true);
    t.add(&[2], 1, false, true);
    t.add(&[1], 1, false, true);
    t.add(&[1], 1, false, true);
    t.add(&[1, 2], 1, false, true);
    t.add(&[1, 2], 1, false, true);

    assert!(t.supersede(&[1, 2], 2, PatternClosure::Closed));

    let mut iter = t.pattern_iter(true);
    let mut saw_suffix = false;
    while let Some(pattern) = iter.next() {
        if pattern.as_slice() == [2] {
            saw_suffix = true;
            assert!(!iter.is_marked());
        }
    }
    assert!(saw_suffix);
}

#[test]
fn test_supersede_max_always_unmarks_subpatterns() {
    let mut t: Trie<u32> = Trie::new();
    t.add(&[1], 1, false, true);
    t.add(&[2], 1, false, true);
    t.add(&[1, 2], 1, false, true);

    assert!(t.supersede(&[1, 2], 1, PatternClosure::Max));

    let mut iter = t.pattern_iter(true);
    while let Some(pattern) = iter.next() {
        let expect_marked = pattern.as_slice() == [1, 2];
        assert_eq!(iter.is_marked(), expect_marked, "pattern {pattern:?}");
    }
}

#[test]
fn test_pattern_iter_yields_paths_then_prefixes() {
    let mut t: Trie<char> = Trie::new();
    t.add(&['a', 'b'], usize::MAX, false, false);
    t.add(&['a', 'c'], usize::MAX, false, false);

    let mut iter = t.pattern_iter(true);
    let mut seen = Vec::new();
    while let Some(pattern) = iter.next() {
        seen.push(pattern);
    }
    assert_eq!(
        seen,
        vec![
            vec!['a', 'b'],
            vec!['a'],
            vec!['a', 'c'],
            vec!['a'],
        ]
    );
}

#[test]
fn test_pattern_iter_without_subpatterns_yields_leaf_paths_only() {
    let mut t: Trie<char> = Trie::new();
    t.add(&['a', 'b'], usize::MAX, false, false);
    t.add(&['a', 'c'], usize::MAX, false, false);

    let mut iter = t.pattern_iter(false);
    let mut seen = Vec::new();
    while let Some(pattern) = iter.next() {
        seen.push(pattern);
    }
    assert_eq!(seen, vec![vec!['a', 'b'], vec!['a', 'c']]);
}

#[test]
fn test_pattern_iter_unmark_prevents_reemission() {
    let mut t: Trie<char> = Trie::new();
    t.add(&['a', 'b'], usize::MAX, false, false);
    t.add(&['a', 'c'], usize::MAX, false, false);
    // mark the shared prefix by superseding it
    t.supersede(&['a'], 1, PatternClosure::All);

    let mut emitted = Vec::new();
    let mut iter = t.pattern_iter(true);
    while let Some(pattern) = iter.next() {
        if iter.is_marked() {
            iter.unmark();
            emitted.push(pattern);
        }
    }
    // the prefix (a) is visited under both branches but emitted once
    assert_eq!(emitted, vec![vec!['a']]);
}

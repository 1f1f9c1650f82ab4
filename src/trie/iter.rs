use super::Trie;

/// Stateful pattern iterator over a [`Trie`].
///
/// Walks the root-to-leaf paths depth first, in child-insertion order. When
/// sub-patterns are requested every call after a full path yields the next
/// shorter prefix of it until the path is spent, at which point the walk
/// advances to the next branch. The terminal node of the most recent
/// pattern stays addressable so callers can read its count and mark, or
/// revoke the mark after emitting.
pub struct PatternIter<'a, T> {
    trie: &'a mut Trie<T>,
    show_sub_patterns: bool,
    // (node id, next child slot) per level; seeded with the root
    stack: Vec<(usize, usize)>,
    // current root-to-leaf path, root excluded
    path: Vec<usize>,
    // how many prefixes of `path` are still to be yielded
    remaining: usize,
    end: Option<usize>,
}

impl<'a, T: Clone + PartialEq> PatternIter<'a, T> {
    pub(super) fn new(trie: &'a mut Trie<T>, show_sub_patterns: bool) -> Self {
        Self {
            trie,
            show_sub_patterns,
            stack: vec![(super::ROOT, 0)],
            path: Vec::new(),
            remaining: 0,
            end: None,
        }
    }

    /// The next pattern, or `None` once every path (and, when requested,
    /// every prefix) has been yielded.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Vec<T>> {
        if self.remaining == 0 {
            if !self.advance_to_next_leaf() {
                self.end = None;
                return None;
            }
            self.remaining = self.path.len();
        }

        let pattern = self.path[..self.remaining]
            .iter()
            .map(|&id| {
                self.trie
                    .node_value(id)
                    .cloned()
                    .expect("only the root lacks a value and it is never in a path")
            })
            .collect();
        self.end = Some(self.path[self.remaining - 1]);
        self.remaining -= 1;
        if !self.show_sub_patterns {
            self.remaining = 0;
        }
        Some(pattern)
    }

    /// Support count of the most recently yielded pattern's terminal.
    pub fn count(&self) -> u32 {
        self.end.map(|id| self.trie.node_count(id)).unwrap_or(0)
    }

    /// Whether the most recently yielded pattern ends in a marked node.
    pub fn is_marked(&self) -> bool {
        self.end.map(|id| self.trie.is_marked(id)).unwrap_or(false)
    }

    /// Revoke the mark on the most recently yielded pattern's terminal, so
    /// a later visit under a different sub-path does not re-emit it.
    pub fn unmark(&mut self) {
        if let Some(id) = self.end {
            self.trie.unmark(id);
        }
    }

    /// Descend to the next unvisited leaf, leftmost branch first. Returns
    /// false when the whole trie has been walked.
    fn advance_to_next_leaf(&mut self) -> bool {
        loop {
            let Some(&(node, cursor)) = self.stack.last() else {
                return false;
            };
            let children = self.trie.children_of(node);
            if cursor < children.len() {
                let child = children[cursor];
                self.stack
                    .last_mut()
                    .expect("stack checked non-empty above")
                    .1 += 1;
                self.stack.push((child, 0));
                self.path.push(child);
                if self.trie.children_of(child).is_empty() {
                    return true;
                }
            } else {
                self.stack.pop();
                self.path.pop();
            }
        }
    }
}

//! Visitation tracking: which index ranges of which source sequences an
//! edge, path, or pattern occupies.
//!
//! Two metrics derive from a visitation record: *support* (how many distinct
//! sequences visit) and *cover* (how many sequence positions are spanned in
//! total, counting repeat visits within one sequence separately). The
//! gap-bounded joins defined here are the primitive behind both edge fusion
//! in the transition graph and path growth in the representative extractor.

mod range;

pub use range::{RangeSet, VisitRange};

use std::collections::BTreeMap;

/// Per-sequence record of the index ranges visited.
///
/// Sequence ids are kept sorted so that iteration, equality, and the mining
/// passes built on top are deterministic for a fixed input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visitations {
    visitors: BTreeMap<usize, RangeSet>,
}

impl Visitations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `seq_id` visits `range`. Overlapping ranges for the same
    /// sequence merge; touching ones stay separate.
    pub fn add_visitor(&mut self, seq_id: usize, range: VisitRange) {
        self.visitors.entry(seq_id).or_default().add(range);
    }

    /// Number of distinct sequences that made a visit.
    pub fn support(&self) -> u32 {
        self.visitors.len() as u32
    }

    /// Total positions spanned across every sequence and every range.
    pub fn cover(&self) -> u32 {
        self.visitors.values().map(|set| set.cover() as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    pub fn ranges(&self, seq_id: usize) -> Option<&RangeSet> {
        self.visitors.get(&seq_id)
    }

    pub fn seq_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.visitors.keys().copied()
    }

    /// Merge every range of `other` into this record, introducing sequence
    /// ids not seen before. Ranges already wholly contained dissolve into
    /// the existing ones.
    pub fn union(&mut self, other: &Visitations) {
        for (&seq_id, other_set) in &other.visitors {
            let set = self.visitors.entry(seq_id).or_default();
            for range in other_set.iter() {
                set.add(*range);
            }
        }
    }

    /// Like [`union`](Self::union), but only for sequence ids already
    /// present in this record. Used to fold a path's earlier coverage back
    /// into a freshly joined result without resurrecting sequences that
    /// failed to connect.
    pub fn add_complement(&mut self, other: &Visitations) {
        for (seq_id, set) in &mut self.visitors {
            if let Some(other_set) = other.visitors.get(seq_id) {
                for range in other_set.iter() {
                    set.add(*range);
                }
            }
        }
    }

    /// Subtract the overlapping portions of `other`, per sequence id.
    /// Sequences whose every range is consumed disappear from the result;
    /// no empty entries are kept.
    pub fn minus(&self, other: &Visitations) -> Visitations {
        let mut out = Visitations::new();
        for (&seq_id, cur_set) in &self.visitors {
            match other.visitors.get(&seq_id) {
                None => {
                    out.visitors.insert(seq_id, cur_set.clone());
                }
                Some(other_set) => {
                    let remainder = cur_set.minus(other_set);
                    if !remainder.is_empty() {
                        out.visitors.insert(seq_id, remainder);
                    }
                }
            }
        }
        out
    }

    /// For each sequence id present in both records, try to extend `pre`'s
    /// most recent range with a single `post` range starting within
    /// `max_gap` positions of its end.
    ///
    /// The gap is inclusive: ranges exactly `max_gap` apart connect. Once
    /// enough sequence ids have failed to connect that `min_sup` is out of
    /// reach, the scan stops and whatever connected so far is returned; the
    /// caller's support check rejects it.
    pub fn try_connect(
        pre: &Visitations,
        post: &Visitations,
        max_gap: usize,
        min_sup: u32,
    ) -> Visitations {
        let mut connected = Visitations::new();

        let shared: Vec<usize> = pre
            .visitors
            .keys()
            .filter(|id| post.visitors.contains_key(id))
            .copied()
            .collect();

        let mut max_possible = shared.len() as u32;
        if max_possible < min_sup {
            return connected;
        }

        for seq_id in shared {
            let pre_set = &pre.visitors[&seq_id];
            let post_set = &post.visitors[&seq_id];

            // Only the last range in "pre" is extended, by at most one
            // "post" range.
            let pre_range = pre_set
                .highest()
                .expect("visitation entries never hold empty range sets");

            let mut joined = RangeSet::new();
            for post_range in post_set.iter() {
                if !post_range.is_after(pre_range) {
                    continue;
                }
                if post_range.start > pre_range.end + max_gap {
                    // post ranges are sorted, so nothing further can connect
                    break;
                }
                if post_range.start < pre_range.end {
                    // begins inside the span pre already covers
                    continue;
                }
                joined.add(*pre_range);
                joined.add(*post_range);
                break;
            }

            if joined.is_empty() {
                max_possible = max_possible.saturating_sub(1);
                if max_possible < min_sup {
                    return connected;
                }
            } else {
                connected.visitors.insert(seq_id, joined);
            }
        }
        connected
    }

    /// Join every connectible pre/post range pair per sequence id, with the
    /// tightest gap (1). This is the fusion rule applied when a removed
    /// graph node's in- and out-edges are chained end to end.
    pub fn try_connect_touching(pre: &Visitations, post: &Visitations) -> Visitations {
        let mut connected = Visitations::new();
        for (&seq_id, pre_set) in &pre.visitors {
            let Some(post_set) = post.visitors.get(&seq_id) else {
                continue;
            };
            let mut joined = RangeSet::new();
            for pre_range in pre_set.iter() {
                for post_range in post_set.iter() {
                    if pre_range.connectible_before(post_range, 1) {
                        joined.add(*pre_range);
                        joined.add(*post_range);
                    }
                }
            }
            if !joined.is_empty() {
                connected.visitors.insert(seq_id, joined);
            }
        }
        connected
    }
}

#[cfg(test)]
mod tests;

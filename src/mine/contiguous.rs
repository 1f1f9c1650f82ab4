//! Level-wise contiguous sequential pattern mining.
//!
//! Implementation of the trie-backed algorithm family around
//! "CCSpan: Mining closed contiguous sequential patterns" (Zhang, Wang &
//! Yang, Knowledge-Based Systems 89, 2015). Candidates of length k are only
//! attempted when their length-(k-1) suffix is already known frequent, and
//! the insertion itself requires the length-(k-1) prefix path, so candidate
//! generation is bounded from both ends (the apriori property).

use crate::pattern::SequentialPattern;
use crate::trie::{PatternClosure, Trie};
use std::collections::HashSet;
use tracing::debug;

use super::{SpmParameters, StopFlag};

/// Miner for contiguous sequential patterns under a pluggable closure rule.
///
/// The three published variants differ only in the closure rule applied
/// while mining; the output walk is identical:
///
/// - [`all`](Self::all): every frequent contiguous pattern,
/// - [`closed`](Self::closed): patterns with no equal-support
///   super-pattern,
/// - [`max`](Self::max): patterns with no frequent super-pattern at all.
#[derive(Debug, Clone)]
pub struct ContiguousMiner {
    closure: PatternClosure,
    running: StopFlag,
}

impl ContiguousMiner {
    pub fn new(closure: PatternClosure) -> Self {
        Self {
            closure,
            running: StopFlag::new(),
        }
    }

    /// Mine every frequent contiguous pattern.
    pub fn all() -> Self {
        Self::new(PatternClosure::All)
    }

    /// Mine closed contiguous patterns.
    pub fn closed() -> Self {
        Self::new(PatternClosure::Closed)
    }

    /// Mine maximal contiguous patterns.
    pub fn max() -> Self {
        Self::new(PatternClosure::Max)
    }

    pub fn closure(&self) -> PatternClosure {
        self.closure
    }

    /// Handle for cancelling this miner from another owner. Stopping keeps
    /// the patterns already emitted.
    pub fn stop_flag(&self) -> StopFlag {
        self.running.clone()
    }

    /// Run the level-wise loop and return the populated trie, with marks
    /// applied per the closure rule and sub-threshold branches pruned.
    pub fn populate_trie(&self, params: &SpmParameters) -> Trie<u32> {
        let db = params.sequences();
        let min_sup = params.min_sup();
        let mut trie = Trie::new();

        let mut k = 1;
        while self.running.is_running() && self.add_length_k_patterns(&mut trie, k, min_sup, db) > 0
        {
            k += 1;
        }
        trie
    }

    /// Mine and collect.
    pub fn run(&self, params: &SpmParameters) -> Vec<SequentialPattern> {
        let mut patterns = Vec::new();
        self.run_streaming(params, |pattern| patterns.push(pattern));
        patterns
    }

    /// Mine and hand each discovered pattern to `sink` as the output walk
    /// reaches it, so callers can write through without buffering. Returns
    /// the number of patterns emitted.
    pub fn run_streaming<F>(&self, params: &SpmParameters, mut sink: F) -> usize
    where
        F: FnMut(SequentialPattern),
    {
        let mut trie = self.populate_trie(params);
        let mut emitted = 0;

        let mut iter = trie.pattern_iter(true);
        while let Some(sequence) = iter.next() {
            if !self.running.is_running() {
                break;
            }
            if !iter.is_marked() {
                continue;
            }
            // one emission per marked node, however many sub-paths reach it
            iter.unmark();
            sink(SequentialPattern::new(sequence, iter.count()));
            emitted += 1;
        }
        debug!(emitted, "contiguous mining output walk finished");
        emitted
    }

    /// One mining level: slide every length-k window, count each at most
    /// once per source sequence via terminal locks, then let `supersede`
    /// prune and mark the distinct candidates. Returns how many candidates
    /// survived the level.
    fn add_length_k_patterns(
        &self,
        trie: &mut Trie<u32>,
        k: usize,
        min_sup: u32,
        db: &[Vec<u32>],
    ) -> usize {
        let mut candidates: Vec<Vec<u32>> = Vec::new();
        let mut observed: HashSet<Vec<u32>> = HashSet::new();

        for sequence in db {
            if sequence.len() < k {
                continue;
            }
            for window in sequence.windows(k) {
                let added = if k > 1 {
                    // a candidate cannot be frequent unless its suffix
                    // already is; allowing one new node then requires the
                    // prefix path to exist too
                    trie.frequency_of(&window[1..]) > 0 && trie.add(window, 1, true, true)
                } else {
                    trie.add(window, 1, true, true)
                };
                if added && !observed.contains(window) {
                    observed.insert(window.to_vec());
                    candidates.push(window.to_vec());
                }
            }
            // locks guard against recounting a window inside one sequence;
            // the next sequence starts with a clean slate
            trie.unlock_all();
        }

        let survivors = candidates
            .iter()
            .filter(|candidate| trie.supersede(candidate, min_sup, self.closure))
            .count();
        debug!(k, candidates = candidates.len(), survivors, "mined level");
        survivors
    }
}

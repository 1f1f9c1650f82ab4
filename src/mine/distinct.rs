//! Redundancy-bounded, cover-maximizing pattern selection.
//!
//! Mines the full contiguous pattern set, then greedily keeps the pattern
//! whose symbol pairs cover the most database positions, claiming those
//! pairs as it goes. A pattern whose fraction of already-claimed pairs
//! exceeds the configured maximum redundancy drops out of the running, so
//! the output is a small, high-cover, low-overlap selection.

use crate::pattern::SequentialPattern;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use super::{ContiguousMiner, SpmParameters, StopFlag};

/// Greedy distinct-pattern selector over the all-patterns output.
#[derive(Debug, Clone)]
pub struct DistinctMiner {
    running: StopFlag,
}

struct Candidate {
    pattern: SequentialPattern,
    pairs: Vec<(u32, u32)>,
    cover: u32,
}

impl DistinctMiner {
    pub fn new() -> Self {
        Self {
            running: StopFlag::new(),
        }
    }

    pub fn stop_flag(&self) -> StopFlag {
        self.running.clone()
    }

    /// Mine with [`ContiguousMiner::all`] and prune the result down to the
    /// most-covered patterns within `params.max_redundancy()`.
    pub fn run(&self, params: &SpmParameters) -> Vec<SequentialPattern> {
        let patterns = ContiguousMiner::all().run(params);
        self.select(params.sequences(), patterns, params.max_redundancy())
    }

    /// The selection stage on an already-mined pattern list.
    pub fn select(
        &self,
        db: &[Vec<u32>],
        patterns: Vec<SequentialPattern>,
        max_redundancy: f64,
    ) -> Vec<SequentialPattern> {
        let pair_cover = pair_cover_map(db);

        // which candidate patterns use each pair, and each pattern's cover
        let mut pair_users: HashMap<(u32, u32), HashSet<usize>> = HashMap::new();
        let mut candidates: BTreeMap<usize, Candidate> = BTreeMap::new();
        for (id, pattern) in patterns.into_iter().enumerate() {
            let mut pairs: Vec<(u32, u32)> = Vec::new();
            let mut cover = 0;
            for pair in pattern.sequence.windows(2) {
                let pair = (pair[0], pair[1]);
                pair_users.entry(pair).or_default().insert(id);
                if !pairs.contains(&pair) {
                    cover += pair_cover.get(&pair).copied().unwrap_or(0);
                    pairs.push(pair);
                }
            }
            if cover > 1 {
                candidates.insert(
                    id,
                    Candidate {
                        pattern,
                        pairs,
                        cover,
                    },
                );
            }
        }

        let mut out = Vec::new();
        while !candidates.is_empty() && self.running.is_running() {
            // most covered first; ties broken by discovery order
            let best_id = candidates
                .iter()
                .max_by(|a, b| a.1.cover.cmp(&b.1.cover).then(b.0.cmp(a.0)))
                .map(|(&id, _)| id)
                .expect("candidates checked non-empty above");
            let best = candidates
                .remove(&best_id)
                .expect("id was just read from the map");

            if best.cover <= 1 {
                continue;
            }

            let mut pattern = best.pattern;
            pattern.cover = Some(best.cover);
            out.push(pattern);

            // claim the winner's pairs and re-validate everyone touching them
            let mut dirty: HashSet<usize> = HashSet::new();
            for pair in &best.pairs {
                if let Some(users) = pair_users.remove(pair) {
                    dirty.extend(users);
                }
            }
            for id in dirty {
                let Some(candidate) = candidates.get(&id) else {
                    continue;
                };
                let claimed = candidate
                    .pairs
                    .iter()
                    .filter(|pair| !pair_users.contains_key(pair))
                    .count();
                let redundancy = claimed as f64 / candidate.pairs.len() as f64;
                if redundancy > max_redundancy || candidate.cover <= 1 {
                    candidates.remove(&id);
                }
            }
        }
        debug!(selected = out.len(), "distinct pattern selection finished");
        out
    }
}

impl Default for DistinctMiner {
    fn default() -> Self {
        Self::new()
    }
}

/// How many times each adjacent symbol pair occurs across the database.
fn pair_cover_map(db: &[Vec<u32>]) -> HashMap<(u32, u32), u32> {
    let mut cover: HashMap<(u32, u32), u32> = HashMap::new();
    for sequence in db {
        for pair in sequence.windows(2) {
            *cover.entry((pair[0], pair[1])).or_insert(0) += 1;
        }
    }
    cover
}

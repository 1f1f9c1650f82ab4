//! Gap-tolerant extraction of representative, edge-disjoint paths.
//!
//! Walks the transition graph along each database sequence, tolerating
//! skipped transitions up to a configured gap, and emits a representative
//! path whenever a supported chain of edges can be grown. Each graph edge
//! is claimed by at most one emitted path, so the result is an
//! edge-disjoint cover of the graph rather than an exhaustive enumeration.

use crate::graph::{SequenceEdge, SequenceGraph};
use crate::pattern::RepSequence;
use crate::visitations::Visitations;
use tracing::debug;

use super::{SpmParameters, StopFlag};

/// The gap-tolerant representative path miner.
///
/// `max_gap` bounds both how far ahead a companion edge may start
/// (measured in sequence positions) and how many forward edges the seed
/// search inspects; a gap of 1 demands contiguous coverage.
#[derive(Debug, Clone)]
pub struct GraspMiner {
    min_sup: u32,
    max_gap: usize,
    running: StopFlag,
}

struct Path {
    edges: Vec<usize>,
    visitations: Visitations,
}

/// Forward cursor over one sequence's symbols.
#[derive(Clone)]
struct SeqCursor<'a> {
    symbols: &'a [u32],
    pos: usize,
}

impl<'a> SeqCursor<'a> {
    fn new(symbols: &'a [u32]) -> Self {
        Self { symbols, pos: 0 }
    }

    fn has_next(&self) -> bool {
        self.pos < self.symbols.len()
    }

    fn next(&mut self) -> u32 {
        let symbol = self.symbols[self.pos];
        self.pos += 1;
        symbol
    }

    fn peek(&self) -> Option<u32> {
        self.symbols.get(self.pos).copied()
    }

    fn sync_to(&mut self, other: &SeqCursor<'_>) {
        self.pos = other.pos;
    }
}

impl GraspMiner {
    pub fn new(min_sup: u32, max_gap: usize) -> Self {
        Self {
            min_sup: min_sup.max(1),
            max_gap: max_gap.max(1),
            running: StopFlag::new(),
        }
    }

    pub fn stop_flag(&self) -> StopFlag {
        self.running.clone()
    }

    /// Build the transition graph(s) for the database and extract
    /// representative paths from every connected component.
    pub fn run_database(&self, params: &SpmParameters) -> Vec<RepSequence> {
        let graphs = SequenceGraph::from_sequences(params.sequences());
        let mut out = Vec::new();
        for graph in &graphs {
            out.extend(self.run(graph, params.sequences()));
        }
        out
    }

    /// Extract representative paths from one graph, walking the database
    /// sequences in order. Deterministic for a fixed sequence order.
    pub fn run(&self, graph: &SequenceGraph, db: &[Vec<u32>]) -> Vec<RepSequence> {
        let mut out = Vec::new();
        let mut claimed = vec![false; graph.edge_bound()];

        for sequence in db {
            if sequence.is_empty() {
                continue;
            }
            if !self.running.is_running() {
                break;
            }
            let mut cursor = SeqCursor::new(sequence);
            while cursor.has_next() {
                let Some(path) = self.starting_path(graph, &mut cursor, &claimed) else {
                    // no further seed in this sequence
                    break;
                };
                let path = self.expand_path(path, graph, cursor.clone(), &claimed);

                // a bare edge is not a pattern; a seeded pair or longer is
                if path.edges.len() >= 2 {
                    // claiming is what keeps later paths off these edges; a
                    // path may legitimately walk its own edge twice
                    for &edge_id in &path.edges {
                        claimed[edge_id] = true;
                    }
                    out.push(RepSequence::new(
                        path_symbols(graph, &path.edges),
                        path.visitations,
                    ));
                }
            }
        }
        debug!(paths = out.len(), "representative extraction finished");
        out
    }

    /// Find the next seed: a supported, unclaimed edge plus a companion
    /// within the next `max_gap` forward edges whose join still meets the
    /// support threshold.
    fn starting_path(
        &self,
        graph: &SequenceGraph,
        cursor: &mut SeqCursor<'_>,
        claimed: &[bool],
    ) -> Option<Path> {
        while cursor.has_next() {
            let starting = self.next_edge(graph, cursor, claimed)?;

            let mut expansion = cursor.clone();
            for _ in 0..self.max_gap {
                if !expansion.has_next() {
                    break;
                }
                let Some(companion) = self.next_edge(graph, &mut expansion, claimed) else {
                    break;
                };
                let merged = Visitations::try_connect(
                    starting.visitations(),
                    companion.visitations(),
                    self.max_gap,
                    self.min_sup,
                );
                if merged.support() < self.min_sup {
                    continue;
                }
                cursor.sync_to(&expansion);
                return Some(Path {
                    edges: vec![starting.id(), companion.id()],
                    visitations: merged,
                });
            }
            // no companion for this seed; retry further along the sequence
        }
        None
    }

    /// Grow the path edge by edge. Joins that cannot reach the threshold
    /// are skipped; the first join with zero achievable support ends the
    /// expansion for good.
    fn expand_path(
        &self,
        mut path: Path,
        graph: &SequenceGraph,
        mut cursor: SeqCursor<'_>,
        claimed: &[bool],
    ) -> Path {
        while cursor.has_next() {
            let Some(next_edge) = self.next_edge(graph, &mut cursor, claimed) else {
                return path;
            };
            let mut candidate = Visitations::try_connect(
                &path.visitations,
                next_edge.visitations(),
                self.max_gap,
                self.min_sup,
            );
            let support = candidate.support();
            if support >= self.min_sup {
                // fold the path's earlier coverage back in for the
                // sequences that survived the join
                candidate.add_complement(&path.visitations);
                path.edges.push(next_edge.id());
                path.visitations = candidate;
            } else if support == 0 {
                // no sequence at all could make the join: nothing further
                // along this sequence ever will
                return path;
            }
        }
        path
    }

    /// Advance to the next edge that is present, supported, and unclaimed.
    fn next_edge<'g>(
        &self,
        graph: &'g SequenceGraph,
        cursor: &mut SeqCursor<'_>,
        claimed: &[bool],
    ) -> Option<&'g SequenceEdge> {
        loop {
            let node_id = self.next_node(graph, cursor)?;
            let next_symbol = cursor.peek()?;
            let Some(edge) = graph.out_edge_between(node_id, next_symbol) else {
                continue;
            };
            if edge.support() < self.min_sup {
                continue;
            }
            if claimed[edge.id()] {
                continue;
            }
            return Some(edge);
        }
    }

    /// Advance to the next symbol that exists as a graph node. An unmapped
    /// symbol also consumes the token after it; kept as documented
    /// behavior.
    fn next_node(&self, graph: &SequenceGraph, cursor: &mut SeqCursor<'_>) -> Option<u32> {
        while cursor.has_next() {
            let node_id = cursor.next();
            if !graph.contains_node(node_id) {
                if cursor.has_next() {
                    cursor.next();
                }
                continue;
            }
            return Some(node_id);
        }
        None
    }
}

/// Collapse a chain of edges into its node-id sequence.
fn path_symbols(graph: &SequenceGraph, edge_ids: &[usize]) -> Vec<u32> {
    let mut symbols = Vec::new();
    let mut prev: Option<u32> = None;
    for &edge_id in edge_ids {
        let edge = graph.edge(edge_id).expect("path edges are live");
        if prev != Some(edge.source()) {
            symbols.push(edge.source());
        }
        symbols.push(edge.destination());
        prev = Some(edge.destination());
    }
    symbols
}

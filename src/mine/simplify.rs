//! Sequence database simplification through the transition graph.
//!
//! The lossless pass removes symbols whose combined incident-edge
//! visitations can never reach the support threshold (the apriori
//! property: if every super-sequence of a symbol is infrequent, so is the
//! symbol as a pattern constituent). The lossy pass then keeps stripping
//! the cheapest edges until a target fraction of the database is gone.

use crate::graph::SequenceGraph;
use crate::lookup::LookupSequence;
use crate::visitations::Visitations;
use tracing::debug;

/// Simplifies sequence databases by analysing their transition graphs.
#[derive(Debug, Clone, Default)]
pub struct GraphSimplifier;

impl GraphSimplifier {
    pub fn new() -> Self {
        Self
    }

    /// Remove every symbol that cannot take part in a pattern meeting
    /// `min_sup`. No frequent pattern is lost.
    pub fn lossless(&self, db: &[Vec<u32>], min_sup: u32) -> Vec<Vec<u32>> {
        let mut graphs = SequenceGraph::from_sequences(db);
        let mut lookups: Vec<LookupSequence> =
            db.iter().map(|seq| LookupSequence::new(seq)).collect();
        Self::do_lossless(&mut graphs, &mut lookups, min_sup.max(1));
        lookups.iter().map(LookupSequence::active_sequence).collect()
    }

    /// Lossless pass first, then repeatedly delete the minimum-cover edges
    /// until at least `factor` (clamped to [0, 1]) of the database items
    /// are gone or nothing removable remains.
    pub fn lossy(&self, db: &[Vec<u32>], factor: f64, min_sup: u32) -> Vec<Vec<u32>> {
        let factor = factor.clamp(0.0, 1.0);
        if factor == 0.0 {
            return db.to_vec();
        }

        let total_items: usize = db.iter().map(Vec::len).sum();
        let mut graphs = SequenceGraph::from_sequences(db);
        let mut lookups: Vec<LookupSequence> =
            db.iter().map(|seq| LookupSequence::new(seq)).collect();

        Self::do_lossless(&mut graphs, &mut lookups, min_sup.max(1));
        Self::do_lossy(&mut graphs, &mut lookups, factor, total_items);

        lookups.iter().map(LookupSequence::active_sequence).collect()
    }

    fn do_lossless(
        graphs: &mut [SequenceGraph],
        lookups: &mut [LookupSequence],
        min_sup: u32,
    ) {
        for graph in graphs.iter_mut() {
            let mut infrequent = Vec::new();
            for node in graph.nodes() {
                let mut combined: Option<Visitations> = None;
                let mut frequent = false;
                for edge_id in node.edge_ids() {
                    let edge = graph
                        .edge(edge_id)
                        .expect("node edge indices always point at live edges");
                    let combined = combined.get_or_insert_with(|| edge.visitations().clone());
                    combined.union(edge.visitations());
                    if combined.support() >= min_sup {
                        frequent = true;
                        break;
                    }
                }
                if !frequent {
                    infrequent.push(node.id());
                }
            }

            debug!(nodes = infrequent.len(), "lossless pass removes symbols");
            for node_id in infrequent {
                // a cascade from an earlier removal may have taken it already
                if !graph.contains_node(node_id) {
                    continue;
                }
                for removed in graph.remove(node_id) {
                    for lookup in lookups.iter_mut() {
                        lookup.clear_symbol(removed);
                    }
                }
            }
        }
    }

    fn do_lossy(
        graphs: &mut [SequenceGraph],
        lookups: &mut [LookupSequence],
        goal: f64,
        total_items: usize,
    ) {
        if total_items == 0 {
            return;
        }
        loop {
            let current: usize = lookups.iter().map(LookupSequence::len).sum();
            let reduction = 1.0 - current as f64 / total_items as f64;
            if reduction > goal {
                return;
            }
            let mut removed_any = false;
            for graph in graphs.iter_mut() {
                removed_any |= Self::remove_min_cover_edges(graph, lookups);
            }
            if !removed_any {
                // nothing strippable is left, the goal is unreachable
                return;
            }
        }
    }

    /// Delete every edge tied for the lowest cover, clearing the symbol
    /// pairs they stand for from the lookup sequences. Returns whether any
    /// edge was removed.
    fn remove_min_cover_edges(graph: &mut SequenceGraph, lookups: &mut [LookupSequence]) -> bool {
        let mut min_cover = u32::MAX;
        let mut to_remove: Vec<(usize, u32, u32)> = Vec::new();
        for edge in graph.edges() {
            let cover = edge.cover();
            if cover < min_cover {
                min_cover = cover;
                to_remove.clear();
            }
            if cover == min_cover {
                to_remove.push((edge.id(), edge.source(), edge.destination()));
            }
        }
        if to_remove.is_empty() {
            return false;
        }

        for &(_, source, destination) in &to_remove {
            for lookup in lookups.iter_mut() {
                while lookup.clear_subsequence(&[source, destination]) {}
            }
        }
        for (edge_id, _, _) in to_remove {
            graph.remove_edge(edge_id);
        }
        true
    }
}

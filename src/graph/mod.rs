//! Symbol transition graphs built from a sequence database.
//!
//! Each distinct symbol becomes a node and each adjacent symbol pair an
//! edge, with every traversal recorded as a visitation range. Nodes and
//! edges live in arenas owned by the graph; node removal fuses the incident
//! in/out edge pairs so that the transitive connections (and their
//! visitations) survive the eliminated symbol.

mod edge;
mod node;

pub use edge::SequenceEdge;
pub use node::SequenceNode;

use crate::visitations::Visitations;
use std::collections::{BTreeMap, HashMap};

/// A directed, visitation-weighted transition graph over symbols.
///
/// Edge ids are indices into the graph's edge arena; removed edges leave a
/// tombstone behind so the surviving ids never shift.
#[derive(Debug, Clone, Default)]
pub struct SequenceGraph {
    nodes: BTreeMap<u32, SequenceNode>,
    edges: Vec<Option<SequenceEdge>>,
}

impl SequenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one graph per connected component from the database, in a
    /// single pass. Components are unioned incrementally as edges are
    /// added, so the result is deterministic for a fixed sequence order and
    /// every symbol ends up in exactly one component.
    pub fn from_sequences(db: &[Vec<u32>]) -> Vec<SequenceGraph> {
        let mut graphs: Vec<Option<SequenceGraph>> = Vec::new();
        let mut node_graph: HashMap<u32, usize> = HashMap::new();

        for (seq_id, sequence) in db.iter().enumerate() {
            let mut prev: Option<u32> = None;
            for (i, &symbol) in sequence.iter().enumerate() {
                let mut gid = match node_graph.get(&symbol) {
                    Some(&gid) => gid,
                    None => {
                        let gid = match prev {
                            Some(prev_symbol) => node_graph[&prev_symbol],
                            None => {
                                graphs.push(Some(SequenceGraph::new()));
                                graphs.len() - 1
                            }
                        };
                        graphs[gid]
                            .as_mut()
                            .expect("graph slots are only emptied by merging")
                            .ensure_node(symbol);
                        node_graph.insert(symbol, gid);
                        gid
                    }
                };

                if let Some(prev_symbol) = prev {
                    let prev_gid = node_graph[&prev_symbol];
                    if prev_gid != gid {
                        // this transition bridges two components: union them
                        let absorbed = graphs[gid]
                            .take()
                            .expect("graph slots are only emptied by merging");
                        for moved in absorbed.nodes.keys() {
                            node_graph.insert(*moved, prev_gid);
                        }
                        graphs[prev_gid]
                            .as_mut()
                            .expect("graph slots are only emptied by merging")
                            .absorb(absorbed);
                        gid = prev_gid;
                    }
                    graphs[gid]
                        .as_mut()
                        .expect("graph slots are only emptied by merging")
                        .add_transition(prev_symbol, symbol, seq_id, i - 1);
                }
                prev = Some(symbol);
            }
        }

        graphs.into_iter().flatten().collect()
    }

    /// Record one traversal of the `from -> to` transition, creating the
    /// nodes and edge as needed. `index` is the position of `from` in the
    /// visiting sequence. Returns true when a new edge was created.
    pub fn add_transition(&mut self, from: u32, to: u32, seq_id: usize, index: usize) -> bool {
        self.ensure_node(from);
        self.ensure_node(to);

        if let Some(edge_id) = self.nodes[&from].out_edge(to) {
            self.edges[edge_id]
                .as_mut()
                .expect("node edge indices always point at live edges")
                .visit(seq_id, index);
            return false;
        }

        let edge_id = self.edges.len();
        let mut edge = SequenceEdge::new(edge_id, from, to);
        edge.visit(seq_id, index);
        self.edges.push(Some(edge));
        self.node_mut(from).set_out_edge(to, edge_id);
        self.node_mut(to).set_in_edge(from, edge_id);
        true
    }

    /// Remove a node, fusing every incident (in-edge, out-edge) pair into a
    /// new or strengthened edge between the outer endpoints, then cascading
    /// removal of any neighbour left without edges.
    ///
    /// Returns every removed node id, cascades first and the requested node
    /// last, so callers can synchronize mirrored bookkeeping.
    ///
    /// # Panics
    ///
    /// Panics if the node is not in the graph; asking to remove a missing
    /// node is a programming error, not a recoverable condition.
    pub fn remove(&mut self, node_id: u32) -> Vec<u32> {
        let node = self
            .nodes
            .get(&node_id)
            .unwrap_or_else(|| panic!("no node {node_id} in graph"));
        let in_ids: Vec<usize> = node.in_edge_ids().collect();
        let out_ids: Vec<usize> = node.out_edge_ids().collect();

        for &in_id in &in_ids {
            for &out_id in &out_ids {
                self.fuse_edges(node_id, in_id, out_id);
            }
        }

        let mut removed = Vec::new();
        for &in_id in &in_ids {
            let Some(edge) = self.edges[in_id].take() else {
                continue;
            };
            let source = edge.source();
            if source == node_id {
                continue;
            }
            if let Some(neighbour) = self.nodes.get_mut(&source) {
                neighbour.remove_out_edge(node_id);
                if neighbour.is_isolated() {
                    self.nodes.remove(&source);
                    removed.push(source);
                }
            }
        }
        for &out_id in &out_ids {
            let Some(edge) = self.edges[out_id].take() else {
                continue;
            };
            let destination = edge.destination();
            if destination == node_id {
                continue;
            }
            if let Some(neighbour) = self.nodes.get_mut(&destination) {
                neighbour.remove_in_edge(node_id);
                if neighbour.is_isolated() {
                    self.nodes.remove(&destination);
                    removed.push(destination);
                }
            }
        }

        self.nodes.remove(&node_id);
        removed.push(node_id);
        removed
    }

    /// Detach and tombstone one edge, cascading removal of endpoints left
    /// isolated. Returns the removed node ids.
    pub fn remove_edge(&mut self, edge_id: usize) -> Vec<u32> {
        let Some(edge) = self.edges[edge_id].take() else {
            return Vec::new();
        };
        let source = edge.source();
        let destination = edge.destination();

        if let Some(node) = self.nodes.get_mut(&source) {
            node.remove_out_edge(destination);
        }
        if let Some(node) = self.nodes.get_mut(&destination) {
            node.remove_in_edge(source);
        }

        let mut removed = Vec::new();
        for endpoint in [source, destination] {
            if let Some(node) = self.nodes.get(&endpoint) {
                if node.is_isolated() {
                    self.nodes.remove(&endpoint);
                    removed.push(endpoint);
                }
            }
        }
        removed
    }

    /// Fuse one (in-edge, out-edge) pair incident on `removed`. The join
    /// keeps only sequences that traverse both edges back to back; a
    /// zero-support join produces nothing. A fusion that would leave an
    /// edge attached to the removed node itself (self-loop pairs) is
    /// skipped.
    fn fuse_edges(&mut self, removed: u32, in_id: usize, out_id: usize) {
        let Some(in_edge) = self.edges[in_id].as_ref() else {
            return;
        };
        let Some(out_edge) = self.edges[out_id].as_ref() else {
            return;
        };
        let source = in_edge.source();
        let destination = out_edge.destination();
        if source == removed || destination == removed {
            return;
        }
        let merged =
            Visitations::try_connect_touching(in_edge.visitations(), out_edge.visitations());
        if merged.support() == 0 {
            return;
        }

        match self.nodes[&source].out_edge(destination) {
            Some(existing) => {
                // strengthen the parallel edge rather than overwrite it
                self.edges[existing]
                    .as_mut()
                    .expect("node edge indices always point at live edges")
                    .visitations_mut()
                    .union(&merged);
            }
            None => {
                let edge_id = self.edges.len();
                self.edges.push(Some(SequenceEdge::with_visitations(
                    edge_id,
                    source,
                    destination,
                    merged,
                )));
                self.node_mut(source).set_out_edge(destination, edge_id);
                self.node_mut(destination).set_in_edge(source, edge_id);
            }
        }
    }

    pub fn node(&self, id: u32) -> Option<&SequenceNode> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: u32) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SequenceNode> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every live edge exactly once, in id order.
    pub fn edges(&self) -> impl Iterator<Item = &SequenceEdge> {
        self.edges.iter().flatten()
    }

    pub fn edge(&self, id: usize) -> Option<&SequenceEdge> {
        self.edges.get(id).and_then(Option::as_ref)
    }

    /// The edge from `node_id` to `neighbour`, if both exist.
    pub fn out_edge_between(&self, node_id: u32, neighbour: u32) -> Option<&SequenceEdge> {
        let edge_id = self.nodes.get(&node_id)?.out_edge(neighbour)?;
        self.edge(edge_id)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    /// Upper bound over all edge ids ever allocated, tombstoned or not;
    /// sizes the claimed-edge bitsets.
    pub fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    fn ensure_node(&mut self, id: u32) {
        self.nodes.entry(id).or_insert_with(|| SequenceNode::new(id));
    }

    fn node_mut(&mut self, id: u32) -> &mut SequenceNode {
        self.nodes
            .get_mut(&id)
            .expect("node was just ensured or referenced by a live edge")
    }

    /// Move another component's nodes and edges into this graph, shifting
    /// the absorbed edge ids past the end of this arena.
    fn absorb(&mut self, other: SequenceGraph) {
        let offset = self.edges.len();
        for slot in other.edges {
            self.edges.push(slot.map(|mut edge| {
                edge.set_id(edge.id() + offset);
                edge
            }));
        }
        for (id, mut node) in other.nodes {
            node.offset_edge_ids(offset);
            self.nodes.insert(id, node);
        }
    }
}

//! Transport graph: locations joined by typed transport edges.
//!
//! The graph is undirected and multi-valued: one pair of locations may be
//! joined by several transport kinds at once (a taxi road and a bus line,
//! say). Maps are built in code; loading them from data files is left to
//! callers.

use crate::ticket::Transport;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Node identifier on the map
pub type Location = u32;

/// Undirected graph of locations and the transports connecting them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportGraph {
    /// Adjacency: node -> neighbour -> transports on that edge
    adjacency: BTreeMap<Location, BTreeMap<Location, BTreeSet<Transport>>>,
}

impl TransportGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(a, b, transport)` triples
    pub fn from_edges(edges: impl IntoIterator<Item = (Location, Location, Transport)>) -> Self {
        let mut graph = Self::new();
        for (a, b, transport) in edges {
            graph.add_edge(a, b, transport);
        }
        graph
    }

    /// Add an isolated node (no-op if already present)
    pub fn add_node(&mut self, node: Location) {
        self.adjacency.entry(node).or_default();
    }

    /// Connect two nodes with a transport, in both directions
    pub fn add_edge(&mut self, a: Location, b: Location, transport: Transport) {
        self.adjacency
            .entry(a)
            .or_default()
            .entry(b)
            .or_default()
            .insert(transport);
        self.adjacency
            .entry(b)
            .or_default()
            .entry(a)
            .or_default()
            .insert(transport);
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains_node(&self, node: Location) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Nodes sharing an edge with `node` (empty for unknown nodes)
    pub fn adjacent_nodes(&self, node: Location) -> impl Iterator<Item = Location> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|neighbours| neighbours.keys().copied())
    }

    /// Transports connecting `from` to `to` (empty if not adjacent)
    pub fn edge_transports(
        &self,
        from: Location,
        to: Location,
    ) -> impl Iterator<Item = Transport> + '_ {
        self.adjacency
            .get(&from)
            .and_then(|neighbours| neighbours.get(&to))
            .into_iter()
            .flat_map(|transports| transports.iter().copied())
    }
}

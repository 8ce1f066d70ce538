//! Built-in demonstration map.
//!
//! A 24-node taxi ring with bus and underground lines across it and a
//! single ferry crossing.

use manhunt_core::{GameSetup, Location, TransportGraph, Transport};

/// Starting nodes handed out to detectives
pub const DETECTIVE_SPAWNS: [Location; 5] = [2, 8, 14, 20, 11];

/// Starting nodes MrX picks from
pub const MRX_SPAWNS: [Location; 3] = [5, 17, 23];

/// Bus stops, joined in ring order
const BUS_STOPS: [Location; 8] = [1, 4, 7, 10, 13, 16, 19, 22];

/// Build the demonstration map
pub fn demo_graph() -> TransportGraph {
    let mut graph = TransportGraph::new();

    for n in 1..=24 {
        graph.add_edge(n, n % 24 + 1, Transport::Taxi);
    }
    graph.add_edge(1, 13, Transport::Taxi);
    graph.add_edge(7, 19, Transport::Taxi);

    for (i, &stop) in BUS_STOPS.iter().enumerate() {
        let next = BUS_STOPS[(i + 1) % BUS_STOPS.len()];
        graph.add_edge(stop, next, Transport::Bus);
    }

    graph.add_edge(1, 10, Transport::Underground);
    graph.add_edge(10, 19, Transport::Underground);
    graph.add_edge(19, 1, Transport::Underground);
    graph.add_edge(4, 16, Transport::Underground);

    graph.add_edge(6, 18, Transport::Ferry);

    graph
}

/// Demonstration map with the standard round schedule
pub fn demo_setup() -> GameSetup {
    GameSetup::new(demo_graph(), GameSetup::standard_rounds())
}

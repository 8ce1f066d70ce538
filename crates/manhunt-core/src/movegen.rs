//! Legal move generation.
//!
//! Both generators are pure functions of the setup, the detectives'
//! positions and the moving player's tickets. Occupancy is checked against
//! the passed-in detectives only, regardless of whose turn it is.

use crate::graph::Location;
use crate::moves::{DoubleMove, SingleMove};
use crate::player::Player;
use crate::setup::GameSetup;
use crate::ticket::Ticket;
use im::Vector;
use std::collections::BTreeSet;

/// Whether any detective stands on `location`
pub fn is_occupied(detectives: &Vector<Player>, location: Location) -> bool {
    detectives.iter().any(|d| d.location == location)
}

/// All single moves `player` can make from `source`
pub fn single_moves(
    setup: &GameSetup,
    detectives: &Vector<Player>,
    player: &Player,
    source: Location,
) -> BTreeSet<SingleMove> {
    let mut moves = BTreeSet::new();

    for destination in setup.graph.adjacent_nodes(source) {
        if is_occupied(detectives, destination) {
            continue;
        }

        let mut connected = false;
        for transport in setup.graph.edge_transports(source, destination) {
            connected = true;
            let ticket = transport.required_ticket();
            if player.has(ticket) {
                moves.insert(SingleMove::new(player.piece, source, ticket, destination));
            }
        }

        // One secret move per destination, whatever transports the edge has
        if connected && player.has(Ticket::Secret) {
            moves.insert(SingleMove::new(player.piece, source, Ticket::Secret, destination));
        }
    }

    moves
}

/// All double moves `player` can make from `source`
///
/// Only MrX holding a Double ticket gets any. A pair of legs using the same
/// ticket kind needs two of that ticket.
pub fn double_moves(
    setup: &GameSetup,
    detectives: &Vector<Player>,
    player: &Player,
    source: Location,
) -> BTreeSet<DoubleMove> {
    let mut moves = BTreeSet::new();
    if !player.is_mrx() || !player.has(Ticket::Double) {
        return moves;
    }

    for first in single_moves(setup, detectives, player, source) {
        for second in single_moves(setup, detectives, player, first.destination) {
            if first.ticket == second.ticket && !player.has_at_least(first.ticket, 2) {
                continue;
            }
            moves.insert(DoubleMove::chain(&first, &second));
        }
    }

    moves
}

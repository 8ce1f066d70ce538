//! Player state.
//!
//! A `Player` is an immutable snapshot of a piece's location and tickets.
//! Moving or trading tickets produces a new `Player` value.

use crate::graph::Location;
use crate::piece::Piece;
use crate::ticket::{Ticket, TicketBoard};
use serde::{Deserialize, Serialize};

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Piece identity
    pub piece: Piece,
    /// Node currently occupied
    pub location: Location,
    /// Tickets held
    pub tickets: TicketBoard,
}

impl Player {
    /// Create a new player
    pub fn new(piece: impl Into<Piece>, location: Location, tickets: TicketBoard) -> Self {
        Self {
            piece: piece.into(),
            location,
            tickets,
        }
    }

    pub fn is_mrx(&self) -> bool {
        self.piece.is_mrx()
    }

    pub fn is_detective(&self) -> bool {
        self.piece.is_detective()
    }

    /// Whether the player holds at least one ticket of the kind
    pub fn has(&self, ticket: Ticket) -> bool {
        self.tickets.has_at_least(ticket, 1)
    }

    pub fn has_at_least(&self, ticket: Ticket, count: u32) -> bool {
        self.tickets.has_at_least(ticket, count)
    }

    /// Same player relocated
    pub fn at(&self, location: Location) -> Self {
        Self {
            location,
            ..self.clone()
        }
    }

    /// Same player with the tickets spent, or `None` if any is missing
    pub fn spend(&self, tickets: &[Ticket]) -> Option<Self> {
        let mut board = self.tickets;
        for &ticket in tickets {
            board = board.remove(ticket)?;
        }
        Some(Self {
            tickets: board,
            ..self.clone()
        })
    }

    /// Same player with the tickets added
    pub fn receive(&self, tickets: &[Ticket]) -> Self {
        let board = tickets
            .iter()
            .fold(self.tickets, |board, &ticket| board.add(ticket, 1));
        Self {
            tickets: board,
            ..self.clone()
        }
    }
}

//! Tickets, transports, and ticket inventories.
//!
//! This module contains:
//! - Ticket kinds (the currency spent to move)
//! - Transport kinds carried on graph edges
//! - TicketBoard for managing per-kind ticket counts
//! - Standard starting allocations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket kinds
///
/// Secret and Double tickets belong to MrX only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ticket {
    Taxi,
    Bus,
    Underground,
    /// Travel along any edge without revealing the transport used
    Secret,
    /// Take two moves in one turn
    Double,
}

impl Ticket {
    /// All ticket kinds
    pub const ALL: [Ticket; 5] = [
        Ticket::Taxi,
        Ticket::Bus,
        Ticket::Underground,
        Ticket::Secret,
        Ticket::Double,
    ];

    /// Whether only MrX may hold this ticket
    pub fn is_mrx_only(&self) -> bool {
        matches!(self, Ticket::Secret | Ticket::Double)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ticket::Taxi => "Taxi",
            Ticket::Bus => "Bus",
            Ticket::Underground => "Underground",
            Ticket::Secret => "Secret",
            Ticket::Double => "Double",
        };
        f.write_str(name)
    }
}

/// Transport kinds carried by an edge of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Transport {
    Taxi,
    Bus,
    Underground,
    /// Boat lines, only passable with a Secret ticket
    Ferry,
}

impl Transport {
    /// The ticket needed to travel by this transport
    pub fn required_ticket(&self) -> Ticket {
        match self {
            Transport::Taxi => Ticket::Taxi,
            Transport::Bus => Ticket::Bus,
            Transport::Underground => Ticket::Underground,
            Transport::Ferry => Ticket::Secret,
        }
    }
}

/// A player's ticket inventory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketBoard {
    pub taxi: u32,
    pub bus: u32,
    pub underground: u32,
    pub secret: u32,
    pub double: u32,
}

impl TicketBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board with specific amounts
    pub fn with_amounts(taxi: u32, bus: u32, underground: u32, secret: u32, double: u32) -> Self {
        Self {
            taxi,
            bus,
            underground,
            secret,
            double,
        }
    }

    /// Starting tickets for a detective
    pub fn detective_defaults() -> Self {
        Self::with_amounts(11, 8, 4, 0, 0)
    }

    /// Starting tickets for MrX, who gets one Secret ticket per detective
    pub fn mrx_defaults(detective_count: usize) -> Self {
        let secret = u32::try_from(detective_count).unwrap_or(u32::MAX);
        Self::with_amounts(4, 3, 3, secret, 2)
    }

    /// Get count of a specific ticket
    pub fn get(&self, ticket: Ticket) -> u32 {
        match ticket {
            Ticket::Taxi => self.taxi,
            Ticket::Bus => self.bus,
            Ticket::Underground => self.underground,
            Ticket::Secret => self.secret,
            Ticket::Double => self.double,
        }
    }

    fn slot(&mut self, ticket: Ticket) -> &mut u32 {
        match ticket {
            Ticket::Taxi => &mut self.taxi,
            Ticket::Bus => &mut self.bus,
            Ticket::Underground => &mut self.underground,
            Ticket::Secret => &mut self.secret,
            Ticket::Double => &mut self.double,
        }
    }

    /// Copy of this board with tickets added; counts saturate at `u32::MAX`
    pub fn add(&self, ticket: Ticket, amount: u32) -> Self {
        let mut board = *self;
        let slot = board.slot(ticket);
        *slot = slot.saturating_add(amount);
        board
    }

    /// Copy of this board with one ticket removed, or `None` if none are held
    pub fn remove(&self, ticket: Ticket) -> Option<Self> {
        let mut board = *self;
        let slot = board.slot(ticket);
        *slot = slot.checked_sub(1)?;
        Some(board)
    }

    /// Whether at least `count` tickets of the kind are held
    pub fn has_at_least(&self, ticket: Ticket, count: u32) -> bool {
        self.get(ticket) >= count
    }

    /// Total number of tickets, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        Ticket::ALL
            .iter()
            .fold(0u32, |sum, &t| sum.saturating_add(self.get(t)))
    }

    /// Check if board is empty
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

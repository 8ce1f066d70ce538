//! Moves players can make and the travel log entries they leave.
//!
//! This module defines the two move shapes (single and double) and the
//! entries MrX's moves append to the travel log.

use crate::graph::Location;
use crate::piece::Piece;
use crate::ticket::Ticket;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step along one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SingleMove {
    pub mover: Piece,
    pub source: Location,
    pub ticket: Ticket,
    pub destination: Location,
}

impl SingleMove {
    pub fn new(mover: Piece, source: Location, ticket: Ticket, destination: Location) -> Self {
        Self {
            mover,
            source,
            ticket,
            destination,
        }
    }
}

/// Two consecutive steps in one turn, paid for with a Double ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoubleMove {
    pub mover: Piece,
    pub source: Location,
    pub ticket1: Ticket,
    pub destination1: Location,
    pub ticket2: Ticket,
    pub destination2: Location,
}

impl DoubleMove {
    /// Chain two single moves, the second starting where the first ends
    pub fn chain(first: &SingleMove, second: &SingleMove) -> Self {
        Self {
            mover: first.mover,
            source: first.source,
            ticket1: first.ticket,
            destination1: first.destination,
            ticket2: second.ticket,
            destination2: second.destination,
        }
    }
}

/// All possible moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    Single(SingleMove),
    Double(DoubleMove),
}

impl Move {
    /// The piece making the move
    pub fn commenced_by(&self) -> Piece {
        match self {
            Move::Single(m) => m.mover,
            Move::Double(m) => m.mover,
        }
    }

    pub fn source(&self) -> Location {
        match self {
            Move::Single(m) => m.source,
            Move::Double(m) => m.source,
        }
    }

    /// Where the mover ends up
    pub fn destination(&self) -> Location {
        match self {
            Move::Single(m) => m.destination,
            Move::Double(m) => m.destination2,
        }
    }

    /// Every ticket the move consumes, Double included
    pub fn tickets(&self) -> Vec<Ticket> {
        match self {
            Move::Single(m) => vec![m.ticket],
            Move::Double(m) => vec![m.ticket1, m.ticket2, Ticket::Double],
        }
    }

    /// Ticket and destination of each leg, in order
    pub fn legs(&self) -> Vec<(Ticket, Location)> {
        match self {
            Move::Single(m) => vec![(m.ticket, m.destination)],
            Move::Double(m) => vec![(m.ticket1, m.destination1), (m.ticket2, m.destination2)],
        }
    }
}

impl From<SingleMove> for Move {
    fn from(m: SingleMove) -> Self {
        Move::Single(m)
    }
}

impl From<DoubleMove> for Move {
    fn from(m: DoubleMove) -> Self {
        Move::Double(m)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Single(m) => write!(
                f,
                "{} {} -[{}]-> {}",
                m.mover, m.source, m.ticket, m.destination
            ),
            Move::Double(m) => write!(
                f,
                "{} {} -[{}]-> {} -[{}]-> {}",
                m.mover, m.source, m.ticket1, m.destination1, m.ticket2, m.destination2
            ),
        }
    }
}

/// An entry in MrX's travel log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogEntry {
    /// Reveal round: the ticket and where MrX arrived
    Revealed { ticket: Ticket, location: Location },
    /// Hidden round: only the ticket is known
    Hidden { ticket: Ticket },
}

impl LogEntry {
    pub fn revealed(ticket: Ticket, location: Location) -> Self {
        LogEntry::Revealed { ticket, location }
    }

    pub fn hidden(ticket: Ticket) -> Self {
        LogEntry::Hidden { ticket }
    }

    pub fn ticket(&self) -> Ticket {
        match self {
            LogEntry::Revealed { ticket, .. } | LogEntry::Hidden { ticket } => *ticket,
        }
    }

    /// The logged location, if this round revealed it
    pub fn location(&self) -> Option<Location> {
        match self {
            LogEntry::Revealed { location, .. } => Some(*location),
            LogEntry::Hidden { .. } => None,
        }
    }
}

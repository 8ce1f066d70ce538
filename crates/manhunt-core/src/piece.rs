//! Piece identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detective colors, one piece per color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Detective {
    Red,
    Green,
    Blue,
    White,
    Yellow,
}

impl Detective {
    /// All detective pieces
    pub const ALL: [Detective; 5] = [
        Detective::Red,
        Detective::Green,
        Detective::Blue,
        Detective::White,
        Detective::Yellow,
    ];
}

/// A piece on the board: the fugitive or one of the detectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Piece {
    MrX,
    Detective(Detective),
}

impl Piece {
    pub fn is_mrx(&self) -> bool {
        matches!(self, Piece::MrX)
    }

    pub fn is_detective(&self) -> bool {
        matches!(self, Piece::Detective(_))
    }
}

impl From<Detective> for Piece {
    fn from(detective: Detective) -> Self {
        Piece::Detective(detective)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::MrX => f.write_str("MrX"),
            Piece::Detective(d) => write!(f, "{:?} detective", d),
        }
    }
}

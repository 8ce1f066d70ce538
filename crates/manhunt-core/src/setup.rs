//! Game setup: the map plus the round schedule.

use crate::graph::TransportGraph;
use im::Vector;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rounds in the standard schedule
pub const STANDARD_ROUND_COUNT: usize = 24;

/// Rounds (1-based) in which MrX surfaces in the standard schedule
pub const STANDARD_REVEAL_ROUNDS: [usize; 5] = [3, 8, 13, 18, 24];

/// Map and round schedule shared by every state of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    /// The transport graph
    pub graph: Arc<TransportGraph>,
    /// One entry per round; `true` means MrX's location is revealed that round
    pub rounds: Vector<bool>,
}

impl GameSetup {
    pub fn new(graph: impl Into<Arc<TransportGraph>>, rounds: impl IntoIterator<Item = bool>) -> Self {
        Self {
            graph: graph.into(),
            rounds: rounds.into_iter().collect(),
        }
    }

    /// The standard 24-round reveal schedule
    pub fn standard_rounds() -> Vector<bool> {
        (1..=STANDARD_ROUND_COUNT)
            .map(|round| STANDARD_REVEAL_ROUNDS.contains(&round))
            .collect()
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Whether the round at `index` (0-based) reveals MrX
    pub fn is_reveal_round(&self, index: usize) -> bool {
        self.rounds.get(index).copied().unwrap_or(false)
    }
}

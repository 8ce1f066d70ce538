//! Random playouts on the demonstration map.

use crate::map::{demo_setup, DETECTIVE_SPAWNS, MRX_SPAWNS};
use manhunt_core::{
    Detective, Event, GameError, GameState, LogEntry, Model, ModelError, Move, Observer, Piece,
    Player, Ticket, TicketBoard,
};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a number: {value}")]
    NotANumber { name: &'static str, value: String },

    #[error("Detective count must be between 1 and {max}, got {got}")]
    DetectiveCount { got: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Playout settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of games to play
    pub games: usize,
    /// Base seed; game `i` uses `seed + i`
    pub seed: u64,
    /// Detectives per game
    pub detectives: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            games: 10,
            seed: 42,
            detectives: 3,
        }
    }
}

impl SimConfig {
    /// Read settings from `SIM_GAMES`, `SIM_SEED` and `SIM_DETECTIVES`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Self {
            games: env_or("SIM_GAMES", defaults.games)?,
            seed: env_or("SIM_SEED", defaults.seed)?,
            detectives: env_or("SIM_DETECTIVES", defaults.detectives)?,
        }
        .validated()
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        let max = DETECTIVE_SPAWNS.len();
        if self.detectives == 0 || self.detectives > max {
            return Err(ConfigError::DetectiveCount {
                got: self.detectives,
                max,
            });
        }
        Ok(self)
    }
}

fn env_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotANumber { name, value }),
        Err(_) => Ok(default),
    }
}

/// Counts notifications from the model
#[derive(Debug, Default)]
pub struct EventCounter {
    moves_made: AtomicUsize,
    game_over: AtomicUsize,
}

impl EventCounter {
    pub fn moves_made(&self) -> usize {
        self.moves_made.load(Ordering::Relaxed)
    }

    pub fn game_over(&self) -> usize {
        self.game_over.load(Ordering::Relaxed)
    }
}

impl Observer for EventCounter {
    fn on_model_changed(&self, board: &GameState, event: Event) {
        trace!(?event, log = board.travel_log().len(), "model changed");
        match event {
            Event::MoveMade => self.moves_made.fetch_add(1, Ordering::Relaxed),
            Event::GameOver => self.game_over.fetch_add(1, Ordering::Relaxed),
        };
    }
}

/// Result of one playout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub winner: Vec<Piece>,
    pub mrx_won: bool,
    /// Travel log entries written by MrX
    pub rounds_played: usize,
    pub moves: usize,
    pub double_moves: usize,
    pub secret_moves: usize,
    pub notifications: usize,
    pub log: Vec<LogEntry>,
}

/// Opening position for a seed: shuffled detective spawns, random MrX spawn
pub fn opening(rng: &mut StdRng, detectives: usize) -> Result<GameState, GameError> {
    let mut spawns = DETECTIVE_SPAWNS;
    spawns.shuffle(rng);
    let mrx_spawn = MRX_SPAWNS.choose(rng).copied().unwrap_or(MRX_SPAWNS[0]);

    let players: Vec<Player> = Detective::ALL
        .iter()
        .zip(spawns)
        .take(detectives)
        .map(|(&colour, spawn)| Player::new(colour, spawn, TicketBoard::detective_defaults()))
        .collect();
    let mrx = Player::new(Piece::MrX, mrx_spawn, TicketBoard::mrx_defaults(players.len()));

    GameState::new(demo_setup(), mrx, players)
}

/// Play one game, choosing uniformly among the legal moves
pub fn play_game(seed: u64, detectives: usize) -> Result<GameSummary, SimError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut model = Model::from_state(opening(&mut rng, detectives)?);
    let counter = Arc::new(EventCounter::default());
    model.register_observer(counter.clone())?;

    let mut moves = 0;
    let mut double_moves = 0;
    let mut secret_moves = 0;

    loop {
        let legal: Vec<Move> = model
            .current_board()
            .available_moves()
            .iter()
            .copied()
            .collect();
        let Some(&mv) = legal.choose(&mut rng) else {
            break;
        };

        model.choose_move(&mv)?;
        moves += 1;
        if matches!(mv, Move::Double(_)) {
            double_moves += 1;
        }
        if mv.tickets().contains(&Ticket::Secret) {
            secret_moves += 1;
        }
    }

    let board = model.current_board();
    Ok(GameSummary {
        seed,
        winner: board.winner().iter().copied().collect(),
        mrx_won: board.winner().contains(&Piece::MrX),
        rounds_played: board.travel_log().len(),
        moves,
        double_moves,
        secret_moves,
        notifications: counter.moves_made() + counter.game_over(),
        log: board.travel_log().iter().copied().collect(),
    })
}

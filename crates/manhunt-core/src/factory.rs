//! Construction and validation of the opening game state.

use crate::game::{GameError, GameState};
use crate::graph::Location;
use crate::moves::LogEntry;
use crate::piece::Piece;
use crate::player::Player;
use crate::setup::GameSetup;
use crate::ticket::Ticket;
use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Reasons an opening configuration is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SetupError {
    #[error("Round schedule is empty")]
    EmptyRounds,

    #[error("No MrX provided")]
    MissingMrX,

    #[error("No detective list provided")]
    MissingDetectives,

    #[error("Graph has no nodes")]
    EmptyGraph,

    #[error("MrX is played by a detective piece ({0})")]
    MrXClassifiedAsDetective(Piece),

    #[error("Duplicate detective piece: {0}")]
    DuplicateDetectivePiece(Piece),

    #[error("MrX listed among the detectives")]
    DetectivePieceIsMrX,

    #[error("Two detectives start at location {0}")]
    DuplicateSpawnLocation(Location),

    #[error("{0} holds a secret ticket")]
    DetectiveHoldsSecretTicket(Piece),

    #[error("{0} holds a double ticket")]
    DetectiveHoldsDoubleTicket(Piece),

    #[error("{0} is due to move but is not playing")]
    UnknownRemainingPiece(Piece),

    #[error("Travel log has {log} entries for {rounds} rounds")]
    LogExceedsRounds { log: usize, rounds: usize },
}

/// Validate an opening configuration and build generation zero.
///
/// `mrx` and `detectives` are optional so that a missing player list can be
/// told apart from an empty one: an empty detective list is accepted.
pub fn build(
    setup: GameSetup,
    mrx: Option<Player>,
    detectives: Option<Vec<Player>>,
) -> Result<GameState, GameError> {
    if setup.rounds.is_empty() {
        return Err(SetupError::EmptyRounds.into());
    }
    let mrx = mrx.ok_or(SetupError::MissingMrX)?;
    let detectives = detectives.ok_or(SetupError::MissingDetectives)?;
    if setup.graph.is_empty() {
        return Err(SetupError::EmptyGraph.into());
    }
    if mrx.is_detective() {
        return Err(SetupError::MrXClassifiedAsDetective(mrx.piece).into());
    }

    validate_detectives(&detectives)?;

    Ok(GameState::from_parts(
        setup,
        OrdSet::unit(mrx.piece),
        Vector::new(),
        mrx,
        Vector::from(detectives),
    ))
}

fn validate_detectives(detectives: &[Player]) -> Result<(), SetupError> {
    let mut pieces = BTreeSet::new();
    let mut spawns = BTreeSet::new();

    for detective in detectives {
        if !pieces.insert(detective.piece) {
            return Err(SetupError::DuplicateDetectivePiece(detective.piece));
        }
        if detective.is_mrx() {
            return Err(SetupError::DetectivePieceIsMrX);
        }
        if !spawns.insert(detective.location) {
            return Err(SetupError::DuplicateSpawnLocation(detective.location));
        }
        if detective.has(Ticket::Secret) {
            return Err(SetupError::DetectiveHoldsSecretTicket(detective.piece));
        }
        if detective.has(Ticket::Double) {
            return Err(SetupError::DetectiveHoldsDoubleTicket(detective.piece));
        }
    }

    Ok(())
}

/// Unchecked serialized form of a `GameState`.
///
/// Deserialized states pass through `TryFrom` and are held to the same
/// checks as an opening configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGameState {
    setup: GameSetup,
    remaining: OrdSet<Piece>,
    log: Vector<LogEntry>,
    mrx: Player,
    detectives: Vector<Player>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = GameError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let RawGameState {
            setup,
            remaining,
            log,
            mrx,
            detectives,
        } = raw;

        if setup.rounds.is_empty() {
            return Err(SetupError::EmptyRounds.into());
        }
        if setup.graph.is_empty() {
            return Err(SetupError::EmptyGraph.into());
        }
        if mrx.is_detective() {
            return Err(SetupError::MrXClassifiedAsDetective(mrx.piece).into());
        }
        let detectives: Vec<Player> = detectives.into_iter().collect();
        validate_detectives(&detectives)?;

        if log.len() > setup.round_count() {
            return Err(SetupError::LogExceedsRounds {
                log: log.len(),
                rounds: setup.round_count(),
            }
            .into());
        }
        if let Some(&piece) = remaining
            .iter()
            .find(|&&p| p != mrx.piece && !detectives.iter().any(|d| d.piece == p))
        {
            return Err(SetupError::UnknownRemainingPiece(piece).into());
        }

        Ok(GameState::from_parts(
            setup,
            remaining,
            log,
            mrx,
            Vector::from(detectives),
        ))
    }
}

impl GameState {
    /// Build a game from a present MrX and detective list
    pub fn new(
        setup: GameSetup,
        mrx: Player,
        detectives: Vec<Player>,
    ) -> Result<GameState, GameError> {
        build(setup, Some(mrx), Some(detectives))
    }
}

//! Core game state machine.
//!
//! A `GameState` is immutable: `advance` returns the successor state and
//! leaves the receiver untouched. The legal move set and the winner set are
//! computed together, once per instance, on first query.

use crate::factory::{RawGameState, SetupError};
use crate::graph::Location;
use crate::movegen::{double_moves, single_moves};
use crate::moves::{LogEntry, Move};
use crate::piece::{Detective, Piece};
use crate::player::Player;
use crate::setup::GameSetup;
use crate::ticket::TicketBoard;
use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors surfaced by the engine
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Invalid setup: {0}")]
    InvalidSetup(#[from] SetupError),

    #[error("Illegal move: {0}")]
    IllegalMove(Move),
}

/// Legal moves and winners, evaluated in a single pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Outcome {
    moves: BTreeSet<Move>,
    winner: BTreeSet<Piece>,
}

/// The complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    setup: GameSetup,
    /// Pieces still entitled to move this round
    remaining: OrdSet<Piece>,
    /// MrX's travel log
    log: Vector<LogEntry>,
    mrx: Player,
    detectives: Vector<Player>,
    #[serde(skip)]
    outcome: OnceLock<Outcome>,
}

impl GameState {
    /// Assemble a state from parts already known to be valid
    pub(crate) fn from_parts(
        setup: GameSetup,
        remaining: OrdSet<Piece>,
        log: Vector<LogEntry>,
        mrx: Player,
        detectives: Vector<Player>,
    ) -> Self {
        Self {
            setup,
            remaining,
            log,
            mrx,
            detectives,
            outcome: OnceLock::new(),
        }
    }

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    pub fn remaining(&self) -> &OrdSet<Piece> {
        &self.remaining
    }

    pub fn travel_log(&self) -> &Vector<LogEntry> {
        &self.log
    }

    pub fn mrx(&self) -> &Player {
        &self.mrx
    }

    pub fn detectives(&self) -> &Vector<Player> {
        &self.detectives
    }

    /// Every piece in the game
    pub fn players(&self) -> BTreeSet<Piece> {
        std::iter::once(self.mrx.piece)
            .chain(self.detectives.iter().map(|d| d.piece))
            .collect()
    }

    /// Get a player by piece
    pub fn get_player(&self, piece: Piece) -> Option<&Player> {
        match piece {
            Piece::MrX => Some(&self.mrx),
            Piece::Detective(_) => self.detectives.iter().find(|d| d.piece == piece),
        }
    }

    /// Location of a detective, `None` if that detective is not playing
    pub fn detective_location(&self, detective: Detective) -> Option<Location> {
        self.get_player(detective.into()).map(|d| d.location)
    }

    /// Tickets held by a piece, `None` if the piece is not playing
    pub fn player_tickets(&self, piece: Piece) -> Option<&TicketBoard> {
        self.get_player(piece).map(|p| &p.tickets)
    }

    /// Rounds MrX has yet to play
    pub fn rounds_left(&self) -> usize {
        self.setup.round_count().saturating_sub(self.log.len())
    }

    /// Legal moves; empty exactly when the game has a winner
    pub fn available_moves(&self) -> &BTreeSet<Move> {
        &self.outcome().moves
    }

    /// Winning pieces; empty while the game is in progress
    pub fn winner(&self) -> &BTreeSet<Piece> {
        &self.outcome().winner
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        !self.winner().is_empty()
    }

    fn outcome(&self) -> &Outcome {
        self.outcome.get_or_init(|| self.evaluate())
    }

    fn detective_pieces(&self) -> BTreeSet<Piece> {
        self.detectives.iter().map(|d| d.piece).collect()
    }

    /// Whether any detective in the game can move at all
    fn pursuit_stalled(&self) -> bool {
        self.detectives.iter().all(|d| {
            single_moves(&self.setup, &self.detectives, d, d.location).is_empty()
        })
    }

    /// Compute winners and legal moves for this state
    fn evaluate(&self) -> Outcome {
        let mrx_to_move = self.remaining.contains(&Piece::MrX);

        let winner = if self.detectives.iter().any(|d| d.location == self.mrx.location) {
            self.detective_pieces()
        } else if mrx_to_move && self.rounds_left() == 0 {
            BTreeSet::from([Piece::MrX])
        } else if self.pursuit_stalled() {
            BTreeSet::from([Piece::MrX])
        } else {
            BTreeSet::new()
        };
        if !winner.is_empty() {
            return Outcome {
                moves: BTreeSet::new(),
                winner,
            };
        }

        let mut moves = BTreeSet::new();
        if mrx_to_move {
            let source = self.mrx.location;
            moves.extend(
                single_moves(&self.setup, &self.detectives, &self.mrx, source)
                    .into_iter()
                    .map(Move::from),
            );
            if self.rounds_left() >= 2 {
                moves.extend(
                    double_moves(&self.setup, &self.detectives, &self.mrx, source)
                        .into_iter()
                        .map(Move::from),
                );
            }
            if moves.is_empty() {
                // Cornered
                return Outcome {
                    moves,
                    winner: self.detective_pieces(),
                };
            }
        } else {
            for detective in self.detectives.iter() {
                if self.remaining.contains(&detective.piece) {
                    moves.extend(
                        single_moves(&self.setup, &self.detectives, detective, detective.location)
                            .into_iter()
                            .map(Move::from),
                    );
                }
            }
        }

        Outcome {
            moves,
            winner: BTreeSet::new(),
        }
    }

    /// Apply a legal move, producing the next state
    pub fn advance(&self, mv: &Move) -> Result<GameState, GameError> {
        if !self.available_moves().contains(mv) {
            return Err(GameError::IllegalMove(*mv));
        }

        let mover = mv.commenced_by();
        let tickets = mv.tickets();
        let mut remaining = self.remaining.clone();
        remaining.remove(&mover);

        let next = match mover {
            Piece::MrX => {
                let mut log = self.log.clone();
                for (ticket, location) in mv.legs() {
                    let entry = if self.setup.is_reveal_round(log.len()) {
                        LogEntry::revealed(ticket, location)
                    } else {
                        LogEntry::hidden(ticket)
                    };
                    log.push_back(entry);
                }

                let mrx = self
                    .mrx
                    .spend(&tickets)
                    .ok_or(GameError::IllegalMove(*mv))?
                    .at(mv.destination());

                trace!(round = log.len(), "MrX moved, detectives to play");
                GameState::from_parts(
                    self.setup.clone(),
                    self.detective_pieces().into_iter().collect(),
                    log,
                    mrx,
                    self.detectives.clone(),
                )
            }
            Piece::Detective(_) => {
                let index = self
                    .detectives
                    .iter()
                    .position(|d| d.piece == mover)
                    .ok_or(GameError::IllegalMove(*mv))?;
                let moved = self.detectives[index]
                    .spend(&tickets)
                    .ok_or(GameError::IllegalMove(*mv))?
                    .at(mv.destination());
                let detectives = self.detectives.update(index, moved);
                // Detectives' spent tickets go to MrX
                let mrx = self.mrx.receive(&tickets);

                let stuck = !remaining.is_empty()
                    && detectives
                        .iter()
                        .filter(|d| remaining.contains(&d.piece))
                        .all(|d| single_moves(&self.setup, &detectives, d, d.location).is_empty());
                if stuck {
                    debug!(
                        skipped = remaining.len(),
                        "remaining detectives cannot move, ending round"
                    );
                    remaining = OrdSet::unit(Piece::MrX);
                } else if remaining.is_empty() {
                    trace!("all detectives moved, MrX to play");
                    remaining.insert(Piece::MrX);
                }

                GameState::from_parts(
                    self.setup.clone(),
                    remaining,
                    self.log.clone(),
                    mrx,
                    detectives,
                )
            }
        };

        debug!(%mv, "move applied");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::build;
    use crate::graph::TransportGraph;
    use crate::moves::{DoubleMove, SingleMove};
    use crate::ticket::{Ticket, Transport};

    fn cycle_graph() -> TransportGraph {
        TransportGraph::from_edges([
            (1, 2, Transport::Taxi),
            (2, 3, Transport::Taxi),
            (3, 1, Transport::Taxi),
        ])
    }

    fn line_graph() -> TransportGraph {
        // 1 - 2 - 3 - 4 - 5 - 6
        TransportGraph::from_edges((1..6).map(|n| (n, n + 1, Transport::Taxi)))
    }

    fn taxis(n: u32) -> TicketBoard {
        TicketBoard::with_amounts(n, 0, 0, 0, 0)
    }

    fn single(piece: impl Into<Piece>, from: Location, ticket: Ticket, to: Location) -> Move {
        SingleMove::new(piece.into(), from, ticket, to).into()
    }

    #[test]
    fn test_initial_state() {
        let state = build(
            GameSetup::new(cycle_graph(), [true, false]),
            Some(Player::new(Piece::MrX, 1, taxis(1))),
            Some(vec![Player::new(Detective::Red, 2, taxis(1))]),
        )
        .unwrap();

        assert_eq!(state.remaining().iter().collect::<Vec<_>>(), vec![&Piece::MrX]);
        assert!(state.travel_log().is_empty());
        assert_eq!(state.rounds_left(), 2);
        assert!(!state.is_finished());
    }

    #[test]
    fn test_accessors() {
        let state = build(
            GameSetup::new(cycle_graph(), [true]),
            Some(Player::new(Piece::MrX, 1, taxis(1))),
            Some(vec![Player::new(Detective::Red, 2, taxis(3))]),
        )
        .unwrap();

        assert_eq!(state.detective_location(Detective::Red), Some(2));
        assert_eq!(state.detective_location(Detective::Blue), None);
        assert_eq!(state.player_tickets(Piece::MrX).map(|t| t.taxi), Some(1));
        assert_eq!(
            state.player_tickets(Detective::Red.into()).map(|t| t.taxi),
            Some(3)
        );
        assert!(state.player_tickets(Detective::Yellow.into()).is_none());
        assert_eq!(state.players().len(), 2);
    }

    #[test]
    fn test_illegal_move_rejected() {
        let state = build(
            GameSetup::new(cycle_graph(), [true]),
            Some(Player::new(Piece::MrX, 1, taxis(1))),
            Some(vec![Player::new(Detective::Red, 2, taxis(1))]),
        )
        .unwrap();

        // Occupied destination
        let blocked = single(Piece::MrX, 1, Ticket::Taxi, 2);
        assert_eq!(state.advance(&blocked).unwrap_err(), GameError::IllegalMove(blocked));

        // Not the detective's turn
        let early = single(Detective::Red, 2, Ticket::Taxi, 3);
        assert!(matches!(state.advance(&early), Err(GameError::IllegalMove(_))));

        // Receiver untouched
        assert!(state.travel_log().is_empty());
        assert_eq!(state.mrx().location, 1);
    }

    #[test]
    fn test_mrx_move_logs_and_hands_over() {
        let state = build(
            GameSetup::new(line_graph(), [true, false]),
            Some(Player::new(Piece::MrX, 3, taxis(2))),
            Some(vec![
                Player::new(Detective::Red, 1, taxis(2)),
                Player::new(Detective::Blue, 6, taxis(2)),
            ]),
        )
        .unwrap();

        let next = state.advance(&single(Piece::MrX, 3, Ticket::Taxi, 4)).unwrap();
        assert_eq!(
            next.travel_log().iter().collect::<Vec<_>>(),
            vec![&LogEntry::revealed(Ticket::Taxi, 4)]
        );
        assert_eq!(next.mrx().location, 4);
        assert_eq!(next.mrx().tickets.taxi, 1);
        assert_eq!(next.remaining().len(), 2);
        assert!(!next.remaining().contains(&Piece::MrX));
        // Every remaining detective may move
        assert!(next
            .available_moves()
            .iter()
            .all(|m| m.commenced_by().is_detective()));
        assert_eq!(next.available_moves().len(), 2);
    }

    #[test]
    fn test_hidden_round_hides_location() {
        let state = build(
            GameSetup::new(line_graph(), [false, true]),
            Some(Player::new(Piece::MrX, 3, taxis(2))),
            Some(vec![Player::new(Detective::Red, 6, taxis(2))]),
        )
        .unwrap();

        let next = state.advance(&single(Piece::MrX, 3, Ticket::Taxi, 2)).unwrap();
        assert_eq!(next.travel_log()[0], LogEntry::hidden(Ticket::Taxi));
    }

    #[test]
    fn test_double_move_logs_each_leg() {
        let state = build(
            GameSetup::new(line_graph(), [false, true, false]),
            Some(Player::new(Piece::MrX, 3, TicketBoard::with_amounts(2, 0, 0, 0, 1))),
            Some(vec![Player::new(Detective::Red, 1, taxis(2))]),
        )
        .unwrap();

        let mv = Move::Double(DoubleMove {
            mover: Piece::MrX,
            source: 3,
            ticket1: Ticket::Taxi,
            destination1: 4,
            ticket2: Ticket::Taxi,
            destination2: 5,
        });
        let next = state.advance(&mv).unwrap();

        assert_eq!(
            next.travel_log().iter().copied().collect::<Vec<_>>(),
            vec![LogEntry::hidden(Ticket::Taxi), LogEntry::revealed(Ticket::Taxi, 5)]
        );
        assert_eq!(next.mrx().tickets, TicketBoard::new());
        assert_eq!(next.mrx().location, 5);
    }

    #[test]
    fn test_revealed_first_leg_logs_intermediate_location() {
        let state = build(
            GameSetup::new(line_graph(), [true, false]),
            Some(Player::new(Piece::MrX, 3, TicketBoard::with_amounts(2, 0, 0, 0, 1))),
            Some(vec![Player::new(Detective::Red, 1, taxis(2))]),
        )
        .unwrap();

        let mv = state
            .available_moves()
            .iter()
            .find(|m| matches!(m, Move::Double(d) if d.destination1 == 4 && d.destination2 == 5))
            .copied()
            .unwrap();
        let next = state.advance(&mv).unwrap();
        assert_eq!(next.travel_log()[0], LogEntry::revealed(Ticket::Taxi, 4));
        assert_eq!(next.travel_log()[1], LogEntry::hidden(Ticket::Taxi));
    }

    #[test]
    fn test_no_double_moves_in_last_round() {
        let state = build(
            GameSetup::new(line_graph(), [false]),
            Some(Player::new(Piece::MrX, 3, TicketBoard::with_amounts(2, 0, 0, 0, 1))),
            Some(vec![Player::new(Detective::Red, 1, taxis(2))]),
        )
        .unwrap();

        assert!(!state.available_moves().is_empty());
        assert!(state
            .available_moves()
            .iter()
            .all(|m| matches!(m, Move::Single(_))));
    }

    #[test]
    fn test_detective_tickets_go_to_mrx() {
        let state = build(
            GameSetup::new(line_graph(), [false, false]),
            Some(Player::new(Piece::MrX, 3, taxis(1))),
            Some(vec![Player::new(Detective::Red, 6, TicketBoard::with_amounts(2, 1, 0, 0, 0))]),
        )
        .unwrap();

        let state = state.advance(&single(Piece::MrX, 3, Ticket::Taxi, 2)).unwrap();
        assert_eq!(state.mrx().tickets.taxi, 0);

        let state = state
            .advance(&single(Detective::Red, 6, Ticket::Taxi, 5))
            .unwrap();
        assert_eq!(state.mrx().tickets.taxi, 1);
        assert_eq!(state.detective_location(Detective::Red), Some(5));
        assert_eq!(state.player_tickets(Detective::Red.into()).map(|t| t.taxi), Some(1));
        // Round complete, back to MrX
        assert_eq!(state.remaining().iter().collect::<Vec<_>>(), vec![&Piece::MrX]);
    }

    #[test]
    fn test_full_mrx_board_absorbs_transfer() {
        let state = build(
            GameSetup::new(line_graph(), [false, false]),
            Some(Player::new(Piece::MrX, 3, TicketBoard::with_amounts(u32::MAX, 0, 0, 1, 0))),
            Some(vec![Player::new(Detective::Red, 6, taxis(1))]),
        )
        .unwrap();

        let state = state.advance(&single(Piece::MrX, 3, Ticket::Secret, 2)).unwrap();
        let state = state
            .advance(&single(Detective::Red, 6, Ticket::Taxi, 5))
            .unwrap();
        assert_eq!(state.mrx().tickets.taxi, u32::MAX);
        assert_eq!(state.mrx().tickets.total(), u32::MAX);
    }

    #[test]
    fn test_stuck_detectives_end_round() {
        // Blue is boxed in at node 6 with no tickets; Red can still move
        let state = build(
            GameSetup::new(line_graph(), [false, false, false]),
            Some(Player::new(Piece::MrX, 3, taxis(3))),
            Some(vec![
                Player::new(Detective::Red, 1, taxis(2)),
                Player::new(Detective::Blue, 6, TicketBoard::new()),
            ]),
        )
        .unwrap();

        let state = state.advance(&single(Piece::MrX, 3, Ticket::Taxi, 4)).unwrap();
        assert_eq!(state.remaining().len(), 2);
        // Only Red can act
        assert!(state
            .available_moves()
            .iter()
            .all(|m| m.commenced_by() == Piece::Detective(Detective::Red)));

        let state = state
            .advance(&single(Detective::Red, 1, Ticket::Taxi, 2))
            .unwrap();
        // Blue cannot move, so the round ends early
        assert_eq!(state.remaining().iter().collect::<Vec<_>>(), vec![&Piece::MrX]);
        assert!(state
            .available_moves()
            .iter()
            .all(|m| m.commenced_by() == Piece::MrX));
    }

    #[test]
    fn test_capture_wins_for_all_detectives() {
        let state = build(
            GameSetup::new(line_graph(), [false, false]),
            Some(Player::new(Piece::MrX, 3, taxis(1))),
            Some(vec![
                Player::new(Detective::Red, 5, taxis(1)),
                Player::new(Detective::Blue, 1, taxis(1)),
            ]),
        )
        .unwrap();

        let state = state.advance(&single(Piece::MrX, 3, Ticket::Taxi, 4)).unwrap();
        let state = state
            .advance(&single(Detective::Red, 5, Ticket::Taxi, 4))
            .unwrap();

        assert_eq!(
            state.winner(),
            &BTreeSet::from([
                Piece::Detective(Detective::Red),
                Piece::Detective(Detective::Blue)
            ])
        );
        assert!(state.available_moves().is_empty());
    }

    #[test]
    fn test_cornered_mrx_loses() {
        // MrX at the end of the line, only neighbour occupied
        let state = build(
            GameSetup::new(line_graph(), [false, false]),
            Some(Player::new(Piece::MrX, 1, taxis(4))),
            Some(vec![Player::new(Detective::Red, 2, taxis(4))]),
        )
        .unwrap();

        assert_eq!(state.winner(), &BTreeSet::from([Piece::Detective(Detective::Red)]));
        assert!(state.available_moves().is_empty());
    }

    #[test]
    fn test_stalled_pursuit_wins_for_mrx() {
        let state = build(
            GameSetup::new(cycle_graph(), [true]),
            Some(Player::new(Piece::MrX, 1, taxis(1))),
            Some(vec![Player::new(Detective::Red, 2, TicketBoard::new())]),
        )
        .unwrap();

        assert_eq!(state.winner(), &BTreeSet::from([Piece::MrX]));
        assert!(state.available_moves().is_empty());
    }

    #[test]
    fn test_mrx_survives_all_rounds() {
        let state = build(
            GameSetup::new(line_graph(), [true]),
            Some(Player::new(Piece::MrX, 3, taxis(1))),
            Some(vec![Player::new(Detective::Red, 6, taxis(1))]),
        )
        .unwrap();

        let state = state.advance(&single(Piece::MrX, 3, Ticket::Taxi, 2)).unwrap();
        assert!(!state.is_finished());
        let state = state
            .advance(&single(Detective::Red, 6, Ticket::Taxi, 5))
            .unwrap();

        assert_eq!(state.winner(), &BTreeSet::from([Piece::MrX]));
        assert!(state.available_moves().is_empty());
        assert!(matches!(
            state.advance(&single(Piece::MrX, 2, Ticket::Taxi, 1)),
            Err(GameError::IllegalMove(_))
        ));
    }

    #[test]
    fn test_evaluation_is_cached_and_stable() {
        let state = build(
            GameSetup::new(line_graph(), [false, false]),
            Some(Player::new(Piece::MrX, 3, taxis(2))),
            Some(vec![Player::new(Detective::Red, 6, taxis(2))]),
        )
        .unwrap();

        let first = state.available_moves() as *const _;
        let second = state.available_moves() as *const _;
        assert_eq!(first, second);

        let copy = state.clone();
        assert_eq!(copy.available_moves(), state.available_moves());
        assert_eq!(copy.winner(), state.winner());
    }

    #[test]
    fn test_concurrent_first_evaluation() {
        let state = build(
            GameSetup::new(line_graph(), [false, false, false]),
            Some(Player::new(Piece::MrX, 3, TicketBoard::mrx_defaults(1))),
            Some(vec![Player::new(Detective::Red, 6, taxis(2))]),
        )
        .unwrap();

        let results: Vec<BTreeSet<Move>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| state.available_moves().clone()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(!results[0].is_empty());
        assert!(results.iter().all(|moves| moves == state.available_moves()));
    }
}

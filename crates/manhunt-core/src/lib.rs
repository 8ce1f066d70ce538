//! Manhunt - rules engine for a hidden-movement pursuit board game
//!
//! One fugitive, MrX, evades a team of detectives across a map of locations
//! joined by taxi, bus, underground and ferry lines. This crate provides:
//! - Tickets, pieces and immutable player snapshots
//! - The transport graph and round schedule
//! - Legal move generation, including MrX's double moves
//! - An immutable game state machine with win detection
//! - An observable model that notifies listeners after each move
//!
//! # Architecture
//!
//! Every `GameState` is a value: `advance` returns a new state and never
//! mutates the old one. Successor states share their log, detective list and
//! map with their predecessor through `im` persistent collections and `Arc`.
//!
//! # Modules
//!
//! - [`ticket`]: Ticket and transport kinds, ticket inventories
//! - [`piece`]: MrX and detective piece identities
//! - [`player`]: Player snapshots
//! - [`graph`]: The transport graph
//! - [`setup`]: Map plus round schedule
//! - [`moves`]: Single and double moves, travel log entries
//! - [`movegen`]: Legal move generation
//! - [`game`]: Game state, win evaluation and transitions
//! - [`factory`]: Validation of the opening configuration
//! - [`model`]: Observer notification around a running game

pub mod factory;
pub mod game;
pub mod graph;
pub mod model;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod player;
pub mod setup;
pub mod ticket;

// Re-export commonly used types
pub use factory::{build, SetupError};
pub use game::{GameError, GameState};
pub use graph::{Location, TransportGraph};
pub use model::{Event, Model, ModelError, Observer, ObserverFault};
pub use movegen::{double_moves, single_moves};
pub use moves::{DoubleMove, LogEntry, Move, SingleMove};
pub use piece::{Detective, Piece};
pub use player::Player;
pub use setup::GameSetup;
pub use ticket::{Ticket, TicketBoard, Transport};

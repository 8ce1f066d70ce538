//! Observable game model.
//!
//! Wraps the current `GameState`, applies chosen moves and notifies every
//! registered observer after each successful transition.

use crate::game::{GameError, GameState};
use crate::moves::Move;
use crate::player::Player;
use crate::setup::GameSetup;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// What happened to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    MoveMade,
    GameOver,
}

/// Receives a notification after every applied move
pub trait Observer {
    fn on_model_changed(&self, board: &GameState, event: Event);
}

/// Why an observer (un)registration was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObserverFault {
    AlreadyRegistered,
    NotRegistered,
}

impl fmt::Display for ObserverFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObserverFault::AlreadyRegistered => f.write_str("observer already registered"),
            ObserverFault::NotRegistered => f.write_str("observer not registered"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Invalid observer: {0}")]
    InvalidObserver(ObserverFault),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// A game in progress plus its observers
pub struct Model {
    state: GameState,
    observers: Vec<Arc<dyn Observer>>,
}

impl Model {
    /// Validate the configuration and start a new game
    pub fn new(
        setup: GameSetup,
        mrx: Player,
        detectives: Vec<Player>,
    ) -> Result<Self, GameError> {
        Ok(Self::from_state(GameState::new(setup, mrx, detectives)?))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    pub fn current_board(&self) -> &GameState {
        &self.state
    }

    fn position(&self, observer: &Arc<dyn Observer>) -> Option<usize> {
        self.observers.iter().position(|o| Arc::ptr_eq(o, observer))
    }

    pub fn register_observer(&mut self, observer: Arc<dyn Observer>) -> Result<(), ModelError> {
        if self.position(&observer).is_some() {
            return Err(ModelError::InvalidObserver(ObserverFault::AlreadyRegistered));
        }
        self.observers.push(observer);
        debug!(observers = self.observers.len(), "observer registered");
        Ok(())
    }

    pub fn unregister_observer(&mut self, observer: &Arc<dyn Observer>) -> Result<(), ModelError> {
        let index = self
            .position(observer)
            .ok_or(ModelError::InvalidObserver(ObserverFault::NotRegistered))?;
        self.observers.remove(index);
        debug!(observers = self.observers.len(), "observer unregistered");
        Ok(())
    }

    pub fn observers(&self) -> &[Arc<dyn Observer>] {
        &self.observers
    }

    /// Apply a move and notify observers; returns the event sent
    pub fn choose_move(&mut self, mv: &Move) -> Result<Event, ModelError> {
        self.state = self.state.advance(mv)?;

        let event = if self.state.winner().is_empty() {
            Event::MoveMade
        } else {
            info!(winner = ?self.state.winner(), "game over");
            Event::GameOver
        };

        // Snapshot so observers may not disturb the dispatch
        let observers = self.observers.clone();
        for observer in &observers {
            observer.on_model_changed(&self.state, event);
        }
        debug!(?event, notified = observers.len(), "observers notified");

        Ok(event)
    }
}

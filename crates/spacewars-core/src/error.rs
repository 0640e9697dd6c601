//! Error types for game commands.
//!
//! Only commands can fail. Per-tick work (motion, wrapping, collisions) is
//! total and never produces a `GameError`. A failed command leaves the world
//! exactly as it was.

use thiserror::Error;

use crate::game::GameStatus;

/// Errors returned by [`Game`](crate::Game) and
/// [`GameManager`](crate::GameManager) commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No spaceship with this name is registered.
    #[error("spaceship not found: {name}")]
    NotFound {
        /// The name that was looked up
        name: String,
    },

    /// A spaceship with this name is already registered.
    #[error("spaceship name already registered: {name}")]
    DuplicateName {
        /// The conflicting name
        name: String,
    },

    /// The command is not allowed in the current game status.
    #[error("cannot {command} while game is {status}")]
    InvalidState {
        /// Status at the time of the command
        status: GameStatus,
        /// The rejected command
        command: &'static str,
    },
}

impl GameError {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub(crate) fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }
}

/// Result alias for game commands.
pub type Result<T> = std::result::Result<T, GameError>;

//! Error types shared by the tournament components.

use thiserror::Error;

use crate::player::PlayerId;
use crate::tournament::{Scope, TournamentId};

/// Input rejected before any write was attempted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Tournament name was empty
    #[error("Tournament name must not be empty")]
    EmptyTournamentName,

    /// Winner and loser are the same player
    #[error("Player {0} cannot play against themselves")]
    SelfMatch(PlayerId),

    /// Player id is unknown or registered in a different scope
    #[error("Player {player_id} is not registered in {scope}")]
    PlayerNotInScope { player_id: PlayerId, scope: Scope },

    /// Scope names a tournament that does not exist
    #[error("Tournament not found: {0}")]
    UnknownTournament(TournamentId),
}

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Invalid input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Database error, the surrounding transaction was rolled back
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Every candidate id collided with an existing tournament
    #[error("Could not allocate a tournament id for '{slug}' after {attempts} attempts")]
    IdGenerationExhausted { slug: String, attempts: u32 },
}

impl TournamentError {
    /// Get a client-safe error message
    ///
    /// Database errors are replaced with a generic message so SQL details and
    /// connection strings never reach a caller-facing surface.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Whether the error was caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, TournamentError::Validation(_))
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

//! Player registry: registers and counts players within a scope.

use std::sync::Arc;

use super::models::Player;
use crate::db::TournamentRepository;
use crate::errors::{TournamentResult, ValidationError};
use crate::sanitize::Sanitizer;
use crate::tournament::Scope;

/// Player registry
#[derive(Clone)]
pub struct PlayerRegistry {
    repo: Arc<dyn TournamentRepository>,
    sanitizer: Arc<dyn Sanitizer>,
}

impl PlayerRegistry {
    /// Create a new player registry
    pub fn new(repo: Arc<dyn TournamentRepository>, sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self { repo, sanitizer }
    }

    /// Register a player in a scope
    ///
    /// An empty name is treated as nothing to do and returns `Ok(None)`
    /// without touching storage. The name is sanitized before it is stored.
    /// The tournament existence check is part of the insert itself.
    ///
    /// # Errors
    ///
    /// * `ValidationError::UnknownTournament` - the scope names a missing tournament
    pub async fn register_player(
        &self,
        scope: &Scope,
        name: &str,
    ) -> TournamentResult<Option<Player>> {
        if name.is_empty() {
            log::debug!("Ignoring registration with empty name in {}", scope);
            return Ok(None);
        }

        let Some(player) = self
            .repo
            .insert_player(scope, &self.sanitizer.clean(name))
            .await?
        else {
            // Only a tournament scope can reject the insert
            return match scope {
                Scope::Tournament(id) => Err(ValidationError::UnknownTournament(id.clone()).into()),
                Scope::Global => Ok(None),
            };
        };
        log::debug!("Registered player {} '{}' in {}", player.id, player.name, scope);

        Ok(Some(player))
    }

    /// Number of players in a scope, 0 for an empty or unknown scope
    pub async fn count_players(&self, scope: &Scope) -> TournamentResult<i64> {
        self.repo.count_players(scope).await
    }

    /// Remove every player in a scope
    ///
    /// Matches that reference the removed players go with them.
    pub async fn delete_players(&self, scope: &Scope) -> TournamentResult<u64> {
        let removed = self.repo.delete_players(scope).await?;
        log::info!("Deleted {} players from {}", removed, scope);
        Ok(removed)
    }
}

//! Tournament registry: creates and deletes tournament scopes.

use std::sync::Arc;

use super::models::{Scope, Tournament, TournamentId, slugify};
use crate::db::TournamentRepository;
use crate::db::config::DEFAULT_ID_ATTEMPTS;
use crate::errors::{TournamentError, TournamentResult, ValidationError};
use crate::sanitize::Sanitizer;

/// Tournament registry
#[derive(Clone)]
pub struct TournamentRegistry {
    repo: Arc<dyn TournamentRepository>,
    sanitizer: Arc<dyn Sanitizer>,
    id_attempts: u32,
}

impl TournamentRegistry {
    /// Create a new tournament registry
    pub fn new(repo: Arc<dyn TournamentRepository>, sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self {
            repo,
            sanitizer,
            id_attempts: DEFAULT_ID_ATTEMPTS,
        }
    }

    /// Override how many candidate ids are tried before giving up
    pub fn with_id_attempts(mut self, attempts: u32) -> Self {
        self.id_attempts = attempts.max(1);
        self
    }

    /// Create a new tournament and return its id
    ///
    /// The id is `<slug>_<n>` where `n` starts at the number of ids already
    /// sharing the slug prefix. Each candidate is inserted with
    /// insert-if-absent semantics. After a conflict the next candidate is one
    /// past the highest numeric suffix stored for the slug, so ids left behind
    /// by deleted tournaments are stepped over in one go and only concurrent
    /// creations consume further attempts.
    ///
    /// # Errors
    ///
    /// * `ValidationError::EmptyTournamentName` - `name` is empty
    /// * `TournamentError::IdGenerationExhausted` - every candidate lost a race
    pub async fn create_tournament(&self, name: &str) -> TournamentResult<TournamentId> {
        if name.is_empty() {
            return Err(ValidationError::EmptyTournamentName.into());
        }

        let clean_name = self.sanitizer.clean(name);
        let slug = slugify(name);
        let prefix = format!("{slug}_");

        let mut suffix = self.repo.count_tournaments_with_prefix(&prefix).await?;

        for _ in 0..self.id_attempts {
            let candidate = TournamentId::from_slug(&slug, suffix);

            if let Some(tournament) = self.repo.insert_tournament(&candidate, &clean_name).await? {
                log::info!("Created tournament {} '{}'", tournament.id, tournament.name);
                return Ok(tournament.id);
            }

            log::warn!("Tournament id {} already taken, retrying", candidate);
            let highest = self.repo.max_tournament_suffix(&prefix).await?;
            suffix = highest.map_or(suffix, |highest| highest.max(suffix)) + 1;
        }

        Err(TournamentError::IdGenerationExhausted {
            slug,
            attempts: self.id_attempts,
        })
    }

    /// Delete a scope with all of its players and matches
    ///
    /// For [`Scope::Global`] there is no tournament row, so only its matches
    /// and players are removed, together in one transaction. Returns whether a
    /// tournament row was deleted.
    pub async fn delete_tournament(&self, scope: &Scope) -> TournamentResult<bool> {
        match scope {
            Scope::Global => {
                let (players, matches) = self.repo.clear_scope(scope).await?;
                log::info!(
                    "Cleared global scope ({} players, {} matches)",
                    players,
                    matches
                );
                Ok(false)
            }
            Scope::Tournament(id) => {
                let deleted = self.repo.delete_tournament(id).await?;
                if deleted {
                    log::info!("Deleted tournament {}", id);
                } else {
                    log::debug!("Tournament {} not found, nothing to delete", id);
                }
                Ok(deleted)
            }
        }
    }

    /// Delete every tournament with its players and matches
    pub async fn delete_all_tournaments(&self) -> TournamentResult<u64> {
        let removed = self.repo.delete_all_tournaments().await?;
        log::info!("Deleted {} tournaments", removed);
        Ok(removed)
    }

    /// Get tournament by id
    pub async fn get_tournament(&self, id: &TournamentId) -> TournamentResult<Option<Tournament>> {
        self.repo.find_tournament(id).await
    }

    /// List all tournaments
    pub async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        self.repo.list_tournaments().await
    }
}

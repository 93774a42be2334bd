//! Match ledger: append-only record of match outcomes within a scope.

use std::sync::Arc;

use super::models::Match;
use crate::db::TournamentRepository;
use crate::errors::{TournamentResult, ValidationError};
use crate::player::PlayerId;
use crate::tournament::Scope;

/// Match ledger
#[derive(Clone)]
pub struct MatchLedger {
    repo: Arc<dyn TournamentRepository>,
}

impl MatchLedger {
    /// Create a new match ledger
    pub fn new(repo: Arc<dyn TournamentRepository>) -> Self {
        Self { repo }
    }

    /// Record the outcome of a single match
    ///
    /// Returns `Ok(None)` without writing when either id is absent.
    ///
    /// # Errors
    ///
    /// * `ValidationError::SelfMatch` - winner and loser are the same player
    /// * `ValidationError::PlayerNotInScope` - a player is unknown or belongs
    ///   to another scope
    pub async fn report_match(
        &self,
        scope: &Scope,
        winner_id: Option<PlayerId>,
        loser_id: Option<PlayerId>,
    ) -> TournamentResult<Option<Match>> {
        let (Some(winner_id), Some(loser_id)) = (winner_id, loser_id) else {
            log::debug!("Ignoring match report with a missing player in {}", scope);
            return Ok(None);
        };

        if winner_id == loser_id {
            return Err(ValidationError::SelfMatch(winner_id).into());
        }

        // Scope membership is checked by the insert, in the same statement
        let Some(recorded) = self.repo.insert_match(scope, winner_id, loser_id).await? else {
            let player_id = self.outside_scope(scope, winner_id, loser_id).await?;
            return Err(ValidationError::PlayerNotInScope {
                player_id,
                scope: scope.clone(),
            }
            .into());
        };
        log::debug!(
            "Recorded match {} in {}: {} beat {}",
            recorded.id,
            scope,
            winner_id,
            loser_id
        );

        Ok(Some(recorded))
    }

    /// Remove every match in a scope
    pub async fn delete_matches(&self, scope: &Scope) -> TournamentResult<u64> {
        let removed = self.repo.delete_matches(scope).await?;
        log::info!("Deleted {} matches from {}", removed, scope);
        Ok(removed)
    }

    /// Which of the two players made the insert reject the match
    async fn outside_scope(
        &self,
        scope: &Scope,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> TournamentResult<PlayerId> {
        match self.repo.find_player(winner_id).await? {
            Some(player) if &player.scope == scope => Ok(loser_id),
            _ => Ok(winner_id),
        }
    }
}

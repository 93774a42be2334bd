//! In-memory `TournamentRepository` for tests and embedded use.
//!
//! Every method takes the state lock once, so each call is atomic just like a
//! committed PostgreSQL transaction. Deleting players also drops the matches
//! that reference them, mirroring the `ON DELETE CASCADE` of the schema.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::repository::{ScopeSnapshot, TournamentRepository};
use crate::errors::TournamentResult;
use crate::ledger::{Match, MatchId};
use crate::player::{Player, PlayerId};
use crate::tournament::{Scope, Tournament, TournamentId};

#[derive(Debug)]
struct MemoryState {
    tournaments: BTreeMap<TournamentId, Tournament>,
    players: BTreeMap<PlayerId, Player>,
    matches: BTreeMap<MatchId, Match>,
    next_player_id: PlayerId,
    next_match_id: MatchId,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            tournaments: BTreeMap::new(),
            players: BTreeMap::new(),
            matches: BTreeMap::new(),
            next_player_id: 1,
            next_match_id: 1,
        }
    }
}

impl MemoryState {
    fn remove_scope_matches(&mut self, scope: &Scope) -> u64 {
        let before = self.matches.len();
        self.matches.retain(|_, m| &m.scope != scope);
        (before - self.matches.len()) as u64
    }

    fn remove_scope_players(&mut self, scope: &Scope) -> u64 {
        let before = self.players.len();
        self.players.retain(|_, p| &p.scope != scope);
        let removed = (before - self.players.len()) as u64;

        let players = &self.players;
        self.matches
            .retain(|_, m| players.contains_key(&m.winner_id) && players.contains_key(&m.loser_id));

        removed
    }
}

/// Repository keeping all rows in process memory
#[derive(Debug, Default)]
pub struct InMemoryTournamentRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryTournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // Mutations never leave partial state, so poisoning is ignored
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TournamentRepository for InMemoryTournamentRepository {
    async fn insert_tournament(
        &self,
        id: &TournamentId,
        name: &str,
    ) -> TournamentResult<Option<Tournament>> {
        let mut state = self.state();
        if state.tournaments.contains_key(id) {
            return Ok(None);
        }

        let tournament = Tournament {
            id: id.clone(),
            name: name.to_string(),
            created_at: chrono::Utc::now(),
        };
        state.tournaments.insert(id.clone(), tournament.clone());
        Ok(Some(tournament))
    }

    async fn count_tournaments_with_prefix(&self, prefix: &str) -> TournamentResult<i64> {
        let state = self.state();
        let count = state
            .tournaments
            .keys()
            .filter(|id| id.as_str().starts_with(prefix))
            .count();
        Ok(count as i64)
    }

    async fn max_tournament_suffix(&self, prefix: &str) -> TournamentResult<Option<i64>> {
        let state = self.state();
        let max = state
            .tournaments
            .keys()
            .filter_map(|id| id.as_str().strip_prefix(prefix))
            .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|suffix| suffix.parse::<i64>().ok())
            .max();
        Ok(max)
    }

    async fn find_tournament(&self, id: &TournamentId) -> TournamentResult<Option<Tournament>> {
        Ok(self.state().tournaments.get(id).cloned())
    }

    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        Ok(self.state().tournaments.values().cloned().collect())
    }

    async fn delete_tournament(&self, id: &TournamentId) -> TournamentResult<bool> {
        let mut state = self.state();
        let scope = Scope::from(id);
        state.remove_scope_matches(&scope);
        state.remove_scope_players(&scope);
        Ok(state.tournaments.remove(id).is_some())
    }

    async fn delete_all_tournaments(&self) -> TournamentResult<u64> {
        let mut state = self.state();
        state.matches.retain(|_, m| m.scope == Scope::Global);
        state.players.retain(|_, p| p.scope == Scope::Global);
        let removed = state.tournaments.len() as u64;
        state.tournaments.clear();
        Ok(removed)
    }

    async fn insert_player(&self, scope: &Scope, name: &str) -> TournamentResult<Option<Player>> {
        let mut state = self.state();
        if let Scope::Tournament(tournament_id) = scope {
            if !state.tournaments.contains_key(tournament_id) {
                return Ok(None);
            }
        }

        let id = state.next_player_id;
        state.next_player_id += 1;

        let player = Player {
            id,
            scope: scope.clone(),
            name: name.to_string(),
        };
        state.players.insert(id, player.clone());
        Ok(Some(player))
    }

    async fn find_player(&self, id: PlayerId) -> TournamentResult<Option<Player>> {
        Ok(self.state().players.get(&id).cloned())
    }

    async fn count_players(&self, scope: &Scope) -> TournamentResult<i64> {
        let state = self.state();
        let count = state.players.values().filter(|p| &p.scope == scope).count();
        Ok(count as i64)
    }

    async fn delete_players(&self, scope: &Scope) -> TournamentResult<u64> {
        Ok(self.state().remove_scope_players(scope))
    }

    async fn insert_match(
        &self,
        scope: &Scope,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> TournamentResult<Option<Match>> {
        let mut state = self.state();
        let in_scope = |id: PlayerId| state.players.get(&id).is_some_and(|p| &p.scope == scope);
        if !(in_scope(winner_id) && in_scope(loser_id)) {
            return Ok(None);
        }

        let id = state.next_match_id;
        state.next_match_id += 1;

        let recorded = Match {
            id,
            scope: scope.clone(),
            winner_id,
            loser_id,
        };
        state.matches.insert(id, recorded.clone());
        Ok(Some(recorded))
    }

    async fn delete_matches(&self, scope: &Scope) -> TournamentResult<u64> {
        Ok(self.state().remove_scope_matches(scope))
    }

    async fn clear_scope(&self, scope: &Scope) -> TournamentResult<(u64, u64)> {
        let mut state = self.state();
        let matches = state.remove_scope_matches(scope);
        let players = state.remove_scope_players(scope);
        Ok((players, matches))
    }

    async fn scope_snapshot(&self, scope: &Scope) -> TournamentResult<ScopeSnapshot> {
        let state = self.state();
        Ok(ScopeSnapshot {
            players: state
                .players
                .values()
                .filter(|p| &p.scope == scope)
                .cloned()
                .collect(),
            matches: state
                .matches
                .values()
                .filter(|m| &m.scope == scope)
                .cloned()
                .collect(),
        })
    }
}

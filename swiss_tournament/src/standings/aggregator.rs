//! Standings aggregation over the match ledger.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::db::TournamentRepository;
use crate::errors::TournamentResult;
use crate::ledger::Match;
use crate::player::{Player, PlayerId};
use crate::tournament::Scope;

/// Derived ranking entry for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub scope: Scope,
    pub name: String,
    /// Matches won
    pub wins: u32,
    /// Matches played, won or lost
    pub matches: u32,
}

impl Standing {
    pub fn losses(&self) -> u32 {
        self.matches - self.wins
    }
}

/// Build the ordered standings for a set of players and their matches.
///
/// Every player gets exactly one entry, including players without matches.
/// Matches naming a player outside `players` are ignored. Entries are sorted
/// by wins descending, then by player id ascending.
pub fn aggregate(players: &[Player], matches: &[Match]) -> Vec<Standing> {
    let mut records: HashMap<PlayerId, (u32, u32)> =
        players.iter().map(|p| (p.id, (0, 0))).collect();

    for recorded in matches {
        if !records.contains_key(&recorded.winner_id) || !records.contains_key(&recorded.loser_id)
        {
            continue;
        }
        if let Some((wins, played)) = records.get_mut(&recorded.winner_id) {
            *wins += 1;
            *played += 1;
        }
        if let Some((_, played)) = records.get_mut(&recorded.loser_id) {
            *played += 1;
        }
    }

    let mut standings: Vec<Standing> = players
        .iter()
        .map(|p| {
            let (wins, matches) = records.get(&p.id).copied().unwrap_or_default();
            Standing {
                player_id: p.id,
                scope: p.scope.clone(),
                name: p.name.clone(),
                wins,
                matches,
            }
        })
        .collect();

    standings.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.player_id.cmp(&b.player_id)));
    standings
}

/// Standings aggregator
#[derive(Clone)]
pub struct StandingsAggregator {
    repo: Arc<dyn TournamentRepository>,
}

impl StandingsAggregator {
    /// Create a new standings aggregator
    pub fn new(repo: Arc<dyn TournamentRepository>) -> Self {
        Self { repo }
    }

    /// Current standings of a scope, empty when it has no players
    pub async fn standings(&self, scope: &Scope) -> TournamentResult<Vec<Standing>> {
        let snapshot = self.repo.scope_snapshot(scope).await?;
        Ok(aggregate(&snapshot.players, &snapshot.matches))
    }
}

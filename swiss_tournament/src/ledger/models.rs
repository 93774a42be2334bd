//! Match ledger data models.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::tournament::Scope;

/// Match ID type, assigned by storage
pub type MatchId = i64;

/// Recorded match outcome. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub scope: Scope,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
}

impl Match {
    /// Whether the given player took part in this match
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.winner_id == player_id || self.loser_id == player_id
    }
}

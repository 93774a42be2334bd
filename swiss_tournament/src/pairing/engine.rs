//! Next-round pairing from the current standings.

use serde::{Deserialize, Serialize};

use crate::errors::TournamentResult;
use crate::player::PlayerId;
use crate::standings::{Standing, StandingsAggregator};
use crate::tournament::Scope;

/// Two players drawn against each other for the next round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub player1_id: PlayerId,
    pub player1_name: String,
    pub player2_id: PlayerId,
    pub player2_name: String,
}

impl Pairing {
    fn from_standings(first: &Standing, second: &Standing) -> Self {
        Self {
            player1_id: first.player_id,
            player1_name: first.name.clone(),
            player2_id: second.player_id,
            player2_name: second.name.clone(),
        }
    }

    /// `(id1, name1, id2, name2)`
    pub fn into_tuple(self) -> (PlayerId, String, PlayerId, String) {
        (
            self.player1_id,
            self.player1_name,
            self.player2_id,
            self.player2_name,
        )
    }
}

/// Pair adjacent entries of ranked standings: 0 with 1, 2 with 3, and so on.
///
/// An odd number of standings yields no pairings at all; there is no bye.
/// Rematches are not avoided.
pub fn pair_standings(standings: &[Standing]) -> Vec<Pairing> {
    if standings.len() % 2 != 0 {
        return Vec::new();
    }

    standings
        .chunks_exact(2)
        .map(|pair| Pairing::from_standings(&pair[0], &pair[1]))
        .collect()
}

/// Pairing engine
#[derive(Clone)]
pub struct PairingEngine {
    standings: StandingsAggregator,
}

impl PairingEngine {
    /// Create a new pairing engine
    pub fn new(standings: StandingsAggregator) -> Self {
        Self { standings }
    }

    /// Pairings for the next round of a scope
    pub async fn swiss_pairings(&self, scope: &Scope) -> TournamentResult<Vec<Pairing>> {
        let standings = self.standings.standings(scope).await?;
        let pairings = pair_standings(&standings);

        if pairings.is_empty() && !standings.is_empty() {
            log::debug!(
                "No pairings for {}: odd player count {}",
                scope,
                standings.len()
            );
        }

        Ok(pairings)
    }
}

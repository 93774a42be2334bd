//! Single entry point over all tournament components.

use std::sync::Arc;

use crate::db::{
    Database, InMemoryTournamentRepository, PgTournamentRepository, SwissConfig,
    TournamentRepository,
};
use crate::errors::TournamentResult;
use crate::ledger::{Match, MatchLedger};
use crate::pairing::{Pairing, PairingEngine};
use crate::player::{Player, PlayerId, PlayerRegistry};
use crate::sanitize::{HtmlSanitizer, Sanitizer};
use crate::standings::{Standing, StandingsAggregator};
use crate::tournament::{Scope, Tournament, TournamentId, TournamentRegistry};

/// Swiss tournament service
///
/// Owns one shared repository handle and one sanitizer; every component
/// works through the same pool.
#[derive(Clone)]
pub struct SwissTournament {
    tournaments: TournamentRegistry,
    players: PlayerRegistry,
    ledger: MatchLedger,
    standings: StandingsAggregator,
    pairing: PairingEngine,
}

impl SwissTournament {
    /// Build the service on top of a repository and sanitizer
    pub fn new(repo: Arc<dyn TournamentRepository>, sanitizer: Arc<dyn Sanitizer>) -> Self {
        let standings = StandingsAggregator::new(repo.clone());
        Self {
            tournaments: TournamentRegistry::new(repo.clone(), sanitizer.clone()),
            players: PlayerRegistry::new(repo.clone(), sanitizer),
            ledger: MatchLedger::new(repo),
            pairing: PairingEngine::new(standings.clone()),
            standings,
        }
    }

    /// Service backed by process memory with HTML sanitizing
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryTournamentRepository::new()),
            Arc::new(HtmlSanitizer),
        )
    }

    /// Connect to PostgreSQL, apply migrations and build the service
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use swiss_tournament::{Scope, SwissConfig, SwissTournament};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let swiss = SwissTournament::connect(&SwissConfig::from_env()?).await?;
    ///
    ///     let cup = Scope::from(swiss.create_tournament("My Cup").await?);
    ///     swiss.register_player(&cup, "Alice").await?;
    ///     swiss.register_player(&cup, "Bob").await?;
    ///
    ///     for pairing in swiss.swiss_pairings(&cup).await? {
    ///         println!("{} vs {}", pairing.player1_name, pairing.player2_name);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(config: &SwissConfig) -> TournamentResult<Self> {
        let db = Database::new(&config.database).await?;
        db.migrate().await?;

        let repo = Arc::new(PgTournamentRepository::new(Arc::new(db.pool().clone())));
        let mut swiss = Self::new(repo, Arc::new(HtmlSanitizer));
        swiss.tournaments = swiss.tournaments.with_id_attempts(config.id_attempts);
        Ok(swiss)
    }

    /// Create a tournament and return its generated id
    pub async fn create_tournament(&self, name: &str) -> TournamentResult<TournamentId> {
        self.tournaments.create_tournament(name).await
    }

    /// Delete a scope with its players and matches
    pub async fn delete_tournament(&self, scope: &Scope) -> TournamentResult<bool> {
        self.tournaments.delete_tournament(scope).await
    }

    /// Delete every tournament with its players and matches
    pub async fn delete_all_tournaments(&self) -> TournamentResult<u64> {
        self.tournaments.delete_all_tournaments().await
    }

    pub async fn get_tournament(&self, id: &TournamentId) -> TournamentResult<Option<Tournament>> {
        self.tournaments.get_tournament(id).await
    }

    pub async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        self.tournaments.list_tournaments().await
    }

    /// Register a player; an empty name is a no-op returning `None`
    pub async fn register_player(
        &self,
        scope: &Scope,
        name: &str,
    ) -> TournamentResult<Option<Player>> {
        self.players.register_player(scope, name).await
    }

    pub async fn delete_players(&self, scope: &Scope) -> TournamentResult<u64> {
        self.players.delete_players(scope).await
    }

    pub async fn count_players(&self, scope: &Scope) -> TournamentResult<i64> {
        self.players.count_players(scope).await
    }

    /// Record a match; a missing id is a no-op returning `None`
    pub async fn report_match(
        &self,
        scope: &Scope,
        winner_id: Option<PlayerId>,
        loser_id: Option<PlayerId>,
    ) -> TournamentResult<Option<Match>> {
        self.ledger.report_match(scope, winner_id, loser_id).await
    }

    pub async fn delete_matches(&self, scope: &Scope) -> TournamentResult<u64> {
        self.ledger.delete_matches(scope).await
    }

    /// Standings ordered by wins descending, ties by ascending player id
    pub async fn player_standings(&self, scope: &Scope) -> TournamentResult<Vec<Standing>> {
        self.standings.standings(scope).await
    }

    /// Next-round pairings, empty for an odd number of players
    pub async fn swiss_pairings(&self, scope: &Scope) -> TournamentResult<Vec<Pairing>> {
        self.pairing.swiss_pairings(scope).await
    }
}

//! Repository trait definitions and the PostgreSQL implementation.
//!
//! The tournament components only talk to storage through
//! [`TournamentRepository`], so they can run against PostgreSQL in production
//! and against [`InMemoryTournamentRepository`](super::InMemoryTournamentRepository)
//! in tests. Every method is one transaction: it either commits completely or
//! leaves no visible change.
#![allow(clippy::needless_raw_string_hashes)]

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::errors::TournamentResult;
use crate::ledger::Match;
use crate::player::{Player, PlayerId};
use crate::tournament::{Scope, Tournament, TournamentId};

/// Players and matches of one scope, read from a single consistent view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSnapshot {
    /// Players ordered by id
    pub players: Vec<Player>,
    /// Matches ordered by id
    pub matches: Vec<Match>,
}

/// Storage operations needed by the tournament components
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Insert a tournament unless the id is already taken.
    ///
    /// Returns `None` on an id conflict; this is the primitive tournament id
    /// generation retries on.
    async fn insert_tournament(
        &self,
        id: &TournamentId,
        name: &str,
    ) -> TournamentResult<Option<Tournament>>;

    /// Count tournaments whose id starts with `prefix`
    async fn count_tournaments_with_prefix(&self, prefix: &str) -> TournamentResult<i64>;

    /// Highest numeric suffix among ids of the form `<prefix><digits>`
    async fn max_tournament_suffix(&self, prefix: &str) -> TournamentResult<Option<i64>>;

    /// Find tournament by ID
    async fn find_tournament(&self, id: &TournamentId) -> TournamentResult<Option<Tournament>>;

    /// List all tournaments ordered by id
    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>>;

    /// Delete a tournament together with its matches and players.
    ///
    /// Returns whether a tournament row was removed.
    async fn delete_tournament(&self, id: &TournamentId) -> TournamentResult<bool>;

    /// Delete every tournament together with its matches and players.
    ///
    /// The global scope is left alone. Returns the number of tournaments removed.
    async fn delete_all_tournaments(&self) -> TournamentResult<u64>;

    /// Insert a player, letting storage assign the id.
    ///
    /// Returns `None` when the scope names a tournament that does not exist.
    async fn insert_player(&self, scope: &Scope, name: &str) -> TournamentResult<Option<Player>>;

    /// Find player by ID in any scope
    async fn find_player(&self, id: PlayerId) -> TournamentResult<Option<Player>>;

    /// Count players in a scope
    async fn count_players(&self, scope: &Scope) -> TournamentResult<i64>;

    /// Delete all players in a scope along with matches that reference them
    async fn delete_players(&self, scope: &Scope) -> TournamentResult<u64>;

    /// Append a match to the ledger.
    ///
    /// Returns `None` without writing unless both players belong to `scope`.
    async fn insert_match(
        &self,
        scope: &Scope,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> TournamentResult<Option<Match>>;

    /// Delete all matches in a scope
    async fn delete_matches(&self, scope: &Scope) -> TournamentResult<u64>;

    /// Delete all matches and players in a scope in one transaction.
    ///
    /// Returns `(players, matches)` removed.
    async fn clear_scope(&self, scope: &Scope) -> TournamentResult<(u64, u64)>;

    /// Read the players and matches of a scope in one transaction
    async fn scope_snapshot(&self, scope: &Scope) -> TournamentResult<ScopeSnapshot>;
}

/// Default PostgreSQL implementation of `TournamentRepository`
#[derive(Clone)]
pub struct PgTournamentRepository {
    pool: Arc<PgPool>,
}

impl PgTournamentRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn tournament_from_row(row: &PgRow) -> Tournament {
    Tournament {
        id: TournamentId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    }
}

fn player_from_row(row: &PgRow) -> Player {
    Player {
        id: row.get("id"),
        scope: Scope::from_column(row.get("tournament_id")),
        name: row.get("name"),
    }
}

fn match_from_row(row: &PgRow) -> Match {
    Match {
        id: row.get("id"),
        scope: Scope::from_column(row.get("tournament_id")),
        winner_id: row.get("winner_id"),
        loser_id: row.get("loser_id"),
    }
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn insert_tournament(
        &self,
        id: &TournamentId,
        name: &str,
    ) -> TournamentResult<Option<Tournament>> {
        let row = sqlx::query(
            r#"
            INSERT INTO tournaments (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, name, created_at
            "#,
        )
        .bind(id.as_str())
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(tournament_from_row))
    }

    async fn count_tournaments_with_prefix(&self, prefix: &str) -> TournamentResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM tournaments WHERE starts_with(id, $1)",
        )
        .bind(prefix)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.get("count"))
    }

    async fn max_tournament_suffix(&self, prefix: &str) -> TournamentResult<Option<i64>> {
        let row = sqlx::query(
            r#"
            SELECT MAX(CAST(substring(id FROM char_length($1) + 1) AS BIGINT)) AS max_suffix
            FROM tournaments
            WHERE starts_with(id, $1)
              AND substring(id FROM char_length($1) + 1) ~ '^[0-9]{1,18}$'
            "#,
        )
        .bind(prefix)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.get("max_suffix"))
    }

    async fn find_tournament(&self, id: &TournamentId) -> TournamentResult<Option<Tournament>> {
        let row = sqlx::query("SELECT id, name, created_at FROM tournaments WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.as_ref().map(tournament_from_row))
    }

    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM tournaments ORDER BY id")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.iter().map(tournament_from_row).collect())
    }

    async fn delete_tournament(&self, id: &TournamentId) -> TournamentResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM matches WHERE tournament_id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM players WHERE tournament_id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_tournaments(&self) -> TournamentResult<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM matches WHERE tournament_id IS NOT NULL")
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM players WHERE tournament_id IS NOT NULL")
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tournaments")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }

    async fn insert_player(&self, scope: &Scope, name: &str) -> TournamentResult<Option<Player>> {
        let row = sqlx::query(
            r#"
            INSERT INTO players (tournament_id, name)
            SELECT $1::TEXT, $2
            WHERE $1::TEXT IS NULL
               OR EXISTS (SELECT 1 FROM tournaments WHERE id = $1::TEXT)
            RETURNING id, tournament_id, name
            "#,
        )
        .bind(scope.column_value())
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(player_from_row))
    }

    async fn find_player(&self, id: PlayerId) -> TournamentResult<Option<Player>> {
        let row = sqlx::query("SELECT id, tournament_id, name FROM players WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.as_ref().map(player_from_row))
    }

    async fn count_players(&self, scope: &Scope) -> TournamentResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM players WHERE tournament_id IS NOT DISTINCT FROM $1",
        )
        .bind(scope.column_value())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.get("count"))
    }

    async fn delete_players(&self, scope: &Scope) -> TournamentResult<u64> {
        let result =
            sqlx::query("DELETE FROM players WHERE tournament_id IS NOT DISTINCT FROM $1")
                .bind(scope.column_value())
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected())
    }

    async fn insert_match(
        &self,
        scope: &Scope,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> TournamentResult<Option<Match>> {
        let row = sqlx::query(
            r#"
            INSERT INTO matches (tournament_id, winner_id, loser_id)
            SELECT $1::TEXT, $2::BIGINT, $3::BIGINT
            WHERE (
                SELECT COUNT(*)
                FROM players
                WHERE id IN ($2::BIGINT, $3::BIGINT)
                  AND tournament_id IS NOT DISTINCT FROM $1::TEXT
            ) = 2
            RETURNING id, tournament_id, winner_id, loser_id
            "#,
        )
        .bind(scope.column_value())
        .bind(winner_id)
        .bind(loser_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(match_from_row))
    }

    async fn delete_matches(&self, scope: &Scope) -> TournamentResult<u64> {
        let result =
            sqlx::query("DELETE FROM matches WHERE tournament_id IS NOT DISTINCT FROM $1")
                .bind(scope.column_value())
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected())
    }

    async fn clear_scope(&self, scope: &Scope) -> TournamentResult<(u64, u64)> {
        let mut tx = self.pool.begin().await?;

        let matches =
            sqlx::query("DELETE FROM matches WHERE tournament_id IS NOT DISTINCT FROM $1")
                .bind(scope.column_value())
                .execute(&mut *tx)
                .await?;

        let players =
            sqlx::query("DELETE FROM players WHERE tournament_id IS NOT DISTINCT FROM $1")
                .bind(scope.column_value())
                .execute(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok((players.rows_affected(), matches.rows_affected()))
    }

    async fn scope_snapshot(&self, scope: &Scope) -> TournamentResult<ScopeSnapshot> {
        let mut tx = self.pool.begin().await?;

        // Both reads must see the same ledger state
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let players = sqlx::query(
            r#"
            SELECT id, tournament_id, name
            FROM players
            WHERE tournament_id IS NOT DISTINCT FROM $1
            ORDER BY id
            "#,
        )
        .bind(scope.column_value())
        .fetch_all(&mut *tx)
        .await?;

        let matches = sqlx::query(
            r#"
            SELECT id, tournament_id, winner_id, loser_id
            FROM matches
            WHERE tournament_id IS NOT DISTINCT FROM $1
            ORDER BY id
            "#,
        )
        .bind(scope.column_value())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ScopeSnapshot {
            players: players.iter().map(player_from_row).collect(),
            matches: matches.iter().map(match_from_row).collect(),
        })
    }
}

//! Tournament data models and scope handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback slug for names that contain no identifier-safe characters
pub const DEFAULT_SLUG: &str = "tournament";

/// Tournament identifier: a slug plus a numeric suffix, e.g. `my_cup_0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(String);

impl TournamentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the candidate id for a slug and suffix
    pub fn from_slug(slug: &str, suffix: i64) -> Self {
        Self(format!("{slug}_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TournamentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TournamentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TournamentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Isolation unit for players, matches and standings.
///
/// `Global` is the implicit tournament used when no tournament is named. It is
/// persisted as a NULL `tournament_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    Global,
    Tournament(TournamentId),
}

impl Scope {
    /// Tournament id backing this scope, `None` for the global scope
    pub fn tournament_id(&self) -> Option<&TournamentId> {
        match self {
            Scope::Global => None,
            Scope::Tournament(id) => Some(id),
        }
    }

    /// Value bound to the `tournament_id` column
    pub(crate) fn column_value(&self) -> Option<&str> {
        self.tournament_id().map(TournamentId::as_str)
    }

    pub(crate) fn from_column(value: Option<String>) -> Self {
        match value {
            Some(id) => Scope::Tournament(TournamentId(id)),
            None => Scope::Global,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("global"),
            Scope::Tournament(id) => write!(f, "tournament {id}"),
        }
    }
}

impl From<TournamentId> for Scope {
    fn from(id: TournamentId) -> Self {
        Scope::Tournament(id)
    }
}

impl From<&TournamentId> for Scope {
    fn from(id: &TournamentId) -> Self {
        Scope::Tournament(id.clone())
    }
}

impl From<Option<TournamentId>> for Scope {
    fn from(id: Option<TournamentId>) -> Self {
        id.map_or(Scope::Global, Scope::Tournament)
    }
}

/// Stored tournament row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    /// Unique slug id
    pub id: TournamentId,
    /// Display name (sanitized)
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Derive the identifier-safe slug for a tournament name.
///
/// Lowercases, collapses whitespace runs into `_` and drops anything that is
/// not an ASCII alphanumeric, `_` or `-`.
pub fn slugify(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .map(|c| c.to_ascii_lowercase())
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}

//! Player data models.

use serde::{Deserialize, Serialize};

use crate::tournament::Scope;

/// Player ID type, assigned by storage
pub type PlayerId = i64;

/// Registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Globally unique id
    pub id: PlayerId,
    /// Scope the player is registered in
    pub scope: Scope,
    /// Sanitized full name (need not be unique)
    pub name: String,
}

//! Append-only match ledger.
//!
//! Matches are never edited or deleted one by one; the only removal is the
//! bulk deletion of a whole scope.

pub mod manager;
pub mod models;

pub use manager::MatchLedger;
pub use models::{Match, MatchId};

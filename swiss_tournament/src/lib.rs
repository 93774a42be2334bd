//! # Swiss Tournament
//!
//! Swiss-system tournament management: registers players, records match
//! outcomes, derives standings and pairs players for the next round.
//!
//! ## Architecture
//!
//! Components, leaf-first:
//!
//! - [`tournament`]: tournament scopes and unique id generation
//! - [`player`]: player registration within a scope
//! - [`ledger`]: append-only match results
//! - [`standings`]: wins and matches played, derived from the ledger on read
//! - [`pairing`]: adjacent pairing of the ranked standings
//!
//! Storage goes through the [`db::TournamentRepository`] trait, implemented
//! for PostgreSQL and in memory. Free-text input passes through a
//! [`sanitize::Sanitizer`] before it is stored. [`SwissTournament`] bundles
//! all components behind one handle.
//!
//! Operations take a [`Scope`]: either a named tournament or the implicit
//! [`Scope::Global`] tournament for single-tenant use.
//!
//! ## Example
//!
//! ```
//! use swiss_tournament::{Scope, SwissTournament};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let swiss = SwissTournament::in_memory();
//! let cup = Scope::from(swiss.create_tournament("My Cup").await?);
//!
//! for name in ["Alice", "Bob", "Carol", "Dave"] {
//!     swiss.register_player(&cup, name).await?;
//! }
//!
//! let pairings = swiss.swiss_pairings(&cup).await?;
//! assert_eq!(pairings.len(), 2);
//! # Ok(())
//! # }
//! ```

/// Storage access: connection pool, configuration and repositories.
pub mod db;
pub mod errors;
pub mod ledger;
pub mod pairing;
pub mod player;
pub mod sanitize;
pub mod standings;
pub mod swiss;
pub mod tournament;

pub use db::{DatabaseConfig, SwissConfig};
pub use errors::{TournamentError, TournamentResult, ValidationError};
pub use ledger::{Match, MatchId};
pub use pairing::Pairing;
pub use player::{Player, PlayerId};
pub use standings::Standing;
pub use swiss::SwissTournament;
pub use tournament::{Scope, Tournament, TournamentId};

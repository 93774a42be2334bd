//! Tournament scopes.
//!
//! A tournament is the unit of isolation for players, matches and standings.
//! Ids are slugs of the tournament name with a numeric suffix (`my_cup_0`,
//! `my_cup_1`, ...). Deleting a tournament deletes everything recorded in it.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use swiss_tournament::db::{Database, PgTournamentRepository};
//! use swiss_tournament::sanitize::HtmlSanitizer;
//! use swiss_tournament::tournament::TournamentRegistry;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let repo = Arc::new(PgTournamentRepository::new(Arc::new(db.pool().clone())));
//!     let registry = TournamentRegistry::new(repo, Arc::new(HtmlSanitizer));
//!
//!     let id = registry.create_tournament("Spring Open").await?;
//!     println!("Created tournament: {}", id);
//!
//!     Ok(())
//! }
//! ```

pub mod models;
pub mod registry;

pub use models::{Scope, Tournament, TournamentId, slugify};
pub use registry::TournamentRegistry;

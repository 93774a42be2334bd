//! Player registration within a tournament scope.

pub mod models;
pub mod registry;

pub use models::{Player, PlayerId};
pub use registry::PlayerRegistry;

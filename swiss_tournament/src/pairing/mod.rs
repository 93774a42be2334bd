//! Swiss pairing for the next round.

pub mod engine;

pub use engine::{Pairing, PairingEngine, pair_standings};

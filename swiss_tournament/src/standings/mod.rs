//! Standings derived from the match ledger on every read.

pub mod aggregator;

pub use aggregator::{Standing, StandingsAggregator, aggregate};

//! Trailing-window concession rates and truncated Poisson goal distributions for round-based
//! league fixtures.
//!
//! A query names a round and either a single team or all teams. For a single team, the side it
//! plays on in that round is resolved, its most recent matches on that side before the round are
//! selected, and the mean goals conceded across them becomes the rate of a Poisson distribution
//! over 0–4 goals.

pub mod analysis;
pub mod config;
pub mod csv;
pub mod data;
pub mod display;
pub mod error;
pub mod factorial;
pub mod file;
pub mod history;
pub mod poisson;
pub mod print;
pub mod stats;
pub mod venue;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}

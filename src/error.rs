//! Reasons a query can fail. All are recoverable: the dataset is left untouched and the next
//! query proceeds normally.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::display::DisplayRangeInclusive;
use crate::venue::Venue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("invalid round '{input}': expected a number between {}", DisplayRangeInclusive::from(.valid))]
    InvalidRound {
        input: String,
        valid: RangeInclusive<u16>,
    },

    #[error("no matches found for round {round}")]
    RoundNotFound { round: u16 },

    #[error("{team} did not play in round {round}")]
    TeamNotFoundInRound { team: String, round: u16 },

    #[error("round {round} for {team} is a future fixture, but no venue was declared")]
    MissingVenueDeclaration { team: String, round: u16 },

    #[error("{team} has no {venue} matches before round {round}")]
    NoQualifyingMatches {
        team: String,
        venue: Venue,
        round: u16,
    },

    #[error("insufficient data: none of the {matches} {venue} matches for {team} before round {round} record the goals conceded")]
    InsufficientGoalData {
        team: String,
        venue: Venue,
        round: u16,
        matches: usize,
    },
}

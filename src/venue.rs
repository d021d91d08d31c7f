//! Which side of a fixture a team occupies, and how that side is determined for a given round.

use std::str::FromStr;

use strum_macros::{Display, EnumIter};
use thiserror::Error;
use tracing::debug;

use crate::data::Dataset;
use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum Venue {
    #[strum(serialize = "HOME")]
    Home,
    #[strum(serialize = "AWAY")]
    Away,
}
impl Venue {
    pub fn flip(&self) -> Venue {
        match self {
            Venue::Home => Venue::Away,
            Venue::Away => Venue::Home,
        }
    }
}

#[derive(Debug, Error)]
#[error("unsupported venue {0}")]
pub struct VenueParseError(String);

impl FromStr for Venue {
    type Err = VenueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" | "h" | "casa" => Ok(Venue::Home),
            "away" | "a" | "fora" => Ok(Venue::Away),
            _ => Err(VenueParseError(s.to_string())),
        }
    }
}

/// Determines the side `team` plays on in `round`.
///
/// A future fixture takes the declared venue as given, without consulting the dataset. Otherwise
/// the round's records are searched for `team` as the home side first, then as the away side.
pub fn resolve_venue(
    dataset: &Dataset,
    team: &str,
    round: u16,
    is_future: bool,
    declared_venue: Option<Venue>,
) -> Result<Venue, AnalysisError> {
    if is_future {
        return declared_venue.ok_or_else(|| AnalysisError::MissingVenueDeclaration {
            team: team.to_string(),
            round,
        });
    }

    if !dataset.has_round(round) {
        return Err(AnalysisError::RoundNotFound { round });
    }
    let venue = if dataset.round(round).any(|record| record.home_team == team) {
        Venue::Home
    } else if dataset.round(round).any(|record| record.away_team == team) {
        Venue::Away
    } else {
        return Err(AnalysisError::TeamNotFoundInRound {
            team: team.to_string(),
            round,
        });
    };
    debug!("{team} plays {venue} in round {round}");
    Ok(venue)
}

//! The query pipeline: venue resolution, history selection, goal statistics and the Poisson
//! distribution, run in that order over a borrowed [Dataset].

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::data::{Dataset, MatchRecord};
use crate::display::DisplayGoalProbs;
use crate::error::AnalysisError;
use crate::factorial::Calculator;
use crate::history::{select_history, select_round};
use crate::poisson::GoalProbs;
use crate::venue::{resolve_venue, Venue};
use crate::{poisson, stats};


/// Either every match of a round, or a single team's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamSelector {
    All,
    Team(String),
}

impl FromStr for TeamSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s == "Todos" {
            Ok(TeamSelector::All)
        } else {
            Ok(TeamSelector::Team(s.to_string()))
        }
    }
}

impl Display for TeamSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamSelector::All => write!(f, "ALL"),
            TeamSelector::Team(team) => write!(f, "{team}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisQuery {
    pub round: u16,
    pub team: TeamSelector,
    pub is_future: bool,
    /// Only consulted for a future fixture.
    pub declared_venue: Option<Venue>,
}
impl AnalysisQuery {
    /// Every match of `round`.
    pub fn all(round: u16) -> Self {
        Self {
            round,
            team: TeamSelector::All,
            is_future: false,
            declared_venue: None,
        }
    }

    /// A team's form ahead of a round that is already in the dataset.
    pub fn played(round: u16, team: impl Into<String>) -> Self {
        Self {
            round,
            team: TeamSelector::Team(team.into()),
            is_future: false,
            declared_venue: None,
        }
    }

    /// A team's form ahead of a fixture that may not be in the dataset yet.
    pub fn future(round: u16, team: impl Into<String>, declared_venue: Option<Venue>) -> Self {
        Self {
            round,
            team: TeamSelector::Team(team.into()),
            is_future: true,
            declared_venue,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult<'a> {
    /// The analysed window in ascending round order, or every match of the round for
    /// [TeamSelector::All].
    pub selected_matches: Vec<&'a MatchRecord>,
    pub venue: Option<Venue>,
    pub mean_opponent_goals: Option<f64>,
    pub goal_probabilities: Option<GoalProbs>,
    /// Goals scored by the analysed team across the window, see
    /// [stats::goals_scored_frequencies]. Empty for [TeamSelector::All].
    pub scored_frequencies: Vec<usize>,
    /// Set to [AnalysisError::InsufficientGoalData] when no match in the window records the goals
    /// conceded; the mean and probabilities are then absent but the window is kept.
    pub shortfall: Option<AnalysisError>,
}

/// Runs a query against `dataset`. The dataset is only read; a failed query has no effect on
/// subsequent ones.
pub fn analyse<'a>(
    dataset: &'a Dataset,
    query: &AnalysisQuery,
    config: &AnalysisConfig,
) -> Result<AnalysisResult<'a>, AnalysisError> {
    let round = query.round;
    if !config.rounds.contains(&round) {
        return Err(AnalysisError::InvalidRound {
            input: round.to_string(),
            valid: config.rounds.clone(),
        });
    }

    let team = match &query.team {
        TeamSelector::All => {
            let selected_matches = select_round(dataset, round);
            if selected_matches.is_empty() {
                return Err(AnalysisError::RoundNotFound { round });
            }
            debug!("selected {} matches in round {round}", selected_matches.len());
            return Ok(AnalysisResult {
                selected_matches,
                venue: None,
                mean_opponent_goals: None,
                goal_probabilities: None,
                scored_frequencies: vec![],
                shortfall: None,
            });
        }
        TeamSelector::Team(team) => team.as_str(),
    };

    if !query.is_future && query.declared_venue.is_some() {
        debug!("ignoring declared venue for round {round}, which is not a future fixture");
    }
    let venue = resolve_venue(dataset, team, round, query.is_future, query.declared_venue)?;

    let selected_matches = select_history(dataset, team, venue, round, config.window_size);
    if selected_matches.is_empty() {
        return Err(AnalysisError::NoQualifyingMatches {
            team: team.to_string(),
            venue,
            round,
        });
    }
    debug!(
        "selected {} {venue} matches for {team} before round {round}",
        selected_matches.len()
    );

    let scored_frequencies = stats::goals_scored_frequencies(&selected_matches, venue);
    let Some(mean_opponent_goals) = stats::mean_opponent_goals(&selected_matches, venue) else {
        debug!("none of the selected matches for {team} record the goals conceded");
        let shortfall = AnalysisError::InsufficientGoalData {
            team: team.to_string(),
            venue,
            round,
            matches: selected_matches.len(),
        };
        return Ok(AnalysisResult {
            selected_matches,
            venue: Some(venue),
            mean_opponent_goals: None,
            goal_probabilities: None,
            scored_frequencies,
            shortfall: Some(shortfall),
        });
    };
    let goal_probabilities = poisson::distribution(mean_opponent_goals, &Calculator);
    debug!(
        "{team} concedes {mean_opponent_goals:.3} on average; goal probabilities: {}",
        DisplayGoalProbs::from(&goal_probabilities[..])
    );

    Ok(AnalysisResult {
        selected_matches,
        venue: Some(venue),
        mean_opponent_goals: Some(mean_opponent_goals),
        goal_probabilities: Some(goal_probabilities),
        scored_frequencies,
        shortfall: None,
    })
}

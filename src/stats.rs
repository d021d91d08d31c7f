//! Goal statistics over a selected window of matches, from the perspective of the team playing
//! at a given venue.

use crate::data::MatchRecord;
use crate::venue::Venue;

/// Mean goals conceded by the side at `venue` across `matches`, skipping matches without the
/// relevant goal count. `None` if no match records it.
pub fn mean_opponent_goals(matches: &[&MatchRecord], venue: Venue) -> Option<f64> {
    let (sum, count) = matches
        .iter()
        .filter_map(|record| record.goals_conceded(venue))
        .fold((0u32, 0u32), |(sum, count), goals| (sum + goals as u32, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

/// How often the side at `venue` scored each number of goals, indexed by the goal count up to
/// the highest observed. Empty if no match records it.
pub fn goals_scored_frequencies(matches: &[&MatchRecord], venue: Venue) -> Vec<usize> {
    let mut frequencies = vec![];
    for goals in matches.iter().filter_map(|record| record.goals_scored(venue)) {
        let goals = goals as usize;
        if frequencies.len() <= goals {
            frequencies.resize(goals + 1, 0);
        }
        frequencies[goals] += 1;
    }
    frequencies
}

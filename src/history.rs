//! Selection of the matches that a query's statistics are drawn from.

use crate::data::{Dataset, MatchRecord};
use crate::venue::Venue;

/// Trailing form window used when none is configured.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// The most recent `window_size` matches that `team` played at `venue` strictly before `round`,
/// in ascending round order. Fewer are returned if fewer exist.
pub fn select_history<'a>(
    dataset: &'a Dataset,
    team: &str,
    venue: Venue,
    round: u16,
    window_size: usize,
) -> Vec<&'a MatchRecord> {
    let mut prior = dataset
        .records()
        .iter()
        .filter(|record| record.round < round && record.team(venue) == team)
        .collect::<Vec<_>>();
    prior.sort_by_key(|record| record.round);
    let skip = prior.len().saturating_sub(window_size);
    prior.split_off(skip)
}

/// Every match played in `round`, in load order.
pub fn select_round(dataset: &Dataset, round: u16) -> Vec<&MatchRecord> {
    dataset.round(round).collect()
}

//! Testing helpers.

use assert_float_eq::*;

use crate::data::MatchRecord;

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Every probability lies in `[0, 1]` and the lot sums to at most 1 (within rounding).
pub fn assert_probs_well_formed(probs: &[f64]) {
    for (index, &prob) in probs.iter().enumerate() {
        assert!((0.0..=1.0).contains(&prob), "probs[{index}] = {prob} out of range");
    }
    let sum = probs.iter().sum::<f64>();
    assert!(sum <= 1.0 + 1e-12, "sum {sum} exceeds 1");
}

pub fn fixture(round: u16, home_team: &str, away_team: &str, goals: Option<(u8, u8)>) -> MatchRecord {
    MatchRecord {
        round,
        home_team: home_team.into(),
        away_team: away_team.into(),
        home_goals: goals.map(|(home, _)| home),
        away_goals: goals.map(|(_, away)| away),
    }
}

pub fn rounds(matches: &[&MatchRecord]) -> Vec<u16> {
    matches.iter().map(|record| record.round).collect()
}

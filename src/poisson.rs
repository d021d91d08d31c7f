//! Truncated Poisson distribution over goal counts.
//!
//! Only the goal counts `0..=MAX_GOALS` are reported; the mass for larger counts is left out, so
//! the probabilities generally sum to less than 1.

use crate::factorial::Factorial;

/// Largest goal count that a distribution reports on.
pub const MAX_GOALS: u8 = 4;

/// Number of goal counts reported, `0..=MAX_GOALS`.
pub const GOAL_COUNTS: usize = MAX_GOALS as usize + 1;

/// Probabilities of `0..=MAX_GOALS` goals, indexed by the goal count.
pub type GoalProbs = [f64; GOAL_COUNTS];

/// The Poisson probability mass function, `λ^k e^-λ / k!`. Evaluates to 1 for `k = 0`, `λ = 0`.
#[inline]
pub fn univariate(k: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    lambda.powi(k as i32) * f64::exp(-lambda) / factorial.get(k) as f64
}

/// Derives the truncated distribution of goals for a mean scoring rate `lambda ≥ 0`.
pub fn distribution(lambda: f64, factorial: &impl Factorial) -> GoalProbs {
    debug_assert!(lambda >= 0.0, "negative rate {lambda}");
    let mut probs = [0.0; GOAL_COUNTS];
    for (k, prob) in probs.iter_mut().enumerate() {
        *prob = univariate(k as u8, lambda, factorial);
    }
    probs
}

/// The probability mass of `MAX_GOALS + 1` or more goals, which the truncated distribution
/// does not report.
pub fn unreported(probs: &GoalProbs) -> f64 {
    f64::max(0.0, 1.0 - probs.iter().sum::<f64>())
}

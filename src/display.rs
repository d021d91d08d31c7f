use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

pub struct DisplayRangeInclusive<'a, D: Display> {
    range: &'a RangeInclusive<D>,
}

impl<'a, D: Display> From<&'a RangeInclusive<D>> for DisplayRangeInclusive<'a, D> {
    fn from(range: &'a RangeInclusive<D>) -> Self {
        DisplayRangeInclusive { range }
    }
}

impl<'a, D: Display> Display for DisplayRangeInclusive<'a, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.range.start(), self.range.end())
    }
}

/// A probability rendered as a percentage with one decimal place.
pub struct DisplayPercent(pub f64);

impl Display for DisplayPercent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

/// Goal probabilities as `k: p%` pairs, in goal order.
pub struct DisplayGoalProbs<'a> {
    probs: &'a [f64],
}

impl<'a> From<&'a [f64]> for DisplayGoalProbs<'a> {
    fn from(probs: &'a [f64]) -> Self {
        DisplayGoalProbs { probs }
    }
}

impl<'a> Display for DisplayGoalProbs<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (goals, &prob) in self.probs.iter().enumerate() {
            if goals != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{goals}: {}", DisplayPercent(prob))?;
        }
        write!(f, "]")
    }
}

//! Domain constants that a query is validated and evaluated against.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AnalysisError;
use crate::file::FromJsonFile;
use crate::history::DEFAULT_WINDOW_SIZE;

/// Rounds open to analysis in a 38-round season: the first ten lack enough prior form.
pub const DEFAULT_ROUNDS: RangeInclusive<u16> = 11..=38;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub rounds: RangeInclusive<u16>,
    pub window_size: usize,
}
impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.rounds.is_empty() {
            return Err(InvalidConfig::EmptyRounds(self.rounds.clone()));
        }
        if self.window_size == 0 {
            return Err(InvalidConfig::ZeroWindow);
        }
        Ok(())
    }

    /// Reads a JSON-encoded config, with absent fields taking their defaults.
    pub fn read_json(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config = Self::from_json_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a caller-supplied round, which must be a number in the configured range.
    pub fn parse_round(&self, input: &str) -> Result<u16, AnalysisError> {
        input
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|round| self.rounds.contains(round))
            .ok_or_else(|| AnalysisError::InvalidRound {
                input: input.to_string(),
                valid: self.rounds.clone(),
            })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

#[derive(Debug, Error)]
pub enum InvalidConfig {
    #[error("empty round range {0:?}")]
    EmptyRounds(RangeInclusive<u16>),

    #[error("window size must be positive")]
    ZeroWindow,
}

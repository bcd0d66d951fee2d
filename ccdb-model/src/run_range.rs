//! Run ranges
//!
//! Constants are valid for an inclusive range of run numbers. The range
//! grammar is `min-max`, `min-` (open top) or `-max` (open bottom); open
//! bounds default to 0 and [`INFINITE_RUN`].

use crate::identity::{RunNumber, INFINITE_RUN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive range of run numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunRange {
    pub min: RunNumber,
    pub max: RunNumber,
}

impl RunRange {
    pub fn new(min: RunNumber, max: RunNumber) -> Self {
        Self { min, max }
    }

    /// The range covering every run.
    pub fn all() -> Self {
        Self {
            min: 0,
            max: INFINITE_RUN,
        }
    }

    pub fn contains(&self, run: RunNumber) -> bool {
        self.min <= run && run <= self.max
    }
}

impl Default for RunRange {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for RunRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for RunRange {
    type Err = RunRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min_token, max_token) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| RunRangeParseError(s.to_string()))?;

        let min = if min_token.is_empty() {
            0
        } else {
            min_token
                .parse()
                .map_err(|_| RunRangeParseError(s.to_string()))?
        };
        let max = if max_token.is_empty() {
            INFINITE_RUN
        } else {
            max_token
                .parse()
                .map_err(|_| RunRangeParseError(s.to_string()))?
        };

        Ok(Self { min, max })
    }
}

/// Error when parsing an invalid run range string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRangeParseError(pub String);

impl fmt::Display for RunRangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid run range: {}", self.0)
    }
}

impl std::error::Error for RunRangeParseError {}

// ============================================================================
// TESTS
// ============================================================================

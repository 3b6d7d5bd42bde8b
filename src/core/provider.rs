use serde::{Deserialize, Serialize};

use crate::core::types::{CandidateId, ProviderId};

/// Seats a lecturer offers when the input does not say otherwise
pub const DEFAULT_CAPACITY: i64 = 5;

fn default_capacity() -> i64 {
    DEFAULT_CAPACITY
}

fn default_accepting() -> bool {
    true
}

fn is_true(b: &bool) -> bool {
    *b
}

/// A lecturer with a limited number of supervision seats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,

    /// Maximum number of candidates this provider accepts.
    /// Signed so that bad input survives deserialization and is reported by validation.
    #[serde(default = "default_capacity")]
    pub capacity: i64,

    /// Ranked candidates, most preferred first
    #[serde(default)]
    pub preferences: Vec<CandidateId>,

    /// Whether this provider takes on new candidates at all
    #[serde(default = "default_accepting", skip_serializing_if = "is_true")]
    pub accepting: bool,
}

impl Provider {
    pub fn new(id: impl Into<String>, capacity: i64) -> Self {
        Self {
            id: ProviderId::new(id),
            capacity,
            preferences: Vec::new(),
            accepting: true,
        }
    }

    #[must_use]
    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = preferences
            .into_iter()
            .map(|c| CandidateId::new(c))
            .collect();
        self
    }

    #[must_use]
    pub fn closed(mut self) -> Self {
        self.accepting = false;
        self
    }

    /// Capacity as a seat count. Zero for non-positive values.
    #[must_use]
    pub fn seats(&self) -> usize {
        if self.capacity <= 0 {
            0
        } else {
            usize::try_from(self.capacity).unwrap_or(usize::MAX)
        }
    }
}

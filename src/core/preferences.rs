use serde::{Deserialize, Serialize};

use crate::core::candidate::Candidate;
use crate::core::provider::Provider;

/// The complete input to one matching run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSet {
    /// Source file path (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default)]
    pub providers: Vec<Provider>,
}

impl PreferenceSet {
    #[must_use]
    pub fn new(candidates: Vec<Candidate>, providers: Vec<Provider>) -> Self {
        Self {
            source: None,
            candidates,
            providers,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Upper bound on proposals in one run: the sum of candidate list lengths
    #[must_use]
    pub fn proposal_budget(&self) -> usize {
        self.candidates.iter().map(|c| c.preferences.len()).sum()
    }

    /// Total seats across providers that accept candidates
    #[must_use]
    pub fn total_seats(&self) -> usize {
        self.providers
            .iter()
            .filter(|p| p.accepting)
            .map(Provider::seats)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_and_seats() {
        let set = PreferenceSet::new(
            vec![
                Candidate::new("S1").with_preferences(["P1", "P2"]),
                Candidate::new("S2").with_preferences(["P1"]),
                Candidate::new("S3"),
            ],
            vec![Provider::new("P1", 2), Provider::new("P2", 3).closed()],
        );
        assert_eq!(set.proposal_budget(), 3);
        assert_eq!(set.total_seats(), 2);
    }
}

use serde::{Deserialize, Serialize};

use crate::core::types::{CandidateId, ProviderId};

/// A student proposing for a supervisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,

    /// Acceptable providers, most preferred first
    #[serde(default)]
    pub preferences: Vec<ProviderId>,
}

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: CandidateId::new(id),
            preferences: Vec::new(),
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
            .map(|p| ProviderId::new(p))
            .collect();
        self
    }

    /// Position of `provider` in this candidate's list, if listed
    #[must_use]
    pub fn position_of(&self, provider: &ProviderId) -> Option<usize> {
        self.preferences.iter().position(|p| p == provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let c = Candidate::new("S1").with_preferences(["P2", "P1"]);
        assert_eq!(c.id.as_str(), "S1");
        assert_eq!(c.position_of(&ProviderId::new("P1")), Some(1));
        assert_eq!(c.position_of(&ProviderId::new("P3")), None);
    }

    #[test]
    fn test_missing_preferences_deserialize_empty() {
        let c: Candidate = serde_json::from_str(r#"{"id":"S9"}"#).unwrap();
        assert!(c.preferences.is_empty());
    }
}

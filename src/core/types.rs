use serde::{Deserialize, Serialize};

/// Unique identifier for a candidate (student)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for a provider (lecturer)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(pub String);

impl ProviderId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// How a provider treats a candidate missing from its preference list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrankedPolicy {
    /// Unranked candidates sit below every ranked one and tie among themselves.
    /// They may take a free seat but can never displace an incumbent.
    #[default]
    RankLast,
    /// Unranked candidates are never admitted, even with free capacity.
    Reject,
}

impl std::fmt::Display for UnrankedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RankLast => write!(f, "rank-last"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Position of a candidate in a provider's preference list.
///
/// Lower is better. `Unranked` compares greater than every `Ranked` value,
/// and two `Unranked` values compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Ranked(usize),
    Unranked,
}

impl Rank {
    #[must_use]
    pub fn is_ranked(self) -> bool {
        matches!(self, Self::Ranked(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unranked_sorts_after_ranked() {
        assert!(Rank::Ranked(0) < Rank::Ranked(1));
        assert!(Rank::Ranked(usize::MAX) < Rank::Unranked);
        assert_eq!(Rank::Unranked, Rank::Unranked);
        assert!(!Rank::Unranked.is_ranked());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = CandidateId::new("S1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"S1\"");
        let back: ProviderId = serde_json::from_str("\"P7\"").unwrap();
        assert_eq!(back.as_str(), "P7");
    }

    #[test]
    fn test_policy_default_is_rank_last() {
        assert_eq!(UnrankedPolicy::default(), UnrankedPolicy::RankLast);
        assert_eq!(UnrankedPolicy::Reject.to_string(), "reject");
    }
}

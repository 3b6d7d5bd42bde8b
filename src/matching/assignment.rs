use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::preferences::PreferenceSet;
use crate::core::types::{CandidateId, ProviderId, UnrankedPolicy};

/// Outcome of a matching run, in both directions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Candidate -> matched provider, `None` when unmatched
    pub candidates: BTreeMap<CandidateId, Option<ProviderId>>,

    /// Provider -> occupants, best ranked first
    pub providers: BTreeMap<ProviderId, Vec<CandidateId>>,

    /// Provider -> number of occupied seats
    pub occupancy: BTreeMap<ProviderId, usize>,
}

impl Assignment {
    /// Build an assignment from the candidate direction only.
    ///
    /// Every provider of `set` gets an entry, even when empty. Occupants are
    /// listed in the order candidates appear in `set`. Candidates missing
    /// from `set` are kept so that a checker can report them.
    #[must_use]
    pub fn from_candidate_map(
        set: &PreferenceSet,
        matches: BTreeMap<CandidateId, Option<ProviderId>>,
    ) -> Self {
        let mut providers: BTreeMap<ProviderId, Vec<CandidateId>> = set
            .providers
            .iter()
            .map(|p| (p.id.clone(), Vec::new()))
            .collect();

        let order: BTreeMap<&CandidateId, usize> = set
            .candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (&c.id, i))
            .collect();
        let mut matched: Vec<(&CandidateId, &ProviderId)> = matches
            .iter()
            .filter_map(|(c, p)| p.as_ref().map(|p| (c, p)))
            .collect();
        matched.sort_by_key(|(c, _)| order.get(c).copied().unwrap_or(usize::MAX));

        for (candidate, provider) in matched {
            providers
                .entry(provider.clone())
                .or_default()
                .push(candidate.clone());
        }

        let mut candidates = matches;
        for c in &set.candidates {
            candidates.entry(c.id.clone()).or_insert(None);
        }

        let occupancy = providers
            .iter()
            .map(|(p, occupants)| (p.clone(), occupants.len()))
            .collect();

        Self {
            candidates,
            providers,
            occupancy,
        }
    }

    /// Provider a candidate ended up with
    #[must_use]
    pub fn provider_of(&self, candidate: &CandidateId) -> Option<&ProviderId> {
        self.candidates.get(candidate).and_then(Option::as_ref)
    }

    /// Candidates seated with a provider
    #[must_use]
    pub fn occupants(&self, provider: &ProviderId) -> &[CandidateId] {
        self.providers
            .get(provider)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.candidates.values().filter(|p| p.is_some()).count()
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &CandidateId> {
        self.candidates
            .iter()
            .filter(|(_, p)| p.is_none())
            .map(|(c, _)| c)
    }
}

/// Counters collected during one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Proposals made; never more than the sum of candidate list lengths
    pub proposals: usize,
    /// Proposals that won a seat, including by displacement
    pub acceptances: usize,
    /// Incumbents evicted by a better-ranked proposer
    pub displacements: usize,
    /// Proposals turned down
    pub rejections: usize,
    /// Candidates that ran out of preferences while free
    pub exhausted: usize,
}

/// Everything a caller gets back from [`MatchingEngine::run`]
///
/// [`MatchingEngine::run`]: crate::matching::engine::MatchingEngine::run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub assignment: Assignment,
    pub stats: RunStats,
    pub unranked_policy: UnrankedPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::candidate::Candidate;
    use crate::core::provider::Provider;

    #[test]
    fn test_from_candidate_map_fills_both_directions() {
        let set = PreferenceSet::new(
            vec![
                Candidate::new("S1"),
                Candidate::new("S2"),
                Candidate::new("S3"),
            ],
            vec![Provider::new("P1", 2), Provider::new("P2", 1)],
        );
        let mut map = BTreeMap::new();
        map.insert(CandidateId::new("S3"), Some(ProviderId::new("P1")));
        map.insert(CandidateId::new("S1"), Some(ProviderId::new("P1")));

        let a = Assignment::from_candidate_map(&set, map);
        assert_eq!(
            a.occupants(&ProviderId::new("P1")),
            &[CandidateId::new("S1"), CandidateId::new("S3")]
        );
        assert!(a.occupants(&ProviderId::new("P2")).is_empty());
        assert_eq!(a.occupancy[&ProviderId::new("P1")], 2);
        assert_eq!(a.occupancy[&ProviderId::new("P2")], 0);
        assert_eq!(a.matched_count(), 2);
        assert_eq!(
            a.unmatched().collect::<Vec<_>>(),
            vec![&CandidateId::new("S2")]
        );
        assert_eq!(
            a.provider_of(&CandidateId::new("S1")),
            Some(&ProviderId::new("P1"))
        );
    }
}

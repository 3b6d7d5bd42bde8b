use std::collections::HashMap;

use serde::Serialize;

use crate::core::preferences::PreferenceSet;
use crate::core::provider::Provider;
use crate::core::types::{CandidateId, ProviderId, Rank, UnrankedPolicy};
use crate::matching::assignment::Assignment;

/// A single problem found in an assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Id in the assignment that is not part of the preference set
    UnknownParticipant { id: String },
    /// Provider holds more candidates than its capacity
    OverCapacity {
        provider: ProviderId,
        occupants: usize,
        capacity: i64,
    },
    /// Candidate seated with more than one provider
    DoubleAssignment {
        candidate: CandidateId,
        providers: Vec<ProviderId>,
    },
    /// Candidate and provider directions of the assignment disagree
    Inconsistent {
        candidate: CandidateId,
        provider: ProviderId,
    },
    /// Pair that one side never agreed to: unlisted by the candidate, closed
    /// provider, or unranked under [`UnrankedPolicy::Reject`]
    Unacceptable {
        candidate: CandidateId,
        provider: ProviderId,
    },
    /// Pair that would both rather be matched to each other
    BlockingPair {
        candidate: CandidateId,
        provider: ProviderId,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownParticipant { id } => write!(f, "unknown participant '{id}'"),
            Self::OverCapacity {
                provider,
                occupants,
                capacity,
            } => write!(
                f,
                "provider '{provider}' holds {occupants} candidates but has capacity {capacity}"
            ),
            Self::DoubleAssignment {
                candidate,
                providers,
            } => {
                let names: Vec<&str> = providers.iter().map(ProviderId::as_str).collect();
                write!(
                    f,
                    "candidate '{candidate}' is assigned to several providers: {}",
                    names.join(", ")
                )
            }
            Self::Inconsistent {
                candidate,
                provider,
            } => write!(
                f,
                "candidate '{candidate}' and provider '{provider}' disagree about their match"
            ),
            Self::Unacceptable {
                candidate,
                provider,
            } => write!(
                f,
                "candidate '{candidate}' is matched to '{provider}' without mutual acceptance"
            ),
            Self::BlockingPair {
                candidate,
                provider,
            } => write!(
                f,
                "candidate '{candidate}' and provider '{provider}' prefer each other to their outcome"
            ),
        }
    }
}

/// Result of checking an assignment against a preference set
#[derive(Debug, Clone, Default, Serialize)]
pub struct StabilityReport {
    pub violations: Vec<Violation>,
}

impl StabilityReport {
    /// True when the assignment is feasible and has no blocking pair
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn blocking_pairs(&self) -> impl Iterator<Item = (&CandidateId, &ProviderId)> {
        self.violations.iter().filter_map(|v| match v {
            Violation::BlockingPair {
                candidate,
                provider,
            } => Some((candidate, provider)),
            _ => None,
        })
    }
}

/// A provider with its preference list indexed by candidate
struct RankedProvider<'a> {
    provider: &'a Provider,
    ranks: HashMap<&'a CandidateId, usize>,
}

impl<'a> RankedProvider<'a> {
    fn new(provider: &'a Provider) -> Self {
        let ranks = provider
            .preferences
            .iter()
            .enumerate()
            .map(|(rank, c)| (c, rank))
            .collect();
        Self { provider, ranks }
    }

    fn rank(&self, candidate: &CandidateId) -> Rank {
        self.ranks
            .get(candidate)
            .map_or(Rank::Unranked, |&r| Rank::Ranked(r))
    }

    fn would_admit(&self, candidate: &CandidateId, policy: UnrankedPolicy) -> bool {
        self.provider.accepting
            && (policy == UnrankedPolicy::RankLast || self.rank(candidate).is_ranked())
    }
}

/// Check that `assignment` is a feasible, stable matching of `set`.
///
/// Feasibility covers capacities, double assignment, agreement between the
/// two directions of the assignment and mutual acceptability. Stability then
/// looks for a candidate and a provider the candidate prefers to its outcome
/// where the provider would admit the candidate and either has a free seat or
/// holds someone it ranks strictly lower.
///
/// The check is independent of the engine and works from the raw lists.
#[must_use]
pub fn check_assignment(
    set: &PreferenceSet,
    assignment: &Assignment,
    policy: UnrankedPolicy,
) -> StabilityReport {
    let mut violations = Vec::new();

    let candidates: HashMap<&CandidateId, usize> = set
        .candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (&c.id, i))
        .collect();
    let providers: HashMap<&ProviderId, RankedProvider<'_>> = set
        .providers
        .iter()
        .map(|p| (&p.id, RankedProvider::new(p)))
        .collect();

    for id in assignment.candidates.keys() {
        if !candidates.contains_key(id) {
            violations.push(Violation::UnknownParticipant { id: id.to_string() });
        }
    }

    let mut seated_with: HashMap<&CandidateId, Vec<ProviderId>> = HashMap::new();
    for (provider_id, occupants) in &assignment.providers {
        let Some(provider) = providers.get(provider_id).map(|r| r.provider) else {
            violations.push(Violation::UnknownParticipant {
                id: provider_id.to_string(),
            });
            continue;
        };

        if occupants.len() > provider.seats() {
            violations.push(Violation::OverCapacity {
                provider: provider_id.clone(),
                occupants: occupants.len(),
                capacity: provider.capacity,
            });
        }

        for candidate in occupants {
            seated_with
                .entry(candidate)
                .or_default()
                .push(provider_id.clone());
        }
    }

    for candidate in &set.candidates {
        let listed = seated_with.get(&candidate.id).map_or(&[][..], Vec::as_slice);
        if listed.len() > 1 {
            violations.push(Violation::DoubleAssignment {
                candidate: candidate.id.clone(),
                providers: listed.to_vec(),
            });
        }

        let claimed = assignment.provider_of(&candidate.id);
        match (claimed, listed.first()) {
            (Some(p), _) if !listed.contains(p) => violations.push(Violation::Inconsistent {
                candidate: candidate.id.clone(),
                provider: p.clone(),
            }),
            (None, Some(p)) => violations.push(Violation::Inconsistent {
                candidate: candidate.id.clone(),
                provider: p.clone(),
            }),
            _ => {}
        }

        if let Some(p) = claimed {
            let acceptable = candidate.position_of(p).is_some()
                && providers
                    .get(p)
                    .is_some_and(|provider| provider.would_admit(&candidate.id, policy));
            if !acceptable {
                violations.push(Violation::Unacceptable {
                    candidate: candidate.id.clone(),
                    provider: p.clone(),
                });
            }
        }
    }

    // Rank of the least preferred occupant; empty providers have no entry
    let worst_occupant: HashMap<&ProviderId, Rank> = providers
        .iter()
        .filter_map(|(&id, provider)| {
            let worst = assignment
                .occupants(id)
                .iter()
                .map(|o| provider.rank(o))
                .max()?;
            Some((id, worst))
        })
        .collect();

    for candidate in &set.candidates {
        let current = assignment
            .provider_of(&candidate.id)
            .and_then(|p| candidate.position_of(p))
            .unwrap_or(candidate.preferences.len());

        for preferred in &candidate.preferences[..current] {
            let Some(provider) = providers.get(preferred) else {
                continue;
            };
            if !provider.would_admit(&candidate.id, policy) {
                continue;
            }

            let has_room = assignment.occupants(preferred).len() < provider.provider.seats();
            let beats_someone = worst_occupant
                .get(preferred)
                .is_some_and(|&worst| provider.rank(&candidate.id) < worst);

            if has_room || beats_someone {
                violations.push(Violation::BlockingPair {
                    candidate: candidate.id.clone(),
                    provider: preferred.clone(),
                });
            }
        }
    }

    StabilityReport { violations }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::candidate::Candidate;
    use crate::matching::engine::stable_match;

    fn two_by_two() -> PreferenceSet {
        PreferenceSet::new(
            vec![
                Candidate::new("S1").with_preferences(["P1", "P2"]),
                Candidate::new("S2").with_preferences(["P1", "P2"]),
            ],
            vec![
                Provider::new("P1", 1).with_preferences(["S1", "S2"]),
                Provider::new("P2", 1).with_preferences(["S1", "S2"]),
            ],
        )
    }

    fn assign(set: &PreferenceSet, pairs: &[(&str, Option<&str>)]) -> Assignment {
        let map: BTreeMap<CandidateId, Option<ProviderId>> = pairs
            .iter()
            .map(|(c, p)| (CandidateId::new(*c), p.map(ProviderId::new)))
            .collect();
        Assignment::from_candidate_map(set, map)
    }

    #[test]
    fn test_engine_output_is_stable() {
        let set = two_by_two();
        let outcome = stable_match(&set).unwrap();
        let report = check_assignment(&set, &outcome.assignment, UnrankedPolicy::RankLast);
        assert!(report.is_stable(), "{:?}", report.violations);
    }

    #[test]
    fn test_swapped_assignment_has_blocking_pair() {
        let set = two_by_two();
        let a = assign(&set, &[("S1", Some("P2")), ("S2", Some("P1"))]);
        let report = check_assignment(&set, &a, UnrankedPolicy::RankLast);
        let pairs: Vec<_> = report.blocking_pairs().collect();
        assert_eq!(pairs, vec![(&CandidateId::new("S1"), &ProviderId::new("P1"))]);
    }

    #[test]
    fn test_free_seat_blocks_unmatched_candidate() {
        let set = two_by_two();
        let a = assign(&set, &[("S1", Some("P1")), ("S2", None)]);
        let report = check_assignment(&set, &a, UnrankedPolicy::RankLast);
        assert_eq!(report.blocking_pairs().count(), 1);
    }

    #[test]
    fn test_over_capacity_and_double_assignment() {
        let set = two_by_two();
        let mut a = assign(&set, &[("S1", Some("P1")), ("S2", Some("P1"))]);
        a.providers
            .get_mut(&ProviderId::new("P2"))
            .unwrap()
            .push(CandidateId::new("S1"));

        let report = check_assignment(&set, &a, UnrankedPolicy::RankLast);
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::OverCapacity { occupants: 2, .. })));
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::DoubleAssignment { .. })));
    }

    #[test]
    fn test_unranked_match_is_unacceptable_under_reject() {
        let set = PreferenceSet::new(
            vec![Candidate::new("S1").with_preferences(["P1"])],
            vec![Provider::new("P1", 1)],
        );
        let a = assign(&set, &[("S1", Some("P1"))]);
        assert!(check_assignment(&set, &a, UnrankedPolicy::RankLast).is_stable());

        let report = check_assignment(&set, &a, UnrankedPolicy::Reject);
        assert_eq!(
            report.violations,
            vec![Violation::Unacceptable {
                candidate: CandidateId::new("S1"),
                provider: ProviderId::new("P1"),
            }]
        );
    }

    #[test]
    fn test_unknown_ids_are_reported() {
        let set = two_by_two();
        let a = assign(&set, &[("S9", Some("P7"))]);
        let report = check_assignment(&set, &a, UnrankedPolicy::RankLast);
        assert!(report
            .violations
            .contains(&Violation::UnknownParticipant { id: "S9".to_string() }));
        assert!(report
            .violations
            .contains(&Violation::UnknownParticipant { id: "P7".to_string() }));
    }

    #[test]
    fn test_ranked_candidate_blocks_against_unranked_occupant() {
        let set = PreferenceSet::new(
            vec![
                Candidate::new("S1").with_preferences(["P1"]),
                Candidate::new("S2").with_preferences(["P1"]),
                Candidate::new("S3").with_preferences(["P1"]),
            ],
            vec![Provider::new("P1", 2).with_preferences(["S1", "S2"])],
        );

        // S3 is unranked by P1, so S2 would displace it
        let a = assign(&set, &[("S1", Some("P1")), ("S3", Some("P1")), ("S2", None)]);
        let report = check_assignment(&set, &a, UnrankedPolicy::RankLast);
        let pairs: Vec<_> = report.blocking_pairs().collect();
        assert_eq!(pairs, vec![(&CandidateId::new("S2"), &ProviderId::new("P1"))]);

        let a = assign(&set, &[("S1", Some("P1")), ("S2", Some("P1")), ("S3", None)]);
        assert!(check_assignment(&set, &a, UnrankedPolicy::RankLast).is_stable());
    }

    #[test]
    fn test_large_cohort_engine_output_is_stable() {
        let n = 2_000;
        let ids: Vec<String> = (0..n).map(|i| format!("S{i}")).collect();
        let providers: Vec<Provider> = (0..20)
            .map(|p| {
                let mut prefs = ids.clone();
                prefs.rotate_left(p * 97);
                Provider::new(format!("P{p}"), 50).with_preferences(prefs)
            })
            .collect();
        let candidates = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let prefs: Vec<String> = (0..20).map(|k| format!("P{}", (i + k) % 20)).collect();
                Candidate::new(id.clone()).with_preferences(prefs)
            })
            .collect();
        let set = PreferenceSet::new(candidates, providers);

        let outcome = stable_match(&set).unwrap();
        assert_eq!(outcome.assignment.matched_count(), 1_000);
        let report = check_assignment(&set, &outcome.assignment, UnrankedPolicy::RankLast);
        assert!(report.is_stable(), "{:?}", report.violations);
    }

    #[test]
    fn test_violation_messages_name_ids() {
        let v = Violation::BlockingPair {
            candidate: CandidateId::new("S1"),
            provider: ProviderId::new("P1"),
        };
        let text = v.to_string();
        assert!(text.contains("S1") && text.contains("P1"));
    }
}

use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::{debug, info};

use crate::core::preferences::PreferenceSet;
use crate::core::types::{Rank, UnrankedPolicy};
use crate::matching::assignment::{Assignment, MatchOutcome, RunStats};
use crate::utils::validation::{validate_preferences, ValidationError};

/// Configuration for the matching engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchingConfig {
    /// How providers treat candidates they did not rank
    pub unranked_policy: UnrankedPolicy,
}

impl MatchingConfig {
    #[must_use]
    pub fn with_policy(unranked_policy: UnrankedPolicy) -> Self {
        Self { unranked_policy }
    }
}

/// Working state for one provider during a run
struct Seats {
    capacity: usize,
    accepting: bool,
    /// Candidate index -> position in this provider's list
    rank_of: HashMap<usize, usize>,
    /// Seated candidate indices, in seat order
    occupants: Vec<usize>,
}

impl Seats {
    fn rank(&self, candidate: usize) -> Rank {
        self.rank_of
            .get(&candidate)
            .map_or(Rank::Unranked, |&r| Rank::Ranked(r))
    }

    /// Seat index and rank of the least preferred occupant.
    /// Ties (only possible between unranked occupants) go to the earliest seat.
    fn worst(&self) -> Option<(usize, Rank)> {
        let mut worst: Option<(usize, Rank)> = None;
        for (seat, &occupant) in self.occupants.iter().enumerate() {
            let rank = self.rank(occupant);
            match worst {
                Some((_, current)) if rank <= current => {}
                _ => worst = Some((seat, rank)),
            }
        }
        worst
    }
}

/// Candidate-proposing deferred acceptance with capacities and displacement
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    /// Create a new matching engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new matching engine with custom configuration
    #[must_use]
    pub fn with_config(config: MatchingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Compute a stable assignment for `set`.
    ///
    /// The input is validated first; nothing is matched if it is invalid.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending id when a list refers
    /// to an unknown id or repeats an entry, when an id is duplicated, or when a
    /// provider capacity is not positive.
    pub fn run(&self, set: &PreferenceSet) -> Result<MatchOutcome, ValidationError> {
        let index = validate_preferences(set)?;
        let policy = self.config.unranked_policy;

        let candidate_prefs: Vec<Vec<usize>> = set
            .candidates
            .iter()
            .map(|c| {
                c.preferences
                    .iter()
                    .map(|p| resolve(&index.providers, p, c.id.as_str(), p.as_str()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?;

        let mut seats: Vec<Seats> = set
            .providers
            .iter()
            .map(|p| -> Result<Seats, ValidationError> {
                let rank_of = p
                    .preferences
                    .iter()
                    .enumerate()
                    .map(|(rank, c)| {
                        resolve(&index.candidates, c, p.id.as_str(), c.as_str())
                            .map(|idx| (idx, rank))
                    })
                    .collect::<Result<HashMap<_, _>, _>>()?;
                Ok(Seats {
                    capacity: p.seats(),
                    accepting: p.accepting,
                    rank_of,
                    occupants: Vec::with_capacity(p.seats().min(set.candidates.len())),
                })
            })
            .collect::<Result<_, _>>()?;

        let mut next = vec![0usize; set.candidates.len()];
        let mut matched: Vec<Option<usize>> = vec![None; set.candidates.len()];
        let mut free: VecDeque<usize> = (0..set.candidates.len()).collect();
        let mut stats = RunStats::default();

        while let Some(&c) = free.front() {
            let prefs = &candidate_prefs[c];
            if next[c] == prefs.len() {
                free.pop_front();
                stats.exhausted += 1;
                debug!(candidate = %set.candidates[c].id, "preferences exhausted, left unmatched");
                continue;
            }

            let p = prefs[next[c]];
            next[c] += 1;
            stats.proposals += 1;

            let provider = &mut seats[p];
            let rank = provider.rank(c);

            if !provider.accepting || (policy == UnrankedPolicy::Reject && !rank.is_ranked()) {
                stats.rejections += 1;
                continue;
            }

            if provider.occupants.len() < provider.capacity {
                provider.occupants.push(c);
                matched[c] = Some(p);
                free.pop_front();
                stats.acceptances += 1;
                continue;
            }

            match provider.worst() {
                Some((seat, worst_rank)) if rank < worst_rank => {
                    let evicted = std::mem::replace(&mut provider.occupants[seat], c);
                    matched[evicted] = None;
                    matched[c] = Some(p);
                    free.pop_front();
                    free.push_back(evicted);
                    stats.acceptances += 1;
                    stats.displacements += 1;
                    debug!(
                        candidate = %set.candidates[c].id,
                        provider = %set.providers[p].id,
                        evicted = %set.candidates[evicted].id,
                        "displaced incumbent"
                    );
                }
                _ => stats.rejections += 1,
            }
        }

        let assignment = build_assignment(set, &seats, &matched);

        info!(
            candidates = set.candidates.len(),
            providers = set.providers.len(),
            matched = assignment.matched_count(),
            proposals = stats.proposals,
            displacements = stats.displacements,
            policy = %policy,
            "matching complete"
        );

        Ok(MatchOutcome {
            assignment,
            stats,
            unranked_policy: policy,
        })
    }
}

/// Run the engine with the default configuration
///
/// # Errors
///
/// See [`MatchingEngine::run`].
pub fn stable_match(set: &PreferenceSet) -> Result<MatchOutcome, ValidationError> {
    MatchingEngine::new().run(set)
}

fn resolve<K>(
    table: &HashMap<&K, usize>,
    key: &K,
    owner: &str,
    name: &str,
) -> Result<usize, ValidationError>
where
    K: Eq + std::hash::Hash,
{
    table
        .get(key)
        .copied()
        .ok_or_else(|| ValidationError::UnknownReference {
            owner: owner.to_string(),
            missing: name.to_string(),
        })
}

fn build_assignment(set: &PreferenceSet, seats: &[Seats], matched: &[Option<usize>]) -> Assignment {
    let candidates = set
        .candidates
        .iter()
        .zip(matched)
        .map(|(c, p)| (c.id.clone(), p.map(|p| set.providers[p].id.clone())))
        .collect();

    let mut providers = BTreeMap::new();
    let mut occupancy = BTreeMap::new();
    for (provider, slot) in set.providers.iter().zip(seats) {
        let mut occupants = slot.occupants.clone();
        occupants.sort_by_key(|&c| slot.rank(c));
        occupancy.insert(provider.id.clone(), occupants.len());
        providers.insert(
            provider.id.clone(),
            occupants
                .into_iter()
                .map(|c| set.candidates[c].id.clone())
                .collect(),
        );
    }

    Assignment {
        candidates,
        providers,
        occupancy,
    }
}

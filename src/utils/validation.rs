//! Input checks performed before a matching run starts.

use std::collections::{HashMap, HashSet};

use crate::core::preferences::PreferenceSet;
use crate::core::types::{CandidateId, ProviderId};

/// Maximum number of candidates or providers accepted from a single file (DOS protection)
pub const MAX_PARTICIPANTS: usize = 100_000;

/// Reasons a preference set cannot be matched.
///
/// Every variant names the offending id. The run is aborted before any
/// proposal is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Preference list of '{owner}' names unknown id '{missing}'")]
    UnknownReference { owner: String, missing: String },

    #[error("Provider '{provider}' has invalid capacity {capacity} (must be at least 1)")]
    InvalidCapacity { provider: String, capacity: i64 },

    #[error("Identifier '{0}' appears more than once")]
    DuplicateIdentifier(String),

    #[error("Preference list of '{owner}' names '{repeated}' more than once")]
    DuplicatePreference { owner: String, repeated: String },
}

impl ValidationError {
    /// The id the diagnostic is about
    #[must_use]
    pub fn offending_id(&self) -> &str {
        match self {
            Self::UnknownReference { missing, .. } => missing,
            Self::InvalidCapacity { provider, .. } => provider,
            Self::DuplicateIdentifier(id) => id,
            Self::DuplicatePreference { repeated, .. } => repeated,
        }
    }
}

/// Lookup tables from id to input position, built once per run
#[derive(Debug)]
pub struct ParticipantIndex<'a> {
    pub candidates: HashMap<&'a CandidateId, usize>,
    pub providers: HashMap<&'a ProviderId, usize>,
}

/// Validate a preference set and build its id lookup tables.
///
/// Checks run in a fixed order so the same bad input always reports the same
/// error: duplicate candidate ids, duplicate provider ids, provider
/// capacities, candidate lists, then provider lists.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate_preferences(set: &PreferenceSet) -> Result<ParticipantIndex<'_>, ValidationError> {
    let mut candidates = HashMap::with_capacity(set.candidates.len());
    for (idx, candidate) in set.candidates.iter().enumerate() {
        if candidates.insert(&candidate.id, idx).is_some() {
            return Err(ValidationError::DuplicateIdentifier(candidate.id.to_string()));
        }
    }

    let mut providers = HashMap::with_capacity(set.providers.len());
    for (idx, provider) in set.providers.iter().enumerate() {
        if providers.insert(&provider.id, idx).is_some() {
            return Err(ValidationError::DuplicateIdentifier(provider.id.to_string()));
        }
    }

    for provider in &set.providers {
        if provider.capacity <= 0 {
            return Err(ValidationError::InvalidCapacity {
                provider: provider.id.to_string(),
                capacity: provider.capacity,
            });
        }
    }

    for candidate in &set.candidates {
        check_list(
            candidate.id.as_str(),
            &candidate.preferences,
            |p| providers.contains_key(p),
            ProviderId::as_str,
        )?;
    }

    for provider in &set.providers {
        check_list(
            provider.id.as_str(),
            &provider.preferences,
            |c| candidates.contains_key(c),
            CandidateId::as_str,
        )?;
    }

    Ok(ParticipantIndex {
        candidates,
        providers,
    })
}

fn check_list<T, F, N>(owner: &str, list: &[T], known: F, name: N) -> Result<(), ValidationError>
where
    T: Eq + std::hash::Hash,
    F: Fn(&T) -> bool,
    N: Fn(&T) -> &str,
{
    let mut seen = HashSet::with_capacity(list.len());
    for entry in list {
        if !known(entry) {
            return Err(ValidationError::UnknownReference {
                owner: owner.to_string(),
                missing: name(entry).to_string(),
            });
        }
        if !seen.insert(entry) {
            return Err(ValidationError::DuplicatePreference {
                owner: owner.to_string(),
                repeated: name(entry).to_string(),
            });
        }
    }
    Ok(())
}

use std::path::Path;

use crate::core::candidate::Candidate;
use crate::core::preferences::PreferenceSet;
use crate::core::provider::{Provider, DEFAULT_CAPACITY};
use crate::core::types::{CandidateId, ProviderId};
use crate::parsing::{read_text, ParseError};
use crate::utils::validation::MAX_PARTICIPANTS;

/// Separator between entries of a preference list inside one field
pub const LIST_SEPARATOR: char = ';';

/// Parse a TSV/CSV file with columns: kind, id, capacity, preferences
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_tsv_file(path: &Path, delimiter: char) -> Result<PreferenceSet, ParseError> {
    let content = read_text(path)?;
    Ok(parse_tsv_text(&content, delimiter)?.with_source(path.display().to_string()))
}

/// Parse TSV/CSV text with columns: kind, id, capacity, preferences
///
/// `kind` is `candidate`/`student` or `provider`/`lecturer`. Preferences are
/// separated by `;` in preference order. Capacity is ignored for candidates
/// and defaults to 5 when empty for providers.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if lines have fewer than 2 fields,
/// an unknown kind, or an invalid capacity, or
/// `ParseError::TooManyEntries` if the limit is exceeded.
pub fn parse_tsv_text(text: &str, delimiter: char) -> Result<PreferenceSet, ParseError> {
    let mut candidates = Vec::new();
    let mut providers = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "kind" || first == "role" || first == "type" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 2 || fields[1].is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} needs at least a kind and an id"
            )));
        }

        let id = fields[1];
        let capacity = fields.get(2).copied().unwrap_or("");
        let preferences = fields.get(3).map_or_else(Vec::new, |f| split_list(f));

        match fields[0].to_lowercase().as_str() {
            "candidate" | "student" => {
                if candidates.len() >= MAX_PARTICIPANTS {
                    return Err(ParseError::TooManyEntries(candidates.len() + 1));
                }
                let mut candidate = Candidate::new(id);
                candidate.preferences = preferences.into_iter().map(ProviderId::new).collect();
                candidates.push(candidate);
            }
            "provider" | "lecturer" | "supervisor" => {
                if providers.len() >= MAX_PARTICIPANTS {
                    return Err(ParseError::TooManyEntries(providers.len() + 1));
                }
                let capacity = if capacity.is_empty() {
                    DEFAULT_CAPACITY
                } else {
                    capacity.parse().map_err(|_| {
                        ParseError::InvalidFormat(format!(
                            "Invalid capacity on line {line_num}: '{capacity}'"
                        ))
                    })?
                };
                let mut provider = Provider::new(id, capacity);
                provider.preferences = preferences.into_iter().map(CandidateId::new).collect();
                providers.push(provider);
            }
            other => {
                return Err(ParseError::InvalidFormat(format!(
                    "Unknown kind on line {line_num}: '{other}'"
                )));
            }
        }
    }

    if candidates.is_empty() && providers.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No participants found in file".to_string(),
        ));
    }

    Ok(PreferenceSet::new(candidates, providers))
}

fn split_list(field: &str) -> Vec<&str> {
    field
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

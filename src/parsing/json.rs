//! JSON preference and assignment files.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::Deserialize;

use crate::core::candidate::Candidate;
use crate::core::preferences::PreferenceSet;
use crate::core::provider::Provider;
use crate::core::types::{CandidateId, ProviderId};
use crate::parsing::{read_text, ParseError};
use crate::utils::validation::MAX_PARTICIPANTS;

/// Parse a JSON preference file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Json` if
/// it is not a valid preference document, or `ParseError::TooManyEntries` if
/// the participant limit is exceeded.
pub fn parse_preferences_file(path: &Path) -> Result<PreferenceSet, ParseError> {
    let text = read_text(path)?;
    Ok(parse_preferences_text(&text)?.with_source(path.display().to_string()))
}

/// Parse a JSON preference document
///
/// At most [`MAX_PARTICIPANTS`] entries per side are built; any further
/// entries are skipped unparsed and only counted.
///
/// # Errors
///
/// Returns `ParseError::Json` on malformed JSON or `ParseError::TooManyEntries`
/// if either side has more than the allowed number of participants.
pub fn parse_preferences_text(text: &str) -> Result<PreferenceSet, ParseError> {
    let doc: PreferenceDocument = serde_json::from_str(text)?;

    let largest = doc.candidates.total.max(doc.providers.total);
    if largest > MAX_PARTICIPANTS {
        return Err(ParseError::TooManyEntries(largest));
    }

    let mut set = PreferenceSet::new(doc.candidates.items, doc.providers.items);
    set.source = doc.source;
    Ok(set)
}

#[derive(Deserialize)]
struct PreferenceDocument {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    candidates: Capped<Candidate>,
    #[serde(default)]
    providers: Capped<Provider>,
}

/// A JSON array that keeps its first `MAX_PARTICIPANTS` elements
struct Capped<T> {
    items: Vec<T>,
    total: usize,
}

impl<T> Default for Capped<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Capped<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CappedVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for CappedVisitor<T> {
            type Value = Capped<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of participants")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Capped<T>, A::Error> {
                let mut items = Vec::new();
                while items.len() < MAX_PARTICIPANTS {
                    match seq.next_element()? {
                        Some(item) => items.push(item),
                        None => {
                            let total = items.len();
                            return Ok(Capped { items, total });
                        }
                    }
                }

                let mut total = items.len();
                while seq.next_element::<IgnoredAny>()?.is_some() {
                    total += 1;
                }
                Ok(Capped { items, total })
            }
        }

        deserializer.deserialize_seq(CappedVisitor(PhantomData))
    }
}

/// Parse an assignment file: a JSON object from candidate id to provider id or `null`.
///
/// A full `solve --format json` report is accepted too; its `assignment.candidates`
/// object is used.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Json` on
/// malformed JSON, or `ParseError::InvalidFormat` if no candidate map is found.
pub fn parse_assignment_file(
    path: &Path,
) -> Result<BTreeMap<CandidateId, Option<ProviderId>>, ParseError> {
    let text = read_text(path)?;
    parse_assignment_text(&text)
}

/// Parse assignment JSON text. See [`parse_assignment_file`].
///
/// # Errors
///
/// Returns `ParseError::Json` on malformed JSON or `ParseError::InvalidFormat`
/// if no candidate map is found.
pub fn parse_assignment_text(
    text: &str,
) -> Result<BTreeMap<CandidateId, Option<ProviderId>>, ParseError> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    // A student may be called "candidates", so only an object counts as the nested map
    let map = value
        .pointer("/assignment/candidates")
        .filter(|v| v.is_object())
        .or_else(|| value.get("candidates").filter(|v| v.is_object()))
        .unwrap_or(&value);

    if !map.is_object() {
        return Err(ParseError::InvalidFormat(
            "Assignment must be a JSON object of candidate -> provider".to_string(),
        ));
    }

    Ok(serde_json::from_value(map.clone())?)
}

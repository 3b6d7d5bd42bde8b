//! Loaders for preference and assignment files.
//!
//! - **JSON** (`.json`, `.json.gz`): the serde form of [`PreferenceSet`]
//! - **TSV/CSV** (`.tsv`, `.csv`): one participant per line
//!
//! Files ending in `.gz` or `.bgz` are decompressed on the fly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use thesis_match::parsing::load_preferences;
//!
//! let set = load_preferences(Path::new("cohort.json"), None).unwrap();
//! println!("{} students, {} lecturers", set.candidates.len(), set.providers.len());
//! ```
//!
//! ## TSV columns
//!
//! | Column | Description | Required |
//! |--------|-------------|----------|
//! | kind | `student`/`candidate` or `lecturer`/`provider` | Yes |
//! | id | Unique identifier | Yes |
//! | capacity | Seats (lecturers only, default 5) | No |
//! | preferences | `;`-separated ids, most preferred first | No |

use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::core::preferences::PreferenceSet;

pub mod json;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Too many participants: {0} (maximum {max})", max = crate::utils::validation::MAX_PARTICIPANTS)]
    TooManyEntries(usize),
}

/// Supported preference file formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Json,
    Tsv,
    Csv,
}

impl InputFormat {
    /// Guess the format from a file name, defaulting to JSON
    #[must_use]
    pub fn detect(path: &Path) -> Self {
        let name = path.to_string_lossy().to_lowercase();
        let name = name
            .strip_suffix(".gz")
            .or_else(|| name.strip_suffix(".bgz"))
            .unwrap_or(&name);

        if name.ends_with(".tsv") || name.ends_with(".txt") {
            Self::Tsv
        } else if name.ends_with(".csv") {
            Self::Csv
        } else {
            Self::Json
        }
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

pub(crate) fn read_text(path: &Path) -> Result<String, ParseError> {
    let file = std::fs::File::open(path)?;
    let mut text = String::new();
    if is_gzipped(path) {
        BufReader::new(GzDecoder::new(file)).read_to_string(&mut text)?;
    } else {
        BufReader::new(file).read_to_string(&mut text)?;
    }
    Ok(text)
}

/// Load a preference file, detecting the format from its name unless given
///
/// # Errors
///
/// Returns a [`ParseError`] if the file cannot be read or parsed.
pub fn load_preferences(
    path: &Path,
    format: Option<InputFormat>,
) -> Result<PreferenceSet, ParseError> {
    match format.unwrap_or_else(|| InputFormat::detect(path)) {
        InputFormat::Json => json::parse_preferences_file(path),
        InputFormat::Tsv => tsv::parse_tsv_file(path, '\t'),
        InputFormat::Csv => tsv::parse_tsv_file(path, ','),
    }
}

//! # thesis-match
//!
//! Assigns students to supervising lecturers from ranked preferences.
//!
//! Each student ranks the lecturers they would accept as a supervisor; each
//! lecturer ranks students and offers a fixed number of seats. `thesis-match`
//! computes a stable assignment with candidate-proposing deferred acceptance
//! (Gale–Shapley for the many-to-one case): no student and lecturer would both
//! rather be matched to each other than keep what they got.
//!
//! ## Features
//!
//! - **Deterministic**: the same input always produces the same assignment
//! - **Validated input**: unknown ids, duplicate ids, repeated list entries and
//!   non-positive capacities are rejected before any matching happens
//! - **Explicit unranked policy**: students a lecturer did not rank are either
//!   ranked last or never admitted
//! - **Stability checker**: audits any assignment for blocking pairs
//!
//! ## Example
//!
//! ```rust
//! use thesis_match::{stable_match, Candidate, CandidateId, PreferenceSet, Provider, ProviderId};
//!
//! let set = PreferenceSet::new(
//!     vec![
//!         Candidate::new("S1").with_preferences(["P1"]),
//!         Candidate::new("S2").with_preferences(["P1", "P2"]),
//!     ],
//!     vec![
//!         Provider::new("P1", 1).with_preferences(["S1", "S2"]),
//!         Provider::new("P2", 1).with_preferences(["S1", "S2"]),
//!     ],
//! );
//!
//! let outcome = stable_match(&set).unwrap();
//! assert_eq!(outcome.assignment.provider_of(&CandidateId::new("S2")), Some(&ProviderId::new("P2")));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Students, lecturers, identifiers and the preference set
//! - [`matching`]: Matching engine, assignment and stability checker
//! - [`parsing`]: JSON and TSV/CSV preference file loaders
//! - [`utils`]: Input validation
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::candidate::Candidate;
pub use crate::core::preferences::PreferenceSet;
pub use crate::core::provider::Provider;
pub use crate::core::types::*;
pub use crate::matching::assignment::{Assignment, MatchOutcome, RunStats};
pub use crate::matching::engine::{stable_match, MatchingConfig, MatchingEngine};
pub use crate::matching::stability::{check_assignment, StabilityReport, Violation};
pub use crate::utils::validation::ValidationError;

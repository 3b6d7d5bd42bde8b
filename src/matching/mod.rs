//! Stable matching of students to supervising lecturers.
//!
//! This module provides the core matching functionality:
//!
//! - [`MatchingEngine`]: computes a stable many-to-one assignment
//! - [`Assignment`]: the result in both directions, with occupancy counts
//! - [`check_assignment`]: independent feasibility and blocking-pair check
//!
//! ## Matching Algorithm
//!
//! Candidate-proposing deferred acceptance with capacities:
//!
//! 1. Free candidates wait in a FIFO queue, in input order
//! 2. The front candidate proposes to the next provider on its list
//! 3. A provider with a free seat accepts
//! 4. A full provider swaps its worst occupant for a strictly better proposer;
//!    the evicted candidate rejoins the back of the queue
//! 5. A candidate with no providers left stays unmatched
//!
//! Each proposal is spent exactly once, so a run makes at most as many
//! proposals as there are entries across all candidate lists.
//!
//! ## Example
//!
//! ```rust
//! use thesis_match::core::candidate::Candidate;
//! use thesis_match::core::preferences::PreferenceSet;
//! use thesis_match::core::provider::Provider;
//! use thesis_match::core::types::CandidateId;
//! use thesis_match::matching::engine::stable_match;
//!
//! let set = PreferenceSet::new(
//!     vec![
//!         Candidate::new("S1").with_preferences(["LEC001"]),
//!         Candidate::new("S2").with_preferences(["LEC001"]),
//!     ],
//!     vec![Provider::new("LEC001", 1).with_preferences(["S2", "S1"])],
//! );
//!
//! let outcome = stable_match(&set).unwrap();
//! assert!(outcome.assignment.provider_of(&CandidateId::new("S1")).is_none());
//! assert_eq!(outcome.assignment.matched_count(), 1);
//! ```

pub mod assignment;
pub mod engine;
pub mod stability;

pub use assignment::{Assignment, MatchOutcome, RunStats};
pub use engine::{stable_match, MatchingConfig, MatchingEngine};
pub use stability::{check_assignment, StabilityReport, Violation};

//! Core data types for student/supervisor matching.
//!
//! - [`Candidate`]: a student with an ordered list of acceptable lecturers
//! - [`Provider`]: a lecturer with a seat capacity and an ordered list of students
//! - [`PreferenceSet`]: the full input to one matching run
//! - [`CandidateId`], [`ProviderId`]: opaque string identifiers
//! - [`UnrankedPolicy`], [`Rank`]: how providers compare students they did not rank
//!
//! [`Candidate`]: candidate::Candidate
//! [`Provider`]: provider::Provider
//! [`PreferenceSet`]: preferences::PreferenceSet
//! [`CandidateId`]: types::CandidateId
//! [`ProviderId`]: types::ProviderId
//! [`UnrankedPolicy`]: types::UnrankedPolicy
//! [`Rank`]: types::Rank

pub mod candidate;
pub mod preferences;
pub mod provider;
pub mod types;

//! Command-line interface for thesis-match.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **solve**: Compute a stable student/supervisor assignment from a preference file
//! - **verify**: Check an existing assignment for capacity violations and blocking pairs
//!
//! ## Usage
//!
//! ```text
//! # Match a cohort
//! thesis-match solve cohort.json
//!
//! # JSON output for storing or e-mailing results
//! thesis-match solve cohort.tsv --format json > assignment.json
//!
//! # Never seat a student a lecturer did not rank
//! thesis-match solve cohort.json --unranked reject
//!
//! # Audit an assignment made by hand
//! thesis-match verify cohort.json assignment.json
//! ```

use clap::{Parser, Subcommand};

use crate::core::types::UnrankedPolicy;

pub mod solve;
pub mod verify;

#[derive(Parser)]
#[command(name = "thesis-match")]
#[command(version)]
#[command(about = "Assign students to supervising lecturers with a stable matching")]
#[command(
    long_about = "thesis-match assigns students to supervising lecturers from ranked preference lists.\n\nStudents propose to lecturers in order of preference; lecturers keep the best-ranked students up to their capacity. The result is stable: no student and lecturer would both rather be matched to each other."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a stable assignment from a preference file
    Solve(solve::SolveArgs),

    /// Check an assignment against a preference file
    Verify(verify::VerifyArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// How lecturers treat students missing from their list
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum UnrankedArg {
    /// Admit when a seat is free, never let them displace anyone
    #[default]
    RankLast,
    /// Never admit them
    Reject,
}

impl From<UnrankedArg> for UnrankedPolicy {
    fn from(arg: UnrankedArg) -> Self {
        match arg {
            UnrankedArg::RankLast => Self::RankLast,
            UnrankedArg::Reject => Self::Reject,
        }
    }
}

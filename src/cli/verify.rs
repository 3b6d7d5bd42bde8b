use std::path::PathBuf;

use clap::Args;

use crate::cli::{OutputFormat, UnrankedArg};
use crate::matching::assignment::Assignment;
use crate::matching::stability::{check_assignment, StabilityReport};
use crate::parsing::json::parse_assignment_file;
use crate::parsing::{load_preferences, InputFormat};
use crate::utils::validation::validate_preferences;

#[derive(Args)]
pub struct VerifyArgs {
    /// Preference file (JSON, TSV or CSV; `.gz` accepted)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Assignment JSON: candidate -> provider (or null), or a `solve --format json` report
    #[arg(required = true)]
    pub assignment: PathBuf,

    /// Input format of the preference file (detected from the file name by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,

    /// How lecturers treat students they did not rank
    #[arg(long, value_enum, default_value = "rank-last")]
    pub unranked: UnrankedArg,
}

/// Execute verify subcommand
///
/// # Errors
///
/// Returns an error if either file cannot be parsed, the preferences are
/// invalid, or the assignment is not a stable matching.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: VerifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let set = load_preferences(&args.input, args.input_format)?;
    validate_preferences(&set)
        .map_err(|e| anyhow::anyhow!("Invalid preferences in {}: {e}", args.input.display()))?;

    let matches = parse_assignment_file(&args.assignment)?;
    let assignment = Assignment::from_candidate_map(&set, matches);

    if verbose {
        eprintln!(
            "Checking {} matched of {} students",
            assignment.matched_count(),
            assignment.candidates.len()
        );
    }

    let report = check_assignment(&set, &assignment, args.unranked.into());

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    if report.is_stable() {
        Ok(())
    } else {
        anyhow::bail!(
            "Assignment is not stable: {} violation(s)",
            report.violations.len()
        )
    }
}

fn print_text_report(report: &StabilityReport) {
    if report.is_stable() {
        println!("Assignment is stable.");
        return;
    }

    println!("Violations");
    println!("{}", "=".repeat(60));
    for violation in &report.violations {
        println!("  - {violation}");
    }
}

fn print_tsv_report(report: &StabilityReport) {
    println!("violation");
    for violation in &report.violations {
        println!("{violation}");
    }
}

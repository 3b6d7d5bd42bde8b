use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::cli::{OutputFormat, UnrankedArg};
use crate::core::preferences::PreferenceSet;
use crate::matching::engine::{MatchingConfig, MatchingEngine};
use crate::matching::MatchOutcome;
use crate::parsing::{load_preferences, InputFormat};

#[derive(Args)]
pub struct SolveArgs {
    /// Preference file (JSON, TSV or CSV; `.gz` accepted)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Input format (detected from the file name by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,

    /// How lecturers treat students they did not rank
    #[arg(long, value_enum, default_value = "rank-last")]
    pub unranked: UnrankedArg,
}

/// Execute solve subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed or fails validation.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let set = load_preferences(&args.input, args.input_format)?;

    if verbose {
        eprintln!(
            "Loaded {} students and {} lecturers ({} seats, {} ranked choices)",
            set.candidates.len(),
            set.providers.len(),
            set.total_seats(),
            set.proposal_budget(),
        );
    }

    let config = MatchingConfig::with_policy(args.unranked.into());
    debug!(policy = %config.unranked_policy, "running matching engine");
    let engine = MatchingEngine::with_config(config);
    let outcome = engine
        .run(&set)
        .map_err(|e| anyhow::anyhow!("Invalid preferences in {}: {e}", args.input.display()))?;

    match format {
        OutputFormat::Text => print_text_results(&set, &outcome, verbose),
        OutputFormat::Json => print_json_results(&args, &outcome)?,
        OutputFormat::Tsv => print_tsv_results(&outcome),
    }

    Ok(())
}

fn print_text_results(set: &PreferenceSet, outcome: &MatchOutcome, verbose: bool) {
    let assignment = &outcome.assignment;

    println!("Stable Assignment");
    println!("{}", "=".repeat(60));

    for provider in &set.providers {
        let occupants = assignment.occupants(&provider.id);
        let closed = if provider.accepting { "" } else { " [not accepting]" };
        println!(
            "\n{} ({}/{} seats){closed}",
            provider.id,
            occupants.len(),
            provider.capacity
        );
        for candidate in occupants {
            println!("  - {candidate}");
        }
    }

    let unmatched: Vec<String> = assignment.unmatched().map(ToString::to_string).collect();
    println!(
        "\nMatched: {}/{}",
        assignment.matched_count(),
        assignment.candidates.len()
    );
    if !unmatched.is_empty() {
        println!("Unmatched: {}", unmatched.join(", "));
    }

    if verbose {
        let stats = &outcome.stats;
        println!("\nRun statistics:");
        println!("  Unranked policy: {}", outcome.unranked_policy);
        println!("  Proposals: {}", stats.proposals);
        println!("  Acceptances: {}", stats.acceptances);
        println!("  Displacements: {}", stats.displacements);
        println!("  Rejections: {}", stats.rejections);
        println!("  Exhausted lists: {}", stats.exhausted);
    }
}

fn print_json_results(args: &SolveArgs, outcome: &MatchOutcome) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "input": args.input.display().to_string(),
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "unranked_policy": outcome.unranked_policy,
        "assignment": outcome.assignment,
        "stats": outcome.stats,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(outcome: &MatchOutcome) {
    println!("candidate\tprovider");
    for (candidate, provider) in &outcome.assignment.candidates {
        let provider = provider.as_ref().map_or("", |p| p.as_str());
        println!("{candidate}\t{provider}");
    }
}

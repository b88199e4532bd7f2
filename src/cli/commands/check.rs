//! Check command - verify that the artifacts allow a complete walk

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::{
    adapters::CsvArtifactReader,
    analysis::{ConsistencyReport, check_consistency},
    cli::{
        config::ArtifactArgs,
        output::{format_number, print_kv, print_section, print_subsection},
    },
    identifiers::StateId,
    ports::ArtifactReader,
};

/// Gaps listed before the rest are summarised.
const MAX_LISTED_GAPS: usize = 20;

#[derive(Parser, Debug)]
#[command(about = "Check the transition table for cycles and the value tables for coverage")]
pub struct CheckArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Load the artifacts through `reader` and check them from the initial state.
pub fn run<R: ArtifactReader + ?Sized>(
    args: &CheckArgs,
    reader: &R,
) -> Result<ConsistencyReport> {
    let loaded = args.artifacts.load(reader)?;
    check_consistency(
        &loaded.graph,
        &loaded.agent_a,
        &loaded.agent_b,
        &StateId::initial(),
    )
    .context("Failed to check artifact consistency")
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let report = run(&args, &CsvArtifactReader::new())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.is_consistent() {
        bail!("artifacts cannot guarantee a complete critical path walk");
    }
    Ok(())
}

fn print_report(report: &ConsistencyReport) {
    print_section("Artifact Consistency");
    print_kv("Initial state", report.initial_state.as_str());
    print_kv("Reachable states", &format_number(report.reachable_states));
    print_kv("Terminal states", &format_number(report.terminal_states));
    match report.max_depth {
        Some(depth) => print_kv("Longest game", &format!("{depth} moves")),
        None => print_kv("Longest game", "unbounded (cycle)"),
    }

    if let Some(cycle) = &report.cycle {
        print_subsection("Reachable cycle");
        for state in cycle {
            println!("  {state}");
        }
    }

    if !report.gaps.is_empty() {
        print_subsection("States without learned values");
        for gap in report.gaps.iter().take(MAX_LISTED_GAPS) {
            println!("  {} ({}): {}", gap.agent, gap.side, gap.state);
        }
        if report.gaps.len() > MAX_LISTED_GAPS {
            println!("  ... and {} more", report.gaps.len() - MAX_LISTED_GAPS);
        }
    }

    println!();
    if report.is_consistent() {
        println!("OK: every walk from the initial state reaches a terminal state");
    } else {
        println!("FAILED: see above");
    }
}

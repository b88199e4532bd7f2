//! Walk command - extract the critical path between two trained agents

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{
    adapters::CsvArtifactReader,
    cli::{
        config::ArtifactArgs,
        output::{print_kv, print_section, print_subsection},
    },
    ports::ArtifactReader,
    types::AgentIdentity,
    walker::{CriticalPath, CriticalPathWalker, DEFAULT_MAX_STEPS, WalkConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Walk the critical path between two trained agents")]
pub struct WalkArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Abort the walk after this many moves
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// Walk until a terminal state however long it takes
    #[arg(long, conflicts_with = "max_steps")]
    pub no_step_limit: bool,

    /// Report format written to stdout
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Also write the report as JSON to this file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable listing
    Text,
    /// Serialized report
    Json,
}

/// Everything the walk command reports.
#[derive(Debug, Clone, Serialize)]
pub struct WalkReport {
    pub agent_a: AgentIdentity,
    pub agent_b: AgentIdentity,
    pub path: CriticalPath,
}

impl WalkArgs {
    pub fn walk_config(&self) -> WalkConfig {
        let config = WalkConfig::new();
        if self.no_step_limit {
            config.without_step_limit()
        } else {
            config.with_max_steps(self.max_steps)
        }
    }
}

/// Load the artifacts through `reader` and walk the path.
pub fn run<R: ArtifactReader + ?Sized>(args: &WalkArgs, reader: &R) -> Result<WalkReport> {
    let loaded = args.artifacts.load(reader)?;
    let path = CriticalPathWalker::new(&loaded.graph, &loaded.agent_a, &loaded.agent_b)
        .with_config(args.walk_config())
        .walk()
        .context("Failed to walk the critical path")?;

    Ok(WalkReport {
        agent_a: loaded.agent_a.identity(),
        agent_b: loaded.agent_b.identity(),
        path,
    })
}

pub fn execute(args: WalkArgs) -> Result<()> {
    let report = run(&args, &CsvArtifactReader::new())?;

    match args.format {
        ReportFormat::Text => print_text(&report),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)
            .context("Failed to write critical path report")?;
        if args.format == ReportFormat::Text {
            println!("\nReport written to: {}", path.display());
        }
    }

    Ok(())
}

fn print_text(report: &WalkReport) {
    let path = &report.path;

    print_section("Critical Path");
    print_kv("Agent A", &report.agent_a.to_string());
    print_kv("Agent B", &report.agent_b.to_string());
    print_kv("Moves", &path.len().to_string());
    print_kv("Final state", path.final_state().as_str());

    print_subsection("Moves");
    println!("  {:>4}  {:<8} {:>6}  {:>10}  state", "#", "side", "column", "value");
    println!("  {:>4}  {:<8} {:>6}  {:>10}  {}", 0, "-", "-", "-", path.initial_state());
    for (step, (_, to, action, value)) in path.steps().enumerate() {
        println!(
            "  {:>4}  {:<8} {:>6}  {:>10.4}  {}",
            step + 1,
            CriticalPath::side_at(step).to_string(),
            action.column(),
            value,
            to
        );
    }

    println!();
    println!("critical path: {}", format_sequence(&path.states));
    println!("critical columns: {}", format_sequence(&path.actions));
}

/// Render `[a, b, c]`.
pub fn format_sequence<T: std::fmt::Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

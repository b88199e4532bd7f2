//! critpath CLI - critical paths of trained n-wins agents
//!
//! - `walk`: follow both agents' value tables from the empty board to the end
//!   of the game and print the resulting states and columns
//! - `check`: verify the artifacts admit a complete walk

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "critpath")]
#[command(version, about = "Critical path extraction for trained n-wins agents", long_about = None)]
struct Cli {
    /// Log every step of the walk
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the critical path between two trained agents
    Walk(critpath::cli::commands::walk::WalkArgs),

    /// Check the artifacts for cycles and missing values
    Check(critpath::cli::commands::check::CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    critpath::logging::init(cli.verbose);

    match cli.command {
        Commands::Walk(args) => critpath::cli::commands::walk::execute(args),
        Commands::Check(args) => critpath::cli::commands::check::execute(args),
    }
}

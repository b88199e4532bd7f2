//! Arguments shared by every command and the loading they drive.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    agent::ValueTableAgent,
    cli::output::create_spinner,
    graph::TransitionGraph,
    ports::ArtifactReader,
    types::{AgentIdentity, AgentKind, GameSide},
};

/// Conventional location of the exported game tree.
pub const DEFAULT_TRANSITIONS: &str = "./transitions.csv";

/// Locations of the three artifacts plus the algorithm behind each value table.
#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// Value table of the agent moving first (side A)
    pub qtable_a: PathBuf,

    /// Value table of the agent moving second (side B)
    pub qtable_b: PathBuf,

    /// Transition table exported from the game tree
    #[arg(default_value = DEFAULT_TRANSITIONS)]
    pub transitions: PathBuf,

    /// Algorithm that trained the side A table (simple-ql, double-ql, dyna-ql, sarsa-lambda)
    #[arg(long, default_value = "simple-ql")]
    pub kind_a: AgentKind,

    /// Algorithm that trained the side B table
    #[arg(long, default_value = "simple-ql")]
    pub kind_b: AgentKind,
}

/// Graph and both agents, ready to walk.
pub struct LoadedArtifacts {
    pub graph: Arc<TransitionGraph>,
    pub agent_a: ValueTableAgent,
    pub agent_b: ValueTableAgent,
}

impl ArtifactArgs {
    /// Load the graph first, then both agents on top of it.
    pub fn load<R: ArtifactReader + ?Sized>(&self, reader: &R) -> Result<LoadedArtifacts> {
        let spinner = create_spinner("Loading transition table...");
        let graph = Arc::new(
            TransitionGraph::load(reader, &self.transitions).with_context(|| {
                format!(
                    "Failed to load transitions from {}",
                    self.transitions.display()
                )
            })?,
        );

        spinner.set_message("Loading value tables...");
        let agent_a = ValueTableAgent::load(
            AgentIdentity::new(self.kind_a, GameSide::SideA),
            reader,
            &self.qtable_a,
            graph.clone(),
        )
        .with_context(|| {
            format!(
                "Failed to load value table A from {}",
                self.qtable_a.display()
            )
        })?;
        let agent_b = ValueTableAgent::load(
            AgentIdentity::new(self.kind_b, GameSide::SideB),
            reader,
            &self.qtable_b,
            graph.clone(),
        )
        .with_context(|| {
            format!(
                "Failed to load value table B from {}",
                self.qtable_b.display()
            )
        })?;
        spinner.finish_and_clear();

        Ok(LoadedArtifacts {
            graph,
            agent_a,
            agent_b,
        })
    }
}

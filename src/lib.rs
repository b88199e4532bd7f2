//! Critical path extraction for trained n-wins agents
//!
//! Two agents trained by reinforcement learning each leave behind a value
//! table over state transitions. Starting from the empty board, the agents
//! take turns greedily following their tables until the game ends; the
//! resulting sequence of states and columns is the critical path.
//!
//! This crate provides:
//! - Loading of the transition and value artifacts (headerless CSV)
//! - The transition graph and greedy value-table agents
//! - The alternating critical path walk with a step limit
//! - Consistency checks between artifacts (cycles, missing values)
//! - The `critpath` command-line tool

pub mod adapters;
pub mod agent;
pub mod analysis;
pub mod artifact;
pub mod cli;
pub mod error;
pub mod graph;
pub mod identifiers;
pub mod logging;
pub mod ports;
pub mod types;
pub mod walker;

pub use agent::ValueTableAgent;
pub use analysis::{ConsistencyReport, CoverageGap, check_consistency};
pub use artifact::{ArtifactKind, Transition, ValueRecord};
pub use error::{Error, Result};
pub use graph::TransitionGraph;
pub use identifiers::{INITIAL_STATE, StateId};
pub use ports::{ArtifactReader, Choice, SuccessorPolicy};
pub use types::{Action, AgentIdentity, AgentKind, GameSide};
pub use walker::{
    CriticalPath, CriticalPathWalker, DEFAULT_MAX_STEPS, WalkConfig, get_critical_path,
};

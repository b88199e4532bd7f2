//! Critical path walk: both agents greedily follow their value tables, taking
//! turns, from the initial state until the graph reports a terminal state.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    graph::TransitionGraph,
    identifiers::StateId,
    ports::SuccessorPolicy,
    types::{Action, GameSide},
};

/// Upper bound on walk length used unless configured otherwise.
///
/// The board encoding holds at most 64 fields and every move fills one, so no
/// game of this domain takes more moves.
pub const DEFAULT_MAX_STEPS: usize = 64;

/// Configuration for a critical path walk.
///
/// # Examples
///
/// ```
/// use critpath::walker::{WalkConfig, DEFAULT_MAX_STEPS};
///
/// let config = WalkConfig::default();
/// assert_eq!(config.max_steps, Some(DEFAULT_MAX_STEPS));
///
/// let unbounded = WalkConfig::default().without_step_limit();
/// assert_eq!(unbounded.max_steps, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkConfig {
    /// State the walk starts from
    pub initial_state: StateId,
    /// Maximum number of moves before the walk is aborted
    pub max_steps: Option<usize>,
}

impl WalkConfig {
    pub fn new() -> Self {
        Self {
            initial_state: StateId::initial(),
            max_steps: Some(DEFAULT_MAX_STEPS),
        }
    }

    /// Start from a state other than the empty board.
    pub fn with_initial_state(mut self, state: impl Into<StateId>) -> Self {
        self.initial_state = state.into();
        self
    }

    /// Abort walks that take more than `max_steps` moves.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Walk until a terminal state no matter how long it takes.
    pub fn without_step_limit(mut self) -> Self {
        self.max_steps = None;
        self
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a walk.
///
/// `states` has one more entry than `actions`: `actions[i]` leads from
/// `states[i]` to `states[i + 1]`, and `values[i]` is the learned value that
/// made that move the best choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPath {
    pub states: Vec<StateId>,
    pub actions: Vec<Action>,
    pub values: Vec<f64>,
}

impl CriticalPath {
    fn start(initial: StateId) -> Self {
        Self {
            states: vec![initial],
            actions: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of moves on the path.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True when the initial state was already terminal.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn initial_state(&self) -> &StateId {
        &self.states[0]
    }

    pub fn final_state(&self) -> &StateId {
        &self.states[self.states.len() - 1]
    }

    /// Side that made move `step` (side A moves first).
    pub fn side_at(step: usize) -> GameSide {
        if step % 2 == 0 {
            GameSide::SideA
        } else {
            GameSide::SideB
        }
    }

    /// Moves as `(from, to, action, value)`.
    pub fn steps(&self) -> impl Iterator<Item = (&StateId, &StateId, Action, f64)> + '_ {
        self.states
            .windows(2)
            .zip(self.actions.iter().zip(&self.values))
            .map(|(pair, (action, value))| (&pair[0], &pair[1], *action, *value))
    }
}

/// Drives the alternating greedy walk over one graph and two policies.
pub struct CriticalPathWalker<'g, A, B> {
    graph: &'g TransitionGraph,
    agent_a: A,
    agent_b: B,
    config: WalkConfig,
}

impl<'g, A: SuccessorPolicy, B: SuccessorPolicy> CriticalPathWalker<'g, A, B> {
    pub fn new(graph: &'g TransitionGraph, agent_a: A, agent_b: B) -> Self {
        Self {
            graph,
            agent_a,
            agent_b,
            config: WalkConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Walk from the configured initial state to a terminal state.
    ///
    /// # Errors
    ///
    /// Any error from the acting policy aborts the walk; no partial path is
    /// returned. [`Error::StepLimitExceeded`] is returned when a step limit is
    /// configured and reached before a terminal state.
    pub fn walk(&self) -> Result<CriticalPath> {
        let mut path = CriticalPath::start(self.config.initial_state.clone());
        let mut side = GameSide::SideA;
        let mut current = self.config.initial_state.clone();

        while !self.graph.is_terminal(&current) {
            if let Some(limit) = self.config.max_steps
                && path.len() >= limit
            {
                log::warn!("critical path walk hit the {limit}-step limit at {current}");
                return Err(Error::StepLimitExceeded {
                    limit,
                    state: current.into_inner(),
                });
            }

            let choice = match side {
                GameSide::SideA => self.agent_a.best_next_state(&current)?,
                GameSide::SideB => self.agent_b.best_next_state(&current)?,
            };
            log::debug!(
                "step {}: {side} plays column {} ({current} -> {}, value {})",
                path.len(),
                choice.action,
                choice.state,
                choice.value
            );

            path.states.push(choice.state.clone());
            path.actions.push(choice.action);
            path.values.push(choice.value);
            current = choice.state;
            side = side.opponent();
        }

        log::info!(
            "critical path reached terminal state {current} after {} moves",
            path.len()
        );
        Ok(path)
    }
}

/// Walk the critical path with the default configuration.
///
/// `agent_a` moves first.
pub fn get_critical_path<A: SuccessorPolicy, B: SuccessorPolicy>(
    graph: &TransitionGraph,
    agent_a: A,
    agent_b: B,
) -> Result<CriticalPath> {
    CriticalPathWalker::new(graph, agent_a, agent_b).walk()
}

//! Consistency checks between independently produced artifacts.
//!
//! A walk only terminates on acyclic input and only completes when the acting
//! agent has a value for some successor of every state it reaches. Both can
//! be verified up front.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::{
    Result, error::Error, graph::TransitionGraph, identifiers::StateId, ports::SuccessorPolicy,
    types::GameSide,
};

/// A state where the side to move has no learned value for any successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageGap {
    pub side: GameSide,
    pub agent: String,
    pub state: StateId,
}

/// Outcome of [`check_consistency`].
#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub initial_state: StateId,
    pub reachable_states: usize,
    pub terminal_states: usize,
    /// Longest path to a terminal state; `None` when a cycle is reachable
    pub max_depth: Option<usize>,
    pub cycle: Option<Vec<StateId>>,
    pub gaps: Vec<CoverageGap>,
}

impl ConsistencyReport {
    /// True when every walk from the initial state is guaranteed to finish.
    pub fn is_consistent(&self) -> bool {
        self.cycle.is_none() && self.gaps.is_empty()
    }
}

/// Explore every `(state, side to move)` pair reachable from `initial` and
/// ask the acting policy for a move at each non-terminal one.
pub fn check_consistency<A: SuccessorPolicy, B: SuccessorPolicy>(
    graph: &TransitionGraph,
    agent_a: &A,
    agent_b: &B,
    initial: &StateId,
) -> Result<ConsistencyReport> {
    let reachable = graph.reachable_from(initial);
    let terminal_states = reachable
        .iter()
        .filter(|state| graph.is_terminal(state))
        .count();
    let cycle = graph.find_cycle_from(initial);
    let max_depth = graph.depth_from(initial);

    let mut gaps = Vec::new();
    let mut visited: HashSet<(StateId, GameSide)> = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert((initial.clone(), GameSide::SideA));
    queue.push_back((initial.clone(), GameSide::SideA));

    while let Some((state, side)) = queue.pop_front() {
        if graph.is_terminal(&state) {
            continue;
        }

        let (agent, outcome) = match side {
            GameSide::SideA => (agent_a.name(), agent_a.best_next_state(&state)),
            GameSide::SideB => (agent_b.name(), agent_b.best_next_state(&state)),
        };
        match outcome {
            Ok(_) => {}
            Err(Error::UnreachableValue { .. }) => gaps.push(CoverageGap {
                side,
                agent,
                state: state.clone(),
            }),
            Err(other) => return Err(other),
        }

        let opponent = side.opponent();
        for next in graph.next_states(&state) {
            if visited.insert((next.clone(), opponent)) {
                queue.push_back((next.clone(), opponent));
            }
        }
    }

    if !gaps.is_empty() {
        log::warn!("{} states lack a learned value for the side to move", gaps.len());
    }
    if let Some(cycle) = &cycle {
        log::warn!("transition graph has a reachable cycle of length {}", cycle.len());
    }

    gaps.sort_by(|a, b| a.state.cmp(&b.state).then(a.side.cmp(&b.side)));

    Ok(ConsistencyReport {
        initial_state: initial.clone(),
        reachable_states: reachable.len(),
        terminal_states,
        max_depth,
        cycle,
        gaps,
    })
}

//! Greedy agent backed by a learned value table.
//!
//! Selection rule: among all value records whose `after` state is a successor
//! of the current state, take the one with the highest value. Ties go to the
//! record that appeared first in the artifact.

use std::{collections::HashMap, path::Path, sync::Arc};

use crate::{
    Result,
    artifact::ValueRecord,
    error::Error,
    graph::TransitionGraph,
    identifiers::StateId,
    ports::{ArtifactReader, Choice, SuccessorPolicy},
    types::AgentIdentity,
};

/// One trained agent: its value records plus the graph it plays on.
#[derive(Debug, Clone)]
pub struct ValueTableAgent {
    identity: AgentIdentity,
    graph: Arc<TransitionGraph>,
    /// Records in artifact order
    records: Vec<ValueRecord>,
    /// For each `after` state, the index of its first highest-valued record
    best_by_after: HashMap<StateId, usize>,
}

impl ValueTableAgent {
    /// Create an agent from value records given in artifact order.
    pub fn new(
        identity: AgentIdentity,
        records: Vec<ValueRecord>,
        graph: Arc<TransitionGraph>,
    ) -> Self {
        let mut best_by_after: HashMap<StateId, usize> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            match best_by_after.get_mut(&record.after) {
                Some(best) if record.value > records[*best].value => *best = index,
                Some(_) => {}
                None => {
                    best_by_after.insert(record.after.clone(), index);
                }
            }
        }

        Self {
            identity,
            graph,
            records,
            best_by_after,
        }
    }

    /// Load an agent from its value artifact.
    pub fn load<R: ArtifactReader + ?Sized>(
        identity: AgentIdentity,
        reader: &R,
        location: &Path,
        graph: Arc<TransitionGraph>,
    ) -> Result<Self> {
        let records = reader.read_value_records(location)?;
        let agent = Self::new(identity, records, graph);
        log::info!(
            "agent {}: {} value records covering {} states",
            agent.identity,
            agent.records.len(),
            agent.best_by_after.len()
        );
        Ok(agent)
    }

    pub fn identity(&self) -> AgentIdentity {
        self.identity
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    /// Records ranked when choosing a move from `state`, in artifact order.
    pub fn candidates(&self, state: &StateId) -> Vec<&ValueRecord> {
        let successors = self.graph.next_states(state);
        self.records
            .iter()
            .filter(|record| successors.contains(&record.after))
            .collect()
    }

    /// Pick the highest-valued successor of `state` and the action leading
    /// there.
    ///
    /// # Errors
    ///
    /// - [`Error::TerminalState`] if the graph lists no successors for `state`
    /// - [`Error::UnreachableValue`] if no value record exists for any successor
    pub fn best_next_state(&self, state: &StateId) -> Result<Choice> {
        let successors = self.graph.next_states(state);
        if successors.is_empty() {
            return Err(Error::TerminalState {
                state: state.to_string(),
            });
        }

        let mut best: Option<usize> = None;
        for next in successors {
            let Some(&candidate) = self.best_by_after.get(next) else {
                continue;
            };
            best = match best {
                Some(current) if !self.ranks_above(candidate, current) => Some(current),
                _ => Some(candidate),
            };
        }

        let Some(index) = best else {
            log::warn!(
                "agent {} has no value for any successor of {state}",
                self.identity
            );
            return Err(Error::UnreachableValue {
                agent: self.identity.to_string(),
                state: state.to_string(),
                successors: successors.len(),
            });
        };

        let record = &self.records[index];
        Ok(Choice {
            state: record.after.clone(),
            action: record.action,
            value: record.value,
        })
    }

    fn ranks_above(&self, candidate: usize, current: usize) -> bool {
        let (a, b) = (self.records[candidate].value, self.records[current].value);
        a > b || (a == b && candidate < current)
    }
}

impl SuccessorPolicy for ValueTableAgent {
    fn name(&self) -> String {
        self.identity.to_string()
    }

    fn best_next_state(&self, state: &StateId) -> Result<Choice> {
        ValueTableAgent::best_next_state(self, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        artifact::Transition,
        types::{Action, AgentKind, GameSide},
    };

    fn graph(edges: &[(&str, &str)]) -> Arc<TransitionGraph> {
        Arc::new(TransitionGraph::from_transitions(
            edges
                .iter()
                .map(|(before, after)| Transition::new(*before, *after)),
        ))
    }

    fn agent(graph: Arc<TransitionGraph>, rows: &[(&str, &str, u32, f64)]) -> ValueTableAgent {
        let records = rows
            .iter()
            .map(|(before, after, column, value)| {
                ValueRecord::new(*before, *after, GameSide::SideA, *column, *value)
            })
            .collect();
        ValueTableAgent::new(
            AgentIdentity::new(AgentKind::SimpleQl, GameSide::SideA),
            records,
            graph,
        )
    }

    #[test]
    fn picks_highest_value() {
        let g = graph(&[("A", "B"), ("A", "C")]);
        let a = agent(g, &[("A", "B", 3, 0.9), ("A", "C", 5, 0.4)]);
        let choice = a.best_next_state(&"A".into()).unwrap();
        assert_eq!(choice.state, "B");
        assert_eq!(choice.action, Action::new(3));
        assert_eq!(choice.value, 0.9);
    }

    #[test]
    fn ties_go_to_first_loaded_record() {
        let g = graph(&[("A", "B"), ("A", "C")]);
        let a = agent(g.clone(), &[("A", "C", 5, 0.7), ("A", "B", 3, 0.7)]);
        assert_eq!(a.best_next_state(&"A".into()).unwrap().state, "C");

        // successor order in the graph does not matter, load order does
        let b = agent(g, &[("A", "B", 3, 0.7), ("A", "C", 5, 0.7)]);
        assert_eq!(b.best_next_state(&"A".into()).unwrap().state, "B");
    }

    #[test]
    fn ties_within_one_successor_keep_first_action() {
        let g = graph(&[("A", "B")]);
        let a = agent(g, &[("A", "B", 1, 0.5), ("X", "B", 2, 0.5)]);
        assert_eq!(a.best_next_state(&"A".into()).unwrap().action, Action::new(1));
    }

    #[test]
    fn records_are_matched_by_after_state_only() {
        let g = graph(&[("A", "B"), ("A", "C")]);
        let a = agent(g, &[("A", "B", 1, 0.1), ("Z", "C", 4, 0.8)]);
        let choice = a.best_next_state(&"A".into()).unwrap();
        assert_eq!(choice.state, "C");
        assert_eq!(choice.action, Action::new(4));
    }

    #[test]
    fn records_for_unrelated_states_are_ignored() {
        let g = graph(&[("A", "B"), ("A", "C"), ("B", "D")]);
        let a = agent(g, &[("B", "D", 0, 9.0), ("A", "C", 2, -1.0)]);
        assert_eq!(a.best_next_state(&"A".into()).unwrap().state, "C");
    }

    #[test]
    fn terminal_state_is_a_precondition_error() {
        let g = graph(&[("A", "B")]);
        let a = agent(g, &[("A", "B", 0, 1.0)]);
        let err = a.best_next_state(&"B".into()).unwrap_err();
        assert!(err.is_precondition_error());
    }

    #[test]
    fn missing_values_are_unreachable() {
        let g = graph(&[("A", "B"), ("A", "C")]);
        let a = agent(g, &[("Q", "R", 0, 1.0)]);
        match a.best_next_state(&"A".into()).unwrap_err() {
            Error::UnreachableValue {
                agent,
                state,
                successors,
            } => {
                assert_eq!(agent, "SimpleQL (side A)");
                assert_eq!(state, "A");
                assert_eq!(successors, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn candidates_follow_load_order() {
        let g = graph(&[("A", "B"), ("A", "C")]);
        let a = agent(
            g,
            &[("A", "C", 5, 0.1), ("B", "D", 1, 0.2), ("A", "B", 3, 0.3)],
        );
        let after: Vec<&str> = a
            .candidates(&"A".into())
            .iter()
            .map(|record| record.after.as_str())
            .collect();
        assert_eq!(after, vec!["C", "B"]);
        assert_eq!(a.record_count(), 3);
    }

    #[test]
    fn negative_values_still_rank() {
        let g = graph(&[("A", "B"), ("A", "C")]);
        let a = agent(g, &[("A", "B", 0, -0.5), ("A", "C", 1, -0.25)]);
        assert_eq!(a.best_next_state(&"A".into()).unwrap().state, "C");
    }
}

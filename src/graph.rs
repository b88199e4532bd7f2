//! Transition graph over opaque game states.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    path::Path,
};

use crate::{Result, artifact::Transition, identifiers::StateId, ports::ArtifactReader};

/// Adjacency relation `state -> reachable next states`.
///
/// Immutable after construction, so one graph can back any number of agents
/// and walkers.
#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    /// Successors per state, in artifact order
    successors: HashMap<StateId, Vec<StateId>>,
    transition_count: usize,
}

impl TransitionGraph {
    /// Build a graph from transition rows.
    pub fn from_transitions<I>(transitions: I) -> Self
    where
        I: IntoIterator<Item = Transition>,
    {
        let mut successors: HashMap<StateId, Vec<StateId>> = HashMap::new();
        let mut transition_count = 0;
        for Transition { before, after } in transitions {
            successors.entry(before).or_default().push(after);
            transition_count += 1;
        }
        Self {
            successors,
            transition_count,
        }
    }

    /// Load the graph from a transitions artifact.
    pub fn load<R: ArtifactReader + ?Sized>(reader: &R, location: &Path) -> Result<Self> {
        let graph = Self::from_transitions(reader.read_transitions(location)?);
        log::info!(
            "transition graph: {} transitions out of {} states",
            graph.transition_count,
            graph.successors.len()
        );
        Ok(graph)
    }

    /// Every state that follows `state`. Empty for terminal or unknown states.
    pub fn next_states(&self, state: &StateId) -> &[StateId] {
        self.successors
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True iff `state` has no outgoing transitions.
    pub fn is_terminal(&self, state: &StateId) -> bool {
        self.next_states(state).is_empty()
    }

    /// Number of states with at least one outgoing transition.
    pub fn state_count(&self) -> usize {
        self.successors.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transition_count
    }

    /// All states reachable from `start`, including `start`.
    pub fn reachable_from(&self, start: &StateId) -> HashSet<StateId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start.clone());
        queue.push_back(start.clone());

        while let Some(state) = queue.pop_front() {
            for next in self.next_states(&state) {
                if visited.insert(next.clone()) {
                    queue.push_back(next.clone());
                }
            }
        }

        visited
    }

    /// A cycle reachable from `start`, if any.
    ///
    /// The returned states form the cycle in traversal order; the first state
    /// follows the last one.
    pub fn find_cycle_from(&self, start: &StateId) -> Option<Vec<StateId>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            OnStack,
            Done,
        }

        let mut marks: HashMap<&StateId, Mark> = HashMap::new();
        // (state, index of next successor to visit)
        let mut stack: Vec<(&StateId, usize)> = vec![(start, 0)];
        marks.insert(start, Mark::OnStack);

        while let Some(top) = stack.last_mut() {
            let (state, index) = *top;
            top.1 += 1;
            let Some(next) = self.next_states(state).get(index) else {
                marks.insert(state, Mark::Done);
                stack.pop();
                continue;
            };

            match marks.get(next) {
                Some(Mark::OnStack) => {
                    let from = stack
                        .iter()
                        .position(|(entry, _)| *entry == next)
                        .unwrap_or(0);
                    return Some(
                        stack[from..]
                            .iter()
                            .map(|(entry, _)| (*entry).clone())
                            .collect(),
                    );
                }
                Some(Mark::Done) => {}
                None => {
                    marks.insert(next, Mark::OnStack);
                    stack.push((next, 0));
                }
            }
        }

        None
    }

    /// Length of the longest path from `start` to a terminal state.
    ///
    /// `None` when a cycle is reachable from `start`.
    pub fn depth_from(&self, start: &StateId) -> Option<usize> {
        if self.find_cycle_from(start).is_some() {
            return None;
        }

        let mut depths: HashMap<&StateId, usize> = HashMap::new();
        let mut stack: Vec<(&StateId, bool)> = vec![(start, false)];

        while let Some((state, expanded)) = stack.pop() {
            if depths.contains_key(state) {
                continue;
            }
            let successors = self.next_states(state);
            if expanded {
                let depth = successors
                    .iter()
                    .filter_map(|next| depths.get(next))
                    .map(|depth| depth + 1)
                    .max()
                    .unwrap_or(0);
                depths.insert(state, depth);
            } else {
                stack.push((state, true));
                for next in successors {
                    if !depths.contains_key(next) {
                        stack.push((next, false));
                    }
                }
            }
        }

        depths.get(start).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> TransitionGraph {
        TransitionGraph::from_transitions(
            edges
                .iter()
                .map(|(before, after)| Transition::new(*before, *after)),
        )
    }

    #[test]
    fn next_states_keep_artifact_order() {
        let g = graph(&[("A", "C"), ("A", "B"), ("B", "D")]);
        assert_eq!(g.next_states(&"A".into()), ["C", "B"]);
        assert_eq!(g.state_count(), 2);
        assert_eq!(g.transition_count(), 3);
    }

    #[test]
    fn states_without_transitions_are_terminal() {
        let g = graph(&[("A", "B")]);
        assert!(!g.is_terminal(&"A".into()));
        assert!(g.is_terminal(&"B".into()));
        assert!(g.is_terminal(&"never-seen".into()));
        assert!(g.next_states(&"B".into()).is_empty());
    }

    #[test]
    fn reachable_states_include_start() {
        let g = graph(&[("A", "B"), ("B", "C"), ("X", "Y")]);
        let reachable = g.reachable_from(&"A".into());
        assert_eq!(reachable.len(), 3);
        assert!(!reachable.contains("X"));
    }

    #[test]
    fn finds_reachable_cycle() {
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "B"), ("A", "D")]);
        let cycle = g.find_cycle_from(&"A".into()).expect("cycle expected");
        assert_eq!(cycle, vec![StateId::from("B"), StateId::from("C")]);
        assert_eq!(g.depth_from(&"A".into()), None);
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let g = graph(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("D", "E")]);
        assert!(g.find_cycle_from(&"A".into()).is_none());
        assert_eq!(g.depth_from(&"A".into()), Some(3));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let g = graph(&[("A", "A")]);
        assert_eq!(g.find_cycle_from(&"A".into()), Some(vec![StateId::from("A")]));
    }

    #[test]
    fn terminal_start_has_zero_depth() {
        let g = graph(&[]);
        assert_eq!(g.depth_from(&"A".into()), Some(0));
    }
}

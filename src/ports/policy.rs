//! Policy port - picks the next state for the side to move.

use serde::{Deserialize, Serialize};

use crate::{Result, identifiers::StateId, types::Action};

/// A selected move: the state it leads to, the column it affected and the
/// value that made it the best choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub state: StateId,
    pub action: Action,
    pub value: f64,
}

/// Anything able to choose a single best successor of a state.
pub trait SuccessorPolicy {
    /// Human-readable name used in logs and error messages.
    fn name(&self) -> String;

    /// Choose the best successor of `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TerminalState`] when `state` has no successors
    /// and [`crate::Error::UnreachableValue`] when none of its successors
    /// carries a learned value.
    fn best_next_state(&self, state: &StateId) -> Result<Choice>;
}

impl<P: SuccessorPolicy + ?Sized> SuccessorPolicy for &P {
    fn name(&self) -> String {
        (**self).name()
    }

    fn best_next_state(&self, state: &StateId) -> Result<Choice> {
        (**self).best_next_state(state)
    }
}

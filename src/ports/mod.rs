//! Ports (trait boundaries) for external dependencies.
//!
//! The walk only needs two things from the outside world: a way to read the
//! artifacts and something that can pick the next state. Adapters for the
//! first live in [`crate::adapters`]; [`crate::agent::ValueTableAgent`] is the
//! production implementation of the second.

pub mod artifacts;
pub mod policy;

pub use artifacts::ArtifactReader;
pub use policy::{Choice, SuccessorPolicy};

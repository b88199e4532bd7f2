//! Artifact port - where transition and value tables come from.

use std::path::Path;

use crate::{
    Result,
    artifact::{Transition, ValueRecord},
};

/// Port for reading the externally produced artifacts.
///
/// Implementations must return rows in their original order; value-table tie
/// breaking depends on it.
///
/// # Examples
///
/// ```no_run
/// use critpath::adapters::CsvArtifactReader;
/// use critpath::ports::ArtifactReader;
/// use std::path::Path;
///
/// let reader = CsvArtifactReader::new();
/// let transitions = reader.read_transitions(Path::new("transitions.csv"))?;
/// println!("{} transitions", transitions.len());
/// # Ok::<(), critpath::Error>(())
/// ```
pub trait ArtifactReader {
    /// Read every `(state_before, state_after)` row.
    ///
    /// # Errors
    ///
    /// Returns a load error if the artifact is missing, unreadable, or any
    /// row does not have exactly two fields.
    fn read_transitions(&self, location: &Path) -> Result<Vec<Transition>>;

    /// Read every value row of one agent.
    ///
    /// # Errors
    ///
    /// Returns a load error if the artifact is missing, unreadable, or any
    /// row does not have exactly five well-formed fields.
    fn read_value_records(&self, location: &Path) -> Result<Vec<ValueRecord>>;
}

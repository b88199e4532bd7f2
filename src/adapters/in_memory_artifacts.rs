//! In-memory artifact store for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use crate::{
    Result,
    artifact::{ArtifactKind, Transition, ValueRecord, parse_transitions, parse_value_records},
    error::Error,
    ports::ArtifactReader,
};

/// Artifact text held in memory and parsed exactly like files on disk.
///
/// Clones share the same storage.
///
/// # Examples
///
/// ```
/// use critpath::adapters::InMemoryArtifacts;
/// use critpath::ports::ArtifactReader;
/// use std::path::Path;
///
/// let store = InMemoryArtifacts::new();
/// store.insert("transitions.csv", "A,B\nA,C\n");
/// let rows = store.read_transitions(Path::new("transitions.csv"))?;
/// assert_eq!(rows.len(), 2);
/// # Ok::<(), critpath::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryArtifacts {
    storage: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl InMemoryArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) the artifact text at `location`.
    pub fn insert(&self, location: impl Into<PathBuf>, contents: impl Into<String>) {
        self.storage
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(location.into(), contents.into());
    }

    /// Number of stored artifacts.
    pub fn count(&self) -> usize {
        self.storage
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn contents(&self, artifact: ArtifactKind, location: &Path) -> Result<String> {
        self.storage
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(location)
            .cloned()
            .ok_or_else(|| Error::MissingArtifact {
                artifact,
                path: location.to_path_buf(),
            })
    }
}

impl ArtifactReader for InMemoryArtifacts {
    fn read_transitions(&self, location: &Path) -> Result<Vec<Transition>> {
        let text = self.contents(ArtifactKind::Transitions, location)?;
        parse_transitions(text.as_bytes(), &location.display().to_string())
    }

    fn read_value_records(&self, location: &Path) -> Result<Vec<ValueRecord>> {
        let text = self.contents(ArtifactKind::Values, location)?;
        parse_value_records(text.as_bytes(), &location.display().to_string())
    }
}

//! File-backed CSV implementation of the artifact port.

use std::{fs::File, io::BufReader, path::Path};

use crate::{
    Result,
    artifact::{ArtifactKind, Transition, ValueRecord, parse_transitions, parse_value_records},
    error::Error,
    ports::ArtifactReader,
};

/// Reads headerless CSV artifacts from the file system.
///
/// # Examples
///
/// ```no_run
/// use critpath::adapters::CsvArtifactReader;
/// use critpath::ports::ArtifactReader;
/// use std::path::Path;
///
/// let reader = CsvArtifactReader::new();
/// let records = reader.read_value_records(Path::new("SimpleQL_a.csv"))?;
/// # Ok::<(), critpath::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvArtifactReader;

impl CsvArtifactReader {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, artifact: ArtifactKind, path: &Path) -> Result<BufReader<File>> {
        if !path.is_file() {
            return Err(Error::MissingArtifact {
                artifact,
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open {artifact} artifact {}", path.display()),
            source,
        })?;
        Ok(BufReader::new(file))
    }
}

impl ArtifactReader for CsvArtifactReader {
    fn read_transitions(&self, location: &Path) -> Result<Vec<Transition>> {
        let reader = self.open(ArtifactKind::Transitions, location)?;
        let transitions = parse_transitions(reader, &location.display().to_string())?;
        log::info!(
            "read {} transitions from {}",
            transitions.len(),
            location.display()
        );
        Ok(transitions)
    }

    fn read_value_records(&self, location: &Path) -> Result<Vec<ValueRecord>> {
        let reader = self.open(ArtifactKind::Values, location)?;
        let records = parse_value_records(reader, &location.display().to_string())?;
        log::info!(
            "read {} value records from {}",
            records.len(),
            location.display()
        );
        Ok(records)
    }
}

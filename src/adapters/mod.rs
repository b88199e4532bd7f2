//! Adapters implementing domain ports.
//!
//! `CsvArtifactReader` reads artifacts from disk. `InMemoryArtifacts` keeps
//! artifact text in memory so tests can exercise the same parsing without
//! touching the file system.

pub mod csv_artifacts;
pub mod in_memory_artifacts;

pub use csv_artifacts::CsvArtifactReader;
pub use in_memory_artifacts::InMemoryArtifacts;

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use critpath::{GameSide, Transition, ValueRecord};
use tempfile::TempDir;

/// Temporary directory holding artifact files.
pub struct ArtifactDir {
    dir: TempDir,
}

impl ArtifactDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` inside the directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write artifact");
        path
    }

    pub fn write_transitions(&self, name: &str, transitions: &[Transition]) -> PathBuf {
        let lines: Vec<String> = transitions
            .iter()
            .map(|t| format!("{},{}", t.before, t.after))
            .collect();
        self.write(name, &(lines.join("\n") + "\n"))
    }

    pub fn write_values(&self, name: &str, records: &[ValueRecord]) -> PathBuf {
        let lines: Vec<String> = records
            .iter()
            .map(|r| {
                format!(
                    "{},{},{},{},{}",
                    r.before,
                    r.after,
                    r.acting_side.code(),
                    r.action,
                    r.value
                )
            })
            .collect();
        self.write(name, &(lines.join("\n") + "\n"))
    }
}

/// A complete game tree rooted at `"s"`: every state above `depth` has
/// `branching` children named by appending the column played.
pub struct SyntheticGame {
    pub transitions: Vec<Transition>,
    pub values_a: Vec<ValueRecord>,
    pub values_b: Vec<ValueRecord>,
}

pub const SYNTHETIC_ROOT: &str = "s";

impl SyntheticGame {
    pub fn complete(branching: u32, depth: usize) -> Self {
        let mut transitions = Vec::new();
        let mut values_a = Vec::new();
        let mut values_b = Vec::new();
        let mut frontier = vec![SYNTHETIC_ROOT.to_string()];

        for ply in 0..depth {
            let side = if ply % 2 == 0 {
                GameSide::SideA
            } else {
                GameSide::SideB
            };
            let mut next_frontier = Vec::new();
            for state in &frontier {
                for column in 0..branching {
                    let child = format!("{state}{column}");
                    transitions.push(Transition::new(state.as_str(), child.as_str()));
                    let record = ValueRecord::new(
                        state.as_str(),
                        child.as_str(),
                        side,
                        column,
                        pseudo_value(&child),
                    );
                    match side {
                        GameSide::SideA => values_a.push(record),
                        GameSide::SideB => values_b.push(record),
                    }
                    next_frontier.push(child);
                }
            }
            frontier = next_frontier;
        }

        Self {
            transitions,
            values_a,
            values_b,
        }
    }
}

/// Deterministic value in `[-1, 1)` with deliberate ties.
pub fn pseudo_value(label: &str) -> f64 {
    let hash = label
        .bytes()
        .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    ((hash % 8) as f64) / 4.0 - 1.0
}

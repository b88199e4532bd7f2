//! Row shapes of the externally produced artifacts and their CSV parser.
//!
//! Both artifacts are headerless CSV:
//!
//! | artifact | columns |
//! |----------|---------|
//! | transitions | `state_before, state_after` |
//! | values | `state_before, state_after, acting_side, affected_action, value` |

use std::{fmt, io::Read};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    identifiers::StateId,
    types::{Action, GameSide},
};

const TRANSITION_FIELDS: usize = 2;
const VALUE_FIELDS: usize = 5;

/// Which artifact a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    Transitions,
    Values,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::Transitions => "transition",
            ArtifactKind::Values => "value",
        };
        f.write_str(label)
    }
}

/// One legal move: `before` can be followed by `after`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub before: StateId,
    pub after: StateId,
}

impl Transition {
    pub fn new(before: impl Into<StateId>, after: impl Into<StateId>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }
}

/// Learned value of making the transition `before -> after`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRecord {
    pub before: StateId,
    pub after: StateId,
    pub acting_side: GameSide,
    pub action: Action,
    pub value: f64,
}

impl ValueRecord {
    pub fn new(
        before: impl Into<StateId>,
        after: impl Into<StateId>,
        acting_side: GameSide,
        column: u32,
        value: f64,
    ) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
            acting_side,
            action: Action::new(column),
            value,
        }
    }
}

/// Parse a transitions artifact. `origin` names the source in error messages.
pub fn parse_transitions<R: Read>(reader: R, origin: &str) -> Result<Vec<Transition>> {
    let mut rows = RowReader::new(reader, ArtifactKind::Transitions, origin);
    let mut transitions = Vec::new();
    while let Some(record) = rows.next_record(TRANSITION_FIELDS)? {
        transitions.push(Transition {
            before: rows.state(&record, 0, "state_before")?,
            after: rows.state(&record, 1, "state_after")?,
        });
    }
    Ok(transitions)
}

/// Parse a value artifact, keeping rows in file order.
pub fn parse_value_records<R: Read>(reader: R, origin: &str) -> Result<Vec<ValueRecord>> {
    let mut rows = RowReader::new(reader, ArtifactKind::Values, origin);
    let mut records = Vec::new();
    while let Some(record) = rows.next_record(VALUE_FIELDS)? {
        let side_code: u8 = rows.number(&record, 2, "acting_side")?;
        let acting_side =
            GameSide::try_from(side_code).map_err(|_| rows.invalid(&record, 2, "acting_side"))?;
        let column: u32 = rows.number(&record, 3, "affected_action")?;
        let value: f64 = rows.number(&record, 4, "value")?;
        if !value.is_finite() {
            return Err(rows.invalid(&record, 4, "value"));
        }

        records.push(ValueRecord {
            before: rows.state(&record, 0, "state_before")?,
            after: rows.state(&record, 1, "state_after")?,
            acting_side,
            action: Action::new(column),
            value,
        });
    }
    Ok(records)
}

struct RowReader<'a, R: Read> {
    inner: csv::Reader<R>,
    artifact: ArtifactKind,
    origin: &'a str,
    record: StringRecord,
}

impl<'a, R: Read> RowReader<'a, R> {
    fn new(reader: R, artifact: ArtifactKind, origin: &'a str) -> Self {
        let inner = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        Self {
            inner,
            artifact,
            origin,
            record: StringRecord::new(),
        }
    }

    fn next_record(&mut self, expected: usize) -> Result<Option<StringRecord>> {
        if !self.inner.read_record(&mut self.record)? {
            return Ok(None);
        }
        if self.record.len() != expected {
            return Err(Error::MalformedRow {
                artifact: self.artifact,
                origin: self.origin.to_string(),
                line: line_of(&self.record),
                expected,
                got: self.record.len(),
            });
        }
        Ok(Some(self.record.clone()))
    }

    fn state(&self, record: &StringRecord, index: usize, field: &'static str) -> Result<StateId> {
        match record.get(index) {
            Some(raw) if !raw.is_empty() => Ok(StateId::new(raw)),
            _ => Err(self.invalid(record, index, field)),
        }
    }

    fn number<T: std::str::FromStr>(
        &self,
        record: &StringRecord,
        index: usize,
        field: &'static str,
    ) -> Result<T> {
        record
            .get(index)
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| self.invalid(record, index, field))
    }

    fn invalid(&self, record: &StringRecord, index: usize, field: &'static str) -> Error {
        Error::InvalidField {
            artifact: self.artifact,
            origin: self.origin.to_string(),
            line: line_of(record),
            field,
            value: record.get(index).unwrap_or_default().to_string(),
        }
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |pos| pos.line())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transition_rows_in_order() {
        let data = "BAUAAAAAAA==,BAUQAAAAAA==\nBAUAAAAAAA==,BAUEAAAAAA==\n";
        let rows = parse_transitions(data.as_bytes(), "inline").unwrap();
        assert_eq!(
            rows,
            vec![
                Transition::new("BAUAAAAAAA==", "BAUQAAAAAA=="),
                Transition::new("BAUAAAAAAA==", "BAUEAAAAAA=="),
            ]
        );
    }

    #[test]
    fn parses_value_rows() {
        let data = "A,B,1,3,0.9\nA,C,2,5,-1E-2\n";
        let rows = parse_value_records(data.as_bytes(), "inline").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ValueRecord::new("A", "B", GameSide::SideA, 3, 0.9));
        assert_eq!(rows[1].acting_side, GameSide::SideB);
        assert_eq!(rows[1].action, Action::new(5));
        assert!((rows[1].value + 0.01).abs() < 1e-12);
    }

    #[test]
    fn wrong_column_count_is_malformed() {
        let err = parse_transitions("A,B\nA,B,C\n".as_bytes(), "inline").unwrap_err();
        match err {
            Error::MalformedRow {
                line,
                expected,
                got,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 2);
                assert_eq!(got, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn value_rows_reject_unknown_side_and_nan() {
        let err = parse_value_records("A,B,0,3,0.5\n".as_bytes(), "inline").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidField {
                field: "acting_side",
                ..
            }
        ));

        let err = parse_value_records("A,B,1,3,NaN\n".as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "value", .. }));
        assert!(err.is_load_error());
    }

    #[test]
    fn non_numeric_action_is_rejected() {
        let err = parse_value_records("A,B,1,left,0.5\n".as_bytes(), "inline").unwrap_err();
        match err {
            Error::InvalidField { field, value, .. } => {
                assert_eq!(field, "affected_action");
                assert_eq!(value, "left");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_state_is_rejected() {
        let err = parse_transitions("A,\n".as_bytes(), "inline").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidField {
                field: "state_after",
                ..
            }
        ));
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse_transitions("".as_bytes(), "inline").unwrap().is_empty());
    }
}

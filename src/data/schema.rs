use thiserror::Error;

use super::model::{Dataset, FieldValue, Row};
use super::reader::Record;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("line {line}: expected {expected} fields like the first record, found {found}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: field '{field}' needs column {index}, record has {found} fields")]
    MissingField {
        line: usize,
        field: &'static str,
        index: usize,
        found: usize,
    },

    #[error("line {line}: field '{field}' is not numeric: '{value}'")]
    NonNumeric {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{0}' is text and cannot be plotted")]
    TextField(String),
}

// ---------------------------------------------------------------------------
// Field declarations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    /// Float with an optional trailing `s` unit.
    Seconds,
    /// Kept verbatim, never plotted.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Index(usize),
    /// The last field of the record, whatever the width.
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub position: Position,
}

const fn field(name: &'static str, kind: FieldKind, index: usize) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        position: Position::Index(index),
    }
}

// ---------------------------------------------------------------------------
// LogSchema
// ---------------------------------------------------------------------------

/// A named, typed column layout for one kind of benchmark log.
#[derive(Debug, Clone, Copy)]
pub struct LogSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// `compare.log`: sizes, objective values and times of both variants.
pub const COMPARE: LogSchema = LogSchema {
    name: "compare",
    fields: &[
        field("ls_size", FieldKind::Integer, 0),
        field("lls_size", FieldKind::Integer, 1),
        field("ls_value", FieldKind::Float, 2),
        field("lls_value", FieldKind::Float, 3),
        field("ls_time", FieldKind::Seconds, 4),
        field("lls_time", FieldKind::Seconds, 5),
    ],
};

/// `time_diff.log`: sizes and times of both variants.
pub const TIME_DIFF: LogSchema = LogSchema {
    name: "time_diff",
    fields: &[
        field("ls_size", FieldKind::Integer, 0),
        field("lls_size", FieldKind::Integer, 1),
        field("ls_time", FieldKind::Seconds, 2),
        field("lls_time", FieldKind::Seconds, 3),
    ],
};

/// `10_to_100.log`: one line per target feature count.
pub const FEATURES: LogSchema = LogSchema {
    name: "features",
    fields: &[
        field("target_features", FieldKind::Integer, 0),
        field("eta", FieldKind::Text, 1),
        field("epsilon", FieldKind::Text, 2),
        field("delta", FieldKind::Text, 3),
        field("selected", FieldKind::Text, 4),
        field("train_time", FieldKind::Seconds, 5),
        field("objective", FieldKind::Float, 6),
        field("sse", FieldKind::Float, 7),
        FieldSpec {
            name: "test_r2",
            kind: FieldKind::Float,
            position: Position::Last,
        },
    ],
};

impl LogSchema {
    /// Smallest record width that satisfies every declared position.
    pub fn min_width(&self) -> usize {
        let max_index = self
            .fields
            .iter()
            .filter_map(|f| match f.position {
                Position::Index(i) => Some(i + 1),
                Position::Last => None,
            })
            .max()
            .unwrap_or(0);
        let has_last = self.fields.iter().any(|f| f.position == Position::Last);
        if has_last {
            max_index + 1
        } else {
            max_index
        }
    }

    /// Check every record against the schema and coerce numeric fields.
    pub fn validate(&self, records: &[Record]) -> Result<Dataset, SchemaError> {
        let expected = records.first().map(Record::len);
        let min_width = self.min_width();

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            if let Some(expected) = expected {
                if record.len() != expected {
                    return Err(SchemaError::InconsistentWidth {
                        line: record.line,
                        expected,
                        found: record.len(),
                    });
                }
            }
            rows.push(self.validate_record(record, min_width)?);
        }

        log::debug!("{}: validated {} rows", self.name, rows.len());
        Ok(Dataset {
            schema: self.name,
            fields: self.fields.to_vec(),
            rows,
        })
    }

    fn validate_record(&self, record: &Record, min_width: usize) -> Result<Row, SchemaError> {
        let values = self
            .fields
            .iter()
            .map(|spec| {
                let index = match spec.position {
                    Position::Index(i) => i,
                    Position::Last => min_width.max(record.len()).saturating_sub(1),
                };
                if index >= record.len() {
                    return Err(SchemaError::MissingField {
                        line: record.line,
                        field: spec.name,
                        index,
                        found: record.len(),
                    });
                }
                parse_value(spec, &record.fields[index], record.line)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Row {
            line: record.line,
            values,
        })
    }
}

fn parse_value(spec: &FieldSpec, raw: &str, line: usize) -> Result<FieldValue, SchemaError> {
    let text = match spec.kind {
        FieldKind::Text => return Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Seconds => raw.strip_suffix('s').unwrap_or(raw),
        FieldKind::Integer | FieldKind::Float => raw,
    };

    let non_numeric = || SchemaError::NonNumeric {
        line,
        field: spec.name,
        value: raw.to_string(),
    };

    let value = if spec.kind == FieldKind::Integer {
        text.parse::<i64>().map_err(|_| non_numeric())? as f64
    } else {
        text.parse::<f64>().map_err(|_| non_numeric())?
    };
    if !value.is_finite() {
        return Err(non_numeric());
    }
    Ok(FieldValue::Number(value))
}

use std::fmt;

use super::schema::{FieldKind, FieldSpec, SchemaError};

// ---------------------------------------------------------------------------
// FieldValue – a single validated cell
// ---------------------------------------------------------------------------

/// A validated cell. Numeric kinds are coerced at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one record after schema validation
// ---------------------------------------------------------------------------

/// One typed record; `values` lines up with [`Dataset::fields`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub line: usize,
    pub values: Vec<FieldValue>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete validated log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Dataset {
    /// Name of the schema that produced this dataset.
    pub schema: &'static str,
    pub fields: Vec<FieldSpec>,
    /// Rows in file order.
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn position(&self, name: &str) -> Result<usize, SchemaError> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| SchemaError::UnknownField(name.to_string()))
    }

    /// The numeric column called `name`, one value per row.
    pub fn series(&self, name: &str) -> Result<Vec<f64>, SchemaError> {
        let idx = self.position(name)?;
        if self.fields[idx].kind == FieldKind::Text {
            return Err(SchemaError::TextField(name.to_string()));
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row.values[idx].as_f64().unwrap_or(f64::NAN))
            .collect())
    }

    /// Column names in schema order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

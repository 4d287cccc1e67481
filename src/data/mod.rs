/// Data layer: raw records, typed schemas, and the validated dataset.
///
/// Architecture:
/// ```text
///  compare.log / time_diff.log / 10_to_100.log
///        │
///        ▼
///   ┌──────────┐
///   │  reader  │  non-empty lines → Vec<Record> (string fields)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema  │  named, typed fields → Dataset (fails fast)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model   │  Dataset::series("ls_time") → Vec<f64>
///   └──────────┘
/// ```

pub mod model;
pub mod reader;
pub mod schema;

use std::path::Path;

use anyhow::{Context, Result};

use model::Dataset;
use schema::LogSchema;

/// Read `path` and validate it against `schema`.
pub fn load_log(path: &Path, schema: &LogSchema) -> Result<Dataset> {
    let records = reader::read_records(path)?;
    let dataset = schema
        .validate(&records)
        .with_context(|| format!("validating {} as a {} log", path.display(), schema.name))?;
    log::info!(
        "Loaded {} rows from {} ({} schema)",
        dataset.len(),
        path.display(),
        schema.name
    );
    Ok(dataset)
}

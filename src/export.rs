use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::{Map, Value as JsonValue};

use crate::data::model::{Dataset, FieldValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// Write `dataset` with named columns in the given format.
pub fn write_dataset<W: Write>(dataset: &Dataset, format: ExportFormat, out: W) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(dataset, out),
        ExportFormat::Json => write_json(dataset, out),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn write_csv<W: Write>(dataset: &Dataset, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(dataset.field_names())
        .context("writing CSV header")?;
    for row in &dataset.rows {
        writer
            .write_record(row.values.iter().map(FieldValue::to_string))
            .with_context(|| format!("writing CSV row for line {}", row.line))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented: `[{"ls_size": 5, ...}, ...]`.
fn write_json<W: Write>(dataset: &Dataset, mut out: W) -> Result<()> {
    let names = dataset.field_names();
    let records: Vec<JsonValue> = dataset
        .rows
        .iter()
        .map(|row| {
            let obj: Map<String, JsonValue> = names
                .iter()
                .zip(&row.values)
                .map(|(name, value)| (name.to_string(), json_value(value)))
                .collect();
            JsonValue::Object(obj)
        })
        .collect();
    serde_json::to_writer_pretty(&mut out, &records).context("writing JSON")?;
    writeln!(out)?;
    Ok(())
}

fn json_value(value: &FieldValue) -> JsonValue {
    match value {
        FieldValue::Number(v) => JsonValue::from(*v),
        FieldValue::Text(s) => JsonValue::from(s.as_str()),
    }
}

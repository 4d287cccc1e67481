use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: no field at index {index} (record has {found} fields)")]
    MissingField {
        line: usize,
        index: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Record – one non-empty log line
// ---------------------------------------------------------------------------

/// One log line split on single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source file.
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    /// Bounds-checked field access.
    pub fn field(&self, index: usize) -> Result<&str, ReadError> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or(ReadError::MissingField {
                line: self.line,
                index,
                found: self.fields.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read every non-empty line of `path` as a [`Record`].
pub fn read_records(path: &Path) -> Result<Vec<Record>, ReadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&text);
    log::debug!("{}: {} records", path.display(), records.len());
    Ok(records)
}

/// Split `text` into records.
///
/// Lines are trimmed and blank lines dropped. Fields are separated by a single
/// `' '`, so a double space yields an empty field.
pub fn parse_records(text: &str) -> Vec<Record> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = raw.trim();
            if line.is_empty() {
                return None;
            }
            Some(Record {
                line: i + 1,
                fields: line.split(' ').map(str::to_string).collect(),
            })
        })
        .collect()
}

/// Extract column `index` from every record, in file order.
pub fn column(records: &[Record], index: usize) -> Result<Vec<&str>, ReadError> {
    records.iter().map(|r| r.field(index)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use proptest::prelude::*;

    #[test]
    fn one_record_per_non_empty_line() {
        let records = parse_records("1 2 3\n\n4 5 6\n7 8 9\n\n");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].fields, vec!["1", "2", "3"]);
        assert_eq!(records[1].line, 3);
        assert_eq!(records[2].fields, vec!["7", "8", "9"]);
    }

    #[test]
    fn surrounding_whitespace_and_crlf_are_ignored() {
        let records = parse_records("  1 2\r\n3 4 \r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields, vec!["1", "2"]);
        assert_eq!(records[1].fields, vec!["3", "4"]);
    }

    #[test]
    fn consecutive_spaces_produce_empty_fields() {
        let records = parse_records("1  2");
        assert_eq!(records[0].fields, vec!["1", "", "2"]);
    }

    #[test]
    fn compare_line_columns() {
        let records = parse_records("5 6 10.1 10.5 0.01 0.02\n");
        assert_eq!(column(&records, 0).unwrap(), vec!["5"]);
        assert_eq!(column(&records, 1).unwrap(), vec!["6"]);
        assert_eq!(column(&records, 4).unwrap(), vec!["0.01"]);
        assert_eq!(column(&records, 5).unwrap(), vec!["0.02"]);
    }

    #[test]
    fn short_line_is_an_index_error() {
        let records = parse_records("1 2 3\n4 5\n");
        match column(&records, 2) {
            Err(ReadError::MissingField { line, index, found }) => {
                assert_eq!((line, index, found), (2, 2, 2));
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_yields_no_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"").unwrap();
        assert!(read_records(file.path()).unwrap().is_empty());
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10 11 0.5 0.6").unwrap();
        writeln!(file, "12 11 0.7 0.2").unwrap();
        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].field(2).unwrap(), "0.7");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.log");
        let err = read_records(&path).unwrap_err();
        assert!(matches!(err, ReadError::Io { .. }));
        assert!(err.to_string().contains("compare.log"));
    }

    proptest! {
        #[test]
        fn column_i_of_line_j_round_trips(
            rows in prop::collection::vec(prop::collection::vec(0u32..100_000, 4), 1..40),
            i in 0usize..4,
        ) {
            let text: String = rows
                .iter()
                .map(|r| r.iter().map(u32::to_string).collect::<Vec<_>>().join(" ") + "\n")
                .collect();
            let records = parse_records(&text);
            let col = column(&records, i).unwrap();
            prop_assert_eq!(col.len(), rows.len());
            for (j, value) in col.iter().enumerate() {
                prop_assert_eq!(value.to_string(), rows[j][i].to_string());
            }
        }
    }
}

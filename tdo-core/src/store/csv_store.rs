//! CSV-backed store: one record per item, fields positional, the whole
//! file rewritten on every save.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use tracing::debug;

use super::{Store, StoreError};
use crate::todo::TodoItem;

/// Fields of a stored record, in order: id, title, description, is_done,
/// created_at, updated_at. Positional, never name-keyed.
const FIELD_COUNT: usize = 6;

/// Stores the todo list as a flat CSV file.
///
/// Saving rewrites the complete file in place; there is no locking and no
/// partial-write recovery. An interrupted save can leave the file
/// truncated, which the persistence contract accepts.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Store for CsvStore {
    /// Reads the whole file. A file that does not exist yet is an empty
    /// list, not an error.
    fn load(&self) -> Result<Vec<TodoItem>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;

        let records = parse_records(&content);
        let mut todos = Vec::with_capacity(records.len());
        for (index, fields) in records.iter().enumerate() {
            if fields.len() != FIELD_COUNT {
                return Err(StoreError::FieldCount {
                    path: self.path.clone(),
                    record: index + 1,
                    expected: FIELD_COUNT,
                    found: fields.len(),
                });
            }
            let todo = TodoItem::from_fields(
                &fields[0], &fields[1], &fields[2], &fields[3], &fields[4], &fields[5],
            )
            .map_err(|source| StoreError::Format {
                path: self.path.clone(),
                record: index + 1,
                source,
            })?;
            todos.push(todo);
        }
        debug!(count = todos.len(), path = %self.path.display(), "loaded store");
        Ok(todos)
    }

    /// Overwrites the file with exactly the given sequence, in order.
    fn save(&self, todos: &[TodoItem]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let mut content = String::new();
        for todo in todos {
            content.push_str(&format_record(&[
                &todo.id,
                &todo.title,
                &todo.description,
                &todo.is_done.to_string(),
                &todo.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                &todo.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            ]));
        }
        fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        debug!(count = todos.len(), path = %self.path.display(), "saved store");
        Ok(())
    }
}

/// Renders one record, quoting fields that contain a comma, quote, CR or
/// LF. Embedded quotes are doubled.
fn format_record(fields: &[&str]) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        if field.contains(['"', ',', '\n', '\r']) {
            line.push('"');
            line.push_str(&field.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(field);
        }
    }
    line.push('\n');
    line
}

/// Splits file content into records of unquoted field values.
///
/// Quoted fields may carry embedded commas, doubled quotes, and newlines.
/// Blank lines between records are skipped.
fn parse_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut record_started = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                record_started = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                record_started = true;
            }
            '\n' => {
                if record_started {
                    fields.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut fields));
                    record_started = false;
                }
            }
            '\r' => {}
            _ => {
                field.push(c);
                record_started = true;
            }
        }
    }
    // A trailing record with no final newline still counts.
    if record_started {
        fields.push(field);
        records.push(fields);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn mk_store() -> (CsvStore, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let store = CsvStore::new(tmp.path().join("todo.csv"));
        (store, tmp)
    }

    #[test]
    fn missing_file_loads_as_empty_list() {
        let (store, _tmp) = mk_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_plain_items() {
        let (store, _tmp) = mk_store();
        let mut first = TodoItem::new("buy milk", "2% lowfat");
        first.mark_done();
        let second = TodoItem::new("walk the dog", "");

        store.save(&[first.clone(), second.clone()]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![first, second]);
    }

    #[test]
    fn round_trips_fields_with_commas_quotes_and_newlines() {
        let (store, _tmp) = mk_store();
        let todo = TodoItem::new(
            "say \"hello\", world",
            "line one\nline two, with a comma",
        );
        store.save(std::slice::from_ref(&todo)).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![todo]);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let (store, _tmp) = mk_store();
        store.save(&[TodoItem::new("old", "")]).unwrap();
        let replacement = TodoItem::new("new", "");
        store.save(std::slice::from_ref(&replacement)).unwrap();
        assert_eq!(store.load().unwrap(), vec![replacement]);
    }

    #[test]
    fn malformed_boolean_names_the_field_and_record() {
        let (store, _tmp) = mk_store();
        fs::write(
            store.path(),
            "abc,title,desc,maybe,2026-08-06T09:30:00Z,2026-08-06T09:30:00Z\n",
        )
        .unwrap();

        match store.load().unwrap_err() {
            StoreError::Format { record, source, .. } => {
                assert_eq!(record, 1);
                assert_eq!(source.field, "is_done");
            }
            other => panic!("expected a format error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_field_count_names_the_record() {
        let (store, _tmp) = mk_store();
        fs::write(store.path(), "only,three,fields\n").unwrap();

        match store.load().unwrap_err() {
            StoreError::FieldCount { record, found, .. } => {
                assert_eq!(record, 1);
                assert_eq!(found, 3);
            }
            other => panic!("expected a field count error, got {other:?}"),
        }
    }

    #[test]
    fn blank_lines_between_records_are_skipped() {
        let (store, _tmp) = mk_store();
        let first = TodoItem::new("first", "");
        let second = TodoItem::new("second", "");
        store.save(&[first.clone(), second.clone()]).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let spaced = content.replace('\n', "\n\n");
        fs::write(store.path(), spaced).unwrap();

        assert_eq!(store.load().unwrap(), vec![first, second]);
    }

    #[test]
    fn record_codec_quotes_only_when_needed() {
        let line = format_record(&["plain", "with,comma", "with \"quote\"", "x"]);
        assert_eq!(line, "plain,\"with,comma\",\"with \"\"quote\"\"\",x\n");

        let parsed = parse_records(&line);
        assert_eq!(
            parsed,
            vec![vec![
                "plain".to_string(),
                "with,comma".to_string(),
                "with \"quote\"".to_string(),
                "x".to_string(),
            ]]
        );
    }

    #[test]
    fn parser_accepts_a_trailing_record_without_newline() {
        let parsed = parse_records("a,b\nc,d");
        assert_eq!(
            parsed,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ]
        );
    }
}

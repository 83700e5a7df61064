//! The persistence port and its flat-file CSV implementation.

mod csv_store;

pub use csv_store::CsvStore;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::todo::{FormatError, TodoItem};

/// The load/save contract the todo list depends on.
///
/// `load` returns the full stored collection; `save` overwrites it with
/// exactly the given sequence. Both are whole-collection operations; there
/// are no incremental writes.
pub trait Store {
    fn load(&self) -> Result<Vec<TodoItem>, StoreError>;
    fn save(&self, todos: &[TodoItem]) -> Result<(), StoreError>;
}

/// Failures reading or writing the backing file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A stored record holds a field that does not parse.
    #[error("{}: record {}: {}", .path.display(), .record, .source)]
    Format {
        path: PathBuf,
        record: usize,
        #[source]
        source: FormatError,
    },
    /// A stored record has the wrong number of fields.
    #[error("{}: record {}: expected {} fields, got {}", .path.display(), .record, .expected, .found)]
    FieldCount {
        path: PathBuf,
        record: usize,
        expected: usize,
        found: usize,
    },
}

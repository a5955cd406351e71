use std::path::PathBuf;

/// Errors raised by the data layer.
///
/// Load and unknown-table errors are structural: the registry (or the query
/// against it) is unusable and the operation must abort. Row- and
/// field-level errors are local to one record; page assemblers catch them
/// per item and continue their batch.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A declared source file could not be read.
    #[error("failed to read data source {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A declared source file is not valid JSON.
    #[error("failed to parse data source {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A source document is missing a required top-level key.
    #[error("document {path:?} is missing required key {key:?}")]
    Document { path: PathBuf, key: &'static str },

    /// Two source documents declared the same table name.
    #[error("duplicate table name {name:?} declared by {path:?}")]
    DuplicateTable { path: PathBuf, name: String },

    /// No table was registered under the requested name.
    #[error("unknown table {0:?}")]
    UnknownTable(String),

    /// A required lookup found no row for the given id.
    #[error("table {table:?} has no row {id:?}")]
    RowNotFound { table: String, id: String },

    /// A row record lacks a declared raw field.
    #[error("row {id:?} in table {table:?} has no field {field:?}")]
    FieldNotFound {
        table: String,
        id: String,
        field: &'static str,
    },

    /// A raw field value does not have the shape the accessor expects.
    #[error("field {field:?} of row {id:?} in table {table:?} is not {expected}")]
    FieldShape {
        table: String,
        id: String,
        field: &'static str,
        expected: &'static str,
    },

    /// A derived index was queried but its builder was never declared to run.
    #[error("derived index for {0:?} was not built by the loaded source list")]
    IndexNotBuilt(&'static str),
}

impl DataError {
    /// Whether this error is local to a single row, i.e. a batch caller may
    /// skip the affected item and continue.
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            DataError::RowNotFound { .. }
                | DataError::FieldNotFound { .. }
                | DataError::FieldShape { .. }
        )
    }
}

pub type Result<T, E = DataError> = std::result::Result<T, E>;

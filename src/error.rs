use thiserror::Error;

/// Errors raised by the query layer.
///
/// Missing or unparseable metric values are *not* errors; they flow through
/// as `None` and render as blank cells or "No data".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A filter or projection referenced a column the table does not have.
    #[error("missing column '{column}' (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// No institution with this display name in the reference table.
    #[error("unknown institution '{0}'")]
    UnknownInstitution(String),

    /// No institution with this UKPRN in the reference table.
    #[error("unknown UKPRN {0}")]
    UnknownUkprn(i64),
}

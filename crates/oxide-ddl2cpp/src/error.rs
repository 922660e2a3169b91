//! Error types for header generation.

use std::path::PathBuf;

use crate::typemap::UnknownType;

/// Errors that abort a generation run.
///
/// None of these are retried: the run stops at the first error and no
/// further files are written.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Could not open a session with the database.
    #[error("Failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    /// A catalog query failed after the connection was established.
    #[error("Catalog query failed: {0}")]
    Catalog(#[from] sqlx::Error),

    /// A column reports a catalog type with no mapping entry.
    #[error("Unknown column type '{type_name}' for column {schema}.{table}.{column}")]
    UnknownType {
        /// The catalog type name as reported by the database.
        type_name: String,
        /// Schema of the offending table.
        schema: String,
        /// Offending table.
        table: String,
        /// Offending column.
        column: String,
    },

    /// A table without columns cannot be declared.
    #[error("Table {schema}.{table} has no columns")]
    EmptyTable {
        /// Schema name.
        schema: String,
        /// Table name.
        table: String,
    },

    /// Creating a directory or writing a file failed.
    #[error("Filesystem error at '{path}': {source}")]
    Filesystem {
        /// The path being created or written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing generated output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The namespace path contains an empty segment.
    #[error("Invalid namespace path '{0}'")]
    InvalidNamespace(String),

    /// Output was finished while blocks were still open.
    #[error("{0} declaration block(s) left open")]
    UnclosedScopes(usize),
}

impl GenerateError {
    /// Attaches table and column context to an [`UnknownType`].
    pub(crate) fn unknown_type(
        err: UnknownType,
        schema: &str,
        table: &str,
        column: &str,
    ) -> Self {
        Self::UnknownType {
            type_name: err.0,
            schema: schema.to_string(),
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    /// Wraps an IO error with the path it happened on.
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_message_names_column() {
        let err =
            GenerateError::unknown_type(UnknownType("tsvector".into()), "public", "docs", "body");
        assert_eq!(
            err.to_string(),
            "Unknown column type 'tsvector' for column public.docs.body"
        );
    }

    #[test]
    fn test_filesystem_message_names_path() {
        let err = GenerateError::filesystem(
            "tables/public",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("tables/public"));
    }
}

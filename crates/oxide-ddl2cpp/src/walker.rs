//! Catalog walk: one header per table.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::GeneratorConfig;
use crate::emitter::render_header;
use crate::error::{GenerateError, Result};
use crate::schema::{TableDescriptor, TableRef};

/// Extension of generated headers.
pub const HEADER_EXTENSION: &str = "h";

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Tables processed, in catalog order.
    pub tables: Vec<TableRef>,
    /// Files written, in the same order as `tables`.
    pub files: Vec<PathBuf>,
}

impl Summary {
    /// Returns the number of headers written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns whether no header was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Returns `<output_dir>/<schema>/<table>.h`.
///
/// With `lower_case` set, both the schema directory and the file name are
/// lower-cased; otherwise neither is.
#[must_use]
pub fn output_path(output_dir: &Path, schema: &str, table: &str, lower_case: bool) -> PathBuf {
    let (schema_dir, file_name) = if lower_case {
        (
            schema.to_lowercase(),
            format!("{}.{HEADER_EXTENSION}", table.to_lowercase()),
        )
    } else {
        (schema.to_string(), format!("{table}.{HEADER_EXTENSION}"))
    };
    output_dir.join(schema_dir).join(file_name)
}

/// Generates one header per table whose schema matches
/// `config.schema_pattern`.
///
/// Tables are processed one after another in catalog order. The first
/// error stops the run; headers already written are left in place.
///
/// # Errors
///
/// Fails on catalog query errors, unmapped column types, tables without
/// columns, and filesystem errors.
pub async fn generate<C: Catalog>(catalog: &mut C, config: &GeneratorConfig) -> Result<Summary> {
    create_dir(&config.output_dir)?;

    let tables = catalog.tables(&config.schema_pattern).await?;
    info!(
        schema_pattern = %config.schema_pattern,
        count = tables.len(),
        "found tables"
    );

    let mut summary = Summary::default();
    for table in tables {
        let columns = catalog.columns(&table).await?;
        debug!(
            schema = %table.schema,
            table = %table.name,
            columns = columns.len(),
            "read columns"
        );

        let path = output_path(
            &config.output_dir,
            &table.schema,
            &table.name,
            config.lower_case_file_names,
        );
        let descriptor = TableDescriptor::from_parts(table.clone(), columns);
        let header = render_header(&config.namespace, &descriptor)?;

        if let Some(dir) = path.parent() {
            create_dir(dir)?;
        }
        info!("Writing {}", path.display());
        fs::write(&path, header).map_err(|err| GenerateError::filesystem(&path, err))?;

        summary.tables.push(table);
        summary.files.push(path);
    }

    Ok(summary)
}

/// Creates `dir` and its parents. An existing directory is not an error.
fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|err| GenerateError::filesystem(dir, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_preserves_case() {
        let path = output_path(Path::new("tables/"), "Sales", "OrderLines", false);
        assert_eq!(path, PathBuf::from("tables/Sales/OrderLines.h"));
    }

    #[test]
    fn test_output_path_lower_cases_both() {
        let path = output_path(Path::new("tables"), "Sales", "OrderLines", true);
        assert_eq!(path, PathBuf::from("tables/sales/orderlines.h"));
    }

    #[test]
    fn test_output_path_already_lower_case() {
        let folded = output_path(Path::new("out"), "public", "users", true);
        let kept = output_path(Path::new("out"), "public", "users", false);
        assert_eq!(folded, kept);
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        create_dir(&nested).unwrap();
        create_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_create_dir_over_file_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "x").unwrap();

        match create_dir(&file.join("sub")) {
            Err(GenerateError::Filesystem { path, .. }) => assert_eq!(path, file.join("sub")),
            other => panic!("Expected Filesystem error, got {other:?}"),
        }
    }
}

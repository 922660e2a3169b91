//! In-memory catalog.

use regex::Regex;

use super::Catalog;
use crate::error::Result;
use crate::schema::{ColumnDescriptor, TableDescriptor, TableRef};

/// Catalog serving fixed table descriptors.
///
/// Applies the same pattern matching and ordering as the database
/// listing, so it can stand in for [`PgCatalog`](super::PgCatalog).
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: Vec<TableDescriptor>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table.
    #[must_use]
    pub fn table(mut self, table: TableDescriptor) -> Self {
        self.tables.push(table);
        self
    }
}

impl Catalog for MemoryCatalog {
    async fn tables(&mut self, schema_pattern: &str) -> Result<Vec<TableRef>> {
        let pattern = like_to_regex(schema_pattern);
        let mut refs: Vec<TableRef> = self
            .tables
            .iter()
            .filter(|t| pattern.is_match(&t.schema))
            .map(|t| TableRef::new(&t.schema, &t.name))
            .collect();
        refs.sort();
        refs.dedup();
        Ok(refs)
    }

    async fn columns(&mut self, table: &TableRef) -> Result<Vec<ColumnDescriptor>> {
        let mut columns: Vec<ColumnDescriptor> = self
            .tables
            .iter()
            .filter(|t| t.schema == table.schema && t.name == table.name)
            .flat_map(|t| t.columns.iter().cloned())
            .collect();
        columns.sort_by_key(|c| c.ordinal_position);
        Ok(columns)
    }
}

/// Compiles a SQL `LIKE` pattern into an anchored regex.
///
/// `%` matches any run of characters, `_` exactly one, and `\` makes the
/// next character literal.
#[must_use]
pub fn like_to_regex(pattern: &str) -> Regex {
    let mut regex_str = String::from("(?s)^");
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '%' => regex_str.push_str(".*"),
            '_' => regex_str.push('.'),
            '\\' => {
                if let Some(escaped) = chars.next() {
                    regex_str.push_str(&regex::escape(&escaped.to_string()));
                }
            }
            other => regex_str.push_str(&regex::escape(&other.to_string())),
        }
    }

    regex_str.push('$');

    Regex::new(&regex_str).expect("Invalid LIKE pattern regex")
}

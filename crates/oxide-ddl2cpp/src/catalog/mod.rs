//! Catalog sources.
//!
//! The generator only needs two listings from the database: the tables in
//! schemas matching a `LIKE` pattern, and the ordered columns of one table.
//! [`PgCatalog`] reads them from a live PostgreSQL `information_schema`;
//! [`MemoryCatalog`] serves them from descriptors held in memory.

mod memory;
mod postgres;

pub use memory::{MemoryCatalog, like_to_regex};
pub use postgres::PgCatalog;

use crate::error::Result;
use crate::schema::{ColumnDescriptor, TableRef};

/// Source of table and column metadata.
///
/// Calls are made one at a time, in order: the table listing first, then
/// the columns of each table.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Lists `(schema, table)` pairs whose schema matches the SQL `LIKE`
    /// pattern, ordered by schema then table name, without duplicates.
    async fn tables(&mut self, schema_pattern: &str) -> Result<Vec<TableRef>>;

    /// Lists the columns of `table` in ordinal order.
    async fn columns(&mut self, table: &TableRef) -> Result<Vec<ColumnDescriptor>>;
}

//! PostgreSQL `information_schema` catalog.

use sqlx::{Connection, PgConnection};
use tracing::debug;

use super::Catalog;
use crate::config::ConnectionConfig;
use crate::error::{GenerateError, Result};
use crate::schema::{ColumnDescriptor, TableRef};

/// Tables in matching schemas.
///
/// `information_schema` columns are domain types (`sql_identifier`,
/// `cardinal_number`, ...), so everything is cast to a base type.
pub const TABLES_SQL: &str = r#"
SELECT DISTINCT
    table_schema::text AS table_schema,
    table_name::text AS table_name
FROM information_schema.tables
WHERE table_schema LIKE $1
ORDER BY table_schema ASC, table_name ASC
"#;

/// Columns of one table.
pub const COLUMNS_SQL: &str = r#"
SELECT
    column_name::text AS column_name,
    ordinal_position::int4 AS ordinal_position,
    data_type::text AS data_type,
    column_default::text AS column_default,
    is_nullable::text AS is_nullable
FROM information_schema.columns
WHERE table_schema = $1 AND table_name = $2
ORDER BY table_name ASC, ordinal_position ASC
"#;

/// Catalog backed by a single PostgreSQL connection.
pub struct PgCatalog {
    conn: PgConnection,
}

impl PgCatalog {
    /// Opens the one connection used for the whole run.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Connection`] if the server cannot be
    /// reached or rejects the credentials.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        debug!(
            host = %config.host,
            port = config.port,
            dbname = %config.dbname,
            "connecting"
        );
        let conn = PgConnection::connect_with(&config.connect_options())
            .await
            .map_err(GenerateError::Connection)?;
        Ok(Self { conn })
    }

    /// Closes the connection.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

impl Catalog for PgCatalog {
    async fn tables(&mut self, schema_pattern: &str) -> Result<Vec<TableRef>> {
        debug!(schema_pattern, "listing tables");
        let rows: Vec<(String, String)> = sqlx::query_as(TABLES_SQL)
            .bind(schema_pattern)
            .fetch_all(&mut self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(schema, name)| TableRef { schema, name })
            .collect())
    }

    async fn columns(&mut self, table: &TableRef) -> Result<Vec<ColumnDescriptor>> {
        debug!(schema = %table.schema, table = %table.name, "listing columns");
        let rows: Vec<(String, i32, String, Option<String>, String)> =
            sqlx::query_as(COLUMNS_SQL)
                .bind(&table.schema)
                .bind(&table.name)
                .fetch_all(&mut self.conn)
                .await?;

        Ok(rows
            .into_iter()
            .map(
                |(name, ordinal_position, data_type, default_expr, is_nullable)| ColumnDescriptor {
                    schema: table.schema.clone(),
                    table: table.name.clone(),
                    name,
                    ordinal_position,
                    data_type,
                    default_expr,
                    nullable: is_nullable == "YES",
                },
            )
            .collect())
    }
}

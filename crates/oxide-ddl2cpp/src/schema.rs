//! Catalog descriptors.
//!
//! These types hold what the information schema reports about a table and
//! its columns. They are built once per table and dropped after the header
//! for that table has been written.

/// A `(schema, table)` pair from the table listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableRef {
    /// Schema name.
    pub schema: String,
    /// Table name.
    pub name: String,
}

impl TableRef {
    /// Creates a new table reference.
    #[must_use]
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

/// One row of `information_schema.columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Schema of the owning table.
    pub schema: String,
    /// Owning table.
    pub table: String,
    /// Column name.
    pub name: String,
    /// 1-based position within the table.
    pub ordinal_position: i32,
    /// Catalog type name (`data_type`).
    pub data_type: String,
    /// Default value expression text, if any.
    pub default_expr: Option<String>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
}

impl ColumnDescriptor {
    /// Creates a NOT NULL column without a default.
    #[must_use]
    pub fn new(
        table: &TableRef,
        name: impl Into<String>,
        ordinal_position: i32,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            schema: table.schema.clone(),
            table: table.name.clone(),
            name: name.into(),
            ordinal_position,
            data_type: data_type.into(),
            default_expr: None,
            nullable: false,
        }
    }

    /// Sets the default value expression.
    #[must_use]
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default_expr = Some(expr.into());
        self
    }

    /// Marks the column as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Returns whether the column has a non-empty default expression.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default_expr.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// A table and its columns in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Schema name.
    pub schema: String,
    /// Table name.
    pub name: String,
    /// Columns in ordinal order.
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Creates a table with no columns.
    #[must_use]
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Builds a descriptor from a table reference and its column rows.
    #[must_use]
    pub fn from_parts(table: TableRef, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            schema: table.schema,
            name: table.name,
            columns,
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    /// Returns whether the table has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_defaults() {
        let users = TableRef::new("public", "users");
        let col = ColumnDescriptor::new(&users, "email", 2, "character varying");
        assert_eq!(col.schema, "public");
        assert_eq!(col.table, "users");
        assert!(!col.nullable);
        assert!(!col.has_default());
    }

    #[test]
    fn test_empty_default_counts_as_absent() {
        let users = TableRef::new("public", "users");
        let col = ColumnDescriptor::new(&users, "email", 2, "text").default_expr("");
        assert!(!col.has_default());

        let col = col.default_expr("'x'::text");
        assert!(col.has_default());
    }

    #[test]
    fn test_table_builder() {
        let users = TableRef::new("public", "users");
        let table = TableDescriptor::new("public", "users")
            .column(ColumnDescriptor::new(&users, "id", 1, "integer"));
        assert!(!table.is_empty());
        assert!(TableDescriptor::new("public", "empty").is_empty());
    }
}

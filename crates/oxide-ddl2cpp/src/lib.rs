//! sqlpp11 table headers from a PostgreSQL information schema.
//!
//! `oxide-ddl2cpp` reads table and column metadata from
//! `information_schema` and writes one C++ header per table, declaring the
//! table and its columns for the sqlpp11 query library.
//!
//! # Architecture
//!
//! - **Type map** - catalog type name to sqlpp11 value type
//! - **Rules** - insert/update/null tags derived from nullability and defaults
//! - **Emitter** - renders the nested namespace and struct blocks
//! - **Catalog** - table and column listings, live or in memory
//! - **Walker** - drives the catalog and writes `<schema>/<table>.h`
//!
//! # Example
//!
//! ```rust,ignore
//! use oxide_ddl2cpp::prelude::*;
//!
//! let connection = ConnectionConfig::new("localhost", "postgres", "secret", "app");
//! let config = GeneratorConfig::new(connection.clone())
//!     .output_dir("include/tables")
//!     .namespace("app::model".parse()?);
//!
//! let mut catalog = PgCatalog::connect(&connection).await?;
//! let summary = generate(&mut catalog, &config).await?;
//! catalog.close().await?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! oxide-ddl2cpp -u postgres --host localhost -p secret -d app \
//!     -o include/tables -n app::model -s 'app_%' -l true
//! ```

pub mod catalog;
pub mod config;
pub mod emitter;
pub mod error;
pub mod rules;
pub mod schema;
pub mod typemap;
pub mod walker;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{Catalog, MemoryCatalog, PgCatalog};
    pub use crate::config::{ConnectionConfig, GeneratorConfig, NamespacePath};
    pub use crate::emitter::{ColumnDecl, TableDecl, render_header, write_header};
    pub use crate::error::{GenerateError, Result};
    pub use crate::rules::{ColumnTag, ColumnTagSet, derive_tags};
    pub use crate::schema::{ColumnDescriptor, TableDescriptor, TableRef};
    pub use crate::typemap::{TypeTag, UnknownType, map_type};
    pub use crate::walker::{Summary, generate, output_path};
}

//! sqlpp11 header generation.
//!
//! A table becomes one header with this layout:
//!
//! ```text
//! #ifndef MODEL_PUBLIC_USERS_H
//! namespace model {                 // one per namespace segment
//! namespace public_ {               // schema
//!     namespace users_ {            // one struct per column
//!         struct Id { ... };
//!     } // namespace users_
//!     struct users : sqlpp::table_t<users, users_::Id, ...> { ... };
//! } // namespace public_
//! } // namespace model
//! #endif
//! ```

mod block;

pub use block::BlockWriter;

use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::NamespacePath;
use crate::error::{GenerateError, Result};
use crate::rules::{ColumnTagSet, derive_tags};
use crate::schema::{ColumnDescriptor, TableDescriptor};
use crate::typemap::{TypeTag, map_type};

/// Headers every generated file includes.
pub const INCLUDES: [&str; 3] = [
    "sqlpp11/table.h",
    "sqlpp11/char_sequence.h",
    "sqlpp11/column_types.h",
];

static GUARD_INVALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]+").expect("Invalid include guard regex"));

/// A column with its value type and constraint tags resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDecl {
    /// Column name as reported by the catalog.
    pub name: String,
    /// sqlpp11 value type.
    pub type_tag: TypeTag,
    /// Constraint tags, in emission order.
    pub tags: ColumnTagSet,
}

impl ColumnDecl {
    /// Resolves a catalog column through the type map and column rules.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnknownType`] if the column's type has no
    /// mapping.
    pub fn resolve(column: &ColumnDescriptor) -> Result<Self> {
        let type_tag = map_type(&column.data_type).map_err(|err| {
            GenerateError::unknown_type(err, &column.schema, &column.table, &column.name)
        })?;
        Ok(Self {
            name: column.name.clone(),
            type_tag,
            tags: derive_tags(column),
        })
    }

    /// Name of the struct declaring this column.
    #[must_use]
    pub fn struct_name(&self) -> String {
        capitalize(&self.name)
    }

    /// The `make_traits` argument list: value type first, then tags.
    #[must_use]
    pub fn traits(&self) -> String {
        let mut traits = format!("::sqlpp::{}", self.type_tag);
        for tag in self.tags.iter() {
            traits.push_str(", ");
            traits.push_str(tag.as_str());
        }
        traits
    }
}

/// A table ready to be written: at least one resolved column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDecl {
    /// Schema name.
    pub schema: String,
    /// Table name.
    pub name: String,
    /// Columns in ordinal order.
    pub columns: Vec<ColumnDecl>,
}

impl TableDecl {
    /// Resolves every column of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::EmptyTable`] for a table without columns
    /// and [`GenerateError::UnknownType`] for the first unmapped column.
    pub fn resolve(table: &TableDescriptor) -> Result<Self> {
        if table.is_empty() {
            return Err(GenerateError::EmptyTable {
                schema: table.schema.clone(),
                table: table.name.clone(),
            });
        }
        let columns = table
            .columns
            .iter()
            .map(ColumnDecl::resolve)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            schema: table.schema.clone(),
            name: table.name.clone(),
            columns,
        })
    }

    /// Namespace holding the column structs.
    #[must_use]
    pub fn columns_namespace(&self) -> String {
        format!("{}_", self.name)
    }

    /// Namespace holding the table struct.
    #[must_use]
    pub fn schema_namespace(&self) -> String {
        format!("{}_", self.schema)
    }
}

/// Resolves and renders the header for `table` into memory.
///
/// Nothing is produced unless every column resolves, so a failing table
/// never leaves a partial file behind.
///
/// # Errors
///
/// See [`TableDecl::resolve`].
pub fn render_header(namespace: &NamespacePath, table: &TableDescriptor) -> Result<Vec<u8>> {
    let decl = TableDecl::resolve(table)?;
    write_header(Vec::new(), namespace, &decl)
}

/// Writes the header for `table` to `out` and returns the sink.
///
/// # Errors
///
/// Fails if `table` has no columns or the sink fails.
pub fn write_header<W: Write>(
    out: W,
    namespace: &NamespacePath,
    table: &TableDecl,
) -> Result<W> {
    let Some(last) = table.columns.last() else {
        return Err(GenerateError::EmptyTable {
            schema: table.schema.clone(),
            table: table.name.clone(),
        });
    };

    let mut w = BlockWriter::new(out);
    let guard = include_guard(namespace, &table.schema, &table.name);

    w.open(&format!("#ifndef {guard}"), "#endif", false)?;
    w.line(&format!("#define {guard}"))?;
    w.blank()?;
    w.blank()?;
    for include in INCLUDES {
        w.line(&format!("#include <{include}>"))?;
    }
    w.blank()?;

    for segment in namespace.segments() {
        open_namespace(&mut w, segment, false)?;
    }
    w.blank()?;

    let schema_ns = table.schema_namespace();
    let columns_ns = table.columns_namespace();
    open_namespace(&mut w, &schema_ns, true)?;
    open_namespace(&mut w, &columns_ns, true)?;

    for column in &table.columns {
        w.blank()?;
        write_column(&mut w, column)?;
    }

    // Closes the column namespace.
    w.close()?;
    w.blank()?;

    w.line(&format!(
        "struct {name} : sqlpp::table_t<{name},",
        name = table.name
    ))?;
    for column in &table.columns[..table.columns.len() - 1] {
        w.line_at(3, &format!("{columns_ns}::{},", column.struct_name()))?;
    }
    w.line_at(3, &format!("{columns_ns}::{}> {{", last.struct_name()))?;
    w.enter(Some("};".to_string()), true);
    w.line("using _value_type = sqlpp::no_value_t;")?;
    write_alias(
        &mut w,
        &format!(r#""{}"."{}""#, table.schema, table.name),
        &table.name,
    )?;
    w.close()?;

    // Schema and outer namespaces, innermost first.
    while w.open_scopes() > 1 {
        w.close()?;
    }
    w.blank()?;
    w.close()?;

    w.finish()
}

/// Builds the include guard for a table header.
#[must_use]
pub fn include_guard(namespace: &NamespacePath, schema: &str, table: &str) -> String {
    let raw = format!("{}_{schema}_{table}_h", namespace.as_str());
    GUARD_INVALID.replace_all(&raw, "_").to_uppercase()
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn open_namespace<W: Write>(w: &mut BlockWriter<W>, name: &str, indented: bool) -> Result<()> {
    w.open(
        &format!("namespace {name} {{"),
        format!("}} // namespace {name}"),
        indented,
    )?;
    Ok(())
}

fn write_column<W: Write>(w: &mut BlockWriter<W>, column: &ColumnDecl) -> Result<()> {
    w.open(&format!("struct {} {{", column.struct_name()), "};", true)?;
    write_alias(w, &format!(r#""{}""#, column.name), &column.name)?;
    w.blank()?;
    w.line(&format!(
        "using _traits = ::sqlpp::make_traits<{}>;",
        column.traits()
    ))?;
    w.close()?;
    Ok(())
}

/// Writes the `_alias_t` block: the SQL literal and a `_member_t<T>`
/// accessor named `member`.
fn write_alias<W: Write>(w: &mut BlockWriter<W>, literal: &str, member: &str) -> Result<()> {
    w.open("struct _alias_t {", "};", true)?;
    w.line(&format!(
        "static constexpr const char _literal[] = R\"({literal})\";"
    ))?;
    w.line("using _name_t = sqlpp::make_char_sequence<sizeof(_literal), _literal>;")?;
    w.line("template<typename T>")?;
    w.enter(None, true);
    w.open("struct _member_t {", "};", true)?;
    w.line(&format!("T {member};"))?;
    w.line(&format!("T &operator()() {{ return {member}; }}"))?;
    w.line(&format!("const T &operator()() const {{ return {member}; }}"))?;
    w.close()?;
    w.close()?;
    w.close()?;
    Ok(())
}

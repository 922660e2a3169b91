//! Catalog type name to sqlpp11 value type mapping.
//!
//! PostgreSQL reports column types in `information_schema.columns.data_type`
//! as lower-case SQL names, plus the upper-case markers `ARRAY` and
//! `USER-DEFINED`. Each supported name maps onto one of the sqlpp11 value
//! types. Precision, scale and length are not modelled.

use std::fmt;

/// sqlpp11 value type a column is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// 8-bit integer.
    Tinyint,
    /// 16-bit integer.
    Smallint,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Bigint,
    /// Fixed-length character string.
    Char,
    /// Variable-length character string. Also the fallback for types the
    /// generator cannot model structurally.
    Varchar,
    /// Unbounded text.
    Text,
    /// Boolean.
    Boolean,
    /// Any floating point or arbitrary precision number.
    FloatingPoint,
    /// Calendar date.
    DayPoint,
    /// Time of day or timestamp, with or without time zone.
    TimePoint,
}

impl TypeTag {
    /// Returns the sqlpp11 identifier for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tinyint => "tinyint",
            Self::Smallint => "smallint",
            Self::Integer => "integer",
            Self::Bigint => "bigint",
            // `char` is reserved in C++.
            Self::Char => "char_",
            Self::Varchar => "varchar",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::FloatingPoint => "floating_point",
            Self::DayPoint => "day_point",
            Self::TimePoint => "time_point",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog type name with no mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown catalog type '{0}'")]
pub struct UnknownType(pub String);

/// Maps a catalog type name onto its [`TypeTag`].
///
/// The match is exact and case-sensitive. Serial types map onto their
/// plain integer width; auto-increment is detected separately from the
/// column default.
///
/// # Errors
///
/// Returns [`UnknownType`] for any name outside the supported set.
pub fn map_type(name: &str) -> Result<TypeTag, UnknownType> {
    let tag = match name {
        "tinyint" => TypeTag::Tinyint,
        "smallint" | "smallserial" => TypeTag::Smallint,
        "integer" | "int" | "serial" => TypeTag::Integer,
        "bigint" | "bigserial" => TypeTag::Bigint,
        "char" | "character" => TypeTag::Char,
        "varchar" | "character varying" => TypeTag::Varchar,
        "text" => TypeTag::Text,
        "bool" | "boolean" => TypeTag::Boolean,
        "double" | "double precision" | "float" | "numeric" | "decimal" | "real" => {
            TypeTag::FloatingPoint
        }

        // JSON documents are carried as text.
        "json" | "jsonb" => TypeTag::Text,

        "date" => TypeTag::DayPoint,
        "time without time zone"
        | "time with time zone"
        | "timestamp without time zone"
        | "timestamp with time zone"
        | "abstime" => TypeTag::TimePoint,

        // Internal, network, binary and composite types degrade to varchar.
        "name" | "oid" | "ARRAY" | "pg_node_tree" | "xid" | "regproc" | "pg_lsn" | "inet"
        | "interval" | "bytea" | "anyarray" | "USER-DEFINED" => TypeTag::Varchar,

        other => return Err(UnknownType(other.to_string())),
    };
    Ok(tag)
}

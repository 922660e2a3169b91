//! Generator configuration.
//!
//! Built once from the command line and handed to
//! [`generate`](crate::walker::generate) by reference.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

use crate::error::{GenerateError, Result};

/// Separator between namespace segments.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Default PostgreSQL port.
pub const DEFAULT_PORT: u16 = 5432;

/// Database connection parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Role to connect as.
    pub user: String,
    /// Password for `user`.
    pub password: String,
    /// Database to read the catalog of.
    pub dbname: String,
}

impl ConnectionConfig {
    /// Creates connection parameters on the default port.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        dbname: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            user: user.into(),
            password: password.into(),
            dbname: dbname.into(),
        }
    }

    /// Overrides the port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Returns sqlx connect options for these parameters.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .finish()
    }
}

/// Outer C++ namespaces wrapping every generated header, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePath {
    raw: String,
    segments: Vec<String>,
}

impl NamespacePath {
    /// Returns the segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the path as given, used as the include guard prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for NamespacePath {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self> {
        let segments: Vec<String> = s.split(NAMESPACE_SEPARATOR).map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(GenerateError::InvalidNamespace(s.to_string()));
        }
        Ok(Self {
            raw: s.to_string(),
            segments,
        })
    }
}

impl Default for NamespacePath {
    fn default() -> Self {
        Self {
            raw: "model".to_string(),
            segments: vec!["model".to_string()],
        }
    }
}

/// Everything a generation run needs.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Database connection parameters.
    pub connection: ConnectionConfig,
    /// Root directory for generated headers.
    pub output_dir: PathBuf,
    /// Outer namespaces.
    pub namespace: NamespacePath,
    /// SQL `LIKE` pattern selecting schemas.
    pub schema_pattern: String,
    /// Lower-case schema directory and header file names.
    pub lower_case_file_names: bool,
}

impl GeneratorConfig {
    /// Creates a configuration with the default output directory,
    /// namespace and schema pattern.
    #[must_use]
    pub fn new(connection: ConnectionConfig) -> Self {
        Self {
            connection,
            output_dir: PathBuf::from("tables/"),
            namespace: NamespacePath::default(),
            schema_pattern: "public".to_string(),
            lower_case_file_names: false,
        }
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the outer namespace path.
    #[must_use]
    pub fn namespace(mut self, namespace: NamespacePath) -> Self {
        self.namespace = namespace;
        self
    }

    /// Sets the schema `LIKE` pattern.
    #[must_use]
    pub fn schema_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.schema_pattern = pattern.into();
        self
    }

    /// Enables or disables lower-casing of file names.
    #[must_use]
    pub fn lower_case_file_names(mut self, enabled: bool) -> Self {
        self.lower_case_file_names = enabled;
        self
    }
}

/// Parses the `--lowerCaseFileNames` value. Only the literal `true`
/// enables it; every other value leaves names untouched.
#[must_use]
pub fn parse_lower_case_flag(value: &str) -> bool {
    value == "true"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_segment_namespace() {
        let ns: NamespacePath = "model".parse().unwrap();
        assert_eq!(ns.segments(), ["model"]);
        assert_eq!(ns, NamespacePath::default());
    }

    #[test]
    fn test_nested_namespace() {
        let ns: NamespacePath = "app::db::model".parse().unwrap();
        assert_eq!(ns.segments(), ["app", "db", "model"]);
        assert_eq!(ns.as_str(), "app::db::model");
    }

    #[test]
    fn test_empty_namespace_segment_rejected() {
        assert!(matches!(
            "app::::model".parse::<NamespacePath>(),
            Err(GenerateError::InvalidNamespace(_))
        ));
        assert!("".parse::<NamespacePath>().is_err());
        assert!("::model".parse::<NamespacePath>().is_err());
    }

    #[test]
    fn test_lower_case_flag_is_literal() {
        assert!(parse_lower_case_flag("true"));
        assert!(!parse_lower_case_flag("false"));
        assert!(!parse_lower_case_flag("TRUE"));
        assert!(!parse_lower_case_flag("1"));
    }

    #[test]
    fn test_password_is_redacted() {
        let conn = ConnectionConfig::new("localhost", "postgres", "hunter2", "app");
        let debug = format!("{conn:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::new(ConnectionConfig::new("h", "u", "p", "d"));
        assert_eq!(config.output_dir, PathBuf::from("tables/"));
        assert_eq!(config.schema_pattern, "public");
        assert_eq!(config.connection.port, DEFAULT_PORT);
        assert!(!config.lower_case_file_names);
    }
}

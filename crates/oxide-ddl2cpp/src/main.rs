//! oxide-ddl2cpp CLI
//!
//! Generates sqlpp11 table headers from a PostgreSQL database.

use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_ddl2cpp::config::{DEFAULT_PORT, parse_lower_case_flag};
use oxide_ddl2cpp::prelude::*;

/// Create C++ structs from a database table structure.
#[derive(Parser, Debug)]
#[command(name = "oxide-ddl2cpp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PostgreSQL user.
    #[arg(short, long)]
    user: String,

    /// PostgreSQL host.
    #[arg(long)]
    host: String,

    /// PostgreSQL port.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// PostgreSQL password.
    #[arg(short, long, env = "PGPASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL database.
    #[arg(short, long)]
    dbname: String,

    /// Output directory.
    #[arg(short, long, default_value = "tables/")]
    output_dir: PathBuf,

    /// C++ namespace, segments separated by `::`.
    #[arg(short, long, default_value = "model")]
    namespace: String,

    /// LIKE clause pattern for table schema.
    #[arg(short = 's', long = "schemaPattern", default_value = "public")]
    schema_pattern: String,

    /// `true` if file names should be lower case.
    #[arg(short = 'l', long = "lowerCaseFileNames", default_value = "false")]
    lower_case_file_names: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Builds the generator configuration.
    fn config(&self) -> Result<GeneratorConfig> {
        let connection =
            ConnectionConfig::new(&self.host, &self.user, &self.password, &self.dbname)
                .port(self.port);
        Ok(GeneratorConfig::new(connection)
            .output_dir(&self.output_dir)
            .namespace(self.namespace.parse()?)
            .schema_pattern(&self.schema_pattern)
            .lower_case_file_names(parse_lower_case_flag(&self.lower_case_file_names)))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.config()?;

    let mut catalog = PgCatalog::connect(&config.connection).await?;
    let summary = generate(&mut catalog, &config).await?;
    catalog.close().await?;

    info!(
        "Generated {} header(s) in {}",
        summary.len(),
        config.output_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 9] = [
        "oxide-ddl2cpp",
        "-u",
        "postgres",
        "--host",
        "localhost",
        "-p",
        "secret",
        "-d",
        "app",
    ];

    fn parse(extra: &[&str]) -> Cli {
        Cli::try_parse_from(REQUIRED.iter().chain(extra)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("tables/"));
        assert_eq!(config.namespace.segments(), ["model"]);
        assert_eq!(config.schema_pattern, "public");
        assert!(!config.lower_case_file_names);
        assert_eq!(config.connection.port, 5432);
        assert_eq!(config.connection.dbname, "app");
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "-o",
            "out",
            "-n",
            "app::model",
            "-s",
            "app_%",
            "-l",
            "true",
            "--port",
            "6543",
        ]);
        let config = cli.config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.namespace.segments(), ["app", "model"]);
        assert_eq!(config.schema_pattern, "app_%");
        assert!(config.lower_case_file_names);
        assert_eq!(config.connection.port, 6543);
    }

    #[test]
    fn test_long_flag_names() {
        let cli = parse(&[
            "--schemaPattern",
            "sales",
            "--lowerCaseFileNames",
            "yes",
            "--output-dir",
            "gen",
        ]);
        let config = cli.config().unwrap();
        assert_eq!(config.schema_pattern, "sales");
        assert!(!config.lower_case_file_names);
        assert_eq!(config.output_dir, PathBuf::from("gen"));
    }

    #[test]
    fn test_missing_required_flag() {
        let result = Cli::try_parse_from(["oxide-ddl2cpp", "-u", "postgres", "--host", "h"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_namespace() {
        let cli = parse(&["-n", "app::"]);
        assert!(matches!(
            cli.config(),
            Err(GenerateError::InvalidNamespace(_))
        ));
    }
}

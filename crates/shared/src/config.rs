//! Application configuration management.
//!
//! Sources are layered, later ones overriding earlier ones:
//! 1. `config/default.toml`
//! 2. `config/{RUN_MODE}.toml` (`RUN_MODE` defaults to `development`)
//! 3. the file named by `CASHVIEW_CONFIG`, when set
//! 4. `CASHVIEW_*` environment variables, `__` separating nested keys
//!    (`CASHVIEW_LEDGER__TRANSACTION_PAGE_LENGTH=10`)

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::PageRequest;

/// Environment variable naming an extra configuration file.
pub const CONFIG_FILE_VAR: &str = "CASHVIEW_CONFIG";

/// Prefix of configuration environment variables.
const ENV_PREFIX: &str = "CASHVIEW";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Book file configuration.
    #[serde(default)]
    pub book: BookConfig,
    /// Ledger view configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Report output configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Location of the GnuCash book.
#[derive(Debug, Clone, Deserialize)]
pub struct BookConfig {
    /// Path of the GnuCash SQLite file.
    #[serde(default = "default_book_path")]
    pub path: PathBuf,
    /// Open the file read-only.
    #[serde(default = "default_read_only")]
    pub read_only: bool,
}

fn default_book_path() -> PathBuf {
    PathBuf::from("book.gnucash")
}

fn default_read_only() -> bool {
    true
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            path: default_book_path(),
            read_only: default_read_only(),
        }
    }
}

/// Ledger view configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Number of transactions shown per ledger page.
    #[serde(default = "default_transaction_page_length")]
    pub transaction_page_length: u32,
}

fn default_transaction_page_length() -> u32 {
    25
}

impl LedgerConfig {
    /// Request for `page` of a ledger with the configured page length.
    #[must_use]
    pub const fn page_request(&self, page: u32) -> PageRequest {
        PageRequest::new(page, self.transaction_page_length)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            transaction_page_length: default_transaction_page_length(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Print the report as JSON.
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from the `config` directory and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Loads configuration using `dir` as the configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the merged values do not
    /// deserialize.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&run_mode)).required(false));

        if let Ok(extra) = std::env::var(CONFIG_FILE_VAR) {
            builder = builder.add_source(config::File::from(PathBuf::from(extra)).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Checks values that deserialize fine but make no sense.
    pub fn validate(&self) -> AppResult<()> {
        if self.ledger.transaction_page_length == 0 {
            return Err(AppError::Validation(
                "ledger.transaction_page_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn load_isolated(dir: &Path, vars: &[(&str, Option<&str>)]) -> AppConfig {
        let mut all: Vec<(&str, Option<&str>)> = vec![
            ("RUN_MODE", None),
            (CONFIG_FILE_VAR, None),
            ("CASHVIEW_LEDGER__TRANSACTION_PAGE_LENGTH", None),
            ("CASHVIEW_BOOK__PATH", None),
        ];
        all.extend_from_slice(vars);
        temp_env::with_vars(all, || AppConfig::load_from(dir).unwrap())
    }

    #[test]
    fn test_defaults_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_isolated(dir.path(), &[]);

        assert_eq!(config.ledger.transaction_page_length, 25);
        assert_eq!(config.book.path, PathBuf::from("book.gnucash"));
        assert!(config.book.read_only);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(!config.report.json);
    }

    #[test]
    fn test_default_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[book]\npath = \"household.gnucash\"\n\n[ledger]\ntransaction_page_length = 50\n",
        )
        .unwrap();

        let config = load_isolated(dir.path(), &[]);

        assert_eq!(config.book.path, PathBuf::from("household.gnucash"));
        assert_eq!(config.ledger.transaction_page_length, 50);
    }

    #[test]
    fn test_run_mode_file_overrides_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[ledger]\ntransaction_page_length = 50\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("production.toml"),
            "[ledger]\ntransaction_page_length = 100\n",
        )
        .unwrap();

        let config = load_isolated(dir.path(), &[("RUN_MODE", Some("production"))]);

        assert_eq!(config.ledger.transaction_page_length, 100);
    }

    #[test]
    fn test_extra_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let extra = dir.path().join("custom.toml");
        fs::write(&extra, "[logging]\nlevel = \"debug\"\njson = true\n").unwrap();
        let extra = extra.to_string_lossy().into_owned();

        let config = load_isolated(dir.path(), &[(CONFIG_FILE_VAR, Some(extra.as_str()))]);

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_missing_extra_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let missing = missing.to_string_lossy().into_owned();

        let result = temp_env::with_vars(
            [
                ("RUN_MODE", None),
                (CONFIG_FILE_VAR, Some(missing.as_str())),
            ],
            || AppConfig::load_from(dir.path()),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[ledger]\ntransaction_page_length = 50\n",
        )
        .unwrap();

        let config = load_isolated(
            dir.path(),
            &[
                ("CASHVIEW_LEDGER__TRANSACTION_PAGE_LENGTH", Some("10")),
                ("CASHVIEW_BOOK__PATH", Some("/srv/books/main.gnucash")),
            ],
        );

        assert_eq!(config.ledger.transaction_page_length, 10);
        assert_eq!(config.book.path, PathBuf::from("/srv/books/main.gnucash"));
    }

    #[test]
    fn test_validate_rejects_zero_page_length() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.ledger.transaction_page_length = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_page_request_uses_page_length() {
        let ledger = LedgerConfig {
            transaction_page_length: 10,
        };
        assert_eq!(ledger.page_request(3), PageRequest::new(3, 10));
    }
}

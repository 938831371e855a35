//! Runtime key/value properties.
//!
//! Properties carry the same keys as the host deployment's property file:
//!
//! - `shibble-config`: path to the profile definition file (default:
//!   `shibble-config.xml` under `SHIBBLE_HOME`)
//! - `shbboleth-username-header`: request header carrying the authenticated
//!   identity (default `remote_user`)
//! - `mysql-hostname`, `mysql-port`, `mysql-database`, `mysql-username`,
//!   `mysql-password`: credential-store connection parameters
//! - `mysql-query-timeout-secs`: per-query timeout (default 30)

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default definition file name under the shibble home directory.
pub const DEFAULT_DEFINITION_FILE: &str = "shibble-config.xml";

const DEFAULT_USERNAME_HEADER: &str = "remote_user";
const DEFAULT_MYSQL_HOSTNAME: &str = "localhost";
const DEFAULT_MYSQL_PORT: u16 = 3306;
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration properties.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path to the profile definition file.
    #[serde(rename = "shibble-config")]
    pub definition_path: Option<PathBuf>,

    /// Name of the request header carrying the authenticated identity.
    #[serde(rename = "shbboleth-username-header")]
    pub username_header: String,

    /// Hostname of the MySQL server hosting the credential store.
    #[serde(rename = "mysql-hostname")]
    pub mysql_hostname: String,

    /// Port number of the MySQL server.
    #[serde(rename = "mysql-port")]
    pub mysql_port: u16,

    /// Name of the database containing the credential table.
    #[serde(rename = "mysql-database")]
    pub mysql_database: String,

    /// Username for the credential-store connection.
    #[serde(rename = "mysql-username")]
    pub mysql_username: String,

    /// Password for the credential-store connection.
    #[serde(rename = "mysql-password")]
    pub mysql_password: String,

    /// Per-query timeout, in seconds.
    #[serde(rename = "mysql-query-timeout-secs")]
    pub query_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            definition_path: None,
            username_header: DEFAULT_USERNAME_HEADER.to_string(),
            mysql_hostname: DEFAULT_MYSQL_HOSTNAME.to_string(),
            mysql_port: DEFAULT_MYSQL_PORT,
            mysql_database: String::new(),
            mysql_username: String::new(),
            mysql_password: String::new(),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Parses properties from a JSON document of key/value pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse properties")
    }

    /// Loads properties from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read properties file {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// Loads properties from the `SHIBBLE_PROPERTIES` environment variable.
    pub fn from_env() -> Result<Self> {
        let json = std::env::var("SHIBBLE_PROPERTIES")
            .map_err(|_| anyhow!("SHIBBLE_PROPERTIES environment variable not set"))?;
        Self::from_json(&json)
    }

    /// Resolves the definition file path.
    ///
    /// Falls back to [`DEFAULT_DEFINITION_FILE`] under `SHIBBLE_HOME` (the
    /// current directory when unset) if no `shibble-config` property was
    /// given.
    pub fn definition_file(&self) -> PathBuf {
        match &self.definition_path {
            Some(path) => path.clone(),
            None => home_dir().join(DEFAULT_DEFINITION_FILE),
        }
    }

    /// Per-query timeout as a [`Duration`].
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("SHIBBLE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

//! Credential store lookup.

use crate::errors::LookupError;
use crate::settings::Settings;
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

/// Query returning the password rows for a normalized email.
const PASSWORD_QUERY: &str = "SELECT password FROM user WHERE lower(user.email) = ?";

/// Looks up the passwords stored for an identity.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the password of every row whose lower-cased email equals
    /// `normalized_email`. Zero, one, or more rows may match; an empty
    /// result is not an error.
    async fn passwords_for(&self, normalized_email: &str) -> Result<Vec<String>, LookupError>;
}

/// Credential store backed by a MySQL `user` table with `email` and
/// `password` columns.
pub struct MySqlCredentialStore {
    pool: MySqlPool,
    query_timeout: Duration,
}

impl MySqlCredentialStore {
    /// Connects a pool using the `mysql-*` properties.
    pub async fn connect(settings: &Settings) -> Result<Self, LookupError> {
        let options = MySqlConnectOptions::new()
            .host(&settings.mysql_hostname)
            .port(settings.mysql_port)
            .database(&settings.mysql_database)
            .username(&settings.mysql_username)
            .password(&settings.mysql_password);
        let pool = MySqlPoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        Ok(Self {
            pool,
            query_timeout: settings.query_timeout(),
        })
    }

    /// Wraps an existing pool.
    pub fn with_pool(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Closes the pool. Connection release otherwise runs on drop; sqlx
    /// logs, and does not surface, errors encountered while releasing.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn passwords_for(&self, normalized_email: &str) -> Result<Vec<String>, LookupError> {
        // The pooled connection, the prepared statement, and the row stream
        // all release on drop, on every exit path.
        let query = sqlx::query_scalar::<_, String>(PASSWORD_QUERY).bind(normalized_email);
        match tokio::time::timeout(self.query_timeout, query.fetch_all(&self.pool)).await {
            Ok(rows) => Ok(rows?),
            Err(_) => Err(LookupError::Timeout(self.query_timeout)),
        }
    }
}

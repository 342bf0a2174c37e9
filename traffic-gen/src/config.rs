use std::env;

use postgres::{Client, NoTls};

use crate::error::GenError;

/// Environment variable holding the full connection descriptor.
pub const DSN_ENV: &str = "DB_DSN";

/// Descriptor used when [`DSN_ENV`] is unset.
pub const DEFAULT_DSN: &str = "host=localhost port=5432 dbname=demo user=postgres password=159357";

/// Connection configuration, resolved once at startup and passed in
/// explicitly rather than read from a global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub dsn: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            dsn: DEFAULT_DSN.to_owned(),
        }
    }
}

impl DbConfig {
    #[must_use]
    pub fn new(dsn: impl Into<String>) -> Self {
        DbConfig { dsn: dsn.into() }
    }

    /// Reads the descriptor from `DB_DSN`, falling back to [`DEFAULT_DSN`].
    #[must_use]
    pub fn from_env() -> Self {
        env::var(DSN_ENV).map_or_else(|_| DbConfig::default(), DbConfig::new)
    }

    /// Opens the single blocking session used for the whole process.
    /// Every statement commits immediately; the session closes when the
    /// client is dropped, unwinding included.
    ///
    /// # Errors
    /// Errors when the database is unreachable or the credentials are
    /// rejected. There is no retry.
    pub fn connect(&self) -> Result<Client, GenError> {
        let client = Client::connect(&self.dsn, NoTls)?;
        Ok(client)
    }
}

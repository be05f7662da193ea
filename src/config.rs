//! Environment configuration
//!
//! The store location and upstream credentials come from process environment
//! variables (optionally merged from a `.env` file loaded at startup). The
//! table name is required up front; credentials are only needed once a cache
//! miss forces a fetch, so their absence is deferred to fetch time.

use std::env;

use thiserror::Error;

/// Environment variable naming the store table
const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// Environment variable holding the upstream user identifier
const USER_ID_VAR: &str = "USER_ID";

/// Environment variable holding the upstream bearer token
const TOKEN_VAR: &str = "TOKEN";

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The store table name is not set
    #[error("TABLE_NAME not configured")]
    MissingTableName,
}

/// Returns the configured store table name
///
/// Absence (or an empty value) short-circuits the whole invocation before
/// any store access is attempted.
pub fn table_name() -> Result<String, ConfigError> {
    match env::var(TABLE_NAME_VAR) {
        Ok(name) if !name.is_empty() => Ok(name),
        _ => Err(ConfigError::MissingTableName),
    }
}

/// Bearer credentials for the upstream API
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Upstream user identifier
    pub user_id: String,
    /// Bearer token
    pub token: String,
}

impl Credentials {
    /// Creates credentials from explicit values
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }

    /// Reads USER_ID and TOKEN from the environment
    ///
    /// Returns `None` when either is missing. Both are required together;
    /// the fetcher turns `None` into its missing-credentials error.
    pub fn from_env() -> Option<Self> {
        let user_id = env::var(USER_ID_VAR).ok()?;
        let token = env::var(TOKEN_VAR).ok()?;
        Some(Self { user_id, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_table_name_reads_env() {
        env::set_var(TABLE_NAME_VAR, "rankings");

        let name = table_name().expect("table name should be configured");
        assert_eq!(name, "rankings");

        env::remove_var(TABLE_NAME_VAR);
    }

    #[test]
    #[serial]
    fn test_missing_table_name_is_a_config_error() {
        env::remove_var(TABLE_NAME_VAR);

        let err = table_name().expect_err("missing table name should fail");
        assert_eq!(err.to_string(), "TABLE_NAME not configured");
    }

    #[test]
    #[serial]
    fn test_empty_table_name_is_a_config_error() {
        env::set_var(TABLE_NAME_VAR, "");

        assert!(table_name().is_err());

        env::remove_var(TABLE_NAME_VAR);
    }

    #[test]
    #[serial]
    fn test_credentials_require_both_vars() {
        env::set_var(USER_ID_VAR, "1337");
        env::remove_var(TOKEN_VAR);

        assert!(Credentials::from_env().is_none());

        env::set_var(TOKEN_VAR, "secret");
        let credentials = Credentials::from_env().expect("both vars are set");
        assert_eq!(credentials.user_id, "1337");
        assert_eq!(credentials.token, "secret");

        env::remove_var(USER_ID_VAR);
        env::remove_var(TOKEN_VAR);
    }
}

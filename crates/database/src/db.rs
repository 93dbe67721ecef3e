use crate::error::RecordsError;
use log::LevelFilter;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::env;

const DATABASE_URL_VAR: &str = "DATABASE_URL";
const DATABASE_ECHO_VAR: &str = "DATABASE_ECHO";

/// Connection settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    /// Log every SQL statement
    pub echo: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            echo: true,
        }
    }

    /// Reads `DATABASE_URL` and `DATABASE_ECHO`, loading a `.env` file first if one exists
    pub fn from_env() -> Result<Self, RecordsError> {
        // Variables may already be exported, so a missing .env file is not an error
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, RecordsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| RecordsError::Config(format!("{DATABASE_URL_VAR} is not set")))?;

        let echo = match lookup(DATABASE_ECHO_VAR) {
            Some(value) => parse_flag(&value).ok_or_else(|| {
                RecordsError::Config(format!(
                    "{DATABASE_ECHO_VAR} must be true or false, got {value:?}"
                ))
            })?,
            None => true,
        };

        Ok(Self { url, echo })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Creates a database connection
pub async fn create_connection(config: &DatabaseConfig) -> Result<DatabaseConnection, RecordsError> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .sqlx_logging(config.echo)
        .sqlx_logging_level(LevelFilter::Info);

    Ok(Database::connect(options).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults_echo_on() {
        let config =
            DatabaseConfig::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]))
                .unwrap();
        assert_eq!(config, DatabaseConfig::new("sqlite::memory:"));
        assert!(config.echo);
    }

    #[test]
    fn test_from_lookup_reads_echo() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/records"),
            ("DATABASE_ECHO", "False"),
        ]))
        .unwrap();
        assert_eq!(config.url, "postgres://localhost/records");
        assert!(!config.echo);
    }

    #[test]
    fn test_from_lookup_requires_url() {
        let missing = DatabaseConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(missing, Err(RecordsError::Config(_))));

        let blank = DatabaseConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")]));
        assert!(matches!(blank, Err(RecordsError::Config(_))));
    }

    #[test]
    fn test_from_lookup_rejects_bad_echo() {
        let result = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_ECHO", "loud"),
        ]));
        assert!(matches!(result, Err(RecordsError::Config(_))));
    }
}

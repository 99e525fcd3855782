use std::collections::HashMap;
use thiserror::Error;

const DEFAULT_DATABASE_PATH: &str = "student_db.sqlite";
const DEFAULT_BUSY_TIMEOUT_MS: &str = "5000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_path = env_map
            .get("DATABASE_PATH")
            .map(|s| s.trim())
            .unwrap_or(DEFAULT_DATABASE_PATH)
            .to_string();
        if database_path.is_empty() {
            return Err(ConfigError::InvalidValue(
                "DATABASE_PATH".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let busy_timeout_ms = env_map
            .get("DATABASE_BUSY_TIMEOUT_MS")
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS)
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "DATABASE_BUSY_TIMEOUT_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        Ok(Config {
            database_path,
            busy_timeout_ms,
        })
    }

    /// Replace the database path, e.g. from a command line flag.
    pub fn with_database_path(mut self, path: impl Into<String>) -> Self {
        self.database_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.database_path, "student_db.sqlite");
        assert_eq!(config.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_database_path_from_env() {
        let mut env_map = HashMap::new();
        env_map.insert("DATABASE_PATH".to_string(), "/tmp/students.db".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.database_path, "/tmp/students.db");
    }

    #[test]
    fn test_empty_database_path() {
        let mut env_map = HashMap::new();
        env_map.insert("DATABASE_PATH".to_string(), "  ".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DATABASE_PATH"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_busy_timeout() {
        let mut env_map = HashMap::new();
        env_map.insert(
            "DATABASE_BUSY_TIMEOUT_MS".to_string(),
            "soon".to_string(),
        );
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DATABASE_BUSY_TIMEOUT_MS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_with_database_path_overrides() {
        let config = Config::from_env_map(HashMap::new())
            .unwrap()
            .with_database_path("other.db");
        assert_eq!(config.database_path, "other.db");
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Password error: {0}")]
    Password(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Io(err.into())
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<crate::auth::PasswordError> for AppError {
    fn from(err: crate::auth::PasswordError) -> Self {
        AppError::Password(err.to_string())
    }
}

/// True when a sqlx error is a primary key or unique constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_error_becomes_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = csv::Error::from(io).into();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}

//! Admin credential operations.

use super::Repository;
use crate::error::{is_unique_violation, AppError};
use sqlx::Row;
use tracing::{info, warn};

impl Repository {
    /// Check a username/password pair against the `admins` table.
    ///
    /// Returns `Ok(false)` for an unknown user, a wrong password, or a stored
    /// value that is not a valid password hash.
    ///
    /// # Errors
    /// Returns an error only if the lookup itself fails.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT password_hash FROM admins WHERE username = ?")
            .bind(username)
            .fetch_optional(self.session.pool())
            .await?;

        let Some(row) = row else {
            info!(username, "login rejected: unknown user");
            return Ok(false);
        };

        let hash: String = row.get("password_hash");
        match self.passwords.verify_password(password, &hash) {
            Ok(true) => {
                info!(username, "login accepted");
                Ok(true)
            }
            Ok(false) => {
                info!(username, "login rejected: wrong password");
                Ok(false)
            }
            Err(e) => {
                warn!(username, error = %e, "stored admin credential is unusable");
                Ok(false)
            }
        }
    }

    /// Provision an admin, storing a salted hash of `password`.
    ///
    /// # Errors
    /// Returns `AppError::DuplicateKey` if the username is taken and
    /// `AppError::Validation` for an empty username or password.
    pub async fn create_admin(&self, username: &str, password: &str) -> Result<(), AppError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "username and password must not be empty".to_string(),
            ));
        }

        let hash = self.passwords.hash_password(password)?;

        let mut tx = self.session.begin().await?;
        let inserted = sqlx::query("INSERT INTO admins (username, password_hash) VALUES (?, ?)")
            .bind(username.trim())
            .bind(&hash)
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(AppError::DuplicateKey(format!(
                    "admin '{}' already exists",
                    username.trim()
                )))
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;
        info!(username = username.trim(), "admin created");
        Ok(())
    }
}

//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by table:
//! - `students.rs` - Student add, update, delete, search and export
//! - `admins.rs` - Admin provisioning and login checks

mod admins;
mod students;

use super::session::Session;
use crate::auth::PasswordManager;

pub use students::ExportSummary;

/// Repository for database operations over one [`Session`].
pub struct Repository {
    session: Session,
    passwords: PasswordManager,
}

impl Repository {
    /// Create a new repository on top of an open session.
    pub fn new(session: Session) -> Self {
        Repository {
            session,
            passwords: PasswordManager::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Release the underlying connection.
    pub async fn close(self) {
        self.session.close().await;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    pub async fn setup_test_db() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let config = Config {
            database_path: db_path,
            busy_timeout_ms: 5000,
        };
        let session = Session::connect(&config).await.expect("connect failed");
        (Repository::new(session), temp_dir)
    }
}

//! Schema creation and connection pragmas.

use sqlx::sqlite::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

/// Create the `students` and `admins` tables if they are missing.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Running database migrations...");
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    info!("Schema ready");
    Ok(())
}

/// Configure SQLite pragmas on a freshly opened connection.
pub(crate) async fn configure_pragmas_conn(
    conn: &mut SqliteConnection,
    busy_timeout_ms: u64,
) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    // journal_mode returns the actual mode set; must use fetch to get result
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    debug!("SQLite journal_mode set to: {}", journal_mode);

    // PRAGMA arguments cannot be bound; the value is a parsed integer.
    sqlx::query(&format!("PRAGMA busy_timeout = {}", busy_timeout_ms))
        .execute(&mut *conn)
        .await?;

    Ok(())
}

//! SQLite-backed repositories.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{ClockPort, RepoError};

mod build_repo;
mod interaction_repo;
mod player_repo;
mod script_session_repo;

pub use build_repo::SqliteBuildRepo;
pub use interaction_repo::SqliteInteractionRepo;
pub use player_repo::SqlitePlayerRepo;
pub use script_session_repo::SqliteScriptSessionRepo;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS players (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL UNIQUE,
        email TEXT,
        role TEXT NOT NULL,
        display_name TEXT,
        pin_hash TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS interactions (
        id TEXT PRIMARY KEY NOT NULL,
        player_id TEXT NOT NULL,
        npc_id INTEGER NOT NULL,
        dialogue TEXT NOT NULL,
        sentiment TEXT NOT NULL,
        npc_reply TEXT NOT NULL,
        npc_sentiment TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_interactions_player ON interactions (player_id, created_at)",
    r#"
    CREATE TABLE IF NOT EXISTS car_builds (
        id TEXT PRIMARY KEY NOT NULL,
        player_id TEXT NOT NULL REFERENCES players (id),
        chassis TEXT,
        engine TEXT,
        tires TEXT,
        front_wing TEXT,
        rear_wing TEXT,
        car_image TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_car_builds_player ON car_builds (player_id, created_at)",
    r#"
    CREATE TABLE IF NOT EXISTS script_sessions (
        player_id TEXT PRIMARY KEY NOT NULL,
        node TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
];

/// Open a pool for `database_url` (e.g. `sqlite:pitlane.db?mode=rwc`).
pub async fn connect(database_url: &str) -> Result<SqlitePool, RepoError> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// Create tables and indexes if they do not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }
    Ok(())
}

/// All SQLite repositories sharing one pool.
pub struct SqliteRepositories {
    pub player: Arc<SqlitePlayerRepo>,
    pub interaction: Arc<SqliteInteractionRepo>,
    pub build: Arc<SqliteBuildRepo>,
    pub script_session: Arc<SqliteScriptSessionRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            player: Arc::new(SqlitePlayerRepo::new(pool.clone())),
            interaction: Arc::new(SqliteInteractionRepo::new(pool.clone())),
            build: Arc::new(SqliteBuildRepo::new(pool.clone())),
            script_session: Arc::new(SqliteScriptSessionRepo::new(pool, clock)),
        }
    }
}

// =============================================================================
// Row helpers
// =============================================================================

/// Like `RepoError::database`, but unique-key failures become constraint violations.
fn write_error(operation: &'static str, error: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            return RepoError::constraint(db.message());
        }
    }
    RepoError::database(operation, error)
}

fn parse_column<T>(row: &SqliteRow, column: &str) -> Result<T, RepoError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = row
        .try_get(column)
        .map_err(|e| RepoError::serialization(format!("{column}: {e}")))?;
    raw.parse()
        .map_err(|e| RepoError::serialization(format!("{column}: {e}")))
}

fn optional_column(row: &SqliteRow, column: &str) -> Result<Option<String>, RepoError> {
    row.try_get(column)
        .map_err(|e| RepoError::serialization(format!("{column}: {e}")))
}

/// Fixed-width RFC 3339 so text ordering matches time ordering.
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, RepoError> {
    let raw: String = row
        .try_get(column)
        .map_err(|e| RepoError::serialization(format!("{column}: {e}")))?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("{column}: {e}")))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let (_dir, pool) = test_support::temp_pool().await;
        ensure_schema(&pool).await.expect("second run");
    }

    #[test]
    fn timestamps_sort_as_text() {
        let quarter = DateTime::parse_from_rfc3339("2026-01-01T10:00:00.25Z")
            .expect("parse")
            .with_timezone(&Utc);
        let half = DateTime::parse_from_rfc3339("2026-01-01T10:00:00.5Z")
            .expect("parse")
            .with_timezone(&Utc);
        assert!(format_timestamp(quarter) < format_timestamp(half));
        assert_eq!(format_timestamp(half), "2026-01-01T10:00:00.500000Z");
    }
}

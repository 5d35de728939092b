//! Scripted walkthrough progress, one row per player.

use std::sync::Arc;

use async_trait::async_trait;
use pitlane_domain::{PlayerId, ScriptNode};
use sqlx::SqlitePool;

use super::{format_timestamp, parse_column};
use crate::infrastructure::ports::{ClockPort, RepoError, ScriptSessionRepo};

pub struct SqliteScriptSessionRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteScriptSessionRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl ScriptSessionRepo for SqliteScriptSessionRepo {
    async fn get_node(&self, player_id: PlayerId) -> Result<Option<ScriptNode>, RepoError> {
        let row = sqlx::query("SELECT node FROM script_sessions WHERE player_id = ?")
            .bind(player_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("script_session.get_node", e))?;
        row.as_ref().map(|row| parse_column(row, "node")).transpose()
    }

    async fn set_node(&self, player_id: PlayerId, node: ScriptNode) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO script_sessions (player_id, node, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(player_id) DO UPDATE SET
                node = excluded.node,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(player_id.to_string())
        .bind(node.as_str())
        .bind(format_timestamp(self.clock.now()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("script_session.set_node", e))?;
        Ok(())
    }
}

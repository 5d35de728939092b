//! Interaction persistence.

use async_trait::async_trait;
use pitlane_domain::{Interaction, InteractionId, NpcId, PlayerId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{format_timestamp, parse_column, parse_timestamp, write_error};
use crate::infrastructure::ports::{InteractionRepo, RepoError};

const SELECT_INTERACTION: &str = r#"
    SELECT id, player_id, npc_id, dialogue, sentiment, npc_reply, npc_sentiment, created_at
    FROM interactions
"#;

pub struct SqliteInteractionRepo {
    pool: SqlitePool,
}

impl SqliteInteractionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_interaction(row: &SqliteRow) -> Result<Interaction, RepoError> {
    let text = |column: &str| -> Result<String, RepoError> {
        row.try_get(column)
            .map_err(|e| RepoError::serialization(format!("{column}: {e}")))
    };
    let npc_id: i64 = row
        .try_get("npc_id")
        .map_err(|e| RepoError::serialization(format!("npc_id: {e}")))?;

    Ok(Interaction {
        id: parse_column(row, "id")?,
        player_id: parse_column(row, "player_id")?,
        npc_id: NpcId::new(npc_id),
        dialogue: text("dialogue")?,
        sentiment: parse_column(row, "sentiment")?,
        npc_reply: text("npc_reply")?,
        npc_sentiment: parse_column(row, "npc_sentiment")?,
        created_at: parse_timestamp(row, "created_at")?,
    })
}

#[async_trait]
impl InteractionRepo for SqliteInteractionRepo {
    async fn get(&self, id: InteractionId) -> Result<Option<Interaction>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_INTERACTION} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("interaction.get", e))?;
        row.as_ref().map(row_to_interaction).transpose()
    }

    async fn save(&self, interaction: &Interaction) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO interactions
                (id, player_id, npc_id, dialogue, sentiment, npc_reply, npc_sentiment, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                dialogue = excluded.dialogue,
                sentiment = excluded.sentiment,
                npc_reply = excluded.npc_reply,
                npc_sentiment = excluded.npc_sentiment
            "#,
        )
        .bind(interaction.id.to_string())
        .bind(interaction.player_id.to_string())
        .bind(interaction.npc_id.value())
        .bind(&interaction.dialogue)
        .bind(interaction.sentiment.as_str())
        .bind(&interaction.npc_reply)
        .bind(interaction.npc_sentiment.as_str())
        .bind(format_timestamp(interaction.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("interaction.save", e))?;
        Ok(())
    }

    async fn delete(&self, id: InteractionId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM interactions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("interaction.delete", e))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Interaction", id));
        }
        Ok(())
    }

    async fn find_exact(
        &self,
        player_id: PlayerId,
        npc_id: NpcId,
        dialogue: &str,
    ) -> Result<Option<Interaction>, RepoError> {
        let row = sqlx::query(&format!(
            "{SELECT_INTERACTION} WHERE player_id = ? AND npc_id = ? AND dialogue = ? LIMIT 1"
        ))
        .bind(player_id.to_string())
        .bind(npc_id.value())
        .bind(dialogue)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("interaction.find_exact", e))?;
        row.as_ref().map(row_to_interaction).transpose()
    }

    async fn list_for_player_and_npc(
        &self,
        player_id: PlayerId,
        npc_id: NpcId,
    ) -> Result<Vec<Interaction>, RepoError> {
        let rows = sqlx::query(&format!(
            "{SELECT_INTERACTION} WHERE player_id = ? AND npc_id = ? ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(player_id.to_string())
        .bind(npc_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("interaction.list_for_player_and_npc", e))?;
        rows.iter().map(row_to_interaction).collect()
    }

    async fn recent_for_player(
        &self,
        player_id: PlayerId,
        limit: u32,
    ) -> Result<Vec<Interaction>, RepoError> {
        let rows = sqlx::query(&format!(
            "{SELECT_INTERACTION} WHERE player_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?"
        ))
        .bind(player_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("interaction.recent_for_player", e))?;

        let mut recent = rows
            .iter()
            .map(row_to_interaction)
            .collect::<Result<Vec<_>, _>>()?;
        recent.reverse();
        Ok(recent)
    }
}

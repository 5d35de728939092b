//! Player persistence.

use async_trait::async_trait;
use pitlane_domain::{Player, PlayerId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{optional_column, parse_column, write_error};
use crate::infrastructure::ports::{PlayerRepo, RepoError};

const SELECT_PLAYER: &str =
    "SELECT id, name, email, role, display_name, pin_hash FROM players";

pub struct SqlitePlayerRepo {
    pool: SqlitePool,
}

impl SqlitePlayerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_player(row: &SqliteRow) -> Result<Player, RepoError> {
    Ok(Player {
        id: parse_column(row, "id")?,
        name: row
            .try_get("name")
            .map_err(|e| RepoError::serialization(format!("name: {e}")))?,
        email: optional_column(row, "email")?,
        role: row
            .try_get("role")
            .map_err(|e| RepoError::serialization(format!("role: {e}")))?,
        display_name: optional_column(row, "display_name")?,
        pin_hash: optional_column(row, "pin_hash")?,
    })
}

#[async_trait]
impl PlayerRepo for SqlitePlayerRepo {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_PLAYER} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("player.get", e))?;
        row.as_ref().map(row_to_player).transpose()
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_PLAYER} WHERE name = ?"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("player.get_by_name", e))?;
        row.as_ref().map(row_to_player).transpose()
    }

    async fn insert(&self, player: &Player) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO players (id, name, email, role, display_name, pin_hash)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(player.id.to_string())
        .bind(&player.name)
        .bind(&player.email)
        .bind(&player.role)
        .bind(&player.display_name)
        .bind(&player.pin_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("player.insert", e))?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Player>, RepoError> {
        let rows = sqlx::query(&format!("{SELECT_PLAYER} ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("player.list_all", e))?;
        rows.iter().map(row_to_player).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::test_support::temp_pool;

    #[tokio::test]
    async fn insert_then_fetch_by_id_and_name() {
        let (_dir, pool) = temp_pool().await;
        let repo = SqlitePlayerRepo::new(pool);
        let player = Player::registered("Lena", "abc123").with_email("lena@example.com");

        repo.insert(&player).await.expect("insert");

        assert_eq!(repo.get(player.id).await.expect("get"), Some(player.clone()));
        assert_eq!(
            repo.get_by_name(&player.name).await.expect("get_by_name"),
            Some(player)
        );
        assert_eq!(repo.get(PlayerId::new()).await.expect("get"), None);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_constraint_violation() {
        let (_dir, pool) = temp_pool().await;
        let repo = SqlitePlayerRepo::new(pool);
        repo.insert(&Player::new("speedy")).await.expect("first insert");

        let err = repo
            .insert(&Player::new("speedy"))
            .await
            .expect_err("name is taken");
        assert!(matches!(err, RepoError::ConstraintViolation(_)), "{err:?}");
    }

    #[tokio::test]
    async fn list_all_keeps_insertion_order() {
        let (_dir, pool) = temp_pool().await;
        let repo = SqlitePlayerRepo::new(pool);
        for name in ["a", "b", "c"] {
            repo.insert(&Player::new(name)).await.expect("insert");
        }

        let names: Vec<String> = repo
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}

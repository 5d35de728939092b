//! Car build persistence.

use async_trait::async_trait;
use pitlane_domain::{CarBuild, PlayerId};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::{format_timestamp, optional_column, parse_column, parse_timestamp, write_error};
use crate::infrastructure::ports::{BuildRepo, RepoError};

const SELECT_BUILD: &str = r#"
    SELECT id, player_id, chassis, engine, tires, front_wing, rear_wing, car_image, created_at
    FROM car_builds
"#;

pub struct SqliteBuildRepo {
    pool: SqlitePool,
}

impl SqliteBuildRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_build(row: &SqliteRow) -> Result<CarBuild, RepoError> {
    Ok(CarBuild {
        id: parse_column(row, "id")?,
        player_id: parse_column(row, "player_id")?,
        chassis: optional_column(row, "chassis")?,
        engine: optional_column(row, "engine")?,
        tires: optional_column(row, "tires")?,
        front_wing: optional_column(row, "front_wing")?,
        rear_wing: optional_column(row, "rear_wing")?,
        car_image: optional_column(row, "car_image")?,
        created_at: parse_timestamp(row, "created_at")?,
    })
}

#[async_trait]
impl BuildRepo for SqliteBuildRepo {
    async fn save(&self, build: &CarBuild) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO car_builds
                (id, player_id, chassis, engine, tires, front_wing, rear_wing, car_image, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(build.id.to_string())
        .bind(build.player_id.to_string())
        .bind(&build.chassis)
        .bind(&build.engine)
        .bind(&build.tires)
        .bind(&build.front_wing)
        .bind(&build.rear_wing)
        .bind(&build.car_image)
        .bind(format_timestamp(build.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("build.save", e))?;
        Ok(())
    }

    async fn list_for_player(&self, player_id: PlayerId) -> Result<Vec<CarBuild>, RepoError> {
        let rows = sqlx::query(&format!(
            "{SELECT_BUILD} WHERE player_id = ? ORDER BY created_at, rowid"
        ))
        .bind(player_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("build.list_for_player", e))?;
        rows.iter().map(row_to_build).collect()
    }

    async fn latest_for_player(&self, player_id: PlayerId) -> Result<Option<CarBuild>, RepoError> {
        let row = sqlx::query(&format!(
            "{SELECT_BUILD} WHERE player_id = ? ORDER BY created_at DESC, rowid DESC LIMIT 1"
        ))
        .bind(player_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("build.latest_for_player", e))?;
        row.as_ref().map(row_to_build).transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use pitlane_domain::{PartSlot, Player};

    use super::*;
    use crate::infrastructure::ports::PlayerRepo;
    use crate::infrastructure::sqlite::test_support::temp_pool;
    use crate::infrastructure::sqlite::SqlitePlayerRepo;

    async fn seeded_player(pool: &SqlitePool) -> PlayerId {
        let player = Player::new("builder");
        SqlitePlayerRepo::new(pool.clone())
            .insert(&player)
            .await
            .expect("insert player");
        player.id
    }

    fn build_at(player_id: PlayerId, minute: i64, engine: &str) -> CarBuild {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("valid time")
            + Duration::minutes(minute);
        CarBuild::new(player_id, at)
            .with_part(PartSlot::Chassis, "Ground Effect Optimized")
            .with_part(PartSlot::Engine, engine)
    }

    #[tokio::test]
    async fn unset_slots_round_trip_as_none() {
        let (_dir, pool) = temp_pool().await;
        let player = seeded_player(&pool).await;
        let repo = SqliteBuildRepo::new(pool);
        let build = build_at(player, 0, "2004 V10");

        repo.save(&build).await.expect("save");

        let builds = repo.list_for_player(player).await.expect("list");
        assert_eq!(builds, vec![build]);
        assert_eq!(builds[0].tires, None);
    }

    #[tokio::test]
    async fn latest_picks_newest_build() {
        let (_dir, pool) = temp_pool().await;
        let player = seeded_player(&pool).await;
        let repo = SqliteBuildRepo::new(pool);
        repo.save(&build_at(player, 5, "2006 V8")).await.expect("save");
        repo.save(&build_at(player, 1, "2004 V10")).await.expect("save");

        let latest = repo
            .latest_for_player(player)
            .await
            .expect("latest")
            .expect("has a build");
        assert_eq!(latest.engine.as_deref(), Some("2006 V8"));

        let engines: Vec<Option<String>> = repo
            .list_for_player(player)
            .await
            .expect("list")
            .into_iter()
            .map(|b| b.engine)
            .collect();
        assert_eq!(
            engines,
            vec![Some("2004 V10".to_string()), Some("2006 V8".to_string())]
        );
    }

    #[tokio::test]
    async fn player_without_builds_has_no_latest() {
        let (_dir, pool) = temp_pool().await;
        let repo = SqliteBuildRepo::new(pool);
        assert_eq!(repo.latest_for_player(PlayerId::new()).await.expect("latest"), None);
    }
}

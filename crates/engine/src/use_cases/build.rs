//! Car builds.

use std::sync::Arc;

use pitlane_domain::{CarBuild, DomainError, PartSlot, PlayerId};

use crate::infrastructure::ports::{BuildRepo, ClockPort, PlayerRepo, RepoError};

/// Part choices as submitted; blank means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSelection {
    pub chassis: String,
    pub engine: String,
    pub tires: String,
    pub front_wing: String,
    pub rear_wing: String,
    pub car_image: Option<String>,
}

pub struct BuildUseCases {
    builds: Arc<dyn BuildRepo>,
    players: Arc<dyn PlayerRepo>,
    clock: Arc<dyn ClockPort>,
}

impl BuildUseCases {
    pub fn new(
        builds: Arc<dyn BuildRepo>,
        players: Arc<dyn PlayerRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            builds,
            players,
            clock,
        }
    }

    /// Validate against the part catalog and store as the player's newest build.
    pub async fn save(
        &self,
        player_id: PlayerId,
        selection: BuildSelection,
    ) -> Result<CarBuild, BuildError> {
        if self.players.get(player_id).await?.is_none() {
            return Err(BuildError::PlayerNotFound(player_id));
        }

        let mut build = CarBuild::new(player_id, self.clock.now())
            .with_part(PartSlot::Chassis, selection.chassis)
            .with_part(PartSlot::Engine, selection.engine)
            .with_part(PartSlot::Tires, selection.tires)
            .with_part(PartSlot::FrontWing, selection.front_wing)
            .with_part(PartSlot::RearWing, selection.rear_wing);
        build.car_image = selection.car_image.filter(|image| !image.trim().is_empty());
        build.validate()?;

        self.builds.save(&build).await?;
        tracing::info!(
            player_id = %player_id,
            build_id = %build.id,
            complete = build.is_complete(),
            "Car build saved"
        );
        Ok(build)
    }

    /// Oldest first; a player with no builds gets an empty list.
    pub async fn list(&self, player_id: PlayerId) -> Result<Vec<CarBuild>, BuildError> {
        Ok(self.builds.list_for_player(player_id).await?)
    }

    pub async fn latest(&self, player_id: PlayerId) -> Result<Option<CarBuild>, BuildError> {
        Ok(self.builds.latest_for_player(player_id).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error(transparent)]
    InvalidPart(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pitlane_domain::Player;

    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockBuildRepo, MockPlayerRepo};

    fn selection() -> BuildSelection {
        BuildSelection {
            chassis: "Ground Effect Optimized".to_string(),
            engine: "2004 V10".to_string(),
            tires: "C5 Slick".to_string(),
            front_wing: "Simple Outwash".to_string(),
            rear_wing: String::new(),
            car_image: None,
        }
    }

    fn known_player() -> MockPlayerRepo {
        let mut players = MockPlayerRepo::new();
        players
            .expect_get()
            .returning(|_| Ok(Some(Player::new("builder"))));
        players
    }

    fn use_cases(builds: MockBuildRepo, players: MockPlayerRepo) -> BuildUseCases {
        let now = Utc.with_ymd_and_hms(2026, 4, 2, 15, 30, 0).single().expect("time");
        BuildUseCases::new(Arc::new(builds), Arc::new(players), Arc::new(FixedClock(now)))
    }

    #[tokio::test]
    async fn save_stores_partial_build() {
        let mut builds = MockBuildRepo::new();
        builds
            .expect_save()
            .withf(|build| build.rear_wing.is_none() && build.engine.as_deref() == Some("2004 V10"))
            .times(1)
            .returning(|_| Ok(()));

        let build = use_cases(builds, known_player())
            .save(PlayerId::new(), selection())
            .await
            .expect("saved");

        assert!(!build.is_complete());
        assert_eq!(build.created_at.to_rfc3339(), "2026-04-02T15:30:00+00:00");
    }

    #[tokio::test]
    async fn save_rejects_unknown_part() {
        let mut builds = MockBuildRepo::new();
        builds.expect_save().never();
        let mut bad = selection();
        bad.tires = "Intermediate".to_string();

        let result = use_cases(builds, known_player()).save(PlayerId::new(), bad).await;

        match result {
            Err(BuildError::InvalidPart(DomainError::UnknownPart { slot, value })) => {
                assert_eq!(slot, PartSlot::Tires);
                assert_eq!(value, "Intermediate");
            }
            other => panic!("expected unknown part, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn save_for_unknown_player_is_not_found() {
        let mut players = MockPlayerRepo::new();
        players.expect_get().returning(|_| Ok(None));
        let mut builds = MockBuildRepo::new();
        builds.expect_save().never();

        let result = use_cases(builds, players).save(PlayerId::new(), selection()).await;

        assert!(matches!(result, Err(BuildError::PlayerNotFound(_))));
    }

    #[tokio::test]
    async fn list_passes_through_empty_history() {
        let mut builds = MockBuildRepo::new();
        builds.expect_list_for_player().returning(|_| Ok(vec![]));

        let listed = use_cases(builds, MockPlayerRepo::new())
            .list(PlayerId::new())
            .await
            .expect("listed");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn latest_reports_missing_build_as_none() {
        let mut builds = MockBuildRepo::new();
        builds.expect_latest_for_player().returning(|_| Ok(None));

        let latest = use_cases(builds, MockPlayerRepo::new())
            .latest(PlayerId::new())
            .await
            .expect("queried");
        assert_eq!(latest, None);
    }
}

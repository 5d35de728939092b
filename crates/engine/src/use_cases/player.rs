//! Player accounts: plain creation, PIN registration and PIN login.

use std::sync::Arc;

use pitlane_domain::{Player, PlayerId};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::infrastructure::ports::{PlayerRepo, RepoError};

/// A freshly registered player. `login` is what they type to sign in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub player_id: PlayerId,
    pub login: String,
    pub display_name: String,
}

pub struct PlayerUseCases {
    players: Arc<dyn PlayerRepo>,
}

impl PlayerUseCases {
    pub fn new(players: Arc<dyn PlayerRepo>) -> Self {
        Self { players }
    }

    pub async fn create(
        &self,
        name: String,
        email: Option<String>,
        role: Option<String>,
    ) -> Result<Player, PlayerError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(PlayerError::Invalid("name cannot be empty"));
        }
        if self.players.get_by_name(&name).await?.is_some() {
            return Err(PlayerError::NameTaken(name));
        }

        let mut player = Player::new(name.clone());
        if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
            player = player.with_email(email);
        }
        if let Some(role) = role.filter(|r| !r.trim().is_empty()) {
            player = player.with_role(role);
        }

        self.players.insert(&player).await.map_err(|e| match e {
            RepoError::ConstraintViolation(_) => PlayerError::NameTaken(name),
            other => PlayerError::Repo(other),
        })?;
        tracing::info!(player_id = %player.id, "Player created");
        Ok(player)
    }

    pub async fn list(&self) -> Result<Vec<Player>, PlayerError> {
        Ok(self.players.list_all().await?)
    }

    /// Create a PIN-protected player whose login is a fresh UUID.
    pub async fn register(&self, display_name: String, pin: String) -> Result<Registration, PlayerError> {
        let display_name = display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(PlayerError::Invalid("name cannot be empty"));
        }
        if pin.is_empty() {
            return Err(PlayerError::Invalid("pin cannot be empty"));
        }

        let player = Player::registered(display_name.clone(), hash_pin(&pin));
        self.players.insert(&player).await?;
        tracing::info!(player_id = %player.id, "Player registered");

        Ok(Registration {
            player_id: player.id,
            login: player.name,
            display_name,
        })
    }

    /// Check a login UUID and PIN, returning the player's id.
    pub async fn verify(&self, login: &str, pin: &str) -> Result<PlayerId, PlayerError> {
        let login = Uuid::parse_str(login.trim()).map_err(|_| PlayerError::InvalidLogin)?;

        let player = self
            .players
            .get_by_name(&login.to_string())
            .await?
            .ok_or(PlayerError::Unauthorized)?;

        match player.pin_hash.as_deref() {
            Some(stored) if stored == hash_pin(pin) => Ok(player.id),
            _ => {
                tracing::debug!(player_id = %player.id, "PIN mismatch");
                Err(PlayerError::Unauthorized)
            }
        }
    }
}

/// SHA-256 of the PIN as lowercase hex.
pub fn hash_pin(pin: &str) -> String {
    hex::encode(Sha256::digest(pin.as_bytes()))
}

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Player with this name already exists: {0}")]
    NameTaken(String),
    #[error("Invalid player data: {0}")]
    Invalid(&'static str),
    #[error("Invalid UUID format")]
    InvalidLogin,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::infrastructure::ports::MockPlayerRepo;

    #[test]
    fn pin_hash_is_sha256_hex() {
        assert_eq!(
            hash_pin("1234"),
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
    }

    #[tokio::test]
    async fn create_rejects_taken_name() {
        let mut players = MockPlayerRepo::new();
        players
            .expect_get_by_name()
            .returning(|name| Ok(Some(Player::new(name))));
        players.expect_insert().never();

        let result = PlayerUseCases::new(Arc::new(players))
            .create("speedy".to_string(), None, None)
            .await;

        assert!(matches!(result, Err(PlayerError::NameTaken(name)) if name == "speedy"));
    }

    #[tokio::test]
    async fn create_maps_insert_race_to_name_taken() {
        let mut players = MockPlayerRepo::new();
        players.expect_get_by_name().returning(|_| Ok(None));
        players
            .expect_insert()
            .returning(|_| Err(RepoError::constraint("UNIQUE constraint failed: players.name")));

        let result = PlayerUseCases::new(Arc::new(players))
            .create("speedy".to_string(), None, None)
            .await;

        assert!(matches!(result, Err(PlayerError::NameTaken(_))));
    }

    #[tokio::test]
    async fn create_applies_optional_fields() {
        let mut players = MockPlayerRepo::new();
        players.expect_get_by_name().returning(|_| Ok(None));
        players.expect_insert().times(1).returning(|_| Ok(()));

        let player = PlayerUseCases::new(Arc::new(players))
            .create(" speedy ".to_string(), Some("s@example.com".to_string()), Some(" ".to_string()))
            .await
            .expect("created");

        assert_eq!(player.name, "speedy");
        assert_eq!(player.email.as_deref(), Some("s@example.com"));
        assert_eq!(player.role, pitlane_domain::DEFAULT_PLAYER_ROLE);
    }

    #[tokio::test]
    async fn registered_player_can_verify_with_pin() {
        let stored: Arc<Mutex<Option<Player>>> = Arc::default();
        let sink = stored.clone();
        let source = stored.clone();

        let mut players = MockPlayerRepo::new();
        players.expect_insert().returning(move |player| {
            *sink.lock().expect("lock") = Some(player.clone());
            Ok(())
        });
        players.expect_get_by_name().returning(move |name| {
            Ok(source
                .lock()
                .expect("lock")
                .clone()
                .filter(|player| player.name == name))
        });
        let use_cases = PlayerUseCases::new(Arc::new(players));

        let registration = use_cases
            .register("Lena".to_string(), "4321".to_string())
            .await
            .expect("registered");
        assert_eq!(registration.display_name, "Lena");
        assert_eq!(
            stored.lock().expect("lock").as_ref().and_then(|p| p.pin_hash.clone()),
            Some(hash_pin("4321"))
        );

        let verified = use_cases
            .verify(&registration.login, "4321")
            .await
            .expect("verified");
        assert_eq!(verified, registration.player_id);

        assert!(matches!(
            use_cases.verify(&registration.login, "0000").await,
            Err(PlayerError::Unauthorized)
        ));
        assert!(matches!(
            use_cases.verify(&Uuid::new_v4().to_string(), "4321").await,
            Err(PlayerError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn malformed_login_is_rejected_without_lookup() {
        let mut players = MockPlayerRepo::new();
        players.expect_get_by_name().never();

        let result = PlayerUseCases::new(Arc::new(players))
            .verify("not-a-uuid", "1234")
            .await;

        assert!(matches!(result, Err(PlayerError::InvalidLogin)));
    }

    #[tokio::test]
    async fn register_requires_a_pin() {
        let mut players = MockPlayerRepo::new();
        players.expect_insert().never();

        let result = PlayerUseCases::new(Arc::new(players))
            .register("Lena".to_string(), String::new())
            .await;

        assert!(matches!(result, Err(PlayerError::Invalid(_))));
    }
}

//! Repository port traits for database access.

use async_trait::async_trait;
use pitlane_domain::{
    CarBuild, Interaction, InteractionId, NpcId, Player, PlayerId, ScriptNode,
};

use super::error::RepoError;

// =============================================================================
// Players
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError>;
    async fn get_by_name(&self, name: &str) -> Result<Option<Player>, RepoError>;
    /// Insert a new player. A taken name is a `ConstraintViolation`.
    async fn insert(&self, player: &Player) -> Result<(), RepoError>;
    async fn list_all(&self) -> Result<Vec<Player>, RepoError>;
}

// =============================================================================
// Interactions
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionRepo: Send + Sync {
    async fn get(&self, id: InteractionId) -> Result<Option<Interaction>, RepoError>;
    /// Insert or replace by id.
    async fn save(&self, interaction: &Interaction) -> Result<(), RepoError>;
    async fn delete(&self, id: InteractionId) -> Result<(), RepoError>;

    /// An existing interaction with exactly this player, NPC and dialogue.
    async fn find_exact(
        &self,
        player_id: PlayerId,
        npc_id: NpcId,
        dialogue: &str,
    ) -> Result<Option<Interaction>, RepoError>;

    /// All interactions between a player and an NPC, newest first.
    async fn list_for_player_and_npc(
        &self,
        player_id: PlayerId,
        npc_id: NpcId,
    ) -> Result<Vec<Interaction>, RepoError>;

    /// The player's `limit` most recent interactions with any NPC, oldest first.
    async fn recent_for_player(
        &self,
        player_id: PlayerId,
        limit: u32,
    ) -> Result<Vec<Interaction>, RepoError>;
}

// =============================================================================
// Car builds
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildRepo: Send + Sync {
    async fn save(&self, build: &CarBuild) -> Result<(), RepoError>;
    /// All builds for a player, oldest first.
    async fn list_for_player(&self, player_id: PlayerId) -> Result<Vec<CarBuild>, RepoError>;
    async fn latest_for_player(&self, player_id: PlayerId) -> Result<Option<CarBuild>, RepoError>;
}

// =============================================================================
// Scripted NPC sessions
// =============================================================================

/// Where each player stands in the scripted walkthrough.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScriptSessionRepo: Send + Sync {
    async fn get_node(&self, player_id: PlayerId) -> Result<Option<ScriptNode>, RepoError>;
    async fn set_node(&self, player_id: PlayerId, node: ScriptNode) -> Result<(), RepoError>;
}

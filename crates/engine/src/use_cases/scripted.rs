//! TurboTom, the scripted NPC.
//!
//! Walks the player through a fixed tree. Progress is per player and lives
//! in the session store, so any instance can pick up where another left off.

use std::sync::Arc;

use pitlane_domain::{PlayerId, ScriptNode};

use crate::infrastructure::ports::{RepoError, ScriptSessionRepo};

pub struct ScriptedChat {
    sessions: Arc<dyn ScriptSessionRepo>,
}

impl ScriptedChat {
    pub fn new(sessions: Arc<dyn ScriptSessionRepo>) -> Self {
        Self { sessions }
    }

    /// Answer `dialogue`. A matching option advances the player and returns
    /// the next node's line; anything else repeats the current line.
    pub async fn execute(&self, player_id: PlayerId, dialogue: &str) -> Result<String, ScriptError> {
        let current = self
            .sessions
            .get_node(player_id)
            .await
            .map_err(|e| match e {
                RepoError::Serialization(detail) => ScriptError::State(detail),
                other => ScriptError::Repo(other),
            })?
            .unwrap_or_default();

        match current.advance(dialogue) {
            Some(next) => {
                self.sessions.set_node(player_id, next).await?;
                tracing::debug!(player_id = %player_id, from = %current, to = %next, "Script advanced");
                Ok(next.line().to_string())
            }
            None => Ok(current.line().to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("TurboTom state error: {0}")]
    State(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

//! Player entity - someone who talks to the NPCs and saves builds

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// Role given to players created without an explicit one.
pub const DEFAULT_PLAYER_ROLE: &str = "player";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Unique login name. Players registered with a PIN use their id here.
    pub name: String,
    pub email: Option<String>,
    pub role: String,
    /// Human-readable name shown to the NPC.
    pub display_name: Option<String>,
    /// SHA-256 hex digest of the PIN, if the player registered with one.
    #[serde(skip_serializing)]
    pub pin_hash: Option<String>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            email: None,
            role: DEFAULT_PLAYER_ROLE.to_string(),
            display_name: None,
            pin_hash: None,
        }
    }

    /// A player whose login name is their own id, protected by a PIN.
    pub fn registered(display_name: impl Into<String>, pin_hash: impl Into<String>) -> Self {
        let id = PlayerId::new();
        Self {
            id,
            name: id.to_string(),
            email: None,
            role: DEFAULT_PLAYER_ROLE.to_string(),
            display_name: Some(display_name.into()),
            pin_hash: Some(pin_hash.into()),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Name the NPC greets: display name when present, login name otherwise.
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

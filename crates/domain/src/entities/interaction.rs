//! Interaction entity - one player line and the NPC reply to it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{InteractionId, NpcId, PlayerId, Sentiment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: InteractionId,
    pub player_id: PlayerId,
    pub npc_id: NpcId,
    /// What the player said.
    pub dialogue: String,
    pub sentiment: Sentiment,
    pub npc_reply: String,
    /// Sentiment of the reply, kept for storage only.
    pub npc_sentiment: Sentiment,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(
        player_id: PlayerId,
        npc_id: NpcId,
        dialogue: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: InteractionId::new(),
            player_id,
            npc_id,
            dialogue: dialogue.into(),
            sentiment: Sentiment::Neutral,
            npc_reply: String::new(),
            npc_sentiment: Sentiment::Neutral,
            created_at,
        }
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn with_reply(mut self, reply: impl Into<String>, npc_sentiment: Sentiment) -> Self {
        self.npc_reply = reply.into();
        self.npc_sentiment = npc_sentiment;
        self
    }
}

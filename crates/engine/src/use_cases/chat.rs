//! Chat with the generative race engineer.
//!
//! Gathers what the orchestrator needs (recent history, greeting name,
//! latest build, sentiment), asks for a reply, and records the exchange.

use std::sync::Arc;
use std::time::Instant;

use pitlane_domain::{Interaction, NpcId, Player, PlayerId, Sentiment};
use serde::Serialize;

use crate::infrastructure::ports::{
    BuildRepo, ClockPort, InteractionRepo, PlayerRepo, RepoError, SentimentPort,
};
use crate::use_cases::dialogue::{DialogueRequest, GenerateNpcReply};

/// How many earlier interactions go into the prompt.
pub const HISTORY_TURNS: u32 = 2;

/// One generated exchange, before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcTurn {
    pub sentiment: Sentiment,
    pub reply: String,
    pub npc_sentiment: Sentiment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub player_dialogue: String,
    pub npc_reply: String,
}

pub struct ChatWithNpc {
    players: Arc<dyn PlayerRepo>,
    interactions: Arc<dyn InteractionRepo>,
    builds: Arc<dyn BuildRepo>,
    sentiment: Arc<dyn SentimentPort>,
    generate: Arc<GenerateNpcReply>,
    clock: Arc<dyn ClockPort>,
}

impl ChatWithNpc {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        interactions: Arc<dyn InteractionRepo>,
        builds: Arc<dyn BuildRepo>,
        sentiment: Arc<dyn SentimentPort>,
        generate: Arc<GenerateNpcReply>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            players,
            interactions,
            builds,
            sentiment,
            generate,
            clock,
        }
    }

    /// Player says `dialogue` to `npc_id`; the reply is stored and returned.
    pub async fn execute(
        &self,
        player_id: PlayerId,
        npc_id: NpcId,
        dialogue: String,
    ) -> Result<ChatReply, ChatError> {
        let player = self.load_player(player_id).await?;
        let turn = self.respond(&player, &dialogue).await?;

        let commit_started = Instant::now();
        let interaction = Interaction::new(player.id, npc_id, dialogue.clone(), self.clock.now())
            .with_sentiment(turn.sentiment)
            .with_reply(turn.reply.clone(), turn.npc_sentiment);
        self.interactions.save(&interaction).await?;
        tracing::debug!(
            player_id = %player.id,
            interaction_id = %interaction.id,
            elapsed_ms = commit_started.elapsed().as_millis() as u64,
            "Interaction stored"
        );

        Ok(ChatReply {
            player_dialogue: dialogue,
            npc_reply: turn.reply,
        })
    }

    pub async fn load_player(&self, player_id: PlayerId) -> Result<Player, ChatError> {
        self.players
            .get(player_id)
            .await?
            .ok_or(ChatError::PlayerNotFound(player_id))
    }

    /// Classify, generate and classify the reply. Nothing is written.
    pub async fn respond(&self, player: &Player, dialogue: &str) -> Result<NpcTurn, RepoError> {
        let history = self
            .interactions
            .recent_for_player(player.id, HISTORY_TURNS)
            .await?;

        let sentiment_started = Instant::now();
        let sentiment = self.sentiment.classify(dialogue).await;
        tracing::debug!(
            player_id = %player.id,
            sentiment = %sentiment,
            elapsed_ms = sentiment_started.elapsed().as_millis() as u64,
            "Player sentiment classified"
        );

        let build = self.builds.latest_for_player(player.id).await?;

        let request = DialogueRequest::new(player.id, dialogue, sentiment.as_str())
            .with_player_name(player.greeting_name())
            .with_history(history)
            .with_build(build);
        let reply = self.generate.execute(request).await;

        let npc_sentiment = self.sentiment.classify(&reply).await;

        Ok(NpcTurn {
            sentiment,
            reply,
            npc_sentiment,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

//! Interaction records: store, list, update, delete.
//!
//! Storing or updating a player line always regenerates the NPC reply; the
//! caller never supplies sentiment or reply text.

use std::sync::Arc;

use pitlane_domain::{Interaction, InteractionId, NpcId, PlayerId};

use crate::infrastructure::ports::{ClockPort, InteractionRepo, RepoError};
use crate::use_cases::chat::{ChatError, ChatWithNpc};

pub struct InteractionUseCases {
    interactions: Arc<dyn InteractionRepo>,
    chat: Arc<ChatWithNpc>,
    clock: Arc<dyn ClockPort>,
}

impl InteractionUseCases {
    pub fn new(
        interactions: Arc<dyn InteractionRepo>,
        chat: Arc<ChatWithNpc>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            interactions,
            chat,
            clock,
        }
    }

    /// Record a new player line with a generated reply. The same line to the
    /// same NPC twice is a conflict.
    pub async fn store(
        &self,
        player_id: PlayerId,
        npc_id: NpcId,
        dialogue: String,
    ) -> Result<Interaction, InteractionError> {
        if self
            .interactions
            .find_exact(player_id, npc_id, &dialogue)
            .await?
            .is_some()
        {
            return Err(InteractionError::Duplicate);
        }

        let player = self.chat.load_player(player_id).await?;
        let turn = self.chat.respond(&player, &dialogue).await?;

        let interaction = Interaction::new(player_id, npc_id, dialogue, self.clock.now())
            .with_sentiment(turn.sentiment)
            .with_reply(turn.reply, turn.npc_sentiment);
        self.interactions.save(&interaction).await?;

        tracing::info!(
            player_id = %player_id,
            npc_id = %npc_id,
            interaction_id = %interaction.id,
            "Interaction stored"
        );
        Ok(interaction)
    }

    /// Newest first. No interactions at all is reported as not found.
    pub async fn list(
        &self,
        player_id: PlayerId,
        npc_id: NpcId,
    ) -> Result<Vec<Interaction>, InteractionError> {
        let interactions = self
            .interactions
            .list_for_player_and_npc(player_id, npc_id)
            .await?;
        if interactions.is_empty() {
            return Err(InteractionError::NoneFound { player_id, npc_id });
        }
        Ok(interactions)
    }

    /// Replace the player line, then re-classify and regenerate the reply.
    pub async fn update(
        &self,
        id: InteractionId,
        dialogue: String,
    ) -> Result<Interaction, InteractionError> {
        let mut interaction = self
            .interactions
            .get(id)
            .await?
            .ok_or(InteractionError::NotFound(id))?;

        let player = self.chat.load_player(interaction.player_id).await?;
        let turn = self.chat.respond(&player, &dialogue).await?;

        interaction.dialogue = dialogue;
        interaction.sentiment = turn.sentiment;
        interaction.npc_reply = turn.reply;
        interaction.npc_sentiment = turn.npc_sentiment;
        self.interactions.save(&interaction).await?;

        Ok(interaction)
    }

    /// Returns the record as it was before deletion.
    pub async fn delete(&self, id: InteractionId) -> Result<Interaction, InteractionError> {
        let interaction = self
            .interactions
            .get(id)
            .await?
            .ok_or(InteractionError::NotFound(id))?;
        self.interactions.delete(id).await?;
        Ok(interaction)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InteractionError {
    #[error("This interaction already exists.")]
    Duplicate,
    #[error("Interaction not found: {0}")]
    NotFound(InteractionId),
    #[error("No interactions found for player {player_id} and NPC {npc_id}")]
    NoneFound { player_id: PlayerId, npc_id: NpcId },
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<ChatError> for InteractionError {
    fn from(error: ChatError) -> Self {
        match error {
            ChatError::PlayerNotFound(id) => InteractionError::PlayerNotFound(id),
            ChatError::Repo(e) => InteractionError::Repo(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pitlane_domain::{Player, Sentiment};

    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{
        MockBuildRepo, MockInferencePort, MockInteractionRepo, MockPlayerRepo, MockSentimentPort,
    };
    use crate::use_cases::dialogue::GenerateNpcReply;

    /// Chat collaborators that answer every line with "Noted." for `player`.
    fn chat_for(player: Player, history: MockInteractionRepo) -> Arc<ChatWithNpc> {
        let mut players = MockPlayerRepo::new();
        players.expect_get().returning(move |_| Ok(Some(player.clone())));
        let mut builds = MockBuildRepo::new();
        builds.expect_latest_for_player().returning(|_| Ok(None));
        let mut sentiment = MockSentimentPort::new();
        sentiment.expect_classify().returning(|text| {
            if text.contains("hate") {
                Sentiment::Negative
            } else {
                Sentiment::Neutral
            }
        });
        let mut inference = MockInferencePort::new();
        inference
            .expect_generate()
            .returning(|_| Ok(r#"{"response":"Noted."}"#.to_string()));

        Arc::new(ChatWithNpc::new(
            Arc::new(players),
            Arc::new(history),
            Arc::new(builds),
            Arc::new(sentiment),
            Arc::new(GenerateNpcReply::new(Arc::new(inference))),
            Arc::new(FixedClock(Utc::now())),
        ))
    }

    fn empty_history() -> MockInteractionRepo {
        let mut history = MockInteractionRepo::new();
        history.expect_recent_for_player().returning(|_, _| Ok(vec![]));
        history
    }

    fn use_cases(repo: MockInteractionRepo, player: Player) -> InteractionUseCases {
        InteractionUseCases::new(
            Arc::new(repo),
            chat_for(player, empty_history()),
            Arc::new(FixedClock(Utc::now())),
        )
    }

    #[tokio::test]
    async fn store_rejects_exact_duplicates() {
        let player = Player::new("sam");
        let existing = Interaction::new(player.id, NpcId::RACE_ENGINEER, "hi", Utc::now());
        let mut repo = MockInteractionRepo::new();
        repo.expect_find_exact()
            .withf(|_, npc, dialogue| *npc == NpcId::RACE_ENGINEER && dialogue == "hi")
            .returning(move |_, _, _| Ok(Some(existing.clone())));
        repo.expect_save().never();

        let result = use_cases(repo, player.clone())
            .store(player.id, NpcId::RACE_ENGINEER, "hi".to_string())
            .await;

        assert!(matches!(result, Err(InteractionError::Duplicate)));
    }

    #[tokio::test]
    async fn store_generates_reply_and_sentiments() {
        let player = Player::new("sam");
        let mut repo = MockInteractionRepo::new();
        repo.expect_find_exact().returning(|_, _, _| Ok(None));
        repo.expect_save().times(1).returning(|_| Ok(()));

        let stored = use_cases(repo, player.clone())
            .store(player.id, NpcId::new(3), "I hate wet tires".to_string())
            .await
            .expect("stored");

        assert_eq!(stored.npc_id, NpcId::new(3));
        assert_eq!(stored.sentiment, Sentiment::Negative);
        assert_eq!(stored.npc_reply, "Noted.");
        assert_eq!(stored.npc_sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn empty_listing_is_not_found() {
        let player = Player::new("sam");
        let mut repo = MockInteractionRepo::new();
        repo.expect_list_for_player_and_npc().returning(|_, _| Ok(vec![]));

        let result = use_cases(repo, player.clone())
            .list(player.id, NpcId::RACE_ENGINEER)
            .await;

        assert!(matches!(result, Err(InteractionError::NoneFound { .. })));
    }

    #[tokio::test]
    async fn update_regenerates_everything_but_identity() {
        let player = Player::new("sam");
        let existing = Interaction::new(player.id, NpcId::RACE_ENGINEER, "hi", Utc::now())
            .with_reply("Hey!", Sentiment::Positive);
        let id = existing.id;
        let created_at = existing.created_at;
        let mut repo = MockInteractionRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(existing.clone())));
        repo.expect_save()
            .withf(move |saved| saved.id == id && saved.dialogue == "I hate this")
            .times(1)
            .returning(|_| Ok(()));

        let updated = use_cases(repo, player)
            .update(id, "I hate this".to_string())
            .await
            .expect("updated");

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.sentiment, Sentiment::Negative);
        assert_eq!(updated.npc_reply, "Noted.");
        assert_eq!(updated.npc_sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_record_are_not_found() {
        let player = Player::new("sam");
        let mut repo = MockInteractionRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_delete().never();
        let use_cases = use_cases(repo, player);

        let id = InteractionId::new();
        assert!(matches!(
            use_cases.update(id, "x".to_string()).await,
            Err(InteractionError::NotFound(missing)) if missing == id
        ));
        assert!(matches!(
            use_cases.delete(id).await,
            Err(InteractionError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record() {
        let player = Player::new("sam");
        let record = Interaction::new(player.id, NpcId::RACE_ENGINEER, "bye", Utc::now());
        let expected = record.clone();
        let mut repo = MockInteractionRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(record.clone())));
        repo.expect_delete().times(1).returning(|_| Ok(()));

        let deleted = use_cases(repo, player).delete(expected.id).await.expect("deleted");
        assert_eq!(deleted, expected);
    }
}

//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    ports::{
        BuildRepo, ClockPort, InferencePort, InteractionRepo, PlayerRepo, RandomPort,
        ScriptSessionRepo, SentimentPort,
    },
    sqlite::SqliteRepositories,
};
use crate::use_cases;

/// Main application state.
///
/// Holds all repositories and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repository ports.
pub struct Repositories {
    pub player: Arc<dyn PlayerRepo>,
    pub interaction: Arc<dyn InteractionRepo>,
    pub build: Arc<dyn BuildRepo>,
    pub script_session: Arc<dyn ScriptSessionRepo>,
}

impl From<SqliteRepositories> for Repositories {
    fn from(repos: SqliteRepositories) -> Self {
        Self {
            player: repos.player,
            interaction: repos.interaction,
            build: repos.build,
            script_session: repos.script_session,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub chat: Arc<use_cases::ChatWithNpc>,
    pub interaction: use_cases::InteractionUseCases,
    pub player: use_cases::PlayerUseCases,
    pub build: use_cases::BuildUseCases,
    pub scripted: use_cases::ScriptedChat,
    pub pick_npc: use_cases::PickNpc,
}

impl App {
    /// Wire use cases with the system clock and RNG.
    pub fn new(
        repositories: Repositories,
        inference: Arc<dyn InferencePort>,
        sentiment: Arc<dyn SentimentPort>,
    ) -> Self {
        Self::with_time_and_chance(
            repositories,
            inference,
            sentiment,
            Arc::new(SystemClock),
            Arc::new(SystemRandom),
        )
    }

    pub fn with_time_and_chance(
        repositories: Repositories,
        inference: Arc<dyn InferencePort>,
        sentiment: Arc<dyn SentimentPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let generate = Arc::new(use_cases::GenerateNpcReply::new(inference));
        let chat = Arc::new(use_cases::ChatWithNpc::new(
            repositories.player.clone(),
            repositories.interaction.clone(),
            repositories.build.clone(),
            sentiment,
            generate,
            clock.clone(),
        ));

        let use_cases = UseCases {
            interaction: use_cases::InteractionUseCases::new(
                repositories.interaction.clone(),
                chat.clone(),
                clock.clone(),
            ),
            chat,
            player: use_cases::PlayerUseCases::new(repositories.player.clone()),
            build: use_cases::BuildUseCases::new(
                repositories.build.clone(),
                repositories.player.clone(),
                clock,
            ),
            scripted: use_cases::ScriptedChat::new(repositories.script_session.clone()),
            pick_npc: use_cases::PickNpc::new(random),
        };

        Self {
            repositories,
            use_cases,
        }
    }
}

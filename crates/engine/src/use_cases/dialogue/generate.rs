//! The dialogue orchestrator.

use std::sync::Arc;
use std::time::Instant;

use pitlane_domain::{CarBuild, Interaction, PlayerId, ReplyPolicy, SessionStage};

use super::context::{condense, count_tokens, tighten, RETRY_CONTEXT_TOKEN_CAP};
use super::extract::extract_reply;
use super::prompt::{build_block, build_prompt, mood_instruction, PromptParts};
use super::sentinel::inference_sentinel;
use crate::infrastructure::ports::InferencePort;

/// Prompts longer than this (in whitespace tokens) are rebuilt once with
/// tighter history.
pub const PROMPT_TOKEN_CEILING: usize = 1200;

/// Everything known about the player at the moment they speak.
#[derive(Debug, Clone)]
pub struct DialogueRequest {
    pub player_id: PlayerId,
    pub utterance: String,
    /// Any sentiment label; unknown labels get the cautious mood.
    pub sentiment: String,
    pub player_name: String,
    /// Prior interactions, oldest first.
    pub history: Vec<Interaction>,
    pub stage: SessionStage,
    pub build: Option<CarBuild>,
}

impl DialogueRequest {
    pub fn new(player_id: PlayerId, utterance: impl Into<String>, sentiment: impl Into<String>) -> Self {
        Self {
            player_id,
            utterance: utterance.into(),
            sentiment: sentiment.into(),
            player_name: String::new(),
            history: Vec::new(),
            stage: SessionStage::FirstContact,
            build: None,
        }
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Sets the history and derives the session stage from it.
    pub fn with_history(mut self, history: Vec<Interaction>) -> Self {
        self.stage = SessionStage::from_history_len(history.len());
        self.history = history;
        self
    }

    pub fn with_stage(mut self, stage: SessionStage) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_build(mut self, build: Option<CarBuild>) -> Self {
        self.build = build;
        self
    }
}

/// Generate one reply from Dax.
///
/// Stateless per call. The only suspension point is the backend request.
pub struct GenerateNpcReply {
    inference: Arc<dyn InferencePort>,
}

impl GenerateNpcReply {
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Always returns display text. Backend and payload failures come back as
    /// sentinel strings, indistinguishable in type from a real reply.
    pub async fn execute(&self, request: DialogueRequest) -> String {
        let prompt = assemble_prompt(&request);

        let started = Instant::now();
        let reply = match self.inference.generate(&prompt.text).await {
            Ok(body) => extract_reply(&body).into_text(),
            Err(error) => {
                tracing::error!(
                    player_id = %request.player_id,
                    error = %error,
                    "NPC reply generation failed"
                );
                inference_sentinel(&error)
            }
        };

        tracing::info!(
            player_id = %request.player_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            prompt_rebuilt = prompt.rebuilt,
            "NPC reply generated"
        );
        reply
    }
}

struct AssembledPrompt {
    text: String,
    rebuilt: bool,
}

/// Build the prompt, rebuilding once with tightened history if it is over
/// [`PROMPT_TOKEN_CEILING`]. A prompt still too long after that is sent as-is.
fn assemble_prompt(request: &DialogueRequest) -> AssembledPrompt {
    let context = condense(&request.history);
    let mood = mood_instruction(&request.sentiment, request.build.as_ref());
    let build = request.build.as_ref().map(build_block).unwrap_or_default();

    let mut parts = PromptParts {
        player_name: &request.player_name,
        stage: request.stage,
        policy: ReplyPolicy::detect(&request.utterance),
        sentiment_label: &request.sentiment,
        mood_instruction: &mood,
        build: &build,
        context: &context,
        utterance: &request.utterance,
    };
    let prompt = build_prompt(&parts);

    let tokens = count_tokens(&prompt);
    if tokens <= PROMPT_TOKEN_CEILING {
        return AssembledPrompt {
            text: prompt,
            rebuilt: false,
        };
    }

    tracing::warn!(
        player_id = %request.player_id,
        tokens,
        "Prompt too long, truncating context"
    );
    let tightened = tighten(&context, RETRY_CONTEXT_TOKEN_CAP);
    parts.context = &tightened;
    AssembledPrompt {
        text: build_prompt(&parts),
        rebuilt: true,
    }
}

//! Per-request signals that select prompt branches.

use serde::{Deserialize, Serialize};

/// Whether the player has talked to the NPC before.
///
/// Decided by the caller from the history it loaded, never by the prompt
/// builder from an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStage {
    FirstContact,
    Returning,
}

impl SessionStage {
    pub fn from_history_len(len: usize) -> Self {
        if len == 0 {
            SessionStage::FirstContact
        } else {
            SessionStage::Returning
        }
    }
}

/// Greeting phrases that make an utterance small talk.
pub const SMALL_TALK_PHRASES: &[&str] = &[
    "hi",
    "hello",
    "how are you",
    "what's up",
    "how's it going",
    "how's your day",
    "what's new",
    "good morning",
    "good night",
];

/// How long and what kind of reply the generator should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyPolicy {
    /// Exactly one sentence mixing a friendly reply with a build hint.
    SmallTalk,
    /// One or two sentences of build advice.
    BuildAdvice,
}

impl ReplyPolicy {
    /// Small talk when the utterance starts with a greeting phrase followed by
    /// nothing, punctuation, or more words. Case-insensitive.
    pub fn detect(utterance: &str) -> Self {
        let normalized = utterance
            .trim()
            .to_lowercase()
            .replace(['\u{2019}', '\u{2018}'], "'");

        let is_small_talk = SMALL_TALK_PHRASES.iter().any(|phrase| {
            normalized
                .strip_prefix(phrase)
                .map(|rest| !rest.starts_with(char::is_alphanumeric))
                .unwrap_or(false)
        });

        if is_small_talk {
            ReplyPolicy::SmallTalk
        } else {
            ReplyPolicy::BuildAdvice
        }
    }
}

//! Mood directives that steer the tone of a generated reply.
//!
//! The classifier only emits `negative`, `neutral` and `positive`, but other
//! labels (`happy`, `sad`, `angry`) are accepted too. Anything unrecognised
//! falls back to [`Mood::Cautious`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// positive / happy
    Excited,
    /// negative / sad
    Empathetic,
    /// angry
    Deescalating,
    /// neutral
    Composed,
    /// unknown label
    Cautious,
}

impl Mood {
    /// Map a sentiment label to a mood, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" | "happy" => Mood::Excited,
            "negative" | "sad" => Mood::Empathetic,
            "angry" => Mood::Deescalating,
            "neutral" => Mood::Composed,
            _ => Mood::Cautious,
        }
    }

    /// Instruction appended to the prompt for this mood.
    pub fn instruction(&self) -> &'static str {
        match self {
            Mood::Excited => "Respond in an excited, supportive, and energetic tone.",
            Mood::Empathetic => "Respond warmly and empathetically. Encourage the player kindly.",
            Mood::Deescalating => {
                "Stay calm. Respond politely but firmly, de-escalating the situation."
            }
            Mood::Composed => "Respond normally and politely without heavy emotions.",
            Mood::Cautious => "Respond cautiously and professionally, staying on topic.",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.instruction())
    }
}

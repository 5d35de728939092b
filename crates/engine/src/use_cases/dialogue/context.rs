//! Bounded conversation history for the prompt.
//!
//! Tokens are whitespace-separated words. Nothing linguistic.

use pitlane_domain::Interaction;

/// Tokens of history kept on the first attempt.
pub const CONTEXT_TOKEN_CAP: usize = 300;

/// Cap applied when the assembled prompt is too long. It is applied to the
/// already-condensed block, so it can only shorten it.
pub const RETRY_CONTEXT_TOKEN_CAP: usize = 800;

/// Stands in for the history block when there is nothing to show.
pub const NO_HISTORY_PLACEHOLDER: &str =
    "No recent conversation. Assume this is the start of the mission.";

pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Format `history` (oldest first) as player/NPC line pairs and keep the last
/// [`CONTEXT_TOKEN_CAP`] tokens.
pub fn condense(history: &[Interaction]) -> String {
    let transcript: String = history
        .iter()
        .map(|entry| format!("Player: {}\nNPC: {}\n", entry.dialogue, entry.npc_reply))
        .collect();

    let block = last_tokens(&transcript, CONTEXT_TOKEN_CAP);
    if block.is_empty() {
        NO_HISTORY_PLACEHOLDER.to_string()
    } else {
        block
    }
}

/// Keep the last `cap` tokens of an already-condensed block.
pub fn tighten(block: &str, cap: usize) -> String {
    let tightened = last_tokens(block, cap);
    if tightened.is_empty() {
        NO_HISTORY_PLACEHOLDER.to_string()
    } else {
        tightened
    }
}

fn last_tokens(text: &str, cap: usize) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let start = tokens.len().saturating_sub(cap);
    tokens[start..].join(" ")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pitlane_domain::{NpcId, PlayerId};

    use super::*;

    fn turn(dialogue: &str, reply: &str) -> Interaction {
        Interaction::new(PlayerId::new(), NpcId::RACE_ENGINEER, dialogue, Utc::now())
            .with_reply(reply, Default::default())
    }

    #[test]
    fn empty_history_uses_placeholder() {
        assert_eq!(condense(&[]), NO_HISTORY_PLACEHOLDER);
    }

    #[test]
    fn blank_turns_still_count_as_history() {
        let block = condense(&[turn("", "")]);
        assert_eq!(block, "Player: NPC:");
    }

    #[test]
    fn turns_are_rendered_oldest_first_on_one_line() {
        let block = condense(&[
            turn("Which engine?", "Take the V8."),
            turn("Thanks!", "Anytime."),
        ]);
        assert_eq!(
            block,
            "Player: Which engine? NPC: Take the V8. Player: Thanks! NPC: Anytime."
        );
    }

    #[test]
    fn history_over_the_cap_keeps_the_most_recent_tokens() {
        // "Player:" + 147 words + "NPC:" + 152 words = 301 tokens
        let words = |prefix: &str, n: usize| {
            (0..n).map(|i| format!("{prefix}{i}")).collect::<Vec<_>>().join(" ")
        };
        let block = condense(&[turn(&words("p", 147), &words("n", 152))]);

        assert_eq!(count_tokens(&block), CONTEXT_TOKEN_CAP);
        assert!(block.starts_with("p0 p1"), "dropped only the first token");
        assert!(block.ends_with("n151"));
    }

    #[test]
    fn tighten_only_ever_shortens() {
        let block = (0..300).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        assert_eq!(tighten(&block, RETRY_CONTEXT_TOKEN_CAP), block);
        assert_eq!(tighten(&block, 2), "298 299");
        assert_eq!(tighten(NO_HISTORY_PLACEHOLDER, RETRY_CONTEXT_TOKEN_CAP), NO_HISTORY_PLACEHOLDER);
    }
}

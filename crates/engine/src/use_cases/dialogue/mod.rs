//! NPC dialogue generation.
//!
//! Turns a player line plus what we know about the player (name, recent
//! history, latest build, sentiment) into a reply from Dax, the race engineer.
//! Every runtime failure degrades to a sentinel reply; callers always get
//! display text back.

mod context;
mod extract;
mod generate;
mod prompt;
mod sentinel;

pub use context::{
    condense, count_tokens, tighten, CONTEXT_TOKEN_CAP, NO_HISTORY_PLACEHOLDER,
    RETRY_CONTEXT_TOKEN_CAP,
};
pub use extract::{extract_reply, ExtractedReply};
pub use generate::{DialogueRequest, GenerateNpcReply, PROMPT_TOKEN_CEILING};
pub use prompt::{build_block, build_prompt, mood_instruction, PromptParts, COMPLETE_BUILD_DIRECTIVE};
pub use sentinel::{inference_sentinel, is_sentinel, EMPTY_RESPONSE, SENTINEL_PREFIX, UNEXPECTED_FORMAT};

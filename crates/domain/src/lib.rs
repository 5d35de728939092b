//! Pitlane domain types.
//!
//! Players, their NPC interactions and car builds, plus the vocabulary the
//! dialogue engine works with: sentiment, mood, part catalog and the scripted
//! walkthrough tree. Nothing here performs I/O.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{CarBuild, Interaction, Player, DEFAULT_PLAYER_ROLE};
pub use error::DomainError;
pub use ids::{BuildId, InteractionId, NpcId, PlayerId};
pub use value_objects::{
    catalog_listing, Mood, PartSlot, ReplyPolicy, ScriptNode, Sentiment, SessionStage,
    SMALL_TALK_PHRASES,
};

//! Value objects - Immutable objects defined by their attributes

mod dialogue_policy;
mod mood;
mod part_catalog;
mod script_node;
mod sentiment;

pub use dialogue_policy::{ReplyPolicy, SessionStage, SMALL_TALK_PHRASES};
pub use mood::Mood;
pub use part_catalog::{catalog_listing, PartSlot};
pub use script_node::ScriptNode;
pub use sentiment::Sentiment;

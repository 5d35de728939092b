//! Use cases - User story orchestration.
//!
//! Each module covers one area of the game. Use cases take their
//! collaborators as port trait objects and are composed in `App`.

pub mod build;
pub mod chat;
pub mod dialogue;
pub mod interaction;
pub mod npc;
pub mod player;
pub mod scripted;

pub use build::{BuildError, BuildSelection, BuildUseCases};
pub use chat::{ChatError, ChatReply, ChatWithNpc};
pub use dialogue::GenerateNpcReply;
pub use interaction::{InteractionError, InteractionUseCases};
pub use npc::{NpcKind, PickNpc};
pub use player::{PlayerError, PlayerUseCases, Registration};
pub use scripted::{ScriptError, ScriptedChat};

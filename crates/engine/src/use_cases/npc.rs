//! Which NPC a new chat goes to.

use std::sync::Arc;

use serde::Serialize;

use crate::infrastructure::ports::RandomPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcKind {
    /// Dax, backed by the language model.
    RaceEngineer,
    /// TurboTom, the fixed walkthrough.
    Scripted,
}

impl NpcKind {
    /// Page the client should open for this NPC.
    pub fn chat_path(&self) -> &'static str {
        match self {
            NpcKind::RaceEngineer => "/chat",
            NpcKind::Scripted => "/chat_static",
        }
    }
}

/// Picks an NPC uniformly at random.
pub struct PickNpc {
    random: Arc<dyn RandomPort>,
}

impl PickNpc {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    pub fn execute(&self) -> NpcKind {
        if self.random.gen_range(0, 1) == 0 {
            NpcKind::RaceEngineer
        } else {
            NpcKind::Scripted
        }
    }
}

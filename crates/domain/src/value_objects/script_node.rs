//! Scripted build walkthrough for the rule-based NPC.
//!
//! A finite tree: each node has one NPC line and a set of option labels that
//! advance to another node. Labels are matched exactly, ignoring case and
//! surrounding whitespace.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScriptNode {
    #[default]
    Start,
    IntroInfo,
    ChassisStep,
    EngineStep,
    TiresStep,
    SpoilerStep,
    FinalStep,
}

impl ScriptNode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptNode::Start => "start",
            ScriptNode::IntroInfo => "intro_info",
            ScriptNode::ChassisStep => "chassis_step",
            ScriptNode::EngineStep => "engine_step",
            ScriptNode::TiresStep => "tires_step",
            ScriptNode::SpoilerStep => "spoiler_step",
            ScriptNode::FinalStep => "final_step",
        }
    }

    /// What the NPC says at this node.
    pub fn line(&self) -> &'static str {
        match self {
            ScriptNode::Start => "Hey, rookie! Ready to build this machine?",
            ScriptNode::IntroInfo => {
                "I\u{2019}m TurboTom, retired F1 engineer. I\u{2019}ll guide you step-by-step."
            }
            ScriptNode::ChassisStep => "First up: pick a chassis. Standard or Lightweight?",
            ScriptNode::EngineStep => "Great. Now choose your engine: Turbo or V8?",
            ScriptNode::TiresStep => "Tires next. Slick for dry, Wet for rain. Your call.",
            ScriptNode::SpoilerStep => "Last piece: spoiler. None or Carbon Fiber?",
            ScriptNode::FinalStep => {
                "All set! Good luck on the track\u{2014}don\u{2019}t forget to warm up those tires!"
            }
        }
    }

    /// Option labels and the node each one leads to.
    pub fn options(&self) -> &'static [(&'static str, ScriptNode)] {
        match self {
            ScriptNode::Start => &[
                ("Let's go!", ScriptNode::ChassisStep),
                ("What is this?", ScriptNode::IntroInfo),
            ],
            ScriptNode::IntroInfo => &[("Let\u{2019}s build!", ScriptNode::ChassisStep)],
            ScriptNode::ChassisStep => &[
                ("Standard", ScriptNode::EngineStep),
                ("Lightweight", ScriptNode::EngineStep),
            ],
            ScriptNode::EngineStep => &[
                ("Turbo", ScriptNode::TiresStep),
                ("V8", ScriptNode::TiresStep),
            ],
            ScriptNode::TiresStep => &[
                ("Slick", ScriptNode::SpoilerStep),
                ("Wet", ScriptNode::SpoilerStep),
            ],
            ScriptNode::SpoilerStep => &[
                ("None", ScriptNode::FinalStep),
                ("Carbon Fiber", ScriptNode::FinalStep),
            ],
            ScriptNode::FinalStep => &[],
        }
    }

    /// The node reached by answering `dialogue` here, if it matches an option.
    pub fn advance(&self, dialogue: &str) -> Option<ScriptNode> {
        let answer = dialogue.trim().to_lowercase();
        self.options()
            .iter()
            .find(|(label, _)| label.to_lowercase() == answer)
            .map(|(_, next)| *next)
    }
}

impl fmt::Display for ScriptNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScriptNode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(ScriptNode::Start),
            "intro_info" => Ok(ScriptNode::IntroInfo),
            "chassis_step" => Ok(ScriptNode::ChassisStep),
            "engine_step" => Ok(ScriptNode::EngineStep),
            "tires_step" => Ok(ScriptNode::TiresStep),
            "spoiler_step" => Ok(ScriptNode::SpoilerStep),
            "final_step" => Ok(ScriptNode::FinalStep),
            _ => Err(DomainError::parse(format!("Unknown script node: {}", s))),
        }
    }
}

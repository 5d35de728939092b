//! Closed catalog of car parts.
//!
//! A build has five slots and each slot accepts exactly two values. The
//! generator has no other source for these names, so the same listing is
//! rendered into every prompt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five slots of a car build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartSlot {
    Chassis,
    Engine,
    Tires,
    FrontWing,
    RearWing,
}

impl PartSlot {
    /// All slots in catalog order.
    pub const ALL: [PartSlot; 5] = [
        PartSlot::Chassis,
        PartSlot::Engine,
        PartSlot::Tires,
        PartSlot::FrontWing,
        PartSlot::RearWing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PartSlot::Chassis => "Chassis",
            PartSlot::Engine => "Engine",
            PartSlot::Tires => "Tires",
            PartSlot::FrontWing => "Front Wing",
            PartSlot::RearWing => "Rear Wing",
        }
    }

    /// Valid values for this slot, in display order.
    pub fn valid_values(&self) -> &'static [&'static str] {
        match self {
            PartSlot::Chassis => &["Standard Monocoque", "Ground Effect Optimized"],
            PartSlot::Engine => &["2004 V10", "2006 V8"],
            PartSlot::Tires => &["C5 Slick", "Full Wet"],
            PartSlot::FrontWing => &["High Lift", "Simple Outwash"],
            PartSlot::RearWing => &["High Downforce", "Low Drag"],
        }
    }

    /// Exact match against the catalog after trimming surrounding whitespace.
    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        self.valid_values().iter().any(|valid| *valid == value)
    }
}

impl fmt::Display for PartSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Render the catalog as a bullet list, one slot per line.
pub fn catalog_listing() -> String {
    PartSlot::ALL
        .iter()
        .map(|slot| format!("- {}: {}", slot.label(), slot.valid_values().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

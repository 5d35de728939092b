//! Car build entity - the player's part selection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::PartSlot;
use crate::{BuildId, PlayerId};

/// A saved build. Any slot may be unset; empty strings count as unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarBuild {
    pub id: BuildId,
    pub player_id: PlayerId,
    pub chassis: Option<String>,
    pub engine: Option<String>,
    pub tires: Option<String>,
    pub front_wing: Option<String>,
    pub rear_wing: Option<String>,
    pub car_image: Option<String>,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl CarBuild {
    pub fn new(player_id: PlayerId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: BuildId::new(),
            player_id,
            chassis: None,
            engine: None,
            tires: None,
            front_wing: None,
            rear_wing: None,
            car_image: None,
            created_at,
        }
    }

    /// Set a slot. Blank values clear it.
    pub fn with_part(mut self, slot: PartSlot, value: impl Into<String>) -> Self {
        let value = value.into();
        let value = if value.trim().is_empty() {
            None
        } else {
            Some(value.trim().to_string())
        };
        match slot {
            PartSlot::Chassis => self.chassis = value,
            PartSlot::Engine => self.engine = value,
            PartSlot::Tires => self.tires = value,
            PartSlot::FrontWing => self.front_wing = value,
            PartSlot::RearWing => self.rear_wing = value,
        }
        self
    }

    /// The value in a slot, `None` when unset or blank.
    pub fn part(&self, slot: PartSlot) -> Option<&str> {
        let value = match slot {
            PartSlot::Chassis => &self.chassis,
            PartSlot::Engine => &self.engine,
            PartSlot::Tires => &self.tires,
            PartSlot::FrontWing => &self.front_wing,
            PartSlot::RearWing => &self.rear_wing,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    /// All five slots set.
    pub fn is_complete(&self) -> bool {
        PartSlot::ALL.iter().all(|slot| self.part(*slot).is_some())
    }

    /// Every set slot must hold a catalog value for that slot.
    pub fn validate(&self) -> Result<(), DomainError> {
        for slot in PartSlot::ALL {
            if let Some(value) = self.part(slot) {
                if !slot.accepts(value) {
                    return Err(DomainError::unknown_part(slot, value));
                }
            }
        }
        Ok(())
    }
}

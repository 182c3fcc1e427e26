//! The persisted shape of progression state. Field names follow the
//! on-disk JSON (`currentAreaId`, `areaProgress`, ...).

use serde::{Deserialize, Serialize};

use crate::types::AreaId;

/// Floor progress within one area. Both floors are 1-based and
/// `highest_floor >= current_floor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaProgress {
    pub current_floor: u32,
    pub highest_floor: u32,
}

impl AreaProgress {
    pub const START: Self = Self { current_floor: 1, highest_floor: 1 };

    /// Moves to `floor`, raising the high-water mark if needed.
    pub fn advanced_to(self, floor: u32) -> Self {
        let floor = floor.max(1);
        Self { current_floor: floor, highest_floor: self.highest_floor.max(floor) }
    }

    /// Repairs an entry read from an untrusted snapshot.
    pub fn clamped(self) -> Self {
        let current_floor = self.current_floor.max(1);
        Self { current_floor, highest_floor: self.highest_floor.max(current_floor) }
    }
}

impl Default for AreaProgress {
    fn default() -> Self {
        Self::START
    }
}

/// Progression state materialized as plain lists. Produced by
/// `AreaManager::save_state` and consumed by `AreaManager::load_state`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionSnapshot {
    #[serde(default)]
    pub current_area_id: Option<AreaId>,
    #[serde(default)]
    pub unlocked_areas: Vec<AreaId>,
    #[serde(default)]
    pub completed_areas: Vec<AreaId>,
    /// `[areaId, progress]` pairs.
    #[serde(default)]
    pub area_progress: Vec<(AreaId, AreaProgress)>,
}

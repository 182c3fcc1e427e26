//! Top-level session: owns progression and the random source, and turns an
//! area/floor request into a ready-to-play floor.

use crate::error::AreaError;
use crate::level::LevelDefinition;
use crate::mapgen::{self, GeneratedMap, RandomSource, SeededRandom};
use crate::progression::AreaManager;
use crate::types::AreaId;

/// Everything the rendering and spawn layers need for one floor.
#[derive(Clone, Debug, PartialEq)]
pub struct FloorInstance {
    pub area_id: AreaId,
    pub floor: u32,
    pub map: GeneratedMap,
    pub enemies: Vec<String>,
    pub items: Vec<String>,
    pub narrative: Option<String>,
}

pub struct Session<R = SeededRandom> {
    manager: AreaManager,
    rng: R,
}

impl Session<SeededRandom> {
    pub fn seeded(manager: AreaManager, seed: u64) -> Self {
        Self::new(manager, SeededRandom::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    pub fn new(manager: AreaManager, rng: R) -> Self {
        Self { manager, rng }
    }

    pub fn manager(&self) -> &AreaManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut AreaManager {
        &mut self.manager
    }

    pub fn into_manager(self) -> AreaManager {
        self.manager
    }

    pub fn enter_area(&mut self, id: &str) -> Result<&LevelDefinition, AreaError> {
        self.manager.load_area(id)
    }

    /// Records the move to `floor` of the current area and generates it.
    /// Revisiting a floor generates a fresh layout.
    pub fn generate_floor(&mut self, floor: u32) -> Result<FloorInstance, AreaError> {
        let floor = floor.max(1);
        let area_id = self.manager.current_area_id().cloned().ok_or(AreaError::NoActiveArea)?;
        self.manager.update_area_progress(area_id.as_str(), floor);

        let area = self.manager.current_area().ok_or_else(|| AreaError::NotFound(area_id.clone()))?;
        let config = area.map_generation_config(floor);
        let map = mapgen::generate_floor(&config, &mut self.rng);

        Ok(FloorInstance {
            enemies: area.enemy_types_for_floor(floor),
            items: area.item_types_for_floor(floor),
            narrative: area.floor_narrative(floor).map(str::to_owned),
            area_id,
            floor,
            map,
        })
    }

    /// Completes the current area, returning the areas it newly unlocked.
    pub fn complete_current_area(&mut self) -> Result<Vec<AreaId>, AreaError> {
        let area_id = self.manager.current_area_id().cloned().ok_or(AreaError::NoActiveArea)?;
        Ok(self.manager.complete_area(area_id.as_str()))
    }
}

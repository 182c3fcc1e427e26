//! Runtime progression over the area unlock graph: which areas are open,
//! which are finished, how deep the player has gone in each, and where
//! they currently are.
//!
//! The starting area is always unlocked. Every operation other than
//! [`AreaManager::load_area`] is total.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{AreaError, RegistryError};
use crate::level::LevelDefinition;
use crate::registry::AreaRegistry;
use crate::snapshot::{AreaProgress, ProgressionSnapshot};
use crate::types::AreaId;

/// One entry of [`AreaManager::unlocked_areas`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnlockedArea<'a> {
    pub id: &'a AreaId,
    pub area: &'a LevelDefinition,
    pub progress: AreaProgress,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AreaManager {
    registry: AreaRegistry,
    starting_area: AreaId,
    unlocked: BTreeSet<AreaId>,
    completed: BTreeSet<AreaId>,
    progress: BTreeMap<AreaId, AreaProgress>,
    current: Option<AreaId>,
}

impl AreaManager {
    /// Starts a new game over `registry` with only `starting_area` unlocked.
    pub fn new(registry: AreaRegistry, starting_area: impl Into<AreaId>) -> Self {
        let starting_area = starting_area.into();
        Self {
            registry,
            unlocked: BTreeSet::from([starting_area.clone()]),
            starting_area,
            completed: BTreeSet::new(),
            progress: BTreeMap::new(),
            current: None,
        }
    }

    pub fn register_area(&mut self, area: LevelDefinition) -> Result<(), RegistryError> {
        self.registry.register(area)
    }

    pub fn registry(&self) -> &AreaRegistry {
        &self.registry
    }

    pub fn starting_area(&self) -> &AreaId {
        &self.starting_area
    }

    /// Makes `id` the current area.
    pub fn load_area(&mut self, id: &str) -> Result<&LevelDefinition, AreaError> {
        let Some(area) = self.registry.get(id) else {
            return Err(AreaError::NotFound(AreaId::from(id)));
        };
        if !self.unlocked.contains(id) {
            return Err(AreaError::Locked(area.id.clone()));
        }

        tracing::info!(area_id = %area.id, "area loaded");
        self.current = Some(area.id.clone());
        Ok(area)
    }

    pub fn current_area_id(&self) -> Option<&AreaId> {
        self.current.as_ref()
    }

    /// The current area's definition, if one is loaded and still registered.
    pub fn current_area(&self) -> Option<&LevelDefinition> {
        self.current.as_ref().and_then(|id| self.registry.get(id.as_str()))
    }

    /// Floor 1 of 1 for areas never visited.
    pub fn area_progress(&self, id: &str) -> AreaProgress {
        self.progress.get(id).copied().unwrap_or_default()
    }

    /// Records a move to `floor` within `id`. Floors below 1 count as 1.
    pub fn update_area_progress(&mut self, id: &str, floor: u32) {
        let updated = self.area_progress(id).advanced_to(floor);
        tracing::debug!(
            area_id = id,
            current_floor = updated.current_floor,
            highest_floor = updated.highest_floor,
            "area progress updated"
        );
        self.progress.insert(AreaId::from(id), updated);
    }

    /// Marks `id` completed and unlocks everything it declares. Returns the
    /// areas that were newly unlocked; a repeat call returns nothing.
    pub fn complete_area(&mut self, id: &str) -> Vec<AreaId> {
        if self.completed.insert(AreaId::from(id)) {
            tracing::info!(area_id = id, "area completed");
        }

        let Some(area) = self.registry.get(id) else {
            return Vec::new();
        };
        let mut newly_unlocked = Vec::new();
        for unlock in &area.progression.unlocks {
            if self.unlocked.insert(unlock.clone()) {
                tracing::info!(area_id = %unlock, unlocked_by = id, "area unlocked");
                newly_unlocked.push(unlock.clone());
            }
        }
        newly_unlocked
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Unlocked connections of the current area, in declared order.
    pub fn available_transitions(&self) -> Vec<&AreaId> {
        let Some(area) = self.current_area() else {
            return Vec::new();
        };
        area.progression.connections.iter().filter(|id| self.unlocked.contains(id.as_str())).collect()
    }

    /// Every unlocked area that is still registered, in id order.
    pub fn unlocked_areas(&self) -> Vec<UnlockedArea<'_>> {
        self.unlocked
            .iter()
            .filter_map(|id| {
                let area = self.registry.get(id.as_str())?;
                Some(UnlockedArea {
                    id,
                    area,
                    progress: self.area_progress(id.as_str()),
                    completed: self.completed.contains(id),
                })
            })
            .collect()
    }

    pub fn save_state(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            current_area_id: self.current.clone(),
            unlocked_areas: self.unlocked.iter().cloned().collect(),
            completed_areas: self.completed.iter().cloned().collect(),
            area_progress: self.progress.iter().map(|(id, progress)| (id.clone(), *progress)).collect(),
        }
    }

    /// Replaces all progression state with `snapshot`. The starting area and
    /// the restored current area always end up unlocked, and progress
    /// entries are repaired so `highest_floor >= current_floor >= 1`.
    pub fn load_state(&mut self, snapshot: ProgressionSnapshot) {
        let ProgressionSnapshot { current_area_id, unlocked_areas, completed_areas, area_progress } =
            snapshot;

        self.unlocked = unlocked_areas.into_iter().collect();
        self.unlocked.insert(self.starting_area.clone());
        if let Some(current) = &current_area_id
            && self.unlocked.insert(current.clone())
        {
            tracing::warn!(area_id = %current, "restored current area was not unlocked; unlocking it");
        }

        self.completed = completed_areas.into_iter().collect();
        self.progress =
            area_progress.into_iter().map(|(id, progress)| (id, progress.clamped())).collect();
        self.current = current_area_id;

        tracing::info!(
            current_area = self.current.as_ref().map(AreaId::as_str),
            unlocked = self.unlocked.len(),
            completed = self.completed.len(),
            "progression state restored"
        );
    }

    /// Back to a new game: only the starting area unlocked, nothing loaded.
    pub fn reset(&mut self) {
        self.unlocked = BTreeSet::from([self.starting_area.clone()]);
        self.completed.clear();
        self.progress.clear();
        self.current = None;
    }
}

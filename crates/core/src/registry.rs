//! Explicit area registry. Owned by whoever builds the [`AreaManager`] and
//! handed to it at construction; there is no process-wide table.
//!
//! [`AreaManager`]: crate::progression::AreaManager

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::error::RegistryError;
use crate::level::LevelDefinition;
use crate::types::AreaId;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaRegistry {
    areas: BTreeMap<AreaId, LevelDefinition>,
}

impl AreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `area` under its id. A second area with the same id is rejected
    /// and the first one stays registered.
    pub fn register(&mut self, area: LevelDefinition) -> Result<(), RegistryError> {
        match self.areas.entry(area.id.clone()) {
            Entry::Occupied(existing) => {
                let area_id = existing.key();
                tracing::warn!(%area_id, "duplicate area registration rejected");
                Err(RegistryError::DuplicateArea(area_id.clone()))
            }
            Entry::Vacant(slot) => {
                tracing::debug!(area_id = %slot.key(), floors = area.floor_count(), "area registered");
                slot.insert(area);
                Ok(())
            }
        }
    }

    /// Inserts `area`, returning the definition it displaced, if any.
    pub fn replace(&mut self, area: LevelDefinition) -> Option<LevelDefinition> {
        self.areas.insert(area.id.clone(), area)
    }

    pub fn get(&self, id: &str) -> Option<&LevelDefinition> {
        self.areas.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.areas.contains_key(id)
    }

    /// Areas in id order.
    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.areas.values()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

impl FromIterator<LevelDefinition> for AreaRegistry {
    /// Later duplicates are dropped, matching [`AreaRegistry::register`].
    fn from_iter<I: IntoIterator<Item = LevelDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for area in iter {
            let _ = registry.register(area);
        }
        registry
    }
}

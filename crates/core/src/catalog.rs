//! Declarative area content loaded from TOML.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::level::LevelDefinition;
use crate::progression::AreaManager;
use crate::registry::AreaRegistry;
use crate::types::AreaId;

const BUILTIN_CATALOG: &str = include_str!("../data/areas.toml");

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AreaCatalog {
    pub starting_area: AreaId,
    #[serde(default)]
    pub areas: Vec<LevelDefinition>,
}

impl AreaCatalog {
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let mut catalog: Self = toml::from_str(source)?;
        for area in &mut catalog.areas {
            area.normalize_floor_indices();
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let source = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), areas = catalog.areas.len(), "area catalog loaded");
        Ok(catalog)
    }

    /// The observatory, caverns and ruins areas shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn area(&self, id: &str) -> Option<&LevelDefinition> {
        self.areas.iter().find(|area| area.id.as_str() == id)
    }

    /// Registers every area and starts a new game at `starting_area`.
    /// Unlock or connection edges naming unknown areas are kept but logged.
    pub fn into_manager(self) -> Result<AreaManager, CatalogError> {
        let mut registry = AreaRegistry::new();
        for area in self.areas {
            registry.register(area)?;
        }
        if !registry.contains(self.starting_area.as_str()) {
            return Err(CatalogError::MissingStartingArea(self.starting_area));
        }

        for area in registry.iter() {
            let edges = area.progression.unlocks.iter().chain(&area.progression.connections);
            for target in edges.filter(|target| !registry.contains(target.as_str())) {
                tracing::warn!(area_id = %area.id, %target, "progression edge names an unknown area");
            }
        }

        Ok(AreaManager::new(registry, self.starting_area))
    }
}

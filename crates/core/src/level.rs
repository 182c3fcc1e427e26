//! Static per-area content: floors, theme, spawn tables, map settings and
//! the progression edges leading out of the area.
//!
//! Every query here is total. Missing or malformed floor data degrades to an
//! empty or default answer so that content mistakes never stop play.

use std::iter;

use serde::{Deserialize, Serialize};

use crate::mapgen::Theme;
use crate::sprites::TileSprites;
use crate::types::AreaId;

/// One enemy table entry: a bare type, or a type repeated `count` times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnemyEntry {
    Kind(String),
    Counted {
        #[serde(rename = "type")]
        kind: String,
        count: usize,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTable {
    #[serde(default)]
    pub default: Vec<EnemyEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTable {
    #[serde(default)]
    pub default: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionEdges {
    /// Areas unlocked when this area is completed.
    #[serde(default)]
    pub unlocks: Vec<AreaId>,
    /// Areas reachable from this one, in display order.
    #[serde(default)]
    pub connections: Vec<AreaId>,
}

/// Map generation knobs. Every key is optional so that a floor can override
/// any subset of its area's settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub min_rooms: Option<usize>,
    pub max_rooms: Option<usize>,
    pub room_min_width: Option<usize>,
    pub room_max_width: Option<usize>,
    pub room_min_height: Option<usize>,
    pub room_max_height: Option<usize>,
    pub stellar_feature_chance: Option<f64>,
    pub constellation_chance: Option<f64>,
    pub crystal_chance: Option<f64>,
    pub moss_chance: Option<f64>,
    pub rubble_chance: Option<f64>,
    pub relic_chance: Option<f64>,
}

impl MapSettings {
    /// Shallow merge: each key set in `overrides` replaces the same key here.
    pub fn merged_with(&self, overrides: &Self) -> Self {
        Self {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            min_rooms: overrides.min_rooms.or(self.min_rooms),
            max_rooms: overrides.max_rooms.or(self.max_rooms),
            room_min_width: overrides.room_min_width.or(self.room_min_width),
            room_max_width: overrides.room_max_width.or(self.room_max_width),
            room_min_height: overrides.room_min_height.or(self.room_min_height),
            room_max_height: overrides.room_max_height.or(self.room_max_height),
            stellar_feature_chance: overrides
                .stellar_feature_chance
                .or(self.stellar_feature_chance),
            constellation_chance: overrides.constellation_chance.or(self.constellation_chance),
            crystal_chance: overrides.crystal_chance.or(self.crystal_chance),
            moss_chance: overrides.moss_chance.or(self.moss_chance),
            rubble_chance: overrides.rubble_chance.or(self.rubble_chance),
            relic_chance: overrides.relic_chance.or(self.relic_chance),
        }
    }
}

/// The merged settings handed to a theme decorator for one floor.
#[derive(Clone, Debug, PartialEq)]
pub struct MapGenerationConfig {
    pub settings: MapSettings,
    pub theme: Theme,
    pub tile_sprites: TileSprites,
    pub floor: u32,
}

impl MapGenerationConfig {
    pub fn new(theme: Theme, floor: u32) -> Self {
        Self { settings: MapSettings::default(), theme, tile_sprites: TileSprites::new(), floor }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorSpec {
    /// 1-based position within the area; normalized when the area is built.
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub enemies: Option<Vec<EnemyEntry>>,
    #[serde(default)]
    pub items: Option<Vec<String>>,
    #[serde(default)]
    pub map: Option<MapSettings>,
    #[serde(default)]
    pub narrative: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LevelDefinition {
    pub id: AreaId,
    #[serde(default)]
    pub name: String,
    pub theme: Theme,
    #[serde(default)]
    pub floors: Vec<FloorSpec>,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub enemies: EnemyTable,
    #[serde(default)]
    pub items: ItemTable,
    #[serde(default)]
    pub progression: ProgressionEdges,
    #[serde(default)]
    pub tiles: TileSprites,
}

impl LevelDefinition {
    pub fn new(id: impl Into<AreaId>, theme: Theme) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            theme,
            floors: Vec::new(),
            map: MapSettings::default(),
            enemies: EnemyTable::default(),
            items: ItemTable::default(),
            progression: ProgressionEdges::default(),
            tiles: TileSprites::new(),
        }
    }

    pub fn with_floors(mut self, floors: Vec<FloorSpec>) -> Self {
        self.floors = floors;
        self.normalize_floor_indices();
        self
    }

    pub fn with_unlocks(mut self, unlocks: &[&str]) -> Self {
        self.progression.unlocks = unlocks.iter().map(|&id| AreaId::from(id)).collect();
        self
    }

    pub fn with_connections(mut self, connections: &[&str]) -> Self {
        self.progression.connections = connections.iter().map(|&id| AreaId::from(id)).collect();
        self
    }

    pub fn normalize_floor_indices(&mut self) {
        for (position, floor) in self.floors.iter_mut().enumerate() {
            floor.index = position as u32 + 1;
        }
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn floor_data(&self, floor: u32) -> Option<&FloorSpec> {
        let slot = (floor as usize).checked_sub(1)?;
        self.floors.get(slot)
    }

    /// Flat spawn list for `floor`: the floor's own table, or the area
    /// default when the floor names none. Counted entries are expanded in
    /// place.
    pub fn enemy_types_for_floor(&self, floor: u32) -> Vec<String> {
        let entries = self
            .floor_data(floor)
            .and_then(|spec| spec.enemies.as_deref())
            .unwrap_or(self.enemies.default.as_slice());

        let mut kinds = Vec::new();
        for entry in entries {
            match entry {
                EnemyEntry::Kind(kind) => kinds.push(kind.clone()),
                EnemyEntry::Counted { kind, count } => {
                    kinds.extend(iter::repeat_n(kind.clone(), *count));
                }
            }
        }
        kinds
    }

    pub fn item_types_for_floor(&self, floor: u32) -> Vec<String> {
        self.floor_data(floor)
            .and_then(|spec| spec.items.clone())
            .unwrap_or_else(|| self.items.default.clone())
    }

    pub fn map_generation_config(&self, floor: u32) -> MapGenerationConfig {
        let settings = match self.floor_data(floor).and_then(|spec| spec.map.as_ref()) {
            Some(overrides) => self.map.merged_with(overrides),
            None => self.map.clone(),
        };
        MapGenerationConfig { settings, theme: self.theme, tile_sprites: self.tiles.clone(), floor }
    }

    pub fn tile_sprite(&self, tile_type: &str) -> Option<String> {
        self.tiles.resolve(tile_type)
    }

    pub fn floor_narrative(&self, floor: u32) -> Option<&str> {
        self.floor_data(floor).and_then(|spec| spec.narrative.as_deref())
    }

    pub fn is_complete(&self, completed_floors: usize) -> bool {
        completed_floors >= self.floor_count()
    }
}

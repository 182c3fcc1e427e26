pub mod catalog;
pub mod error;
pub mod level;
pub mod mapgen;
pub mod progression;
pub mod registry;
pub mod save_file;
pub mod session;
pub mod snapshot;
pub mod sprites;
pub mod types;

pub use catalog::AreaCatalog;
pub use error::{AreaError, CatalogError, RegistryError};
pub use level::{
    EnemyEntry, EnemyTable, FloorSpec, ItemTable, LevelDefinition, MapGenerationConfig,
    MapSettings, ProgressionEdges,
};
pub use mapgen::{
    BaseGenerator, Caverns, GeneratedMap, Observatory, RandomSource, RoomsAndCorridors, Ruins,
    SeededRandom, Theme, ThemeDecorator, TileGrid,
};
pub use progression::{AreaManager, UnlockedArea};
pub use registry::AreaRegistry;
pub use save_file::SaveFile;
pub use session::{FloorInstance, Session};
pub use snapshot::{AreaProgress, ProgressionSnapshot};
pub use sprites::{SpriteResolver, SpriteSource, TileSprites};
pub use types::*;

//! Procedural floor generation split into coherent submodules: a base
//! room-and-corridor layout, shared decoration phases, and per-theme
//! decorators on top.

pub mod base;
pub mod decorate;
pub mod model;
pub mod random;
pub mod themes;

pub use base::{BaseGenerator, RoomsAndCorridors};
pub use model::{GeneratedMap, TileGrid};
pub use random::{RandomSource, SeededRandom};
pub use themes::{Caverns, Observatory, Ruins, Theme, ThemeDecorator};

use crate::level::MapGenerationConfig;

pub const DEFAULT_WIDTH: usize = 40;
pub const DEFAULT_HEIGHT: usize = 30;

/// Generates a floor for `config`, dispatching on its theme and sizing the
/// grid from its settings.
pub fn generate_floor(config: &MapGenerationConfig, rng: &mut dyn RandomSource) -> GeneratedMap {
    let width = config.settings.width.unwrap_or(DEFAULT_WIDTH);
    let height = config.settings.height.unwrap_or(DEFAULT_HEIGHT);
    config.theme.decorator().generate(width, height, config, rng)
}

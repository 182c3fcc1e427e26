//! Theme decorators. Each theme composes a [`BaseGenerator`] and paints its
//! own decorations over the result using the shared phases in `decorate`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::level::MapGenerationConfig;
use crate::types::Decoration;

use super::base::{BaseGenerator, RoomsAndCorridors};
use super::decorate::{decorate_corridors, decorate_rooms};
use super::model::GeneratedMap;
use super::random::RandomSource;

pub const DEFAULT_STELLAR_FEATURE_CHANCE: f64 = 0.5;
pub const DEFAULT_CONSTELLATION_CHANCE: f64 = 0.3;
pub const DEFAULT_CRYSTAL_CHANCE: f64 = 0.4;
pub const DEFAULT_MOSS_CHANCE: f64 = 0.2;
pub const DEFAULT_RUBBLE_CHANCE: f64 = 0.15;
pub const DEFAULT_RELIC_CHANCE: f64 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Observatory,
    Caverns,
    Ruins,
}

impl Theme {
    pub const ALL: [Self; 3] = [Self::Observatory, Self::Caverns, Self::Ruins];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Observatory => "observatory",
            Self::Caverns => "caverns",
            Self::Ruins => "ruins",
        }
    }

    pub fn decorator(self) -> Box<dyn ThemeDecorator> {
        self.decorator_with_base(RoomsAndCorridors)
    }

    pub fn decorator_with_base<B>(self, base: B) -> Box<dyn ThemeDecorator>
    where
        B: BaseGenerator + 'static,
    {
        match self {
            Self::Observatory => Box::new(Observatory::new(base)),
            Self::Caverns => Box::new(Caverns::new(base)),
            Self::Ruins => Box::new(Ruins::new(base)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generates a fully decorated floor for one theme.
pub trait ThemeDecorator {
    fn theme(&self) -> Theme;

    fn generate(
        &self,
        width: usize,
        height: usize,
        config: &MapGenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> GeneratedMap;
}

/// Runs the base generator, then both decoration phases with one shared
/// random stream.
fn generate_decorated(
    theme: Theme,
    base: &dyn BaseGenerator,
    (width, height): (usize, usize),
    config: &MapGenerationConfig,
    rng: &mut dyn RandomSource,
    room_pass: (f64, fn(u32, usize) -> Decoration),
    corridor_pass: (f64, Decoration),
) -> GeneratedMap {
    let mut map = base.generate(width, height, config, rng);
    let (room_chance, kind_for) = room_pass;
    let (corridor_chance, corridor_decoration) = corridor_pass;
    let room_features = decorate_rooms(&mut map, config.floor, room_chance, rng, kind_for);
    let corridor_features = decorate_corridors(&mut map, corridor_chance, corridor_decoration, rng);
    tracing::debug!(
        %theme,
        floor = config.floor,
        width,
        height,
        rooms = map.rooms.len(),
        room_features,
        corridor_features,
        "floor generated"
    );
    map
}

pub struct Observatory<B = RoomsAndCorridors> {
    base: B,
}

impl<B: BaseGenerator> Observatory<B> {
    pub fn new(base: B) -> Self {
        Self { base }
    }

    /// Floor 1 alternates chart/telescope, floor 2 constellation/chart,
    /// deeper floors cycle all three.
    pub fn room_decoration(floor: u32, room_index: usize) -> Decoration {
        match floor {
            0 | 1 => [Decoration::Chart, Decoration::Telescope][room_index % 2],
            2 => [Decoration::Constellation, Decoration::Chart][room_index % 2],
            _ => [Decoration::Chart, Decoration::Telescope, Decoration::Constellation]
                [room_index % 3],
        }
    }
}

impl<B: BaseGenerator> ThemeDecorator for Observatory<B> {
    fn theme(&self) -> Theme {
        Theme::Observatory
    }

    fn generate(
        &self,
        width: usize,
        height: usize,
        config: &MapGenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> GeneratedMap {
        let settings = &config.settings;
        generate_decorated(
            Theme::Observatory,
            &self.base,
            (width, height),
            config,
            rng,
            (
                settings.stellar_feature_chance.unwrap_or(DEFAULT_STELLAR_FEATURE_CHANCE),
                Self::room_decoration,
            ),
            (
                settings.constellation_chance.unwrap_or(DEFAULT_CONSTELLATION_CHANCE),
                Decoration::Constellation,
            ),
        )
    }
}

pub struct Caverns<B = RoomsAndCorridors> {
    base: B,
}

impl<B: BaseGenerator> Caverns<B> {
    pub fn new(base: B) -> Self {
        Self { base }
    }

    /// Shallow floors grow crystals and mushrooms; stalagmites join from
    /// floor 3.
    pub fn room_decoration(floor: u32, room_index: usize) -> Decoration {
        if floor < 3 {
            [Decoration::Crystal, Decoration::Mushroom][room_index % 2]
        } else {
            [Decoration::Stalagmite, Decoration::Crystal, Decoration::Mushroom][room_index % 3]
        }
    }
}

impl<B: BaseGenerator> ThemeDecorator for Caverns<B> {
    fn theme(&self) -> Theme {
        Theme::Caverns
    }

    fn generate(
        &self,
        width: usize,
        height: usize,
        config: &MapGenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> GeneratedMap {
        let settings = &config.settings;
        generate_decorated(
            Theme::Caverns,
            &self.base,
            (width, height),
            config,
            rng,
            (settings.crystal_chance.unwrap_or(DEFAULT_CRYSTAL_CHANCE), Self::room_decoration),
            (settings.moss_chance.unwrap_or(DEFAULT_MOSS_CHANCE), Decoration::Moss),
        )
    }
}

pub struct Ruins<B = RoomsAndCorridors> {
    base: B,
}

impl<B: BaseGenerator> Ruins<B> {
    pub fn new(base: B) -> Self {
        Self { base }
    }

    /// Pillars stand in even rooms, rubble in odd ones; glyphs take every
    /// third room from floor 2 on.
    pub fn room_decoration(floor: u32, room_index: usize) -> Decoration {
        if floor >= 2 && room_index % 3 == 2 {
            return Decoration::Glyph;
        }
        [Decoration::Pillar, Decoration::Rubble][room_index % 2]
    }
}

impl<B: BaseGenerator> ThemeDecorator for Ruins<B> {
    fn theme(&self) -> Theme {
        Theme::Ruins
    }

    fn generate(
        &self,
        width: usize,
        height: usize,
        config: &MapGenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> GeneratedMap {
        let settings = &config.settings;
        generate_decorated(
            Theme::Ruins,
            &self.base,
            (width, height),
            config,
            rng,
            (settings.relic_chance.unwrap_or(DEFAULT_RELIC_CHANCE), Self::room_decoration),
            (settings.rubble_chance.unwrap_or(DEFAULT_RUBBLE_CHANCE), Decoration::Rubble),
        )
    }
}

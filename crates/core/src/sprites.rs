//! Tile-type to sprite lookup with lazily resolved entries.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;

/// Sprites used when an area does not name one for a tile type.
pub const DEFAULT_TILE_SPRITES: &[(&str, &str)] = &[
    ("door", "default_door"),
    ("empty", "default_floor"),
    ("floor", "default_floor"),
    ("wall", "default_wall"),
];

/// Zero-argument sprite producer, evaluated on every lookup.
#[derive(Clone)]
pub struct SpriteResolver(Arc<dyn Fn() -> String + Send + Sync>);

impl SpriteResolver {
    pub fn new(resolve: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(resolve))
    }

    /// Resolver that walks `variants` in order, one step per call.
    pub fn cycling(variants: Vec<String>) -> Self {
        let cursor = AtomicUsize::new(0);
        Self::new(move || {
            if variants.is_empty() {
                return String::new();
            }
            let step = cursor.fetch_add(1, Ordering::Relaxed);
            variants[step % variants.len()].clone()
        })
    }

    pub fn resolve(&self) -> String {
        (self.0)()
    }
}

impl fmt::Debug for SpriteResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SpriteResolver(..)")
    }
}

impl PartialEq for SpriteResolver {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SpriteSource {
    Fixed(String),
    Resolver(SpriteResolver),
}

impl SpriteSource {
    pub fn resolve(&self) -> String {
        match self {
            Self::Fixed(sprite) => sprite.clone(),
            Self::Resolver(resolver) => resolver.resolve(),
        }
    }
}

/// Catalog form of a sprite entry: a name, or `{ variants = [..] }`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum SpriteSpec {
    Fixed(String),
    Variants { variants: Vec<String> },
}

impl From<SpriteSpec> for SpriteSource {
    fn from(spec: SpriteSpec) -> Self {
        match spec {
            SpriteSpec::Fixed(sprite) => Self::Fixed(sprite),
            SpriteSpec::Variants { variants } => Self::Resolver(SpriteResolver::cycling(variants)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, SpriteSpec>")]
pub struct TileSprites {
    entries: BTreeMap<String, SpriteSource>,
}

impl From<BTreeMap<String, SpriteSpec>> for TileSprites {
    fn from(specs: BTreeMap<String, SpriteSpec>) -> Self {
        Self { entries: specs.into_iter().map(|(tile, spec)| (tile, spec.into())).collect() }
    }
}

impl TileSprites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tile_type: impl Into<String>, source: SpriteSource) -> Self {
        self.insert(tile_type, source);
        self
    }

    pub fn insert(&mut self, tile_type: impl Into<String>, source: SpriteSource) {
        self.entries.insert(tile_type.into(), source);
    }

    pub fn get(&self, tile_type: &str) -> Option<&SpriteSource> {
        self.entries.get(tile_type)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks `tile_type` up here first, then in [`DEFAULT_TILE_SPRITES`].
    pub fn resolve(&self, tile_type: &str) -> Option<String> {
        if let Some(source) = self.entries.get(tile_type) {
            return Some(source.resolve());
        }
        DEFAULT_TILE_SPRITES
            .iter()
            .find(|(default_type, _)| *default_type == tile_type)
            .map(|(_, sprite)| (*sprite).to_string())
    }
}

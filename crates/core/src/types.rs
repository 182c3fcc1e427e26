use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(pub String);

impl AreaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AreaId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AreaId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for AreaId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

/// Structural tile type. `Empty` is the carved sentinel left by the base
/// generator; decoration turns it into `Floor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Empty,
    Wall,
    Floor,
    Door,
}

impl TileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Wall => "wall",
            Self::Floor => "floor",
            Self::Door => "door",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    Chart,
    Telescope,
    Constellation,
    Crystal,
    Mushroom,
    Stalagmite,
    Moss,
    Rubble,
    Pillar,
    Glyph,
}

impl Decoration {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Telescope => "telescope",
            Self::Constellation => "constellation",
            Self::Crystal => "crystal",
            Self::Mushroom => "mushroom",
            Self::Stalagmite => "stalagmite",
            Self::Moss => "moss",
            Self::Rubble => "rubble",
            Self::Pillar => "pillar",
            Self::Glyph => "glyph",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub kind: TileKind,
    pub decoration: Option<Decoration>,
}

impl Tile {
    pub const WALL: Self = Self { kind: TileKind::Wall, decoration: None };
    pub const EMPTY: Self = Self { kind: TileKind::Empty, decoration: None };

    pub fn is_sentinel(&self) -> bool {
        self.kind == TileKind::Empty && self.decoration.is_none()
    }
}

/// Axis-aligned room rectangle; `x`/`y` is the top-left carved cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn right(self) -> usize {
        (self.x + self.width).saturating_sub(1)
    }

    pub fn bottom(self) -> usize {
        (self.y + self.height).saturating_sub(1)
    }

    /// Zero-area rooms cover no cells at all.
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    pub fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right().saturating_add(margin);
        let expanded_bottom = self.bottom().saturating_add(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            width: expanded_right - expanded_x + 1,
            height: expanded_bottom - expanded_y + 1,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// True when `pos` lies inside the bounding rectangle, walls of the
    /// rectangle included.
    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 || self.is_degenerate() {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// True when `pos` lies at least one tile away from every edge.
    pub fn interior_contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 || self.width < 3 || self.height < 3 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px > self.x && px < self.right() && py > self.y && py < self.bottom()
    }
}

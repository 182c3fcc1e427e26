//! Public data models for generated maps.

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Decoration, Pos, Room, Tile, TileKind};

/// Row-major grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn get(&self, pos: Pos) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get(self.index(pos))
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        let index = self.index(pos);
        self.tiles.get_mut(index)
    }

    /// Out-of-bounds reads are walls.
    pub fn kind_at(&self, pos: Pos) -> TileKind {
        self.get(pos).map_or(TileKind::Wall, |tile| tile.kind)
    }

    pub fn set_kind(&mut self, pos: Pos, kind: TileKind) {
        if let Some(tile) = self.get_mut(pos) {
            tile.kind = kind;
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// A generated floor: the tile grid plus the rooms carved into it, in
/// generation order. Nothing here is persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMap {
    pub grid: TileGrid,
    pub rooms: Vec<Room>,
}

impl GeneratedMap {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn decorations(&self) -> impl Iterator<Item = (Pos, Decoration)> + '_ {
        self.grid.positions().filter_map(|pos| {
            self.grid.get(pos).and_then(|tile| tile.decoration).map(|decoration| (pos, decoration))
        })
    }

    pub fn in_any_room(&self, pos: Pos) -> bool {
        self.rooms.iter().any(|room| room.contains(pos))
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for tile in self.grid.tiles() {
            bytes.push(match tile.kind {
                TileKind::Empty => 0,
                TileKind::Wall => 1,
                TileKind::Floor => 2,
                TileKind::Door => 3,
            });
            bytes.push(tile.decoration.map_or(0, |decoration| decoration as u8 + 1));
        }
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend((value as u32).to_le_bytes());
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// One character per tile, one line per row.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for y in 0..self.height() {
            for x in 0..self.width() {
                let pos = Pos { y: y as i32, x: x as i32 };
                let glyph = match self.grid.get(pos) {
                    Some(Tile { decoration: Some(decoration), .. }) => decoration_glyph(*decoration),
                    Some(Tile { kind: TileKind::Wall, .. }) | None => '#',
                    Some(Tile { kind: TileKind::Door, .. }) => '+',
                    Some(_) => '.',
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

fn decoration_glyph(decoration: Decoration) -> char {
    match decoration {
        Decoration::Chart => 'c',
        Decoration::Telescope => 't',
        Decoration::Constellation => '*',
        Decoration::Crystal => 'v',
        Decoration::Mushroom => 'm',
        Decoration::Stalagmite => '^',
        Decoration::Moss => '"',
        Decoration::Rubble => ',',
        Decoration::Pillar => 'o',
        Decoration::Glyph => '~',
    }
}

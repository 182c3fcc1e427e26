//! The two decoration phases shared by every theme. Themes decide which
//! decoration goes where; this module decides which cells may take one.
//!
//! Only sentinel cells are ever painted, so the first writer wins.

use crate::types::{Decoration, Pos, Room, TileKind};

use super::model::GeneratedMap;
use super::random::RandomSource;

/// Center first, then the four corners inset by one tile.
pub fn room_candidates(room: Room) -> [Pos; 5] {
    let left = room.x as i32 + 1;
    let top = room.y as i32 + 1;
    let right = room.right() as i32 - 1;
    let bottom = room.bottom() as i32 - 1;
    [
        room.center(),
        Pos { y: top, x: left },
        Pos { y: top, x: right },
        Pos { y: bottom, x: left },
        Pos { y: bottom, x: right },
    ]
}

/// Phase A. `kind_for(floor, room_index)` picks the decoration proposed for
/// each room; each candidate inside the room's interior is accepted with
/// probability `chance`. Returns the number of cells painted.
pub fn decorate_rooms(
    map: &mut GeneratedMap,
    floor: u32,
    chance: f64,
    rng: &mut dyn RandomSource,
    kind_for: impl Fn(u32, usize) -> Decoration,
) -> usize {
    let mut painted = 0;
    for room_index in 0..map.rooms.len() {
        let room = map.rooms[room_index];
        if room.is_degenerate() {
            continue;
        }
        let decoration = kind_for(floor, room_index);
        for pos in room_candidates(room) {
            if !room.interior_contains(pos) || !is_sentinel(map, pos) {
                continue;
            }
            if rng.chance(chance) && paint(map, pos, decoration) {
                painted += 1;
            }
        }
    }
    painted
}

/// Phase B. Every sentinel cell outside all room rectangles is painted with
/// `decoration` with probability `chance`.
pub fn decorate_corridors(
    map: &mut GeneratedMap,
    chance: f64,
    decoration: Decoration,
    rng: &mut dyn RandomSource,
) -> usize {
    let view: &GeneratedMap = map;
    let corridor_cells: Vec<Pos> = view
        .grid
        .positions()
        .filter(|&pos| is_sentinel(view, pos) && !view.in_any_room(pos))
        .collect();

    let mut painted = 0;
    for pos in corridor_cells {
        if rng.chance(chance) && paint(map, pos, decoration) {
            painted += 1;
        }
    }
    painted
}

fn is_sentinel(map: &GeneratedMap, pos: Pos) -> bool {
    map.grid.get(pos).is_some_and(|tile| tile.is_sentinel())
}

fn paint(map: &mut GeneratedMap, pos: Pos, decoration: Decoration) -> bool {
    match map.grid.get_mut(pos) {
        Some(tile) if tile.is_sentinel() => {
            tile.kind = TileKind::Floor;
            tile.decoration = Some(decoration);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::model::TileGrid;
    use crate::mapgen::random::scripted::{Constant, Script};
    use crate::types::Tile;

    const ALWAYS: u64 = 0;
    const NEVER: u64 = u64::MAX;

    fn single_room_map() -> GeneratedMap {
        let mut grid = TileGrid::filled(12, 10, Tile::WALL);
        let room = Room { x: 2, y: 2, width: 6, height: 5 };
        for y in room.y..=room.bottom() {
            for x in room.x..=room.right() {
                grid.set_kind(Pos { y: y as i32, x: x as i32 }, TileKind::Empty);
            }
        }
        for x in 8..11 {
            grid.set_kind(Pos { y: 4, x }, TileKind::Empty);
        }
        GeneratedMap { grid, rooms: vec![room] }
    }

    #[test]
    fn candidates_are_center_and_inset_corners() {
        let room = Room { x: 2, y: 2, width: 6, height: 5 };
        assert_eq!(
            room_candidates(room),
            [
                Pos { y: 4, x: 5 },
                Pos { y: 3, x: 3 },
                Pos { y: 3, x: 6 },
                Pos { y: 5, x: 3 },
                Pos { y: 5, x: 6 },
            ]
        );
    }

    #[test]
    fn certain_chance_paints_all_five_candidates() {
        let mut map = single_room_map();
        let painted =
            decorate_rooms(&mut map, 1, 0.5, &mut Constant(ALWAYS), |_, _| Decoration::Chart);
        assert_eq!(painted, 5);
        for pos in room_candidates(map.rooms[0]) {
            let tile = map.grid.get(pos).copied();
            assert_eq!(tile.and_then(|tile| tile.decoration), Some(Decoration::Chart));
            assert_eq!(tile.map(|tile| tile.kind), Some(TileKind::Floor));
        }
    }

    #[test]
    fn rejected_rolls_leave_room_untouched() {
        let mut map = single_room_map();
        let before = map.clone();
        let painted =
            decorate_rooms(&mut map, 1, 0.5, &mut Constant(NEVER), |_, _| Decoration::Chart);
        assert_eq!(painted, 0);
        assert_eq!(map, before);
    }

    #[test]
    fn occupied_cells_are_never_overwritten() {
        let mut map = single_room_map();
        let center = map.rooms[0].center();
        map.grid.set_kind(center, TileKind::Door);
        if let Some(tile) = map.grid.get_mut(Pos { y: 3, x: 3 }) {
            tile.kind = TileKind::Floor;
            tile.decoration = Some(Decoration::Glyph);
        }

        decorate_rooms(&mut map, 1, 1.0, &mut Constant(ALWAYS), |_, _| Decoration::Telescope);

        assert_eq!(map.grid.get(center).map(|tile| tile.kind), Some(TileKind::Door));
        assert_eq!(map.grid.get(center).and_then(|tile| tile.decoration), None);
        assert_eq!(
            map.grid.get(Pos { y: 3, x: 3 }).and_then(|tile| tile.decoration),
            Some(Decoration::Glyph)
        );
    }

    #[test]
    fn rooms_without_interior_take_nothing() {
        let mut map = single_room_map();
        map.rooms = vec![Room { x: 2, y: 2, width: 2, height: 5 }];
        let painted =
            decorate_rooms(&mut map, 1, 1.0, &mut Constant(ALWAYS), |_, _| Decoration::Chart);
        assert_eq!(painted, 0);
    }

    #[test]
    fn rolls_are_per_candidate() {
        let mut map = single_room_map();
        // accept, reject, accept, reject, accept
        let mut rng = Script::new(vec![ALWAYS, NEVER, ALWAYS, NEVER, ALWAYS]);
        let painted = decorate_rooms(&mut map, 1, 0.5, &mut rng, |_, _| Decoration::Chart);
        assert_eq!(painted, 3);
        let [center, top_left, top_right, bottom_left, _] = room_candidates(map.rooms[0]);
        assert!(map.grid.get(center).is_some_and(|tile| tile.decoration.is_some()));
        assert!(map.grid.get(top_left).is_some_and(|tile| tile.decoration.is_none()));
        assert!(map.grid.get(top_right).is_some_and(|tile| tile.decoration.is_some()));
        assert!(map.grid.get(bottom_left).is_some_and(|tile| tile.decoration.is_none()));
    }

    #[test]
    fn zero_sized_rooms_are_skipped() {
        let mut map = single_room_map();
        map.rooms.insert(0, Room { x: 0, y: 0, width: 0, height: 0 });
        let painted =
            decorate_rooms(&mut map, 1, 1.0, &mut Constant(ALWAYS), |_, _| Decoration::Chart);
        assert_eq!(painted, 5);
        assert!(!map.in_any_room(Pos { y: 0, x: 0 }));
    }

    #[test]
    fn corridor_phase_skips_room_rectangles() {
        let mut map = single_room_map();
        let painted =
            decorate_corridors(&mut map, 0.3, Decoration::Constellation, &mut Constant(ALWAYS));
        assert_eq!(painted, 3);
        for (pos, decoration) in map.decorations() {
            assert_eq!(decoration, Decoration::Constellation);
            assert!(!map.in_any_room(pos), "{pos:?} lies inside a room");
        }
    }

    #[test]
    fn corridor_phase_runs_without_rooms() {
        let mut map = single_room_map();
        map.rooms.clear();
        let painted = decorate_corridors(&mut map, 1.0, Decoration::Moss, &mut Constant(ALWAYS));
        assert_eq!(painted, 30 + 3);
    }
}

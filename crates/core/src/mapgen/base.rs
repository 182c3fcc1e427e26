//! Base floor topology: rooms and the corridors joining them, carved as the
//! `Empty` sentinel over a wall background.

use crate::level::{MapGenerationConfig, MapSettings};
use crate::types::{Pos, Room, Tile, TileKind};

use super::model::{GeneratedMap, TileGrid};
use super::random::RandomSource;

/// Smallest grid that can hold a walled room.
pub const MIN_GRID_SIDE: usize = 5;

const MAX_PLACEMENT_ATTEMPTS: usize = 4_000;

/// Produces the undecorated layout a theme paints over. Implementations
/// must leave walkable cells as [`TileKind::Empty`] with no decoration and
/// everything else as a non-sentinel tile.
pub trait BaseGenerator {
    fn generate(
        &self,
        width: usize,
        height: usize,
        config: &MapGenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> GeneratedMap;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoomsAndCorridors;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RoomBounds {
    min_rooms: usize,
    max_rooms: usize,
    min_width: usize,
    max_width: usize,
    min_height: usize,
    max_height: usize,
}

impl RoomBounds {
    /// Settings clamped to what a `width`x`height` grid can hold, so that
    /// oversized values degrade to a full grid instead of unbounded work.
    fn resolve(settings: &MapSettings, width: usize, height: usize) -> Self {
        let room_capacity = ((width / 3) * (height / 3)).max(1);
        let (min_rooms, max_rooms) =
            ordered(settings.min_rooms.unwrap_or(5), settings.max_rooms.unwrap_or(8));
        let (min_width, max_width) =
            ordered(settings.room_min_width.unwrap_or(4), settings.room_max_width.unwrap_or(9));
        let (min_height, max_height) =
            ordered(settings.room_min_height.unwrap_or(3), settings.room_max_height.unwrap_or(7));
        Self {
            min_rooms: min_rooms.min(room_capacity),
            max_rooms: max_rooms.min(room_capacity),
            min_width: min_width.clamp(1, width),
            max_width: max_width.clamp(1, width),
            min_height: min_height.clamp(1, height),
            max_height: max_height.clamp(1, height),
        }
    }
}

fn ordered(low: usize, high: usize) -> (usize, usize) {
    if low <= high { (low, high) } else { (high, low) }
}

impl BaseGenerator for RoomsAndCorridors {
    fn generate(
        &self,
        width: usize,
        height: usize,
        config: &MapGenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> GeneratedMap {
        let mut grid = TileGrid::filled(width, height, Tile::WALL);
        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return GeneratedMap { grid, rooms: Vec::new() };
        }

        let bounds = RoomBounds::resolve(&config.settings, width, height);
        let mut rooms = place_rooms(width, height, &bounds, rng);
        if rooms.len() < bounds.min_rooms {
            add_fallback_rooms(width, height, bounds.min_rooms, &mut rooms);
        }

        for room in &rooms {
            carve_room(&mut grid, room);
        }
        carve_room_corridors(&mut grid, &rooms, rng);

        GeneratedMap { grid, rooms }
    }
}

fn place_rooms(
    width: usize,
    height: usize,
    bounds: &RoomBounds,
    rng: &mut dyn RandomSource,
) -> Vec<Room> {
    let target_room_count = rng.range_usize(bounds.min_rooms, bounds.max_rooms);
    let attempts = target_room_count.saturating_mul(25).clamp(60, MAX_PLACEMENT_ATTEMPTS);

    let mut rooms: Vec<Room> = Vec::new();
    for _ in 0..attempts {
        if rooms.len() >= target_room_count {
            break;
        }
        let room_width = rng.range_usize(bounds.min_width, bounds.max_width);
        let room_height = rng.range_usize(bounds.min_height, bounds.max_height);
        if room_width + 2 > width || room_height + 2 > height {
            continue;
        }

        let max_x = width - room_width - 1;
        let max_y = height - room_height - 1;
        let x = rng.range_usize(1, max_x);
        let y = rng.range_usize(1, max_y);
        let candidate = Room { x, y, width: room_width, height: room_height };
        let candidate_with_margin = candidate.expanded(1);
        if rooms.iter().any(|existing| existing.expanded(1).intersects(&candidate_with_margin)) {
            continue;
        }
        rooms.push(candidate);
    }
    rooms
}

fn add_fallback_rooms(width: usize, height: usize, wanted: usize, rooms: &mut Vec<Room>) {
    let fallback_room_width = 4usize;
    let fallback_room_height = 4usize;
    if fallback_room_width + 2 < width && fallback_room_height + 2 < height {
        let fallback_positions = [
            (1usize, 1usize),
            (width - fallback_room_width - 1, 1usize),
            (1usize, height - fallback_room_height - 1),
            (width - fallback_room_width - 1, height - fallback_room_height - 1),
        ];

        for (x, y) in fallback_positions {
            if rooms.len() >= wanted {
                break;
            }
            let candidate =
                Room { x, y, width: fallback_room_width, height: fallback_room_height };
            let candidate_with_margin = candidate.expanded(1);
            if rooms
                .iter()
                .any(|existing| existing.expanded(1).intersects(&candidate_with_margin))
            {
                continue;
            }
            rooms.push(candidate);
        }
    }

    if rooms.is_empty() {
        let x = width / 3;
        let y = height / 3;
        rooms.push(Room {
            x,
            y,
            width: fallback_room_width.min(width - x - 1),
            height: fallback_room_height.min(height - y - 1),
        });
    }
}

fn carve_room(grid: &mut TileGrid, room: &Room) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            grid.set_kind(Pos { y: y as i32, x: x as i32 }, TileKind::Empty);
        }
    }
}

/// Joins every room to the growing connected set through the closest
/// unconnected room, one L-shaped corridor per link.
fn carve_room_corridors(grid: &mut TileGrid, rooms: &[Room], rng: &mut dyn RandomSource) {
    if rooms.len() < 2 {
        return;
    }

    let mut connected_room_indices = vec![0_usize];
    let mut pending_room_indices: Vec<usize> = (1..rooms.len()).collect();

    while !pending_room_indices.is_empty() {
        let mut best_choice: Option<(u32, usize, usize)> = None;
        for &connected_index in &connected_room_indices {
            let connected_center = rooms[connected_index].center();
            for &pending_index in &pending_room_indices {
                let distance = manhattan(connected_center, rooms[pending_index].center());
                let candidate = (distance, connected_index, pending_index);
                if best_choice.is_none_or(|best| candidate < best) {
                    best_choice = Some(candidate);
                }
            }
        }

        let Some((_, connected_index, pending_index)) = best_choice else {
            break;
        };
        let horizontal_first = rng.next_u64() & 1 == 0;
        carve_l_shaped_corridor(
            grid,
            rooms[connected_index].center(),
            rooms[pending_index].center(),
            horizontal_first,
        );

        connected_room_indices.push(pending_index);
        pending_room_indices.retain(|&index| index != pending_index);
    }
}

fn carve_l_shaped_corridor(grid: &mut TileGrid, start: Pos, end: Pos, horizontal_first: bool) {
    if horizontal_first {
        carve_horizontal_line(grid, start.y, start.x, end.x);
        carve_vertical_line(grid, end.x, start.y, end.y);
    } else {
        carve_vertical_line(grid, start.x, start.y, end.y);
        carve_horizontal_line(grid, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(grid: &mut TileGrid, y: i32, left_x: i32, right_x: i32) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        carve_cell(grid, Pos { y, x });
    }
}

fn carve_vertical_line(grid: &mut TileGrid, x: i32, top_y: i32, bottom_y: i32) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        carve_cell(grid, Pos { y, x });
    }
}

/// Carves `pos` unless it sits on the outer border.
fn carve_cell(grid: &mut TileGrid, pos: Pos) {
    if pos.x <= 0 || pos.y <= 0 {
        return;
    }
    if pos.x as usize >= grid.width() - 1 || pos.y as usize >= grid.height() - 1 {
        return;
    }
    grid.set_kind(pos, TileKind::Empty);
}

fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use proptest::prelude::*;

    use super::*;
    use crate::mapgen::SeededRandom;
    use crate::mapgen::Theme;

    fn generate(seed: u64, width: usize, height: usize) -> GeneratedMap {
        let config = MapGenerationConfig::new(Theme::Observatory, 1);
        RoomsAndCorridors.generate(width, height, &config, &mut SeededRandom::new(seed))
    }

    fn carved_cells_connected(map: &GeneratedMap) -> bool {
        let carved: Vec<Pos> =
            map.grid.positions().filter(|&pos| map.grid.kind_at(pos) == TileKind::Empty).collect();
        let Some(start) = carved.first().copied() else {
            return true;
        };

        let mut open = VecDeque::from([start]);
        let mut seen = BTreeSet::from([start]);
        while let Some(pos) = open.pop_front() {
            for next in [
                Pos { y: pos.y - 1, x: pos.x },
                Pos { y: pos.y, x: pos.x + 1 },
                Pos { y: pos.y + 1, x: pos.x },
                Pos { y: pos.y, x: pos.x - 1 },
            ] {
                if map.grid.kind_at(next) == TileKind::Empty && seen.insert(next) {
                    open.push_back(next);
                }
            }
        }
        seen.len() == carved.len()
    }

    #[test]
    fn room_layout_places_multiple_non_overlapping_rooms() {
        let map = generate(42, 40, 30);
        assert!(map.rooms.len() >= 4, "expected at least four rooms, got {}", map.rooms.len());

        for left_index in 0..map.rooms.len() {
            for right_index in (left_index + 1)..map.rooms.len() {
                let left_with_margin = map.rooms[left_index].expanded(1);
                let right_with_margin = map.rooms[right_index].expanded(1);
                assert!(
                    !left_with_margin.intersects(&right_with_margin),
                    "rooms must not overlap or touch: {:?} vs {:?}",
                    map.rooms[left_index],
                    map.rooms[right_index]
                );
            }
        }
    }

    #[test]
    fn rooms_are_carved_as_sentinel_and_border_stays_wall() {
        let map = generate(7, 30, 20);
        for room in &map.rooms {
            for y in room.y..=room.bottom() {
                for x in room.x..=room.right() {
                    let tile = map.grid.get(Pos { y: y as i32, x: x as i32 }).copied();
                    assert_eq!(tile, Some(Tile::EMPTY));
                }
            }
        }
        for pos in map.grid.positions() {
            let on_border = pos.x == 0
                || pos.y == 0
                || pos.x as usize == map.width() - 1
                || pos.y as usize == map.height() - 1;
            if on_border {
                assert_eq!(map.grid.kind_at(pos), TileKind::Wall, "border breached at {pos:?}");
            }
        }
    }

    #[test]
    fn tiny_grids_are_solid_wall() {
        let map = generate(1, 4, 9);
        assert!(map.rooms.is_empty());
        assert!(map.grid.tiles().iter().all(|tile| tile.kind == TileKind::Wall));
    }

    #[test]
    fn cramped_grid_still_gets_a_room() {
        let map = generate(3, 6, 6);
        assert!(!map.rooms.is_empty());
        for room in &map.rooms {
            assert!(room.right() < 5 && room.bottom() < 5, "room {room:?} touches the border");
        }
    }

    #[test]
    fn absurd_room_counts_are_capped_by_grid_size() {
        let mut config = MapGenerationConfig::new(Theme::Ruins, 1);
        config.settings.max_rooms = Some(1 << 62);
        let map = RoomsAndCorridors.generate(40, 30, &config, &mut SeededRandom::new(9));
        assert!(!map.rooms.is_empty());
        assert!(map.rooms.len() <= (40 / 3) * (30 / 3));

        config.settings.min_rooms = Some(2_000_000);
        config.settings.max_rooms = Some(2_000_000);
        let map = RoomsAndCorridors.generate(40, 30, &config, &mut SeededRandom::new(9));
        assert!(!map.rooms.is_empty());
        assert!(carved_cells_connected(&map));
    }

    #[test]
    fn oversized_room_dimensions_fall_back_to_grid_bounds() {
        let mut config = MapGenerationConfig::new(Theme::Caverns, 1);
        config.settings.room_min_width = Some(usize::MAX);
        config.settings.room_max_width = Some(usize::MAX);
        config.settings.room_max_height = Some(usize::MAX);
        let map = RoomsAndCorridors.generate(20, 16, &config, &mut SeededRandom::new(4));
        for room in &map.rooms {
            assert!(room.right() < 19 && room.bottom() < 15, "room {room:?} escapes the grid");
        }
    }

    #[test]
    fn same_seed_produces_identical_layout() {
        assert_eq!(generate(123_456, 40, 30), generate(123_456, 40, 30));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn carved_cells_stay_connected(
            seed in any::<u64>(),
            width in 5_usize..60,
            height in 5_usize..45,
        ) {
            let map = generate(seed, width, height);
            prop_assert!(
                carved_cells_connected(&map),
                "seed={seed}, size={width}x{height} should produce a connected layout"
            );
        }
    }
}

use atlas::{
    BaseGenerator, GeneratedMap, MapGenerationConfig, MapSettings, Pos, RandomSource,
    RoomsAndCorridors, SeededRandom, Theme, TileKind,
};
use proptest::prelude::*;

/// Rooms-and-corridors with a few carved cells turned into doors, so the
/// decorators meet structure they must not paint over.
struct DoorStamped;

impl BaseGenerator for DoorStamped {
    fn generate(
        &self,
        width: usize,
        height: usize,
        config: &MapGenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> GeneratedMap {
        let mut map = RoomsAndCorridors.generate(width, height, config, rng);
        let carved: Vec<Pos> =
            map.grid.positions().filter(|&pos| map.grid.kind_at(pos) == TileKind::Empty).collect();
        for pos in carved.into_iter().step_by(7) {
            map.grid.set_kind(pos, TileKind::Door);
        }
        map
    }
}

fn theme() -> impl Strategy<Value = Theme> {
    prop::sample::select(Theme::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn decorations_stay_in_interiors_and_never_overwrite(
        seed in any::<u64>(),
        theme in theme(),
        floor in 1_u32..6,
        room_chance in 0.0_f64..=1.0,
        corridor_chance in 0.0_f64..=1.0,
        width in 5_usize..48,
        height in 5_usize..36,
    ) {
        let mut config = MapGenerationConfig::new(theme, floor);
        config.settings = MapSettings {
            stellar_feature_chance: Some(room_chance),
            crystal_chance: Some(room_chance),
            relic_chance: Some(room_chance),
            constellation_chance: Some(corridor_chance),
            moss_chance: Some(corridor_chance),
            rubble_chance: Some(corridor_chance),
            ..MapSettings::default()
        };

        let base = DoorStamped.generate(width, height, &config, &mut SeededRandom::new(seed));
        let decorated = theme
            .decorator_with_base(DoorStamped)
            .generate(width, height, &config, &mut SeededRandom::new(seed));

        prop_assert_eq!(&decorated.rooms, &base.rooms);
        for pos in base.grid.positions() {
            let before = base.grid.get(pos).copied();
            let after = decorated.grid.get(pos).copied();
            if !before.is_some_and(|tile| tile.is_sentinel()) {
                prop_assert_eq!(after, before, "non-sentinel cell {:?} changed", pos);
            }
        }
        for (pos, _) in decorated.decorations() {
            for room in decorated.rooms.iter().filter(|room| room.contains(pos)) {
                prop_assert!(room.interior_contains(pos), "{:?} sits on the edge of {:?}", pos, room);
            }
        }
    }

    #[test]
    fn same_seed_same_floor(seed in any::<u64>(), theme in theme(), floor in 1_u32..6) {
        let config = MapGenerationConfig::new(theme, floor);
        let first = theme.decorator().generate(40, 30, &config, &mut SeededRandom::new(seed));
        let second = theme.decorator().generate(40, 30, &config, &mut SeededRandom::new(seed));
        prop_assert_eq!(first.fingerprint(), second.fingerprint());
    }
}

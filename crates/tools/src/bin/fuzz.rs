use anyhow::{Result, bail};
use atlas::{
    BaseGenerator, GeneratedMap, MapGenerationConfig, RoomsAndCorridors, SeededRandom, Theme,
    TileKind,
};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn pick(rng: &mut ChaCha8Rng, low: usize, high: usize) -> usize {
    low + rng.next_u64() as usize % (high - low + 1)
}

fn check_floor(base: &GeneratedMap, decorated: &GeneratedMap) -> Result<()> {
    if base.rooms != decorated.rooms {
        bail!("decorator changed the room list");
    }
    for pos in base.grid.positions() {
        let before = base.grid.get(pos).copied();
        let after = decorated.grid.get(pos).copied();
        if !before.is_some_and(|tile| tile.is_sentinel()) && before != after {
            bail!("non-sentinel cell {pos:?} changed from {before:?} to {after:?}");
        }
        let on_border = pos.x == 0
            || pos.y == 0
            || pos.x as usize == base.width() - 1
            || pos.y as usize == base.height() - 1;
        if on_border && decorated.grid.kind_at(pos) != TileKind::Wall {
            bail!("border breached at {pos:?}");
        }
    }
    for (pos, decoration) in decorated.decorations() {
        if let Some(room) = decorated.rooms.iter().find(|room| room.contains(pos))
            && !room.interior_contains(pos)
        {
            bail!("{decoration:?} at {pos:?} sits on the edge of {room:?}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    println!("Starting decoration fuzz on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut decorations = 0usize;
    for run in 0..args.runs {
        let floor_seed = rng.next_u64();
        let theme = choose(&mut rng, &Theme::ALL);
        let floor = pick(&mut rng, 1, 6) as u32;
        let width = pick(&mut rng, 5, 64);
        let height = pick(&mut rng, 5, 48);

        let config = MapGenerationConfig::new(theme, floor);
        let base = RoomsAndCorridors.generate(width, height, &config, &mut SeededRandom::new(floor_seed));
        let decorated =
            theme.decorator().generate(width, height, &config, &mut SeededRandom::new(floor_seed));
        let replayed =
            theme.decorator().generate(width, height, &config, &mut SeededRandom::new(floor_seed));

        if decorated.fingerprint() != replayed.fingerprint() {
            bail!("run {run}: {theme} seed={floor_seed} is not reproducible");
        }
        if let Err(err) = check_floor(&base, &decorated) {
            bail!("run {run}: {theme} floor {floor} {width}x{height} seed={floor_seed}: {err}");
        }
        decorations += decorated.decorations().count();
    }

    println!("Fuzzing completed successfully ({decorations} decorations checked).");
    Ok(())
}

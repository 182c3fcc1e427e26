use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use atlas::{AreaCatalog, ProgressionSnapshot, Session, TileKind};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Generates one floor from an area catalog and prints it as ASCII.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Area catalog TOML; the built-in catalog when omitted
    #[arg(short, long)]
    catalog: Option<PathBuf>,
    /// Area to preview; the catalog's starting area when omitted
    #[arg(short, long)]
    area: Option<String>,
    #[arg(short, long, default_value_t = 1)]
    floor: u32,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => AreaCatalog::load(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
        None => AreaCatalog::builtin().context("Built-in catalog is invalid")?,
    };
    let area_id = args.area.clone().unwrap_or_else(|| catalog.starting_area.to_string());
    if catalog.area(&area_id).is_none() {
        bail!("Area {area_id} is not in the catalog");
    }
    let all_areas = catalog.areas.iter().map(|area| area.id.clone()).collect();

    let mut manager = catalog.into_manager()?;
    // Preview ignores progression: every area is open.
    manager.load_state(ProgressionSnapshot { unlocked_areas: all_areas, ..ProgressionSnapshot::default() });

    tracing::info!(area_id = %area_id, floor = args.floor, seed = args.seed, "previewing floor");
    let mut session = Session::seeded(manager, args.seed);
    let area = session.enter_area(&area_id)?;
    println!("{} ({}) floor {}/{}", area.name, area.theme, args.floor, area.floor_count());

    let instance = session.generate_floor(args.floor)?;
    if let Some(narrative) = &instance.narrative {
        println!("{narrative}");
    }
    print!("{}", instance.map.render_ascii());
    println!("Rooms: {}", instance.map.rooms.len());
    let mut decorations: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, decoration) in instance.map.decorations() {
        *decorations.entry(decoration.as_str()).or_default() += 1;
    }
    let decoration_summary: Vec<String> =
        decorations.iter().map(|(name, count)| format!("{name} x{count}")).collect();
    println!("Decorations: {}", decoration_summary.join(", "));

    let kinds: BTreeSet<TileKind> = instance.map.grid.tiles().iter().map(|tile| tile.kind).collect();
    if let Some(area) = session.manager().current_area() {
        for kind in kinds {
            let sprite = area.tile_sprite(kind.as_str()).unwrap_or_else(|| "-".to_string());
            println!("Sprite {}: {sprite}", kind.as_str());
        }
    }
    println!("Enemies: {}", instance.enemies.join(", "));
    println!("Items: {}", instance.items.join(", "));
    println!("Fingerprint: {:016x}", instance.map.fingerprint());

    Ok(())
}

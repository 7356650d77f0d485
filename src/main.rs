mod sandbox;
mod scene;

use std::path::PathBuf;

use clap::Parser;
use tidal_blocks::{BlockRegistry, ToolCatalog};
use tidal_growth::AlgaeAutomaton;

use crate::sandbox::Sandbox;
use crate::scene::SceneConfig;

#[derive(Parser, Debug)]
#[command(name = "tidal", about = "Run submerged plant growth in a reef scene")]
struct Args {
    /// Block declarations
    #[arg(long, default_value = "assets/blocks.toml")]
    blocks: PathBuf,
    /// Tool declarations; prints which tools harvest the plant
    #[arg(long)]
    items: Option<PathBuf>,
    #[arg(long, default_value = "assets/scenes/reef.toml")]
    scene: PathBuf,
    /// Block that grows
    #[arg(long, default_value = "algae")]
    plant: String,
    #[arg(long, default_value_t = 24000)]
    ticks: u64,
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Random ticks per chunk section per tick
    #[arg(long, default_value_t = 3)]
    samples_per_tick: u32,
    /// Remove a random solid block every N ticks (0 = never)
    #[arg(long, default_value_t = 0)]
    erode_every: u64,
    /// Log a population line every N ticks
    #[arg(long, default_value_t = 1000)]
    report_every: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let reg = BlockRegistry::load_from_path(&args.blocks)?;
    let plant = AlgaeAutomaton::new(&reg, &args.plant)?;

    if let Some(items) = &args.items {
        let tools = ToolCatalog::load_from_path(items)?;
        if let Some(ty) = reg.get(plant.block_id()) {
            let harvesting: Vec<&str> = tools
                .tools
                .iter()
                .filter(|t| ty.can_harvest_with(Some(*t)))
                .map(|t| t.name.as_str())
                .collect();
            log::info!(
                target: "sandbox",
                "{} drops by hand: {}; with tools: [{}]",
                ty.debug_name(),
                ty.can_harvest_with(None),
                harvesting.join(", ")
            );
        }
    }

    let scene = SceneConfig::load_from_path(&args.scene)?.build(&reg, &plant)?;
    let mut sandbox = Sandbox::new(plant, scene, args.seed);
    let start = sandbox.population();
    log::info!(target: "sandbox", "seed {} start population {}", args.seed, start);

    for t in 1..=args.ticks {
        sandbox.tick(args.samples_per_tick);
        if args.erode_every > 0 && t % args.erode_every == 0 {
            sandbox.erode();
        }
        if args.report_every > 0 && t % args.report_every == 0 {
            log::info!(target: "sandbox", "tick {}: population {}", t, sandbox.population());
        }
    }

    let stats = sandbox.stats();
    println!("ticks: {}", stats.ticks);
    println!("random ticks on plants: {}", stats.random_ticks);
    println!("population: {} -> {}", start, sandbox.population());
    println!("growth writes: {}", stats.total_writes());
    let mut kinds: Vec<_> = stats.writes.iter().collect();
    kinds.sort_by_key(|(k, _)| format!("{:?}", k));
    for (kind, n) in kinds {
        println!("  {:?}: {}", kind, n);
    }
    println!(
        "eroded: {}, trimmed: {}, removed: {}",
        stats.eroded, stats.trimmed, stats.removed
    );
    println!("stored blocks: {}", sandbox.world().stats().block_entries);
    Ok(())
}

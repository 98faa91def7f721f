#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates, inspects and replays Meadow scenes.

mod ascii;
mod config;
mod replay;

use std::{io, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use glam::Vec2;
use log::{info, LevelFilter};
use meadow_core::{Command, Event, MapConfig, TileKind};
use meadow_rendering::{Lighting, RenderingBackend, TileLayer};
use meadow_world::{self as world, query, World};
use simple_logger::SimpleLogger;

use crate::{
    ascii::{glyph, AsciiBackend},
    config::{FileConfig, ModeName, Overrides},
};

#[derive(Debug, Parser)]
#[command(name = "meadow", version, about = "Generate and explore Meadow tile worlds")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Generate a map and print it.
    Generate(GenerateArgs),
    /// Report the tile beneath a world-space position.
    Inspect(InspectArgs),
    /// Run a scripted platformer session and print its summary.
    Replay(ReplayArgs),
}

#[derive(Debug, Args)]
struct MapArgs {
    /// Scene configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Map width in tiles.
    #[arg(long)]
    width: Option<u32>,
    /// Map height in tiles.
    #[arg(long)]
    height: Option<u32>,
    /// Interior fill strategy.
    #[arg(long, value_enum)]
    mode: Option<ModeName>,
    /// Seed for weighted generation.
    #[arg(long)]
    seed: Option<u64>,
}

impl MapArgs {
    fn resolve(&self) -> Result<MapConfig> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(file.resolve(Overrides {
            width: self.width,
            height: self.height,
            mode: self.mode,
            seed: self.seed,
        }))
    }
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    map: MapArgs,
    /// Print how often each tile kind occurs.
    #[arg(long)]
    stats: bool,
}

#[derive(Debug, Args)]
struct InspectArgs {
    #[command(flatten)]
    map: MapArgs,
    /// Horizontal world position.
    #[arg(long, allow_negative_numbers = true)]
    x: f32,
    /// Vertical world position.
    #[arg(long, allow_negative_numbers = true)]
    y: f32,
    /// Pick the flower at the position, if there is one.
    #[arg(long)]
    pick: bool,
}

#[derive(Debug, Args)]
struct ReplayArgs {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3_600)]
    frames: u32,
    /// Seed for collectible layout and bomb drops.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

/// Entry point for the Meadow command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        CliCommand::Generate(args) => generate(&args),
        CliCommand::Inspect(args) => inspect(&args),
        CliCommand::Replay(args) => {
            run_replay(&args);
            Ok(())
        }
    }
}

fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("failed to initialise logger")
}

fn build_world(args: &MapArgs) -> Result<World> {
    let config = args.resolve()?;
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::GenerateMap { config }, &mut events);

    for event in events {
        match event {
            Event::MapGenerated { dimensions, mode } => info!(
                "{} {}x{} map ready ({mode:?})",
                query::welcome_banner(&world),
                dimensions.width(),
                dimensions.height()
            ),
            Event::MapGenerationRejected { reason } => {
                return Err(reason).context("could not generate map");
            }
            other => bail!("unexpected event while generating: {other:?}"),
        }
    }
    Ok(world)
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let world = build_world(&args.map)?;
    let map = query::tile_map(&world);
    let layer = TileLayer::from_map(map);

    let stdout = io::stdout();
    let mut backend = AsciiBackend::new(stdout.lock());
    backend.present(&layer, Lighting::at(std::time::Duration::ZERO))?;

    if args.stats {
        let total = map.dimensions().cell_count() as f64;
        for kind in TileKind::GENERATED {
            let count = map.count(kind);
            println!(
                "{} {kind:?}: {count} ({:.1}%)",
                glyph(kind),
                count as f64 / total * 100.0
            );
        }
        println!("colliders: {}", layer.colliders().count());
    }
    Ok(())
}

fn inspect(args: &InspectArgs) -> Result<()> {
    let mut world = build_world(&args.map)?;
    let layer = TileLayer::from_map(query::tile_map(&world));
    let Some(tile) = layer.tile_under(Vec2::new(args.x, args.y)) else {
        bail!("position ({}, {}) lies outside the map", args.x, args.y);
    };
    let kind = query::tile_at(&world, tile)?;
    println!(
        "tile ({}, {}): {kind:?}, blocking: {}, interactable: {}",
        tile.x(),
        tile.y(),
        kind.blocks_movement(),
        kind.is_interactable()
    );

    if args.pick {
        let mut events = Vec::new();
        world::apply(&mut world, Command::PickFlower { tile }, &mut events);
        for event in events {
            match event {
                Event::FlowerPicked { .. } => println!(
                    "picked; {} flowers remain",
                    query::flowers_remaining(&world)
                ),
                Event::InteractionRejected { reason, .. } => println!("not picked: {reason}"),
                other => bail!("unexpected event while picking: {other:?}"),
            }
        }
    }
    Ok(())
}

fn run_replay(args: &ReplayArgs) {
    let summary = replay::run(args.frames, args.seed);
    println!("frames: {}", summary.frames);
    println!("final score: {}", summary.final_score);
    println!("best score: {}", summary.best_score);
    println!("bombs dropped: {}", summary.bombs);
    println!("restarts: {}", summary.restarts);
    println!("star batches: {}", summary.star_batches);
}

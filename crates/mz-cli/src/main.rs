//! mazegen: command-line dungeon generator
//!
//! Generates room-and-maze dungeons, prints them, and can run a number of
//! exploration episodes with a random-walk explorer for quick sanity checks.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use strum::IntoEnumIterator;

use mz_core::dungeon::{DIRECTIONS, Dungeon, PlacementKind};
use mz_core::episode::{EpisodeSummary, EpisodeTracker};
use mz_core::spawn::plan_spawns;
use mz_core::world::LevelSequence;
use mz_core::{GameRng, GeneratorOptions, ROOM_SPAWN_ELEVATION, generate_dungeon};

/// Output format for a generated dungeon
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Text grid, `#` for wall and `.` for floor
    Ascii,
    /// The full dungeon as JSON
    Json,
    /// Counters and placement totals
    Summary,
}

/// Procedural room-and-maze dungeon generator
#[derive(Parser, Debug)]
#[command(name = "mazegen")]
#[command(author, version, about = "Generate room-and-maze dungeons", long_about = None)]
struct Args {
    /// JSON options file (camelCase keys, every key optional)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Seed; overrides the config file
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// World size in world units
    #[arg(long = "grid-size")]
    grid_size: Option<f32>,

    /// Cell size in world units
    #[arg(long = "cell-size")]
    cell_size: Option<f32>,

    /// Chance (0-100) that a corridor turns when it could continue straight
    #[arg(short = 'w', long = "winding")]
    winding: Option<u32>,

    /// Chance (0-100) of opening a redundant connector
    #[arg(short = 'x', long = "extra-connectors")]
    extra_connectors: Option<u32>,

    /// Use a level preset instead of the world size options
    #[arg(short = 'l', long = "level")]
    level: Option<usize>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Ascii)]
    format: Format,

    /// Run this many exploration episodes instead of printing one dungeon
    #[arg(short = 'e', long = "episodes")]
    episodes: Option<u32>,

    /// Step limit per episode
    #[arg(long = "max-steps", default_value_t = 2000)]
    max_steps: u64,

    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    /// Config file first, then flags on top
    fn options(&self) -> Result<GeneratorOptions> {
        let mut options = match &self.config {
            Some(path) => GeneratorOptions::load_from_file(path)
                .with_context(|| format!("loading options from {}", path.display()))?,
            None => GeneratorOptions::default(),
        };

        if let Some(grid_size) = self.grid_size {
            options.grid_size = grid_size;
        }
        if let Some(cell_size) = self.cell_size {
            options.cell_size = cell_size;
        }
        if let Some(winding) = self.winding {
            options.winding_percent = winding;
        }
        if let Some(chance) = self.extra_connectors {
            options.extra_connector_chance = chance;
        }
        if let Some(seed) = self.seed {
            options.seed = Some(seed);
        }

        options.validate()?;
        Ok(options)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = args.options()?;
    let seed = options.seed.unwrap_or_else(|| GameRng::from_entropy().seed());

    match args.episodes {
        Some(count) => run_episodes(&args, &options, seed, count),
        None => {
            let dungeon = build(&args, &options, seed)?;
            print_dungeon(&dungeon, args.format, seed)
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Generate one dungeon, from a level preset when one was asked for
fn build(args: &Args, options: &GeneratorOptions, seed: u64) -> Result<Dungeon> {
    match args.level {
        Some(index) => {
            let mut levels = LevelSequence::default();
            match levels.load(index, options, seed)? {
                Some(dungeon) => Ok(dungeon),
                None => bail!(
                    "no level {} (there are {} levels)",
                    index,
                    levels.levels().len()
                ),
            }
        }
        None => Ok(generate_dungeon(options, &mut GameRng::new(seed))?),
    }
}

fn print_dungeon(dungeon: &Dungeon, format: Format, seed: u64) -> Result<()> {
    match format {
        Format::Ascii => print!("{}", dungeon.grid.render_ascii()),
        Format::Json => {
            let json =
                serde_json::to_string_pretty(dungeon).context("serializing the dungeon")?;
            println!("{json}");
        }
        Format::Summary => {
            let stats = &dungeon.stats;
            println!("seed:             {seed}");
            println!(
                "grid:             {}x{}",
                dungeon.grid.width(),
                dungeon.grid.height()
            );
            println!("rooms:            {}", stats.rooms);
            println!("maze floods:      {}", stats.maze_floods);
            println!("regions:          {}", stats.regions);
            println!(
                "connectors:       {} ({} primary, {} extra)",
                stats.connect.connectors, stats.connect.primary, stats.connect.extra
            );
            println!("dead ends pruned: {}", stats.dead_ends_removed);
            println!("floor cells:      {}", stats.floor_cells);
            for kind in PlacementKind::iter() {
                println!("{:<17} {}", format!("{kind}:"), dungeon.layout.count(kind));
            }
        }
    }
    Ok(())
}

/// Regenerate `count` times and walk each dungeon
fn run_episodes(args: &Args, options: &GeneratorOptions, seed: u64, count: u32) -> Result<()> {
    let mut tracker = EpisodeTracker::new();
    let mut summaries: Vec<EpisodeSummary> = Vec::with_capacity(count as usize);

    for run in 0..count {
        let episode_seed = seed.wrapping_add(u64::from(run));
        let dungeon = build(args, options, episode_seed)?;
        let mut rng = GameRng::new(episode_seed);
        let reached = explore(&dungeon, &mut tracker, &mut rng, args.max_steps);

        let summary = tracker.summary();
        log::info!(
            "episode {}: seed {}, {} steps, explored {}/{} ({:.1}%), goal {}",
            summary.episode,
            episode_seed,
            summary.steps,
            summary.visited_cells,
            summary.total_cells,
            summary.exploration_rate * 100.0,
            if reached { "reached" } else { "missed" }
        );
        summaries.push(summary);
    }

    if args.format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }
    Ok(())
}

/// Random walk from the player spawn until the goal is touched, the floor
/// is explored, or the step limit runs out. Returns whether the goal was hit.
fn explore(
    dungeon: &Dungeon,
    tracker: &mut EpisodeTracker,
    rng: &mut GameRng,
    max_steps: u64,
) -> bool {
    let plan = plan_spawns(dungeon, rng);
    tracker.start_episode(dungeon);

    let mut pos = plan.player;
    tracker.mark_visited(dungeon, &pos);

    let Some(mut cell) = dungeon.world_to_cell(&pos) else {
        return false;
    };

    for _ in 0..max_steps {
        if tracker.check_goal(&pos, &plan.goal) {
            return true;
        }
        if tracker.is_complete() {
            break;
        }

        let moves: Vec<(usize, usize)> = DIRECTIONS
            .iter()
            .filter_map(|&dir| dungeon.grid.offset(cell.0, cell.1, dir, 1))
            .filter(|&(x, y)| dungeon.grid.is_floor(x, y))
            .collect();
        let Some(&next) = rng.choose(&moves) else {
            break;
        };

        cell = next;
        pos = dungeon.cell_to_world(cell.0, cell.1, ROOM_SPAWN_ELEVATION);
        tracker.record_step();
        tracker.mark_visited(dungeon, &pos);
    }
    tracker.check_goal(&pos, &plan.goal)
}

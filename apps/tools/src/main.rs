use std::path::PathBuf;

use anyhow::{Context, Result};
use card_stack::{
    geometry_for, load_config, CardEvent, EngineConfig, RoundSetup, StackManager, StackSpec,
};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use shared::{
    domain::{Size, Vec2},
    protocol::StackEvent,
};

const FRAME: f32 = 1.0 / 60.0;
/// Frames allowed for one scripted step before the simulation gives up.
const MAX_FRAMES_PER_STEP: usize = 1_200;

#[derive(Parser, Debug)]
struct Cli {
    /// Engine tuning file; defaults to `card_stack.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deal a round, reveal and swipe away every card, printing stack events as JSON lines.
    Simulate {
        #[arg(long, default_value_t = 4)]
        players: usize,
        #[arg(long, default_value_t = 1)]
        spies: usize,
        #[arg(long)]
        hints: bool,
        #[arg(long, default_value_t = 7)]
        seed: u64,
        #[arg(long, default_value_t = 430.0)]
        width: f32,
        #[arg(long, default_value_t = 900.0)]
        height: f32,
    },
    /// Print the resting geometry of every index for a stack size.
    Geometry { size: usize },
    /// Load and validate the engine config, printing the effective values.
    CheckConfig,
}

#[derive(Debug, Serialize)]
struct GeometryRow {
    index: usize,
    scale: f32,
    vertical_offset: f32,
    z_order: i32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            players,
            spies,
            hints,
            seed,
            width,
            height,
        } => {
            let config = load_config(cli.config.as_deref()).context("failed to load config")?;
            let setup = RoundSetup {
                player_count: players,
                spy_count: spies,
                show_hints: hints,
                ..RoundSetup::default()
            };
            let events = simulate(config, &setup, seed, Size::new(width, height))?;
            for event in events {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
        Command::Geometry { size } => {
            let config = load_config(cli.config.as_deref()).context("failed to load config")?;
            for row in geometry_rows(&config, size) {
                println!("{}", serde_json::to_string(&row)?);
            }
        }
        Command::CheckConfig => match load_config(cli.config.as_deref()) {
            Ok(config) => println!("{}", serde_json::to_string_pretty(&config)?),
            Err(err) => {
                println!("{}", serde_json::to_string_pretty(&err.report())?);
                return Err(err).context("config check failed");
            }
        },
    }

    Ok(())
}

fn geometry_rows(config: &EngineConfig, size: usize) -> Vec<GeometryRow> {
    (0..size)
        .map(|index| {
            let geometry = geometry_for(&config.stack, index, size);
            GeometryRow {
                index,
                scale: geometry.scale,
                vertical_offset: geometry.vertical_offset,
                z_order: geometry.z_order,
            }
        })
        .collect()
}

/// Plays a whole round: every card is tapped to flip, then flicked off to the left.
fn simulate(
    config: EngineConfig,
    setup: &RoundSetup,
    seed: u64,
    container: Size,
) -> Result<Vec<StackEvent>> {
    let descriptors = setup
        .deal(&mut StdRng::seed_from_u64(seed))
        .context("invalid round settings")?;
    let mut stack = StackManager::new(config, StackSpec::new(descriptors, container));
    let mut events = Vec::new();
    settle(&mut stack)?;
    events.extend(stack.drain_events());

    while !stack.is_empty() {
        stack.handle(CardEvent::Tap);
        settle(&mut stack)?;

        let start = Vec2::new(container.width * 0.5, container.height * 0.5);
        let velocity = Vec2::new(-(config.dismissal.velocity_threshold * 1.5), 0.0);
        stack.handle(CardEvent::PointerDown { point: start });
        stack.handle(CardEvent::PointerMove {
            point: start + Vec2::new(-container.width * 0.5, 0.0),
            velocity,
        });
        stack.handle(CardEvent::PointerUp { velocity });
        settle(&mut stack)?;

        stack
            .check_invariants()
            .context("stack invariant broken during simulation")?;
        events.extend(stack.drain_events());
    }

    Ok(events)
}

fn settle(stack: &mut StackManager) -> Result<()> {
    for _ in 0..MAX_FRAMES_PER_STEP {
        stack.tick(FRAME);
        if stack.is_settled() {
            return Ok(());
        }
    }
    anyhow::bail!("stack did not settle within {MAX_FRAMES_PER_STEP} frames")
}

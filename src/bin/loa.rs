//! Command-line front end: list bots and play games in the terminal.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rust_loa::bots::{BotContext, BotRegistry};
use rust_loa::core::{Board, EngineConfig, GameRng, Move, Side, SideMap};
use rust_loa::engine::{
    format_clock, Controller, DriverError, DriverHandle, GameDriver, GameEvent, Outcome,
};

const HUMAN: &str = "human";

#[derive(Parser, Debug)]
#[command(name = "loa", about = "Line-of-capture board game")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered bots
    Bots,
    /// Play one or more games
    Play {
        /// Controller for Black: "human" or a bot name
        #[arg(long, default_value = HUMAN)]
        black: String,
        /// Controller for White: "human" or a bot name
        #[arg(long, default_value = "plain bot")]
        white: String,
        /// Number of games
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// TOML engine configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = BotRegistry::with_defaults();

    match cli.command {
        Command::Bots => {
            for name in registry.list() {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Play {
            black,
            white,
            games,
            config,
        } => {
            let config = match config {
                Some(path) => EngineConfig::from_file(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => EngineConfig::default(),
            };
            config.validate()?;
            play(&registry, config, SideMap::from_pair(black, white), games).await
        }
    }
}

fn controller(
    registry: &BotRegistry,
    name: &str,
    side: Side,
    rng: &GameRng,
    config: &EngineConfig,
    game: u32,
) -> Result<Controller> {
    if name == HUMAN {
        return Ok(Controller::Human);
    }
    let ctx = BotContext::new(side, rng.for_context(&format!("{}/{}", side, game)))
        .with_mcts(config.mcts.clone());
    match registry.create(name, ctx) {
        Some(bot) => Ok(Controller::Bot(bot)),
        None => bail!(
            "unknown bot {:?}; available: {}",
            name,
            registry.list().join(", ")
        ),
    }
}

async fn play(
    registry: &BotRegistry,
    config: EngineConfig,
    names: SideMap<String>,
    games: u32,
) -> Result<()> {
    let rng = GameRng::new(config.seed);
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let (driver, handle) = GameDriver::new(config.clone(), events_tx);
    let driver = tokio::spawn(driver.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut wins: SideMap<u32> = SideMap::with_value(0);
    let mut shared = 0u32;

    for game in 1..=games {
        let controllers = SideMap::from_pair(
            controller(registry, &names[Side::Black], Side::Black, &rng, &config, game)?,
            controller(registry, &names[Side::White], Side::White, &rng, &config, game)?,
        );
        let humans = controllers.map(|_, c| !c.is_bot());

        println!(
            "Game {} of {}: {} (Black) vs {} (White)",
            game,
            games,
            names[Side::Black],
            names[Side::White]
        );
        handle.start(controllers)?;

        let mut human_to_move = false;
        let outcome = loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        bail!("game driver stopped unexpectedly");
                    };
                    match event {
                        GameEvent::BoardChanged { .. } => {
                            let status = handle.status().await?;
                            println!("{}", Board::from_snapshot(&status.snapshot));
                            println!(
                                "Black {}s  White {}s",
                                format_clock(status.state.game_clock[Side::Black]),
                                format_clock(status.state.game_clock[Side::White]),
                            );
                        }
                        GameEvent::TurnChanged { side, label } => {
                            human_to_move = humans[side];
                            if human_to_move {
                                println!("{} to move (x0 y0 x1 y1):", label);
                            } else {
                                println!("{} ({}) is thinking...", label, names[side]);
                            }
                        }
                        GameEvent::NoMoves { side } => {
                            println!("{} has no legal move and passes", side);
                        }
                        GameEvent::StepClockTick { remaining } if remaining <= 10 && human_to_move => {
                            println!("{} seconds left", remaining);
                        }
                        GameEvent::GameOver(outcome) => break outcome,
                        other => debug!(?other, "Event"),
                    }
                }
                line = lines.next_line(), if human_to_move => {
                    let Some(line) = line? else {
                        handle.shutdown()?;
                        return Ok(());
                    };
                    if line.trim() == "quit" {
                        handle.shutdown()?;
                        return Ok(());
                    }
                    match parse_move(&line) {
                        Some(mv) => match handle.submit_move(mv).await {
                            Ok(()) => {}
                            Err(DriverError::Rejected { reason }) => {
                                println!("{}; try again", reason);
                            }
                            Err(e) => return Err(e.into()),
                        },
                        None => println!("expected four numbers: x0 y0 x1 y1"),
                    }
                }
            }
        };

        println!("{}", outcome);
        info!(game, %outcome, "Game finished");
        match outcome.winner() {
            Some(side) => wins[side] += 1,
            None if outcome == Outcome::BothWin => shared += 1,
            None => {}
        }
    }

    if games > 1 {
        println!(
            "Black {}  White {}  shared {}  drawn {}",
            wins[Side::Black],
            wins[Side::White],
            shared,
            games - wins[Side::Black] - wins[Side::White] - shared
        );
    }

    shutdown(&handle)?;
    driver.await?;
    Ok(())
}

fn shutdown(handle: &DriverHandle) -> Result<()> {
    match handle.shutdown() {
        Ok(()) | Err(DriverError::Closed) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn parse_move(line: &str) -> Option<Move> {
    let numbers = line
        .split_whitespace()
        .map(|n| n.parse::<i32>().ok())
        .collect::<Option<Vec<_>>>()?;
    match numbers.as_slice() {
        &[x0, y0, x1, y1] => Some(Move::new(x0, y0, x1, y1)),
        _ => None,
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that loads lizard puzzles and plays them in the terminal.

mod render;
mod script;

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use lizard_puzzle_core::{Command, Event, ScoreUpdateListener, ShowDialogListener};
use lizard_puzzle_system_level_loader as level_loader;
use lizard_puzzle_system_notifications::Notifier;
use lizard_puzzle_world::{self as world, query, World};

#[derive(Debug, Parser)]
#[command(name = "lizard-puzzle", about = "Guide every lizard off the grid through its exits")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Prints the board described by a level file.
    Show {
        /// Path to the level file.
        level: PathBuf,
        /// Emits a JSON snapshot instead of the text board.
        #[arg(long)]
        json: bool,
    },
    /// Plays a level using moves read from a script or standard input.
    Play {
        /// Path to the level file.
        level: PathBuf,
        /// File holding one `col row direction` move per line.
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

/// Entry point for the lizard puzzle command-line interface.
fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().mode {
        Mode::Show { level, json } => show(&level, json),
        Mode::Play { level, script } => play(&level, script.as_deref()),
    }
}

fn load(level: &Path) -> Result<World> {
    let mut world = World::new();
    let mut events = Vec::new();
    level_loader::load_file(level, &mut world, &mut events)
        .with_context(|| format!("failed to load level {}", level.display()))?;
    Ok(world)
}

fn show(level: &Path, json: bool) -> Result<()> {
    let world = load(level)?;
    if json {
        let snapshot = render::BoardSnapshot::capture(&world);
        let text =
            serde_json::to_string_pretty(&snapshot).context("failed to serialize the board")?;
        println!("{text}");
    } else {
        print!("{}", render::render(&world));
    }
    Ok(())
}

fn play(level: &Path, moves: Option<&Path>) -> Result<()> {
    let mut world = load(level)?;
    let dialog: Box<dyn ShowDialogListener> = Box::new(|message: &str| println!("{message}"));
    let score: Box<dyn ScoreUpdateListener> =
        Box::new(|count: usize| println!("Lizards remaining: {count}"));
    let mut notifier = Notifier::new(Some(dialog), Some(score));

    print!("{}", render::render(&world));
    println!("Lizards remaining: {}", query::lizards(&world).len());

    let input: Box<dyn BufRead> = match moves {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open move script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read move")?;
        let request = match script::parse_line(&line) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(error) => {
                warn!("line {}: {error:#}", index + 1);
                continue;
            }
        };

        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::MoveLizard {
                cell: request.cell,
                direction: request.direction,
            },
            &mut events,
        );
        if events.is_empty() {
            println!(
                "Move {} {} {:?} had no effect.",
                request.cell.column(),
                request.cell.row(),
                request.direction
            );
            continue;
        }

        print!("{}", render::render(&world));
        notifier.handle(&events);
        if events.contains(&Event::PuzzleSolved) {
            return Ok(());
        }
    }

    info!(
        "input ended with {} lizard(s) still on the grid",
        query::lizards(&world).len()
    );
    Ok(())
}

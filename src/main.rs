//! Goban-Rules command line.
//!
//! ## Usage
//!
//! - `goban-rules` - Show a demo
//! - `goban-rules protocol` - Serve the text protocol on stdin/stdout
//! - `goban-rules selfplay` - Play one random game and report the result
//!
//! Logs go to stderr; set `RUST_LOG=debug` to trace every move.

use std::io;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use goban_rules::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_PLAYOUT_SEED, MAX_LABELLED_SIZE, max_game_len,
};
use goban_rules::playout::Playout;
use goban_rules::protocol::{ProtocolEngine, format_vertex, render_board};
use goban_rules::{Intersection, Session, Stone};

/// Goban-Rules: a rules engine for a Go-like board game
#[derive(Parser)]
#[command(name = "goban-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the line-oriented text protocol on stdin/stdout
    Protocol {
        /// Initial board size
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
    },
    /// Play a random game and print the final position
    Selfplay {
        /// Board size
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        /// Random seed
        #[arg(long, default_value_t = DEFAULT_PLAYOUT_SEED)]
        seed: u64,
        /// Move-attempt limit (defaults to three times the board area)
        #[arg(long)]
        max_moves: Option<usize>,
        /// Print the report as JSON instead of a diagram
        #[arg(long)]
        json: bool,
    },
    /// Run a short scripted demo
    Demo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Protocol { size }) => {
            if size > MAX_LABELLED_SIZE {
                bail!("protocol boards are limited to {MAX_LABELLED_SIZE}x{MAX_LABELLED_SIZE}");
            }
            check_size(size)?;
            info!(size, "serving text protocol");
            let mut engine = ProtocolEngine::new(size);
            engine.run(io::stdin().lock(), io::stdout().lock())
        }
        Some(Commands::Selfplay {
            size,
            seed,
            max_moves,
            json,
        }) => run_selfplay(size, seed, max_moves.unwrap_or(max_game_len(size)), json),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        bail!("board size must be at least 1");
    }
    Ok(())
}

fn run_selfplay(size: usize, seed: u64, max_moves: usize, json: bool) -> Result<()> {
    check_size(size)?;
    let mut session = Session::new(size);
    let report = Playout::new(seed).run(&mut session, max_moves);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("{}", session.board());
    println!(
        "moves {} passes {} captures black {} white {}",
        report.moves,
        report.passes,
        report.final_view.black_captures,
        report.final_view.white_captures
    );
    match session.outcome() {
        Some(outcome) => println!("result: {outcome}"),
        None => println!("result: unfinished, {} to move", session.to_move()),
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Goban-Rules: capture and suicide demo\n");

    let mut session = Session::new(9);
    // Black surrounds a lone White stone and takes it.
    let script = [(0, 1), (1, 1), (1, 0), (8, 8), (1, 2), (8, 7), (2, 1)];
    for (row, col) in script {
        let mover = session.to_move();
        let view = session.place(row, col);
        let vertex = format_vertex(Intersection::new(row, col), session.size())?;
        match view.rejection {
            Some(rejection) => println!("{mover} {vertex}: rejected ({rejection})"),
            None => println!("{mover} {vertex}: ok"),
        }
    }
    println!("\n{}\n", render_board(session.board())?);
    println!(
        "captures: black {} white {}",
        session.captures(Stone::Black),
        session.captures(Stone::White)
    );

    // White may not fill the hole Black just made.
    let view = session.place(1, 1);
    if let Some(rejection) = view.rejection {
        let vertex = format_vertex(Intersection::new(1, 1), session.size())?;
        println!("white {vertex}: rejected ({rejection})");
    }
    Ok(())
}

//! Checkers-Rust: English draughts engine.
//!
//! ## Usage
//!
//! - `checkers-rust` - Engine plays itself for a few moves
//! - `checkers-rust play` - Start the text protocol on stdin/stdout
//! - `checkers-rust demo --plies 20` - Engine self-play demo

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use checkers_rust::constants::{DEFAULT_DEPTH, DEFAULT_HEIGHT, DEFAULT_PLAYER_ROWS, DEFAULT_WIDTH};
use checkers_rust::game::Game;
use checkers_rust::protocol::{EngineConfig, ProtocolEngine};
use checkers_rust::search::{dump_report, search_best_move};

/// Checkers-Rust: English draughts engine with a minimax opponent
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct Options {
    /// Board width
    #[arg(long, global = true, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    /// Board height
    #[arg(long, global = true, default_value_t = DEFAULT_HEIGHT)]
    height: usize,
    /// Rows of starting pawns per side
    #[arg(long, global = true, default_value_t = DEFAULT_PLAYER_ROWS)]
    rows: usize,
    /// Minimax search depth
    #[arg(long, global = true, default_value_t = DEFAULT_DEPTH)]
    depth: usize,
    /// Print search diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol on stdin/stdout
    Play,
    /// Let the engine play against itself
    Demo {
        /// Maximum number of moves to play
        #[arg(long, default_value_t = 12)]
        plies: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let opts = &cli.options;
    anyhow::ensure!(
        opts.rows * 2 <= opts.height,
        "{} rows per side do not fit on a board of height {}",
        opts.rows,
        opts.height
    );
    anyhow::ensure!(opts.depth > 0, "depth must be at least 1");

    let config = EngineConfig {
        width: opts.width,
        height: opts.height,
        player_rows: opts.rows,
        depth: opts.depth,
        verbose: opts.verbose,
    };

    match cli.command {
        Some(Commands::Play) => {
            let mut engine = ProtocolEngine::with_config(config);
            engine.run().context("protocol loop failed")?;
        }
        Some(Commands::Demo { plies }) => run_demo(&config, plies)?,
        None => run_demo(&config, 12)?,
    }
    Ok(())
}

fn run_demo(config: &EngineConfig, plies: usize) -> Result<()> {
    println!("Checkers-Rust: self-play at depth {}\n", config.depth);

    let mut game = Game::with_board(config.new_board());
    println!("{}", game.board);

    for ply in 1..=plies {
        let player = game.board.turn;
        let mv = if game.pending_chain().is_some() {
            Some(game.play_ai(config.depth)?)
        } else {
            let report = search_best_move(&game.board, config.depth)?;
            if config.verbose {
                dump_report(&report);
            }
            if let Some((from, to)) = report.best {
                game.play_move(player, from, to)
                    .with_context(|| format!("engine move {from} -> {to} was rejected"))?;
            }
            report.best
        };
        let Some((from, to)) = mv else {
            println!("{player} has no legal moves");
            break;
        };

        let chained = game.pending_chain().is_some();
        println!(
            "{ply}. {player} {from} -> {to}{}",
            if chained { " (continues)" } else { "" }
        );
        println!("{}", game.board);
    }

    let points = game.board.points;
    println!("captures: black {} white {}", points.black, points.white);
    Ok(())
}

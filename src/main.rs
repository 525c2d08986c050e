//! tictac4: a 4x4 tic-tac-toe engine.
//!
//! ## Usage
//!
//! - `tictac4` - Show a demo game
//! - `tictac4 serve` - Serve the text protocol on stdin/stdout
//! - `tictac4 arena --x-level Random --o-level "Minimax Hard"` - Self-play

use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fastrand::Rng;
use tracing_subscriber::EnvFilter;

use tictac4::arena::{play_game, play_match};
use tictac4::board::{Board, Mark};
use tictac4::difficulty::Difficulty;
use tictac4::game::GameSession;
use tictac4::protocol::Engine;

/// tictac4: a 4x4 tic-tac-toe engine
#[derive(Parser)]
#[command(name = "tictac4")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the random profile (drawn from entropy if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Difficulty used when a request does not name one
    #[arg(long, global = true, default_value = "Random")]
    level: Difficulty,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the text protocol on stdin/stdout
    Serve,
    /// Play one engine-vs-engine game and print every position
    Demo,
    /// Play two difficulties against each other and report the results
    Arena {
        /// Difficulty playing X (moves first)
        #[arg(long, default_value = "Random")]
        x_level: Difficulty,
        /// Difficulty playing O
        #[arg(long, default_value = "Minimax Hard")]
        o_level: Difficulty,
        /// Number of games
        #[arg(long, default_value_t = 10)]
        games: u32,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut rng = cli.seed.map_or_else(Rng::new, Rng::with_seed);

    match cli.command {
        Some(Commands::Serve) => {
            let mut engine = Engine::new(GameSession::new(rng), cli.level);
            engine.run(io::stdin().lock(), io::stdout().lock())?;
        }
        Some(Commands::Arena {
            x_level,
            o_level,
            games,
            json,
        }) => {
            let stats = play_match(x_level, o_level, games, &mut rng)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("X ({x_level}) vs O ({o_level}), {} games", stats.games);
                println!("X wins: {}", stats.x_wins);
                println!("O wins: {}", stats.o_wins);
                println!("Draws:  {}", stats.draws);
            }
        }
        Some(Commands::Demo) | None => run_demo(cli.level, &mut rng)?,
    }
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_demo(x_level: Difficulty, rng: &mut Rng) -> Result<()> {
    let o_level = Difficulty::MinimaxHard;
    println!("tictac4: X ({x_level}) vs O ({o_level})\n");

    let record = play_game(x_level, o_level, rng)?;
    let mut board = Board::new();
    let mut mark = Mark::X;
    for (row, col) in &record.moves {
        board.apply_move((*row, *col), mark)?;
        println!("{mark} plays ({row}, {col})");
        println!("{board}");
        mark = mark.opponent();
    }

    match record.winner {
        Some(winner) => println!("{winner} wins"),
        None => println!("Draw"),
    }
    Ok(())
}

use anyhow::Context;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use tile_merge::engine::{Board, Direction, Game, MoveOutcome};
use tile_merge::utils::board_from_dump;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Apply a sequence of moves to a board dump", long_about = None)]
struct Args {
    /// Moves to apply, one key per move (w/a/s/d or h/j/k/l), e.g. "aawd"
    #[arg(short, long, default_value = "")]
    moves: String,

    /// RNG seed for tile spawns
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Path to the board file, in the format printed by this tool (4 rows of 4 cells)
    board_file: PathBuf,
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn read_board_file(path: &Path) -> anyhow::Result<Board> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file {}", path.display()))?;
    let board = board_from_dump(&content)
        .with_context(|| format!("Invalid board format in {}", path.display()))?;
    Ok(board)
}

fn parse_moves(moves: &str) -> anyhow::Result<Vec<Direction>> {
    moves
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .enumerate()
        .map(|(i, key)| {
            Direction::from_key(key).with_context(|| format!("Move {} is not a direction", i + 1))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let board = read_board_file(&args.board_file)?;
    let directions = parse_moves(&args.moves)?;
    info!(
        board_file = %args.board_file.display(),
        moves = directions.len(),
        seed = args.seed,
        "loaded board"
    );

    let mut game = Game::with_board(board, SmallRng::seed_from_u64(args.seed));
    println!("Initial board state (score {}):\n{}", game.score(), game.board());

    for (i, direction) in directions.into_iter().enumerate() {
        let outcome = game.play(direction)?;
        debug!(move_idx = i, %direction, ?outcome);
        match outcome {
            MoveOutcome::Moved { spawned } => {
                println!("Move {}: {} (spawned at {:?})", i + 1, direction, spawned)
            }
            MoveOutcome::Unchanged => println!("Move {}: {} (no change)", i + 1, direction),
            MoveOutcome::GameOver => {
                println!("Move {}: {} (game over, not played)", i + 1, direction);
                break;
            }
        }
        print!("{}", game.board());
    }

    println!("Final score: {}", game.score());
    println!("Moves that changed the board: {}", game.moves());
    println!("Terminal: {}", game.board().is_terminal());
    Ok(())
}

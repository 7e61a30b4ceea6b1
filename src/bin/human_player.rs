use clap::Parser;
use std::io::{self, Write}; // For input/output
use tile_merge::engine::{Direction, Game, MoveOutcome};
use tile_merge::render::{Palette, Renderer};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the sliding tile puzzle in the terminal", long_about = None)]
struct Args {
    /// RNG seed for tile spawns. Omit for a different game every time
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the board without colors
    #[arg(long, default_value_t = false)]
    plain: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
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

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let mut game = match args.seed {
        Some(seed) => Game::with_seed(seed)?,
        None => Game::new()?,
    };
    let renderer = if args.plain {
        Renderer::plain()
    } else {
        Renderer::new(Palette::default())
    };
    info!(seed = ?args.seed, "starting game");

    println!("{}", renderer.render_message("2048"));

    loop {
        println!("---------------------");
        println!("{}", renderer.render_status(game.score(), game.moves()));
        println!("{}", renderer.render_board(game.board()));

        if game.is_game_over() {
            println!();
            println!("{}", renderer.render_message("Game Over"));
            println!("Final Score: {}", game.score());
            println!("Total Moves: {}", game.moves());
            println!("---------------------");
            game.new_game()?;
            continue;
        }

        print!("Enter a move (w/a/s/d, h/j/k/l or up/down/left/right), 'n' for a new game, 'q' to quit: ");
        io::stdout().flush()?; // Ensure prompt is shown before input

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "n" {
            game.new_game()?;
            println!("New game started.");
            continue;
        }

        match trimmed_input.parse::<Direction>() {
            Ok(direction) => match game.play(direction)? {
                MoveOutcome::Moved { .. } => {}
                MoveOutcome::Unchanged => println!("Nothing moves {}.", direction),
                MoveOutcome::GameOver => {}
            },
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}

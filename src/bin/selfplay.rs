use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};

use connect_four_ai::ai::{Agent, RandomAgent, SearchAgent};
use connect_four_ai::config::{AppConfig, OpponentKind};
use connect_four_ai::game::{Board, GameOutcome, Player};

/// Play headless matches between the search agent and an opponent.
#[derive(Parser)]
#[command(name = "selfplay", about = "Run headless Connect Four matches")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override the per-move thinking time in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,

    /// Override the opponent
    #[arg(long, value_enum)]
    opponent: Option<OpponentKind>,

    /// Hard cap on the search depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Print the final board of every game
    #[arg(long)]
    show_boards: bool,

    /// Log telemetry for every move
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Default)]
struct Tally {
    search_wins: usize,
    opponent_wins: usize,
    draws: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level).context("initializing logger")?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(games) = cli.games {
        config.game.games = games;
    }
    if let Some(ms) = cli.time_ms {
        config.search.time_budget_ms = ms;
    }
    if let Some(opponent) = cli.opponent {
        config.game.opponent = opponent;
    }
    if cli.max_depth.is_some() {
        config.search.max_depth = cli.max_depth;
    }
    config.validate().context("invalid configuration")?;

    info!(
        "playing {} games, budget {} ms, opponent {:?}",
        config.game.games, config.search.time_budget_ms, config.game.opponent
    );

    let mut tally = Tally::default();
    for game in 0..config.game.games {
        // Alternate colors so neither side always moves first
        let search_player = if game % 2 == 0 {
            Player::Yellow
        } else {
            Player::Red
        };
        let board = play_game(&config, search_player)?;

        match board.outcome() {
            Some(GameOutcome::Winner { player, .. }) if *player == search_player => {
                tally.search_wins += 1
            }
            Some(GameOutcome::Winner { .. }) => tally.opponent_wins += 1,
            _ => tally.draws += 1,
        }
        info!(
            "game {}/{}: search as {}, {} after {} moves",
            game + 1,
            config.game.games,
            search_player.name(),
            describe(board.outcome()),
            board.move_count()
        );
        if cli.show_boards {
            println!("{board}");
        }
    }

    println!(
        "search: {} wins, opponent: {} wins, draws: {}",
        tally.search_wins, tally.opponent_wins, tally.draws
    );
    Ok(())
}

fn play_game(config: &AppConfig, search_player: Player) -> Result<Board> {
    let mut search = SearchAgent::new(config.search.clone());
    let mut opponent: Box<dyn Agent> = match config.game.opponent {
        OpponentKind::Random => Box::new(RandomAgent::new()),
        OpponentKind::Search => Box::new(SearchAgent::new(config.search.clone())),
    };

    let mut board = Board::new();
    while !board.is_terminal() {
        let mover = board.current_player();
        let agent: &mut dyn Agent = if mover == search_player {
            &mut search
        } else {
            opponent.as_mut()
        };

        let column = match agent.select_action(&mut board) {
            Some(column) => column,
            // Out of time before the first round finished
            None => match board.successors().first() {
                Some(&column) => column,
                None => bail!("no legal move on a non-terminal board"),
            },
        };

        if let Some(report) = agent.last_report() {
            debug!(
                "{} ({}) -> {}: score {}, depth {}, {} nodes in {:?}{}",
                mover.name(),
                agent.name(),
                column,
                report.score,
                report.depth,
                report.nodes,
                report.elapsed,
                if report.timed_out { " (cutoff)" } else { "" }
            );
        }
        board
            .apply(column)
            .with_context(|| format!("{} played an illegal move", agent.name()))?;
    }
    Ok(board)
}

fn describe(outcome: Option<&GameOutcome>) -> String {
    match outcome {
        Some(GameOutcome::Winner { player, .. }) => format!("{} won", player.name()),
        Some(GameOutcome::Draw) => "draw".to_string(),
        None => "unfinished".to_string(),
    }
}

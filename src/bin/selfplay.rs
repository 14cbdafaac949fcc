use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use minimax_connect_four::ai::{Agent, MinimaxAgent, RandomAgent};
use minimax_connect_four::config::{AppConfig, PolicyKind, MAX_DEPTH};
use minimax_connect_four::game::{GameOutcome, GameState, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Opponent {
    Random,
    Minimax,
}

/// Play headless matches between the configured minimax agent and an opponent.
#[derive(Parser)]
#[command(name = "selfplay", about = "Run headless Connect Four matches")]
struct Cli {
    /// Number of games to play; the opening move alternates between sides
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Search to a fixed depth instead of the configured policy
    #[arg(long)]
    depth: Option<usize>,

    /// Who the minimax agent plays against
    #[arg(long, value_enum, default_value_t = Opponent::Random)]
    opponent: Opponent,

    /// Fixed depth for a minimax opponent
    #[arg(long, default_value_t = 3)]
    opponent_depth: usize,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,
}

#[derive(Debug, Default)]
struct Tally {
    wins: usize,
    losses: usize,
    draws: usize,
    moves: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.games == 0 {
        bail!("--games must be > 0");
    }
    for (flag, depth) in [("--depth", cli.depth), ("--opponent-depth", Some(cli.opponent_depth))] {
        if let Some(depth) = depth {
            if depth == 0 || depth > MAX_DEPTH {
                bail!("{} must be in [1, {}], got {}", flag, MAX_DEPTH, depth);
            }
        }
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.search.policy = PolicyKind::Fixed;
        config.search.depth = depth;
    }

    let mut agent = MinimaxAgent::new(config.search.build_policy())
        .with_history_capacity(config.search.history_capacity);
    let mut opponent: Box<dyn Agent> = match cli.opponent {
        Opponent::Random => match cli.seed {
            Some(seed) => Box::new(RandomAgent::with_seed(seed)),
            None => Box::new(RandomAgent::new()),
        },
        Opponent::Minimax => Box::new(MinimaxAgent::fixed(cli.opponent_depth)),
    };

    tracing::info!(
        games = cli.games,
        policy = agent.policy_name(),
        opponent = opponent.name(),
        "starting matches"
    );

    let started = Instant::now();
    let mut tally = Tally::default();

    for game in 1..=cli.games {
        // Minimax sits in the AI seat; the opening move alternates
        let first = if game % 2 == 1 { Player::Ai } else { Player::Human };
        agent.reset();
        opponent.reset();

        let state = play_game(&mut agent, opponent.as_mut(), first)
            .with_context(|| format!("playing game {game}"))?;
        let moves = state.board().moves_played();
        tally.moves += moves;

        let result = match state.outcome() {
            Some(GameOutcome::Winner(Player::Ai)) => {
                tally.wins += 1;
                "win"
            }
            Some(GameOutcome::Winner(Player::Human)) => {
                tally.losses += 1;
                "loss"
            }
            Some(GameOutcome::Draw) | None => {
                tally.draws += 1;
                "draw"
            }
        };

        tracing::info!(game, first = first.name(), moves, result, "game finished");
        tracing::debug!("final position:\n{}", state.board());
    }

    let games = cli.games as f64;
    tracing::info!(
        wins = tally.wins,
        losses = tally.losses,
        draws = tally.draws,
        win_rate = %format!("{:.1}%", tally.wins as f64 / games * 100.0),
        avg_moves = %format!("{:.1}", tally.moves as f64 / games),
        elapsed_s = %format!("{:.2}", started.elapsed().as_secs_f64()),
        "matches complete"
    );

    Ok(())
}

fn play_game(agent: &mut dyn Agent, opponent: &mut dyn Agent, first: Player) -> Result<GameState> {
    let mut state = GameState::initial(first);

    while !state.is_terminal() {
        let player = state.current_player();
        let mover: &mut dyn Agent = match player {
            Player::Ai => &mut *agent,
            Player::Human => &mut *opponent,
        };

        let Some(column) = mover.select_action(state.board(), player) else {
            bail!("{} found no move on a board that is not finished", mover.name());
        };
        state
            .play(column)
            .with_context(|| format!("{} chose column {}", mover.name(), column))?;
    }

    Ok(state)
}

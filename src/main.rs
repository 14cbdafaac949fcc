use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use minimax_connect_four::config::{AppConfig, OpponentKind, PolicyKind, MAX_DEPTH};
use minimax_connect_four::game::Player;
use minimax_connect_four::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Connect Four in the terminal against a minimax opponent.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Search to a fixed depth instead of the configured policy
    #[arg(long)]
    depth: Option<usize>,

    /// Play against a random mover instead of minimax
    #[arg(long)]
    random: bool,

    /// Let the computer make the first move
    #[arg(long)]
    ai_first: bool,

    /// Print a config file with every default value and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        if depth == 0 || depth > MAX_DEPTH {
            bail!("--depth must be in [1, {}], got {}", MAX_DEPTH, depth);
        }
        config.search.policy = PolicyKind::Fixed;
        config.search.depth = depth;
    }
    if cli.random {
        config.game.opponent = OpponentKind::Random;
    }
    if cli.ai_first {
        config.game.first_player = Player::Ai;
    }

    run(config).context("running terminal UI")
}

fn run(config: AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

use crate::ai::{Agent, SearchWorker};
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameOutcome, GameState, Player, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

use super::game_view::{self, AiStatus};

pub struct App {
    config: AppConfig,
    game_state: GameState,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    // `None` while the agent is out on a worker thread
    agent: Option<Box<dyn Agent>>,
    worker: Option<SearchWorker>,
    // Set when a search thread dies; cleared by a restart
    ai_failed: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let agent = config.build_agent();
        App {
            game_state: GameState::initial(config.game.first_player),
            config,
            selected_column: COLS / 2, // Start in middle
            should_quit: false,
            message: None,
            agent: Some(agent),
            worker: None,
            ai_failed: false,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.drive_ai();
            self.handle_events()?;
        }
        Ok(())
    }

    /// Start the AI turn when it is due, or collect its reply
    fn drive_ai(&mut self) {
        if self.ai_failed
            || self.game_state.is_terminal()
            || self.game_state.current_player() != Player::Ai
        {
            return;
        }

        if self.worker.is_none() {
            if let Some(agent) = self.agent.take() {
                let board = *self.game_state.board();
                self.worker = Some(SearchWorker::spawn(agent, board, Player::Ai));
            }
            return;
        }

        let polled = match &self.worker {
            Some(worker) => worker.try_recv(),
            None => return,
        };

        match polled {
            Ok(None) => {}
            Ok(Some(reply)) => {
                self.worker = None;
                self.agent = Some(reply.agent);
                match reply.column {
                    Some(column) => self.apply_move(column),
                    None => self.message = Some("No move left for the AI.".to_string()),
                }
            }
            Err(err) => {
                self.worker = None;
                self.agent = Some(self.config.build_agent());
                self.ai_failed = true;
                self.message = Some(format!("AI failed: {err}. Press 'r' to restart."));
            }
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.human_move();
            }
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    fn restart(&mut self) {
        // An in-flight search keeps its agent; start again with a fresh one
        if self.worker.take().is_some() {
            self.agent = Some(self.config.build_agent());
        }
        if let Some(agent) = self.agent.as_mut() {
            agent.reset();
        }
        self.ai_failed = false;
        self.game_state.reset();
        self.selected_column = COLS / 2;
        self.message = Some("New game started!".to_string());
    }

    fn human_move(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.game_state.current_player() != Player::Human {
            self.message = Some("Wait for the AI to move.".to_string());
            return;
        }
        self.apply_move(self.selected_column);
    }

    fn apply_move(&mut self, column: usize) {
        match self.game_state.play(column) {
            Ok(Some(outcome)) => {
                self.message = Some(match outcome {
                    GameOutcome::Winner(Player::Human) => "You beat the AI!".to_string(),
                    GameOutcome::Winner(Player::Ai) => "You lost to the AI.".to_string(),
                    GameOutcome::Draw => "It's a draw!".to_string(),
                });
            }
            Ok(None) => {}
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn(_)) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    fn ai_status(&self) -> AiStatus {
        let history = self.agent.as_ref().and_then(|agent| agent.history());
        let last = history.and_then(|h| h.last());
        AiStatus {
            name: self
                .agent
                .as_ref()
                .map_or("AI", |agent| agent.name())
                .to_string(),
            thinking: self.worker.is_some(),
            last_depth: last.map(|outcome| outcome.depth),
            last_nodes: last.map(|outcome| outcome.stats.nodes),
            last_ms: last.map(|outcome| outcome.elapsed.as_secs_f64() * 1000.0),
            average_ms: history
                .and_then(|h| h.average_decision_time())
                .map(|d| d.as_secs_f64() * 1000.0),
            decision_us: history
                .map(|h| h.decision_times().map(|d| d.as_micros() as u64).collect())
                .unwrap_or_default(),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            &self.ai_status(),
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

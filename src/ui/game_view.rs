use crate::game::{Cell, GameState, Player, Window, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

/// What the header shows about the computer opponent.
#[derive(Debug, Clone, Default)]
pub struct AiStatus {
    pub name: String,
    pub thinking: bool,
    pub last_depth: Option<usize>,
    pub last_nodes: Option<u64>,
    pub last_ms: Option<f64>,
    pub average_ms: Option<f64>,
    /// Recent decision times in microseconds, oldest first
    pub decision_us: Vec<u64>,
}

impl AiStatus {
    fn summary(&self) -> String {
        if self.thinking {
            return format!("{} is thinking...", self.name);
        }
        match (self.last_depth, self.last_nodes, self.last_ms) {
            (Some(depth), Some(nodes), Some(ms)) => {
                let mut text = format!("{}: depth {depth}, {nodes} nodes, {ms:.1} ms", self.name);
                if let Some(avg) = self.average_ms {
                    text.push_str(&format!(" (avg {avg:.1} ms)"));
                }
                text
            }
            _ => self.name.clone(),
        }
    }
}

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    message: &Option<String>,
    ai: &AiStatus,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, ai, chunks[0]);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(32)])
        .split(chunks[1]);

    render_board(frame, game_state, selected_column, middle[0]);
    render_decision_sparkline(frame, ai, middle[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Human => Color::Yellow,
        Player::Ai => Color::Red,
    }
}

fn render_header(frame: &mut Frame, game_state: &GameState, ai: &AiStatus, area: Rect) {
    let current_player = game_state.current_player();

    let status = if game_state.is_terminal() {
        "Game Over".to_string()
    } else {
        format!("Current Player: {}", current_player.name())
    };

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            status,
            Style::default()
                .fg(player_color(current_player))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(ai.summary()),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Connect Four"),
    );

    frame.render_widget(header, area);
}

fn cell_span(cell: Cell, highlighted: bool) -> Span<'static> {
    let (symbol, color) = match cell {
        Cell::Empty => (" . ", Color::DarkGray),
        Cell::Human => (" ● ", player_color(Player::Human)),
        Cell::Ai => (" ● ", player_color(Player::Ai)),
    };
    let mut style = Style::default().fg(color);
    if highlighted {
        style = style.bg(Color::Green).add_modifier(Modifier::BOLD);
    }
    Span::styled(symbol, style)
}

fn render_board(frame: &mut Frame, game_state: &GameState, selected_column: usize, area: Rect) {
    let board = game_state.board();
    let winning: Option<Window> = game_state.winning_line();
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let highlighted = winning.is_some_and(|line| line.contains(&(row, col)));
            row_spans.push(cell_span(board.get(row, col), highlighted));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_decision_sparkline(frame: &mut Frame, ai: &AiStatus, area: Rect) {
    let title = match ai.decision_us.iter().max() {
        Some(&max) => format!("Decision Times (max {:.1} ms)", max as f64 / 1000.0),
        None => "Decision Times".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&ai.decision_us)
        .style(Style::default().fg(Color::Magenta));

    frame.render_widget(sparkline, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(
        "←/→: Move  |  Enter: Drop  |  R: Restart  |  Q: Quit",
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Controls"),
    );

    frame.render_widget(controls, area);
}

use crate::ai::SearchReport;
use crate::game::{Board, Cell, Player, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Read-only AI telemetry shown next to the board.
pub struct AiStats<'a> {
    pub report: Option<&'a SearchReport>,
    pub evaluation: i32,
    pub ai_player: Player,
    pub thinking: bool,
}

pub fn render(
    frame: &mut Frame,
    board: &Board,
    selected_column: usize,
    message: &Option<String>,
    stats: &AiStats,
    show_debug: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board + stats
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)])
        .split(chunks[1]);

    render_header(frame, board, stats, chunks[0]);
    render_board(frame, board, selected_column, middle[0]);
    render_stats(frame, board, stats, show_debug, middle[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Yellow => Color::Yellow,
        Player::Red => Color::Red,
    }
}

fn render_header(frame: &mut Frame, board: &Board, stats: &AiStats, area: Rect) {
    let current_player = board.current_player();

    let status = if board.is_terminal() {
        "Game Over".to_string()
    } else if stats.thinking {
        format!("{} (AI) is thinking...", current_player.name())
    } else {
        format!("Current Player: {}", current_player.name())
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(current_player))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, board: &Board, selected_column: usize, area: Rect) {
    let winning_line = board.winner().map(|(_, line)| line);
    let last_move = board.last_move();
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(COLS * 3 + 1))));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let (symbol, color) = match board.get(col, row) {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::Red => (" ● ", Color::Red),
                Cell::Yellow => (" ● ", Color::Yellow),
            };
            let mut style = Style::default().fg(color);
            if winning_line.is_some_and(|line| line.contains(&(col, row))) {
                style = style.bg(Color::Green).add_modifier(Modifier::BOLD);
            } else if last_move == Some((col, row)) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(COLS * 3 + 1))));

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

fn render_stats(frame: &mut Frame, board: &Board, stats: &AiStats, show_debug: bool, area: Rect) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled("Last AI move", label))];

    match stats.report {
        Some(report) if report.nodes > 0 => {
            let column = report
                .best_move
                .map(|c| (c + 1).to_string())
                .unwrap_or_else(|| "-".to_string());
            lines.push(Line::from(format!("  Column:  {column}")));
            lines.push(Line::from(format!("  Score:   {}", report.score)));
            lines.push(Line::from(format!("  Nodes:   {}", report.nodes)));
            lines.push(Line::from(format!("  Depth:   {}", report.depth)));
            lines.push(Line::from(format!(
                "  Time:    {:.2}s{}",
                report.elapsed.as_secs_f64(),
                if report.timed_out { " (cutoff)" } else { "" }
            )));
        }
        _ => lines.push(Line::from("  (none yet)")),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Evaluation ", label),
        Span::styled(
            format!("({})", stats.ai_player.name()),
            Style::default().fg(player_color(stats.ai_player)),
        ),
        Span::raw(format!(": {}", stats.evaluation)),
    ]));

    if show_debug {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Debug", label)));
        lines.push(Line::from(format!("  Moves: {:?}", board.history())));
        let free: Vec<String> = (0..COLS)
            .map(|col| {
                board
                    .next_free_row(col)
                    .map(|row| row.to_string())
                    .unwrap_or_else(|| "-".to_string())
            })
            .collect();
        lines.push(Line::from(format!("  Free rows: {}", free.join(" "))));
        lines.push(Line::from(format!("  Lines: {}", board.lines().len())));
        lines.push(Line::from(format!("  Hash: {:016x}", board.hash())));
    }

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("AI"));
    frame.render_widget(widget, area);
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
    let line1 = Line::from("←/→: Move  |  ↓/Enter: Drop  |  Backspace: Take back");
    let line2 = Line::from("↑: Debug info  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

use crate::ai::{evaluate, Agent, SearchAgent};
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{Board, GameOutcome, Player, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// Interactive human-versus-computer game.
pub struct App {
    board: Board,
    agent: SearchAgent,
    ai_player: Player,
    selected_column: usize,
    should_quit: bool,
    show_debug: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        App {
            board: Board::new(),
            agent: SearchAgent::new(config.search.clone()),
            ai_player: config.game.ai_player,
            selected_column: COLS / 2, // Start in middle
            should_quit: false,
            show_debug: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_ai_turn() {
                self.ai_turn();
            } else {
                self.handle_events()?;
            }
        }
        Ok(())
    }

    fn is_ai_turn(&self) -> bool {
        !self.board.is_terminal() && self.board.current_player() == self.ai_player
    }

    /// Let the computer pick and play a column.
    fn ai_turn(&mut self) {
        match self.agent.select_action(&mut self.board) {
            Some(column) => {
                if let Err(err) = self.board.apply(column) {
                    self.message = Some(format!("AI move rejected: {err}"));
                    return;
                }
                self.announce_outcome();
            }
            None => {
                // Nothing finished in time; any legal column keeps the game going.
                if let Some(&column) = self.board.successors().first() {
                    if let Err(err) = self.board.apply(column) {
                        self.message = Some(format!("AI move rejected: {err}"));
                        return;
                    }
                    self.message = Some("AI ran out of time, played a fallback move".into());
                    self.announce_outcome();
                }
            }
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
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
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                self.drop_piece();
            }
            KeyCode::Backspace => {
                self.take_back();
            }
            KeyCode::Up => {
                self.show_debug = !self.show_debug;
            }
            KeyCode::Char('r') => {
                self.board = Board::new();
                self.selected_column = COLS / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        if self.board.is_terminal() {
            self.message = Some("Game over! Backspace to take back, 'r' to restart.".to_string());
            return;
        }

        match self.board.apply(self.selected_column) {
            Ok(()) => self.announce_outcome(),
            Err(MoveError::ColumnFull { .. }) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(err) => {
                self.message = Some(err.to_string());
            }
        }
    }

    /// Undo the computer's reply and the human move before it.
    fn take_back(&mut self) {
        for _ in 0..2 {
            if self.board.undo().is_err() {
                self.message = Some("Nothing to take back".to_string());
                break;
            }
        }
    }

    fn announce_outcome(&mut self) {
        if let Some(outcome) = self.board.outcome() {
            self.message = Some(match outcome {
                GameOutcome::Winner { player, .. } => format!("{} wins!", player.name()),
                GameOutcome::Draw => "It's a draw!".to_string(),
            });
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let stats = super::game_view::AiStats {
            report: self.agent.last_report(),
            evaluation: evaluate(&self.board, self.ai_player, 0),
            ai_player: self.ai_player,
            thinking: self.is_ai_turn(),
        };
        super::game_view::render(
            frame,
            &self.board,
            self.selected_column,
            &self.message,
            &stats,
            self.show_debug,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        let mut config = AppConfig::default();
        config.search.max_depth = Some(3);
        App::new(&config)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    #[test]
    fn cursor_stays_on_board() {
        let mut app = app();
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column, COLS - 1);
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn human_drop_then_ai_reply() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.board.history(), &[3]);
        assert!(app.is_ai_turn());

        app.ai_turn();
        assert_eq!(app.board.move_count(), 2);
        assert!(!app.is_ai_turn());
        assert!(app.agent.last_report().is_some());
    }

    #[test]
    fn backspace_takes_back_two_plies() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        app.ai_turn();
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.board, Board::new());

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.message.as_deref(), Some("Nothing to take back"));
    }

    #[test]
    fn full_column_is_reported() {
        let mut app = app();
        app.board = Board::from_moves(&[3, 3, 3, 3, 3, 3]).unwrap();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message.as_deref(), Some("Column is full!"));
        assert_eq!(app.board.move_count(), 6);
    }

    #[test]
    fn out_of_time_ai_plays_fallback_column() {
        let mut config = AppConfig::default();
        config.search.time_budget_ms = 0;
        let mut app = App::new(&config);
        app.board = Board::from_moves(&[3]).unwrap();

        app.ai_turn();
        assert_eq!(app.board.move_count(), 2);
        assert!(app.agent.last_report().unwrap().timed_out);
    }

    #[test]
    fn run_draws_on_test_backend_until_quit() {
        let mut app = app();
        app.should_quit = true;
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        app.run(&mut terminal).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Connect Four"));
    }

    #[test]
    fn quit_and_restart() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.board.move_count(), 0);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}

use crate::config::AppConfig;
use crate::game::{Dimensions, MoveRejection, MoveResult, Run, Session};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

use super::game_view::{self, ViewState};

pub struct App {
    config: AppConfig,
    dims: Dimensions,
    session: Session,
    selected_column: usize,
    winning_run: Option<Run>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    /// Build the app and start the first game from `config`.
    pub fn new(config: AppConfig, dims: Dimensions) -> Self {
        let mut app = App {
            session: Session::new(config.game.termination_order),
            config,
            dims,
            selected_column: 0,
            winning_run: None,
            should_quit: false,
            message: None,
        };
        app.start_game();
        app
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
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
        let width = self.dims.width();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < width {
                    self.selected_column = column;
                }
                self.drop_column(column);
            }
            KeyCode::Char('n') | KeyCode::Char('r') => {
                self.start_game();
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    fn start_game(&mut self) {
        let (first, second) = self.config.players.players();
        self.session.start_game(first, second, self.dims);
        self.selected_column = self.dims.width() / 2;
        self.winning_run = None;
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        self.drop_column(self.selected_column);
    }

    fn drop_column(&mut self, column: usize) {
        let Some(result) = self.session.apply_move(column) else {
            return;
        };

        self.message = match result {
            MoveResult::Continue { .. } => None,
            MoveResult::Win { player, run, .. } => {
                self.winning_run = Some(run);
                Some(format!("{player} wins! Press 'n' for a new game."))
            }
            MoveResult::Tie { .. } => {
                Some("This game was a tie! Press 'n' for a new game.".to_string())
            }
            MoveResult::Rejected(MoveRejection::GameAlreadyFinished) => {
                Some("Game over! Press 'n' to start a new game.".to_string())
            }
            MoveResult::Rejected(MoveRejection::ColumnFull { .. }) => {
                Some("Column is full!".to_string())
            }
            MoveResult::Rejected(MoveRejection::InvalidColumn { .. }) => {
                Some("Invalid column!".to_string())
            }
        };
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let Some(engine) = self.session.engine() else {
            return;
        };
        let view = ViewState {
            selected_column: self.selected_column,
            message: self.message.as_deref(),
            winning_run: self.winning_run.as_ref(),
        };
        game_view::render(frame, engine, &view);
    }
}

use super::board_widget::{cell_span, Palette};
use crate::game::{Finish, GameEngine, GameStatus, Run};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the view needs besides the engine itself.
pub struct ViewState<'a> {
    pub selected_column: usize,
    pub message: Option<&'a str>,
    pub winning_run: Option<&'a Run>,
}

pub fn render(frame: &mut Frame, engine: &GameEngine, view: &ViewState<'_>) {
    let board_rows = u16::try_from(engine.board().height())
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Header
            Constraint::Min(board_rows),    // Board
            Constraint::Length(3),          // Message
            Constraint::Length(3),          // Controls
        ])
        .split(frame.area());

    let palette = Palette::for_engine(engine);
    render_header(frame, engine, &palette, chunks[0]);
    render_board(frame, engine, &palette, view, chunks[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, engine: &GameEngine, palette: &Palette, area: Rect) {
    let seat = engine.current_seat();
    let token = engine.player(seat).token();

    let status = match engine.status() {
        GameStatus::Active => format!("{seat} ({token}) to move"),
        GameStatus::Finished(Finish::Win(winner)) => {
            format!("{winner} ({}) wins!", engine.player(winner).token())
        }
        GameStatus::Finished(Finish::Tie) => "Tie game".to_string(),
    };
    let color = match engine.status() {
        GameStatus::Finished(Finish::Tie) => Color::White,
        _ => palette.color(seat),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    engine: &GameEngine,
    palette: &Palette,
    view: &ViewState<'_>,
    area: Rect,
) {
    let board = engine.board();
    let width = board.width();
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw(" ")];
    for col in 0..width {
        let label = format!("{:^3}", col + 1);
        if col == view.selected_column {
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
    col_line.push(Span::raw(" "));
    lines.push(Line::from(col_line));

    let rule = "\u{2550}".repeat(width * 3);
    lines.push(Line::from(format!("\u{2554}{rule}\u{2557}")));

    for (row, cells) in board.rows().enumerate() {
        let mut row_spans = vec![Span::raw("\u{2551}")];
        for (col, &cell) in cells.iter().enumerate() {
            let highlighted = view
                .winning_run
                .is_some_and(|run| run.contains(&(row, col)));
            row_spans.push(cell_span(cell, palette, highlighted));
        }
        row_spans.push(Span::raw("\u{2551}"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("\u{255a}{rule}\u{255d}")));

    // Selection indicator
    let mut indicator_line = vec![Span::raw(" ")];
    for col in 0..width {
        if col == view.selected_column && !engine.is_over() {
            indicator_line.push(Span::styled(
                " \u{25b2} ",
                Style::default().fg(Color::Cyan),
            ));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw(" "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from(
        "\u{2190}/\u{2192}: Move  |  Enter: Drop  |  1-9: Drop in column  |  N: New game  |  Q: Quit",
    );

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Dimensions, Player};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(engine: &GameEngine, view: &ViewState<'_>) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, engine, view)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_turn_and_pieces() {
        let mut engine =
            GameEngine::new(Player::new("red"), Player::new("yellow"), Dimensions::default());
        engine.apply_move(3);
        let view = ViewState {
            selected_column: 3,
            message: Some("hello"),
            winning_run: None,
        };
        let text = screen(&engine, &view);
        assert!(text.contains("Player 2 (yellow) to move"));
        assert!(text.contains('\u{25cf}'));
        assert!(text.contains("hello"));
    }

    #[test]
    fn test_renders_tallest_board_without_panicking() {
        let dims = Dimensions::new(crate::game::MAX_SIDE, 1).unwrap();
        let engine = GameEngine::new(Player::new("red"), Player::new("yellow"), dims);
        let view = ViewState {
            selected_column: 0,
            message: None,
            winning_run: None,
        };
        assert_eq!(screen(&engine, &view).lines().count(), 24);
    }

    #[test]
    fn test_renders_winner() {
        let mut engine =
            GameEngine::new(Player::new("red"), Player::new("yellow"), Dimensions::default());
        for col in [0, 1, 0, 1, 0, 1, 0] {
            engine.apply_move(col);
        }
        let view = ViewState {
            selected_column: 0,
            message: None,
            winning_run: None,
        };
        assert!(screen(&engine, &view).contains("Player 1 (red) wins!"));
    }
}

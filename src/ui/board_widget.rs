use std::str::FromStr;

use crate::game::{Cell, GameEngine, Seat};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Piece colours for the two seats, taken from the players' tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    first: Color,
    second: Color,
}

impl Palette {
    /// Parse each token as a terminal colour (`"red"`, `"lightblue"`,
    /// `"#ffcc00"`, `"42"`), falling back to red and yellow.
    pub fn from_tokens(first: &str, second: &str) -> Self {
        Palette {
            first: Color::from_str(first.trim()).unwrap_or(Color::Red),
            second: Color::from_str(second.trim()).unwrap_or(Color::Yellow),
        }
    }

    pub fn for_engine(engine: &GameEngine) -> Self {
        Self::from_tokens(
            engine.player(Seat::First).token(),
            engine.player(Seat::Second).token(),
        )
    }

    pub fn color(&self, seat: Seat) -> Color {
        match seat {
            Seat::First => self.first,
            Seat::Second => self.second,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            first: Color::Red,
            second: Color::Yellow,
        }
    }
}

/// Three-column wide span for one cell. Winning cells are drawn inverted.
pub fn cell_span(cell: Cell, palette: &Palette, highlighted: bool) -> Span<'static> {
    match cell {
        Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
        Cell::Taken(seat) => {
            let mut style = Style::default().fg(palette.color(seat));
            if highlighted {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            Span::styled(" \u{25cf} ", style)
        }
    }
}

use std::fmt;

/// Which of the two contestants a piece or turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    /// Get the other seat
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Position of this seat in the engine's player pair
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    /// Get seat name for display
    pub fn name(self) -> &'static str {
        match self {
            Seat::First => "Player 1",
            Seat::Second => "Player 2",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A contestant as supplied by the front end. The token is usually a colour
/// name and is only ever used for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    token: String,
}

impl Player {
    pub fn new(token: impl Into<String>) -> Self {
        Player {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Seat),
}

impl Cell {
    pub fn owner(self) -> Option<Seat> {
        match self {
            Cell::Empty => None,
            Cell::Taken(seat) => Some(seat),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Single-character glyph used by the text rendering of a board
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Taken(Seat::First) => 'X',
            Cell::Taken(Seat::Second) => 'O',
        }
    }
}

//! Board module - a gravity grid of `height` rows by `width` columns.
//!
//! Coordinates are `(row, column)`. Row 0 is the top, row `height - 1` is the
//! bottom; pieces fall toward higher row indices. Storage is a flat row-major
//! vector so any configured size costs a single allocation.

use std::fmt;

use super::player::{Cell, Seat};

pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_WIDTH: usize = 7;
/// Largest accepted height or width; leaves room for the TUI frame rows.
pub const MAX_SIDE: usize = u16::MAX as usize - 4;

/// Errors raised when building a board of an unusable size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimensionError {
    #[error("board height must be at least 1")]
    ZeroHeight,

    #[error("board width must be at least 1")]
    ZeroWidth,

    #[error("board {axis} {value} exceeds the maximum of {max}")]
    TooLarge {
        axis: &'static str,
        value: usize,
        max: usize,
    },

    #[error("a {height}x{width} board has too many cells")]
    CellCountOverflow { height: usize, width: usize },
}

/// A placement that would break the board's invariants. Only reachable by
/// bypassing the landing-row query, so callers treat it as a bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("cell ({row}, {column}) is outside a {height}x{width} board")]
    OutOfBounds {
        row: usize,
        column: usize,
        height: usize,
        width: usize,
    },

    #[error("cell ({row}, {column}) is already taken by {owner}")]
    CellOccupied {
        row: usize,
        column: usize,
        owner: Seat,
    },

    #[error("cell ({row}, {column}) would float above an empty cell")]
    Floating { row: usize, column: usize },
}

/// Validated board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    height: usize,
    width: usize,
}

impl Dimensions {
    pub fn new(height: usize, width: usize) -> Result<Self, DimensionError> {
        if height == 0 {
            return Err(DimensionError::ZeroHeight);
        }
        if width == 0 {
            return Err(DimensionError::ZeroWidth);
        }
        if height > MAX_SIDE {
            return Err(DimensionError::TooLarge {
                axis: "height",
                value: height,
                max: MAX_SIDE,
            });
        }
        if width > MAX_SIDE {
            return Err(DimensionError::TooLarge {
                axis: "width",
                value: width,
                max: MAX_SIDE,
            });
        }
        if height.checked_mul(width).is_none() {
            return Err(DimensionError::CellCountOverflow { height, width });
        }
        Ok(Dimensions { height, width })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dims: Dimensions,
    /// Row-major cells (row * width + column)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(dims: Dimensions) -> Self {
        Board {
            dims,
            cells: vec![Cell::Empty; dims.height * dims.width],
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    #[inline]
    fn index(&self, row: usize, column: usize) -> usize {
        row * self.dims.width + column
    }

    fn in_bounds(&self, row: usize, column: usize) -> bool {
        row < self.dims.height && column < self.dims.width
    }

    /// Get the occupant of a cell.
    ///
    /// Panics if `(row, column)` is outside the board.
    pub fn owner_at(&self, row: usize, column: usize) -> Cell {
        assert!(
            self.in_bounds(row, column),
            "cell ({row}, {column}) is outside a {}x{} board",
            self.dims.height,
            self.dims.width
        );
        self.cells[self.index(row, column)]
    }

    /// Bounds-checked lookup over signed coordinates; `None` off the board.
    pub fn cell_checked(&self, row: isize, column: isize) -> Option<Cell> {
        if row < 0 || column < 0 {
            return None;
        }
        let (row, column) = (row as usize, column as usize);
        if !self.in_bounds(row, column) {
            return None;
        }
        Some(self.cells[self.index(row, column)])
    }

    /// Row a piece dropped into `column` would settle in, or `None` when the
    /// column is full or does not exist.
    pub fn find_landing_row(&self, column: usize) -> Option<usize> {
        if column >= self.dims.width {
            return None;
        }
        (0..self.dims.height)
            .rev()
            .find(|&row| self.cells[self.index(row, column)].is_empty())
    }

    /// Check if a column is full (nonexistent columns count as full)
    pub fn is_column_full(&self, column: usize) -> bool {
        self.find_landing_row(column).is_none()
    }

    /// Number of pieces stacked in a column
    pub fn column_height(&self, column: usize) -> usize {
        if column >= self.dims.width {
            return 0;
        }
        (0..self.dims.height)
            .filter(|&row| !self.cells[self.index(row, column)].is_empty())
            .count()
    }

    /// Columns that can still accept a piece, left to right
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.dims.width)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Mark `(row, column)` as owned by `seat`. The cell must be empty and
    /// rest on the floor or on another piece.
    pub fn place(&mut self, row: usize, column: usize, seat: Seat) -> Result<(), InvariantViolation> {
        if !self.in_bounds(row, column) {
            return Err(InvariantViolation::OutOfBounds {
                row,
                column,
                height: self.dims.height,
                width: self.dims.width,
            });
        }

        let idx = self.index(row, column);
        if let Cell::Taken(owner) = self.cells[idx] {
            return Err(InvariantViolation::CellOccupied { row, column, owner });
        }

        if row + 1 < self.dims.height && self.cells[self.index(row + 1, column)].is_empty() {
            return Err(InvariantViolation::Floating { row, column });
        }

        self.cells[idx] = Cell::Taken(seat);
        Ok(())
    }

    /// Check if every cell on the board is taken
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Iterate rows top to bottom as slices
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dims.width)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Dimensions::default())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|cell| cell.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

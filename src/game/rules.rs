//! Four-in-a-row detection.
//!
//! Every cell owned by the mover anchors four candidate runs, each extending
//! in one direction. The board is scanned row-major and the first complete
//! run wins. Runs that leave the board simply fail to match.

use super::board::Board;
use super::player::{Cell, Seat};

pub const RUN_LENGTH: usize = 4;

/// Four `(row, column)` coordinates that share an owner.
pub type Run = [(usize, usize); RUN_LENGTH];

/// Step applied per cell: `(row delta, column delta)`.
const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal down-right
    (1, -1), // diagonal down-left
];

/// Check whether `seat` owns any complete run on the board
pub fn check_for_win(board: &Board, seat: Seat) -> bool {
    find_winning_run(board, seat).is_some()
}

/// First run owned entirely by `seat`, in row-major anchor order
pub fn find_winning_run(board: &Board, seat: Seat) -> Option<Run> {
    let target = Cell::Taken(seat);
    for row in 0..board.height() {
        for col in 0..board.width() {
            if board.owner_at(row, col) != target {
                continue;
            }
            for &(dy, dx) in &DIRECTIONS {
                if let Some(run) = run_from(board, row, col, dy, dx, target) {
                    return Some(run);
                }
            }
        }
    }
    None
}

fn run_from(
    board: &Board,
    row: usize,
    col: usize,
    dy: isize,
    dx: isize,
    target: Cell,
) -> Option<Run> {
    let mut run = [(row, col); RUN_LENGTH];
    for (step, slot) in run.iter_mut().enumerate() {
        let y = row as isize + dy * step as isize;
        let x = col as isize + dx * step as isize;
        if board.cell_checked(y, x)? != target {
            return None;
        }
        *slot = (y as usize, x as usize);
    }
    Some(run)
}
